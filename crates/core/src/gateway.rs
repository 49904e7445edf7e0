// HTTP gateway for the portal API
//
// Every outbound call goes through here. The stored bearer token is attached
// when present, and a 401 from any endpoint ends the session: storage and
// memory are cleared, the navigator is sent to /login, and the caller gets
// `GatewayError::Unauthorized` instead of the response.

use reqwest::{multipart::Form, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;

use crate::config::PortalConfig;
use crate::context::SessionContext;
use crate::error::GatewayError;
use crate::routes::{Navigator, LOGIN_PATH};

pub struct HttpGateway {
    base_url: String,
    http: reqwest::Client,
    context: SessionContext,
    navigator: Arc<dyn Navigator>,
}

impl HttpGateway {
    pub fn new(
        config: &PortalConfig,
        context: SessionContext,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, GatewayError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            base_url: config.api_url.trim_end_matches('/').to_string(),
            http,
            context,
            navigator,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, GatewayError> {
        let response = self.send(self.http.get(self.url(path))).await?;
        read_json(response).await
    }

    pub async fn get_json_with_query<T, Q>(&self, path: &str, query: &Q) -> Result<T, GatewayError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let response = self
            .send(self.http.get(self.url(path)).query(query))
            .await?;
        read_json(response).await
    }

    pub async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, GatewayError> {
        let response = self.send(self.http.post(self.url(path)).json(body)).await?;
        read_json(response).await
    }

    /// POST a JSON body and return the raw response text
    pub async fn post_json_text<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<String, GatewayError> {
        let response = self.send(self.http.post(self.url(path)).json(body)).await?;
        Ok(response.text().await?)
    }

    /// POST without a body and return the raw response text
    pub async fn post_text(&self, path: &str) -> Result<String, GatewayError> {
        let response = self.send(self.http.post(self.url(path))).await?;
        Ok(response.text().await?)
    }

    pub async fn post_multipart(&self, path: &str, form: Form) -> Result<String, GatewayError> {
        let response = self
            .send(self.http.post(self.url(path)).multipart(form))
            .await?;
        Ok(response.text().await?)
    }

    /// GET a binary body (document, schedule or notice attachment)
    pub async fn get_bytes(&self, path: &str) -> Result<Vec<u8>, GatewayError> {
        let response = self.send(self.http.get(self.url(path))).await?;
        Ok(response.bytes().await?.to_vec())
    }

    pub async fn get_bytes_with_query<Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<Vec<u8>, GatewayError> {
        let response = self
            .send(self.http.get(self.url(path)).query(query))
            .await?;
        Ok(response.bytes().await?.to_vec())
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.context.bearer_token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, GatewayError> {
        let request = self.authorize(request).build()?;
        let method = request.method().clone();
        let url = request.url().clone();
        tracing::debug!(%method, path = url.path(), "sending request");

        let response = self.http.execute(request).await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            let message = response_message(response).await;
            tracing::warn!(%method, path = url.path(), "server rejected credentials, ending session");
            self.context.invalidate();
            self.navigator.navigate(LOGIN_PATH);
            return Err(GatewayError::Unauthorized { message });
        }

        if !status.is_success() {
            let message = response_message(response).await;
            tracing::debug!(%method, path = url.path(), status = status.as_u16(), "request failed");
            return Err(GatewayError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response)
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, GatewayError> {
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| GatewayError::Decode(e.to_string()))
}

async fn response_message(response: Response) -> String {
    response
        .text()
        .await
        .ok()
        .and_then(|body| server_message(&body))
        .unwrap_or_default()
}

/// Human-readable message from an error body: a JSON `message` or `error`
/// field, a bare JSON string, or the trimmed text itself.
pub(crate) fn server_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }

    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(serde_json::Value::String(s)) => Some(s).filter(|s| !s.is_empty()),
        Ok(serde_json::Value::Object(map)) => ["message", "error"]
            .iter()
            .find_map(|key| map.get(*key).and_then(|v| v.as_str()))
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .or_else(|| Some(body.to_string())),
        _ => Some(body.to_string()),
    }
}
