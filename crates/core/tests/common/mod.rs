// Shared fixtures for portal client integration tests

#![allow(dead_code)]

use campus_portal_core::{
    AuthManager, DurableStorage, HttpGateway, MemoryStorage, PortalConfig, Router,
    SessionContext, SessionStore,
};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use wiremock::MockServer;

pub struct Harness {
    pub server: MockServer,
    pub storage: Arc<MemoryStorage>,
    pub context: SessionContext,
    pub router: Arc<Router>,
    pub gateway: Arc<HttpGateway>,
    pub auth: AuthManager,
}

pub async fn harness() -> Harness {
    let server = MockServer::start().await;
    let storage = Arc::new(MemoryStorage::new());
    let (context, router, gateway, auth) = wire(&server.uri(), storage.clone());

    Harness {
        server,
        storage,
        context,
        router,
        gateway,
        auth,
    }
}

/// Build the client stack against `api_url` over `storage`
pub fn wire(
    api_url: &str,
    storage: Arc<dyn DurableStorage>,
) -> (SessionContext, Arc<Router>, Arc<HttpGateway>, AuthManager) {
    let config = PortalConfig {
        api_url: api_url.to_string(),
        request_timeout: Duration::from_secs(5),
        ..Default::default()
    };

    let context = SessionContext::restore(SessionStore::new(storage));
    let router = Arc::new(Router::new());
    let gateway = Arc::new(
        HttpGateway::new(&config, context.clone(), router.clone()).expect("Failed to build gateway"),
    );
    let auth = AuthManager::new(context.clone(), gateway.clone());
    (context, router, gateway, auth)
}

#[derive(Serialize)]
struct Claims<'a> {
    sub: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    iat: i64,
    exp: i64,
}

/// Token signed the way the portal server signs them (HS256)
pub fn mint_token(sub: &str, role: Option<&str>) -> String {
    let claims = Claims {
        sub,
        role,
        iat: 1_700_000_000,
        exp: 1_700_086_400,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(b"server-side-secret"),
    )
    .expect("Failed to mint token")
}
