// Auth session manager
//
// State machine: loading -> {authenticated, anonymous}; authenticated ->
// anonymous on logout or a forced clear; anonymous -> authenticated on login.
// There is no refresh and no expiry check: an expired token is discovered
// when the server answers 401 and the gateway ends the session.

use serde::Serialize;
use std::sync::Arc;

use crate::context::SessionContext;
use crate::error::{AuthError, GatewayError};
use crate::gateway::HttpGateway;
use crate::role::Role;
use crate::session::{Identity, Session, SessionState};
use crate::token;

const LOGIN_FAILED: &str = "Login failed. Please try again.";
const PASSWORD_CHANGE_FAILED: &str = "Password change failed.";
const SIGNUP_FAILED: &str = "Signup failed.";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginRequest<'a> {
    username_or_email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct ChangePasswordRequest<'a> {
    email: &'a str,
    password: &'a str,
    newpassword: &'a str,
}

#[derive(Debug, Serialize)]
struct SignupRequest<'a> {
    email: &'a str,
    password: &'a str,
    role: Role,
}

pub struct AuthManager {
    context: SessionContext,
    gateway: Arc<HttpGateway>,
}

impl AuthManager {
    pub fn new(context: SessionContext, gateway: Arc<HttpGateway>) -> Self {
        Self { context, gateway }
    }

    pub fn state(&self) -> SessionState {
        self.context.state()
    }

    pub fn session(&self) -> Session {
        self.context.session()
    }

    pub fn identity(&self) -> Option<Identity> {
        self.context.identity()
    }

    pub fn is_authenticated(&self) -> bool {
        self.context.is_authenticated()
    }

    /// Exchange credentials for a token and establish the session.
    ///
    /// Nothing is persisted unless the returned token decodes to an identity.
    pub async fn login(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        let request = LoginRequest {
            username_or_email: email,
            password,
        };

        let body = self
            .gateway
            .post_json_text("/auth/login", &request)
            .await
            .map_err(|e| rejected(e, LOGIN_FAILED))?;

        let token = unwrap_token(&body);
        let identity = token::decode(&token).map_err(|e| {
            tracing::warn!(error = %e, "login returned an undecodable token");
            AuthError::InvalidToken(e)
        })?;

        self.context.establish(identity.clone(), token)?;
        tracing::info!(email = %identity.email, role = %identity.role, "logged in");
        Ok(identity)
    }

    /// End the session locally. No server round trip; safe to repeat.
    pub fn logout(&self) {
        let was_authenticated = self.context.is_authenticated();
        self.context.invalidate();
        if was_authenticated {
            tracing::info!("logged out");
        }
    }

    /// Change the current user's password. The session is left untouched.
    pub async fn change_password(
        &self,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AuthError> {
        let identity = self.context.identity().ok_or(AuthError::NotAuthenticated)?;

        let request = ChangePasswordRequest {
            email: &identity.email,
            password: current_password,
            newpassword: new_password,
        };

        self.gateway
            .post_json_text("/auth/changepassword", &request)
            .await
            .map_err(|e| {
                // A 401 here means the stored token was refused and the
                // gateway has already ended the session
                if e.is_unauthorized() {
                    AuthError::SessionExpired(e)
                } else {
                    rejected(e, PASSWORD_CHANGE_FAILED)
                }
            })?;

        tracing::info!(email = %identity.email, "password changed");
        Ok(())
    }

    /// Register an account. Returns the server's confirmation message.
    pub async fn signup(&self, email: &str, password: &str, role: Role) -> Result<String, AuthError> {
        let request = SignupRequest {
            email,
            password,
            role,
        };

        let body = self
            .gateway
            .post_json_text("/auth/signup", &request)
            .await
            .map_err(|e| rejected(e, SIGNUP_FAILED))?;

        Ok(unwrap_token(&body))
    }
}

fn rejected(error: GatewayError, fallback: &str) -> AuthError {
    tracing::debug!(error = %error, "auth request failed");
    AuthError::Rejected(
        error
            .server_message()
            .map(str::to_string)
            .unwrap_or_else(|| fallback.to_string()),
    )
}

/// The token arrives as plain text or as a JSON string literal.
fn unwrap_token(body: &str) -> String {
    let body = body.trim();
    if body.starts_with('"') {
        if let Ok(s) = serde_json::from_str::<String>(body) {
            return s;
        }
    }
    body.to_string()
}
