// CLI commands

pub mod admin;
pub mod auth;
pub mod faculty;
pub mod notices;
pub mod open;
pub mod student;

use std::sync::Arc;

use anyhow::{bail, Result};
use campus_portal_core::{
    AuthManager, HttpGateway, Identity, Navigation, Router, SessionContext, LOGIN_PATH,
};

use crate::output::OutputFormat;

/// Everything a command needs: the session, the guard and the API client
pub struct App {
    pub context: SessionContext,
    pub router: Arc<Router>,
    pub gateway: Arc<HttpGateway>,
    pub auth: AuthManager,
    pub output: OutputFormat,
    pub quiet: bool,
}

impl App {
    /// Navigate to the dashboard page a command belongs to; fail unless it renders.
    pub fn require_page(&self, path: &str) -> Result<Identity> {
        let session = self.context.session();
        match self.router.open(&session, path) {
            Navigation::Render(_) => match session.identity() {
                Some(identity) => Ok(identity.clone()),
                None => bail!("Not logged in. Run `portal login` first."),
            },
            Navigation::Redirect(target) if target == LOGIN_PATH => {
                bail!("Not logged in. Run `portal login` first.")
            }
            Navigation::Redirect(target) => match session.identity() {
                Some(identity) => bail!(
                    "{} is not available to {} accounts (redirected to {})",
                    path,
                    identity.role,
                    target
                ),
                None => bail!("Access denied (redirected to {})", target),
            },
            Navigation::NotFound(path) => bail!("No such page: {}", path),
        }
    }

    /// Require any signed-in user
    pub fn require_signed_in(&self) -> Result<Identity> {
        match self.context.identity() {
            Some(identity) => Ok(identity),
            None => bail!("Not logged in. Run `portal login` first."),
        }
    }
}

/// Parse a `key=value` argument
pub fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{}'", s))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing key in '{}'", s));
    }
    Ok((key.to_string(), value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use campus_portal_core::{MemoryStorage, PortalConfig, Role, SessionStore};

    fn app() -> App {
        let config = PortalConfig {
            api_url: "http://127.0.0.1:1".to_string(),
            ..Default::default()
        };
        let context = SessionContext::restore(SessionStore::new(Arc::new(MemoryStorage::new())));
        let router = Arc::new(Router::new());
        let gateway =
            Arc::new(HttpGateway::new(&config, context.clone(), router.clone()).unwrap());
        let auth = AuthManager::new(context.clone(), gateway.clone());
        App {
            context,
            router,
            gateway,
            auth,
            output: OutputFormat::Text,
            quiet: true,
        }
    }

    #[test]
    fn test_parse_key_val() {
        assert_eq!(
            parse_key_val("firstname=Asha").unwrap(),
            ("firstname".to_string(), "Asha".to_string())
        );
        assert_eq!(
            parse_key_val("about=a=b").unwrap(),
            ("about".to_string(), "a=b".to_string())
        );
        assert!(parse_key_val("novalue").is_err());
        assert!(parse_key_val("=x").is_err());
    }

    #[test]
    fn test_require_page_anonymous() {
        let app = app();
        let err = app.require_page("/student/profile").unwrap_err();
        assert!(err.to_string().contains("Not logged in"));
        assert_eq!(app.router.location(), "/login");
    }

    #[test]
    fn test_require_page_role_mismatch() {
        let app = app();
        app.context
            .establish(Identity::new("s@uni.edu", Role::Student), "h.p.s".to_string())
            .unwrap();

        let err = app.require_page("/admin/users").unwrap_err();
        assert!(err.to_string().contains("redirected to /student"));
        assert_eq!(app.router.location(), "/student");

        let identity = app.require_page("/student/results").unwrap();
        assert_eq!(identity.role, Role::Student);
        assert_eq!(app.router.location(), "/student/results");
    }
}
