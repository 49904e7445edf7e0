// Session persistence over durable storage
//
// Two keys: `token` holds the raw bearer string, `user` the JSON identity.
// Loading never fails; anything unreadable means nobody is logged in.

use std::sync::Arc;

use crate::error::StorageError;
use crate::session::{Identity, Session};
use crate::storage::DurableStorage;

pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "user";

#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<dyn DurableStorage>,
}

impl SessionStore {
    pub fn new(storage: Arc<dyn DurableStorage>) -> Self {
        Self { storage }
    }

    /// Read the persisted session. Both keys must be present and the user
    /// record must parse, otherwise the result is [`Session::Anonymous`].
    pub fn load(&self) -> Session {
        match self.try_load() {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!(error = %e, "failed to read stored session, starting anonymous");
                Session::Anonymous
            }
        }
    }

    fn try_load(&self) -> Result<Session, StorageError> {
        let token = non_empty(self.storage.get_item(TOKEN_KEY)?);
        let user = non_empty(self.storage.get_item(USER_KEY)?);

        let (Some(token), Some(user)) = (token, user) else {
            return Ok(Session::Anonymous);
        };

        match serde_json::from_str::<Identity>(&user) {
            Ok(identity) => Ok(Session::authenticated(identity, token)),
            Err(e) => {
                tracing::warn!(error = %e, "stored user record is malformed, ignoring it");
                Ok(Session::Anonymous)
            }
        }
    }

    /// Current bearer token straight from storage.
    pub fn token(&self) -> Option<String> {
        match self.storage.get_item(TOKEN_KEY) {
            Ok(token) => non_empty(token),
            Err(e) => {
                tracing::warn!(error = %e, "failed to read stored token");
                None
            }
        }
    }

    /// Persist `session`. The token is written before the user record;
    /// saving an anonymous session clears both.
    pub fn save(&self, session: &Session) -> Result<(), StorageError> {
        match session {
            Session::Anonymous => self.clear(),
            Session::Authenticated { identity, token } => {
                let user = serde_json::to_string(identity).map_err(StorageError::Serialize)?;
                self.storage.set_item(TOKEN_KEY, token)?;
                self.storage.set_item(USER_KEY, &user)
            }
        }
    }

    /// Remove both keys. Both removals are attempted even if the first fails.
    pub fn clear(&self) -> Result<(), StorageError> {
        let token = self.storage.remove_item(TOKEN_KEY);
        let user = self.storage.remove_item(USER_KEY);
        token.and(user)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
