// Session domain types
//
// An identity and its backing token travel together: a session is either
// anonymous or holds both.

use serde::{Deserialize, Serialize};

use crate::role::Role;

/// Identity decoded from a bearer token. Persisted as the `user` record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Subject of the token (the user's email).
    pub email: String,
    pub role: Role,
}

impl Identity {
    pub fn new(email: impl Into<String>, role: Role) -> Self {
        Self {
            email: email.into(),
            role,
        }
    }
}

/// Client-held session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Session {
    #[default]
    Anonymous,
    Authenticated { identity: Identity, token: String },
}

impl Session {
    pub fn authenticated(identity: Identity, token: impl Into<String>) -> Self {
        Session::Authenticated {
            identity,
            token: token.into(),
        }
    }

    pub fn identity(&self) -> Option<&Identity> {
        match self {
            Session::Authenticated { identity, .. } => Some(identity),
            Session::Anonymous => None,
        }
    }

    pub fn token(&self) -> Option<&str> {
        match self {
            Session::Authenticated { token, .. } => Some(token),
            Session::Anonymous => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Session::Authenticated { .. })
    }

    pub fn state(&self) -> SessionState {
        match self {
            Session::Authenticated { .. } => SessionState::Authenticated,
            Session::Anonymous => SessionState::Anonymous,
        }
    }
}

/// Lifecycle state of the session owner.
/// - `loading`: storage not read yet
/// - `authenticated`: identity and token present
/// - `anonymous`: nobody logged in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Loading,
    Authenticated,
    Anonymous,
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionState::Loading => write!(f, "loading"),
            SessionState::Authenticated => write!(f, "authenticated"),
            SessionState::Anonymous => write!(f, "anonymous"),
        }
    }
}
