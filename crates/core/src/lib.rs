// Campus portal client core
//
// Client-side authentication, session persistence and role-based routing for
// the university portal, plus typed access to its REST API.
//
// Key design decisions:
// - The session lives in an injected SessionContext, never a global
// - Token claims are decoded for display and routing only; the server verifies
// - Storage is read once at startup and written on every transition
// - Any 401 from the API ends the session and navigates to /login
// - Role mismatches redirect to the user's own dashboard

pub mod api;
pub mod auth;
pub mod config;
pub mod context;
pub mod error;
pub mod gateway;
pub mod role;
pub mod routes;
pub mod session;
pub mod session_store;
pub mod storage;
pub mod token;

pub use auth::AuthManager;
pub use config::PortalConfig;
pub use context::SessionContext;
pub use error::{AuthError, DecodeError, GatewayError, PortalError, Result, StorageError};
pub use gateway::HttpGateway;
pub use role::Role;
pub use routes::{authorize, Decision, Navigation, Navigator, Route, Router, LOGIN_PATH};
pub use session::{Identity, Session, SessionState};
pub use session_store::SessionStore;
pub use storage::{DurableStorage, FileStorage, MemoryStorage};
