//! Service layer for the account state.
//!
//! The session store owns the process-wide login state and reaches the
//! adoption service only through the `AuthApi` seam, so it can run against
//! the HTTP client or the in-memory mock.

pub mod auth_api;
pub mod mock_auth;
pub mod session_store;

pub use auth_api::AuthApi;
pub use mock_auth::MockAuthApi;
pub use session_store::SessionStore;
