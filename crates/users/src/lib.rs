//! # Adopta Users Crate
//!
//! Client-side account state for the Adopta front-end: who is logged in, what
//! their role allows, and the forms used to sign in or create an account.
//!
//! ## Architecture
//!
//! - **Entities**: Domain models (Identity, Role, Session, auth payloads)
//! - **Services**: The session store and the `AuthApi` seam it talks through
//! - **Types**: Error definitions shared by the services
//! - **Utils**: Form validation and listener bookkeeping
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use adopta_users::{SessionStore, MockAuthApi};
//!
//! let store = SessionStore::new(Arc::new(MockAuthApi::new()));
//! store.initialize().await;
//! let identity = store.login("luna", "secreta1").await?;
//! ```

pub mod entities;
pub mod services;
pub mod types;
pub mod utils;

pub use entities::{
    AuthStatus, Identity, LoginRequest, PetId, Profile, ProfileUpdate, RegisterRequest, Role,
    Session, Upload,
};
pub use services::{AuthApi, MockAuthApi, SessionStore};
pub use types::{RemoteError, SessionError, SessionResult, ValidationError};
pub use utils::listeners::{Listeners, Subscription};
