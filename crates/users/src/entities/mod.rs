//! Domain entities for accounts and sessions.

pub mod auth;
pub mod profile;
pub mod user;

pub use auth::{AuthStatus, LoginRequest, RegisterRequest};
pub use profile::{Profile, ProfileUpdate, Upload};
pub use user::{Identity, PetId, Role, Session};
