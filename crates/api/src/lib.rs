//! Typed client for the adoption service's REST API.
//!
//! [`ApiClient`] keeps one cookie jar for its whole life, so the session
//! cookie set at login and the CSRF cookie travel with every later request.
//! It implements the [`adopta_users::AuthApi`] and [`adopta_pets::PetRepo`]
//! seams and exposes the profile endpoints directly.

mod auth;
mod client;
mod error;
mod pets;
mod profile;

pub use client::ApiClient;
pub use error::{flatten_error, ApiError, ApiResult};
