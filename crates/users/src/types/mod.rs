//! Shared types for the account layer.

pub mod errors;

pub use errors::*;
