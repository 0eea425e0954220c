//! Shared types for the pet catalogue.

pub mod errors;

pub use errors::*;
