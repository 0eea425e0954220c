//! Internal utilities.

pub mod listeners;
pub mod validation;
