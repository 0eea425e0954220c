//! Domain entities for the pet catalogue.

pub mod pet;

pub use pet::{format_age, Categorized, NewPet, Pet, Sex};
