//! # Adopta Pets Crate
//!
//! Everything the listing pages need: the pet record, the catalogue service
//! sitting on top of the `PetRepo` seam, the shared search term and the pure
//! category filter the wall applies on every change.
//!
//! ## Architecture
//!
//! - **Entities**: Pet, NewPet and the `Categorized` trait
//! - **Services**: `PetService`, `SearchStore` and the `PetRepo` seam
//! - **Types**: `PetError` / `PetResult`
//! - **Utils**: `filter_by_category` and the wall's `CatalogView`
//!
//! ## Usage
//!
//! ```rust,ignore
//! use adopta_pets::{filter_by_category, SearchStore};
//!
//! let search = SearchStore::new();
//! search.set_term("perro");
//! let visible = filter_by_category(&pets, &search.term());
//! ```

pub mod entities;
pub mod services;
pub mod types;
pub mod utils;

pub use entities::{format_age, Categorized, NewPet, Pet, Sex};
pub use services::{PetRepo, PetService, SearchStore};
pub use types::{PetError, PetResult};
pub use utils::{filter_by_category, CatalogView};
