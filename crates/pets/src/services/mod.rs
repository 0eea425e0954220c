//! Service layer for the catalogue pages.

pub mod pet_repo;
pub mod pet_service;
pub mod search_store;

pub use pet_repo::PetRepo;
pub use pet_service::PetService;
pub use search_store::SearchStore;
