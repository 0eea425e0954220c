//! Listing helpers used by the wall pages.

pub mod catalog;
pub mod filter;

pub use catalog::CatalogView;
pub use filter::filter_by_category;
