//! # Adopta Router Crate
//!
//! Decides which view the client may show. [`Route`] is the application's
//! path table, [`guard`] and [`require_role`] turn the current session into a
//! [`GuardDecision`], and [`nav`] builds the navbar for a session.

pub mod error;
pub mod guard;
pub mod nav;
pub mod route;

pub use error::{RouteError, RouteResult};
pub use guard::{guard, guard_route, require_role, GuardDecision, Navigation, NavigationMode};
pub use nav::{nav_links, on_logo_click, on_logout, on_search_change, NavAction, NavLink};
pub use route::Route;
