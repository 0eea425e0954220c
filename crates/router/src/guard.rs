//! Access decisions for protected views.
//!
//! Every function here is pure: it reads a [`Session`] snapshot and returns
//! what the caller should do. Nothing is stored between calls.

use adopta_users::{Role, Session};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::route::Route;

/// How a navigation touches the history stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavigationMode {
    Push,
    /// Overwrite the current entry so "back" cannot return to the denied view
    Replace,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Navigation {
    pub target: Route,
    pub mode: NavigationMode,
}

impl Navigation {
    pub fn push(target: Route) -> Self {
        Self {
            target,
            mode: NavigationMode::Push,
        }
    }

    pub fn replace(target: Route) -> Self {
        Self {
            target,
            mode: NavigationMode::Replace,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Render,
    Redirect(Navigation),
    /// The boot-time identity check has not finished; decide again once
    /// `SessionStore::wait_until_loaded` resolves.
    Pending,
}

impl GuardDecision {
    pub fn is_render(&self) -> bool {
        matches!(self, GuardDecision::Render)
    }
}

/// Allow the view for any signed-in user, otherwise replace it with `redirect`.
pub fn guard(session: &Session, redirect: Route) -> GuardDecision {
    if session.is_loading {
        return GuardDecision::Pending;
    }
    if session.is_authenticated {
        return GuardDecision::Render;
    }

    debug!(redirect = %redirect, "guest sent away from protected view");
    GuardDecision::Redirect(Navigation::replace(redirect))
}

/// Allow the view only for users holding `role`.
pub fn require_role(session: &Session, role: Role, fallback: Route) -> GuardDecision {
    match guard(session, fallback) {
        GuardDecision::Render if session.role() == Some(role) => GuardDecision::Render,
        GuardDecision::Render => {
            debug!(required = %role, fallback = %fallback, "role mismatch, redirecting");
            GuardDecision::Redirect(Navigation::replace(fallback))
        }
        other => other,
    }
}

/// Apply the route table's rules for `route`.
///
/// Guests go to `login_redirect`; signed-in users without the needed role go
/// home.
pub fn guard_route(route: Route, session: &Session, login_redirect: Route) -> GuardDecision {
    if !route.requires_auth() {
        return GuardDecision::Render;
    }

    match guard(session, login_redirect) {
        GuardDecision::Render => match route.required_role() {
            Some(role) => require_role(session, role, Route::Home),
            None => GuardDecision::Render,
        },
        other => other,
    }
}
