//! The navbar's free-text search term, shared by every listing page.

use adopta_users::{Listeners, Subscription};
use tokio::sync::watch;
use tracing::debug;

/// Process-wide search term. Empty means "no filter".
pub struct SearchStore {
    term: watch::Sender<String>,
    listeners: Listeners<String>,
}

impl SearchStore {
    pub fn new() -> Self {
        let (term, _) = watch::channel(String::new());
        Self {
            term,
            listeners: Listeners::new(),
        }
    }

    /// Replace the term as typed; no trimming or validation.
    pub fn set_term(&self, term: impl Into<String>) {
        let term = term.into();
        let changed = self.term.send_if_modified(|current| {
            if *current == term {
                return false;
            }
            *current = term.clone();
            true
        });

        if changed {
            debug!(term = %term, "search term changed");
            self.listeners.notify(&term);
        }
    }

    pub fn term(&self) -> String {
        self.term.borrow().clone()
    }

    pub fn reset(&self) {
        self.set_term(String::new());
    }

    /// Called with the new term after every change
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&String) + Send + Sync + 'static,
    {
        self.listeners.subscribe(listener)
    }

    pub fn watch(&self) -> watch::Receiver<String> {
        self.term.subscribe()
    }
}

impl Default for SearchStore {
    fn default() -> Self {
        Self::new()
    }
}
