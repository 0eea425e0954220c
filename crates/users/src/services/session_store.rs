//! Process-wide session store.
//!
//! Single source of truth for "who is logged in". The state lives in a
//! `watch` channel owned by the store; only the store's own operations
//! write to it, and every write is followed by a listener notification.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::auth_api::AuthApi;
use crate::entities::{Identity, LoginRequest, PetId, RegisterRequest, Session};
use crate::types::{SessionError, SessionResult};
use crate::utils::listeners::{Listeners, Subscription};

pub struct SessionStore {
    api: Arc<dyn AuthApi>,
    state: watch::Sender<Session>,
    listeners: Listeners<Session>,
    initialized: AtomicBool,
    submission_in_flight: AtomicBool,
    reject_overlapping: bool,
}

impl SessionStore {
    /// Create a store in the loading state. Call [`SessionStore::initialize`]
    /// once at boot.
    pub fn new(api: Arc<dyn AuthApi>) -> Self {
        let (state, _) = watch::channel(Session::initial());
        Self {
            api,
            state,
            listeners: Listeners::new(),
            initialized: AtomicBool::new(false),
            submission_in_flight: AtomicBool::new(false),
            reject_overlapping: true,
        }
    }

    /// When false, overlapping login/register calls all go through and the
    /// last one to complete decides the state.
    pub fn reject_overlapping_submissions(mut self, reject: bool) -> Self {
        self.reject_overlapping = reject;
        self
    }

    /// Boot-time identity check.
    ///
    /// Failures are logged and treated as "not logged in"; `is_loading` is
    /// cleared whatever happens. Only the first call talks to the service.
    pub async fn initialize(&self) -> Session {
        if self.initialized.swap(true, Ordering::SeqCst) {
            debug!("session store already initialised");
            return self.snapshot();
        }

        let checked = match self.api.check_auth().await {
            Ok(status) => match (status.is_authenticated, status.user) {
                (true, Some(user)) => Some(user),
                (true, None) => {
                    warn!("identity check reported an authenticated session without a user");
                    None
                }
                (false, _) => None,
            },
            Err(error) => {
                warn!(%error, "identity check failed, continuing as anonymous");
                None
            }
        };

        let session = Session {
            is_authenticated: checked.is_some(),
            user: checked,
            is_loading: false,
            adopted_pets: Vec::new(),
        };

        match &session.user {
            Some(user) => info!(username = %user.username, role = %user.role, "restored session"),
            None => info!("no active session"),
        }

        self.publish(session.clone());
        session
    }

    pub async fn login(&self, username: &str, password: &str) -> SessionResult<Identity> {
        let _submission = self.begin_submission()?;

        let request = LoginRequest::new(username, password);
        match self.api.login(&request).await {
            Ok(identity) => {
                info!(username = %identity.username, role = %identity.role, "signed in");
                let next = self.snapshot().signed_in(identity.clone());
                self.publish(next);
                Ok(identity)
            }
            Err(error) => {
                warn!(username, %error, "login failed");
                Err(with_fallback(error.into(), "Error al iniciar sesión"))
            }
        }
    }

    pub async fn register(&self, request: &RegisterRequest) -> SessionResult<Identity> {
        let _submission = self.begin_submission()?;

        match self.api.register(request).await {
            Ok(identity) => {
                info!(username = %identity.username, role = %identity.role, "account registered");
                let next = self.snapshot().signed_in(identity.clone());
                self.publish(next);
                Ok(identity)
            }
            Err(error) => {
                warn!(username = %request.username, %error, "registration failed");
                Err(with_fallback(error.into(), "Error al registrar usuario"))
            }
        }
    }

    /// End the session.
    ///
    /// The remote call is best effort: local state is cleared even when the
    /// service fails or cannot be reached, because logging out locally must
    /// never be blocked by the backend.
    pub async fn logout(&self) {
        if let Err(error) = self.api.logout().await {
            warn!(%error, "service rejected logout, clearing local session anyway");
        }

        let next = self.snapshot().signed_out();
        self.publish(next);
        info!("signed out");
    }

    pub fn current_user(&self) -> Option<Identity> {
        self.state.borrow().user.clone()
    }

    pub fn snapshot(&self) -> Session {
        self.state.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading
    }

    /// Register a listener called with the new session after every change.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&Session) + Send + Sync + 'static,
    {
        self.listeners.subscribe(listener)
    }

    /// Receiver for async consumers that want to await changes.
    pub fn watch(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }

    /// Resolve once the boot-time identity check has completed.
    pub async fn wait_until_loaded(&self) -> Session {
        let mut receiver = self.state.subscribe();
        let loaded = match receiver.wait_for(|session| !session.is_loading).await {
            Ok(session) => Some((*session).clone()),
            Err(_) => None,
        };
        loaded.unwrap_or_else(|| self.snapshot())
    }

    /// Mark a pet as adopted by the current user. Returns false when nobody
    /// is logged in or the pet was already in the list.
    pub fn adopt(&self, pet_id: PetId) -> bool {
        if !self.is_authenticated() {
            debug!(pet_id, "ignoring adoption without a user");
            return false;
        }

        let added = self.state.send_if_modified(|session| {
            if !session.is_authenticated || session.adopted_pets.contains(&pet_id) {
                return false;
            }
            session.adopted_pets.push(pet_id);
            true
        });
        if added {
            info!(pet_id, "pet adopted");
            self.listeners.notify(&self.snapshot());
        }
        added
    }

    pub fn adopted_pets(&self) -> Vec<PetId> {
        self.state.borrow().adopted_pets.clone()
    }

    fn publish(&self, session: Session) {
        self.state.send_replace(session.clone());
        self.listeners.notify(&session);
    }

    fn begin_submission(&self) -> SessionResult<Option<SubmissionGuard<'_>>> {
        if !self.reject_overlapping {
            return Ok(None);
        }
        if self.submission_in_flight.swap(true, Ordering::SeqCst) {
            warn!("rejecting overlapping sign-in submission");
            return Err(SessionError::Busy);
        }
        Ok(Some(SubmissionGuard {
            flag: &self.submission_in_flight,
        }))
    }
}

struct SubmissionGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for SubmissionGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

fn with_fallback(error: SessionError, fallback: &str) -> SessionError {
    match error {
        SessionError::Rejected(message) if message.trim().is_empty() => {
            SessionError::Rejected(fallback.to_string())
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Role;
    use crate::services::mock_auth::MockAuthApi;
    use std::sync::atomic::AtomicUsize;

    fn store_with(api: MockAuthApi) -> (Arc<MockAuthApi>, SessionStore) {
        let api = Arc::new(api);
        let store = SessionStore::new(api.clone());
        (api, store)
    }

    #[tokio::test]
    async fn starts_loading_and_anonymous() {
        let (_, store) = store_with(MockAuthApi::new());
        let session = store.snapshot();
        assert!(session.is_loading);
        assert!(!session.is_authenticated);
        assert!(session.user.is_none());
    }

    #[tokio::test]
    async fn initialize_runs_the_check_only_once() {
        let (api, store) = store_with(
            MockAuthApi::new()
                .with_account("luna", "secreta1", Role::Adopter)
                .signed_in_as("luna"),
        );

        let first = store.initialize().await;
        assert!(first.is_authenticated);
        assert_eq!(first.user.unwrap().username, "luna");

        store.initialize().await;
        assert_eq!(api.check_calls(), 1);
    }

    #[tokio::test]
    async fn listeners_see_every_mutation() {
        let (_, store) = store_with(MockAuthApi::new().with_account("luna", "secreta1", Role::Adopter));
        let notifications = Arc::new(AtomicUsize::new(0));
        let counter = notifications.clone();
        let _subscription = store.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        store.initialize().await;
        store.login("luna", "secreta1").await.unwrap();
        store.logout().await;

        assert_eq!(notifications.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn empty_rejection_message_gets_a_fallback() {
        assert_eq!(
            with_fallback(SessionError::Rejected("  ".into()), "Error al iniciar sesión"),
            SessionError::Rejected("Error al iniciar sesión".into())
        );
        assert_eq!(with_fallback(SessionError::Busy, "x"), SessionError::Busy);
    }

    #[tokio::test]
    async fn adopt_requires_a_user_and_skips_duplicates() {
        let (_, store) = store_with(MockAuthApi::new().with_account("luna", "secreta1", Role::Adopter));
        store.initialize().await;
        assert!(!store.adopt(4));

        store.login("luna", "secreta1").await.unwrap();
        assert!(store.adopt(4));
        assert!(!store.adopt(4));
        assert!(store.adopt(9));
        assert_eq!(store.adopted_pets(), vec![4, 9]);

        store.logout().await;
        assert!(store.adopted_pets().is_empty());
    }
}
