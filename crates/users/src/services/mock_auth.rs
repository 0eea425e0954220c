//! In-memory authentication service for tests and offline demos.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;

use super::auth_api::AuthApi;
use crate::entities::{AuthStatus, Identity, LoginRequest, RegisterRequest, Role};
use crate::types::RemoteError;
use crate::utils::validation::MIN_PASSWORD_LENGTH;

/// Mock authentication service that behaves like the real endpoints:
/// it keeps accounts, tracks the signed-in user behind the "cookie", and
/// answers with the same error messages.
pub struct MockAuthApi {
    accounts: Mutex<HashMap<String, (String, Identity)>>,
    current: Mutex<Option<Identity>>,
    next_id: AtomicI64,
    unreachable: AtomicBool,
    logout_fails: AtomicBool,
    latency: Mutex<Option<Duration>>,
    check_calls: AtomicUsize,
    login_calls: AtomicUsize,
    register_calls: AtomicUsize,
    logout_calls: AtomicUsize,
}

impl MockAuthApi {
    pub fn new() -> Self {
        Self {
            accounts: Mutex::new(HashMap::new()),
            current: Mutex::new(None),
            next_id: AtomicI64::new(1),
            unreachable: AtomicBool::new(false),
            logout_fails: AtomicBool::new(false),
            latency: Mutex::new(None),
            check_calls: AtomicUsize::new(0),
            login_calls: AtomicUsize::new(0),
            register_calls: AtomicUsize::new(0),
            logout_calls: AtomicUsize::new(0),
        }
    }

    /// Seed an account
    pub fn with_account(self, username: &str, password: &str, role: Role) -> Self {
        let identity = self.make_identity(username, &format!("{username}@example.com"), role);
        lock(&self.accounts).insert(username.to_string(), (password.to_string(), identity));
        self
    }

    /// Pretend the ambient cookie already belongs to `username`
    pub fn signed_in_as(self, username: &str) -> Self {
        let identity = lock(&self.accounts)
            .get(username)
            .map(|(_, identity)| identity.clone());
        *lock(&self.current) = identity;
        self
    }

    /// Make every call fail with a transport error
    pub fn set_unreachable(&self, unreachable: bool) {
        self.unreachable.store(unreachable, Ordering::SeqCst);
    }

    /// Make only the logout endpoint fail
    pub fn set_logout_failure(&self, fails: bool) {
        self.logout_fails.store(fails, Ordering::SeqCst);
    }

    /// Delay every response, to exercise overlapping calls
    pub fn set_latency(&self, latency: Duration) {
        *lock(&self.latency) = Some(latency);
    }

    pub fn check_calls(&self) -> usize {
        self.check_calls.load(Ordering::SeqCst)
    }

    pub fn login_calls(&self) -> usize {
        self.login_calls.load(Ordering::SeqCst)
    }

    pub fn register_calls(&self) -> usize {
        self.register_calls.load(Ordering::SeqCst)
    }

    pub fn logout_calls(&self) -> usize {
        self.logout_calls.load(Ordering::SeqCst)
    }

    fn make_identity(&self, username: &str, email: &str, role: Role) -> Identity {
        let mut identity = Identity::new(username, email, role);
        identity.id = Some(self.next_id.fetch_add(1, Ordering::SeqCst));
        identity
    }

    async fn round_trip(&self) -> Result<(), RemoteError> {
        let latency = *lock(&self.latency);
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }
        if self.unreachable.load(Ordering::SeqCst) {
            return Err(RemoteError::Transport("connection refused".to_string()));
        }
        Ok(())
    }
}

impl Default for MockAuthApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuthApi for MockAuthApi {
    async fn check_auth(&self) -> Result<AuthStatus, RemoteError> {
        self.check_calls.fetch_add(1, Ordering::SeqCst);
        self.round_trip().await?;

        Ok(match lock(&self.current).clone() {
            Some(user) => AuthStatus::authenticated(user),
            None => AuthStatus::anonymous(),
        })
    }

    async fn login(&self, request: &LoginRequest) -> Result<Identity, RemoteError> {
        self.login_calls.fetch_add(1, Ordering::SeqCst);
        self.round_trip().await?;

        if request.username.is_empty() || request.password.is_empty() {
            return Err(RemoteError::Rejected(
                "Por favor proporciona usuario y contraseña".to_string(),
            ));
        }

        let identity = match lock(&self.accounts).get(&request.username) {
            Some((password, identity)) if *password == request.password => identity.clone(),
            _ => return Err(RemoteError::Rejected("Credenciales inválidas".to_string())),
        };

        *lock(&self.current) = Some(identity.clone());
        Ok(identity)
    }

    async fn register(&self, request: &RegisterRequest) -> Result<Identity, RemoteError> {
        self.register_calls.fetch_add(1, Ordering::SeqCst);
        self.round_trip().await?;

        let mut problems = Vec::new();
        {
            let accounts = lock(&self.accounts);
            if accounts.contains_key(&request.username) {
                problems.push("Este nombre de usuario ya está en uso".to_string());
            }
            if accounts
                .values()
                .any(|(_, identity)| identity.email == request.email)
            {
                problems.push("Este correo electrónico ya está registrado".to_string());
            }
        }
        if request.password.chars().count() < MIN_PASSWORD_LENGTH {
            problems.push(format!(
                "Asegúrese de que este campo tenga al menos {MIN_PASSWORD_LENGTH} caracteres."
            ));
        }
        if request.password != request.password_confirm {
            problems.push("Las contraseñas no coinciden".to_string());
        }
        if !problems.is_empty() {
            return Err(RemoteError::Rejected(problems.join(", ")));
        }

        let identity = self.make_identity(&request.username, &request.email, request.role);
        lock(&self.accounts).insert(
            request.username.clone(),
            (request.password.clone(), identity.clone()),
        );
        *lock(&self.current) = Some(identity.clone());
        Ok(identity)
    }

    async fn logout(&self) -> Result<(), RemoteError> {
        self.logout_calls.fetch_add(1, Ordering::SeqCst);
        self.round_trip().await?;

        if self.logout_fails.load(Ordering::SeqCst) {
            return Err(RemoteError::Rejected("logout failed".to_string()));
        }

        *lock(&self.current) = None;
        Ok(())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn login_checks_password() {
        let api = MockAuthApi::new().with_account("luna", "secreta1", Role::Adopter);

        let err = api
            .login(&LoginRequest::new("luna", "incorrecta"))
            .await
            .unwrap_err();
        assert_eq!(err, RemoteError::Rejected("Credenciales inválidas".into()));

        let identity = api.login(&LoginRequest::new("luna", "secreta1")).await.unwrap();
        assert_eq!(identity.username, "luna");
        assert!(api.check_auth().await.unwrap().is_authenticated);
    }

    #[tokio::test]
    async fn register_reports_every_problem() {
        let api = MockAuthApi::new().with_account("luna", "secreta1", Role::Adopter);
        let request = RegisterRequest {
            username: "luna".into(),
            email: "luna@example.com".into(),
            password: "abc".into(),
            password_confirm: "abd".into(),
            role: Role::Adopter,
        };

        let RemoteError::Rejected(message) = api.register(&request).await.unwrap_err() else {
            panic!("expected a rejection");
        };
        assert!(message.contains("nombre de usuario"));
        assert!(message.contains("correo"));
        assert!(message.contains("no coinciden"));
    }
}
