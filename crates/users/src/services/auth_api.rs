//! Contract of the remote authentication service.

use async_trait::async_trait;

use crate::entities::{AuthStatus, Identity, LoginRequest, RegisterRequest};
use crate::types::RemoteError;

/// Authentication endpoints of the adoption service.
///
/// Implementations convert transport and payload problems into
/// [`RemoteError`]; they never panic on a bad response.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Ask who owns the ambient session credential
    async fn check_auth(&self) -> Result<AuthStatus, RemoteError>;

    async fn login(&self, request: &LoginRequest) -> Result<Identity, RemoteError>;

    async fn register(&self, request: &RegisterRequest) -> Result<Identity, RemoteError>;

    async fn logout(&self) -> Result<(), RemoteError>;
}
