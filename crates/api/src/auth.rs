//! `AuthApi` over the `auth/` endpoints.

use adopta_users::{AuthApi, AuthStatus, Identity, LoginRequest, RegisterRequest, RemoteError};
use async_trait::async_trait;
use reqwest::Method;
use serde::Deserialize;
use tracing::debug;

use crate::client::{ApiClient, Body};
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
struct UserEnvelope {
    user: Identity,
}

#[async_trait]
impl AuthApi for ApiClient {
    async fn check_auth(&self) -> Result<AuthStatus, RemoteError> {
        match self.get_json::<AuthStatus>("auth/check/").await {
            Ok(status) => Ok(status),
            Err(ApiError::Rejected { status, .. }) => {
                debug!(status, "identity check refused, treating as anonymous");
                Ok(AuthStatus::anonymous())
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn login(&self, request: &LoginRequest) -> Result<Identity, RemoteError> {
        let envelope: UserEnvelope = self.post_json("auth/login/", request).await?;
        Ok(envelope.user)
    }

    async fn register(&self, request: &RegisterRequest) -> Result<Identity, RemoteError> {
        let envelope: UserEnvelope = self.post_json("auth/register/", request).await?;
        Ok(envelope.user)
    }

    async fn logout(&self) -> Result<(), RemoteError> {
        self.send(Method::POST, "auth/logout/", Body::Empty).await?;
        Ok(())
    }
}
