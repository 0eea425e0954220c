//! Error types for the pet catalogue.

use adopta_users::{PetId, RemoteError};
use thiserror::Error;

/// Result type alias for catalogue operations
pub type PetResult<T> = Result<T, PetError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PetError {
    #[error("Error de conexión con el servidor")]
    Transport(String),

    #[error("{0}")]
    Rejected(String),

    #[error("Mascota no encontrada: {id}")]
    NotFound { id: PetId },

    #[error("{reason}")]
    Forbidden { reason: String },

    #[error("{message}")]
    Validation { message: String },
}

impl PetError {
    pub fn not_found(id: PetId) -> Self {
        Self::NotFound { id }
    }

    pub fn forbidden(reason: impl Into<String>) -> Self {
        Self::Forbidden {
            reason: reason.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Text shown to the user
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl From<RemoteError> for PetError {
    fn from(err: RemoteError) -> Self {
        match err {
            RemoteError::Transport(detail) => Self::Transport(detail),
            RemoteError::Rejected(message) => Self::Rejected(message),
        }
    }
}
