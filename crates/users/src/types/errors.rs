//! Error types for the account layer.

use thiserror::Error;

/// Failure reported by the remote adoption service boundary
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RemoteError {
    /// Service unreachable or answered with something that is not JSON
    #[error("transport failure: {0}")]
    Transport(String),

    /// Service answered with a structured error; the message is already flattened
    #[error("{0}")]
    Rejected(String),
}

/// Failure of a session operation, returned as a value to the caller
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Error de conexión con el servidor")]
    Transport(String),

    #[error("{0}")]
    Rejected(String),

    #[error("Ya hay una solicitud de inicio de sesión en curso")]
    Busy,
}

impl SessionError {
    /// Message suitable for an inline form error
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl From<RemoteError> for SessionError {
    fn from(err: RemoteError) -> Self {
        match err {
            RemoteError::Transport(detail) => SessionError::Transport(detail),
            RemoteError::Rejected(message) => SessionError::Rejected(message),
        }
    }
}

/// Form validation errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Password must be at least {0} characters long")]
    PasswordTooShort(usize),

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Username can only contain letters, numbers, and @/./+/-/_ characters")]
    InvalidUsername,

    #[error("Unknown role: {0}")]
    InvalidRole(String),
}

pub type SessionResult<T> = Result<T, SessionError>;
