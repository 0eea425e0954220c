use thiserror::Error;

pub type RouteResult<T> = Result<T, RouteError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RouteError {
    #[error("no view at {0}")]
    Unknown(String),

    #[error("invalid pet id: {0}")]
    InvalidPetId(String),
}
