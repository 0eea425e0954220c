use adopta_users::{RemoteError, ValidationError};
use serde_json::Value;
use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

/// Message used when a failed response carries nothing readable.
pub const FALLBACK_MESSAGE: &str = "Error en la petición";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid service url: {0}")]
    InvalidUrl(String),

    #[error("transport failure: {0}")]
    Transport(String),

    /// The service answered with a non-2xx status
    #[error("{message}")]
    Rejected { status: u16, message: String },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Transport(err.to_string())
    }
}

impl From<ApiError> for RemoteError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Rejected { message, .. } => RemoteError::Rejected(message),
            ApiError::Validation(invalid) => RemoteError::Rejected(invalid.to_string()),
            other => RemoteError::Transport(other.to_string()),
        }
    }
}

/// Turn an error payload into one line of text.
///
/// A non-empty `{"error": "..."}` gives its string; any other object
/// (typically a field → messages map) has all its values joined with `", "`.
pub fn flatten_error(body: Option<&Value>) -> String {
    if let Some(Value::Object(map)) = body {
        if let Some(Value::String(message)) = map.get("error") {
            if !message.trim().is_empty() {
                return message.clone();
            }
        }
    }

    let mut parts = Vec::new();
    if let Some(body) = body {
        collect_messages(body, &mut parts);
    }

    if parts.is_empty() {
        FALLBACK_MESSAGE.to_string()
    } else {
        parts.join(", ")
    }
}

fn collect_messages(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::Null => {}
        Value::String(text) => {
            if !text.trim().is_empty() {
                out.push(text.clone());
            }
        }
        Value::Array(items) => items.iter().for_each(|item| collect_messages(item, out)),
        Value::Object(map) => map.values().for_each(|item| collect_messages(item, out)),
        other => out.push(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn error_key_wins() {
        let body = json!({"error": "Credenciales inválidas", "detail": "ignored"});
        assert_eq!(flatten_error(Some(&body)), "Credenciales inválidas");
    }

    #[test]
    fn detail_is_joined_with_the_other_values() {
        let body = json!({"detail": "No encontrado."});
        assert_eq!(flatten_error(Some(&body)), "No encontrado.");

        let body = json!({"detail": "x", "code": "y"});
        let message = flatten_error(Some(&body));
        assert!(message == "x, y" || message == "y, x", "got {message}");
    }

    #[test]
    fn field_errors_are_joined() {
        let body = json!({
            "username": ["Este nombre de usuario ya está en uso"],
            "password": ["Las contraseñas no coinciden"]
        });
        let message = flatten_error(Some(&body));
        assert!(message.contains("Este nombre de usuario ya está en uso"));
        assert!(message.contains("Las contraseñas no coinciden"));
        assert!(message.contains(", "));
    }

    #[test]
    fn empty_payload_falls_back() {
        assert_eq!(flatten_error(None), FALLBACK_MESSAGE);
        assert_eq!(flatten_error(Some(&json!({}))), FALLBACK_MESSAGE);
        assert_eq!(flatten_error(Some(&json!({"error": ""}))), FALLBACK_MESSAGE);
        assert_eq!(FALLBACK_MESSAGE, "Error en la petición");
    }

    #[test]
    fn rejection_keeps_message_for_the_session_layer() {
        let err = ApiError::Rejected {
            status: 400,
            message: "Credenciales inválidas".into(),
        };
        assert_eq!(
            RemoteError::from(err),
            RemoteError::Rejected("Credenciales inválidas".into())
        );
        assert!(matches!(
            RemoteError::from(ApiError::Transport("refused".into())),
            RemoteError::Transport(_)
        ));
    }
}
