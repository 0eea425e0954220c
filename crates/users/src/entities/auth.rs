use serde::{Deserialize, Serialize};

use super::user::{Identity, Role};
use crate::types::ValidationError;
use crate::utils::validation;

/// Credentials submitted by the login form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl LoginRequest {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Form-level check run before the request is handed to the session store
    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::require_non_empty("username", &self.username)?;
        validation::require_non_empty("password", &self.password)?;
        Ok(())
    }
}

/// Account creation payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub password_confirm: String,
    #[serde(rename = "rol", alias = "role")]
    pub role: Role,
}

impl RegisterRequest {
    /// Validate the registration form the way the service will
    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::validate_username(&self.username)?;
        validation::validate_email(&self.email)?;
        validation::validate_password(&self.password)?;
        if self.password != self.password_confirm {
            return Err(ValidationError::PasswordMismatch);
        }
        Ok(())
    }
}

/// Response of the identity check endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthStatus {
    #[serde(rename = "isAuthenticated", default)]
    pub is_authenticated: bool,
    #[serde(default)]
    pub user: Option<Identity>,
}

impl AuthStatus {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(user: Identity) -> Self {
        Self {
            is_authenticated: true,
            user: Some(user),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_registration() -> RegisterRequest {
        RegisterRequest {
            username: "luna".into(),
            email: "luna@example.com".into(),
            password: "secreta1".into(),
            password_confirm: "secreta1".into(),
            role: Role::Publisher,
        }
    }

    #[test]
    fn register_request_serializes_role_as_rol() {
        let json = serde_json::to_value(valid_registration()).unwrap();
        assert_eq!(json["rol"], "publicador");
        assert_eq!(json["password_confirm"], "secreta1");
        assert!(json.get("role").is_none());
    }

    #[test]
    fn register_request_rejects_mismatched_passwords() {
        let mut request = valid_registration();
        request.password_confirm = "otra-cosa".into();
        assert_eq!(request.validate(), Err(ValidationError::PasswordMismatch));
    }

    #[test]
    fn register_request_accepts_valid_form() {
        assert!(valid_registration().validate().is_ok());
    }

    #[test]
    fn login_request_requires_both_fields() {
        assert!(LoginRequest::new("", "x").validate().is_err());
        assert!(LoginRequest::new("luna", "").validate().is_err());
        assert!(LoginRequest::new("luna", "x").validate().is_ok());
    }

    #[test]
    fn auth_status_reads_camel_case_flag() {
        let status: AuthStatus =
            serde_json::from_str(r#"{"isAuthenticated": false, "user": null}"#).unwrap();
        assert_eq!(status, AuthStatus::anonymous());
    }
}
