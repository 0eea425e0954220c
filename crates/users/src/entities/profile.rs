use serde::{Deserialize, Serialize};

use crate::types::ValidationError;
use crate::utils::validation::{validate_email, validate_password, validate_username};

/// Editable profile attached to an account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Profile {
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub bio: Option<String>,
    /// URL of the uploaded avatar
    #[serde(default)]
    pub avatar: Option<String>,
}

/// Image picked from disk for an upload field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl Upload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }
}

/// Profile edit form. Unset fields are left untouched by the service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub username: Option<String>,
    pub email: Option<String>,
    pub bio: Option<String>,
    pub password: Option<String>,
    pub avatar: Option<Upload>,
}

impl ProfileUpdate {
    /// Prefill the form from the current profile
    pub fn from_profile(profile: &Profile) -> Self {
        Self {
            username: Some(profile.username.clone()),
            email: Some(profile.email.clone()),
            bio: profile.bio.clone(),
            password: None,
            avatar: None,
        }
    }

    /// An empty password field means "keep the current one".
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(username) = &self.username {
            validate_username(username)?;
        }
        if let Some(email) = &self.email {
            validate_email(email)?;
        }
        if let Some(password) = self.password.as_deref().filter(|p| !p.is_empty()) {
            validate_password(password)?;
        }
        Ok(())
    }

    /// Text fields sent alongside the avatar, in form order
    pub fn text_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = Vec::new();
        if let Some(username) = &self.username {
            fields.push(("username", username.clone()));
        }
        if let Some(email) = &self.email {
            fields.push(("email", email.clone()));
        }
        if let Some(bio) = &self.bio {
            fields.push(("bio", bio.clone()));
        }
        if let Some(password) = self.password.as_ref().filter(|p| !p.is_empty()) {
            fields.push(("password", password.clone()));
        }
        fields
    }
}
