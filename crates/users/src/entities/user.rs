use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::types::ValidationError;

/// Identifier the adoption service assigns to a pet record.
pub type PetId = i64;

/// The authenticated user's public record, as returned by the service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Identity {
    /// Service primary key, absent in some payloads
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Unique login name
    pub username: String,
    /// Contact email
    #[serde(default)]
    pub email: String,
    /// Role chosen at registration
    #[serde(rename = "rol", alias = "role", default)]
    pub role: Role,
}

impl Identity {
    pub fn new(username: impl Into<String>, email: impl Into<String>, role: Role) -> Self {
        Self {
            id: None,
            username: username.into(),
            email: email.into(),
            role,
        }
    }

    /// Check if the user may mark pets for adoption
    pub fn can_adopt(&self) -> bool {
        matches!(self.role, Role::Adopter)
    }

    /// Check if the user may publish pets
    pub fn can_publish(&self) -> bool {
        matches!(self.role, Role::Publisher)
    }

    /// Check if user is an admin
    pub fn is_admin(&self) -> bool {
        matches!(self.role, Role::Admin)
    }
}

/// Closed set of account roles.
///
/// The service speaks Spanish on the wire (`adoptante`, `publicador`,
/// `admin`); the English names are accepted on input as well.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Role {
    #[default]
    #[serde(rename = "adoptante", alias = "adopter")]
    Adopter,
    #[serde(rename = "publicador", alias = "publisher")]
    Publisher,
    #[serde(rename = "admin", alias = "administrador")]
    Admin,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Adopter, Role::Publisher, Role::Admin];

    /// Value sent to the service
    pub fn as_wire(&self) -> &'static str {
        match self {
            Role::Adopter => "adoptante",
            Role::Publisher => "publicador",
            Role::Admin => "admin",
        }
    }

    /// Human label shown next to the role picker
    pub fn label(&self) -> &'static str {
        match self {
            Role::Adopter => "Adoptante",
            Role::Publisher => "Publicador",
            Role::Admin => "Administrador",
        }
    }
}

impl FromStr for Role {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "adoptante" | "adopter" => Ok(Role::Adopter),
            "publicador" | "publisher" => Ok(Role::Publisher),
            "admin" | "administrador" => Ok(Role::Admin),
            other => Err(ValidationError::InvalidRole(other.to_string())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}

/// Current authentication state of the process.
///
/// `is_authenticated` implies `user` is set; `is_loading` is only true until
/// the boot-time identity check has finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user: Option<Identity>,
    pub is_authenticated: bool,
    pub is_loading: bool,
    /// Pets marked for adoption during this session, in insertion order
    pub adopted_pets: Vec<PetId>,
}

impl Session {
    /// State at process start, before the identity check resolves
    pub fn initial() -> Self {
        Self {
            user: None,
            is_authenticated: false,
            is_loading: true,
            adopted_pets: Vec::new(),
        }
    }

    pub(crate) fn signed_in(&self, identity: Identity) -> Self {
        Self {
            user: Some(identity),
            is_authenticated: true,
            is_loading: self.is_loading,
            adopted_pets: self.adopted_pets.clone(),
        }
    }

    pub(crate) fn signed_out(&self) -> Self {
        Self {
            user: None,
            is_authenticated: false,
            is_loading: self.is_loading,
            adopted_pets: Vec::new(),
        }
    }

    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(|user| user.role)
    }

    pub fn can_adopt(&self) -> bool {
        self.is_authenticated && self.user.as_ref().is_some_and(Identity::can_adopt)
    }

    pub fn can_publish(&self) -> bool {
        self.is_authenticated && self.user.as_ref().is_some_and(Identity::can_publish)
    }

    pub fn is_admin(&self) -> bool {
        self.is_authenticated && self.user.as_ref().is_some_and(Identity::is_admin)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::initial()
    }
}
