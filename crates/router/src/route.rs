use std::fmt;
use std::str::FromStr;

use adopta_users::{PetId, Role};
use serde::{Deserialize, Serialize};

use crate::error::{RouteError, RouteResult};

/// Every view the client can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Route {
    Home,
    Login,
    Register,
    /// The adoption wall
    Wall,
    PetList,
    Publish,
    PetDetail(PetId),
    Profile,
    MyPets,
    AdminDashboard,
}

impl Route {
    pub fn parse(path: &str) -> RouteResult<Self> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_matches('/');

        let route = match trimmed {
            "" => Route::Home,
            "login" => Route::Login,
            "register" => Route::Register,
            "muro" => Route::Wall,
            "mascotas" => Route::PetList,
            "publicar" => Route::Publish,
            "perfil" => Route::Profile,
            "mis-mascotas" => Route::MyPets,
            "admin-dashboard" => Route::AdminDashboard,
            other => match other.strip_prefix("mascota/") {
                Some(id) if !id.contains('/') => {
                    let id = id
                        .parse::<PetId>()
                        .map_err(|_| RouteError::InvalidPetId(id.to_string()))?;
                    Route::PetDetail(id)
                }
                _ => return Err(RouteError::Unknown(path.to_string())),
            },
        };
        Ok(route)
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Login => "/login".to_string(),
            Route::Register => "/register".to_string(),
            Route::Wall => "/muro".to_string(),
            Route::PetList => "/mascotas".to_string(),
            Route::Publish => "/publicar".to_string(),
            Route::PetDetail(id) => format!("/mascota/{id}"),
            Route::Profile => "/perfil".to_string(),
            Route::MyPets => "/mis-mascotas".to_string(),
            Route::AdminDashboard => "/admin-dashboard".to_string(),
        }
    }

    /// The sign-in pages hide the navbar
    pub fn shows_navbar(&self) -> bool {
        !matches!(self, Route::Login | Route::Register)
    }

    pub fn requires_auth(&self) -> bool {
        matches!(
            self,
            Route::Publish | Route::Profile | Route::MyPets | Route::AdminDashboard
        )
    }

    pub fn required_role(&self) -> Option<Role> {
        match self {
            Route::Publish | Route::MyPets => Some(Role::Publisher),
            Route::AdminDashboard => Some(Role::Admin),
            _ => None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Home => "Inicio",
            Route::Login => "Iniciar sesión",
            Route::Register => "Registro",
            Route::Wall => "Muro de mascotas",
            Route::PetList => "Mascotas",
            Route::Publish => "Publicar mascota",
            Route::PetDetail(_) => "Detalle de mascota",
            Route::Profile => "Editar perfil",
            Route::MyPets => "Mis mascotas",
            Route::AdminDashboard => "Panel de administración",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

impl FromStr for Route {
    type Err = RouteError;

    fn from_str(path: &str) -> Result<Self, Self::Err> {
        Route::parse(path)
    }
}
