//! Navbar contents and actions.

use adopta_pets::SearchStore;
use adopta_users::{Role, Session, SessionStore};

use crate::guard::Navigation;
use crate::route::Route;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    Go(Route),
    Logout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavLink {
    pub label: &'static str,
    pub action: NavAction,
}

impl NavLink {
    const fn go(label: &'static str, route: Route) -> Self {
        Self {
            label,
            action: NavAction::Go(route),
        }
    }
}

/// Links for the current session, in display order.
pub fn nav_links(session: &Session) -> Vec<NavLink> {
    let role = match (&session.user, session.is_authenticated) {
        (Some(user), true) => user.role,
        _ => {
            return vec![
                NavLink::go("Muro", Route::Wall),
                NavLink::go("Registrarse", Route::Register),
                NavLink::go("Iniciar sesión", Route::Login),
            ]
        }
    };

    let mut links = vec![NavLink::go("Adoptar", Route::Wall)];
    match role {
        Role::Publisher => {
            links.push(NavLink::go("Publicar", Route::Publish));
            links.push(NavLink::go("Mis mascotas", Route::MyPets));
        }
        Role::Admin => links.push(NavLink::go("Panel de administración", Route::AdminDashboard)),
        Role::Adopter => {}
    }
    links.push(NavLink::go("Editar perfil", Route::Profile));
    links.push(NavLink {
        label: "Cerrar sesión",
        action: NavAction::Logout,
    });
    links
}

/// Logo click: clear the search and go home.
pub fn on_logo_click(search: &SearchStore) -> Navigation {
    search.reset();
    Navigation::push(Route::Home)
}

/// Typing in the navbar search box jumps to the wall with the new term.
pub fn on_search_change(search: &SearchStore, term: impl Into<String>) -> Navigation {
    search.set_term(term);
    Navigation::push(Route::Wall)
}

pub async fn on_logout(session: &SessionStore) -> Navigation {
    session.logout().await;
    Navigation::push(Route::Home)
}
