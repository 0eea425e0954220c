//! Plain-text rendering of the pages.

use adopta_pets::{CatalogView, Pet};
use adopta_router::{NavAction, NavLink};
use adopta_users::{Profile, Session};

pub fn print_session(session: &Session) {
    match (&session.user, session.is_authenticated) {
        (Some(user), true) => {
            println!("Signed in as {} <{}> ({})", user.username, user.email, user.role.label());
            if !session.adopted_pets.is_empty() {
                let ids: Vec<String> = session.adopted_pets.iter().map(i64::to_string).collect();
                println!("Adopted pets: {}", ids.join(", "));
            }
        }
        _ if session.is_loading => println!("Checking session..."),
        _ => println!("Not signed in"),
    }
}

pub fn print_nav(links: &[NavLink]) {
    let rendered: Vec<String> = links
        .iter()
        .map(|link| match link.action {
            NavAction::Go(route) => format!("{} ({route})", link.label),
            NavAction::Logout => format!("{} (/logout)", link.label),
        })
        .collect();
    println!("[ {} ]", rendered.join(" | "));
}

pub fn print_card(pet: &Pet) {
    println!(
        "  #{:<4} {:<20} {:<12} {:<18} {}",
        pet.id,
        pet.name,
        pet.species_name.as_deref().unwrap_or("-"),
        pet.age_label(),
        pet.location_label().unwrap_or_default()
    );
}

pub fn print_catalog(view: &CatalogView<'_, Pet>) {
    match view {
        CatalogView::Loading => println!("Cargando mascotas..."),
        CatalogView::Error(message) => println!("Error: {message}"),
        CatalogView::Empty => println!("No hay mascotas disponibles por ahora."),
        CatalogView::NoMatches { term } => {
            println!("No encontramos mascotas para \"{term}\".")
        }
        CatalogView::Items {
            shown,
            total_matches,
            can_show_all,
            ..
        } => {
            for pet in shown {
                print_card(pet);
            }
            if shown.len() < *total_matches || *can_show_all {
                println!("  ... Ver todos: /wall all");
            }
        }
    }
}

pub fn print_detail(pet: &Pet, adopted: bool) {
    println!("{} (#{})", pet.name, pet.id);
    println!("  Especie:    {}", pet.species_name.as_deref().unwrap_or("-"));
    println!("  Sexo:       {}", pet.sex);
    println!("  Edad:       {}", pet.age_label());
    println!("  Vacunado:   {}", if pet.vaccinated { "Sí" } else { "No" });
    if let Some(location) = pet.location_label() {
        println!("  Ubicación:  {location}");
    }
    if let Some(date) = pet.reported_on {
        println!("  Publicado:  {date}");
    }
    if let Some(publisher) = &pet.publisher_username {
        println!("  Publicador: {publisher}");
    }
    println!("  {}", pet.description);
    if adopted {
        println!("  Ya ha sido adoptada");
    } else {
        println!("  ¡Quiero Adoptar! /adopt {}", pet.id);
    }
}

pub fn print_admin_table(pets: &[Pet]) {
    println!("{:<5} {:<20} {:<12} {:<15}", "ID", "Nombre", "Especie", "Publicador");
    println!("{}", "-".repeat(55));
    for pet in pets {
        println!(
            "{:<5} {:<20} {:<12} {:<15}",
            pet.id,
            pet.name,
            pet.species_name.as_deref().unwrap_or("-"),
            pet.publisher_username.as_deref().unwrap_or("-")
        );
    }
}

pub fn print_profile(profile: &Profile) {
    println!("{} <{}>", profile.username, profile.email);
    if let Some(bio) = profile.bio.as_deref().filter(|bio| !bio.is_empty()) {
        println!("  {bio}");
    }
    if let Some(avatar) = &profile.avatar {
        println!("  avatar: {avatar}");
    }
}
