//! Wall behaviour: category filter and preview view-model over real pet records.

use adopta_pets::{filter_by_category, CatalogView, Pet, PetError, Sex};

fn pet(id: i64, species: Option<&str>) -> Pet {
    Pet {
        id,
        name: format!("mascota-{id}"),
        description: "Busca hogar".to_string(),
        age_months: 10,
        formatted_age: None,
        vaccinated: false,
        reported_on: None,
        image: None,
        species_id: 1,
        species_name: species.map(str::to_string),
        sex: Sex::Hembra,
        location_id: 1,
        location_state: Some("Jalisco".to_string()),
        location_abbreviation: Some("JAL".to_string()),
        publisher_id: Some(1),
        publisher_username: Some("refugio".to_string()),
    }
}

fn sample() -> Vec<Pet> {
    vec![
        pet(1, Some("Perro")),
        pet(2, Some("Gato")),
        pet(3, Some("perro grande")),
    ]
}

#[test]
fn empty_term_returns_every_item_in_order() {
    let pets = sample();

    let filtered = filter_by_category(&pets, "");

    assert_eq!(filtered.len(), pets.len());
    for (kept, original) in filtered.iter().zip(pets.iter()) {
        assert!(std::ptr::eq(*kept, original));
    }
}

#[test]
fn matching_ignores_case() {
    let pets = sample();

    let filtered = filter_by_category(&pets, "PERRO");

    let ids: Vec<_> = filtered.iter().map(|pet| pet.id).collect();
    assert_eq!(ids, vec![1, 3]);
}

#[test]
fn unknown_category_yields_nothing() {
    let pets = sample();
    assert!(filter_by_category(&pets, "hamster").is_empty());
}

#[test]
fn pets_without_species_are_hidden_by_any_term() {
    let pets = vec![pet(1, None), pet(2, Some("Gato"))];
    let ids: Vec<_> = filter_by_category(&pets, "g").iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![2]);
}

#[test]
fn filtering_leaves_input_untouched() {
    let pets = sample();
    let before = pets.clone();
    let _ = filter_by_category(&pets, "gato");
    assert_eq!(pets, before);
}

#[test]
fn wall_previews_first_matches_and_offers_see_all() {
    let load: Result<Vec<Pet>, PetError> = Ok((1..=5).map(|id| pet(id, Some("Perro"))).collect());

    let view = CatalogView::build(&load, "", false, 3);

    match view {
        CatalogView::Items {
            shown,
            total_matches,
            total_loaded,
            can_show_all,
        } => {
            assert_eq!(shown.iter().map(|p| p.id).collect::<Vec<_>>(), vec![1, 2, 3]);
            assert_eq!(total_matches, 5);
            assert_eq!(total_loaded, 5);
            assert!(can_show_all);
        }
        other => panic!("unexpected view: {other:?}"),
    }
}

#[test]
fn see_all_shows_every_match_and_hides_button() {
    let load: Result<Vec<Pet>, PetError> = Ok((1..=5).map(|id| pet(id, Some("Gato"))).collect());

    let view = CatalogView::build(&load, "gato", true, 3);

    assert_eq!(view.shown().len(), 5);
    assert!(matches!(view, CatalogView::Items { can_show_all: false, .. }));
}

#[test]
fn few_pets_need_no_see_all_button() {
    let load: Result<Vec<Pet>, PetError> = Ok(sample());

    let view = CatalogView::build(&load, "", false, 3);

    assert!(matches!(
        view,
        CatalogView::Items {
            total_loaded: 3,
            can_show_all: false,
            ..
        }
    ));
}

#[test]
fn empty_catalogue_and_no_matches_are_distinct() {
    let nothing: Result<Vec<Pet>, PetError> = Ok(Vec::new());
    assert_eq!(CatalogView::build(&nothing, "perro", false, 3), CatalogView::Empty);

    let some: Result<Vec<Pet>, PetError> = Ok(sample());
    assert_eq!(
        CatalogView::build(&some, "hamster", false, 3),
        CatalogView::NoMatches {
            term: "hamster".to_string()
        }
    );
}

#[test]
fn transport_failure_becomes_error_state() {
    let load: Result<Vec<Pet>, PetError> = Err(PetError::Transport("timeout".to_string()));
    assert_eq!(
        CatalogView::build(&load, "", false, 3),
        CatalogView::Error("Error de conexión con el servidor".to_string())
    );
}
