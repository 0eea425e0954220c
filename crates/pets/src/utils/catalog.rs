//! View-model for the adoption wall.

use crate::entities::Categorized;
use crate::types::PetError;
use crate::utils::filter::filter_by_category;

/// What the wall shows for a given load result and search term.
#[derive(Debug, PartialEq)]
pub enum CatalogView<'a, T> {
    Loading,
    Error(String),
    /// The service has no pets at all
    Empty,
    /// Pets exist but none match the current term
    NoMatches { term: String },
    Items {
        shown: Vec<&'a T>,
        total_matches: usize,
        total_loaded: usize,
        /// Offer the "Ver todos" button
        can_show_all: bool,
    },
}

impl<'a, T: Categorized> CatalogView<'a, T> {
    pub fn build(
        load: &'a Result<Vec<T>, PetError>,
        term: &str,
        show_all: bool,
        preview_limit: usize,
    ) -> Self {
        let items = match load {
            Ok(items) => items,
            Err(err) => return CatalogView::Error(err.message()),
        };

        if items.is_empty() {
            return CatalogView::Empty;
        }

        let matches = filter_by_category(items, term);
        if matches.is_empty() {
            return CatalogView::NoMatches {
                term: term.to_string(),
            };
        }

        let total_matches = matches.len();
        let shown = if show_all {
            matches
        } else {
            matches.into_iter().take(preview_limit).collect()
        };

        CatalogView::Items {
            shown,
            total_matches,
            total_loaded: items.len(),
            can_show_all: !show_all && items.len() > preview_limit,
        }
    }

    /// Items to render, empty for every other state
    pub fn shown(&self) -> &[&'a T] {
        match self {
            CatalogView::Items { shown, .. } => shown,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Card(&'static str);

    impl Categorized for Card {
        fn category(&self) -> Option<&str> {
            Some(self.0)
        }
    }

    #[test]
    fn error_message_is_passed_through() {
        let load: Result<Vec<Card>, PetError> = Err(PetError::Rejected("Error en la petición".into()));
        assert_eq!(
            CatalogView::build(&load, "", false, 3),
            CatalogView::Error("Error en la petición".into())
        );
    }

    #[test]
    fn loading_state_has_nothing_to_show() {
        let view: CatalogView<'_, Card> = CatalogView::Loading;
        assert!(view.shown().is_empty());
    }
}
