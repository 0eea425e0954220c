use crate::entities::Categorized;

/// Items whose category contains `term`, ignoring case, in input order.
///
/// An empty term keeps everything. Items without a category never match a
/// non-empty term.
pub fn filter_by_category<'a, T: Categorized>(items: &'a [T], term: &str) -> Vec<&'a T> {
    if term.is_empty() {
        return items.iter().collect();
    }

    let needle = term.to_lowercase();
    items
        .iter()
        .filter(|item| {
            item.category()
                .is_some_and(|category| category.to_lowercase().contains(&needle))
        })
        .collect()
}
