//! Query matcher - substring matching over searchable items

use crate::core::model::{SearchField, SearchableItem};
use crate::core::util::contains_folded;
use crate::search::query::Query;

/// Does `item` match `query` on any of `fields`?
///
/// `label` is always eligible, even when absent from `fields`. A qualified
/// query only looks at its own field, and only when that field is eligible.
/// Either way the item matches if its label contains the whole query text.
pub fn item_matches(item: &SearchableItem, query: &Query, fields: &[SearchField]) -> bool {
    if query.is_blank() {
        return false;
    }

    if let Some(field) = query.field {
        let eligible = field == SearchField::Label || fields.contains(&field);
        return contains_folded(&item.label, &query.raw)
            || (eligible
                && item
                    .field_values(field)
                    .iter()
                    .any(|value| contains_folded(value, &query.term)));
    }

    std::iter::once(SearchField::Label)
        .chain(fields.iter().copied().filter(|f| *f != SearchField::Label))
        .any(|field| {
            item.field_values(field)
                .iter()
                .any(|value| contains_folded(value, &query.term))
        })
}

/// Filter `entities` down to those matching `query`, preserving input order
pub fn refined_search(
    query: &Query,
    entities: &[SearchableItem],
    fields: &[SearchField],
) -> Vec<SearchableItem> {
    entities
        .iter()
        .filter(|item| item_matches(item, query, fields))
        .cloned()
        .collect()
}
