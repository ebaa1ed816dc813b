//! Partition search hits by entity kind

use crate::core::model::{SearchResultsByEntity, SearchableItem};

/// All seven groups, empty
pub fn empty_results() -> SearchResultsByEntity {
    SearchResultsByEntity::default()
}

/// Split items into their entity groups, keeping relative order
pub fn separate_results_by_entity(items: &[SearchableItem]) -> SearchResultsByEntity {
    let mut by_entity = empty_results();
    for item in items {
        by_entity.bucket_mut(item.entity_type).push(item.clone());
    }
    by_entity
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::EntityType;

    #[test]
    fn test_empty_results() {
        let empty = empty_results();
        assert!(empty.is_empty());
        assert_eq!(empty.groups().count(), 0);
    }

    #[test]
    fn test_partition_is_complete() {
        let items: Vec<_> = EntityType::ALL
            .iter()
            .enumerate()
            .map(|(i, t)| SearchableItem::new(*t, format!("item-{}", i), i as u64))
            .collect();
        let by_entity = separate_results_by_entity(&items);
        assert_eq!(by_entity.len(), items.len());
        for t in EntityType::ALL {
            assert_eq!(by_entity.bucket(t).len(), 1);
            assert_eq!(by_entity.bucket(t)[0].entity_type, t);
        }
    }

    #[test]
    fn test_partition_keeps_order() {
        let items = vec![
            SearchableItem::new(EntityType::Linode, "b", 2u64),
            SearchableItem::new(EntityType::Volume, "v", 3u64),
            SearchableItem::new(EntityType::Linode, "a", 1u64),
        ];
        let by_entity = separate_results_by_entity(&items);
        let labels: Vec<_> = by_entity.linodes.iter().map(|i| i.label.as_str()).collect();
        assert_eq!(labels, vec!["b", "a"]);
        assert_eq!(by_entity.volumes.len(), 1);
    }
}
