//! Search module - Query matching over normalized entities
//!
//! Provides:
//! - query: Query parsing (plain text or `field:term`)
//! - matcher: Case-insensitive substring matching
//! - partition: Grouping of hits by entity kind
//! - products: Static product shortcuts matched by exact label

pub mod matcher;
pub mod partition;
pub mod products;
pub mod query;

use anyhow::Result;
use std::path::Path;
use std::time::Instant;

use crate::core::model::{EntityType, SearchField, SearchResults, SearchableItem};
use crate::core::render::{RenderConfig, Renderer};
use crate::entities::api::load_entities;

use self::matcher::refined_search;
use self::partition::{empty_results, separate_results_by_entity};
use self::products::match_products;
use self::query::parse_query;

/// Options for a single search call
#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Fields eligible for matching (label is always eligible)
    pub fields: Vec<SearchField>,

    /// Maximum number of combined results
    pub limit: Option<usize>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            fields: SearchField::ALL.to_vec(),
            limit: None,
        }
    }
}

/// Search `entities` for `input`.
///
/// A blank query returns empty results without scanning and without products.
pub fn search(entities: &[SearchableItem], input: &str, options: &SearchOptions) -> SearchResults {
    let query = parse_query(input);
    if query.is_blank() {
        return SearchResults {
            combined_results: Vec::new(),
            products: None,
            search_results_by_entity: empty_results(),
        };
    }

    let mut combined_results = refined_search(&query, entities, &options.fields);
    if let Some(limit) = options.limit {
        combined_results.truncate(limit);
    }

    let search_results_by_entity = separate_results_by_entity(&combined_results);

    SearchResults {
        products: Some(match_products(input)),
        combined_results,
        search_results_by_entity,
    }
}

/// Run the search command
pub fn run_search(
    inventory_path: &Path,
    query: &str,
    options: &SearchOptions,
    entity: Option<EntityType>,
    render_config: RenderConfig,
) -> Result<()> {
    let entities = load_entities(inventory_path)?;

    let started = Instant::now();
    let mut results = search(&entities, query, options);
    tracing::debug!(
        query,
        scanned = entities.len(),
        hits = results.combined_results.len(),
        elapsed_us = started.elapsed().as_micros() as u64,
        "search finished"
    );

    // View filter only; applied after partitioning
    if let Some(entity_type) = entity {
        results.combined_results.retain(|i| i.entity_type == entity_type);
        results.search_results_by_entity.retain_only(entity_type);
    }

    let renderer = Renderer::with_config(render_config);
    println!("{}", renderer.render_results(&results));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<SearchableItem> {
        vec![
            SearchableItem::new(EntityType::Linode, "web-1", 1u64),
            SearchableItem::new(EntityType::Bucket, "db-bucket", "us-east-1/db-bucket".to_string()),
        ]
    }

    fn assert_partition_matches(results: &SearchResults) {
        let by_entity = &results.search_results_by_entity;
        assert_eq!(by_entity.len(), results.combined_results.len());
        for item in &results.combined_results {
            assert!(by_entity.bucket(item.entity_type).contains(item));
        }
    }

    #[test]
    fn test_empty_query_returns_empty_results() {
        for q in ["", "   ", "\t\n"] {
            let results = search(&sample(), q, &SearchOptions::default());
            assert!(results.combined_results.is_empty());
            assert!(results.search_results_by_entity.is_empty());
            assert!(results.products.is_none());
        }
    }

    #[test]
    fn test_web_query_example() {
        let results = search(&sample(), "web", &SearchOptions::default());
        assert_eq!(results.combined_results.len(), 1);
        assert_eq!(results.combined_results[0].label, "web-1");
        assert_eq!(results.search_results_by_entity.linodes.len(), 1);
        assert!(results.search_results_by_entity.buckets.is_empty());
        assert!(results.search_results_by_entity.volumes.is_empty());
        assert_eq!(results.products, Some(Vec::new()));
        assert_partition_matches(&results);
    }

    #[test]
    fn test_label_containment_always_included() {
        let items = sample();
        for item in &items {
            let results = search(&items, &item.label.to_uppercase(), &SearchOptions::default());
            assert!(results.combined_results.contains(item));
            assert_partition_matches(&results);
        }
    }

    #[test]
    fn test_products_exact_label() {
        let results = search(&sample(), "Linodes", &SearchOptions::default());
        assert_eq!(results.products.as_ref().unwrap().len(), 1);

        let results = search(&sample(), "Linode", &SearchOptions::default());
        assert!(results.products.as_ref().unwrap().is_empty());
    }

    #[test]
    fn test_products_compare_untrimmed_query() {
        let results = search(&sample(), " linodes ", &SearchOptions::default());
        assert_eq!(results.products, Some(Vec::new()));
    }

    #[test]
    fn test_limit_keeps_partition_consistent() {
        let items: Vec<_> = (0..10u64)
            .map(|i| {
                let t = if i % 2 == 0 { EntityType::Linode } else { EntityType::Volume };
                SearchableItem::new(t, format!("web-{}", i), i)
            })
            .collect();
        let options = SearchOptions {
            limit: Some(3),
            ..Default::default()
        };
        let results = search(&items, "web", &options);
        assert_eq!(results.combined_results.len(), 3);
        assert_partition_matches(&results);
    }
}
