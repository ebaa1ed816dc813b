//! Product shortcuts - static "jump to page" targets

use anyhow::Result;
use once_cell::sync::Lazy;
use serde_json::json;

use crate::core::model::Product;
use crate::core::render::{RenderConfig, Renderer};

static PRODUCTS: Lazy<Vec<Product>> = Lazy::new(|| {
    vec![
        product("Linodes", "/linodes"),
        product("Volumes", "/volumes"),
    ]
});

fn product(name: &str, path: &str) -> Product {
    Product {
        entity_type: name.to_string(),
        label: name.to_string(),
        value: path.to_string(),
        data: Some(json!({ "path": path, "searchString": "" })),
    }
}

/// The full product list
pub fn products() -> &'static [Product] {
    &PRODUCTS
}

/// Products whose label equals `query`, ignoring case.
///
/// Unlike entity matching this is exact: `linodes` jumps to Linodes, `lino` does not.
pub fn match_products(query: &str) -> Vec<Product> {
    let query = query.to_lowercase();
    PRODUCTS
        .iter()
        .filter(|p| p.label.to_lowercase() == query)
        .cloned()
        .collect()
}

/// Run the products command
pub fn run_products(render_config: RenderConfig) -> Result<()> {
    let renderer = Renderer::with_config(render_config);
    println!("{}", renderer.render_products(products()));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match_case_insensitive() {
        assert_eq!(match_products("Linodes").len(), 1);
        assert_eq!(match_products("linodes")[0].value, "/linodes");
        assert_eq!(match_products("VOLUMES")[0].label, "Volumes");
    }

    #[test]
    fn test_prefix_does_not_match() {
        assert!(match_products("Linode").is_empty());
        assert!(match_products("lino").is_empty());
    }

    #[test]
    fn test_product_data() {
        let p = &products()[0];
        let data = p.data.as_ref().unwrap();
        assert_eq!(data["path"], "/linodes");
        assert_eq!(data["searchString"], "");
    }
}
