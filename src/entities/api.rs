//! Entity API - normalize and stats commands

use anyhow::{Context, Result};
use std::path::Path;

use crate::core::model::{EntityCounts, SearchableItem};
use crate::core::render::{RenderConfig, Renderer};
use crate::entities::inventory::load_inventory;
use crate::entities::normalize::normalize_inventory;

/// Load and normalize the inventory at `path`
pub fn load_entities(path: &Path) -> Result<Vec<SearchableItem>> {
    let inventory = load_inventory(path)
        .with_context(|| format!("Failed to load inventory: {}", path.display()))?;
    Ok(normalize_inventory(&inventory))
}

/// Run the normalize command
pub fn run_normalize(inventory_path: &Path, render_config: RenderConfig) -> Result<()> {
    let items = load_entities(inventory_path)?;

    let renderer = Renderer::with_config(render_config);
    println!("{}", renderer.render_items(&items));

    Ok(())
}

/// Run the stats command
pub fn run_stats(inventory_path: &Path, render_config: RenderConfig) -> Result<()> {
    let items = load_entities(inventory_path)?;
    let counts = EntityCounts::from_items(&items);

    let renderer = Renderer::with_config(render_config);
    println!("{}", renderer.render_stats(&counts));

    Ok(())
}
