//! Renderer module
//!
//! Renders search results, item lists and stats to different output formats:
//! jsonl, json, md, raw, text

use colored::Colorize;
use serde::Serialize;
use std::io::Write;

use crate::core::model::{EntityCounts, EntityType, Product, SearchResults, SearchableItem};

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Jsonl,
    Json,
    Markdown,
    Raw,
    Text,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "jsonl" => Ok(OutputFormat::Jsonl),
            "json" => Ok(OutputFormat::Json),
            "md" | "markdown" => Ok(OutputFormat::Markdown),
            "raw" => Ok(OutputFormat::Raw),
            "text" => Ok(OutputFormat::Text),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

/// Render configuration combining format and options
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderConfig {
    pub format: OutputFormat,
    pub pretty: bool,
}

impl RenderConfig {
    /// Create a new render config with default options
    #[allow(dead_code)]
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            pretty: false,
        }
    }

    /// Create a new render config with pretty option
    pub fn with_pretty(format: OutputFormat, pretty: bool) -> Self {
        Self { format, pretty }
    }
}

/// One JSONL record
#[derive(Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
enum Line<'a> {
    Entity(&'a SearchableItem),
    Product(&'a Product),
}

/// Renderer for search output
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    #[allow(dead_code)]
    pub fn new(format: OutputFormat) -> Self {
        Self {
            config: RenderConfig::new(format),
        }
    }

    /// Create a new renderer with render config
    pub fn with_config(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Render a full search result
    pub fn render_results(&self, results: &SearchResults) -> String {
        let products = results.products.as_deref().unwrap_or(&[]);
        match self.config.format {
            OutputFormat::Jsonl => self.render_jsonl(&results.combined_results, products),
            OutputFormat::Json => self.to_json(results),
            OutputFormat::Markdown => {
                let groups: Groups<'_> = results
                    .search_results_by_entity
                    .groups()
                    .map(|(t, items)| (t, items.iter().collect()))
                    .collect();
                render_markdown(groups, products)
            }
            OutputFormat::Raw => render_raw(&results.combined_results, products),
            OutputFormat::Text => {
                let groups: Groups<'_> = results
                    .search_results_by_entity
                    .groups()
                    .map(|(t, items)| (t, items.iter().collect()))
                    .collect();
                render_text(groups, products)
            }
        }
    }

    /// Render a flat list of items (normalized inventory)
    pub fn render_items(&self, items: &[SearchableItem]) -> String {
        match self.config.format {
            OutputFormat::Jsonl => self.render_jsonl(items, &[]),
            OutputFormat::Json => self.to_json(items),
            OutputFormat::Markdown => render_markdown(group_items(items), &[]),
            OutputFormat::Raw => render_raw(items, &[]),
            OutputFormat::Text => render_text(group_items(items), &[]),
        }
    }

    /// Render the product list
    pub fn render_products(&self, products: &[Product]) -> String {
        match self.config.format {
            OutputFormat::Jsonl => self.render_jsonl(&[], products),
            OutputFormat::Json => self.to_json(products),
            OutputFormat::Markdown => render_markdown(Vec::new(), products),
            OutputFormat::Raw => render_raw(&[], products),
            OutputFormat::Text => render_text(Vec::new(), products),
        }
    }

    /// Render per-entity counts
    pub fn render_stats(&self, counts: &EntityCounts) -> String {
        match self.config.format {
            OutputFormat::Jsonl | OutputFormat::Json => self.to_json(counts),
            OutputFormat::Markdown => {
                let mut output = String::from("## Inventory\n\n| Entity | Count |\n|---|---|\n");
                for (t, count) in counts.iter() {
                    output.push_str(&format!("| {} | {} |\n", t.group_title(), count));
                }
                output.push_str(&format!("| **Total** | {} |\n", counts.total));
                output
            }
            OutputFormat::Raw | OutputFormat::Text => {
                let mut lines: Vec<String> = counts
                    .iter()
                    .map(|(t, count)| format!("{:<20} {}", t.group_title(), count))
                    .collect();
                lines.push(format!("{:<20} {}", "Total", counts.total));
                lines.join("\n")
            }
        }
    }

    /// Render search results to a writer
    #[allow(dead_code)]
    pub fn render_to<W: Write>(
        &self,
        results: &SearchResults,
        mut writer: W,
    ) -> std::io::Result<()> {
        let output = self.render_results(results);
        writer.write_all(output.as_bytes())
    }

    fn to_json<T: Serialize + ?Sized>(&self, value: &T) -> String {
        let rendered = if self.config.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        rendered.unwrap_or_else(|_| "null".to_string())
    }

    /// Render as JSON Lines: entities first, then products
    fn render_jsonl(&self, items: &[SearchableItem], products: &[Product]) -> String {
        items
            .iter()
            .map(Line::Entity)
            .chain(products.iter().map(Line::Product))
            .filter_map(|line| {
                if self.config.pretty {
                    serde_json::to_string_pretty(&line).ok()
                } else {
                    serde_json::to_string(&line).ok()
                }
            })
            .collect::<Vec<_>>()
            .join(if self.config.pretty { "\n\n" } else { "\n" })
    }
}

type Groups<'a> = Vec<(EntityType, Vec<&'a SearchableItem>)>;

fn group_items(items: &[SearchableItem]) -> Groups<'_> {
    EntityType::ALL
        .into_iter()
        .map(|t| (t, items.iter().filter(|i| i.entity_type == t).collect::<Vec<_>>()))
        .filter(|(_, group)| !group.is_empty())
        .collect()
}

fn render_markdown(groups: Groups<'_>, products: &[Product]) -> String {
    let mut output = String::new();

    for (entity_type, items) in groups {
        output.push_str(&format!("## {}\n\n", entity_type.group_title()));
        for item in items {
            output.push_str(&format!("- **{}** ({})", item.label, item.value));
            if let Some(description) = item.description() {
                output.push_str(&format!(" - {}", description));
            }
            output.push('\n');
        }
        output.push('\n');
    }

    if !products.is_empty() {
        output.push_str("## Products\n\n");
        for product in products {
            output.push_str(&format!("- **{}** -> `{}`\n", product.label, product.value));
        }
        output.push('\n');
    }

    output
}

/// Labels only, one per line
fn render_raw(items: &[SearchableItem], products: &[Product]) -> String {
    items
        .iter()
        .map(|i| i.label.as_str())
        .chain(products.iter().map(|p| p.label.as_str()))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_text(groups: Groups<'_>, products: &[Product]) -> String {
    let mut lines = Vec::new();

    for (entity_type, items) in groups {
        lines.push(format!(
            "{} ({})",
            entity_type.group_title().bold().cyan(),
            items.len()
        ));
        for item in items {
            let mut line = format!("  {}", item.label.bold());
            if let Some(description) = item.description() {
                line.push_str(&format!("  {}", description.dimmed()));
            }
            lines.push(line);
        }
    }

    if !products.is_empty() {
        lines.push(format!("{}", "Products".bold().green()));
        for product in products {
            lines.push(format!("  {} -> {}", product.label.bold(), product.value));
        }
    }

    if lines.is_empty() {
        return format!("{}", "No results".dimmed());
    }
    lines.join("\n")
}
