//! Inventory loading
//!
//! An inventory is the set of already-fetched resource lists for one account,
//! stored as a single JSON document.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::model::SearchableItem;
use crate::entities::records::{
    Domain, Image, KubernetesCluster, Linode, NodeBalancer, ObjectStorageBucket, Region, Volume,
};

/// Errors raised while reading an inventory
#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("failed to read inventory {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid inventory JSON: {source}")]
    Parse {
        #[from]
        source: serde_json::Error,
    },
}

/// Raw on-disk shape. Records are kept as values so one bad record does not
/// reject the whole document.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawInventory {
    buckets: Option<Vec<Value>>,
    domains: Option<Vec<Value>>,
    images: Option<Vec<Value>>,
    kubernetes_clusters: Option<Vec<Value>>,
    linodes: Option<Vec<Value>>,
    nodebalancers: Option<Vec<Value>>,
    volumes: Option<Vec<Value>>,
    regions: Option<Vec<Value>>,
    searchable_linodes: Option<Vec<Value>>,
}

/// Deserialize each record on its own, logging and skipping the ones that fail
fn parse_records<T: DeserializeOwned>(kind: &str, values: Option<Vec<Value>>) -> Vec<T> {
    values
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value::<T>(value) {
            Ok(record) => Some(record),
            Err(err) => {
                tracing::warn!(index, error = %err, "skipping {}", kind);
                None
            }
        })
        .collect()
}

/// Resource lists supplied by the caller
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    pub buckets: Vec<ObjectStorageBucket>,
    pub domains: Vec<Domain>,
    pub images: Vec<Image>,
    pub kubernetes_clusters: Vec<KubernetesCluster>,
    pub linodes: Vec<Linode>,
    pub nodebalancers: Vec<NodeBalancer>,
    pub volumes: Vec<Volume>,
    pub regions: Vec<Region>,
    pub searchable_linodes: Vec<SearchableItem>,
}

impl Inventory {
    /// Number of entity records (regions excluded)
    pub fn len(&self) -> usize {
        self.buckets.len()
            + self.domains.len()
            + self.images.len()
            + self.kubernetes_clusters.len()
            + self.linodes.len()
            + self.nodebalancers.len()
            + self.volumes.len()
            + self.searchable_linodes.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<RawInventory> for Inventory {
    fn from(raw: RawInventory) -> Self {
        Self {
            buckets: parse_records("bucket", raw.buckets),
            domains: parse_records("domain", raw.domains),
            images: parse_records("image", raw.images),
            kubernetes_clusters: parse_records("kubernetes cluster", raw.kubernetes_clusters),
            linodes: parse_records("linode", raw.linodes),
            nodebalancers: parse_records("nodebalancer", raw.nodebalancers),
            volumes: parse_records("volume", raw.volumes),
            regions: parse_records("region", raw.regions),
            searchable_linodes: parse_records("searchable linode", raw.searchable_linodes),
        }
    }
}

/// Parse an inventory document
pub fn parse_inventory(content: &str) -> Result<Inventory, InventoryError> {
    let raw: RawInventory = serde_json::from_str(content)?;
    Ok(raw.into())
}

/// Load an inventory from a file, or from stdin when `path` is `-`
pub fn load_inventory(path: &Path) -> Result<Inventory, InventoryError> {
    let content = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(|source| InventoryError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        buf
    } else {
        std::fs::read_to_string(path).map_err(|source| InventoryError::Read {
            path: path.to_path_buf(),
            source,
        })?
    };

    let inventory = parse_inventory(&content)?;
    tracing::debug!(path = %path.display(), records = inventory.len(), "loaded inventory");
    Ok(inventory)
}
