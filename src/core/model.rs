//! Unified Search Model
//!
//! Every entity source is mapped to a `SearchableItem` before matching, and every
//! search produces a `SearchResults` before rendering output.

use serde::{Deserialize, Serialize};

/// The kind of entity a searchable item was built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntityType {
    Bucket,
    Domain,
    Image,
    KubernetesCluster,
    Linode,
    Nodebalancer,
    Volume,
}

impl EntityType {
    /// All entity types, in partition order
    pub const ALL: [EntityType; 7] = [
        EntityType::Bucket,
        EntityType::Domain,
        EntityType::Image,
        EntityType::KubernetesCluster,
        EntityType::Linode,
        EntityType::Nodebalancer,
        EntityType::Volume,
    ];

    /// Wire name (as used in `entityType`)
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Bucket => "bucket",
            EntityType::Domain => "domain",
            EntityType::Image => "image",
            EntityType::KubernetesCluster => "kubernetesCluster",
            EntityType::Linode => "linode",
            EntityType::Nodebalancer => "nodebalancer",
            EntityType::Volume => "volume",
        }
    }

    /// Human-readable group heading
    pub fn group_title(&self) -> &'static str {
        match self {
            EntityType::Bucket => "Buckets",
            EntityType::Domain => "Domains",
            EntityType::Image => "Images",
            EntityType::KubernetesCluster => "Kubernetes Clusters",
            EntityType::Linode => "Linodes",
            EntityType::Nodebalancer => "NodeBalancers",
            EntityType::Volume => "Volumes",
        }
    }
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EntityType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bucket" | "buckets" => Ok(EntityType::Bucket),
            "domain" | "domains" => Ok(EntityType::Domain),
            "image" | "images" => Ok(EntityType::Image),
            "kubernetescluster" | "kubernetesclusters" | "kubernetes" | "lke" => {
                Ok(EntityType::KubernetesCluster)
            }
            "linode" | "linodes" => Ok(EntityType::Linode),
            "nodebalancer" | "nodebalancers" => Ok(EntityType::Nodebalancer),
            "volume" | "volumes" => Ok(EntityType::Volume),
            _ => Err(format!("Unknown entity type: {}", s)),
        }
    }
}

/// Attributes on an entity that a query may match against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchField {
    Ips,
    Label,
    Tags,
    Type,
}

impl SearchField {
    pub const ALL: [SearchField; 4] = [
        SearchField::Ips,
        SearchField::Label,
        SearchField::Tags,
        SearchField::Type,
    ];
}

impl std::str::FromStr for SearchField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ip" | "ips" => Ok(SearchField::Ips),
            "label" => Ok(SearchField::Label),
            "tag" | "tags" => Ok(SearchField::Tags),
            "type" => Ok(SearchField::Type),
            _ => Err(format!("Unknown search field: {}", s)),
        }
    }
}

/// Item value: numeric API id, or a composite string key (buckets)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemValue {
    Id(u64),
    Key(String),
}

impl std::fmt::Display for ItemValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemValue::Id(id) => write!(f, "{}", id),
            ItemValue::Key(key) => f.write_str(key),
        }
    }
}

impl From<u64> for ItemValue {
    fn from(id: u64) -> Self {
        ItemValue::Id(id)
    }
}

impl From<String> for ItemValue {
    fn from(key: String) -> Self {
        ItemValue::Key(key)
    }
}

/// The uniform record every entity is normalized into
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchableItem {
    pub entity_type: EntityType,

    pub label: String,

    pub value: ItemValue,

    /// Entity-specific payload (path, icon, tags, ips, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl SearchableItem {
    pub fn new(entity_type: EntityType, label: impl Into<String>, value: impl Into<ItemValue>) -> Self {
        Self {
            entity_type,
            label: label.into(),
            value: value.into(),
            data: None,
        }
    }

    /// Set data payload
    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }

    /// String values of a search field on this item.
    ///
    /// `label` is always present; `ips`, `tags` and `type` come from `data` and
    /// yield nothing when absent.
    pub fn field_values(&self, field: SearchField) -> Vec<&str> {
        let data_key = match field {
            SearchField::Label => return vec![self.label.as_str()],
            SearchField::Ips => "ips",
            SearchField::Tags => "tags",
            SearchField::Type => "type",
        };

        match self.data.as_ref().and_then(|d| d.get(data_key)) {
            Some(serde_json::Value::String(s)) => vec![s.as_str()],
            Some(serde_json::Value::Array(values)) => {
                values.iter().filter_map(|v| v.as_str()).collect()
            }
            _ => Vec::new(),
        }
    }

    /// `data.description`, if any
    pub fn description(&self) -> Option<&str> {
        self.data
            .as_ref()
            .and_then(|d| d.get("description"))
            .and_then(|d| d.as_str())
            .filter(|d| !d.is_empty())
    }
}

/// Static navigation shortcut
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub entity_type: String,
    pub label: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

/// Search hits partitioned by entity kind. All seven keys are always present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResultsByEntity {
    pub buckets: Vec<SearchableItem>,
    pub domains: Vec<SearchableItem>,
    pub images: Vec<SearchableItem>,
    pub kubernetes_clusters: Vec<SearchableItem>,
    pub linodes: Vec<SearchableItem>,
    pub nodebalancers: Vec<SearchableItem>,
    pub volumes: Vec<SearchableItem>,
}

impl SearchResultsByEntity {
    pub fn bucket(&self, entity_type: EntityType) -> &[SearchableItem] {
        match entity_type {
            EntityType::Bucket => &self.buckets,
            EntityType::Domain => &self.domains,
            EntityType::Image => &self.images,
            EntityType::KubernetesCluster => &self.kubernetes_clusters,
            EntityType::Linode => &self.linodes,
            EntityType::Nodebalancer => &self.nodebalancers,
            EntityType::Volume => &self.volumes,
        }
    }

    pub fn bucket_mut(&mut self, entity_type: EntityType) -> &mut Vec<SearchableItem> {
        match entity_type {
            EntityType::Bucket => &mut self.buckets,
            EntityType::Domain => &mut self.domains,
            EntityType::Image => &mut self.images,
            EntityType::KubernetesCluster => &mut self.kubernetes_clusters,
            EntityType::Linode => &mut self.linodes,
            EntityType::Nodebalancer => &mut self.nodebalancers,
            EntityType::Volume => &mut self.volumes,
        }
    }

    /// Total number of partitioned items
    pub fn len(&self) -> usize {
        EntityType::ALL.iter().map(|t| self.bucket(*t).len()).sum()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate non-empty groups in partition order
    pub fn groups(&self) -> impl Iterator<Item = (EntityType, &[SearchableItem])> {
        EntityType::ALL
            .into_iter()
            .map(move |t| (t, self.bucket(t)))
            .filter(|(_, items)| !items.is_empty())
    }

    /// Keep only one partition
    pub fn retain_only(&mut self, entity_type: EntityType) {
        for t in EntityType::ALL {
            if t != entity_type {
                self.bucket_mut(t).clear();
            }
        }
    }
}

/// Output of a single search call
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults {
    pub combined_results: Vec<SearchableItem>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub products: Option<Vec<Product>>,

    pub search_results_by_entity: SearchResultsByEntity,
}

/// Number of searchable items per entity kind
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityCounts {
    pub total: usize,
    pub buckets: usize,
    pub domains: usize,
    pub images: usize,
    pub kubernetes_clusters: usize,
    pub linodes: usize,
    pub nodebalancers: usize,
    pub volumes: usize,
}

impl EntityCounts {
    pub fn from_items(items: &[SearchableItem]) -> Self {
        let mut counts = Self {
            total: items.len(),
            ..Default::default()
        };
        for item in items {
            *counts.count_mut(item.entity_type) += 1;
        }
        counts
    }

    pub fn count(&self, entity_type: EntityType) -> usize {
        match entity_type {
            EntityType::Bucket => self.buckets,
            EntityType::Domain => self.domains,
            EntityType::Image => self.images,
            EntityType::KubernetesCluster => self.kubernetes_clusters,
            EntityType::Linode => self.linodes,
            EntityType::Nodebalancer => self.nodebalancers,
            EntityType::Volume => self.volumes,
        }
    }

    fn count_mut(&mut self, entity_type: EntityType) -> &mut usize {
        match entity_type {
            EntityType::Bucket => &mut self.buckets,
            EntityType::Domain => &mut self.domains,
            EntityType::Image => &mut self.images,
            EntityType::KubernetesCluster => &mut self.kubernetes_clusters,
            EntityType::Linode => &mut self.linodes,
            EntityType::Nodebalancer => &mut self.nodebalancers,
            EntityType::Volume => &mut self.volumes,
        }
    }

    /// Counts in partition order
    pub fn iter(&self) -> impl Iterator<Item = (EntityType, usize)> + '_ {
        EntityType::ALL.into_iter().map(move |t| (t, self.count(t)))
    }
}
