//! Entity normalizer
//!
//! One conversion per source record type, all producing `SearchableItem`s.
//! Conversions are total: missing fields become empty strings or empty lists.

use chrono::NaiveDateTime;
use serde_json::{json, Value};

use crate::core::model::{EntityType, ItemValue, SearchableItem};
use crate::core::util::readable_bytes;
use crate::entities::inventory::Inventory;
use crate::entities::records::{
    Domain, Image, KubernetesCluster, Linode, NodeBalancer, ObjectStorageBucket, Region, Volume,
};

/// Conversion into the uniform search shape
pub trait ToSearchableItem {
    fn to_searchable_item(&self) -> SearchableItem;
}

fn created_value(created: &Option<NaiveDateTime>) -> Value {
    match created {
        Some(ts) => Value::String(ts.format("%Y-%m-%dT%H:%M:%S").to_string()),
        None => Value::Null,
    }
}

pub fn bucket_to_searchable_item(bucket: &ObjectStorageBucket) -> SearchableItem {
    SearchableItem::new(
        EntityType::Bucket,
        bucket.label.clone(),
        ItemValue::Key(format!("{}/{}", bucket.cluster, bucket.label)),
    )
    .with_data(json!({
        "cluster": bucket.cluster,
        "created": created_value(&bucket.created),
        "description": readable_bytes(bucket.size),
        "icon": "storage",
        "label": bucket.label,
        "path": format!("/object-storage/buckets/{}/{}", bucket.cluster, bucket.label),
    }))
}

pub fn domain_to_searchable_item(domain: &Domain) -> SearchableItem {
    let description = if domain.domain_type == "master" {
        "primary"
    } else {
        "secondary"
    };

    SearchableItem::new(EntityType::Domain, domain.domain.clone(), domain.id).with_data(json!({
        "description": description,
        "icon": "domain",
        "path": format!("/domains/{}", domain.id),
        "status": domain.status,
        "tags": domain.tags,
    }))
}

pub fn image_to_searchable_item(image: &Image) -> SearchableItem {
    SearchableItem::new(EntityType::Image, image.label.clone(), image.id.clone()).with_data(json!({
        "created": created_value(&image.created),
        "description": image.description.clone().unwrap_or_default(),
        "icon": "image",
        "path": "/images",
        "status": image.status,
        "tags": Vec::<String>::new(),
    }))
}

/// Cluster descriptions name the region, so the region list is needed here
pub fn kubernetes_cluster_to_searchable_item(
    cluster: &KubernetesCluster,
    regions: &[Region],
) -> SearchableItem {
    let region_label = regions
        .iter()
        .find(|r| r.id == cluster.region)
        .map(|r| r.label.as_str())
        .filter(|label| !label.is_empty())
        .unwrap_or(cluster.region.as_str());

    let description = if region_label.is_empty() {
        format!("Kubernetes {}", cluster.k8s_version)
    } else {
        format!("Kubernetes {}, {}", cluster.k8s_version, region_label)
    };

    SearchableItem::new(EntityType::KubernetesCluster, cluster.label.clone(), cluster.id)
        .with_data(json!({
            "created": created_value(&cluster.created),
            "description": description,
            "icon": "kube",
            "label": cluster.label,
            "path": format!("/kubernetes/clusters/{}/summary", cluster.id),
            "region": cluster.region,
            "status": cluster.status,
            "tags": cluster.tags,
        }))
}

pub fn linode_to_searchable_item(linode: &Linode) -> SearchableItem {
    let mut ips = linode.ipv4.clone();
    if let Some(ipv6) = linode.ipv6.as_ref().filter(|ip| !ip.is_empty()) {
        ips.push(ipv6.clone());
    }

    let plan = linode.linode_type.clone().unwrap_or_default();
    let description = [plan.as_str(), linode.region.as_str()]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ");

    SearchableItem::new(EntityType::Linode, linode.label.clone(), linode.id).with_data(json!({
        "created": created_value(&linode.created),
        "description": description,
        "icon": "linode",
        "ips": ips,
        "path": format!("/linodes/{}", linode.id),
        "region": linode.region,
        "status": linode.status,
        "tags": linode.tags,
        "type": plan,
    }))
}

pub fn nodebalancer_to_searchable_item(nodebalancer: &NodeBalancer) -> SearchableItem {
    let ips: Vec<&str> = std::iter::once(nodebalancer.ipv4.as_str())
        .chain(nodebalancer.ipv6.as_deref())
        .filter(|ip| !ip.is_empty())
        .collect();

    SearchableItem::new(
        EntityType::Nodebalancer,
        nodebalancer.label.clone(),
        nodebalancer.id,
    )
    .with_data(json!({
        "created": created_value(&nodebalancer.created),
        "description": nodebalancer.hostname,
        "icon": "nodebalancer",
        "ips": ips,
        "path": format!("/nodebalancers/{}", nodebalancer.id),
        "region": nodebalancer.region,
        "status": nodebalancer.status.clone().unwrap_or_default(),
        "tags": nodebalancer.tags,
    }))
}

pub fn volume_to_searchable_item(volume: &Volume) -> SearchableItem {
    SearchableItem::new(EntityType::Volume, volume.label.clone(), volume.id).with_data(json!({
        "created": created_value(&volume.created),
        "description": format!("{} GB", volume.size),
        "icon": "volume",
        "path": format!("/volumes/{}", volume.id),
        "region": volume.region,
        "status": volume.status,
        "tags": volume.tags,
    }))
}

impl ToSearchableItem for ObjectStorageBucket {
    fn to_searchable_item(&self) -> SearchableItem {
        bucket_to_searchable_item(self)
    }
}

impl ToSearchableItem for Domain {
    fn to_searchable_item(&self) -> SearchableItem {
        domain_to_searchable_item(self)
    }
}

impl ToSearchableItem for Image {
    fn to_searchable_item(&self) -> SearchableItem {
        image_to_searchable_item(self)
    }
}

impl ToSearchableItem for Linode {
    fn to_searchable_item(&self) -> SearchableItem {
        linode_to_searchable_item(self)
    }
}

impl ToSearchableItem for NodeBalancer {
    fn to_searchable_item(&self) -> SearchableItem {
        nodebalancer_to_searchable_item(self)
    }
}

impl ToSearchableItem for Volume {
    fn to_searchable_item(&self) -> SearchableItem {
        volume_to_searchable_item(self)
    }
}

fn convert_all<T: ToSearchableItem>(records: &[T]) -> impl Iterator<Item = SearchableItem> + '_ {
    records.iter().map(ToSearchableItem::to_searchable_item)
}

/// Flatten an inventory into searchable items.
///
/// Order: linodes (pre-normalized first, then raw records), images, buckets,
/// domains, volumes, kubernetes clusters, nodebalancers.
pub fn normalize_inventory(inventory: &Inventory) -> Vec<SearchableItem> {
    let mut items = Vec::with_capacity(inventory.len());

    items.extend(inventory.searchable_linodes.iter().cloned());
    items.extend(convert_all(&inventory.linodes));
    items.extend(convert_all(&inventory.images));
    items.extend(convert_all(&inventory.buckets));
    items.extend(convert_all(&inventory.domains));
    items.extend(convert_all(&inventory.volumes));
    items.extend(
        inventory
            .kubernetes_clusters
            .iter()
            .map(|cluster| kubernetes_cluster_to_searchable_item(cluster, &inventory.regions)),
    );
    items.extend(convert_all(&inventory.nodebalancers));

    tracing::debug!(count = items.len(), "normalized inventory");
    items
}
