//! Asset entities.
//!
//! The registry owns the canonical copy of each asset. An asset's data is
//! only changed through [`AssetRegistry::update`], a shallow merge that
//! bumps `updated_at`. Its metadata is side-channel bookkeeping (output
//! paths, created folders) set through [`AssetRegistry::annotate`].

use agency_toolkit_core::AssetId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use std::collections::HashMap;
use tracing::debug;

/// A generated deliverable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    /// Unique identifier.
    pub id: AssetId,
    /// Asset type tag, e.g. `social_post`.
    #[serde(rename = "type")]
    pub asset_type: String,
    /// The asset's content fields.
    pub data: Map<String, JsonValue>,
    /// When the asset was created.
    pub created_at: DateTime<Utc>,
    /// When the data was last merged.
    pub updated_at: DateTime<Utc>,
    /// Bookkeeping such as `output_path`.
    #[serde(default)]
    pub metadata: Map<String, JsonValue>,
}

impl Asset {
    /// Looks up a metadata entry as a string.
    #[must_use]
    pub fn metadata_str(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).and_then(JsonValue::as_str)
    }
}

/// In-memory registry of assets.
#[derive(Debug, Clone, Default)]
pub struct AssetRegistry {
    assets: HashMap<AssetId, Asset>,
}

impl AssetRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates and stores a new asset, returning a copy of it.
    pub fn create(
        &mut self,
        asset_type: impl Into<String>,
        data: Map<String, JsonValue>,
        metadata: Option<Map<String, JsonValue>>,
    ) -> Asset {
        let now = Utc::now();
        let asset = Asset {
            id: AssetId::new(),
            asset_type: asset_type.into(),
            data,
            created_at: now,
            updated_at: now,
            metadata: metadata.unwrap_or_default(),
        };
        debug!(asset_id = %asset.id, asset_type = %asset.asset_type, "created asset");
        self.assets.insert(asset.id, asset.clone());
        asset
    }

    /// Gets an asset by id.
    #[must_use]
    pub fn get(&self, id: AssetId) -> Option<&Asset> {
        self.assets.get(&id)
    }

    /// Merges `data` into the asset's data and bumps `updated_at`.
    ///
    /// Returns `None` if the asset does not exist.
    pub fn update(&mut self, id: AssetId, data: Map<String, JsonValue>) -> Option<&Asset> {
        let asset = self.assets.get_mut(&id)?;
        asset.data.extend(data);
        asset.updated_at = Utc::now();
        Some(asset)
    }

    /// Sets one metadata entry on the asset.
    ///
    /// Returns `None` if the asset does not exist.
    pub fn annotate(
        &mut self,
        id: AssetId,
        key: impl Into<String>,
        value: impl Into<JsonValue>,
    ) -> Option<&Asset> {
        let asset = self.assets.get_mut(&id)?;
        asset.metadata.insert(key.into(), value.into());
        Some(asset)
    }

    /// Deletes an asset. Returns whether it existed.
    pub fn delete(&mut self, id: AssetId) -> bool {
        self.assets.remove(&id).is_some()
    }

    /// All assets of the given type, oldest first.
    #[must_use]
    pub fn list_by_type(&self, asset_type: &str) -> Vec<&Asset> {
        self.sorted(|a| a.asset_type == asset_type)
    }

    /// All assets, oldest first.
    #[must_use]
    pub fn list_all(&self) -> Vec<&Asset> {
        self.sorted(|_| true)
    }

    /// Number of stored assets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    /// Returns whether no assets are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    fn sorted(&self, keep: impl Fn(&Asset) -> bool) -> Vec<&Asset> {
        let mut assets: Vec<&Asset> = self.assets.values().filter(|a| keep(a)).collect();
        assets.sort_by_key(|a| (a.created_at, a.id));
        assets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: JsonValue) -> Map<String, JsonValue> {
        match value {
            JsonValue::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn create_stores_canonical_copy() {
        let mut registry = AssetRegistry::new();
        let asset = registry.create("test_type", object(json!({"name": "test", "value": 123})), None);

        assert_eq!(asset.asset_type, "test_type");
        assert_eq!(asset.data["name"], json!("test"));
        assert_eq!(asset.created_at, asset.updated_at);
        assert_eq!(registry.get(asset.id), Some(&asset));
    }

    #[test]
    fn update_merges_and_bumps_timestamp() {
        let mut registry = AssetRegistry::new();
        let asset = registry.create("test", object(json!({"value": 1, "keep": true})), None);

        let updated = registry
            .update(asset.id, object(json!({"value": 2})))
            .expect("asset exists");

        assert_eq!(updated.data["value"], json!(2));
        assert_eq!(updated.data["keep"], json!(true));
        assert!(updated.updated_at >= asset.updated_at);
    }

    #[test]
    fn update_unknown_is_none() {
        let mut registry = AssetRegistry::new();
        assert!(registry.update(AssetId::new(), Map::new()).is_none());
        assert!(registry.annotate(AssetId::new(), "k", "v").is_none());
    }

    #[test]
    fn annotate_sets_metadata_only() {
        let mut registry = AssetRegistry::new();
        let asset = registry.create("social_post", Map::new(), None);

        let annotated = registry
            .annotate(asset.id, "output_path", "out/post.png")
            .expect("asset exists");

        assert_eq!(annotated.metadata_str("output_path"), Some("out/post.png"));
        assert_eq!(annotated.updated_at, asset.updated_at);
    }

    #[test]
    fn delete_reports_existence() {
        let mut registry = AssetRegistry::new();
        let asset = registry.create("x", Map::new(), None);

        assert!(registry.delete(asset.id));
        assert!(!registry.delete(asset.id));
        assert!(registry.get(asset.id).is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn list_by_type_filters() {
        let mut registry = AssetRegistry::new();
        registry.create("type_a", Map::new(), None);
        registry.create("type_a", Map::new(), None);
        registry.create("type_b", Map::new(), None);

        assert_eq!(registry.list_by_type("type_a").len(), 2);
        assert_eq!(registry.list_all().len(), 3);
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn repeated_reads_are_equal() {
        let mut registry = AssetRegistry::new();
        let asset = registry.create("x", object(json!({"a": 1})), None);

        let first = registry.get(asset.id).cloned();
        let second = registry.get(asset.id).cloned();
        assert_eq!(first, second);
    }

    #[test]
    fn serializes_type_and_rfc3339_timestamps() {
        let mut registry = AssetRegistry::new();
        let asset = registry.create("briefing", Map::new(), None);

        let json = serde_json::to_value(&asset).expect("serialize");
        assert_eq!(json["type"], json!("briefing"));
        assert!(json["created_at"].as_str().is_some_and(|s| s.contains('T')));

        let parsed: Asset = serde_json::from_value(json).expect("deserialize");
        assert_eq!(parsed, asset);
    }
}
