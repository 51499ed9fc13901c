use std::collections::BTreeMap;

use crate::foundation::error::TagtrackResult;
use crate::model::asset::{Asset, AssetMetadata};

/// Persistence collaborator for per-asset metadata documents.
pub trait AssetMetadataStore {
    /// Load the metadata of `asset`; assets never saved yield empty metadata.
    fn load(&self, asset: &Asset) -> TagtrackResult<AssetMetadata>;

    /// Persist `metadata` and return what was stored.
    fn save(&mut self, metadata: AssetMetadata) -> TagtrackResult<AssetMetadata>;

    /// Stored metadata by asset name.
    fn get(&self, name: &str) -> Option<&AssetMetadata>;

    /// Names of every stored asset.
    fn names(&self) -> Vec<String>;
}

/// In-memory store keyed by asset name.
#[derive(Clone, Debug, Default)]
pub struct InMemoryAssetStore {
    docs: BTreeMap<String, AssetMetadata>,
}

impl InMemoryAssetStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored documents keyed by asset name.
    pub fn docs(&self) -> &BTreeMap<String, AssetMetadata> {
        &self.docs
    }

    /// Consume the store.
    pub fn into_docs(self) -> BTreeMap<String, AssetMetadata> {
        self.docs
    }
}

impl FromIterator<AssetMetadata> for InMemoryAssetStore {
    fn from_iter<I: IntoIterator<Item = AssetMetadata>>(iter: I) -> Self {
        Self {
            docs: iter.into_iter().map(|md| (md.asset.name.clone(), md)).collect(),
        }
    }
}

impl AssetMetadataStore for InMemoryAssetStore {
    fn load(&self, asset: &Asset) -> TagtrackResult<AssetMetadata> {
        let stored = self.docs.get(&asset.name).cloned();
        Ok(stored.unwrap_or_else(|| AssetMetadata::new(asset.clone())))
    }

    fn save(&mut self, metadata: AssetMetadata) -> TagtrackResult<AssetMetadata> {
        let name = metadata.asset.name.clone();
        self.docs.insert(name, metadata.clone());
        Ok(metadata)
    }

    fn get(&self, name: &str) -> Option<&AssetMetadata> {
        self.docs.get(name)
    }

    fn names(&self) -> Vec<String> {
        self.docs.keys().cloned().collect()
    }
}

#[cfg(test)]
#[path = "../tests/unit/store.rs"]
mod tests;
