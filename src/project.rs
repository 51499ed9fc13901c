use std::collections::BTreeMap;

use crate::config::EngineConfig;
use crate::foundation::error::TagtrackResult;
use crate::model::asset::{Asset, AssetMetadata};
use crate::state::orchestrator::Orchestrator;
use crate::store::InMemoryAssetStore;

/// JSON snapshot of a whole project: every asset plus every saved metadata document.
///
/// Assets that only appear inside `metadata` are indexed too; an entry in `assets` wins when a
/// name appears in both, since it carries the orchestrator-owned state.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSnapshot {
    /// Asset index, roots included.
    #[serde(default)]
    pub assets: Vec<Asset>,
    /// Saved per-asset documents.
    #[serde(default)]
    pub metadata: Vec<AssetMetadata>,
}

impl ProjectSnapshot {
    /// Parse a snapshot document.
    pub fn from_json_str(s: &str) -> TagtrackResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Pretty-printed JSON document.
    pub fn to_json_string(&self) -> TagtrackResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load the snapshot into an orchestrator backed by an in-memory store.
    pub fn into_orchestrator(
        self,
        config: EngineConfig,
    ) -> TagtrackResult<Orchestrator<InMemoryAssetStore>> {
        let store: InMemoryAssetStore = self.metadata.into_iter().collect();
        let mut orchestrator = Orchestrator::new(config, store)?;
        for asset in self.assets {
            orchestrator.register_asset(asset);
        }
        Ok(orchestrator)
    }

    /// Capture the current state of an orchestrator.
    pub fn from_orchestrator(orchestrator: Orchestrator<InMemoryAssetStore>) -> Self {
        let (assets, store) = orchestrator.into_parts();
        let mut docs: BTreeMap<String, AssetMetadata> = store.into_docs();
        // Stored documents follow the index so saved states never lag behind.
        for asset in &assets {
            if let Some(md) = docs.get_mut(&asset.name) {
                md.asset = asset.clone();
            }
        }
        Self {
            assets,
            metadata: docs.into_values().collect(),
        }
    }
}
