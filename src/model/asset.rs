use crate::foundation::core::AssetSize;
use crate::model::region::Region;

/// Kind of media an asset refers to.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum AssetType {
    /// Unrecognized media.
    #[default]
    Unknown,
    /// Still image; a root asset.
    Image,
    /// Whole video; a root asset owning zero or more frames.
    Video,
    /// One extracted frame of a video.
    VideoFrame,
    /// TFRecord container.
    #[serde(rename = "TFRecord")]
    TfRecord,
}

/// Tagging state of an asset. Only the orchestrator moves an asset between states.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum AssetState {
    /// Never tagged (or every region was removed again).
    #[default]
    NotVisited,
    /// Marked for storage.
    Store,
    /// Frozen for review.
    Freeze,
    /// Frozen and stored.
    FreezeStore,
    /// Carries user-tagged regions.
    Sample,
    /// Every region was produced or confirmed by frame-to-frame tracking.
    Tracked,
    /// Synthesized between two keyframes.
    Interpolated,
}

impl AssetState {
    /// States in iteration order, handy for exhaustive checks.
    pub const ALL: [AssetState; 7] = [
        AssetState::NotVisited,
        AssetState::Store,
        AssetState::Freeze,
        AssetState::FreezeStore,
        AssetState::Sample,
        AssetState::Tracked,
        AssetState::Interpolated,
    ];

    /// `true` for states that count as "tagged" when deriving a root asset's state.
    pub fn is_tagged(self) -> bool {
        matches!(
            self,
            AssetState::Sample | AssetState::Tracked | AssetState::Interpolated
        )
    }
}

/// A taggable unit of media: an image, a video, or one extracted video frame.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    /// Unique, stable identifier. Video frames use `<root>#t=<timestamp>`.
    pub name: String,
    /// Media kind.
    #[serde(rename = "type")]
    pub asset_type: AssetType,
    /// Tagging state.
    #[serde(default)]
    pub state: AssetState,
    /// Pixel size.
    #[serde(default)]
    pub size: AssetSize,
    /// Position in seconds inside the root video (video frames only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<f64>,
    /// Name of the owning root asset. A lookup key, never an owned copy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    /// Free-form reviewer comment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Step label attached during sequential tagging.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<String>,
    /// Number of regions in `PolygonInputted` state.
    #[serde(default)]
    pub polygon_number: usize,
    /// Number of regions in `PolylineInputted` state.
    #[serde(default)]
    pub polyline_number: usize,
    /// Timestamp of the child frame edited last (root assets only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_visited_timestamp: Option<f64>,
}

impl Asset {
    /// Create a root asset (image or video) in `NotVisited` state.
    pub fn root(name: impl Into<String>, asset_type: AssetType, size: AssetSize) -> Self {
        Self {
            name: name.into(),
            asset_type,
            size,
            ..Self::default()
        }
    }

    /// Create the video frame of `root` at `timestamp`.
    pub fn video_frame(root: &Asset, timestamp: f64) -> Self {
        Self {
            name: video_frame_name(&root.name, timestamp),
            asset_type: AssetType::VideoFrame,
            size: root.size,
            timestamp: Some(timestamp),
            parent: Some(root.name.clone()),
            ..Self::default()
        }
    }

    /// `true` for extracted video frames.
    pub fn is_video_frame(&self) -> bool {
        self.asset_type == AssetType::VideoFrame
    }

    /// `true` when a reviewer attached a step label or a comment.
    pub fn has_annotations(&self) -> bool {
        self.step.is_some() || self.comment.is_some()
    }
}

/// Deterministic name of a video frame: `<root>#t=<timestamp>`.
pub fn video_frame_name(root_name: &str, timestamp: f64) -> String {
    format!("{root_name}#t={timestamp}")
}

/// Split a video frame name back into its root name and timestamp.
pub fn parse_video_frame_name(name: &str) -> Option<(&str, f64)> {
    let (root, t) = name.rsplit_once("#t=")?;
    let t = t.parse::<f64>().ok()?;
    Some((root, t))
}

/// The unit of external persistence: one asset plus its regions.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetMetadata {
    /// The tagged asset.
    pub asset: Asset,
    /// Regions drawn on the asset.
    #[serde(default)]
    pub regions: Vec<Region>,
    /// Revision counter, bumped on every accepted save.
    #[serde(default)]
    pub version: u64,
}

impl AssetMetadata {
    /// Empty metadata for an asset that was never saved.
    pub fn new(asset: Asset) -> Self {
        Self {
            asset,
            regions: Vec::new(),
            version: 0,
        }
    }

    /// Region with id `id`, if present.
    pub fn region(&self, id: &str) -> Option<&Region> {
        self.regions.iter().find(|r| r.id == id)
    }

    /// Mutable region with id `id`, if present.
    pub fn region_mut(&mut self, id: &str) -> Option<&mut Region> {
        self.regions.iter_mut().find(|r| r.id == id)
    }

    /// Insert `region`, replacing any existing region with the same id in place.
    pub fn upsert_region(&mut self, region: Region) {
        match self.region_mut(&region.id) {
            Some(existing) => *existing = region,
            None => self.regions.push(region),
        }
    }

    /// Remove the region with id `id`, returning it.
    pub fn remove_region(&mut self, id: &str) -> Option<Region> {
        let idx = self.regions.iter().position(|r| r.id == id)?;
        Some(self.regions.remove(idx))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/asset.rs"]
mod tests;
