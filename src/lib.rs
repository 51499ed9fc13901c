//! tagtrack is the region/asset state and cross-frame consistency engine of a video annotation
//! tool.
//!
//! It decides which tagging state an asset and its regions are in, follows one logical region
//! across many video-frame assets, and produces new region geometry in three ways:
//!
//! 1. **Interpolation**: linear blending of a region's box between two nearby keyframes.
//! 2. **Tracking**: carrying regions from one displayed frame to the next.
//! 3. **Placement**: moving pasted regions to free, in-bounds spots.
//!
//! Rendering and persistence stay outside the crate, behind [`RegionSurface`] and
//! [`AssetMetadataStore`]. All computation is synchronous and deterministic apart from fresh
//! region ids.
#![forbid(unsafe_code)]

mod foundation;
mod interpolate;
mod model;
mod placement;
mod state;
mod tracker;
mod tracking;

/// Engine configuration.
pub mod config;
/// Whole-project JSON snapshots.
pub mod project;
/// Persistence seam.
pub mod store;
/// Rendering seam.
pub mod surface;

pub use config::{EngineConfig, PASTE_MARGIN};
pub use foundation::core::{AssetSize, BoundingBox, ExtractionRate, Point, Rect, Vec2};
pub use foundation::error::{TagtrackError, TagtrackResult};
pub use interpolate::engine::{
    InterpolationMethod, interpolate_regions, interpolation_pairs, merge_interpolated,
};
pub use model::asset::{
    Asset, AssetMetadata, AssetState, AssetType, parse_video_frame_name, video_frame_name,
};
pub use model::region::{Region, RegionState, RegionType, new_region_id};
pub use placement::engine::{PlacementCanvas, duplicate_regions_and_move};
pub use project::ProjectSnapshot;
pub use state::history::{EditHistory, HistoryEntry};
pub use state::orchestrator::{InterpolationReport, Orchestrator, RegionsChanged};
pub use state::rules::{next_asset_state, next_asset_state_for, shape_counts};
pub use store::{AssetMetadataStore, InMemoryAssetStore};
pub use surface::{NullSurface, RegionSurface};
pub use tracker::region_metadata::{
    Navigation, RegionAssetEntry, RegionMetadata, RegionMetadataTracker,
};
pub use tracking::engine::{TrackingOutcome, track_regions};
