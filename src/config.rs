use crate::foundation::core::ExtractionRate;
use crate::foundation::error::{TagtrackError, TagtrackResult};
use crate::interpolate::engine::InterpolationMethod;

/// Default grid step for pasted regions, in pixels.
pub const PASTE_MARGIN: f64 = 10.0;

/// Engine-wide settings.
///
/// Every field has a default, so an empty JSON object is a valid configuration.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    /// Frames per second extracted from videos.
    pub frame_extraction_rate: u32,
    /// Algorithm used to synthesize in-between frames.
    pub interpolation_method: InterpolationMethod,
    /// Require a step label on every asset that carries regions.
    pub require_step: bool,
    /// Diagonal grid step used when pasting a region onto its own asset.
    pub paste_margin: f64,
    /// Undo entries kept per asset.
    pub undo_depth: usize,
    /// Largest keyframe gap, in extraction intervals, that batch interpolation fills.
    pub max_interpolation_gap: u32,
    /// Propagate regions frame to frame while navigating.
    pub tracking_enabled: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            frame_extraction_rate: ExtractionRate::default().fps(),
            interpolation_method: InterpolationMethod::Linear,
            require_step: false,
            paste_margin: PASTE_MARGIN,
            undo_depth: 20,
            max_interpolation_gap: 5,
            tracking_enabled: false,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a JSON configuration document.
    pub fn from_json_str(s: &str) -> TagtrackResult<Self> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check value ranges.
    pub fn validate(&self) -> TagtrackResult<()> {
        ExtractionRate::new(self.frame_extraction_rate)?;
        if !self.paste_margin.is_finite() || self.paste_margin <= 0.0 {
            return Err(TagtrackError::validation(
                "pasteMargin must be finite and > 0",
            ));
        }
        if self.undo_depth == 0 {
            return Err(TagtrackError::validation("undoDepth must be >= 1"));
        }
        if self.max_interpolation_gap == 0 {
            return Err(TagtrackError::validation(
                "maxInterpolationGap must be >= 1",
            ));
        }
        Ok(())
    }

    /// Validated extraction rate.
    pub fn extraction_rate(&self) -> TagtrackResult<ExtractionRate> {
        ExtractionRate::new(self.frame_extraction_rate)
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
