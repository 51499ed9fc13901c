/// Convenience result type used across tagtrack.
pub type TagtrackResult<T> = Result<T, TagtrackError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Untagged regions are not an error: they surface as `is_valid == false` on
/// [`crate::RegionsChanged`] so callers can block navigation without unwinding.
#[derive(thiserror::Error, Debug)]
pub enum TagtrackError {
    /// Invalid configuration or caller-provided data.
    #[error("validation error: {0}")]
    Validation(String),

    /// A pasted region does not fit on the target canvas at any position.
    #[error("paste region too big: region '{region_id}' does not fit in {width}x{height}")]
    PasteRegionTooBig {
        /// Id of the offending region.
        region_id: String,
        /// Target canvas width.
        width: f64,
        /// Target canvas height.
        height: f64,
    },

    /// Every grid anchor on the target canvas is already occupied.
    #[error("placement exhausted: {0}")]
    PlacementExhausted(String),

    /// An asset or region name that the engine does not know about.
    #[error("not found: {0}")]
    NotFound(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TagtrackError {
    /// Build a [`TagtrackError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`TagtrackError::NotFound`] value.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Build a [`TagtrackError::PlacementExhausted`] value.
    pub fn placement_exhausted(msg: impl Into<String>) -> Self {
        Self::PlacementExhausted(msg.into())
    }

    /// Build a [`TagtrackError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for TagtrackError {
    fn from(err: serde_json::Error) -> Self {
        Self::serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
