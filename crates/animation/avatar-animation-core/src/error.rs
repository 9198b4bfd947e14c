//! Error types for clip loading and validation.
//!
//! Missing bones and unresolved tracks are not errors; they are reported
//! through [`crate::RetargetReport`] and `log` diagnostics instead.

/// Errors raised while decoding or validating animation clips.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum AnimationError {
    /// Clip JSON could not be decoded
    #[error("Clip parse error: {reason}")]
    Parse { reason: String },

    /// Track identifier is not a valid "<bone>.<property>" path
    #[error("Invalid track name '{name}': {reason}")]
    InvalidTrackName { name: String, reason: String },

    /// Keyframe payload does not match the declared track type
    #[error("Track '{track}' has {values} values for {times} keys with stride {stride}")]
    ValueCountMismatch {
        track: String,
        times: usize,
        values: usize,
        stride: usize,
    },

    /// Unknown keyframe track type
    #[error("Track '{track}' has unknown type '{kind}'")]
    UnknownTrackType { track: String, kind: String },

    /// Structural clip invariant violated
    #[error("Invalid clip '{clip}': {reason}")]
    InvalidClip { clip: String, reason: String },
}

impl AnimationError {
    /// Get error category for logging
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::Parse { .. } => "serialization",
            Self::InvalidTrackName { .. }
            | Self::ValueCountMismatch { .. }
            | Self::UnknownTrackType { .. } => "track",
            Self::InvalidClip { .. } => "validation",
        }
    }
}

impl From<serde_json::Error> for AnimationError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse {
            reason: err.to_string(),
        }
    }
}
