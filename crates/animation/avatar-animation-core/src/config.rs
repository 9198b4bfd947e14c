//! Playback configuration for the idle clip player.

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoopMode {
    /// Play to the end and hold the last frame.
    Once,
    /// Wrap back to the start (idle loops).
    #[default]
    Repeat,
}

/// Configuration for a [`crate::ClipPlayer`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Playback rate multiplier applied to the frame delta.
    pub time_scale: f32,
    pub loop_mode: LoopMode,
    /// Seconds to ramp the clip weight from 0 to 1 after `play()`; 0 disables.
    pub fade_in: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            time_scale: 1.0,
            loop_mode: LoopMode::Repeat,
            fade_in: 0.0,
        }
    }
}
