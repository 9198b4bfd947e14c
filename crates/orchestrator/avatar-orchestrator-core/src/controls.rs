//! Live control values, the knobs a host panel exposes per avatar.

use serde::{Deserialize, Serialize};

use avatar_lipsync_core::{INTENSITY_RANGE, SMOOTHNESS_RANGE};

pub const ANIMATION_SPEED_RANGE: (f32, f32) = (0.1, 3.0);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AvatarControls {
    pub play_audio: bool,
    /// Script id selecting both the audio clip and its cue track.
    pub script: String,
    pub smoothness: f32,
    pub intensity: f32,
    pub play_animation: bool,
    pub animation_speed: f32,
}

impl Default for AvatarControls {
    fn default() -> Self {
        Self {
            play_audio: false,
            script: "audio_1".to_string(),
            smoothness: 0.1,
            intensity: 0.8,
            play_animation: true,
            animation_speed: 1.0,
        }
    }
}

fn clamp_or(v: f32, fallback: f32, (lo, hi): (f32, f32)) -> f32 {
    if v.is_finite() {
        v.clamp(lo, hi)
    } else {
        fallback
    }
}

impl AvatarControls {
    /// Copy with every numeric control clamped to its range.
    pub fn sanitized(&self) -> Self {
        let d = Self::default();
        Self {
            play_audio: self.play_audio,
            script: self.script.clone(),
            smoothness: clamp_or(self.smoothness, d.smoothness, SMOOTHNESS_RANGE),
            intensity: clamp_or(self.intensity, d.intensity, INTENSITY_RANGE),
            play_animation: self.play_animation,
            animation_speed: clamp_or(self.animation_speed, d.animation_speed, ANIMATION_SPEED_RANGE),
        }
    }
}
