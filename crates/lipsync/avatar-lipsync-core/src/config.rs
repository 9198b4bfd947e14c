use serde::{Deserialize, Serialize};

pub const SMOOTHNESS_RANGE: (f32, f32) = (0.01, 0.9);
pub const INTENSITY_RANGE: (f32, f32) = (0.1, 1.5);

/// Tuning for the viseme blending step.
///
/// `smoothness` scales how far `current` moves toward `target` per frame;
/// `intensity` is the peak target weight of an active cue. The smoothing
/// factor is normalized against `frame_rate_baseline` frames per second so a
/// host running at a different rate converges in the same wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlendConfig {
    pub smoothness: f32,
    pub intensity: f32,
    pub frame_rate_baseline: f32,
}

impl Default for BlendConfig {
    fn default() -> Self {
        Self {
            smoothness: 0.1,
            intensity: 0.8,
            frame_rate_baseline: 60.0,
        }
    }
}

impl BlendConfig {
    /// Copy with `smoothness` and `intensity` clamped to their control ranges.
    /// Non-finite values fall back to the defaults.
    pub fn clamped(self) -> Self {
        let d = Self::default();
        let pick = |v: f32, fallback: f32, (lo, hi): (f32, f32)| {
            if v.is_finite() {
                v.clamp(lo, hi)
            } else {
                fallback
            }
        };
        let baseline = if self.frame_rate_baseline.is_finite() && self.frame_rate_baseline > 0.0 {
            self.frame_rate_baseline
        } else {
            d.frame_rate_baseline
        };
        Self {
            smoothness: pick(self.smoothness, d.smoothness, SMOOTHNESS_RANGE),
            intensity: pick(self.intensity, d.intensity, INTENSITY_RANGE),
            frame_rate_baseline: baseline,
        }
    }
}
