use serde::{Deserialize, Serialize};

use avatar_animation_core::{BoneNameMap, PlayerConfig, PoseCorrectionSet};
use avatar_lipsync_core::{BlendConfig, PhonemeMap};

use crate::controls::AvatarControls;
use crate::diagnostics::DiagnosticsCfg;

/// Everything an avatar needs at construction. JSON round-trippable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AvatarConfig {
    pub blend: BlendConfig,
    pub player: PlayerConfig,
    /// Source → target bone names applied when binding the idle clip.
    pub bone_map: BoneNameMap,
    /// Static rotations written after the idle clip every frame.
    pub corrections: PoseCorrectionSet,
    pub phonemes: PhonemeMap,
    pub animation_speed: f32,
    pub diagnostics: DiagnosticsCfg,
}

impl Default for AvatarConfig {
    fn default() -> Self {
        AvatarPreset::Standard.config()
    }
}

impl AvatarConfig {
    /// Initial control values implied by this configuration.
    pub fn initial_controls(&self) -> AvatarControls {
        AvatarControls {
            smoothness: self.blend.smoothness,
            intensity: self.blend.intensity,
            animation_speed: self.animation_speed,
            ..AvatarControls::default()
        }
        .sanitized()
    }
}

/// The two avatar variants the application ships.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AvatarPreset {
    /// Skeleton already uses the clip's bone names; prefixes are stripped and
    /// tracks bound as-is.
    Standard,
    /// Mixamo clip on a differently named rig, with the shoulder/arm fix.
    Retargeted,
}

impl AvatarPreset {
    pub fn config(self) -> AvatarConfig {
        match self {
            AvatarPreset::Standard => AvatarConfig {
                blend: BlendConfig::default(),
                player: PlayerConfig::default(),
                bone_map: BoneNameMap::identity(),
                corrections: PoseCorrectionSet::new(),
                phonemes: PhonemeMap::rhubarb(),
                animation_speed: 1.0,
                diagnostics: DiagnosticsCfg::default(),
            },
            AvatarPreset::Retargeted => AvatarConfig {
                blend: BlendConfig::default(),
                player: PlayerConfig {
                    fade_in: 0.5,
                    ..PlayerConfig::default()
                },
                bone_map: BoneNameMap::mixamo(),
                corrections: PoseCorrectionSet::shoulder_fix(),
                phonemes: PhonemeMap::rhubarb(),
                animation_speed: 0.53,
                diagnostics: DiagnosticsCfg::default(),
            },
        }
    }
}
