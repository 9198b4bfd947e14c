//! avatar-orchestrator
//!
//! Composes one avatar per frame: the retargeted idle clip and static pose
//! corrections on the skeleton, then viseme blending from the audio clock into
//! the face meshes. Hosts own the scene graph, decoding and audio output; they
//! hand in a skeleton, morph meshes and a clock, call [`Avatar::step`] once
//! per rendered frame and push the resulting bone transforms and
//! [`AvatarFrame::morph_writes`] into their engine.

pub mod config;
pub mod controllers;
pub mod controls;
pub mod diagnostics;
pub mod library;
pub mod scheduler;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use avatar_animation_core::{Clip, RetargetCache, RetargetReport, Skeleton};
use avatar_api_core::WriteBatch;
use avatar_lipsync_core::{
    AudioClock, ChannelWeights, CueTrack, GateAction, ManualClock, MorphMesh, PlaybackGate,
};

pub use crate::config::{AvatarConfig, AvatarPreset};
pub use crate::controllers::{AnimationController, LipsyncController};
pub use crate::controls::AvatarControls;
pub use crate::diagnostics::DiagnosticsCfg;
pub use crate::library::{AssetLibrary, LibraryError};

/// Everything one call to [`Avatar::step`] produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvatarFrame {
    pub epoch: u64,
    pub dt: f32,
    /// Clock position the blend step used.
    pub audio_time: f32,
    /// Index of the cue that drove the blend, if any.
    pub active_cue: Option<usize>,
    pub weights: ChannelWeights,
    pub bones_animated: usize,
    pub corrections_applied: usize,
    pub morph_slots_written: usize,
    /// One write per morph slot, addressed `"<mesh>.morphTargetInfluences[<viseme>]"`.
    pub morph_writes: WriteBatch,
}

#[derive(Debug)]
pub struct Avatar<C: AudioClock = ManualClock> {
    pub skeleton: Skeleton,
    pub meshes: Vec<MorphMesh>,
    pub clock: C,
    pub anim: AnimationController,
    pub lipsync: LipsyncController,
    cfg: AvatarConfig,
    controls: AvatarControls,
    gate: PlaybackGate,
    /// Script whose cue track is currently loaded from the library.
    cue_script: Option<String>,
    epoch: u64,
}

impl<C: AudioClock> Avatar<C> {
    pub fn new(cfg: AvatarConfig, skeleton: Skeleton, meshes: Vec<MorphMesh>, clock: C) -> Self {
        let controls = cfg.initial_controls();
        let mut player = cfg.player.clone();
        player.time_scale = controls.animation_speed;
        let mut blend = cfg.blend;
        blend.smoothness = controls.smoothness;
        blend.intensity = controls.intensity;

        let mut anim = AnimationController::new(
            player,
            RetargetCache::new(cfg.bone_map.clone()),
            cfg.corrections.clone(),
        );
        if controls.play_animation {
            anim.player.play();
        }
        let lipsync = LipsyncController::new(cfg.phonemes.clone(), blend);

        Self {
            skeleton,
            meshes,
            clock,
            anim,
            lipsync,
            cfg,
            controls,
            gate: PlaybackGate::new(),
            cue_script: None,
            epoch: 0,
        }
    }

    pub fn from_preset(
        preset: AvatarPreset,
        skeleton: Skeleton,
        meshes: Vec<MorphMesh>,
        clock: C,
    ) -> Self {
        Self::new(preset.config(), skeleton, meshes, clock)
    }

    pub fn config(&self) -> &AvatarConfig {
        &self.cfg
    }

    pub fn controls(&self) -> &AvatarControls {
        &self.controls
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Bind `clip` as the idle animation (retargeted through the configured
    /// bone map, memoized per clip/skeleton identity).
    pub fn set_idle_clip(&mut self, clip: &Clip) -> RetargetReport {
        self.anim.bind_clip(clip, &self.skeleton, &self.cfg.diagnostics)
    }

    /// Bind a library clip by name.
    pub fn set_idle_clip_named(
        &mut self,
        library: &AssetLibrary,
        name: &str,
    ) -> Result<RetargetReport> {
        let clip = library.require_clip(name)?;
        Ok(self.set_idle_clip(clip))
    }

    /// Swap the cue track between frames.
    pub fn set_cues(&mut self, cues: Option<CueTrack>) {
        self.lipsync.set_cues(cues);
    }

    pub fn set_blending_enabled(&mut self, enabled: bool) {
        self.lipsync.set_enabled(enabled);
        if !enabled {
            self.cue_script = None;
        }
    }

    /// Apply a full set of control values. Audio play/pause and script
    /// changes go through the playback gate; a new script also swaps in its
    /// cue track from `library`. Returns what the gate did to the clock.
    pub fn apply_controls(
        &mut self,
        controls: &AvatarControls,
        library: &AssetLibrary,
    ) -> GateAction {
        let next = controls.sanitized();

        if self.lipsync.is_enabled() && self.cue_script.as_deref() != Some(next.script.as_str()) {
            let cues = library.cues(&next.script).cloned();
            if cues.is_none() {
                log::warn!("no cue track for script '{}'", next.script);
            }
            self.lipsync.set_cues(cues);
            self.cue_script = Some(next.script.clone());
        }

        let mut blend = *self.lipsync.engine().config();
        blend.smoothness = next.smoothness;
        blend.intensity = next.intensity;
        self.lipsync.set_config(blend);

        self.anim.player.set_time_scale(next.animation_speed);
        match (self.controls.play_animation, next.play_animation) {
            (false, true) => self.anim.player.play(),
            (true, false) => self.anim.player.stop(),
            _ => {}
        }

        let action = self.gate.sync(next.play_audio, &next.script, &mut self.clock);
        self.controls = next;
        action
    }

    /// Advance one frame. See [`scheduler`] for the ordering.
    pub fn step(&mut self, dt: f32) -> AvatarFrame {
        self.epoch = self.epoch.wrapping_add(1);
        scheduler::run_frame(self, dt)
    }
}
