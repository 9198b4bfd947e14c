//! Single-clip player for the idle loop.
//!
//! The player owns a shared, immutable clip and a playback cursor. Each
//! `update` advances the cursor, samples every track and writes the result
//! into the matching bone of the skeleton. With a fade-in configured, the clip
//! weight ramps from 0 to 1 and the pose is blended from each bone's rest
//! transform. Tracks whose bone is missing are skipped; an empty clip is a
//! no-op.

use std::sync::Arc;

use crate::config::{LoopMode, PlayerConfig};
use crate::data::Clip;
use crate::interp::functions::{lerp_vec3, nlerp_quat};
use crate::sampling::sample_track;
use crate::skeleton::{Bone, Skeleton};
use avatar_api_core::Value;

fn fmod(a: f32, b: f32) -> f32 {
    if b == 0.0 {
        return 0.0;
    }
    let m = a % b;
    if (m < 0.0 && b > 0.0) || (m > 0.0 && b < 0.0) {
        m + b
    } else {
        m
    }
}

#[derive(Debug, Default)]
pub struct ClipPlayer {
    clip: Option<Arc<Clip>>,
    cfg: PlayerConfig,
    time: f32,
    fade_elapsed: f32,
    playing: bool,
}

impl ClipPlayer {
    pub fn new(cfg: PlayerConfig) -> Self {
        Self {
            clip: None,
            cfg,
            time: 0.0,
            fade_elapsed: 0.0,
            playing: false,
        }
    }

    /// Swap the clip. The cursor restarts; the playing flag is kept.
    pub fn set_clip(&mut self, clip: Option<Arc<Clip>>) {
        self.clip = clip;
        self.time = 0.0;
        self.fade_elapsed = 0.0;
    }

    pub fn clip(&self) -> Option<&Arc<Clip>> {
        self.clip.as_ref()
    }

    /// Reset to the start and play (restarts the fade-in).
    pub fn play(&mut self) {
        self.time = 0.0;
        self.fade_elapsed = 0.0;
        self.playing = true;
    }

    pub fn stop(&mut self) {
        self.playing = false;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn set_time_scale(&mut self, time_scale: f32) {
        self.cfg.time_scale = time_scale;
    }

    pub fn set_loop_mode(&mut self, mode: LoopMode) {
        self.cfg.loop_mode = mode;
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.cfg
    }

    /// Unwrapped playback time in seconds.
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Current clip weight in [0,1] (fade-in progress).
    pub fn weight(&self) -> f32 {
        if self.cfg.fade_in <= 0.0 {
            1.0
        } else {
            (self.fade_elapsed / self.cfg.fade_in).clamp(0.0, 1.0)
        }
    }

    /// Cursor mapped into the clip's [0, duration] range under the loop mode.
    pub fn local_time(&self) -> f32 {
        let duration = self.clip.as_ref().map(|c| c.duration).unwrap_or(0.0);
        if duration <= 0.0 {
            return 0.0;
        }
        match self.cfg.loop_mode {
            LoopMode::Once => self.time.clamp(0.0, duration),
            LoopMode::Repeat => fmod(self.time, duration),
        }
    }

    /// Advance by `dt` seconds and write the sampled pose into `skeleton`.
    /// Returns the number of tracks applied.
    pub fn update(&mut self, dt: f32, skeleton: &mut Skeleton) -> usize {
        if !self.playing {
            return 0;
        }
        let clip = match &self.clip {
            Some(c) => Arc::clone(c),
            None => return 0,
        };
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.time += dt * self.cfg.time_scale;
        self.fade_elapsed += dt;

        let t = self.local_time();
        let weight = self.weight();
        let mut applied = 0;
        for track in &clip.tracks {
            let path = match track.path() {
                Ok(p) => p,
                Err(_) => continue,
            };
            let bone = match skeleton.bone_mut(&path.node) {
                Some(b) => b,
                None => continue,
            };
            let value = match sample_track(track, t) {
                Some(v) => v,
                None => continue,
            };
            if apply_property(bone, &path.property, &value, weight) {
                applied += 1;
            }
        }
        applied
    }
}

/// Write one sampled value into a bone property, blended from rest by `w`.
fn apply_property(bone: &mut Bone, property: &str, value: &Value, w: f32) -> bool {
    match (property, value) {
        ("position", Value::Vec3(p)) => {
            bone.local.position = lerp_vec3(bone.rest.position, *p, w);
            true
        }
        ("scale", Value::Vec3(s)) => {
            bone.local.scale = lerp_vec3(bone.rest.scale, *s, w);
            true
        }
        ("quaternion", Value::Quat(q)) => {
            let q = nlerp_quat(bone.rest.quaternion, *q, w);
            bone.set_quaternion(q);
            true
        }
        ("rotation", Value::Vec3(e)) => {
            let e = lerp_vec3(bone.rest.rotation, *e, w);
            bone.set_rotation(e);
            true
        }
        _ => false,
    }
}
