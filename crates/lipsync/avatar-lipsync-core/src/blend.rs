//! Viseme blending step.
//!
//! Each frame:
//! 1. find the first cue containing the audio time;
//! 2. reset every channel target to 0;
//! 3. for a mapped active cue, set its channel target to
//!    `intensity * sin(progress * PI)`;
//! 4. move every channel's current weight toward its target by
//!    `clamp(smoothness * baseline_fps * dt, 0, 1)`.
//!
//! The factor never exceeds 1, so `current` approaches `target` monotonically
//! and never overshoots. With no cue active every channel decays toward 0.

use std::f32::consts::PI;

use serde::{Deserialize, Serialize};

use crate::config::BlendConfig;
use crate::cues::CueTrack;
use crate::phoneme::PhonemeMap;
use crate::viseme::{Viseme, VISEME_COUNT};

/// One weight per viseme channel, indexed by [`Viseme::index`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ChannelWeights([f32; VISEME_COUNT]);

impl ChannelWeights {
    #[inline]
    pub fn get(&self, v: Viseme) -> f32 {
        self.0[v.index()]
    }

    #[inline]
    pub fn set(&mut self, v: Viseme, w: f32) {
        self.0[v.index()] = w;
    }

    pub fn iter(&self) -> impl Iterator<Item = (Viseme, f32)> + '_ {
        Viseme::ALL.iter().map(move |v| (*v, self.0[v.index()]))
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|w| *w == 0.0)
    }
}

/// Per-channel blending state.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BlendState {
    pub current: ChannelWeights,
    pub target: ChannelWeights,
    /// Index of the cue that drove the last step.
    pub active: Option<usize>,
}

/// Bell-shaped envelope over a cue: 0 at both ends, 1 at the midpoint.
#[inline]
pub fn cue_blend(progress: f32) -> f32 {
    (progress.clamp(0.0, 1.0) * PI).sin().max(0.0)
}

/// Fraction of the remaining distance covered this frame.
#[inline]
pub fn smoothing_factor(smoothness: f32, baseline_fps: f32, dt: f32) -> f32 {
    if !dt.is_finite() {
        return 0.0;
    }
    let f = smoothness * baseline_fps * dt;
    if f.is_finite() {
        f.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Pure blending step: returns the next state.
pub fn step(
    state: BlendState,
    phonemes: &PhonemeMap,
    cfg: &BlendConfig,
    cues: Option<&CueTrack>,
    audio_time: f32,
    dt: f32,
) -> BlendState {
    let mut next = BlendState {
        current: state.current,
        target: ChannelWeights::default(),
        active: None,
    };

    if let Some((index, cue)) = cues.and_then(|c| c.active(audio_time)) {
        next.active = Some(index);
        if let Some(v) = phonemes.resolve(&cue.value) {
            let blend = cue_blend(cue.progress(audio_time));
            next.target.set(v, cfg.intensity * blend);
        }
    }

    let factor = smoothing_factor(cfg.smoothness, cfg.frame_rate_baseline, dt);
    for v in Viseme::ALL {
        let cur = next.current.get(v);
        let tgt = next.target.get(v);
        next.current.set(v, cur + (tgt - cur) * factor);
    }
    next
}

/// Stateful wrapper owning the phoneme table, config and channel state.
#[derive(Debug, Clone)]
pub struct BlendEngine {
    phonemes: PhonemeMap,
    cfg: BlendConfig,
    state: BlendState,
}

impl Default for BlendEngine {
    fn default() -> Self {
        Self::new(PhonemeMap::default(), BlendConfig::default())
    }
}

impl BlendEngine {
    pub fn new(phonemes: PhonemeMap, cfg: BlendConfig) -> Self {
        Self {
            phonemes,
            cfg: cfg.clamped(),
            state: BlendState::default(),
        }
    }

    pub fn config(&self) -> &BlendConfig {
        &self.cfg
    }

    /// Takes effect on the next step; channel state is kept.
    pub fn set_config(&mut self, cfg: BlendConfig) {
        self.cfg = cfg.clamped();
    }

    pub fn phonemes(&self) -> &PhonemeMap {
        &self.phonemes
    }

    /// Advance one frame in place and return the current weights.
    pub fn step(&mut self, cues: Option<&CueTrack>, audio_time: f32, dt: f32) -> &ChannelWeights {
        self.state = step(self.state, &self.phonemes, &self.cfg, cues, audio_time, dt);
        &self.state.current
    }

    /// Same as [`BlendEngine::step`] but on caller-held state.
    pub fn step_state(
        &self,
        state: BlendState,
        cues: Option<&CueTrack>,
        audio_time: f32,
        dt: f32,
    ) -> (BlendState, ChannelWeights) {
        let next = step(state, &self.phonemes, &self.cfg, cues, audio_time, dt);
        (next, next.current)
    }

    /// Reset every channel to 0.
    pub fn clear(&mut self) {
        self.state = BlendState::default();
    }

    pub fn weights(&self) -> &ChannelWeights {
        &self.state.current
    }

    pub fn targets(&self) -> &ChannelWeights {
        &self.state.target
    }

    pub fn state(&self) -> &BlendState {
        &self.state
    }

    pub fn active_cue(&self) -> Option<usize> {
        self.state.active
    }
}
