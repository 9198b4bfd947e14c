use avatar_api_core::WriteBatch;
use avatar_lipsync_core::{
    apply_weights_recorded, BlendConfig, BlendEngine, ChannelWeights, CueTrack, MorphMesh,
    PhonemeMap,
};

/// Face side of an avatar: the cue slot, the blend engine and the morph
/// write-out.
#[derive(Debug)]
pub struct LipsyncController {
    engine: BlendEngine,
    cues: Option<CueTrack>,
    enabled: bool,
}

/// Result of one lip-sync step.
#[derive(Debug, Clone, Default)]
pub struct LipsyncOutput {
    pub weights: ChannelWeights,
    pub active_cue: Option<usize>,
    pub writes: WriteBatch,
    pub slots_written: usize,
}

impl LipsyncController {
    pub fn new(phonemes: PhonemeMap, cfg: BlendConfig) -> Self {
        Self {
            engine: BlendEngine::new(phonemes, cfg),
            cues: None,
            enabled: true,
        }
    }

    /// Replace the whole cue track. `None` means no cue data; channels then
    /// relax toward 0.
    pub fn set_cues(&mut self, cues: Option<CueTrack>) {
        self.cues = cues;
    }

    pub fn cues(&self) -> Option<&CueTrack> {
        self.cues.as_ref()
    }

    /// Disabling discards the cue track and zeroes every channel.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.cues = None;
            self.engine.clear();
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_config(&mut self, cfg: BlendConfig) {
        self.engine.set_config(cfg);
    }

    pub fn engine(&self) -> &BlendEngine {
        &self.engine
    }

    /// One blending step at `audio_time`, then the morph write-out.
    pub fn step(&mut self, audio_time: f32, dt: f32, meshes: &mut [MorphMesh]) -> LipsyncOutput {
        let mut out = LipsyncOutput::default();
        if self.enabled {
            out.weights = *self.engine.step(self.cues.as_ref(), audio_time, dt);
            out.active_cue = self.engine.active_cue();
        } else {
            out.weights = *self.engine.weights();
        }
        out.slots_written = apply_weights_recorded(meshes, &out.weights, &mut out.writes);
        out
    }
}
