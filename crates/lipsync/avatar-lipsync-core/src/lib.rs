//! Avatar Lip-sync Core (engine-agnostic)
//!
//! Turns a cue track (timestamped phoneme symbols from a lip-sync analysis
//! tool) and an audio playback clock into smoothed viseme weights, then writes
//! those weights into mesh morph-target slots. Stepped once per frame by the
//! host; no internal threading.

pub mod audio;
pub mod blend;
pub mod config;
pub mod cues;
pub mod error;
pub mod morph;
pub mod phoneme;
pub mod viseme;

pub use audio::{AudioClock, GateAction, ManualClock, PlaybackGate};
pub use blend::{cue_blend, smoothing_factor, step, BlendEngine, BlendState, ChannelWeights};
pub use config::{BlendConfig, INTENSITY_RANGE, SMOOTHNESS_RANGE};
pub use cues::{Cue, CueMetadata, CueTrack};
pub use error::CueError;
pub use morph::{apply_weights, apply_weights_recorded, MorphMesh, MorphTargets};
pub use phoneme::PhonemeMap;
pub use viseme::{Viseme, VISEME_COUNT};
