//! Avatar Animation Core (engine-agnostic)
//!
//! Clip and skeleton data models, keyframe sampling, the retargeting engine
//! (source bone names → target skeleton), the static pose corrector and a
//! single-clip idle player. Hosts own the scene; this crate only reads and
//! writes plain bone transforms.

pub mod cache;
pub mod config;
pub mod data;
pub mod error;
pub mod ids;
pub mod interp;
pub mod player;
pub mod pose;
pub mod retarget;
pub mod sampling;
pub mod skeleton;
pub mod stored_clip;

// Re-exports for consumers (orchestrator, hosts)
pub use cache::RetargetCache;
pub use config::{LoopMode, PlayerConfig};
pub use data::{Clip, Track};
pub use error::AnimationError;
pub use ids::{ClipId, IdAllocator, SkeletonId};
pub use player::ClipPlayer;
pub use pose::{Axis, PoseCorrectionSet};
pub use retarget::{
    clean_track_name, missing_bones, retarget, BoneLookup, BoneNameMap, RetargetReport,
    RetargetedClip,
};
pub use sampling::sample_track;
pub use skeleton::{Bone, Skeleton};
pub use stored_clip::parse_clip_json;
pub use avatar_api_core::{TrackPath, Value, ValueKind};
