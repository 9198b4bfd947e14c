//! avatar-api-core: values, track paths and per-frame write batches shared by
//! the animation, lip-sync and orchestrator crates (engine-agnostic).

pub mod track_path;
pub mod value;
pub mod write_ops;

pub use track_path::{PathError, TrackPath};
pub use value::{Value, ValueKind};
pub use write_ops::{WriteBatch, WriteOp};
