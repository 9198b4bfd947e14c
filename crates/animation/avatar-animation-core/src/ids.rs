//! Identifiers and a simple allocator for clips and skeletons.
//!
//! Ids give retargeting a cheap identity key: a retargeted clip is memoized per
//! (source clip, target skeleton) pair and a fresh id on either side misses.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU32, Ordering};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct ClipId(pub u32);

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct SkeletonId(pub u32);

static NEXT_CLIP: AtomicU32 = AtomicU32::new(0);
static NEXT_SKELETON: AtomicU32 = AtomicU32::new(0);

/// Allocator for ClipId and SkeletonId.
///
/// Counters are process-wide: ids from two allocators never collide, so a
/// retarget cache shared across asset libraries cannot confuse their clips.
#[derive(Default, Debug)]
pub struct IdAllocator {
    _private: (),
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn alloc_clip(&mut self) -> ClipId {
        ClipId(NEXT_CLIP.fetch_add(1, Ordering::Relaxed))
    }

    #[inline]
    pub fn alloc_skeleton(&mut self) -> SkeletonId {
        SkeletonId(NEXT_SKELETON.fetch_add(1, Ordering::Relaxed))
    }
}
