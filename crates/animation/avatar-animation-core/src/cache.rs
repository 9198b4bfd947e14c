//! Memoized retargeting.
//!
//! A cache owns one bone-name map and remembers the retargeted clip for each
//! (source clip, target skeleton) identity pair. Clips or skeletons without an
//! id are retargeted on every call and never stored.

use hashbrown::HashMap;

use crate::data::Clip;
use crate::ids::{ClipId, SkeletonId};
use crate::retarget::{retarget, BoneNameMap, RetargetedClip};
use crate::skeleton::Skeleton;

#[derive(Debug, Default)]
pub struct RetargetCache {
    map: BoneNameMap,
    entries: HashMap<(ClipId, SkeletonId), RetargetedClip>,
    hits: u64,
    misses: u64,
}

impl RetargetCache {
    pub fn new(map: BoneNameMap) -> Self {
        Self {
            map,
            entries: HashMap::new(),
            hits: 0,
            misses: 0,
        }
    }

    pub fn bone_map(&self) -> &BoneNameMap {
        &self.map
    }

    /// Retargeted clip for `source` on `target`, computed at most once per
    /// identity pair.
    pub fn get_or_retarget(&mut self, source: &Clip, target: &Skeleton) -> RetargetedClip {
        let (clip_id, skeleton_id) = match (source.id, target.id) {
            (Some(c), Some(s)) => (c, s),
            _ => {
                log::debug!(
                    "retarget cache bypassed for '{}': clip or skeleton has no id",
                    source.name
                );
                return retarget(source, target, &self.map);
            }
        };
        if let Some(hit) = self.entries.get(&(clip_id, skeleton_id)) {
            self.hits += 1;
            return hit.clone();
        }
        self.misses += 1;
        log::debug!(
            "retarget cache miss for clip {:?} on skeleton {:?}",
            clip_id,
            skeleton_id
        );
        let out = retarget(source, target, &self.map);
        self.entries.insert((clip_id, skeleton_id), out.clone());
        out
    }

    /// Drop every entry derived from `clip`.
    pub fn invalidate_clip(&mut self, clip: ClipId) {
        self.entries.retain(|(c, _), _| *c != clip);
    }

    /// Drop every entry derived from `skeleton`.
    pub fn invalidate_skeleton(&mut self, skeleton: SkeletonId) {
        self.entries.retain(|(_, s), _| *s != skeleton);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// (hits, misses) since construction.
    pub fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }
}
