//! Retargeting: rebind a clip authored for one bone-naming convention onto a
//! differently named target skeleton.
//!
//! Each source track `"<bone>.<property>"` is resolved through a [`BoneNameMap`]
//! (identity fallback for bones the map does not mention) and kept only when
//! the resolved bone exists on the target. Unresolved tracks are dropped with a
//! diagnostic; partial retargeting is a supported degraded mode, never an error.
//! Neither the source clip nor the target skeleton is mutated.

use std::sync::Arc;

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::data::{Clip, Track};
use crate::skeleton::Skeleton;

/// Name lookup on a target skeleton. Hosts with their own bone graph can
/// implement this instead of building a [`Skeleton`].
pub trait BoneLookup {
    fn has_bone(&self, name: &str) -> bool;
}

impl BoneLookup for Skeleton {
    fn has_bone(&self, name: &str) -> bool {
        self.contains(name)
    }
}

/// Source bone name → target bone name. Not required to be total.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BoneNameMap {
    map: HashMap<String, String>,
}

const MIXAMO_BONES: [&str; 22] = [
    "Hips",
    "Spine",
    "Spine1",
    "Spine2",
    "Neck",
    "Head",
    "LeftShoulder",
    "LeftArm",
    "LeftForeArm",
    "LeftHand",
    "RightShoulder",
    "RightArm",
    "RightForeArm",
    "RightHand",
    "LeftUpLeg",
    "LeftLeg",
    "LeftFoot",
    "LeftToeBase",
    "RightUpLeg",
    "RightLeg",
    "RightFoot",
    "RightToeBase",
];

impl BoneNameMap {
    /// Empty map: every bone resolves to itself.
    pub fn identity() -> Self {
        Self::default()
    }

    /// Mixamo rig (`mixamorigHips`, ...) onto the plain humanoid names used by
    /// Ready Player Me style avatars (`Hips`, ...).
    pub fn mixamo() -> Self {
        MIXAMO_BONES
            .iter()
            .map(|b| (format!("mixamorig{b}"), b.to_string()))
            .collect()
    }

    pub fn insert(&mut self, source: impl Into<String>, target: impl Into<String>) {
        self.map.insert(source.into(), target.into());
    }

    pub fn with(mut self, source: impl Into<String>, target: impl Into<String>) -> Self {
        self.insert(source, target);
        self
    }

    /// Target name for a source bone, or the source name itself.
    pub fn resolve<'a>(&'a self, source: &'a str) -> &'a str {
        self.map.get(source).map(String::as_str).unwrap_or(source)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl<S: Into<String>, T: Into<String>> FromIterator<(S, T)> for BoneNameMap {
    fn from_iter<I: IntoIterator<Item = (S, T)>>(iter: I) -> Self {
        Self {
            map: iter
                .into_iter()
                .map(|(s, t)| (s.into(), t.into()))
                .collect(),
        }
    }
}

/// What happened to the source tracks during one retarget call.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RetargetReport {
    pub kept: usize,
    pub dropped: usize,
    /// Resolved bone names the target lacked, first-seen order, no repeats.
    pub unresolved: Vec<String>,
}

impl RetargetReport {
    pub fn is_complete(&self) -> bool {
        self.dropped == 0
    }
}

/// Immutable retargeted clip plus its report. The clip is shared behind an
/// `Arc` so avatars with the same skeleton topology can reuse it.
#[derive(Clone, Debug)]
pub struct RetargetedClip {
    pub clip: Arc<Clip>,
    pub report: RetargetReport,
}

/// Strip exporter prefixes (`mixamo.com/`, `mixamo.com|`) from a track name.
pub fn clean_track_name(name: &str) -> String {
    name.replacen("mixamo.com/", "", 1)
        .replacen("mixamo.com|", "", 1)
}

fn split_track_name(name: &str) -> (&str, Option<&str>) {
    match name.split_once('.') {
        Some((bone, property)) => (bone, Some(property)),
        None => (name, None),
    }
}

/// Rebind `source` onto `target` through `map`.
///
/// The result is named `<source>_retargeted`, keeps the source duration and
/// contains only the tracks whose resolved bone exists. If nothing resolves
/// the clip is empty but still valid.
pub fn retarget(source: &Clip, target: &dyn BoneLookup, map: &BoneNameMap) -> RetargetedClip {
    let mut tracks: Vec<Track> = Vec::with_capacity(source.tracks.len());
    let mut report = RetargetReport::default();

    for track in &source.tracks {
        let (bone, property) = split_track_name(&track.name);
        let mapped = map.resolve(bone);
        if target.has_bone(mapped) {
            let name = match property {
                Some(p) => format!("{mapped}.{p}"),
                None => mapped.to_string(),
            };
            tracks.push(track.renamed(name));
            report.kept += 1;
        } else {
            report.dropped += 1;
            if !report.unresolved.iter().any(|b| b == mapped) {
                log::warn!(
                    "retarget '{}': bone '{}' not found in target skeleton",
                    source.name,
                    mapped
                );
                report.unresolved.push(mapped.to_string());
            }
        }
    }

    let clip = Clip::new(
        format!("{}_retargeted", source.name),
        source.duration,
        tracks,
    );
    RetargetedClip {
        clip: Arc::new(clip),
        report,
    }
}

/// Mapped bone names referenced by `source` that `target` lacks, first-seen
/// order. Useful for telling the user which map entries need updating.
pub fn missing_bones(source: &Clip, target: &dyn BoneLookup, map: &BoneNameMap) -> Vec<String> {
    let mut missing: Vec<String> = Vec::new();
    for bone in source.bone_names() {
        let mapped = map.resolve(&bone);
        if !target.has_bone(mapped) && !missing.iter().any(|m| m == mapped) {
            missing.push(mapped.to_string());
        }
    }
    missing
}
