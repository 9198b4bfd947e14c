//! Canonical clip data model.
//!
//! A clip is a named, fixed-duration list of keyframe tracks. Each track is
//! bound by a `"<bone>.<property>"` identifier (see [`TrackPath`]) and holds
//! keyframe times in seconds with one [`Value`] per key.

use serde::{Deserialize, Serialize};

use crate::ids::ClipId;
use avatar_api_core::{PathError, TrackPath, Value};

/// One keyframe track bound to a bone property.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Track {
    /// Binding identifier, e.g. "mixamorigHips.quaternion".
    pub name: String,
    /// Key times in seconds, non-decreasing.
    pub times: Vec<f32>,
    /// One value per key time.
    pub values: Vec<Value>,
}

impl Track {
    pub fn new(name: impl Into<String>, times: Vec<f32>, values: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            times,
            values,
        }
    }

    /// Parse the binding identifier into bone and property.
    pub fn path(&self) -> Result<TrackPath, PathError> {
        TrackPath::parse(&self.name)
    }

    /// Clone of this track under a different binding identifier.
    pub fn renamed(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            times: self.times.clone(),
            values: self.values.clone(),
        }
    }

    #[inline]
    pub fn key_count(&self) -> usize {
        self.times.len().min(self.values.len())
    }
}

/// A named, fixed-duration collection of bone tracks.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Clip {
    /// Identity assigned when the clip is registered with a library.
    #[serde(skip)]
    pub id: Option<ClipId>,
    pub name: String,
    /// Duration in seconds.
    pub duration: f32,
    pub tracks: Vec<Track>,
}

impl Clip {
    pub fn new(name: impl Into<String>, duration: f32, tracks: Vec<Track>) -> Self {
        Self {
            id: None,
            name: name.into(),
            duration,
            tracks,
        }
    }

    pub fn with_id(mut self, id: ClipId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Copy of the clip with exporter prefixes stripped from every track name.
    /// Identity is dropped since the tracks now bind differently.
    pub fn cleaned(&self) -> Self {
        Self {
            id: None,
            name: self.name.clone(),
            duration: self.duration,
            tracks: self
                .tracks
                .iter()
                .map(|t| t.renamed(crate::retarget::clean_track_name(&t.name)))
                .collect(),
        }
    }

    /// Distinct bone names referenced by the tracks, in first-seen order.
    pub fn bone_names(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for track in &self.tracks {
            let bone = match track.name.split_once('.') {
                Some((bone, _)) => bone,
                None => track.name.as_str(),
            };
            if !out.iter().any(|b| b == bone) {
                out.push(bone.to_string());
            }
        }
        out
    }

    /// Validate basic invariants (finite non-negative duration, finite
    /// non-decreasing key times, one value per key).
    pub fn validate_basic(&self) -> Result<(), String> {
        if !self.duration.is_finite() || self.duration < 0.0 {
            return Err(format!(
                "clip '{}' duration must be finite and >= 0",
                self.name
            ));
        }
        for track in &self.tracks {
            if track.times.len() != track.values.len() {
                return Err(format!(
                    "track '{}' has {} times but {} values",
                    track.name,
                    track.times.len(),
                    track.values.len()
                ));
            }
            let mut last = -f32::INFINITY;
            for &t in &track.times {
                if !t.is_finite() {
                    return Err(format!("key time must be finite for '{}'", track.name));
                }
                if t < last {
                    return Err(format!(
                        "key times must be non-decreasing for '{}'",
                        track.name
                    ));
                }
                last = t;
            }
        }
        Ok(())
    }
}
