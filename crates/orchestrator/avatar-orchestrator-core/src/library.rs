//! Asset library: idle clips and per-script cue tracks, loaded once and shared
//! by every avatar in the scene.
//!
//! Clips get a stable [`ClipId`] on insertion so retarget results can be
//! memoized per (clip, skeleton). Track names are stripped of exporter
//! prefixes on the way in.

use std::sync::Arc;

use anyhow::{Context, Result};
use hashbrown::HashMap;
use indexmap::IndexMap;
use thiserror::Error;

use avatar_animation_core::{parse_clip_json, Clip, ClipId, IdAllocator, Skeleton};
use avatar_lipsync_core::CueTrack;

#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("no clip named '{0}' in the library")]
    UnknownClip(String),
}

#[derive(Debug, Default)]
pub struct AssetLibrary {
    ids: IdAllocator,
    clips: IndexMap<String, Arc<Clip>>,
    cues: HashMap<String, CueTrack>,
}

impl AssetLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a clip under `name`, replacing any previous one. Returns its id.
    pub fn insert_clip(&mut self, name: impl Into<String>, clip: Clip) -> ClipId {
        let id = self.ids.alloc_clip();
        let clip = clip.cleaned().with_id(id);
        self.clips.insert(name.into(), Arc::new(clip));
        id
    }

    /// Parse a clip JSON document and store it under `name`.
    pub fn load_clip_json(&mut self, name: &str, json: &str) -> Result<ClipId> {
        let clip = parse_clip_json(json).with_context(|| format!("loading clip '{name}'"))?;
        Ok(self.insert_clip(name, clip))
    }

    pub fn clip(&self, name: &str) -> Option<&Arc<Clip>> {
        self.clips.get(name)
    }

    pub fn require_clip(&self, name: &str) -> Result<&Arc<Clip>> {
        self.clip(name)
            .ok_or_else(|| LibraryError::UnknownClip(name.to_string()).into())
    }

    /// Clip names in insertion order.
    pub fn clip_names(&self) -> impl Iterator<Item = &str> {
        self.clips.keys().map(String::as_str)
    }

    /// Give a skeleton an identity so its retarget results can be cached.
    pub fn register_skeleton(&mut self, skeleton: Skeleton) -> Skeleton {
        let id = self.ids.alloc_skeleton();
        skeleton.with_id(id)
    }

    pub fn insert_cues(&mut self, script: impl Into<String>, track: CueTrack) {
        self.cues.insert(script.into(), track);
    }

    /// Strict cue load: malformed documents are an error.
    pub fn load_cues_json(&mut self, script: &str, json: &str) -> Result<()> {
        let track =
            CueTrack::from_json(json).with_context(|| format!("loading cues for '{script}'"))?;
        self.insert_cues(script, track);
        Ok(())
    }

    /// Lenient cue load: a malformed document removes any previous track for
    /// the script. Returns whether a track is now present.
    pub fn load_cues_lenient(&mut self, script: &str, json: &str) -> bool {
        match CueTrack::from_json_lenient(json) {
            Some(track) => {
                self.insert_cues(script, track);
                true
            }
            None => {
                self.cues.remove(script);
                false
            }
        }
    }

    pub fn cues(&self, script: &str) -> Option<&CueTrack> {
        self.cues.get(script)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLIP: &str = r#"{ "name": "mixamo.com", "duration": 1.0, "tracks": [
        { "name": "mixamo.com|mixamorigHips.position", "type": "vector",
          "times": [0], "values": [0, 1, 0] }
    ]}"#;

    #[test]
    fn clips_are_cleaned_and_identified() {
        let mut lib = AssetLibrary::new();
        let a = lib.load_clip_json("stand", CLIP).unwrap();
        let b = lib.load_clip_json("stand-again", CLIP).unwrap();
        assert_ne!(a, b);
        let clip = lib.clip("stand").unwrap();
        assert_eq!(clip.id, Some(a));
        assert_eq!(clip.tracks[0].name, "mixamorigHips.position");
        assert_eq!(lib.clip_names().collect::<Vec<_>>(), ["stand", "stand-again"]);
    }

    #[test]
    fn unknown_clip_is_an_error() {
        let lib = AssetLibrary::new();
        let err = lib.require_clip("nope").unwrap_err();
        assert!(err.to_string().contains("nope"));
    }

    #[test]
    fn lenient_cue_load_drops_stale_track() {
        let mut lib = AssetLibrary::new();
        assert!(lib.load_cues_lenient("audio_1", r#"{ "mouthCues": [] }"#));
        assert!(lib.cues("audio_1").is_some());
        assert!(!lib.load_cues_lenient("audio_1", "{"));
        assert!(lib.cues("audio_1").is_none());
        assert!(lib.load_cues_json("audio_2", "{").is_err());
    }
}
