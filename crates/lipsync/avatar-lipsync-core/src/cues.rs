//! Cue tracks: timestamped phoneme symbols.
//!
//! Documents use the lip-sync tool's JSON export layout:
//! `{"metadata": {...}, "mouthCues": [{"start": 0.0, "end": 0.12, "value": "X"}, ...]}`.
//! Cues may overlap; lookup returns the first cue in document order whose
//! closed interval contains the query time.

use serde::{Deserialize, Serialize};

use crate::error::CueError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cue {
    pub start: f32,
    pub end: f32,
    /// Phoneme symbol.
    pub value: String,
}

impl Cue {
    pub fn new(start: f32, end: f32, value: impl Into<String>) -> Self {
        Self {
            start,
            end,
            value: value.into(),
        }
    }

    /// Zero or negative length, or a non-finite bound. Never active.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        !(self.start.is_finite() && self.end.is_finite()) || self.end <= self.start
    }

    #[inline]
    pub fn contains(&self, t: f32) -> bool {
        self.start <= t && t <= self.end
    }

    /// Normalized position of `t` inside the cue, clamped to [0,1].
    /// Degenerate cues report 0.
    pub fn progress(&self, t: f32) -> f32 {
        if self.is_degenerate() {
            return 0.0;
        }
        ((t - self.start) / (self.end - self.start)).clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CueMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sound_file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CueTrack {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<CueMetadata>,
    #[serde(rename = "mouthCues")]
    pub cues: Vec<Cue>,
}

impl CueTrack {
    pub fn new(cues: Vec<Cue>) -> Self {
        Self {
            metadata: None,
            cues,
        }
    }

    /// Parse a cue document. Cues with non-finite bounds are rejected;
    /// zero-length cues are kept and ignored at lookup time.
    pub fn from_json(s: &str) -> Result<Self, CueError> {
        let track: CueTrack = serde_json::from_str(s)?;
        if let Some((index, cue)) = track
            .cues
            .iter()
            .enumerate()
            .find(|(_, c)| !(c.start.is_finite() && c.end.is_finite()))
        {
            return Err(CueError::NonFinite {
                index,
                start: cue.start,
                end: cue.end,
            });
        }
        Ok(track)
    }

    /// Parse a cue document, treating any failure as "no cue data".
    pub fn from_json_lenient(s: &str) -> Option<Self> {
        match Self::from_json(s) {
            Ok(track) => Some(track),
            Err(e) => {
                log::warn!("discarding cue document: {e}");
                None
            }
        }
    }

    /// First cue (document order) whose interval contains `t`, with its index.
    pub fn active(&self, t: f32) -> Option<(usize, &Cue)> {
        if !t.is_finite() {
            return None;
        }
        self.cues
            .iter()
            .enumerate()
            .find(|(_, c)| !c.is_degenerate() && c.contains(t))
    }

    /// End of the last cue, or the metadata duration when present.
    pub fn duration(&self) -> f32 {
        if let Some(d) = self.metadata.as_ref().and_then(|m| m.duration) {
            return d;
        }
        self.cues
            .iter()
            .map(|c| c.end)
            .filter(|e| e.is_finite())
            .fold(0.0, f32::max)
    }

    pub fn len(&self) -> usize {
        self.cues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }
}
