use serde::Deserialize;

use crate::data::{Clip, Track};
use crate::error::AnimationError;
use avatar_api_core::{TrackPath, Value};

/// Public API: parse keyframe-clip JSON (the `AnimationClip.toJSON()` layout:
/// flat `values` arrays whose stride follows the track `type`) into the
/// canonical [`Clip`].
///
/// Notes:
/// - `duration` is in seconds; a negative value means "derive from the last key".
/// - `type` is one of `quaternion` (stride 4), `vector` (stride 3) or
///   `number` (stride 1). Unknown types are rejected.
/// - Track names must parse as `"<bone>.<property>"` paths.
pub fn parse_clip_json(s: &str) -> Result<Clip, AnimationError> {
    let raw: StoredClip = serde_json::from_str(s)?;

    let mut tracks: Vec<Track> = Vec::with_capacity(raw.tracks.len());
    let mut last_key = 0.0f32;
    for st in raw.tracks {
        TrackPath::parse(&st.name).map_err(|e| AnimationError::InvalidTrackName {
            name: st.name.clone(),
            reason: e.to_string(),
        })?;
        let stride = match st.kind.as_str() {
            "quaternion" => 4,
            "vector" => 3,
            "number" => 1,
            other => {
                return Err(AnimationError::UnknownTrackType {
                    track: st.name.clone(),
                    kind: other.to_string(),
                })
            }
        };
        if st.values.len() != st.times.len() * stride {
            return Err(AnimationError::ValueCountMismatch {
                track: st.name.clone(),
                times: st.times.len(),
                values: st.values.len(),
                stride,
            });
        }
        let values: Vec<Value> = st
            .values
            .chunks_exact(stride)
            .map(|c| match stride {
                4 => Value::Quat([c[0], c[1], c[2], c[3]]),
                3 => Value::Vec3([c[0], c[1], c[2]]),
                _ => Value::Float(c[0]),
            })
            .collect();
        if let Some(&t) = st.times.last() {
            last_key = last_key.max(t);
        }
        tracks.push(Track::new(st.name, st.times, values));
    }

    let duration = if raw.duration < 0.0 {
        last_key
    } else {
        raw.duration
    };
    let clip = Clip::new(raw.name, duration, tracks);
    clip.validate_basic()
        .map_err(|reason| AnimationError::InvalidClip {
            clip: clip.name.clone(),
            reason,
        })?;
    Ok(clip)
}

// ----- JSON schema (serde) -----

#[derive(Debug, Deserialize)]
struct StoredClip {
    pub name: String,
    #[serde(default = "derive_duration")]
    pub duration: f32,
    #[serde(default)]
    pub tracks: Vec<StoredTrack>,
}

fn derive_duration() -> f32 {
    -1.0
}

#[derive(Debug, Deserialize)]
struct StoredTrack {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub times: Vec<f32>,
    pub values: Vec<f32>,
}
