//! Keyframe track sampling.
//!
//! Model:
//! - Each Track has keys at absolute times (seconds), non-decreasing.
//! - Between two keys the value is blended linearly (vectors, scalars) or by
//!   shortest-arc NLERP (quaternions).
//! - Before the first key / after the last key the end value is held.
//! - Mismatched neighbouring kinds fall back to holding the left key.

use crate::data::Track;
use crate::interp::functions::{lerp_f32, lerp_vec3, nlerp_quat};
use avatar_api_core::Value;

/// Find the key segment [i, i+1] containing time `t` and the local blend
/// factor. Returns (i, i, 0) when `t` is outside the key range or only one
/// key exists.
fn find_segment(times: &[f32], t: f32) -> (usize, usize, f32) {
    let n = times.len();
    if n <= 1 || t <= times[0] {
        return (0, 0, 0.0);
    }
    if t >= times[n - 1] {
        return (n - 1, n - 1, 0.0);
    }
    // First key strictly after t; the segment ends there.
    let hi = times.partition_point(|&k| k <= t);
    let lo = hi - 1;
    let denom = (times[hi] - times[lo]).max(f32::EPSILON);
    (lo, hi, ((t - times[lo]) / denom).clamp(0.0, 1.0))
}

fn blend(left: &Value, right: &Value, u: f32) -> Value {
    match (left, right) {
        (Value::Float(a), Value::Float(b)) => Value::Float(lerp_f32(*a, *b, u)),
        (Value::Vec3(a), Value::Vec3(b)) => Value::Vec3(lerp_vec3(*a, *b, u)),
        (Value::Quat(a), Value::Quat(b)) => Value::Quat(nlerp_quat(*a, *b, u)),
        (Value::Vector(a), Value::Vector(b)) if a.len() == b.len() => Value::Vector(
            a.iter()
                .zip(b.iter())
                .map(|(x, y)| lerp_f32(*x, *y, u))
                .collect(),
        ),
        _ => left.clone(),
    }
}

/// Sample a track at absolute time `t` (seconds). Returns `None` for a track
/// without keys.
pub fn sample_track(track: &Track, t: f32) -> Option<Value> {
    let n = track.key_count();
    if n == 0 {
        return None;
    }
    let times = &track.times[..n];
    let (i0, i1, u) = find_segment(times, t);
    if i0 == i1 {
        return Some(track.values[i0].clone());
    }
    Some(blend(&track.values[i0], &track.values[i1], u))
}
