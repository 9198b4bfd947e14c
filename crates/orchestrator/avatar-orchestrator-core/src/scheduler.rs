//! Frame ordering.
//!
//! The body must settle before the face is written, and the pose corrections
//! must land after the clip so they win:
//!   clip player -> pose corrections -> audio clock -> blend step -> morph write

use avatar_lipsync_core::AudioClock;

use crate::{Avatar, AvatarFrame};

pub fn run_frame<C: AudioClock>(avatar: &mut Avatar<C>, dt: f32) -> AvatarFrame {
    let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

    // Body: clip then corrections
    let (bones_animated, corrections_applied) = avatar.anim.update(dt, &mut avatar.skeleton);

    // Face: sample the clock once, then blend and write
    let audio_time = avatar.clock.position();
    let lips = avatar.lipsync.step(audio_time, dt, &mut avatar.meshes);

    AvatarFrame {
        epoch: avatar.epoch,
        dt,
        audio_time,
        active_cue: lips.active_cue,
        weights: lips.weights,
        bones_animated,
        corrections_applied,
        morph_slots_written: lips.slots_written,
        morph_writes: lips.writes,
    }
}
