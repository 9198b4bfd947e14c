//! Audio playback clock and the play/pause gate.
//!
//! The blending step only ever reads `position()`. Decoding and output belong
//! to the host; [`ManualClock`] stands in for it in tests and headless runs.

/// Playback position source the blending step is driven by.
pub trait AudioClock {
    /// Current position in seconds.
    fn position(&self) -> f32;
    fn set_position(&mut self, seconds: f32);
    fn play(&mut self);
    fn pause(&mut self);
    fn is_playing(&self) -> bool;
}

/// Clock advanced explicitly by the host.
///
/// With a `duration` set, playback stops at the end and the position holds
/// there, like a media element reaching `ended`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ManualClock {
    position: f32,
    playing: bool,
    duration: Option<f32>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_duration(duration: f32) -> Self {
        Self {
            duration: Some(duration.max(0.0)),
            ..Self::default()
        }
    }

    pub fn duration(&self) -> Option<f32> {
        self.duration
    }

    /// Move forward by `dt` seconds if playing.
    pub fn advance(&mut self, dt: f32) {
        if !self.playing || !dt.is_finite() || dt <= 0.0 {
            return;
        }
        self.position += dt;
        if let Some(d) = self.duration {
            if self.position >= d {
                self.position = d;
                self.playing = false;
            }
        }
    }
}

impl AudioClock for ManualClock {
    fn position(&self) -> f32 {
        self.position
    }

    fn set_position(&mut self, seconds: f32) {
        let s = if seconds.is_finite() { seconds.max(0.0) } else { 0.0 };
        self.position = match self.duration {
            Some(d) => s.min(d),
            None => s,
        };
    }

    fn play(&mut self) {
        self.playing = true;
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn is_playing(&self) -> bool {
        self.playing
    }
}

/// What [`PlaybackGate::sync`] did to the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateAction {
    Unchanged,
    /// Position reset to 0, then playing.
    Restarted,
    Paused,
}

/// Translates the (play flag, script) control pair into clock commands.
///
/// Any change of the pair while the flag is on restarts the clip from 0;
/// turning the flag off pauses. A script change while paused rewinds to 0.
/// Re-sending the same pair does nothing.
#[derive(Debug, Clone, Default)]
pub struct PlaybackGate {
    last: Option<(bool, String)>,
}

impl PlaybackGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sync<C: AudioClock + ?Sized>(
        &mut self,
        play: bool,
        script: &str,
        clock: &mut C,
    ) -> GateAction {
        if let Some((p, s)) = &self.last {
            if *p == play && s == script {
                return GateAction::Unchanged;
            }
        }
        let script_changed = self.last.as_ref().map_or(true, |(_, s)| s != script);
        self.last = Some((play, script.to_string()));
        if play {
            clock.set_position(0.0);
            clock.play();
            log::debug!("audio '{script}' restarted");
            GateAction::Restarted
        } else {
            // a new script starts from its beginning even while paused
            if script_changed {
                clock.set_position(0.0);
            }
            clock.pause();
            GateAction::Paused
        }
    }

    /// Forget the last inputs so the next `sync` always acts.
    pub fn reset(&mut self) {
        self.last = None;
    }
}
