//! Footstep Audio
//!
//! Turns `Footstep` notifications into playback cues. A single footstep
//! clip is modelled as a voice that is busy for `clip_duration` seconds;
//! a footstep arriving while the voice is still busy is dropped rather
//! than stacked on top of it.
//!
//! The player does not own an audio device. Hosts drain the accepted cues
//! with [`FootstepPlayer::drain_cues`] and hand them to whatever plays
//! sound on their platform.

use crate::player::events::ControlListener;

/// Default length of the footstep clip in seconds
pub const FOOTSTEP_CLIP_DURATION: f32 = 0.3;
/// Default footstep playback volume
pub const FOOTSTEP_VOLUME: f32 = 0.3;

/// A footstep that should be played now.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FootstepCue {
    /// Player clock time the cue was accepted at
    pub at: f32,
    pub volume: f32,
}

/// De-duplicating footstep voice.
#[derive(Debug, Clone)]
pub struct FootstepPlayer {
    clip_duration: f32,
    volume: f32,
    /// Seconds since the player was created
    clock: f32,
    /// Clock time the current clip finishes, if one is playing
    busy_until: Option<f32>,
    muted: bool,
    cues: Vec<FootstepCue>,
    dropped: usize,
}

impl Default for FootstepPlayer {
    fn default() -> Self {
        Self::new(FOOTSTEP_CLIP_DURATION, FOOTSTEP_VOLUME)
    }
}

impl FootstepPlayer {
    pub fn new(clip_duration: f32, volume: f32) -> Self {
        Self {
            clip_duration: clip_duration.max(0.0),
            volume: volume.clamp(0.0, 1.0),
            clock: 0.0,
            busy_until: None,
            muted: false,
            cues: Vec::new(),
            dropped: 0,
        }
    }

    /// Advance the player clock.
    pub fn advance(&mut self, dt: f32) {
        if dt.is_finite() && dt > 0.0 {
            self.clock += dt;
        }
        if self.busy_until.is_some_and(|end| self.clock >= end) {
            self.busy_until = None;
        }
    }

    /// Whether the clip is still playing.
    #[inline]
    pub fn is_playing(&self) -> bool {
        self.busy_until.is_some()
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    #[inline]
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Try to start the clip now. Returns `false` if it was dropped.
    pub fn play(&mut self) -> bool {
        if self.muted || self.is_playing() {
            self.dropped += 1;
            log::trace!("footstep dropped at {:.3}s", self.clock);
            return false;
        }
        self.busy_until = Some(self.clock + self.clip_duration);
        self.cues.push(FootstepCue {
            at: self.clock,
            volume: self.volume,
        });
        true
    }

    /// Footsteps dropped so far.
    #[inline]
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Take the accepted cues since the last drain.
    pub fn drain_cues(&mut self) -> Vec<FootstepCue> {
        std::mem::take(&mut self.cues)
    }
}

impl ControlListener for FootstepPlayer {
    fn on_footstep(&mut self) {
        self.play();
    }

    fn on_pause(&mut self, paused: bool) {
        self.set_muted(paused);
    }
}
