//! Platter animation engine
//!
//! One `AnimationSession` binds a playback lifecycle to two periodic
//! drivers: a rotation timer accumulating the label's spin angle, and a
//! flip-book timer cycling through the platter frame sequence. Both are
//! cancel-on-drop, so replacing a session can never leak timers. All
//! animation state lives in the session (no module-level globals), which
//! keeps independent sessions isolated in tests and embedders.

pub mod timer;

use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use timer::Timer;
use tracing::debug;

/// Rotation step per tick in degrees (0.72 degrees at 60 Hz is about 7.2 RPM)
pub const ROTATION_STEP_DEGREES: f64 = 0.72;
/// Rotation timer cadence (60 ticks per second)
pub const ROTATION_TICK: Duration = Duration::from_nanos(1_000_000_000 / 60);
/// Flip-book frame interval
pub const FLIPBOOK_TICK: Duration = Duration::from_millis(50);
/// Number of platter frames in the fixed cycle
pub const PLATTER_FRAME_COUNT: usize = 30;

/// Timing and sequencing knobs for the animation engine.
#[derive(Debug, Clone, Copy)]
pub struct AnimationConfig {
    pub rotation_step_degrees: f64,
    pub rotation_tick: Duration,
    pub flipbook_tick: Duration,
    pub platter_frames: usize,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            rotation_step_degrees: ROTATION_STEP_DEGREES,
            rotation_tick: ROTATION_TICK,
            flipbook_tick: FLIPBOOK_TICK,
            platter_frames: PLATTER_FRAME_COUNT,
        }
    }
}

/// The fixed cycle of platter frame assets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatterSequence {
    len: usize,
}

impl PlatterSequence {
    pub fn new(len: usize) -> Self {
        Self { len: len.max(1) }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Asset name for a frame index: `platter000.png` .. `platter029.png`
    pub fn frame_name(&self, index: usize) -> String {
        format!("platter{:03}.png", index % self.len)
    }

    /// All frame names in cycle order, for fire-and-forget preloading.
    pub fn frame_names(&self) -> Vec<String> {
        (0..self.len).map(|i| self.frame_name(i)).collect()
    }
}

/// Playback lifecycle of the loaded record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackState {
    Idle,
    Playing,
    Paused,
}

/// Mutable animation state shared with the timer threads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationState {
    /// Accumulated rotation in degrees; grows monotonically while playing
    pub rotation_degrees: f64,
    /// Current index into the platter frame cycle
    pub frame_index: usize,
}

/// One record's animation lifecycle: owns the rotation and flip-book
/// timers and the state they drive.
#[derive(Debug)]
pub struct AnimationSession {
    config: AnimationConfig,
    sequence: PlatterSequence,
    state: Arc<Mutex<AnimationState>>,
    playback: PlaybackState,
    rotation_timer: Option<Timer>,
    flipbook_timer: Option<Timer>,
}

impl AnimationSession {
    /// Create an idle session for a freshly loaded record. Rotation starts
    /// at zero.
    pub fn new(config: AnimationConfig) -> Self {
        Self {
            sequence: PlatterSequence::new(config.platter_frames),
            config,
            state: Arc::new(Mutex::new(AnimationState {
                rotation_degrees: 0.0,
                frame_index: 0,
            })),
            playback: PlaybackState::Idle,
            rotation_timer: None,
            flipbook_timer: None,
        }
    }

    /// Playback `play` event: start (or restart) both drivers.
    pub fn on_play(&mut self) {
        self.stop_timers();

        // The flip book restarts from its first frame on every play;
        // rotation resumes from the accumulated angle.
        {
            let mut state = self.state.lock().expect("animation state poisoned");
            state.frame_index = 0;
        }

        let rotation_state = Arc::clone(&self.state);
        let step = self.config.rotation_step_degrees;
        self.rotation_timer = Some(Timer::spawn(self.config.rotation_tick, move || {
            let mut state = rotation_state.lock().expect("animation state poisoned");
            state.rotation_degrees += step;
        }));

        let flipbook_state = Arc::clone(&self.state);
        let frames = self.sequence.len();
        self.flipbook_timer = Some(Timer::spawn(self.config.flipbook_tick, move || {
            let mut state = flipbook_state.lock().expect("animation state poisoned");
            state.frame_index = (state.frame_index + 1) % frames;
        }));

        self.playback = PlaybackState::Playing;
        debug!("animation session playing");
    }

    /// Playback `pause` event: cancel both drivers, keep the angle.
    pub fn on_pause(&mut self) {
        self.stop_timers();
        self.playback = PlaybackState::Paused;
        debug!("animation session paused");
    }

    /// Playback `ended` event: cancel both drivers, back to idle.
    pub fn on_ended(&mut self) {
        self.stop_timers();
        self.playback = PlaybackState::Idle;
        debug!("animation session ended");
    }

    fn stop_timers(&mut self) {
        if let Some(mut timer) = self.rotation_timer.take() {
            timer.cancel();
        }
        if let Some(mut timer) = self.flipbook_timer.take() {
            timer.cancel();
        }
    }

    /// Snapshot of the current rotation and frame index.
    pub fn state(&self) -> AnimationState {
        *self.state.lock().expect("animation state poisoned")
    }

    pub fn playback(&self) -> PlaybackState {
        self.playback
    }

    pub fn sequence(&self) -> PlatterSequence {
        self.sequence
    }

    /// CSS rotation transform for the label image.
    pub fn rotation_transform(&self) -> String {
        format!("rotate({:.2}deg)", self.state().rotation_degrees)
    }

    /// Number of live timers (at most one rotation plus one flip book).
    pub fn active_timers(&self) -> usize {
        [&self.rotation_timer, &self.flipbook_timer]
            .into_iter()
            .flatten()
            .filter(|t| t.is_active())
            .count()
    }
}
