//! Sound playback system for FocusFlow.
//!
//! This module provides the alarm and music channels, including:
//!
//! - Asset resolution with a synthesized tone fallback for alarms
//! - Per-channel playback with independent volumes
//! - A coordinator that keeps music in step with the timer
//! - Graceful degradation when audio is unavailable
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │ AudioCoordinator │ ← Reacts to timer and settings changes
//! └───┬──────────┬───┘
//!     │          │
//!     ▼          ▼
//! ┌────────┐ ┌────────┐     ┌──────────────────┐
//! │ Alarm  │ │ Music  │────▶│   SoundPlayer    │
//! │channel │ │channel │     │ (rodio / silent) │
//! └────────┘ └────────┘     └──────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use focusflow::settings::Settings;
//! use focusflow::sound::{try_open_device, AudioCoordinator, SoundLibrary};
//!
//! let device = try_open_device().expect("audio device");
//! let mut audio = AudioCoordinator::new(
//!     Box::new(device.player()),
//!     Box::new(device.player()),
//!     SoundLibrary::default(),
//! );
//! audio.play_alarm(&Settings::default());
//! ```

mod channel;
mod coordinator;
mod error;
mod player;
mod source;

use std::sync::{Arc, Mutex};

pub use channel::{AudioChannel, ChannelKind};
pub use coordinator::AudioCoordinator;
pub use error::SoundError;
pub use player::{try_open_device, AudioDevice, RodioSoundPlayer};
pub use source::{default_assets_dir, SoundLibrary, SoundSource, ToneSpec};

/// Trait for a single playback channel.
///
/// This trait abstracts the sound playback functionality, allowing for
/// different implementations (e.g., rodio-based, silent, mock for testing).
pub trait SoundPlayer {
    /// Replaces the loaded source, stopping any current playback.
    ///
    /// `None` unloads the channel. Looping sources restart when they end.
    fn load(&mut self, source: Option<SoundSource>, looping: bool);

    /// Starts or resumes playback of the loaded source.
    ///
    /// This method is non-blocking; the sound plays in the background.
    ///
    /// # Errors
    ///
    /// Returns an error if nothing is loaded or the output rejects playback.
    fn play(&mut self) -> Result<(), SoundError>;

    /// Pauses playback, keeping the position.
    fn pause(&mut self);

    /// Moves the position back to the start of the source.
    fn rewind(&mut self);

    /// Sets the output volume (0.0-1.0).
    fn set_volume(&mut self, volume: f32);

    /// Returns true while audio is audible on this channel.
    fn is_playing(&self) -> bool;
}

// ============================================================================
// SilentPlayer
// ============================================================================

/// A player that never produces sound.
///
/// Used when sound is disabled or no output device exists. Every `play`
/// is rejected so channels stay in the "not playing" state.
#[derive(Debug, Clone)]
pub struct SilentPlayer {
    reason: SoundError,
}

impl SilentPlayer {
    /// Creates a player for a session started with sound turned off.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            reason: SoundError::Disabled,
        }
    }

    /// Creates a player for a machine without an audio device.
    #[must_use]
    pub fn unavailable(detail: impl Into<String>) -> Self {
        Self {
            reason: SoundError::DeviceNotAvailable(detail.into()),
        }
    }
}

impl SoundPlayer for SilentPlayer {
    fn load(&mut self, _source: Option<SoundSource>, _looping: bool) {}

    fn play(&mut self) -> Result<(), SoundError> {
        Err(self.reason.clone())
    }

    fn pause(&mut self) {}

    fn rewind(&mut self) {}

    fn set_volume(&mut self, _volume: f32) {}

    fn is_playing(&self) -> bool {
        false
    }
}

// ============================================================================
// MockSoundPlayer
// ============================================================================

#[derive(Debug, Default)]
struct MockState {
    source: Option<SoundSource>,
    looping: bool,
    playing: bool,
    volume: f32,
    load_calls: usize,
    play_calls: usize,
    rewind_calls: usize,
    should_fail: bool,
}

/// Mock sound player for testing.
///
/// Clones share state, so a test can keep one handle while the channel
/// owns another.
#[derive(Debug, Clone, Default)]
pub struct MockSoundPlayer {
    state: Arc<Mutex<MockState>>,
}

impl MockSoundPlayer {
    #[must_use]
    pub fn new() -> Self {
        let player = Self::default();
        player.state.lock().unwrap().volume = 1.0;
        player
    }

    /// Makes subsequent `play` calls fail with `PlaybackRejected`.
    pub fn set_should_fail(&self, should_fail: bool) {
        self.state.lock().unwrap().should_fail = should_fail;
    }

    /// Simulates a one-shot source reaching its end.
    pub fn finish(&self) {
        self.state.lock().unwrap().playing = false;
    }

    #[must_use]
    pub fn play_count(&self) -> usize {
        self.state.lock().unwrap().play_calls
    }

    #[must_use]
    pub fn load_count(&self) -> usize {
        self.state.lock().unwrap().load_calls
    }

    #[must_use]
    pub fn rewind_count(&self) -> usize {
        self.state.lock().unwrap().rewind_calls
    }

    #[must_use]
    pub fn loaded_source(&self) -> Option<SoundSource> {
        self.state.lock().unwrap().source.clone()
    }

    #[must_use]
    pub fn is_looping(&self) -> bool {
        self.state.lock().unwrap().looping
    }

    #[must_use]
    pub fn volume(&self) -> f32 {
        self.state.lock().unwrap().volume
    }

    pub fn clear_calls(&self) {
        let mut state = self.state.lock().unwrap();
        state.load_calls = 0;
        state.play_calls = 0;
        state.rewind_calls = 0;
    }
}

impl SoundPlayer for MockSoundPlayer {
    fn load(&mut self, source: Option<SoundSource>, looping: bool) {
        let mut state = self.state.lock().unwrap();
        state.source = source;
        state.looping = looping;
        state.playing = false;
        state.load_calls += 1;
    }

    fn play(&mut self) -> Result<(), SoundError> {
        let mut state = self.state.lock().unwrap();
        state.play_calls += 1;
        if state.should_fail {
            state.playing = false;
            return Err(SoundError::PlaybackRejected("Mock failure".to_string()));
        }
        if state.source.is_none() {
            return Err(SoundError::NoSource);
        }
        state.playing = true;
        Ok(())
    }

    fn pause(&mut self) {
        self.state.lock().unwrap().playing = false;
    }

    fn rewind(&mut self) {
        self.state.lock().unwrap().rewind_calls += 1;
    }

    fn set_volume(&mut self, volume: f32) {
        self.state.lock().unwrap().volume = volume;
    }

    fn is_playing(&self) -> bool {
        self.state.lock().unwrap().playing
    }
}
