//! A single audio channel: one player, one loaded source, one volume.

use tracing::{debug, warn};

use super::error::SoundError;
use super::source::SoundSource;
use super::SoundPlayer;
use crate::settings::clamp_volume;

/// Which channel a player serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelKind {
    /// One-shot alarm sounds
    Alarm,
    /// Looping background music
    Music,
}

impl ChannelKind {
    /// Returns the channel name used in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChannelKind::Alarm => "alarm",
            ChannelKind::Music => "music",
        }
    }

    /// Returns true if sources on this channel restart when they end.
    pub fn loops(&self) -> bool {
        matches!(self, ChannelKind::Music)
    }
}

/// An audio channel wrapping a [`SoundPlayer`].
///
/// Playback failures are logged here and reported to the caller, but the
/// channel itself never panics and stays "not playing" after a failure.
pub struct AudioChannel {
    kind: ChannelKind,
    player: Box<dyn SoundPlayer>,
    source: Option<SoundSource>,
    volume: f32,
}

impl AudioChannel {
    /// Creates an empty channel at full volume.
    pub fn new(kind: ChannelKind, player: Box<dyn SoundPlayer>) -> Self {
        Self {
            kind,
            player,
            source: None,
            volume: 1.0,
        }
    }

    /// Loads `source`, or unloads the channel with `None`.
    ///
    /// Loading the source that is already loaded keeps the current position.
    /// Returns true if the source changed.
    pub fn load(&mut self, source: Option<SoundSource>) -> bool {
        if self.source == source {
            return false;
        }
        debug!(
            channel = self.kind.as_str(),
            source = source.as_ref().map(SoundSource::name),
            "loading source"
        );
        self.player.load(source.clone(), self.kind.loops());
        self.source = source;
        true
    }

    /// Sets the channel volume, clamped to 0.0-1.0.
    pub fn set_volume(&mut self, volume: f32) {
        self.volume = clamp_volume(volume);
        self.player.set_volume(self.volume);
    }

    /// Starts or resumes playback.
    ///
    /// # Errors
    ///
    /// Returns the player's error; the channel is paused afterwards.
    pub fn play(&mut self) -> Result<(), SoundError> {
        match self.player.play() {
            Ok(()) => {
                debug!(channel = self.kind.as_str(), "playback started");
                Ok(())
            }
            Err(e) => {
                if e.is_expected() {
                    debug!(channel = self.kind.as_str(), "playback skipped: {}", e);
                } else {
                    warn!(channel = self.kind.as_str(), "playback failed: {}", e);
                }
                self.player.pause();
                Err(e)
            }
        }
    }

    /// Plays the loaded source from its beginning.
    ///
    /// # Errors
    ///
    /// See [`AudioChannel::play`].
    pub fn play_from_start(&mut self) -> Result<(), SoundError> {
        self.player.rewind();
        self.play()
    }

    /// Pauses playback.
    pub fn pause(&mut self) {
        self.player.pause();
    }

    /// Moves back to the start of the loaded source.
    pub fn rewind(&mut self) {
        self.player.rewind();
    }

    /// Returns true while audio is audible.
    pub fn is_playing(&self) -> bool {
        self.player.is_playing()
    }

    /// Returns the loaded source.
    pub fn source(&self) -> Option<&SoundSource> {
        self.source.as_ref()
    }

    /// Returns the channel volume.
    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Returns the channel kind.
    pub fn kind(&self) -> ChannelKind {
        self.kind
    }
}

impl std::fmt::Debug for AudioChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioChannel")
            .field("kind", &self.kind)
            .field("source", &self.source)
            .field("volume", &self.volume)
            .field("playing", &self.is_playing())
            .finish()
    }
}
