//! Keeps the alarm and music channels in step with the timer and settings.
//!
//! The coordinator never owns timer state. The widget calls one of the
//! `on_*` hooks for every timer transition and every settings change, and
//! the coordinator decides what the channels should do.

use tracing::{debug, info, warn};

use super::channel::{AudioChannel, ChannelKind};
use super::source::SoundLibrary;
use super::SoundPlayer;
use crate::settings::Settings;

/// Drives the alarm and music channels.
#[derive(Debug)]
pub struct AudioCoordinator {
    alarm: AudioChannel,
    music: AudioChannel,
    library: SoundLibrary,
}

impl AudioCoordinator {
    /// Creates a coordinator from one player per channel.
    pub fn new(
        alarm_player: Box<dyn SoundPlayer>,
        music_player: Box<dyn SoundPlayer>,
        library: SoundLibrary,
    ) -> Self {
        Self {
            alarm: AudioChannel::new(ChannelKind::Alarm, alarm_player),
            music: AudioChannel::new(ChannelKind::Music, music_player),
            library,
        }
    }

    /// Plays the selected alarm once from the beginning.
    ///
    /// The volume is read from `settings` at play time. Failures are logged
    /// by the channel and otherwise ignored.
    pub fn play_alarm(&mut self, settings: &Settings) {
        let source = self.library.alarm(settings.alarm());
        info!(alarm = source.name(), "playing alarm");
        self.alarm.load(Some(source));
        self.alarm.set_volume(settings.alarm_volume);
        let _ = self.alarm.play_from_start();
    }

    /// Called when the countdown starts, by the user or by auto-start.
    pub fn on_timer_started(&mut self, settings: &Settings) {
        if settings.auto_play_music {
            self.start_music(settings);
        }
    }

    /// Called when the countdown stops without being reset.
    pub fn on_timer_paused(&mut self) {
        self.music.pause();
    }

    /// Called when the countdown is reset or a mode is selected.
    pub fn on_timer_reset(&mut self) {
        self.music.pause();
        self.music.rewind();
    }

    /// Applies a settings change to the channels.
    ///
    /// `running` is whether the countdown is running after the change.
    pub fn on_settings_changed(&mut self, old: &Settings, new: &Settings, running: bool) {
        self.alarm.set_volume(new.alarm_volume);

        if old.music_track != new.music_track {
            let was_playing = self.music.is_playing();
            self.music.pause();
            let should_play = was_playing || (running && new.auto_play_music);
            if self.load_music(new) && should_play {
                debug!(track = new.music().id, "playing new track");
                self.music.set_volume(new.music_volume);
                let _ = self.music.play();
            }
        }

        if old.music_volume != new.music_volume {
            self.music.set_volume(new.music_volume);
        }

        if old.auto_play_music != new.auto_play_music && running {
            if new.auto_play_music {
                self.start_music(new);
            } else {
                self.music.pause();
            }
        }
    }

    /// Plays or pauses music on user request.
    ///
    /// Does nothing while no track is selected.
    pub fn toggle_music(&mut self, settings: &Settings) {
        if self.music.is_playing() {
            self.music.pause();
        } else {
            self.start_music(settings);
        }
    }

    /// Returns true while music is audible.
    pub fn is_music_playing(&self) -> bool {
        self.music.is_playing()
    }

    /// Returns true while the alarm is audible.
    pub fn is_alarm_playing(&self) -> bool {
        self.alarm.is_playing()
    }

    /// Returns the sound library.
    pub fn library(&self) -> &SoundLibrary {
        &self.library
    }

    fn start_music(&mut self, settings: &Settings) {
        if !settings.has_music() {
            debug!("no music track selected");
            return;
        }
        if !self.load_music(settings) {
            return;
        }
        self.music.set_volume(settings.music_volume);
        let _ = self.music.play();
    }

    /// Loads the selected track. Returns true if a source is loaded.
    fn load_music(&mut self, settings: &Settings) -> bool {
        match self.library.music(settings.music()) {
            Ok(source) => {
                self.music.load(source);
            }
            Err(e) => {
                warn!(track = settings.music().id, "music unavailable: {}", e);
                self.music.load(None);
            }
        }
        self.music.source().is_some()
    }
}
