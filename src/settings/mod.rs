//! Settings store for FocusFlow.
//!
//! Holds user-configurable durations, auto-start flags, audio choices and
//! appearance. Every write takes effect immediately; the only validation is
//! clamping and falling back to catalog defaults:
//!
//! - Durations below 1 minute (or non-numeric) become 1
//! - Volumes are clamped to `0.0..=1.0`
//! - Unknown sound, track, theme or background ids resolve to the defaults

pub mod catalog;
mod error;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub use catalog::{AlarmSound, Background, MusicTrack};
pub use error::SettingsError;

use crate::types::TimerConfig;

// ============================================================================
// Theme
// ============================================================================

/// Light or dark text rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Dark text on light background
    #[default]
    Light,
    /// Light text on dark background
    Dark,
}

impl Theme {
    /// Returns the identifier of the theme.
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Returns the other theme.
    pub fn toggled(&self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Parses a theme id, falling back to `Light` for unknown ids.
    pub fn from_id(id: &str) -> Self {
        match id.trim().to_ascii_lowercase().as_str() {
            "dark" => Theme::Dark,
            "light" => Theme::Light,
            other => {
                warn!(theme = other, "unknown theme, using light");
                Theme::Light
            }
        }
    }
}

// ============================================================================
// VolumeLayout
// ============================================================================

/// Whether the alarm and music channels share one volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VolumeLayout {
    /// Independent alarm and music volumes
    #[default]
    Split,
    /// One volume applied to both channels
    Shared,
}

impl VolumeLayout {
    /// Returns the identifier of the layout.
    pub fn as_str(&self) -> &'static str {
        match self {
            VolumeLayout::Split => "split",
            VolumeLayout::Shared => "shared",
        }
    }
}

impl FromStr for VolumeLayout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "split" | "dual" => Ok(VolumeLayout::Split),
            "shared" | "single" => Ok(VolumeLayout::Shared),
            other => Err(format!("不明な音量レイアウトです: {}", other)),
        }
    }
}

// ============================================================================
// SettingKey
// ============================================================================

/// Recognized setting names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingKey {
    PomodoroMinutes,
    ShortBreakMinutes,
    LongBreakMinutes,
    AutoStartBreaks,
    AutoStartPomodoros,
    AutoPlayMusic,
    AlarmSound,
    MusicTrack,
    AlarmVolume,
    MusicVolume,
    /// Both volumes at once
    Volume,
    Theme,
    Background,
    VolumeLayout,
}

impl SettingKey {
    /// All keys in display order.
    pub const ALL: [SettingKey; 14] = [
        SettingKey::PomodoroMinutes,
        SettingKey::ShortBreakMinutes,
        SettingKey::LongBreakMinutes,
        SettingKey::AutoStartBreaks,
        SettingKey::AutoStartPomodoros,
        SettingKey::AutoPlayMusic,
        SettingKey::AlarmSound,
        SettingKey::MusicTrack,
        SettingKey::AlarmVolume,
        SettingKey::MusicVolume,
        SettingKey::Volume,
        SettingKey::Theme,
        SettingKey::Background,
        SettingKey::VolumeLayout,
    ];

    /// Returns the name used on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            SettingKey::PomodoroMinutes => "pomodoro",
            SettingKey::ShortBreakMinutes => "short-break",
            SettingKey::LongBreakMinutes => "long-break",
            SettingKey::AutoStartBreaks => "auto-start-breaks",
            SettingKey::AutoStartPomodoros => "auto-start-pomodoros",
            SettingKey::AutoPlayMusic => "auto-play-music",
            SettingKey::AlarmSound => "alarm",
            SettingKey::MusicTrack => "music",
            SettingKey::AlarmVolume => "alarm-volume",
            SettingKey::MusicVolume => "music-volume",
            SettingKey::Volume => "volume",
            SettingKey::Theme => "theme",
            SettingKey::Background => "background",
            SettingKey::VolumeLayout => "layout",
        }
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SettingKey {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        SettingKey::ALL
            .into_iter()
            .find(|key| key.as_str() == normalized)
            .or(match normalized.as_str() {
                "work" | "focus" => Some(SettingKey::PomodoroMinutes),
                "short" => Some(SettingKey::ShortBreakMinutes),
                "long" => Some(SettingKey::LongBreakMinutes),
                "sound" => Some(SettingKey::AlarmSound),
                "bg" => Some(SettingKey::Background),
                _ => None,
            })
            .ok_or_else(|| SettingsError::UnknownKey(s.trim().to_string()))
    }
}

// ============================================================================
// Settings
// ============================================================================

/// User-configurable settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Focus duration in minutes (>= 1)
    pub pomodoro_minutes: u32,
    /// Short break duration in minutes (>= 1)
    pub short_break_minutes: u32,
    /// Long break duration in minutes (>= 1)
    pub long_break_minutes: u32,
    /// Start breaks automatically when focus expires
    pub auto_start_breaks: bool,
    /// Start focus automatically when a break expires
    pub auto_start_pomodoros: bool,
    /// Play music whenever the timer runs
    pub auto_play_music: bool,
    /// Selected alarm sound id
    pub alarm_sound: String,
    /// Selected music track id
    pub music_track: String,
    /// Alarm volume (0.0-1.0)
    pub alarm_volume: f32,
    /// Music volume (0.0-1.0)
    pub music_volume: f32,
    /// Text theme
    pub theme: Theme,
    /// Background palette id
    pub background: String,
    /// Whether the two volumes are coupled
    pub volume_layout: VolumeLayout,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            pomodoro_minutes: 25,
            short_break_minutes: 5,
            long_break_minutes: 15,
            auto_start_breaks: false,
            auto_start_pomodoros: false,
            auto_play_music: false,
            alarm_sound: catalog::ALARM_SOUNDS[0].id.to_string(),
            music_track: catalog::NO_MUSIC.to_string(),
            alarm_volume: 0.5,
            music_volume: 0.5,
            theme: Theme::Light,
            background: catalog::BACKGROUNDS[0].id.to_string(),
            volume_layout: VolumeLayout::Split,
        }
    }
}

impl Settings {
    /// Writes a setting from its textual value.
    ///
    /// # Errors
    ///
    /// Returns an error for unparsable flags and unknown layouts. Durations,
    /// volumes and catalog ids never fail; see the module docs.
    pub fn set(&mut self, key: SettingKey, raw: &str) -> Result<(), SettingsError> {
        match key {
            SettingKey::PomodoroMinutes => self.pomodoro_minutes = parse_minutes(raw),
            SettingKey::ShortBreakMinutes => self.short_break_minutes = parse_minutes(raw),
            SettingKey::LongBreakMinutes => self.long_break_minutes = parse_minutes(raw),
            SettingKey::AutoStartBreaks => self.auto_start_breaks = parse_flag(key, raw)?,
            SettingKey::AutoStartPomodoros => self.auto_start_pomodoros = parse_flag(key, raw)?,
            SettingKey::AutoPlayMusic => self.auto_play_music = parse_flag(key, raw)?,
            SettingKey::AlarmSound => self.select_alarm_sound(raw),
            SettingKey::MusicTrack => self.select_music_track(raw),
            SettingKey::AlarmVolume | SettingKey::MusicVolume | SettingKey::Volume => {
                match parse_volume(raw) {
                    Some(volume) => self.set_volume(key, volume),
                    None => warn!(key = %key, value = raw, "ignoring non-numeric volume"),
                }
            }
            SettingKey::Theme => self.theme = Theme::from_id(raw),
            SettingKey::Background => self.select_background(raw),
            SettingKey::VolumeLayout => {
                self.volume_layout =
                    raw.parse()
                        .map_err(|_| SettingsError::InvalidChoice {
                            key: key.to_string(),
                            value: raw.trim().to_string(),
                        })?;
                if self.volume_layout == VolumeLayout::Shared {
                    self.music_volume = self.alarm_volume;
                }
            }
        }
        debug!(key = %key, value = raw, "setting updated");
        Ok(())
    }

    /// Sets a volume, honoring the volume layout.
    ///
    /// `Volume` always sets both channels; in the shared layout either
    /// channel key does as well.
    pub fn set_volume(&mut self, key: SettingKey, volume: f32) {
        let volume = clamp_volume(volume);
        let both = key == SettingKey::Volume || self.volume_layout == VolumeLayout::Shared;
        match key {
            _ if both => {
                self.alarm_volume = volume;
                self.music_volume = volume;
            }
            SettingKey::MusicVolume => self.music_volume = volume,
            _ => self.alarm_volume = volume,
        }
    }

    /// Selects an alarm sound, falling back to the default for unknown ids.
    pub fn select_alarm_sound(&mut self, id: &str) {
        let sound = catalog::alarm_sound(id.trim());
        if !sound.id.eq_ignore_ascii_case(id.trim()) {
            warn!(requested = id, using = sound.id, "unknown alarm sound");
        }
        self.alarm_sound = sound.id.to_string();
    }

    /// Selects a music track, falling back to "none" for unknown ids.
    pub fn select_music_track(&mut self, id: &str) {
        let track = catalog::music_track(id.trim());
        if !track.id.eq_ignore_ascii_case(id.trim()) {
            warn!(requested = id, using = track.id, "unknown music track");
        }
        self.music_track = track.id.to_string();
    }

    /// Selects a background palette, falling back to the default.
    pub fn select_background(&mut self, id: &str) {
        let palette = catalog::background(id.trim());
        if !palette.id.eq_ignore_ascii_case(id.trim()) {
            warn!(requested = id, using = palette.id, "unknown background");
        }
        self.background = palette.id.to_string();
    }

    /// Switches between light and dark themes.
    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
    }

    /// Restores durations, auto-start flags and volumes to their defaults.
    ///
    /// Sound, music and appearance choices are kept.
    pub fn restore_defaults(&mut self) {
        let defaults = Settings::default();
        self.pomodoro_minutes = defaults.pomodoro_minutes;
        self.short_break_minutes = defaults.short_break_minutes;
        self.long_break_minutes = defaults.long_break_minutes;
        self.auto_start_breaks = defaults.auto_start_breaks;
        self.auto_start_pomodoros = defaults.auto_start_pomodoros;
        self.alarm_volume = defaults.alarm_volume;
        self.music_volume = defaults.music_volume;
    }

    /// Returns the value of a setting as text.
    pub fn get(&self, key: SettingKey) -> String {
        match key {
            SettingKey::PomodoroMinutes => self.pomodoro_minutes.to_string(),
            SettingKey::ShortBreakMinutes => self.short_break_minutes.to_string(),
            SettingKey::LongBreakMinutes => self.long_break_minutes.to_string(),
            SettingKey::AutoStartBreaks => on_off(self.auto_start_breaks).to_string(),
            SettingKey::AutoStartPomodoros => on_off(self.auto_start_pomodoros).to_string(),
            SettingKey::AutoPlayMusic => on_off(self.auto_play_music).to_string(),
            SettingKey::AlarmSound => self.alarm_sound.clone(),
            SettingKey::MusicTrack => self.music_track.clone(),
            SettingKey::AlarmVolume => format!("{:.2}", self.alarm_volume),
            SettingKey::MusicVolume => format!("{:.2}", self.music_volume),
            SettingKey::Volume => format!("{:.2}", self.alarm_volume.max(self.music_volume)),
            SettingKey::Theme => self.theme.as_str().to_string(),
            SettingKey::Background => self.background.clone(),
            SettingKey::VolumeLayout => self.volume_layout.as_str().to_string(),
        }
    }

    /// Returns the selected alarm sound.
    pub fn alarm(&self) -> &'static AlarmSound {
        catalog::alarm_sound(&self.alarm_sound)
    }

    /// Returns the selected music track.
    pub fn music(&self) -> &'static MusicTrack {
        catalog::music_track(&self.music_track)
    }

    /// Returns true if a music track (other than "none") is selected.
    pub fn has_music(&self) -> bool {
        !self.music().is_none()
    }

    /// Returns the selected background palette.
    pub fn background_palette(&self) -> &'static Background {
        catalog::background(&self.background)
    }

    /// Projects the settings the timer engine needs.
    pub fn timer_config(&self) -> TimerConfig {
        TimerConfig {
            focus_seconds: self.pomodoro_minutes.max(1).saturating_mul(60),
            short_break_seconds: self.short_break_minutes.max(1).saturating_mul(60),
            long_break_seconds: self.long_break_minutes.max(1).saturating_mul(60),
            auto_start_breaks: self.auto_start_breaks,
            auto_start_pomodoros: self.auto_start_pomodoros,
        }
    }
}

// ============================================================================
// Parsing Helpers
// ============================================================================

/// Parses a duration in minutes, clamping anything invalid or below 1 to 1.
fn parse_minutes(raw: &str) -> u32 {
    let raw = raw.trim();
    let minutes = raw
        .parse::<i64>()
        .ok()
        .or_else(|| raw.parse::<f64>().ok().filter(|v| v.is_finite()).map(|v| v as i64))
        .unwrap_or(1);
    u32::try_from(minutes.max(1)).unwrap_or(u32::MAX)
}

/// Parses a volume; `None` if the value is not a number.
fn parse_volume(raw: &str) -> Option<f32> {
    raw.trim().parse::<f32>().ok().filter(|v| !v.is_nan())
}

/// Clamps a volume to `0.0..=1.0`.
pub fn clamp_volume(volume: f32) -> f32 {
    if volume.is_nan() {
        return 0.0;
    }
    volume.clamp(0.0, 1.0)
}

fn parse_flag(key: SettingKey, raw: &str) -> Result<bool, SettingsError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Ok(true),
        "off" | "false" | "no" | "0" => Ok(false),
        _ => Err(SettingsError::InvalidFlag {
            key: key.to_string(),
            value: raw.trim().to_string(),
        }),
    }
}

fn on_off(value: bool) -> &'static str {
    if value {
        "on"
    } else {
        "off"
    }
}

// ============================================================================
// Tests
// ============================================================================
