//! Selectable alarm sounds, music tracks and background palettes.
//!
//! Lookups by id never fail: an unknown id resolves to the first entry of
//! the respective catalog.

use crate::sound::ToneSpec;

// ============================================================================
// Alarm Sounds
// ============================================================================

/// An alarm sound choice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlarmSound {
    /// Identifier used in settings
    pub id: &'static str,
    /// Display name
    pub name: &'static str,
    /// Where the recording can be downloaded from
    pub url: &'static str,
    /// File name inside the assets directory
    pub file_name: &'static str,
    /// Tone played when the recording is not available
    pub tone: ToneSpec,
}

/// Available alarm sounds. The first entry is the default.
pub static ALARM_SOUNDS: [AlarmSound; 4] = [
    AlarmSound {
        id: "bell",
        name: "Bell Classic",
        url: "https://assets.mixkit.co/sfx/preview/mixkit-bell-notification-579.mp3",
        file_name: "bell.mp3",
        tone: ToneSpec {
            frequency_hz: 880.0,
            beep_ms: 400,
            beeps: 3,
        },
    },
    AlarmSound {
        id: "digital",
        name: "Digital Beep",
        url: "https://assets.mixkit.co/sfx/preview/mixkit-digital-notification-952.mp3",
        file_name: "digital.mp3",
        tone: ToneSpec {
            frequency_hz: 1320.0,
            beep_ms: 120,
            beeps: 6,
        },
    },
    AlarmSound {
        id: "chime",
        name: "Wind Chime",
        url: "https://assets.mixkit.co/sfx/preview/mixkit-wind-notification-599.mp3",
        file_name: "chime.mp3",
        tone: ToneSpec {
            frequency_hz: 660.0,
            beep_ms: 700,
            beeps: 2,
        },
    },
    AlarmSound {
        id: "buzzer",
        name: "Soft Buzzer",
        url: "https://assets.mixkit.co/sfx/preview/mixkit-buzzer-notification-589.mp3",
        file_name: "buzzer.mp3",
        tone: ToneSpec {
            frequency_hz: 220.0,
            beep_ms: 900,
            beeps: 1,
        },
    },
];

/// Returns the alarm sound with `id`, if any.
pub fn find_alarm_sound(id: &str) -> Option<&'static AlarmSound> {
    ALARM_SOUNDS.iter().find(|s| s.id.eq_ignore_ascii_case(id))
}

/// Returns the alarm sound with `id`, or the default one.
pub fn alarm_sound(id: &str) -> &'static AlarmSound {
    find_alarm_sound(id).unwrap_or(&ALARM_SOUNDS[0])
}

// ============================================================================
// Music Tracks
// ============================================================================

/// Identifier of the "no music" track.
pub const NO_MUSIC: &str = "none";

/// A background music choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MusicTrack {
    /// Identifier used in settings
    pub id: &'static str,
    /// Display name
    pub name: &'static str,
    /// Where the recording can be downloaded from
    pub url: Option<&'static str>,
    /// File name inside the assets directory
    pub file_name: Option<&'static str>,
}

impl MusicTrack {
    /// Returns true for the "no music" entry.
    pub fn is_none(&self) -> bool {
        self.file_name.is_none()
    }
}

/// Available music tracks. The first entry is the default.
pub static MUSIC_TRACKS: [MusicTrack; 5] = [
    MusicTrack {
        id: NO_MUSIC,
        name: "No music",
        url: None,
        file_name: None,
    },
    MusicTrack {
        id: "lofi1",
        name: "Lofi Chill Vibes",
        url: Some("https://assets.mixkit.co/music/preview/mixkit-chill-abstract-125-76.mp3"),
        file_name: Some("lofi1.mp3"),
    },
    MusicTrack {
        id: "lofi2",
        name: "Lofi Study Beats",
        url: Some("https://assets.mixkit.co/music/preview/mixkit-chill-abstract-125-124.mp3"),
        file_name: Some("lofi2.mp3"),
    },
    MusicTrack {
        id: "jazz1",
        name: "Jazz Coffee Shop",
        url: Some("https://assets.mixkit.co/music/preview/mixkit-chill-abstract-125-45.mp3"),
        file_name: Some("jazz1.mp3"),
    },
    MusicTrack {
        id: "jazz2",
        name: "Smooth Jazz Piano",
        url: Some("https://assets.mixkit.co/music/preview/mixkit-chill-abstract-125-32.mp3"),
        file_name: Some("jazz2.mp3"),
    },
];

/// Returns the music track with `id`, if any.
pub fn find_music_track(id: &str) -> Option<&'static MusicTrack> {
    MUSIC_TRACKS.iter().find(|t| t.id.eq_ignore_ascii_case(id))
}

/// Returns the music track with `id`, or "none".
pub fn music_track(id: &str) -> &'static MusicTrack {
    find_music_track(id).unwrap_or(&MUSIC_TRACKS[0])
}

// ============================================================================
// Backgrounds
// ============================================================================

/// A background palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Background {
    /// Identifier used in settings
    pub id: &'static str,
    /// Display name
    pub name: &'static str,
    /// ANSI 256-color index of the accent color
    pub accent: u8,
}

/// Available background palettes. The first entry is the default.
pub static BACKGROUNDS: [Background; 8] = [
    Background {
        id: "gradient-purple",
        name: "Purple Gradient",
        accent: 170,
    },
    Background {
        id: "gradient-blue",
        name: "Blue Ocean",
        accent: 38,
    },
    Background {
        id: "gradient-sunset",
        name: "Sunset Vibes",
        accent: 209,
    },
    Background {
        id: "gradient-midnight",
        name: "Midnight",
        accent: 25,
    },
    Background {
        id: "gradient-forest",
        name: "Forest Green",
        accent: 35,
    },
    Background {
        id: "gradient-cotton",
        name: "Cotton Candy",
        accent: 218,
    },
    Background {
        id: "gradient-space",
        name: "Deep Space",
        accent: 55,
    },
    Background {
        id: "gradient-coral",
        name: "Coral Reef",
        accent: 210,
    },
];

/// Returns the background with `id`, if any.
pub fn find_background(id: &str) -> Option<&'static Background> {
    BACKGROUNDS.iter().find(|b| b.id.eq_ignore_ascii_case(id))
}

/// Returns the background with `id`, or the default one.
pub fn background(id: &str) -> &'static Background {
    find_background(id).unwrap_or(&BACKGROUNDS[0])
}
