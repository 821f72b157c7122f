//! Sound source resolution.
//!
//! Catalog entries name an asset file and the remote URL it can be
//! downloaded from. This module turns an entry into something playable:
//! the downloaded file when it exists in the assets directory, otherwise a
//! synthesized tone for alarms. Music has no synthesized fallback.

use std::path::{Path, PathBuf};

use super::error::SoundError;
use crate::settings::catalog::{AlarmSound, MusicTrack};

/// Sub-directory of the user data directory holding downloaded assets.
const ASSETS_SUBDIR: &str = "focusflow/sounds";

/// Parameters of a synthesized alarm tone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneSpec {
    /// Tone frequency in hertz
    pub frequency_hz: f32,
    /// Length of each beep in milliseconds
    pub beep_ms: u64,
    /// Number of beeps
    pub beeps: u32,
}

/// Represents the source of a sound to be played.
#[derive(Debug, Clone, PartialEq)]
pub enum SoundSource {
    /// A downloaded audio file.
    File {
        /// Display name (e.g., "Bell Classic").
        name: String,
        /// Full path to the audio file.
        path: PathBuf,
    },
    /// A tone synthesized at playback time.
    Tone {
        /// Display name.
        name: String,
        /// Tone parameters.
        spec: ToneSpec,
    },
}

impl SoundSource {
    /// Creates a file sound source.
    #[must_use]
    pub fn file(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::File {
            name: name.into(),
            path: path.into(),
        }
    }

    /// Creates a synthesized tone source.
    #[must_use]
    pub fn tone(name: impl Into<String>, spec: ToneSpec) -> Self {
        Self::Tone {
            name: name.into(),
            spec,
        }
    }

    /// Returns the name of the sound source.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::File { name, .. } | Self::Tone { name, .. } => name,
        }
    }

    /// Returns true if this is a file source.
    #[must_use]
    pub fn is_file(&self) -> bool {
        matches!(self, Self::File { .. })
    }

    /// Returns the file path if this is a file source.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::File { path, .. } => Some(path),
            Self::Tone { .. } => None,
        }
    }
}

// ============================================================================
// SoundLibrary
// ============================================================================

/// Resolves catalog entries against an assets directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoundLibrary {
    assets_dir: PathBuf,
}

impl SoundLibrary {
    /// Creates a library rooted at `assets_dir`.
    #[must_use]
    pub fn new(assets_dir: impl Into<PathBuf>) -> Self {
        Self {
            assets_dir: assets_dir.into(),
        }
    }

    /// Returns the assets directory.
    #[must_use]
    pub fn assets_dir(&self) -> &Path {
        &self.assets_dir
    }

    /// Returns the path an entry's asset is expected at.
    #[must_use]
    pub fn asset_path(&self, file_name: &str) -> PathBuf {
        self.assets_dir.join(file_name)
    }

    /// Returns true if the asset file exists.
    #[must_use]
    pub fn has_asset(&self, file_name: &str) -> bool {
        self.asset_path(file_name).is_file()
    }

    /// Resolves an alarm, falling back to its synthesized tone.
    #[must_use]
    pub fn alarm(&self, sound: &AlarmSound) -> SoundSource {
        if self.has_asset(sound.file_name) {
            SoundSource::file(sound.name, self.asset_path(sound.file_name))
        } else {
            SoundSource::tone(sound.name, sound.tone)
        }
    }

    /// Resolves a music track.
    ///
    /// Returns `Ok(None)` for the "none" track.
    ///
    /// # Errors
    ///
    /// Returns `SoundError::SourceMissing` if the track has not been
    /// downloaded into the assets directory.
    pub fn music(&self, track: &MusicTrack) -> Result<Option<SoundSource>, SoundError> {
        let Some(file_name) = track.file_name else {
            return Ok(None);
        };
        if self.has_asset(file_name) {
            Ok(Some(SoundSource::file(
                track.name,
                self.asset_path(file_name),
            )))
        } else {
            Err(SoundError::SourceMissing {
                path: self.asset_path(file_name).display().to_string(),
                url: track.url.unwrap_or_default().to_string(),
            })
        }
    }
}

impl Default for SoundLibrary {
    fn default() -> Self {
        Self::new(default_assets_dir())
    }
}

/// Returns the default assets directory (`<data dir>/focusflow/sounds`).
#[must_use]
pub fn default_assets_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(ASSETS_SUBDIR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::catalog::{alarm_sound, music_track};

    #[test]
    fn test_sound_source_file() {
        let source = SoundSource::file("Bell", "/tmp/bell.mp3");
        assert!(source.is_file());
        assert_eq!(source.name(), "Bell");
        assert_eq!(source.path(), Some(Path::new("/tmp/bell.mp3")));
    }

    #[test]
    fn test_sound_source_tone() {
        let spec = ToneSpec {
            frequency_hz: 880.0,
            beep_ms: 200,
            beeps: 3,
        };
        let source = SoundSource::tone("Bell", spec);
        assert!(!source.is_file());
        assert!(source.path().is_none());
    }

    #[test]
    fn test_alarm_falls_back_to_tone() {
        let dir = tempfile::tempdir().unwrap();
        let library = SoundLibrary::new(dir.path());

        let source = library.alarm(alarm_sound("bell"));

        assert!(!source.is_file());
        assert_eq!(source.name(), "Bell Classic");
    }

    #[test]
    fn test_alarm_uses_downloaded_file() {
        let dir = tempfile::tempdir().unwrap();
        let sound = alarm_sound("chime");
        std::fs::write(dir.path().join(sound.file_name), b"fake").unwrap();
        let library = SoundLibrary::new(dir.path());

        let source = library.alarm(sound);

        assert!(source.is_file());
        assert_eq!(source.path().unwrap(), dir.path().join(sound.file_name));
    }

    #[test]
    fn test_music_none() {
        let library = SoundLibrary::new("/nonexistent");
        assert_eq!(library.music(music_track("none")).unwrap(), None);
    }

    #[test]
    fn test_music_missing_names_url() {
        let library = SoundLibrary::new("/nonexistent");

        let err = library.music(music_track("lofi1")).unwrap_err();

        match err {
            SoundError::SourceMissing { url, .. } => assert!(url.contains("mixkit")),
            other => panic!("Expected SourceMissing, got {:?}", other),
        }
    }

    #[test]
    fn test_music_downloaded() {
        let dir = tempfile::tempdir().unwrap();
        let track = music_track("jazz2");
        std::fs::write(dir.path().join(track.file_name.unwrap()), b"fake").unwrap();
        let library = SoundLibrary::new(dir.path());

        let source = library.music(track).unwrap().unwrap();

        assert!(source.is_file());
    }

    #[test]
    fn test_default_assets_dir() {
        assert!(default_assets_dir().ends_with(ASSETS_SUBDIR));
    }
}
