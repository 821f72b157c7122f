//! Sound player implementation using rodio.
//!
//! This module provides the `RodioSoundPlayer` which drives one rodio
//! `Sink` per channel. The `AudioDevice` owns the output stream and must
//! outlive every player created from it.

use std::fs::File;
use std::io::BufReader;
use std::time::Duration;

use rodio::source::{SineWave, Source, Zero};
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
use tracing::{debug, warn};

use super::error::SoundError;
use super::source::{SoundSource, ToneSpec};
use super::SoundPlayer;

/// Sample rate of synthesized silence between beeps.
const TONE_SAMPLE_RATE: u32 = 44_100;

/// Amplitude of synthesized tones before channel volume is applied.
const TONE_AMPLITUDE: f32 = 0.4;

// ============================================================================
// AudioDevice
// ============================================================================

/// The default audio output device.
pub struct AudioDevice {
    /// The audio output stream (must be kept alive for playback).
    _stream: OutputStream,
    /// Handle to the output stream for creating sinks.
    handle: OutputStreamHandle,
}

impl AudioDevice {
    /// Opens the default output device.
    ///
    /// # Errors
    ///
    /// Returns `SoundError::DeviceNotAvailable` if no audio output device
    /// is available.
    pub fn open() -> Result<Self, SoundError> {
        let (stream, handle) = OutputStream::try_default()
            .map_err(|e| SoundError::DeviceNotAvailable(e.to_string()))?;

        debug!("Audio output stream initialized");

        Ok(Self {
            _stream: stream,
            handle,
        })
    }

    /// Creates a player bound to this device.
    #[must_use]
    pub fn player(&self) -> RodioSoundPlayer {
        RodioSoundPlayer::new(self.handle.clone())
    }
}

impl std::fmt::Debug for AudioDevice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioDevice").finish_non_exhaustive()
    }
}

/// Opens the default device, returning None if audio is unavailable.
#[must_use]
pub fn try_open_device() -> Option<AudioDevice> {
    match AudioDevice::open() {
        Ok(device) => Some(device),
        Err(e) => {
            warn!("Audio not available, sound disabled: {}", e);
            None
        }
    }
}

// ============================================================================
// RodioSoundPlayer
// ============================================================================

/// A channel player backed by a rodio `Sink`.
///
/// The sink is built lazily on `play` and dropped on `load` and `rewind`,
/// so the next `play` starts from the beginning of the source.
pub struct RodioSoundPlayer {
    handle: OutputStreamHandle,
    source: Option<SoundSource>,
    looping: bool,
    volume: f32,
    sink: Option<Sink>,
}

impl RodioSoundPlayer {
    /// Creates a player on the given output stream.
    #[must_use]
    pub fn new(handle: OutputStreamHandle) -> Self {
        Self {
            handle,
            source: None,
            looping: false,
            volume: 1.0,
            sink: None,
        }
    }

    fn stop_sink(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
    }

    fn build_sink(&self, source: &SoundSource) -> Result<Sink, SoundError> {
        let sink =
            Sink::try_new(&self.handle).map_err(|e| SoundError::StreamError(e.to_string()))?;
        sink.set_volume(self.volume);

        match source {
            SoundSource::File { path, name } => {
                debug!("Loading sound file: {} ({})", name, path.display());
                let file = File::open(path)
                    .map_err(|e| SoundError::FileNotFound(format!("{}: {}", path.display(), e)))?;
                let reader = BufReader::new(file);
                if self.looping {
                    let decoder = Decoder::new_looped(reader)
                        .map_err(|e| SoundError::DecodeError(e.to_string()))?;
                    sink.append(decoder);
                } else {
                    let decoder =
                        Decoder::new(reader).map_err(|e| SoundError::DecodeError(e.to_string()))?;
                    sink.append(decoder);
                }
            }
            SoundSource::Tone { name, spec } => {
                debug!("Synthesizing tone: {}", name);
                append_tone(&sink, spec);
            }
        }

        Ok(sink)
    }
}

/// Appends `spec.beeps` sine beeps separated by silence of the same length.
fn append_tone(sink: &Sink, spec: &ToneSpec) {
    let beep = Duration::from_millis(spec.beep_ms);
    for i in 0..spec.beeps {
        sink.append(
            SineWave::new(spec.frequency_hz)
                .take_duration(beep)
                .amplify(TONE_AMPLITUDE),
        );
        if i + 1 < spec.beeps {
            sink.append(Zero::<f32>::new(1, TONE_SAMPLE_RATE).take_duration(beep / 2));
        }
    }
}

impl SoundPlayer for RodioSoundPlayer {
    fn load(&mut self, source: Option<SoundSource>, looping: bool) {
        self.stop_sink();
        self.source = source;
        self.looping = looping;
    }

    fn play(&mut self) -> Result<(), SoundError> {
        if let Some(sink) = &self.sink {
            if !sink.empty() {
                sink.play();
                debug!("Sound playback resumed");
                return Ok(());
            }
        }

        let source = self.source.as_ref().ok_or(SoundError::NoSource)?;
        let sink = self.build_sink(source)?;
        sink.play();
        self.sink = Some(sink);

        debug!("Sound playback started");
        Ok(())
    }

    fn pause(&mut self) {
        if let Some(sink) = &self.sink {
            sink.pause();
        }
    }

    fn rewind(&mut self) {
        self.stop_sink();
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
        if let Some(sink) = &self.sink {
            sink.set_volume(volume);
        }
    }

    fn is_playing(&self) -> bool {
        self.sink
            .as_ref()
            .is_some_and(|sink| !sink.is_paused() && !sink.empty())
    }
}

impl std::fmt::Debug for RodioSoundPlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RodioSoundPlayer")
            .field("source", &self.source)
            .field("looping", &self.looping)
            .field("volume", &self.volume)
            .finish_non_exhaustive()
    }
}
