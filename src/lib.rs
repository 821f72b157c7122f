//! FocusFlow Library
//!
//! This library provides the core functionality for the FocusFlow CLI.
//! It includes:
//! - Timer engine and tick scheduler for Pomodoro sessions
//! - Settings store with alarm, music and background catalogs
//! - Session task list
//! - Alarm and music playback
//! - The timer widget tying them together
//! - CLI command parsing, interactive session and display utilities

pub mod cli;
pub mod engine;
pub mod settings;
pub mod sound;
pub mod tasks;
pub mod types;
pub mod widget;

// Re-export commonly used types for convenience
pub use types::{Mode, TimerConfig, TimerState};

pub use engine::{Ticker, TimerEngine, TimerError, TimerEvent};

pub use settings::{SettingKey, Settings, SettingsError, Theme, VolumeLayout};

pub use tasks::{Task, TaskList};

// Re-export sound types
pub use sound::{
    AudioCoordinator, MockSoundPlayer, RodioSoundPlayer, SilentPlayer, SoundError, SoundLibrary,
    SoundPlayer, SoundSource,
};

pub use widget::{TimerWidget, WidgetError, WidgetSnapshot};
