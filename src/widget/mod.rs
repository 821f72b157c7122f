//! The timer widget: one controller owning every piece of session state.
//!
//! All mutation goes through the named operations below. After each one the
//! widget drains the engine's [`TimerEvent`]s and hands them to the
//! [`AudioCoordinator`], so audio follows the timer without the timer ever
//! knowing about audio.

use serde::Serialize;
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::debug;

use crate::engine::{TimerEngine, TimerError, TimerEvent};
use crate::settings::{SettingKey, Settings, SettingsError, Theme, VolumeLayout};
use crate::sound::AudioCoordinator;
use crate::tasks::TaskList;
use crate::types::{format_clock, Mode, TimerState};

/// Errors returned by widget operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WidgetError {
    /// Timer transition failed.
    #[error(transparent)]
    Timer(#[from] TimerError),

    /// Settings update was rejected.
    #[error(transparent)]
    Settings(#[from] SettingsError),
}

impl WidgetError {
    /// Returns a user-friendly suggestion for resolving this error.
    #[must_use]
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::Timer(_) => "'reset' でタイマーをリセットしてください",
            Self::Settings(e) => e.suggestion(),
        }
    }
}

/// Read-only view of the widget used for rendering and JSON output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WidgetSnapshot {
    /// Current mode
    pub mode: Mode,
    /// Remaining time as `mm:ss`
    pub clock: String,
    /// Remaining time in seconds
    pub remaining_seconds: u32,
    /// Whether the countdown is running
    pub running: bool,
    /// Focus intervals completed this session
    pub completed_focus_cycles: u32,
    /// Focus intervals left before the next long break
    pub cycles_until_long_break: u32,
    /// Elapsed share of the current interval (0-100)
    pub progress_percent: f64,
    /// Whether the alarm is audible
    pub alarm_playing: bool,
    /// Whether music is audible
    pub music_playing: bool,
    /// Selected alarm sound id
    pub alarm_sound: String,
    /// Selected music track id
    pub music_track: String,
    /// Color theme
    pub theme: Theme,
    /// Background palette id
    pub background: String,
    /// Volume control layout
    pub volume_layout: VolumeLayout,
    /// Number of tasks
    pub tasks_total: usize,
    /// Number of completed tasks
    pub tasks_completed: usize,
}

/// The Pomodoro widget.
#[derive(Debug)]
pub struct TimerWidget {
    engine: TimerEngine,
    events: mpsc::UnboundedReceiver<TimerEvent>,
    settings: Settings,
    tasks: TaskList,
    audio: AudioCoordinator,
}

impl TimerWidget {
    /// Creates a stopped widget at the start of a focus interval.
    pub fn new(settings: Settings, audio: AudioCoordinator) -> Self {
        let (event_tx, events) = mpsc::unbounded_channel();
        let engine = TimerEngine::new(settings.timer_config(), event_tx);
        let mut audio = audio;
        audio.on_settings_changed(&Settings::default(), &settings, false);
        Self {
            engine,
            events,
            settings,
            tasks: TaskList::new(),
            audio,
        }
    }

    // ------------------------------------------------------------------------
    // Timer
    // ------------------------------------------------------------------------

    /// Starts a stopped timer or pauses a running one.
    pub fn toggle_timer(&mut self) -> Result<(), WidgetError> {
        self.engine.toggle()?;
        self.dispatch();
        Ok(())
    }

    /// Starts the countdown.
    pub fn start(&mut self) -> Result<(), WidgetError> {
        self.engine.start()?;
        self.dispatch();
        Ok(())
    }

    /// Pauses the countdown.
    pub fn pause(&mut self) -> Result<(), WidgetError> {
        self.engine.pause()?;
        self.dispatch();
        Ok(())
    }

    /// Stops the timer and reloads the current mode's full duration.
    pub fn reset(&mut self) -> Result<(), WidgetError> {
        self.engine.reset()?;
        self.dispatch();
        Ok(())
    }

    /// Switches to `mode`, stopped at its full duration.
    pub fn select_mode(&mut self, mode: Mode) -> Result<(), WidgetError> {
        self.engine.select_mode(mode)?;
        self.dispatch();
        Ok(())
    }

    /// Advances the countdown by one second.
    pub fn tick(&mut self) -> Result<(), WidgetError> {
        self.engine.tick()?;
        self.dispatch();
        Ok(())
    }

    /// Overrides the completed focus cycle count.
    pub fn set_completed_focus_cycles(&mut self, cycles: u32) {
        self.engine.set_completed_focus_cycles(cycles);
    }

    // ------------------------------------------------------------------------
    // Settings
    // ------------------------------------------------------------------------

    /// Writes one setting from text and propagates it.
    pub fn update_setting(&mut self, key: SettingKey, raw: &str) -> Result<(), WidgetError> {
        let old = self.settings.clone();
        self.settings.set(key, raw)?;
        self.settings_changed(&old)
    }

    /// Restores default durations, flags and volumes, then resets the timer.
    pub fn restore_defaults(&mut self) -> Result<(), WidgetError> {
        let old = self.settings.clone();
        self.settings.restore_defaults();
        self.settings_changed(&old)?;
        self.reset()
    }

    pub fn toggle_theme(&mut self) {
        self.settings.toggle_theme();
        debug!(theme = self.settings.theme.as_str(), "theme toggled");
    }

    fn settings_changed(&mut self, old: &Settings) -> Result<(), WidgetError> {
        self.engine.apply_config(self.settings.timer_config())?;
        self.audio
            .on_settings_changed(old, &self.settings, self.engine.is_running());
        self.dispatch();
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Tasks
    // ------------------------------------------------------------------------

    pub fn add_task(&mut self, text: &str) -> Option<u64> {
        self.tasks.add(text)
    }

    pub fn toggle_task(&mut self, id: u64) -> bool {
        self.tasks.toggle(id)
    }

    pub fn remove_task(&mut self, id: u64) -> bool {
        self.tasks.remove(id)
    }

    // ------------------------------------------------------------------------
    // Audio
    // ------------------------------------------------------------------------

    /// Plays the selected alarm once.
    pub fn test_alarm(&mut self) {
        self.audio.play_alarm(&self.settings);
    }

    /// Plays or pauses the selected music track.
    pub fn toggle_music(&mut self) {
        self.audio.toggle_music(&self.settings);
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    pub fn state(&self) -> &TimerState {
        self.engine.state()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn tasks(&self) -> &TaskList {
        &self.tasks
    }

    pub fn audio(&self) -> &AudioCoordinator {
        &self.audio
    }

    /// Returns true while ticks decrement the countdown.
    pub fn is_running(&self) -> bool {
        self.engine.is_running()
    }

    pub fn progress_percent(&self) -> f64 {
        self.engine.progress_percent()
    }

    /// Builds a read-only view of the widget.
    pub fn snapshot(&self) -> WidgetSnapshot {
        let state = self.engine.state();
        WidgetSnapshot {
            mode: state.mode,
            clock: format_clock(state.remaining_seconds),
            remaining_seconds: state.remaining_seconds,
            running: state.running,
            completed_focus_cycles: state.completed_focus_cycles,
            cycles_until_long_break: state.cycles_until_long_break(),
            progress_percent: self.engine.progress_percent(),
            alarm_playing: self.audio.is_alarm_playing(),
            music_playing: self.audio.is_music_playing(),
            alarm_sound: self.settings.alarm().id.to_string(),
            music_track: self.settings.music().id.to_string(),
            theme: self.settings.theme,
            background: self.settings.background_palette().id.to_string(),
            volume_layout: self.settings.volume_layout,
            tasks_total: self.tasks.len(),
            tasks_completed: self.tasks.completed_count(),
        }
    }

    /// Forwards pending timer events to the audio coordinator.
    fn dispatch(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            match event {
                TimerEvent::Started { .. } => self.audio.on_timer_started(&self.settings),
                TimerEvent::Paused => self.audio.on_timer_paused(),
                TimerEvent::Reset { .. } | TimerEvent::ModeSelected { .. } => {
                    self.audio.on_timer_reset()
                }
                TimerEvent::Expired { auto_started, .. } => {
                    self.audio.play_alarm(&self.settings);
                    if auto_started {
                        self.audio.on_timer_started(&self.settings);
                    } else {
                        self.audio.on_timer_paused();
                    }
                }
                TimerEvent::Tick { .. } | TimerEvent::DurationChanged { .. } => {}
            }
        }
    }
}
