//! Timer engine for FocusFlow.
//!
//! This module provides the mode/timer state machine:
//! - Start, pause, reset and mode selection
//! - One-second countdown ticks
//! - Expiry handling with focus cycle counting
//! - Long break after every 4th focus interval
//! - Auto-start of breaks and focus intervals
//!
//! Every transition is published as a [`TimerEvent`] so that audio and
//! display can react without owning timer state.

use tokio::sync::mpsc;
use tracing::{debug, info};

use super::error::TimerError;
use crate::types::{Mode, TimerConfig, TimerState};

// ============================================================================
// TimerEvent
// ============================================================================

/// Timer events for audio and display consumers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerEvent {
    /// Countdown started or resumed
    Started {
        /// Mode being counted down
        mode: Mode,
    },
    /// Countdown paused
    Paused,
    /// Countdown reset to the full duration of the current mode
    Reset {
        /// Current mode
        mode: Mode,
    },
    /// Mode switched by the user
    ModeSelected {
        /// Newly selected mode
        mode: Mode,
    },
    /// One second elapsed
    Tick {
        /// Remaining seconds
        remaining_seconds: u32,
    },
    /// An interval reached zero and the next one was loaded
    Expired {
        /// Mode that expired
        from: Mode,
        /// Mode that was loaded
        to: Mode,
        /// Completed focus cycles after the expiry
        completed_focus_cycles: u32,
        /// Whether the next interval started counting by itself
        auto_started: bool,
    },
    /// Remaining time changed because a duration setting changed
    DurationChanged {
        /// Remaining seconds after the change
        remaining_seconds: u32,
    },
}

// ============================================================================
// TimerEngine
// ============================================================================

/// Timer engine that owns the timer state and publishes its transitions.
#[derive(Debug)]
pub struct TimerEngine {
    /// Current timer state
    state: TimerState,
    /// Durations and auto-start flags
    config: TimerConfig,
    /// Event sender channel
    event_tx: mpsc::UnboundedSender<TimerEvent>,
}

impl TimerEngine {
    /// Creates a stopped focus interval with the given configuration.
    pub fn new(config: TimerConfig, event_tx: mpsc::UnboundedSender<TimerEvent>) -> Self {
        Self {
            state: TimerState::new(&config),
            config,
            event_tx,
        }
    }

    /// Starts counting down.
    ///
    /// Starting an already running timer is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `TimerError::NothingRemaining` if the countdown is at zero.
    pub fn start(&mut self) -> Result<(), TimerError> {
        if self.state.running {
            return Ok(());
        }
        if self.state.remaining_seconds == 0 {
            return Err(TimerError::NothingRemaining);
        }

        self.state.running = true;
        debug!(mode = %self.state.mode, remaining = self.state.remaining_seconds, "timer started");
        self.emit(TimerEvent::Started {
            mode: self.state.mode,
        })
    }

    /// Pauses the countdown, keeping the remaining time.
    ///
    /// Pausing a stopped timer is a no-op.
    pub fn pause(&mut self) -> Result<(), TimerError> {
        if !self.state.running {
            return Ok(());
        }

        self.state.running = false;
        debug!(remaining = self.state.remaining_seconds, "timer paused");
        self.emit(TimerEvent::Paused)
    }

    /// Starts a stopped timer or pauses a running one.
    pub fn toggle(&mut self) -> Result<(), TimerError> {
        if self.state.running {
            self.pause()
        } else {
            self.start()
        }
    }

    /// Stops the timer and restores the full duration of the current mode.
    ///
    /// The focus cycle count is preserved.
    pub fn reset(&mut self) -> Result<(), TimerError> {
        let mode = self.state.mode;
        self.state.load(mode, &self.config);
        debug!(mode = %mode, "timer reset");
        self.emit(TimerEvent::Reset { mode })
    }

    /// Switches to `mode`, stopped, with its full duration.
    ///
    /// The focus cycle count is preserved.
    pub fn select_mode(&mut self, mode: Mode) -> Result<(), TimerError> {
        self.state.load(mode, &self.config);
        info!(mode = %mode, "mode selected");
        self.emit(TimerEvent::ModeSelected { mode })
    }

    /// Advances the countdown by one second.
    ///
    /// Does nothing while the timer is not running. When the countdown
    /// reaches zero the expiry transition runs before this returns.
    pub fn tick(&mut self) -> Result<(), TimerError> {
        if !self.state.running {
            return Ok(());
        }

        let completed = self.state.tick();

        self.emit(TimerEvent::Tick {
            remaining_seconds: self.state.remaining_seconds,
        })?;

        if completed {
            self.handle_expiry()?;
        }

        Ok(())
    }

    /// Handles an interval reaching zero.
    fn handle_expiry(&mut self) -> Result<(), TimerError> {
        let from = self.state.mode;
        if from == Mode::Focus {
            self.state.completed_focus_cycles += 1;
        }

        let to = self.state.next_mode();
        let auto_started = self.config.auto_starts_after(from);

        self.state.load(to, &self.config);
        self.state.running = auto_started;

        info!(
            from = %from,
            to = %to,
            cycles = self.state.completed_focus_cycles,
            auto_started,
            "interval expired"
        );

        self.emit(TimerEvent::Expired {
            from,
            to,
            completed_focus_cycles: self.state.completed_focus_cycles,
            auto_started,
        })
    }

    /// Applies new durations and auto-start flags.
    ///
    /// While stopped, a change to the current mode's duration reloads the
    /// full new duration. While running, the countdown continues and is only
    /// clamped down when it exceeds the new duration.
    pub fn apply_config(&mut self, config: TimerConfig) -> Result<(), TimerError> {
        let mode = self.state.mode;
        let old_duration = self.config.duration_for(mode);
        let new_duration = config.duration_for(mode);
        self.config = config;

        if old_duration == new_duration {
            return Ok(());
        }

        let remaining = if self.state.running {
            self.state.remaining_seconds.min(new_duration)
        } else {
            new_duration
        };

        if remaining == self.state.remaining_seconds {
            return Ok(());
        }

        self.state.remaining_seconds = remaining;
        debug!(mode = %mode, remaining, "duration changed");
        self.emit(TimerEvent::DurationChanged {
            remaining_seconds: remaining,
        })
    }

    /// Returns the elapsed share of the current interval in percent.
    pub fn progress_percent(&self) -> f64 {
        let total = self.config.duration_for(self.state.mode);
        if total == 0 {
            return 0.0;
        }
        let elapsed = total.saturating_sub(self.state.remaining_seconds);
        f64::from(elapsed) * 100.0 / f64::from(total)
    }

    /// Returns a reference to the current timer state.
    pub fn state(&self) -> &TimerState {
        &self.state
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &TimerConfig {
        &self.config
    }

    /// Returns true if ticks currently decrement the countdown.
    pub fn is_running(&self) -> bool {
        self.state.running
    }

    /// Overrides the completed focus cycle count.
    pub fn set_completed_focus_cycles(&mut self, cycles: u32) {
        self.state.completed_focus_cycles = cycles;
    }

    /// Returns a mutable reference to the timer state (for testing).
    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut TimerState {
        &mut self.state
    }

    fn emit(&self, event: TimerEvent) -> Result<(), TimerError> {
        self.event_tx
            .send(event)
            .map_err(|_| TimerError::EventChannelClosed)
    }
}

// ============================================================================
// Tests
// ============================================================================
