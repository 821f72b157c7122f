//! Core data types for the FocusFlow timer.
//!
//! This module defines the data structures used for:
//! - Timer modes (focus, short break, long break)
//! - Timer state with the remaining-time invariant
//! - The timer-relevant projection of the settings

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Number of completed focus intervals that earn a long break.
pub const CYCLES_PER_LONG_BREAK: u32 = 4;

// ============================================================================
// Mode
// ============================================================================

/// The interval the timer is counting down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Work interval
    #[default]
    Focus,
    /// Short rest between focus intervals
    ShortBreak,
    /// Long rest after every fourth focus interval
    LongBreak,
}

impl Mode {
    /// All modes in selector order.
    pub const ALL: [Mode; 3] = [Mode::Focus, Mode::ShortBreak, Mode::LongBreak];

    /// Returns the identifier used on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Focus => "focus",
            Mode::ShortBreak => "short-break",
            Mode::LongBreak => "long-break",
        }
    }

    /// Returns true for either break mode.
    pub fn is_break(&self) -> bool {
        matches!(self, Mode::ShortBreak | Mode::LongBreak)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "focus" | "pomodoro" | "work" | "f" => Ok(Mode::Focus),
            "short" | "short-break" | "shortbreak" | "s" => Ok(Mode::ShortBreak),
            "long" | "long-break" | "longbreak" | "l" => Ok(Mode::LongBreak),
            other => Err(format!("不明なモードです: {}", other)),
        }
    }
}

// ============================================================================
// TimerConfig
// ============================================================================

/// Durations and auto-start flags the timer engine needs from the settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerConfig {
    /// Focus duration in seconds
    pub focus_seconds: u32,
    /// Short break duration in seconds
    pub short_break_seconds: u32,
    /// Long break duration in seconds
    pub long_break_seconds: u32,
    /// Start a break automatically when a focus interval expires
    pub auto_start_breaks: bool,
    /// Start a focus interval automatically when a break expires
    pub auto_start_pomodoros: bool,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            focus_seconds: 25 * 60,
            short_break_seconds: 5 * 60,
            long_break_seconds: 15 * 60,
            auto_start_breaks: false,
            auto_start_pomodoros: false,
        }
    }
}

impl TimerConfig {
    /// Returns the configured duration of `mode` in seconds.
    pub fn duration_for(&self, mode: Mode) -> u32 {
        match mode {
            Mode::Focus => self.focus_seconds,
            Mode::ShortBreak => self.short_break_seconds,
            Mode::LongBreak => self.long_break_seconds,
        }
    }

    /// Returns whether the interval following an expired `mode` starts by itself.
    pub fn auto_starts_after(&self, mode: Mode) -> bool {
        if mode.is_break() {
            self.auto_start_pomodoros
        } else {
            self.auto_start_breaks
        }
    }
}

// ============================================================================
// TimerState
// ============================================================================

/// Represents the current state of the timer.
///
/// `remaining_seconds` never exceeds the configured duration of `mode`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    /// Interval being counted down
    pub mode: Mode,
    /// Remaining seconds in the current interval
    pub remaining_seconds: u32,
    /// Whether ticks currently decrement the countdown
    pub running: bool,
    /// Number of focus intervals that reached zero
    pub completed_focus_cycles: u32,
}

impl TimerState {
    /// Creates a stopped focus interval with its full duration.
    pub fn new(config: &TimerConfig) -> Self {
        Self {
            mode: Mode::Focus,
            remaining_seconds: config.duration_for(Mode::Focus),
            running: false,
            completed_focus_cycles: 0,
        }
    }

    /// Switches to `mode` with its full duration, stopped.
    pub fn load(&mut self, mode: Mode, config: &TimerConfig) {
        self.mode = mode;
        self.remaining_seconds = config.duration_for(mode);
        self.running = false;
    }

    /// Decrements the countdown by one second.
    ///
    /// Returns true only on the tick that brings the countdown to zero.
    pub fn tick(&mut self) -> bool {
        if !self.running || self.remaining_seconds == 0 {
            return false;
        }
        self.remaining_seconds -= 1;
        self.remaining_seconds == 0
    }

    /// Returns the mode that follows an expired interval.
    ///
    /// Must be called after the focus cycle count was updated.
    pub fn next_mode(&self) -> Mode {
        match self.mode {
            Mode::Focus if self.completed_focus_cycles % CYCLES_PER_LONG_BREAK == 0 => {
                Mode::LongBreak
            }
            Mode::Focus => Mode::ShortBreak,
            Mode::ShortBreak | Mode::LongBreak => Mode::Focus,
        }
    }

    /// Returns how many more focus intervals until the next long break.
    pub fn cycles_until_long_break(&self) -> u32 {
        CYCLES_PER_LONG_BREAK - self.completed_focus_cycles % CYCLES_PER_LONG_BREAK
    }
}

// ============================================================================
// Formatting
// ============================================================================

/// Formats seconds as a zero-padded `mm:ss` clock.
pub fn format_clock(total_seconds: u32) -> String {
    format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
}

// ============================================================================
// Tests
// ============================================================================
