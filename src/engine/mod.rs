//! Timer engine module for FocusFlow.
//!
//! This module contains the countdown machinery:
//! - `timer`: Mode/timer state machine with transition events
//! - `ticker`: Cancellable one-second tick scheduler
//! - `error`: Engine error types

pub mod error;
pub mod ticker;
pub mod timer;

pub use error::TimerError;
pub use ticker::{Ticker, TICK_PERIOD};
pub use timer::{TimerEngine, TimerEvent};
