//! CLI module for FocusFlow.
//!
//! This module provides the command-line interface:
//! - `commands`: Command definitions using clap derive
//! - `input`: Interactive command parsing
//! - `display`: Output formatting and display logic
//! - `session`: The interactive timer loop

pub mod commands;
pub mod display;
pub mod input;
pub mod session;

pub use commands::{Cli, Commands, RunArgs};
pub use display::Display;
pub use input::{InputCommand, InputError};
pub use session::{Flow, Session};
