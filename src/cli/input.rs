//! Parsing of interactive session commands.
//!
//! One line of stdin is one command. An empty line toggles the timer.

use std::str::FromStr;

use thiserror::Error;

use crate::settings::SettingKey;
use crate::types::Mode;

/// Errors for malformed interactive input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InputError {
    /// The command word is not recognized.
    #[error("不明なコマンドです: {0}")]
    UnknownCommand(String),

    /// A required argument is missing.
    #[error("'{command}' には引数が必要です: {usage}")]
    MissingArgument {
        /// Command word
        command: &'static str,
        /// Usage line
        usage: &'static str,
    },

    /// A task id is not a number.
    #[error("タスクIDは数値で指定してください: {0}")]
    InvalidTaskId(String),

    /// The mode name is not recognized.
    #[error("{0}")]
    InvalidMode(String),

    /// The setting name is not recognized.
    #[error("不明な設定項目です: {0}")]
    UnknownSetting(String),
}

impl InputError {
    /// Returns a user-friendly suggestion for resolving this error.
    #[must_use]
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::UnknownCommand(_) => "'help' でコマンド一覧を表示します",
            Self::MissingArgument { .. } => "引数を付けて再入力してください",
            Self::InvalidTaskId(_) => "'tasks' でタスクIDを確認してください",
            Self::InvalidMode(_) => "focus, short, long のいずれかを指定してください",
            Self::UnknownSetting(_) => "'settings' で設定項目の一覧を確認してください",
        }
    }
}

/// A command entered during a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputCommand {
    /// Start the countdown
    Start,
    /// Pause the countdown
    Pause,
    /// Start or pause
    Toggle,
    /// Restore the full duration of the current mode
    Reset,
    /// Switch mode
    Mode(Mode),
    /// Change a setting
    Set {
        /// Setting to change
        key: SettingKey,
        /// Raw value
        value: String,
    },
    /// Restore default durations, flags and volumes
    Defaults,
    /// Switch light/dark theme
    Theme,
    /// Play the alarm once
    TestAlarm,
    /// Play or pause music
    Music,
    /// Add a task
    Add(String),
    /// Toggle task completion
    Done(u64),
    /// Delete a task
    Remove(u64),
    /// Show the task list
    Tasks,
    /// Show the settings panel
    Settings,
    /// Show the timer
    Status,
    /// Print the widget snapshot as JSON
    Json,
    /// Show command help
    Help,
    /// End the session
    Quit,
}

impl FromStr for InputCommand {
    type Err = InputError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_ascii_lowercase().as_str() {
            "" | "toggle" | "t" => InputCommand::Toggle,
            "start" => InputCommand::Start,
            "pause" | "p" => InputCommand::Pause,
            "reset" | "r" => InputCommand::Reset,
            "mode" | "m" => {
                let mode = required(rest, "mode", "mode <focus|short|long>")?;
                InputCommand::Mode(mode.parse().map_err(InputError::InvalidMode)?)
            }
            "set" => {
                let args = required(rest, "set", "set <key> <value>")?;
                let (key, value) = args.split_once(char::is_whitespace).ok_or(
                    InputError::MissingArgument {
                        command: "set",
                        usage: "set <key> <value>",
                    },
                )?;
                InputCommand::Set {
                    key: key
                        .parse()
                        .map_err(|_| InputError::UnknownSetting(key.to_string()))?,
                    value: value.trim().to_string(),
                }
            }
            "defaults" => InputCommand::Defaults,
            "theme" => InputCommand::Theme,
            "alarm" => InputCommand::TestAlarm,
            "music" => InputCommand::Music,
            "add" | "a" => InputCommand::Add(rest.to_string()),
            "done" | "d" => InputCommand::Done(task_id(rest, "done")?),
            "rm" | "remove" => InputCommand::Remove(task_id(rest, "rm")?),
            "tasks" | "ls" => InputCommand::Tasks,
            "settings" => InputCommand::Settings,
            "status" | "s" => InputCommand::Status,
            "json" => InputCommand::Json,
            "help" | "h" | "?" => InputCommand::Help,
            "quit" | "q" | "exit" => InputCommand::Quit,
            other => return Err(InputError::UnknownCommand(other.to_string())),
        };
        Ok(command)
    }
}

fn required<'a>(
    rest: &'a str,
    command: &'static str,
    usage: &'static str,
) -> Result<&'a str, InputError> {
    if rest.is_empty() {
        Err(InputError::MissingArgument { command, usage })
    } else {
        Ok(rest)
    }
}

fn task_id(rest: &str, command: &'static str) -> Result<u64, InputError> {
    let raw = required(rest, command, "<タスクID>")?;
    raw.parse()
        .map_err(|_| InputError::InvalidTaskId(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Result<InputCommand, InputError> {
        line.parse()
    }

    #[test]
    fn test_empty_line_toggles() {
        assert_eq!(parse(""), Ok(InputCommand::Toggle));
        assert_eq!(parse("   "), Ok(InputCommand::Toggle));
        assert_eq!(parse("toggle"), Ok(InputCommand::Toggle));
    }

    #[test]
    fn test_simple_commands() {
        assert_eq!(parse("start"), Ok(InputCommand::Start));
        assert_eq!(parse("PAUSE"), Ok(InputCommand::Pause));
        assert_eq!(parse("reset"), Ok(InputCommand::Reset));
        assert_eq!(parse("defaults"), Ok(InputCommand::Defaults));
        assert_eq!(parse("theme"), Ok(InputCommand::Theme));
        assert_eq!(parse("alarm"), Ok(InputCommand::TestAlarm));
        assert_eq!(parse("music"), Ok(InputCommand::Music));
        assert_eq!(parse("tasks"), Ok(InputCommand::Tasks));
        assert_eq!(parse("settings"), Ok(InputCommand::Settings));
        assert_eq!(parse("status"), Ok(InputCommand::Status));
        assert_eq!(parse("json"), Ok(InputCommand::Json));
        assert_eq!(parse("help"), Ok(InputCommand::Help));
        assert_eq!(parse("q"), Ok(InputCommand::Quit));
    }

    #[test]
    fn test_mode() {
        assert_eq!(parse("mode long"), Ok(InputCommand::Mode(Mode::LongBreak)));
        assert_eq!(
            parse("mode short-break"),
            Ok(InputCommand::Mode(Mode::ShortBreak))
        );
        assert!(matches!(parse("mode nap"), Err(InputError::InvalidMode(_))));
        assert!(matches!(
            parse("mode"),
            Err(InputError::MissingArgument { command: "mode", .. })
        ));
    }

    #[test]
    fn test_set() {
        assert_eq!(
            parse("set music-volume 0.2"),
            Ok(InputCommand::Set {
                key: SettingKey::MusicVolume,
                value: "0.2".to_string(),
            })
        );
        assert!(matches!(
            parse("set colour red"),
            Err(InputError::UnknownSetting(_))
        ));
        assert!(matches!(
            parse("set pomodoro"),
            Err(InputError::MissingArgument { command: "set", .. })
        ));
    }

    #[test]
    fn test_add_keeps_text() {
        assert_eq!(
            parse("add write the report"),
            Ok(InputCommand::Add("write the report".to_string()))
        );
        assert_eq!(parse("add"), Ok(InputCommand::Add(String::new())));
    }

    #[test]
    fn test_task_ids() {
        assert_eq!(parse("done 3"), Ok(InputCommand::Done(3)));
        assert_eq!(parse("rm 7"), Ok(InputCommand::Remove(7)));
        assert!(matches!(parse("done x"), Err(InputError::InvalidTaskId(_))));
        assert!(matches!(
            parse("rm"),
            Err(InputError::MissingArgument { .. })
        ));
    }

    #[test]
    fn test_unknown_command() {
        let err = parse("dance").unwrap_err();
        assert_eq!(err, InputError::UnknownCommand("dance".to_string()));
        assert!(err.suggestion().contains("help"));
    }
}
