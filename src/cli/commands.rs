//! Command definitions for the FocusFlow CLI.
//!
//! Uses clap derive macro for argument parsing.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::settings::{SettingKey, Settings, SettingsError};

// ============================================================================
// CLI Structure
// ============================================================================

/// FocusFlow - Pomodoro timer with alarm and background music
#[derive(Parser, Debug)]
#[command(
    name = "focusflow",
    version,
    about = "ターミナルで動くポモドーロタイマー",
    long_about = "集中・短い休憩・長い休憩を繰り返すポモドーロタイマー。\n\
                  アラーム音、BGM、タスクリストを備えています。",
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

// ============================================================================
// Subcommands
// ============================================================================

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run an interactive timer session (default)
    Run(RunArgs),

    /// List alarm sounds and music tracks
    Sounds {
        /// Directory holding downloaded audio files
        #[arg(long)]
        assets_dir: Option<PathBuf>,
    },

    /// List background palettes and themes
    Backgrounds,

    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ============================================================================
// Run Command Arguments
// ============================================================================

/// Arguments for the run command
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Focus duration in minutes
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    pub pomodoro: Option<u32>,

    /// Short break duration in minutes
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    pub short_break: Option<u32>,

    /// Long break duration in minutes
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    pub long_break: Option<u32>,

    /// Start breaks automatically when a focus interval ends
    #[arg(long)]
    pub auto_start_breaks: bool,

    /// Start focus automatically when a break ends
    #[arg(long)]
    pub auto_start_pomodoros: bool,

    /// Play music whenever the timer runs
    #[arg(long)]
    pub auto_play_music: bool,

    /// Alarm sound id (see `focusflow sounds`)
    #[arg(long)]
    pub alarm: Option<String>,

    /// Music track id, or "none"
    #[arg(long)]
    pub music: Option<String>,

    /// Alarm volume (0.0-1.0)
    #[arg(long, value_parser = parse_volume)]
    pub alarm_volume: Option<f32>,

    /// Music volume (0.0-1.0)
    #[arg(long, value_parser = parse_volume)]
    pub music_volume: Option<f32>,

    /// Text theme (light or dark)
    #[arg(long)]
    pub theme: Option<String>,

    /// Background palette id (see `focusflow backgrounds`)
    #[arg(long)]
    pub background: Option<String>,

    /// Volume layout: split (separate volumes) or shared (one volume)
    #[arg(long)]
    pub layout: Option<String>,

    /// Directory holding downloaded audio files
    #[arg(long)]
    pub assets_dir: Option<PathBuf>,

    /// Disable all sound
    #[arg(long)]
    pub no_sound: bool,

    /// Task to add at startup (repeatable)
    #[arg(short, long = "task", value_parser = validate_task_text)]
    pub tasks: Vec<String>,

    /// Tick period in milliseconds
    #[arg(long, hide = true, default_value = "1000", value_parser = clap::value_parser!(u64).range(1..))]
    pub tick_ms: u64,
}

impl RunArgs {
    /// Builds the initial settings from the command line.
    ///
    /// Layout is applied before volumes so that a shared layout couples
    /// the volumes given on the same command line.
    ///
    /// # Errors
    ///
    /// Returns an error if the layout is not recognized.
    pub fn to_settings(&self) -> Result<Settings, SettingsError> {
        let mut settings = Settings::default();

        if let Some(layout) = &self.layout {
            settings.set(SettingKey::VolumeLayout, layout)?;
        }

        let numbers = [
            (SettingKey::PomodoroMinutes, self.pomodoro),
            (SettingKey::ShortBreakMinutes, self.short_break),
            (SettingKey::LongBreakMinutes, self.long_break),
        ];
        for (key, value) in numbers {
            if let Some(minutes) = value {
                settings.set(key, &minutes.to_string())?;
            }
        }

        settings.auto_start_breaks = self.auto_start_breaks;
        settings.auto_start_pomodoros = self.auto_start_pomodoros;
        settings.auto_play_music = self.auto_play_music;

        let choices = [
            (SettingKey::AlarmSound, &self.alarm),
            (SettingKey::MusicTrack, &self.music),
            (SettingKey::Theme, &self.theme),
            (SettingKey::Background, &self.background),
        ];
        for (key, value) in choices {
            if let Some(id) = value {
                settings.set(key, id)?;
            }
        }

        if let Some(volume) = self.alarm_volume {
            settings.set_volume(SettingKey::AlarmVolume, volume);
        }
        if let Some(volume) = self.music_volume {
            settings.set_volume(SettingKey::MusicVolume, volume);
        }

        Ok(settings)
    }
}

// ============================================================================
// Validation Functions
// ============================================================================

/// Validates a volume argument.
fn parse_volume(s: &str) -> Result<f32, String> {
    let volume: f32 = s
        .trim()
        .parse()
        .map_err(|_| format!("音量は数値で指定してください: {}", s))?;
    if !(0.0..=1.0).contains(&volume) {
        return Err("音量は0.0から1.0の範囲で指定してください".to_string());
    }
    Ok(volume)
}

/// Validates the task text.
///
/// - Must not be blank
/// - Must not exceed 100 characters
fn validate_task_text(s: &str) -> Result<String, String> {
    if s.trim().is_empty() {
        return Err("タスクは空にできません".to_string());
    }
    if s.chars().count() > 100 {
        return Err("タスクは100文字以内にしてください".to_string());
    }
    Ok(s.to_string())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{Theme, VolumeLayout};

    fn run_args(args: &[&str]) -> RunArgs {
        let mut argv = vec!["focusflow", "run"];
        argv.extend_from_slice(args);
        match Cli::parse_from(argv).command {
            Some(Commands::Run(args)) => args,
            other => panic!("Expected Run command, got {:?}", other),
        }
    }

    // ------------------------------------------------------------------------
    // Cli Tests
    // ------------------------------------------------------------------------

    mod cli_tests {
        use super::*;

        #[test]
        fn test_parse_no_args() {
            let cli = Cli::parse_from(["focusflow"]);
            assert!(cli.command.is_none());
            assert!(!cli.verbose);
        }

        #[test]
        fn test_parse_verbose_flag() {
            let cli = Cli::parse_from(["focusflow", "--verbose"]);
            assert!(cli.verbose);
        }

        #[test]
        fn test_parse_short_verbose_after_subcommand() {
            let cli = Cli::parse_from(["focusflow", "run", "-v"]);
            assert!(cli.verbose);
        }

        #[test]
        fn test_parse_sounds_command() {
            let cli = Cli::parse_from(["focusflow", "sounds", "--assets-dir", "/tmp/a"]);
            match cli.command {
                Some(Commands::Sounds { assets_dir }) => {
                    assert_eq!(assets_dir, Some(PathBuf::from("/tmp/a")));
                }
                _ => panic!("Expected Sounds command"),
            }
        }

        #[test]
        fn test_parse_backgrounds_command() {
            let cli = Cli::parse_from(["focusflow", "backgrounds"]);
            assert!(matches!(cli.command, Some(Commands::Backgrounds)));
        }

        #[test]
        fn test_parse_completions_zsh() {
            let cli = Cli::parse_from(["focusflow", "completions", "zsh"]);
            match cli.command {
                Some(Commands::Completions { shell }) => {
                    assert_eq!(shell, clap_complete::Shell::Zsh);
                }
                _ => panic!("Expected Completions command"),
            }
        }
    }

    // ------------------------------------------------------------------------
    // Run Command Tests
    // ------------------------------------------------------------------------

    mod run_args_tests {
        use super::*;

        #[test]
        fn test_defaults_match_settings_defaults() {
            let args = run_args(&[]);
            assert_eq!(args.tick_ms, 1000);
            assert!(args.tasks.is_empty());
            assert_eq!(args.to_settings().unwrap(), Settings::default());
        }

        #[test]
        fn test_durations() {
            let args = run_args(&["--pomodoro", "50", "-s", "10", "--long-break", "30"]);
            let settings = args.to_settings().unwrap();
            assert_eq!(settings.pomodoro_minutes, 50);
            assert_eq!(settings.short_break_minutes, 10);
            assert_eq!(settings.long_break_minutes, 30);
        }

        #[test]
        fn test_zero_duration_rejected() {
            let result = Cli::try_parse_from(["focusflow", "run", "--pomodoro", "0"]);
            assert!(result.is_err());
        }

        #[test]
        fn test_flags() {
            let args = run_args(&[
                "--auto-start-breaks",
                "--auto-start-pomodoros",
                "--auto-play-music",
                "--no-sound",
            ]);
            assert!(args.no_sound);
            let settings = args.to_settings().unwrap();
            assert!(settings.auto_start_breaks);
            assert!(settings.auto_start_pomodoros);
            assert!(settings.auto_play_music);
        }

        #[test]
        fn test_audio_choices() {
            let args = run_args(&["--alarm", "digital", "--music", "jazz1"]);
            let settings = args.to_settings().unwrap();
            assert_eq!(settings.alarm_sound, "digital");
            assert_eq!(settings.music_track, "jazz1");
        }

        #[test]
        fn test_unknown_alarm_falls_back() {
            let settings = run_args(&["--alarm", "gong"]).to_settings().unwrap();
            assert_eq!(settings.alarm().id, "bell");
        }

        #[test]
        fn test_volumes() {
            let args = run_args(&["--alarm-volume", "0.9", "--music-volume", "0.1"]);
            let settings = args.to_settings().unwrap();
            assert!((settings.alarm_volume - 0.9).abs() < f32::EPSILON);
            assert!((settings.music_volume - 0.1).abs() < f32::EPSILON);
        }

        #[test]
        fn test_out_of_range_volume_rejected() {
            let result = Cli::try_parse_from(["focusflow", "run", "--alarm-volume", "1.5"]);
            assert!(result.is_err());
        }

        #[test]
        fn test_shared_layout_couples_volumes() {
            let args = run_args(&["--layout", "shared", "--music-volume", "0.3"]);
            let settings = args.to_settings().unwrap();
            assert_eq!(settings.volume_layout, VolumeLayout::Shared);
            assert!((settings.alarm_volume - 0.3).abs() < f32::EPSILON);
            assert!((settings.music_volume - 0.3).abs() < f32::EPSILON);
        }

        #[test]
        fn test_unknown_layout_is_error() {
            let args = run_args(&["--layout", "stereo"]);
            assert!(args.to_settings().is_err());
        }

        #[test]
        fn test_appearance() {
            let args = run_args(&["--theme", "dark", "--background", "gradient-forest"]);
            let settings = args.to_settings().unwrap();
            assert_eq!(settings.theme, Theme::Dark);
            assert_eq!(settings.background, "gradient-forest");
        }

        #[test]
        fn test_repeated_tasks() {
            let args = run_args(&["--task", "plan", "-t", "write"]);
            assert_eq!(args.tasks, vec!["plan", "write"]);
        }

        #[test]
        fn test_blank_task_rejected() {
            let result = Cli::try_parse_from(["focusflow", "run", "--task", "  "]);
            assert!(result.is_err());
        }

        #[test]
        fn test_hidden_tick_ms() {
            let args = run_args(&["--tick-ms", "10"]);
            assert_eq!(args.tick_ms, 10);
        }
    }
}
