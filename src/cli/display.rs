//! Display utilities for the FocusFlow CLI.
//!
//! This module provides formatted output for:
//! - The clock, mode and progress
//! - Task list and settings panel
//! - Sound and background catalogs
//! - Error messages
//!
//! `render_*` functions build the text; `show_*` functions print it.

use std::fmt::Write as _;

use crate::settings::catalog::{ALARM_SOUNDS, BACKGROUNDS, MUSIC_TRACKS};
use crate::settings::{SettingKey, Settings, Theme};
use crate::sound::SoundLibrary;
use crate::tasks::TaskList;
use crate::types::Mode;
use crate::widget::WidgetSnapshot;

/// Width of the progress bar in characters.
const PROGRESS_WIDTH: usize = 20;

// ============================================================================
// Display
// ============================================================================

/// Display utilities for CLI output.
pub struct Display;

impl Display {
    /// Returns the label shown for a mode.
    pub fn mode_label(mode: Mode) -> &'static str {
        match mode {
            Mode::Focus => "集中",
            Mode::ShortBreak => "短い休憩",
            Mode::LongBreak => "長い休憩",
        }
    }

    /// Renders the one-line clock, e.g. `[集中] 24:59 ▶`.
    pub fn render_clock_line(snapshot: &WidgetSnapshot, accent: Option<u8>) -> String {
        let marker = if snapshot.running { "▶" } else { "||" };
        let clock = match accent {
            Some(color) => format!("\x1b[1;38;5;{}m{}\x1b[0m", color, snapshot.clock),
            None => snapshot.clock.clone(),
        };
        format!(
            "[{}] {} {} {}",
            Self::mode_label(snapshot.mode),
            clock,
            marker,
            Self::progress_bar(snapshot.progress_percent, PROGRESS_WIDTH)
        )
    }

    /// Renders the full timer status.
    pub fn render_status(snapshot: &WidgetSnapshot) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "FocusFlow");
        let _ = writeln!(out, "─────────────────────────────");
        let _ = writeln!(out, "モード: {}", Self::mode_label(snapshot.mode));
        let _ = writeln!(out, "残り時間: {}", snapshot.clock);
        let _ = writeln!(
            out,
            "状態: {}",
            if snapshot.running { "実行中" } else { "停止中" }
        );
        let _ = writeln!(
            out,
            "進捗: {} {:.0}%",
            Self::progress_bar(snapshot.progress_percent, PROGRESS_WIDTH),
            snapshot.progress_percent
        );
        let _ = writeln!(out, "完了ポモドーロ: {}", snapshot.completed_focus_cycles);
        let _ = writeln!(out, "{}", Self::long_break_hint(snapshot.cycles_until_long_break));
        if snapshot.music_playing {
            let _ = writeln!(out, "BGM: ♪ {}", snapshot.music_track);
        }
        if snapshot.tasks_total > 0 {
            let _ = writeln!(
                out,
                "タスク: {}/{} 完了",
                snapshot.tasks_completed, snapshot.tasks_total
            );
        }
        out
    }

    /// Renders the hint about the next long break.
    pub fn long_break_hint(cycles_until_long_break: u32) -> String {
        if cycles_until_long_break == 1 {
            "次の集中のあとは長い休憩です".to_string()
        } else {
            format!("長い休憩まであと {} ポモドーロ", cycles_until_long_break)
        }
    }

    /// Renders a progress bar for `percent` (0-100).
    pub fn progress_bar(percent: f64, width: usize) -> String {
        let ratio = (percent / 100.0).clamp(0.0, 1.0);
        let filled = ((ratio * width as f64).round() as usize).min(width);
        format!("[{}{}]", "#".repeat(filled), ".".repeat(width - filled))
    }

    /// Renders the task list.
    pub fn render_tasks(tasks: &TaskList) -> String {
        if tasks.is_empty() {
            return "タスクはありません（'add <テキスト>' で追加）\n".to_string();
        }

        let mut out = String::new();
        let _ = writeln!(
            out,
            "タスク ({}/{} 完了)",
            tasks.completed_count(),
            tasks.len()
        );
        for task in tasks.iter() {
            let check = if task.completed { "x" } else { " " };
            let _ = writeln!(out, "  {:>3}. [{}] {}", task.id, check, task.text);
        }
        if tasks.all_completed() {
            let _ = writeln!(out, "すべてのタスクが完了しました！");
        }
        out
    }

    /// Renders the settings panel.
    pub fn render_settings(settings: &Settings) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "設定");
        let _ = writeln!(out, "─────────────────────────────");
        for key in SettingKey::ALL {
            let _ = writeln!(out, "  {:<22}{}", key.as_str(), settings.get(key));
        }
        let _ = writeln!(
            out,
            "  ({} / {} / {})",
            settings.alarm().name,
            settings.music().name,
            settings.background_palette().name
        );
        out
    }

    /// Renders the alarm and music catalogs with asset availability.
    pub fn render_sounds(library: &SoundLibrary) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "アセット: {}", library.assets_dir().display());
        let _ = writeln!(out);
        let _ = writeln!(out, "アラーム音:");
        for sound in &ALARM_SOUNDS {
            let status = if library.has_asset(sound.file_name) {
                "ファイル"
            } else {
                "合成音"
            };
            let _ = writeln!(out, "  {:<10}{:<18}[{}]", sound.id, sound.name, status);
        }
        let _ = writeln!(out);
        let _ = writeln!(out, "BGM:");
        for track in &MUSIC_TRACKS {
            match (track.file_name, track.url) {
                (Some(file_name), Some(url)) => {
                    let status = if library.has_asset(file_name) {
                        "ファイル".to_string()
                    } else {
                        format!("未ダウンロード: {}", url)
                    };
                    let _ = writeln!(out, "  {:<10}{:<18}[{}]", track.id, track.name, status);
                }
                _ => {
                    let _ = writeln!(out, "  {:<10}{}", track.id, track.name);
                }
            }
        }
        out
    }

    /// Renders the background palettes and themes.
    pub fn render_backgrounds() -> String {
        let mut out = String::new();
        let _ = writeln!(out, "背景:");
        for palette in &BACKGROUNDS {
            let _ = writeln!(out, "  {:<20}{}", palette.id, palette.name);
        }
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "テーマ: {}, {}",
            Theme::Light.as_str(),
            Theme::Dark.as_str()
        );
        out
    }

    /// Renders the interactive command help.
    pub fn render_help() -> String {
        let lines = [
            ("<Enter> / toggle", "開始・一時停止"),
            ("start / pause", "開始 / 一時停止"),
            ("reset", "現在のモードをリセット"),
            ("mode <focus|short|long>", "モードを切り替え"),
            ("set <項目> <値>", "設定を変更"),
            ("defaults", "設定を初期値に戻す"),
            ("theme", "ライト/ダークを切り替え"),
            ("alarm", "アラーム音を試聴"),
            ("music", "BGMを再生・停止"),
            ("add <テキスト>", "タスクを追加"),
            ("done <ID>", "タスクの完了を切り替え"),
            ("rm <ID>", "タスクを削除"),
            ("tasks / settings / status", "一覧を表示"),
            ("json", "状態をJSONで表示"),
            ("quit", "終了"),
        ];
        let mut out = String::from("コマンド:\n");
        for (command, description) in lines {
            let _ = writeln!(out, "  {:<28}{}", command, description);
        }
        out
    }

    /// Renders the message shown when an interval ends.
    pub fn render_expired(from: Mode, snapshot: &WidgetSnapshot) -> String {
        let next = if snapshot.running {
            "開始しました"
        } else {
            "Enter で開始します"
        };
        format!(
            "* {}が終了しました。次は{} ({}) を{}",
            Self::mode_label(from),
            Self::mode_label(snapshot.mode),
            snapshot.clock,
            next
        )
    }

    pub fn show_status(snapshot: &WidgetSnapshot) {
        print!("{}", Self::render_status(snapshot));
    }

    pub fn show_tasks(tasks: &TaskList) {
        print!("{}", Self::render_tasks(tasks));
    }

    pub fn show_settings(settings: &Settings) {
        print!("{}", Self::render_settings(settings));
    }

    pub fn show_sounds(library: &SoundLibrary) {
        print!("{}", Self::render_sounds(library));
    }

    pub fn show_backgrounds() {
        print!("{}", Self::render_backgrounds());
    }

    pub fn show_help() {
        print!("{}", Self::render_help());
    }

    /// Shows an error message with an optional hint.
    pub fn show_error(message: &str, suggestion: Option<&str>) {
        eprintln!("エラー: {}", message);
        if let Some(hint) = suggestion {
            eprintln!("  ヒント: {}", hint);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
