//! End-to-End Tests for the FocusFlow CLI.
//!
//! These tests run the compiled binary and verify complete user workflows:
//! - Catalog listings
//! - Shell completions
//! - Interactive sessions driven through stdin
//! - Argument validation

use assert_cmd::Command;
use predicates::prelude::*;

// ============================================================================
// Test Helpers
// ============================================================================

/// Get the `focusflow` command for testing.
fn focusflow_cmd() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_focusflow"));
    // Suppress tracing output during tests
    cmd.env("RUST_LOG", "error");
    cmd
}

/// A `run` command with sound disabled and a private assets directory.
fn run_cmd(assets: &tempfile::TempDir) -> Command {
    let mut cmd = focusflow_cmd();
    cmd.arg("run")
        .arg("--no-sound")
        .arg("--assets-dir")
        .arg(assets.path());
    cmd
}

// ============================================================================
// Catalogs
// ============================================================================

mod catalogs {
    use super::*;

    #[test]
    fn sounds_lists_alarms_and_tracks() {
        let assets = tempfile::tempdir().unwrap();
        focusflow_cmd()
            .arg("sounds")
            .arg("--assets-dir")
            .arg(assets.path())
            .assert()
            .success()
            .stdout(predicate::str::contains("bell"))
            .stdout(predicate::str::contains("Digital Beep"))
            .stdout(predicate::str::contains("lofi1"))
            .stdout(predicate::str::contains("未ダウンロード"));
    }

    #[test]
    fn sounds_reports_downloaded_files() {
        let assets = tempfile::tempdir().unwrap();
        std::fs::write(assets.path().join("jazz1.mp3"), b"fake").unwrap();

        focusflow_cmd()
            .arg("sounds")
            .arg("--assets-dir")
            .arg(assets.path())
            .assert()
            .success()
            .stdout(predicate::str::is_match(r"jazz1\s+Jazz Coffee Shop\s+\[ファイル\]").unwrap());
    }

    #[test]
    fn backgrounds_lists_palettes_and_themes() {
        focusflow_cmd()
            .arg("backgrounds")
            .assert()
            .success()
            .stdout(predicate::str::contains("gradient-purple"))
            .stdout(predicate::str::contains("Coral Reef"))
            .stdout(predicate::str::contains("dark"));
    }

    #[test]
    fn completions_bash() {
        focusflow_cmd()
            .args(["completions", "bash"])
            .assert()
            .success()
            .stdout(predicate::str::contains("focusflow"));
    }

    #[test]
    fn no_args_prints_help() {
        focusflow_cmd()
            .assert()
            .success()
            .stdout(predicate::str::contains("Usage"));
    }
}

// ============================================================================
// Interactive Session
// ============================================================================

mod session {
    use super::*;

    #[test]
    fn tasks_added_from_stdin() {
        let assets = tempfile::tempdir().unwrap();
        run_cmd(&assets)
            .write_stdin("add write report\nadd   \ntasks\nquit\n")
            .assert()
            .success()
            .stdout(predicate::str::contains("タスク #1 を追加しました"))
            .stdout(predicate::str::contains("[ ] write report"))
            .stdout(predicate::str::contains("タスク #2").not());
    }

    #[test]
    fn startup_tasks_and_durations() {
        let assets = tempfile::tempdir().unwrap();
        run_cmd(&assets)
            .args(["--pomodoro", "50", "--task", "plan", "--task", "review"])
            .write_stdin("tasks\n")
            .assert()
            .success()
            .stdout(predicate::str::contains("残り時間: 50:00"))
            .stdout(predicate::str::contains("(0/2 完了)"));
    }

    #[test]
    fn settings_are_applied() {
        let assets = tempfile::tempdir().unwrap();
        run_cmd(&assets)
            .write_stdin("set short-break 0\nset music-volume 2\nmode short\nstatus\nquit\n")
            .assert()
            .success()
            .stdout(predicate::str::contains("short-break = 1"))
            .stdout(predicate::str::contains("music-volume = 1.00"))
            .stdout(predicate::str::contains("残り時間: 01:00"));
    }

    #[test]
    fn json_snapshot() {
        let assets = tempfile::tempdir().unwrap();
        run_cmd(&assets)
            .args(["--theme", "dark", "--music", "lofi2"])
            .write_stdin("json\n")
            .assert()
            .success()
            .stdout(predicate::str::contains("\"clock\": \"25:00\""))
            .stdout(predicate::str::contains("\"theme\": \"dark\""))
            .stdout(predicate::str::contains("\"music_track\": \"lofi2\""));
    }

    #[test]
    fn bad_input_reports_error_and_continues() {
        let assets = tempfile::tempdir().unwrap();
        run_cmd(&assets)
            .write_stdin("dance\nset auto-start-breaks maybe\nstatus\n")
            .assert()
            .success()
            .stderr(predicate::str::contains("不明なコマンドです: dance"))
            .stderr(predicate::str::contains("auto-start-breaks"))
            .stdout(predicate::str::contains("残り時間: 25:00"));
    }
}

// ============================================================================
// Argument Validation
// ============================================================================

mod validation {
    use super::*;

    #[test]
    fn zero_pomodoro_rejected() {
        focusflow_cmd()
            .args(["run", "--pomodoro", "0"])
            .assert()
            .failure();
    }

    #[test]
    fn unknown_layout_rejected() {
        let assets = tempfile::tempdir().unwrap();
        run_cmd(&assets)
            .args(["--layout", "stereo"])
            .write_stdin("quit\n")
            .assert()
            .failure()
            .stderr(predicate::str::contains("stereo"));
    }

    #[test]
    fn blank_task_rejected() {
        focusflow_cmd()
            .args(["run", "--task", " "])
            .assert()
            .failure()
            .stderr(predicate::str::contains("タスクは空にできません"));
    }
}
