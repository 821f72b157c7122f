//! FocusFlow - A Pomodoro timer for the terminal
//!
//! This tool helps you stay focused using the Pomodoro Technique:
//! - 25 minutes of focused work
//! - 5 minutes of short break
//! - 15 minutes of long break after 4 pomodoros

use std::time::Duration;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use tokio::io::BufReader;
use tracing::warn;

use focusflow::cli::{Cli, Commands, Display, RunArgs, Session};
use focusflow::engine::Ticker;
use focusflow::sound::{
    try_open_device, AudioCoordinator, SilentPlayer, SoundLibrary, SoundPlayer,
};
use focusflow::widget::TimerWidget;

/// Main entry point
#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    init_tracing(cli.verbose);

    // Execute command
    if let Err(e) = execute(cli).await {
        Display::show_error(&format!("{:#}", e), None);
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber for logging.
///
/// Logs go to stderr so they never interleave with the clock on stdout.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

/// Executes the CLI command.
async fn execute(cli: Cli) -> Result<()> {
    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    match cli.command {
        Some(Commands::Run(args)) => run_session(args).await?,
        Some(Commands::Sounds { assets_dir }) => {
            let library = assets_dir.map(SoundLibrary::new).unwrap_or_default();
            Display::show_sounds(&library);
        }
        Some(Commands::Backgrounds) => Display::show_backgrounds(),
        Some(Commands::Completions { shell }) => {
            generate_completions(shell);
        }
        None => {
            // No command provided, show help
            Cli::command().print_help()?;
        }
    }

    Ok(())
}

/// Runs an interactive session on stdin until quit, EOF or Ctrl-C.
async fn run_session(args: RunArgs) -> Result<()> {
    let settings = args.to_settings().context("起動オプションが不正です")?;
    let library = args
        .assets_dir
        .clone()
        .map(SoundLibrary::new)
        .unwrap_or_default();

    // The device must outlive every player created from it.
    let device = if args.no_sound {
        None
    } else {
        try_open_device()
    };
    let (alarm, music): (Box<dyn SoundPlayer>, Box<dyn SoundPlayer>) = match &device {
        Some(device) => (Box::new(device.player()), Box::new(device.player())),
        None if args.no_sound => (
            Box::new(SilentPlayer::disabled()),
            Box::new(SilentPlayer::disabled()),
        ),
        None => (
            Box::new(SilentPlayer::unavailable("no output device")),
            Box::new(SilentPlayer::unavailable("no output device")),
        ),
    };

    let mut widget = TimerWidget::new(settings, AudioCoordinator::new(alarm, music, library));
    for task in &args.tasks {
        widget.add_task(task);
    }

    Display::show_status(&widget.snapshot());
    println!("'help' でコマンド一覧を表示します");

    let ticker = Ticker::new(Duration::from_millis(args.tick_ms));
    let mut session = Session::new(widget, ticker);
    let stdin = BufReader::new(tokio::io::stdin());

    session.run_until(stdin, shutdown_signal()).await
}

/// Resolves on Ctrl-C. Never resolves if the handler cannot be installed.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}

/// Generates shell completion scripts.
fn generate_completions(shell: clap_complete::Shell) {
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}

// ============================================================================
// Tests
// ============================================================================
