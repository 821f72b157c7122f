//! Session loop tests under a paused tokio clock.
//!
//! Input is fed through an in-memory duplex pipe while the clock advances
//! automatically whenever the session is idle, so a 25 minute interval runs
//! in milliseconds of real time.

use std::future;

use tokio::io::{AsyncWriteExt, BufReader, DuplexStream};
use tokio::time::{sleep, Duration};

use focusflow::cli::Session;
use focusflow::engine::{Ticker, TICK_PERIOD};
use focusflow::settings::{SettingKey, Settings};
use focusflow::sound::{AudioCoordinator, MockSoundPlayer, SoundLibrary};
use focusflow::types::Mode;
use focusflow::widget::TimerWidget;

// ============================================================================
// Test Helpers
// ============================================================================

fn create_session(settings: Settings) -> (Session, MockSoundPlayer) {
    let alarm = MockSoundPlayer::new();
    let audio = AudioCoordinator::new(
        Box::new(alarm.clone()),
        Box::new(MockSoundPlayer::new()),
        SoundLibrary::new("/nonexistent"),
    );
    let widget = TimerWidget::new(settings, audio);
    (Session::new(widget, Ticker::new(TICK_PERIOD)), alarm)
}

async fn send(client: &mut DuplexStream, line: &str) {
    client.write_all(line.as_bytes()).await.unwrap();
    client.write_all(b"\n").await.unwrap();
}

// ============================================================================
// Ticker
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_ticker_never_fires_after_cancel() {
    let mut ticker = Ticker::new(TICK_PERIOD);
    ticker.arm();
    ticker.tick().await;
    ticker.cancel();
    ticker.cancel();

    let fired = tokio::select! {
        _ = ticker.tick() => true,
        _ = sleep(Duration::from_secs(3600)) => false,
    };

    assert!(!fired);
}

#[tokio::test(start_paused = true)]
async fn test_ticker_period() {
    let mut ticker = Ticker::new(TICK_PERIOD);
    let start = tokio::time::Instant::now();
    ticker.arm();

    for _ in 0..3 {
        ticker.tick().await;
    }

    assert_eq!(start.elapsed(), Duration::from_secs(3));
}

// ============================================================================
// Session Loop
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_pause_stops_countdown() {
    let (mut session, _) = create_session(Settings::default());
    let (mut client, server) = tokio::io::duplex(1024);

    let driver = async move {
        send(&mut client, "start").await;
        sleep(Duration::from_millis(3500)).await;
        send(&mut client, "pause").await;
        sleep(Duration::from_secs(60)).await;
        send(&mut client, "quit").await;
    };

    let (result, ()) = tokio::join!(
        session.run_until(BufReader::new(server), future::pending()),
        driver
    );

    result.unwrap();
    assert_eq!(session.widget().state().remaining_seconds, 1497);
    assert!(!session.widget().is_running());
    assert!(!session.is_ticking());
}

#[tokio::test(start_paused = true)]
async fn test_full_focus_interval() {
    let (mut session, alarm) = create_session(Settings::default());
    let (mut client, server) = tokio::io::duplex(1024);

    let driver = async move {
        send(&mut client, "").await;
        sleep(Duration::from_secs(1500) + Duration::from_millis(500)).await;
        send(&mut client, "quit").await;
    };

    let (result, ()) = tokio::join!(
        session.run_until(BufReader::new(server), future::pending()),
        driver
    );

    result.unwrap();
    let state = session.widget().state();
    assert_eq!(state.mode, Mode::ShortBreak);
    assert_eq!(state.completed_focus_cycles, 1);
    assert_eq!(state.remaining_seconds, 300);
    assert!(!state.running);
    assert_eq!(alarm.play_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_auto_start_keeps_ticking() {
    let mut settings = Settings::default();
    settings.set(SettingKey::PomodoroMinutes, "1").unwrap();
    settings.set(SettingKey::AutoStartBreaks, "on").unwrap();
    let (mut session, _) = create_session(settings);
    let (mut client, server) = tokio::io::duplex(1024);

    let driver = async move {
        send(&mut client, "start").await;
        sleep(Duration::from_secs(70) + Duration::from_millis(500)).await;
        send(&mut client, "quit").await;
    };

    let (result, ()) = tokio::join!(
        session.run_until(BufReader::new(server), future::pending()),
        driver
    );

    result.unwrap();
    let state = session.widget().state();
    assert_eq!(state.mode, Mode::ShortBreak);
    assert_eq!(state.remaining_seconds, 290);
}

#[tokio::test(start_paused = true)]
async fn test_end_of_input_ends_session() {
    let (mut session, _) = create_session(Settings::default());
    let input: &[u8] = b"add plan\nadd   \nadd write\ndone 1\n";

    session
        .run_until(BufReader::new(input), future::pending())
        .await
        .unwrap();

    let tasks = session.widget().tasks();
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks.completed_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_future_ends_session() {
    let (mut session, _) = create_session(Settings::default());
    let (_client, server) = tokio::io::duplex(1024);
    session.handle_line("start");

    session
        .run_until(BufReader::new(server), sleep(Duration::from_millis(10_500)))
        .await
        .unwrap();

    assert_eq!(session.widget().state().remaining_seconds, 1490);
    assert!(!session.is_ticking());
}
