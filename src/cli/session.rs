//! Interactive timer session.
//!
//! A single `select!` loop serializes three sources: lines from the input,
//! ticks from the [`Ticker`] and the shutdown future (Ctrl-C in the binary).
//! After every action the ticker is synced to the widget, so a paused or
//! reset timer never receives another tick.

use std::future::Future;
use std::io::{IsTerminal, Write};

use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, info};

use super::display::Display;
use super::input::InputCommand;
use crate::engine::Ticker;
use crate::settings::Theme;
use crate::widget::{TimerWidget, WidgetError};

/// Bright white, used for the clock in the dark theme.
const DARK_THEME_ACCENT: u8 = 15;

/// Whether the loop should keep reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// An interactive session driving a [`TimerWidget`].
#[derive(Debug)]
pub struct Session {
    widget: TimerWidget,
    ticker: Ticker,
    /// Redraw the clock in place on every tick
    live: bool,
    /// A live clock line is on screen without a trailing newline
    line_open: bool,
}

impl Session {
    /// Creates a session. The live clock is enabled when stdout is a terminal.
    pub fn new(widget: TimerWidget, ticker: Ticker) -> Self {
        Self {
            widget,
            ticker,
            live: std::io::stdout().is_terminal(),
            line_open: false,
        }
    }

    /// Returns the widget.
    pub fn widget(&self) -> &TimerWidget {
        &self.widget
    }

    /// Returns true while the ticker is armed.
    pub fn is_ticking(&self) -> bool {
        self.ticker.is_armed()
    }

    /// Runs until `quit`, end of input or `shutdown` completes.
    ///
    /// # Errors
    ///
    /// Returns an error if reading the input fails.
    pub async fn run_until<R, F>(&mut self, input: R, shutdown: F) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        F: Future<Output = ()>,
    {
        let mut lines = input.lines();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                biased;

                _ = &mut shutdown => {
                    info!("Shutdown requested");
                    break;
                }
                line = lines.next_line() => {
                    let Some(line) = line.context("入力の読み込みに失敗しました")? else {
                        debug!("Input closed");
                        break;
                    };
                    if self.handle_line(&line) == Flow::Quit {
                        break;
                    }
                }
                _ = self.ticker.tick() => self.on_tick(),
            }
        }

        self.ticker.cancel();
        self.close_line();
        Ok(())
    }

    /// Parses and executes one input line.
    pub fn handle_line(&mut self, line: &str) -> Flow {
        match line.parse::<InputCommand>() {
            Ok(command) => self.handle(command),
            Err(e) => {
                self.close_line();
                Display::show_error(&e.to_string(), Some(e.suggestion()));
                Flow::Continue
            }
        }
    }

    /// Executes one command and syncs the ticker.
    pub fn handle(&mut self, command: InputCommand) -> Flow {
        self.close_line();
        debug!(?command, "Handling command");

        let flow = match self.execute(command) {
            Ok(flow) => flow,
            Err(e) => {
                Display::show_error(&e.to_string(), Some(e.suggestion()));
                Flow::Continue
            }
        };

        self.ticker.sync(self.widget.is_running());
        flow
    }

    /// Advances the widget by one second.
    pub fn on_tick(&mut self) {
        let before = self.widget.state().mode;

        if let Err(e) = self.widget.tick() {
            self.close_line();
            Display::show_error(&e.to_string(), Some(e.suggestion()));
        }

        let snapshot = self.widget.snapshot();
        if snapshot.mode != before {
            self.close_line();
            println!("{}", Display::render_expired(before, &snapshot));
        } else if self.live {
            print!("\r{}", Display::render_clock_line(&snapshot, self.accent()));
            let _ = std::io::stdout().flush();
            self.line_open = true;
        }

        self.ticker.sync(self.widget.is_running());
    }

    fn execute(&mut self, command: InputCommand) -> Result<Flow, WidgetError> {
        match command {
            InputCommand::Start => {
                self.widget.start()?;
                self.show_clock("* タイマーを開始しました");
            }
            InputCommand::Pause => {
                self.widget.pause()?;
                self.show_clock("|| 一時停止しました");
            }
            InputCommand::Toggle => {
                self.widget.toggle_timer()?;
                let message = if self.widget.is_running() {
                    "* タイマーを開始しました"
                } else {
                    "|| 一時停止しました"
                };
                self.show_clock(message);
            }
            InputCommand::Reset => {
                self.widget.reset()?;
                self.show_clock("[] リセットしました");
            }
            InputCommand::Mode(mode) => {
                self.widget.select_mode(mode)?;
                self.show_clock(&format!(
                    "モードを切り替えました: {}",
                    Display::mode_label(mode)
                ));
            }
            InputCommand::Set { key, value } => {
                self.widget.update_setting(key, &value)?;
                println!("{} = {}", key, self.widget.settings().get(key));
            }
            InputCommand::Defaults => {
                self.widget.restore_defaults()?;
                self.show_clock("設定を初期値に戻しました");
            }
            InputCommand::Theme => {
                self.widget.toggle_theme();
                println!("テーマ: {}", self.widget.settings().theme.as_str());
            }
            InputCommand::TestAlarm => {
                self.widget.test_alarm();
                println!("♪ アラーム: {}", self.widget.settings().alarm().name);
            }
            InputCommand::Music => {
                self.widget.toggle_music();
                if self.widget.audio().is_music_playing() {
                    println!("♪ BGM再生中: {}", self.widget.settings().music().name);
                } else {
                    println!("BGMは停止しています");
                }
            }
            InputCommand::Add(text) => {
                if let Some(id) = self.widget.add_task(&text) {
                    println!("タスク #{} を追加しました", id);
                }
            }
            InputCommand::Done(id) => {
                if self.widget.toggle_task(id) {
                    Display::show_tasks(self.widget.tasks());
                } else {
                    Display::show_error(&format!("タスクが見つかりません: {}", id), None);
                }
            }
            InputCommand::Remove(id) => {
                if self.widget.remove_task(id) {
                    println!("タスク #{} を削除しました", id);
                } else {
                    Display::show_error(&format!("タスクが見つかりません: {}", id), None);
                }
            }
            InputCommand::Tasks => Display::show_tasks(self.widget.tasks()),
            InputCommand::Settings => Display::show_settings(self.widget.settings()),
            InputCommand::Status => Display::show_status(&self.widget.snapshot()),
            InputCommand::Json => match serde_json::to_string_pretty(&self.widget.snapshot()) {
                Ok(json) => println!("{}", json),
                Err(e) => Display::show_error(&e.to_string(), None),
            },
            InputCommand::Help => Display::show_help(),
            InputCommand::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn show_clock(&self, message: &str) {
        println!("{}", message);
        println!(
            "{}",
            Display::render_clock_line(&self.widget.snapshot(), self.accent())
        );
    }

    /// Accent color for the clock, only when drawing to a terminal.
    fn accent(&self) -> Option<u8> {
        if !self.live {
            return None;
        }
        let settings = self.widget.settings();
        Some(match settings.theme {
            Theme::Light => settings.background_palette().accent,
            Theme::Dark => DARK_THEME_ACCENT,
        })
    }

    fn close_line(&mut self) {
        if self.line_open {
            println!();
            self.line_open = false;
        }
    }
}
