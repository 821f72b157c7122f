//! Cancellable one-second tick scheduler.
//!
//! The session loop awaits [`Ticker::tick`] inside `tokio::select!`. A
//! cancelled ticker owns no interval and its `tick` future never resolves,
//! so no tick can be delivered after `cancel` returns.

use std::future;

use tokio::time::{interval_at, Duration, Instant, Interval, MissedTickBehavior};
use tracing::debug;

/// Default tick period.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// A periodic tick source that can be armed and cancelled.
#[derive(Debug)]
pub struct Ticker {
    period: Duration,
    interval: Option<Interval>,
}

impl Ticker {
    /// Creates a cancelled ticker with the given period.
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            interval: None,
        }
    }

    /// Starts ticking; the first tick arrives one period from now.
    ///
    /// Arming an armed ticker keeps the current schedule.
    pub fn arm(&mut self) {
        if self.interval.is_some() {
            return;
        }
        let mut ticker = interval_at(Instant::now() + self.period, self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        self.interval = Some(ticker);
        debug!(period_ms = self.period.as_millis() as u64, "ticker armed");
    }

    /// Stops ticking. Calling this more than once is harmless.
    pub fn cancel(&mut self) {
        if self.interval.take().is_some() {
            debug!("ticker cancelled");
        }
    }

    /// Arms the ticker when `running`, cancels it otherwise.
    pub fn sync(&mut self, running: bool) {
        if running {
            self.arm();
        } else {
            self.cancel();
        }
    }

    /// Returns true while armed.
    pub fn is_armed(&self) -> bool {
        self.interval.is_some()
    }

    /// Waits for the next tick. Pends forever while cancelled.
    pub async fn tick(&mut self) {
        match self.interval.as_mut() {
            Some(interval) => {
                interval.tick().await;
            }
            None => future::pending::<()>().await,
        }
    }
}

impl Default for Ticker {
    fn default() -> Self {
        Self::new(TICK_PERIOD)
    }
}
