//! Tick scheduling for the presentation layer
//!
//! The engine never owns a timer. The driver asks it for state transitions and
//! starts or stops this scheduler to match the resulting phase.

use std::time::Duration;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};

use crate::game::Phase;

pub struct TickScheduler {
    period: Duration,
    interval: Option<Interval>,
}

impl TickScheduler {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            interval: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_ticking(&self) -> bool {
        self.interval.is_some()
    }

    /// Begin ticking one period from now. No-op if already ticking.
    ///
    /// Must be called inside a tokio runtime.
    pub fn start(&mut self) {
        if self.interval.is_none() {
            let mut interval = interval_at(Instant::now() + self.period, self.period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            self.interval = Some(interval);
        }
    }

    pub fn stop(&mut self) {
        self.interval = None;
    }

    /// Tick only while the game is running
    pub fn follow(&mut self, phase: Phase) {
        if phase == Phase::Running {
            self.start();
        } else {
            self.stop();
        }
    }

    /// Resolve at the next tick; never resolves while stopped
    pub async fn tick(&mut self) {
        match self.interval.as_mut() {
            Some(interval) => {
                interval.tick().await;
            }
            None => std::future::pending::<()>().await,
        }
    }
}
