//! Drives a [`SessionTimer`] from a tokio interval.
//!
//! The driver owns at most one ticker task. The ticker is armed whenever the
//! timer is running and is aborted on pause, reset, mode switch, shutdown and
//! drop. A command re-arms only when it changes `running`, the mode or the
//! session; the one-second phase then restarts from that command. Commands
//! that change none of these leave a live ticker and its phase untouched.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, trace};

use crate::session::{Mode, SessionComplete, SessionTimer, SessionType, TickOutcome};

/// Events emitted by the ticker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// One second counted
    Tick {
        /// Elapsed seconds after the tick
        elapsed: u64,
    },
    /// A Pomodoro session finished; the ticker has stopped
    SessionComplete(SessionComplete),
}

/// Owner of the timer state and its ticker task.
pub struct TimerDriver {
    timer: Arc<Mutex<SessionTimer>>,
    events: mpsc::UnboundedSender<TimerEvent>,
    period: Duration,
    ticker: Option<JoinHandle<()>>,
}

impl TimerDriver {
    /// Wrap `timer`, ticking once per second.
    pub fn new(timer: SessionTimer) -> (Self, mpsc::UnboundedReceiver<TimerEvent>) {
        Self::with_period(timer, Duration::from_secs(1))
    }

    /// Wrap `timer` with a custom tick period.
    pub fn with_period(
        timer: SessionTimer,
        period: Duration,
    ) -> (Self, mpsc::UnboundedReceiver<TimerEvent>) {
        let (events, rx) = mpsc::unbounded_channel();
        let driver = Self {
            timer: Arc::new(Mutex::new(timer)),
            events,
            period,
            ticker: None,
        };
        (driver, rx)
    }

    /// Copy of the current timer state.
    pub async fn snapshot(&self) -> SessionTimer {
        self.timer.lock().await.clone()
    }

    /// Whether a live ticker task exists.
    pub fn is_armed(&self) -> bool {
        self.ticker.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Start counting. A running timer keeps its ticker and phase.
    pub async fn start(&mut self) {
        self.apply(SessionTimer::start).await;
    }

    /// Stop counting. A paused timer is left alone.
    pub async fn pause(&mut self) {
        self.apply(SessionTimer::pause).await;
    }

    /// Start when paused, pause when running.
    pub async fn toggle(&mut self) {
        self.apply(SessionTimer::toggle).await;
    }

    /// Reset the timer.
    pub async fn reset(&mut self) {
        self.apply(SessionTimer::reset).await;
    }

    /// Reset and change mode.
    pub async fn switch_mode(&mut self, mode: Mode) {
        self.apply(|timer| timer.switch_mode(mode)).await;
    }

    /// Record a lap. Does not touch the ticker.
    pub async fn add_lap(&mut self) {
        self.timer.lock().await.add_lap();
    }

    /// Clear a pending notification and park the timer.
    pub async fn dismiss_notification(&mut self) {
        self.apply(SessionTimer::dismiss_notification).await;
    }

    /// Stop the ticker for good. The timer state is kept.
    pub fn shutdown(&mut self) {
        self.disarm();
    }

    fn disarm(&mut self) {
        if let Some(handle) = self.ticker.take() {
            handle.abort();
            trace!("ticker disarmed");
        }
    }

    /// Run `command` on the timer and re-arm only if it changed whether the
    /// timer runs, its mode or its session.
    async fn apply(&mut self, command: impl FnOnce(&mut SessionTimer)) {
        let changed = {
            let mut timer = self.timer.lock().await;
            let before = arming_state(&timer);
            command(&mut *timer);
            arming_state(&timer) != before
        };
        if changed {
            self.rearm().await;
        }
    }

    async fn rearm(&mut self) {
        self.disarm();
        if !self.timer.lock().await.is_running() {
            return;
        }

        let timer = Arc::clone(&self.timer);
        let events = self.events.clone();
        let period = self.period;
        self.ticker = Some(tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                let outcome = timer.lock().await.tick();
                match outcome {
                    TickOutcome::Idle => break,
                    TickOutcome::Ticked { elapsed } => {
                        events.send(TimerEvent::Tick { elapsed }).ok();
                    }
                    TickOutcome::Completed(complete) => {
                        events.send(TimerEvent::SessionComplete(complete)).ok();
                        break;
                    }
                }
            }
        }));
        debug!(period_ms = self.period.as_millis() as u64, "ticker armed");
    }
}

fn arming_state(timer: &SessionTimer) -> (bool, Mode, SessionType) {
    (timer.is_running(), timer.mode(), timer.session())
}

impl Drop for TimerDriver {
    fn drop(&mut self) {
        self.disarm();
    }
}
