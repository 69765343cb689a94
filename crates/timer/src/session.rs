//! Pomodoro / stopwatch state machine.
//!
//! Pure state: nothing here knows about clocks. Something else calls
//! [`SessionTimer::tick`] once per second while the timer runs.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Timer mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    /// Work/break cycling with fixed session lengths
    Pomodoro,
    /// Free-running count-up with laps
    Stopwatch,
}

/// Phase of the Pomodoro cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionType {
    /// Focused work
    Work,
    /// Break after a work session
    ShortBreak,
    /// Break after every fourth work session
    LongBreak,
}

impl SessionType {
    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            SessionType::Work => "Work",
            SessionType::ShortBreak => "Short Break",
            SessionType::LongBreak => "Long Break",
        }
    }
}

impl std::fmt::Display for SessionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Session lengths in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionDurations {
    /// Work session
    pub work: u64,
    /// Short break
    pub short_break: u64,
    /// Long break
    pub long_break: u64,
}

impl SessionDurations {
    /// Length of `session`. Zero lengths are treated as one second.
    pub fn of(&self, session: SessionType) -> u64 {
        let secs = match session {
            SessionType::Work => self.work,
            SessionType::ShortBreak => self.short_break,
            SessionType::LongBreak => self.long_break,
        };
        secs.max(1)
    }
}

impl Default for SessionDurations {
    fn default() -> Self {
        Self {
            work: 25 * 60,
            short_break: 5 * 60,
            long_break: 15 * 60,
        }
    }
}

/// Work sessions between long breaks.
pub const SESSIONS_PER_LONG_BREAK: u32 = 4;

/// Pending "session complete" notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionComplete {
    /// Session that just ended
    pub finished: SessionType,
    /// Session the timer advanced to
    pub next: SessionType,
}

/// Result of one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Timer was not running; nothing changed
    Idle,
    /// Elapsed advanced
    Ticked {
        /// New elapsed seconds
        elapsed: u64,
    },
    /// A Pomodoro session ran out; the timer stopped and advanced
    Completed(SessionComplete),
}

/// The timer state machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionTimer {
    mode: Mode,
    running: bool,
    session: SessionType,
    elapsed: u64,
    laps: Vec<u64>,
    work_sessions_completed: u32,
    notification: Option<SessionComplete>,
    durations: SessionDurations,
}

impl SessionTimer {
    /// Idle Pomodoro timer at the start of a work session.
    pub fn new() -> Self {
        Self::with_durations(SessionDurations::default())
    }

    /// Idle Pomodoro timer with custom session lengths.
    pub fn with_durations(durations: SessionDurations) -> Self {
        Self {
            mode: Mode::Pomodoro,
            running: false,
            session: SessionType::Work,
            elapsed: 0,
            laps: Vec::new(),
            work_sessions_completed: 0,
            notification: None,
            durations,
        }
    }

    /// Current mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Whether the clock is advancing.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Current Pomodoro phase. Meaningful only in Pomodoro mode.
    pub fn session(&self) -> SessionType {
        self.session
    }

    /// Seconds elapsed in the current session.
    pub fn elapsed(&self) -> u64 {
        self.elapsed
    }

    /// Recorded laps, oldest first.
    pub fn laps(&self) -> &[u64] {
        &self.laps
    }

    /// Work sessions finished since the last reset or long break.
    pub fn work_sessions_completed(&self) -> u32 {
        self.work_sessions_completed
    }

    /// Pending notification, if a session just completed.
    pub fn notification(&self) -> Option<SessionComplete> {
        self.notification
    }

    /// Configured session lengths.
    pub fn durations(&self) -> SessionDurations {
        self.durations
    }

    /// Length of the current session; `None` for the stopwatch.
    pub fn duration(&self) -> Option<u64> {
        match self.mode {
            Mode::Pomodoro => Some(self.durations.of(self.session)),
            Mode::Stopwatch => None,
        }
    }

    /// Fraction of the current session done. Always 0 for the stopwatch.
    pub fn progress(&self) -> f64 {
        match self.duration() {
            Some(duration) => self.elapsed as f64 / duration as f64,
            None => 0.0,
        }
    }

    /// Heading shown above the clock.
    pub fn title(&self) -> String {
        match self.mode {
            Mode::Pomodoro => format!("Pomodoro Timer ({})", self.session),
            Mode::Stopwatch => "Stopwatch".to_string(),
        }
    }

    /// Start the clock. No-op when running.
    pub fn start(&mut self) {
        self.running = true;
    }

    /// Stop the clock. No-op when paused.
    pub fn pause(&mut self) {
        self.running = false;
    }

    /// Start when paused, pause when running.
    pub fn toggle(&mut self) {
        self.running = !self.running;
    }

    /// Back to an idle work session with no history.
    pub fn reset(&mut self) {
        self.elapsed = 0;
        self.running = false;
        self.laps.clear();
        self.notification = None;
        self.session = SessionType::Work;
        self.work_sessions_completed = 0;
    }

    /// Reset, then change mode.
    pub fn switch_mode(&mut self, mode: Mode) {
        self.reset();
        self.mode = mode;
        debug!(?mode, "timer mode switched");
    }

    /// Record a lap. Only the stopwatch records laps, and only once it has
    /// counted something.
    pub fn add_lap(&mut self) {
        if self.mode == Mode::Stopwatch && self.elapsed > 0 {
            self.laps.push(self.elapsed);
        }
    }

    /// Clear the pending notification and park the timer. Idempotent.
    pub fn dismiss_notification(&mut self) {
        self.notification = None;
        self.elapsed = 0;
        self.running = false;
    }

    /// Advance one second.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.running {
            return TickOutcome::Idle;
        }
        self.elapsed += 1;

        let Some(duration) = self.duration() else {
            return TickOutcome::Ticked { elapsed: self.elapsed };
        };
        if self.elapsed < duration {
            return TickOutcome::Ticked { elapsed: self.elapsed };
        }

        let finished = self.session;
        let next = self.next_session();
        self.running = false;
        self.elapsed = 0;
        self.session = next;
        let complete = SessionComplete { finished, next };
        self.notification = Some(complete);
        info!(
            finished = %finished,
            next = %next,
            work_sessions = self.work_sessions_completed,
            "session complete"
        );
        TickOutcome::Completed(complete)
    }

    /// Pick the session after the current one, updating the work counter.
    fn next_session(&mut self) -> SessionType {
        match self.session {
            SessionType::Work => {
                self.work_sessions_completed += 1;
                if self.work_sessions_completed % SESSIONS_PER_LONG_BREAK == 0 {
                    SessionType::LongBreak
                } else {
                    SessionType::ShortBreak
                }
            }
            SessionType::ShortBreak => SessionType::Work,
            SessionType::LongBreak => {
                self.work_sessions_completed = 0;
                SessionType::Work
            }
        }
    }
}

impl Default for SessionTimer {
    fn default() -> Self {
        Self::new()
    }
}

/// Format seconds as `MM:SS`. Minutes are not capped at 59.
pub fn format_clock(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_ticks(timer: &mut SessionTimer, n: u64) -> Option<SessionComplete> {
        let mut last = None;
        for _ in 0..n {
            if let TickOutcome::Completed(c) = timer.tick() {
                last = Some(c);
            }
        }
        last
    }

    fn complete_session(timer: &mut SessionTimer) -> SessionComplete {
        timer.start();
        let duration = timer.duration().unwrap();
        let complete = run_ticks(timer, duration).unwrap();
        timer.dismiss_notification();
        complete
    }

    #[test]
    fn test_start_pause_are_idempotent() {
        let mut timer = SessionTimer::new();
        timer.start();
        timer.start();
        assert!(timer.is_running());
        timer.pause();
        timer.pause();
        assert!(!timer.is_running());
    }

    #[test]
    fn test_tick_while_paused_is_idle() {
        let mut timer = SessionTimer::new();
        assert_eq!(timer.tick(), TickOutcome::Idle);
        assert_eq!(timer.elapsed(), 0);
    }

    #[test]
    fn test_work_session_completes_after_1500_ticks() {
        let mut timer = SessionTimer::new();
        timer.start();
        assert_eq!(run_ticks(&mut timer, 1499), None);
        assert_eq!(timer.elapsed(), 1499);

        let outcome = timer.tick();
        assert_eq!(
            outcome,
            TickOutcome::Completed(SessionComplete {
                finished: SessionType::Work,
                next: SessionType::ShortBreak,
            })
        );
        assert_eq!(timer.session(), SessionType::ShortBreak);
        assert_eq!(timer.elapsed(), 0);
        assert!(!timer.is_running());
        assert!(timer.notification().is_some());
        assert_eq!(timer.work_sessions_completed(), 1);
    }

    #[test]
    fn test_fourth_work_session_earns_long_break() {
        let mut timer = SessionTimer::with_durations(SessionDurations {
            work: 3,
            short_break: 2,
            long_break: 5,
        });

        for round in 1..=3 {
            let c = complete_session(&mut timer);
            assert_eq!(c.next, SessionType::ShortBreak);
            assert_eq!(timer.work_sessions_completed(), round);
            let c = complete_session(&mut timer);
            assert_eq!(c.next, SessionType::Work);
        }

        let c = complete_session(&mut timer);
        assert_eq!(c.next, SessionType::LongBreak);
        assert_eq!(timer.work_sessions_completed(), 4);

        let c = complete_session(&mut timer);
        assert_eq!(c.finished, SessionType::LongBreak);
        assert_eq!(c.next, SessionType::Work);
        assert_eq!(timer.work_sessions_completed(), 0);
    }

    #[test]
    fn test_short_break_keeps_counter() {
        let mut timer = SessionTimer::new();
        complete_session(&mut timer);
        complete_session(&mut timer);
        assert_eq!(timer.session(), SessionType::Work);
        assert_eq!(timer.work_sessions_completed(), 1);
    }

    #[test]
    fn test_stopwatch_never_completes() {
        let mut timer = SessionTimer::new();
        timer.switch_mode(Mode::Stopwatch);
        timer.start();
        assert_eq!(run_ticks(&mut timer, 5000), None);
        assert_eq!(timer.elapsed(), 5000);
        assert!(timer.is_running());
        assert_eq!(timer.progress(), 0.0);
        assert_eq!(timer.duration(), None);
    }

    #[test]
    fn test_laps_only_in_stopwatch() {
        let mut timer = SessionTimer::new();
        timer.start();
        run_ticks(&mut timer, 10);
        timer.add_lap();
        assert!(timer.laps().is_empty());

        timer.switch_mode(Mode::Stopwatch);
        timer.add_lap();
        assert!(timer.laps().is_empty(), "no lap at zero elapsed");

        timer.start();
        run_ticks(&mut timer, 7);
        timer.add_lap();
        run_ticks(&mut timer, 3);
        timer.add_lap();
        assert_eq!(timer.laps(), &[7, 10]);
    }

    #[test]
    fn test_switch_mode_always_resets() {
        let mut timer = SessionTimer::new();
        timer.switch_mode(Mode::Stopwatch);
        timer.start();
        run_ticks(&mut timer, 42);
        timer.add_lap();

        timer.switch_mode(Mode::Pomodoro);
        assert_eq!(timer.mode(), Mode::Pomodoro);
        assert_eq!(timer.elapsed(), 0);
        assert!(!timer.is_running());
        assert!(timer.laps().is_empty());
        assert_eq!(timer.session(), SessionType::Work);
        assert_eq!(timer.work_sessions_completed(), 0);
    }

    #[test]
    fn test_reset_clears_notification_and_counter() {
        let mut timer = SessionTimer::with_durations(SessionDurations {
            work: 1,
            short_break: 1,
            long_break: 1,
        });
        timer.start();
        timer.tick();
        assert!(timer.notification().is_some());

        timer.reset();
        assert!(timer.notification().is_none());
        assert_eq!(timer.session(), SessionType::Work);
        assert_eq!(timer.work_sessions_completed(), 0);
    }

    #[test]
    fn test_dismiss_parks_timer() {
        let mut timer = SessionTimer::new();
        timer.start();
        run_ticks(&mut timer, 30);
        timer.dismiss_notification();
        timer.dismiss_notification();
        assert_eq!(timer.elapsed(), 0);
        assert!(!timer.is_running());
    }

    #[test]
    fn test_progress_fraction() {
        let mut timer = SessionTimer::new();
        timer.start();
        run_ticks(&mut timer, 750);
        assert_eq!(timer.progress(), 0.5);
    }

    #[test]
    fn test_title_and_clock() {
        let mut timer = SessionTimer::new();
        assert_eq!(timer.title(), "Pomodoro Timer (Work)");
        timer.switch_mode(Mode::Stopwatch);
        assert_eq!(timer.title(), "Stopwatch");
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(1500), "25:00");
        assert_eq!(format_clock(6001), "100:01");
    }
}
