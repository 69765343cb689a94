//! Session timer
//!
//! Pomodoro work/break cycling and a stopwatch with laps, plus the tokio
//! ticker that advances them once per second.

#![warn(missing_docs)]

pub mod session;
pub mod driver;

pub use session::{
    Mode, SessionType, SessionDurations, SessionComplete, SessionTimer, TickOutcome,
    SESSIONS_PER_LONG_BREAK, format_clock,
};
pub use driver::{TimerDriver, TimerEvent};
