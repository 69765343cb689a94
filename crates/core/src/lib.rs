//! Planner core data models.
//!
//! This crate defines the tasks, sub-tasks and goals that the planner keeps
//! in its persisted lists.

#![warn(missing_docs)]

// Core identities
mod id;
mod category;

// Lists
mod task;
mod goal;

// Re-exports
pub use id::*;
pub use category::{Category, CustomLabel, ESCAPE_CATEGORY};
pub use task::{Task, SubTask, has_text};
pub use goal::{Goal, Period};

/// Timestamp type
pub type Time = chrono::DateTime<chrono::Utc>;
