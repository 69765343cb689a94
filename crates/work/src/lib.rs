//! Task and goal management
//!
//! List operations for tasks and goals, and the planner that owns both lists
//! and writes them to storage.

#![warn(missing_docs)]

pub mod visibility;
pub mod tasks;
pub mod goals;
pub mod planner;

pub use visibility::Visibility;
pub use tasks::TaskBoard;
pub use goals::GoalBoard;
pub use planner::{Planner, PlannerError, Result};
