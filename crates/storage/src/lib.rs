//! Storage abstraction and implementations for the planner.
//!
//! This crate provides a key-value storage interface with a JSON file
//! implementation and an in-memory one.

#![warn(missing_docs)]

pub mod trait_;
pub mod json_storage;
pub mod memory;

pub use trait_::{KeyValueStore, StorageError, Result, load, save};
pub use json_storage::JsonFileStore;
pub use memory::MemoryStore;

/// Record holding the task list.
pub const TASKS_KEY: &str = "tasks";

/// Record holding the goal list.
pub const GOALS_KEY: &str = "goals";
