//! Task model - a to-do item with optional nested sub-tasks.

use serde::{Deserialize, Serialize};
use crate::category::Category;
use crate::id::{SubTaskId, TaskId};
use crate::Time;

/// A task on the task list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier
    pub id: TaskId,

    /// Display text, stored as entered
    pub text: String,

    /// Category
    pub category: Category,

    /// Whether the user ticked it off
    pub completed: bool,

    /// Nested sub-tasks in insertion order
    #[serde(default)]
    pub sub_tasks: Vec<SubTask>,

    /// When created
    pub created_at: Time,
}

impl Task {
    /// Create an open task with no sub-tasks.
    pub fn new(text: impl Into<String>, category: Category) -> Self {
        Self {
            id: TaskId::new(),
            text: text.into(),
            category,
            completed: false,
            sub_tasks: Vec::new(),
            created_at: chrono::Utc::now(),
        }
    }

    /// Find a sub-task by id.
    pub fn sub_task(&self, id: SubTaskId) -> Option<&SubTask> {
        self.sub_tasks.iter().find(|s| s.id == id)
    }

    /// Flip a sub-task. Returns false if the id is absent.
    pub fn toggle_sub_task(&mut self, id: SubTaskId) -> bool {
        match self.sub_tasks.iter_mut().find(|s| s.id == id) {
            Some(sub_task) => {
                sub_task.toggle();
                true
            }
            None => false,
        }
    }
}

/// A nested, individually completable item of a task or goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubTask {
    /// Unique within the parent
    pub id: SubTaskId,

    /// Display text
    pub text: String,

    /// Category
    pub category: Category,

    /// Completion flag
    pub completed: bool,
}

impl SubTask {
    /// Create an open sub-task.
    pub fn new(text: impl Into<String>, category: Category) -> Self {
        Self {
            id: SubTaskId::new(),
            text: text.into(),
            category,
            completed: false,
        }
    }

    /// Flip the completion flag.
    pub fn toggle(&mut self) {
        self.completed = !self.completed;
    }
}

/// Returns true when `text` has something besides whitespace.
pub fn has_text(text: &str) -> bool {
    !text.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_task_is_open_and_empty() {
        let task = Task::new("Write report", Category::Work);
        assert!(!task.completed);
        assert!(task.sub_tasks.is_empty());
    }

    #[test]
    fn test_toggle_sub_task() {
        let mut task = Task::new("Trip", Category::Personal);
        let sub = SubTask::new("Book hotel", Category::Personal);
        let sub_id = sub.id;
        task.sub_tasks.push(sub);

        assert!(task.toggle_sub_task(sub_id));
        assert!(task.sub_task(sub_id).unwrap().completed);
        assert!(!task.toggle_sub_task(SubTaskId::new()));
    }

    #[test]
    fn test_json_uses_camel_case() {
        let mut task = Task::new("Read", Category::custom("Study"));
        task.sub_tasks.push(SubTask::new("Chapter 1", Category::Work));
        let value = serde_json::to_value(&task).unwrap();
        assert!(value.get("subTasks").is_some());
        assert!(value.get("createdAt").is_some());
        assert_eq!(value["category"], "Study");
    }

    #[test]
    fn test_custom_label_named_like_fixed_category_round_trips() {
        let mut task = Task::new("x", Category::custom("Work"));
        task.sub_tasks.push(SubTask::new("y", Category::from_selection("Anything", "Personal")));
        let json = serde_json::to_string(&task).unwrap();
        let back: Task = serde_json::from_str(&json).unwrap();
        assert_eq!(back, task);
        assert_eq!(back.category, Category::Work);
    }

    #[test]
    fn test_has_text() {
        assert!(!has_text("   "));
        assert!(has_text(" x "));
    }
}
