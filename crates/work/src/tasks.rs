//! Task list operations.

use planner_core::{has_text, Category, SubTask, SubTaskId, Task, TaskId};
use tracing::{debug, warn};

use crate::visibility::Visibility;

/// The task list plus its per-task "show sub-tasks" flags.
///
/// Invalid input and unknown ids are silent no-ops; the return values say
/// whether anything changed.
#[derive(Debug, Clone, Default)]
pub struct TaskBoard {
    tasks: Vec<Task>,
    expanded: Visibility<TaskId>,
}

impl TaskBoard {
    /// Board over an existing list.
    pub fn new(tasks: Vec<Task>) -> Self {
        Self {
            tasks,
            expanded: Visibility::new(),
        }
    }

    /// Tasks in insertion order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Find a task.
    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Append a task. Blank text is rejected.
    pub fn add_task(&mut self, text: &str, category: Category) -> Option<TaskId> {
        if !has_text(text) {
            warn!("rejected task with blank text");
            return None;
        }
        let task = Task::new(text, category);
        let id = task.id;
        self.tasks.push(task);
        debug!(%id, "task added");
        Some(id)
    }

    /// Flip a task's completion flag.
    pub fn toggle_task(&mut self, id: TaskId) -> bool {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return false;
        };
        task.completed = !task.completed;
        debug!(%id, completed = task.completed, "task toggled");
        true
    }

    /// Remove a task with its sub-tasks and visibility flag.
    pub fn delete_task(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        self.expanded.forget(id);
        let removed = self.tasks.len() != before;
        if removed {
            debug!(%id, "task deleted");
        }
        removed
    }

    /// Append a sub-task to a task. Blank text or an unknown task is a no-op.
    pub fn add_sub_task(
        &mut self,
        task_id: TaskId,
        text: &str,
        category: Category,
    ) -> Option<SubTaskId> {
        if !has_text(text) {
            warn!(%task_id, "rejected sub-task with blank text");
            return None;
        }
        let task = self.tasks.iter_mut().find(|t| t.id == task_id)?;
        let sub_task = SubTask::new(text, category);
        let id = sub_task.id;
        task.sub_tasks.push(sub_task);
        debug!(%task_id, sub_task_id = %id, "sub-task added");
        Some(id)
    }

    /// Flip a sub-task's completion flag.
    pub fn toggle_sub_task(&mut self, task_id: TaskId, sub_task_id: SubTaskId) -> bool {
        self.tasks
            .iter_mut()
            .find(|t| t.id == task_id)
            .is_some_and(|t| t.toggle_sub_task(sub_task_id))
    }

    /// Flip the "show sub-tasks" flag of a task, returning the new value.
    /// Unknown ids stay hidden.
    pub fn toggle_sub_tasks_visible(&mut self, id: TaskId) -> bool {
        if self.get(id).is_none() {
            return false;
        }
        self.expanded.toggle(id)
    }

    /// Whether a task's sub-tasks are shown.
    pub fn sub_tasks_visible(&self, id: TaskId) -> bool {
        self.expanded.is_visible(id)
    }

    /// Number of tracked visibility flags.
    pub fn visibility_flags(&self) -> usize {
        self.expanded.len()
    }
}
