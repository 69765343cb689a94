//! The planner shell: single owner of the task and goal lists.
//!
//! Every successful mutation writes the whole affected list back to the store
//! before returning. Rejected input writes nothing. A failed write is reported
//! as [`PlannerError::Persistence`] while the in-memory change stays applied.

use planner_core::{Category, Goal, GoalId, Period, SubTaskId, Task, TaskId};
use planner_storage::{load, save, KeyValueStore, StorageError, GOALS_KEY, TASKS_KEY};
use tracing::{debug, info, warn};

use crate::goals::GoalBoard;
use crate::tasks::TaskBoard;

/// Error type for planner operations.
pub type Result<T> = std::result::Result<T, PlannerError>;

/// Errors surfaced by the planner.
#[derive(Debug, thiserror::Error)]
pub enum PlannerError {
    /// The store could not be read or written. In-memory state is intact.
    #[error("persistence unavailable: {0}")]
    Persistence(#[from] StorageError),
}

/// Owner of the canonical lists and sole writer of their records.
pub struct Planner<S: KeyValueStore> {
    store: S,
    tasks: TaskBoard,
    goals: GoalBoard,
}

impl<S: KeyValueStore> Planner<S> {
    /// Read both lists from `store`. Missing records start empty.
    pub fn open(store: S) -> Result<Self> {
        let tasks: Vec<Task> = load(&store, TASKS_KEY)?.unwrap_or_default();
        let goals: Vec<Goal> = load(&store, GOALS_KEY)?.unwrap_or_default();
        info!(tasks = tasks.len(), goals = goals.len(), "planner opened");
        Ok(Self {
            store,
            tasks: TaskBoard::new(tasks),
            goals: GoalBoard::new(goals),
        })
    }

    /// The task board.
    pub fn tasks(&self) -> &TaskBoard {
        &self.tasks
    }

    /// The goal board.
    pub fn goals(&self) -> &GoalBoard {
        &self.goals
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    // === Task operations ===

    /// Append a task.
    pub fn add_task(&mut self, text: &str, category: Category) -> Result<Option<TaskId>> {
        let id = self.tasks.add_task(text, category);
        if id.is_some() {
            self.persist_tasks()?;
        }
        Ok(id)
    }

    /// Flip a task's completion flag.
    pub fn toggle_task(&mut self, id: TaskId) -> Result<bool> {
        let changed = self.tasks.toggle_task(id);
        if changed {
            self.persist_tasks()?;
        }
        Ok(changed)
    }

    /// Delete a task with its sub-tasks and visibility flag.
    pub fn delete_task(&mut self, id: TaskId) -> Result<bool> {
        let changed = self.tasks.delete_task(id);
        if changed {
            self.persist_tasks()?;
        }
        Ok(changed)
    }

    /// Append a sub-task to a task.
    pub fn add_task_sub_task(
        &mut self,
        task_id: TaskId,
        text: &str,
        category: Category,
    ) -> Result<Option<SubTaskId>> {
        let id = self.tasks.add_sub_task(task_id, text, category);
        if id.is_some() {
            self.persist_tasks()?;
        }
        Ok(id)
    }

    /// Flip a task's sub-task.
    pub fn toggle_task_sub_task(
        &mut self,
        task_id: TaskId,
        sub_task_id: SubTaskId,
    ) -> Result<bool> {
        let changed = self.tasks.toggle_sub_task(task_id, sub_task_id);
        if changed {
            self.persist_tasks()?;
        }
        Ok(changed)
    }

    /// Flip whether a task's sub-tasks are shown. Not persisted.
    pub fn toggle_task_sub_tasks_visible(&mut self, id: TaskId) -> bool {
        self.tasks.toggle_sub_tasks_visible(id)
    }

    // === Goal operations ===

    /// Append a goal.
    pub fn add_goal(
        &mut self,
        text: &str,
        target: i64,
        period: Period,
        category: Category,
    ) -> Result<Option<GoalId>> {
        let id = self.goals.add_goal(text, target, period, category);
        if id.is_some() {
            self.persist_goals()?;
        }
        Ok(id)
    }

    /// Delete a goal with its sub-tasks and visibility flag.
    pub fn delete_goal(&mut self, id: GoalId) -> Result<bool> {
        let changed = self.goals.delete_goal(id);
        if changed {
            self.persist_goals()?;
        }
        Ok(changed)
    }

    /// Append a sub-task to a goal.
    pub fn add_goal_sub_task(
        &mut self,
        goal_id: GoalId,
        text: &str,
        category: Category,
    ) -> Result<Option<SubTaskId>> {
        let id = self.goals.add_sub_task(goal_id, text, category);
        if id.is_some() {
            self.persist_goals()?;
        }
        Ok(id)
    }

    /// Flip a goal's sub-task.
    pub fn toggle_goal_sub_task(
        &mut self,
        goal_id: GoalId,
        sub_task_id: SubTaskId,
    ) -> Result<bool> {
        let changed = self.goals.toggle_sub_task(goal_id, sub_task_id);
        if changed {
            self.persist_goals()?;
        }
        Ok(changed)
    }

    /// Flip whether a goal's sub-tasks are shown. Not persisted.
    pub fn toggle_goal_sub_tasks_visible(&mut self, id: GoalId) -> bool {
        self.goals.toggle_sub_tasks_visible(id)
    }

    // === Persistence ===

    /// Write the full task list.
    pub fn persist_tasks(&mut self) -> Result<()> {
        save(&mut self.store, TASKS_KEY, self.tasks.tasks()).map_err(|e| {
            warn!(error = %e, "failed to persist tasks");
            e
        })?;
        debug!(count = self.tasks.tasks().len(), "tasks persisted");
        Ok(())
    }

    /// Write the full goal list.
    pub fn persist_goals(&mut self) -> Result<()> {
        save(&mut self.store, GOALS_KEY, self.goals.goals()).map_err(|e| {
            warn!(error = %e, "failed to persist goals");
            e
        })?;
        debug!(count = self.goals.goals().len(), "goals persisted");
        Ok(())
    }
}
