//! Goal list operations.

use planner_core::{has_text, Category, Goal, GoalId, Period, SubTask, SubTaskId};
use tracing::{debug, warn};

use crate::visibility::Visibility;

/// The goal list plus its per-goal "show sub-tasks" flags.
#[derive(Debug, Clone, Default)]
pub struct GoalBoard {
    goals: Vec<Goal>,
    expanded: Visibility<GoalId>,
}

impl GoalBoard {
    /// Board over an existing list.
    pub fn new(goals: Vec<Goal>) -> Self {
        Self {
            goals,
            expanded: Visibility::new(),
        }
    }

    /// Goals in insertion order.
    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    /// Find a goal.
    pub fn get(&self, id: GoalId) -> Option<&Goal> {
        self.goals.iter().find(|g| g.id == id)
    }

    /// Append a goal. Blank text or a non-positive target is rejected.
    pub fn add_goal(
        &mut self,
        text: &str,
        target: i64,
        period: Period,
        category: Category,
    ) -> Option<GoalId> {
        let Some(goal) = Goal::new(text, target, period, category) else {
            warn!(goal_target = target, "rejected goal with blank text or non-positive target");
            return None;
        };
        let id = goal.id;
        self.goals.push(goal);
        debug!(%id, %period, goal_target = target, "goal added");
        Some(id)
    }

    /// Remove a goal with its sub-tasks and visibility flag.
    pub fn delete_goal(&mut self, id: GoalId) -> bool {
        let before = self.goals.len();
        self.goals.retain(|g| g.id != id);
        self.expanded.forget(id);
        let removed = self.goals.len() != before;
        if removed {
            debug!(%id, "goal deleted");
        }
        removed
    }

    /// Append a sub-task to a goal; the goal's count is recomputed.
    pub fn add_sub_task(
        &mut self,
        goal_id: GoalId,
        text: &str,
        category: Category,
    ) -> Option<SubTaskId> {
        if !has_text(text) {
            warn!(%goal_id, "rejected sub-task with blank text");
            return None;
        }
        let goal = self.goals.iter_mut().find(|g| g.id == goal_id)?;
        let sub_task = SubTask::new(text, category);
        let id = sub_task.id;
        goal.push_sub_task(sub_task);
        debug!(%goal_id, sub_task_id = %id, "goal sub-task added");
        Some(id)
    }

    /// Flip a sub-task; the goal's count is recomputed.
    pub fn toggle_sub_task(&mut self, goal_id: GoalId, sub_task_id: SubTaskId) -> bool {
        let Some(goal) = self.goals.iter_mut().find(|g| g.id == goal_id) else {
            return false;
        };
        let changed = goal.toggle_sub_task(sub_task_id);
        if changed {
            debug!(
                %goal_id,
                completed = goal.completed_count(),
                goal_target = goal.target(),
                "goal progress"
            );
        }
        changed
    }

    /// Percentage of a goal's target reached. Not clamped.
    pub fn progress(&self, id: GoalId) -> Option<f64> {
        self.get(id).map(Goal::progress)
    }

    /// Flip the "show sub-tasks" flag of a goal, returning the new value.
    pub fn toggle_sub_tasks_visible(&mut self, id: GoalId) -> bool {
        if self.get(id).is_none() {
            return false;
        }
        self.expanded.toggle(id)
    }

    /// Whether a goal's sub-tasks are shown.
    pub fn sub_tasks_visible(&self, id: GoalId) -> bool {
        self.expanded.is_visible(id)
    }

    /// Number of tracked visibility flags.
    pub fn visibility_flags(&self) -> usize {
        self.expanded.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_counts_consistent(board: &GoalBoard) {
        for goal in board.goals() {
            let done = goal.sub_tasks().iter().filter(|s| s.completed).count();
            assert_eq!(goal.completed_count(), done);
        }
    }

    #[test]
    fn test_rejected_goals_leave_list_unchanged() {
        let mut board = GoalBoard::default();
        assert!(board.add_goal("", 5, Period::Daily, Category::Work).is_none());
        assert!(board.add_goal("x", 0, Period::Daily, Category::Work).is_none());
        assert!(board.add_goal("x", -1, Period::Daily, Category::Work).is_none());
        assert!(board.goals().is_empty());
    }

    #[test]
    fn test_new_goal_starts_at_zero() {
        let mut board = GoalBoard::default();
        let id = board.add_goal("Gym", 3, Period::Weekly, Category::Personal).unwrap();
        let goal = board.get(id).unwrap();
        assert_eq!(goal.completed_count(), 0);
        assert_eq!(goal.target(), 3);
        assert_eq!(board.progress(id), Some(0.0));
    }

    #[test]
    fn test_count_tracks_every_mutation() {
        let mut board = GoalBoard::default();
        let id = board.add_goal("Gym", 2, Period::Weekly, Category::Personal).unwrap();
        let mon = board.add_sub_task(id, "Mon", Category::Personal).unwrap();
        assert_counts_consistent(&board);
        let wed = board.add_sub_task(id, "Wed", Category::Personal).unwrap();
        let fri = board.add_sub_task(id, "Fri", Category::Personal).unwrap();

        for sub in [mon, wed, fri] {
            assert!(board.toggle_sub_task(id, sub));
            assert_counts_consistent(&board);
        }
        assert_eq!(board.get(id).unwrap().completed_count(), 3);
        assert_eq!(board.progress(id), Some(150.0));

        assert!(board.toggle_sub_task(id, wed));
        assert_counts_consistent(&board);
        assert_eq!(board.progress(id), Some(100.0));

        board.add_sub_task(id, "Sat", Category::Personal);
        assert_counts_consistent(&board);
        assert_eq!(board.get(id).unwrap().completed_count(), 2);
    }

    #[test]
    fn test_unknown_ids_are_no_ops() {
        let mut board = GoalBoard::default();
        let id = board.add_goal("g", 1, Period::Daily, Category::Work).unwrap();
        assert!(board.add_sub_task(GoalId::new(), "s", Category::Work).is_none());
        assert!(board.add_sub_task(id, "  ", Category::Work).is_none());
        assert!(!board.toggle_sub_task(id, SubTaskId::new()));
        assert!(!board.toggle_sub_task(GoalId::new(), SubTaskId::new()));
        assert_eq!(board.progress(GoalId::new()), None);
        assert!(board.get(id).unwrap().sub_tasks().is_empty());
    }

    #[test]
    fn test_delete_goal_prunes_flag() {
        let mut board = GoalBoard::default();
        let id = board.add_goal("g", 1, Period::Monthly, Category::Work).unwrap();
        board.add_sub_task(id, "s", Category::Work);
        board.toggle_sub_tasks_visible(id);
        assert_eq!(board.visibility_flags(), 1);

        assert!(board.delete_goal(id));
        assert!(board.goals().is_empty());
        assert_eq!(board.visibility_flags(), 0);
        assert!(!board.delete_goal(id));
        assert!(!board.toggle_sub_tasks_visible(id));
    }
}
