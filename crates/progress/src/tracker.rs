//! Goal grouping and progress summaries.

use chrono::{DateTime, Utc};
use planner_core::{Goal, Period, Task};
use serde::Serialize;

/// Display color of a period bucket.
pub fn period_color(period: Period) -> &'static str {
    match period {
        Period::Daily => "#3b82f6",
        Period::Weekly => "#22c55e",
        Period::Monthly => "#a855f7",
        Period::Yearly => "#f97316",
    }
}

/// Goals sharing a period, in list order.
#[derive(Debug, Clone)]
pub struct PeriodGroup<'a> {
    /// The bucket
    pub period: Period,
    /// Fixed display color of the bucket
    pub color: &'static str,
    /// Goals in the bucket
    pub goals: Vec<&'a Goal>,
}

/// Partition goals into Daily, Weekly, Monthly and Yearly buckets, in that
/// order, omitting empty buckets.
pub fn group_by_period(goals: &[Goal]) -> Vec<PeriodGroup<'_>> {
    Period::ALL
        .iter()
        .filter_map(|&period| {
            let members: Vec<&Goal> = goals.iter().filter(|g| g.period == period).collect();
            if members.is_empty() {
                None
            } else {
                Some(PeriodGroup {
                    period,
                    color: period_color(period),
                    goals: members,
                })
            }
        })
        .collect()
}

/// A snapshot of progress at a point in time.
#[derive(Debug, Clone, Serialize)]
pub struct ProgressSnapshot {
    /// When snapshot was taken
    pub timestamp: DateTime<Utc>,
    /// Number of tasks
    pub total_tasks: usize,
    /// Tasks ticked off
    pub completed_tasks: usize,
    /// Sub-tasks across all tasks
    pub total_sub_tasks: usize,
    /// Completed sub-tasks across all tasks
    pub completed_sub_tasks: usize,
    /// Number of goals
    pub total_goals: usize,
    /// Goals whose completed count reached the target
    pub reached_goals: usize,
}

impl ProgressSnapshot {
    /// Summarize the current lists.
    pub fn collect(tasks: &[Task], goals: &[Goal]) -> Self {
        let sub_tasks = tasks.iter().flat_map(|t| t.sub_tasks.iter());
        Self {
            timestamp: Utc::now(),
            total_tasks: tasks.len(),
            completed_tasks: tasks.iter().filter(|t| t.completed).count(),
            total_sub_tasks: sub_tasks.clone().count(),
            completed_sub_tasks: sub_tasks.filter(|s| s.completed).count(),
            total_goals: goals.len(),
            reached_goals: goals.iter().filter(|g| g.is_reached()).count(),
        }
    }

    /// Share of tasks completed, 0-100.
    pub fn task_percentage(&self) -> f32 {
        if self.total_tasks > 0 {
            (self.completed_tasks as f32 / self.total_tasks as f32) * 100.0
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use planner_core::{Category, SubTask};

    fn goal(text: &str, period: Period) -> Goal {
        Goal::new(text, 3, period, Category::Work).unwrap()
    }

    #[test]
    fn test_groups_in_fixed_order_and_skip_empty() {
        let goals = vec![
            goal("y", Period::Yearly),
            goal("d1", Period::Daily),
            goal("d2", Period::Daily),
        ];
        let groups = group_by_period(&goals);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].period, Period::Daily);
        assert_eq!(groups[0].goals.len(), 2);
        assert_eq!(groups[0].goals[0].text, "d1");
        assert_eq!(groups[1].period, Period::Yearly);
        assert_eq!(groups[1].color, "#f97316");
    }

    #[test]
    fn test_no_goals_no_groups() {
        assert!(group_by_period(&[]).is_empty());
    }

    #[test]
    fn test_snapshot_counts() {
        let mut done = Task::new("a", Category::Work);
        done.completed = true;
        let mut open = Task::new("b", Category::Work);
        let mut sub = SubTask::new("b1", Category::Work);
        sub.completed = true;
        open.sub_tasks.push(sub);
        open.sub_tasks.push(SubTask::new("b2", Category::Work));

        let mut reached = Goal::new("g", 1, Period::Daily, Category::Work).unwrap();
        let mut gs = SubTask::new("g1", Category::Work);
        gs.completed = true;
        reached.push_sub_task(gs);

        let snapshot =
            ProgressSnapshot::collect(&[done, open], &[reached, goal("h", Period::Weekly)]);
        assert_eq!(snapshot.total_tasks, 2);
        assert_eq!(snapshot.completed_tasks, 1);
        assert_eq!(snapshot.total_sub_tasks, 2);
        assert_eq!(snapshot.completed_sub_tasks, 1);
        assert_eq!(snapshot.total_goals, 2);
        assert_eq!(snapshot.reached_goals, 1);
        assert_eq!(snapshot.task_percentage(), 50.0);
    }
}
