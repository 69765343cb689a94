//! Goal model - a numeric target reached by completing sub-tasks.

use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};
use crate::category::Category;
use crate::id::{GoalId, SubTaskId};
use crate::task::{has_text, SubTask};
use crate::Time;

/// A goal with a target count and a recurrence period.
///
/// `completed_count` is a cache of the number of completed sub-tasks. It is
/// recomputed on every sub-task mutation and when a goal is loaded, so the
/// sub-task list is only reachable through methods that keep it in sync.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StoredGoal")]
pub struct Goal {
    /// Unique identifier
    pub id: GoalId,

    /// Display text
    pub text: String,

    /// How many completions make the goal
    target: NonZeroU32,

    /// Recurrence bucket
    pub period: Period,

    /// Category
    pub category: Category,

    sub_tasks: Vec<SubTask>,

    completed_count: usize,

    /// When created
    pub created_at: Time,
}

/// Wire form of a goal; the cached count is rebuilt on the way in.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredGoal {
    id: GoalId,
    text: String,
    target: NonZeroU32,
    period: Period,
    category: Category,
    #[serde(default)]
    sub_tasks: Vec<SubTask>,
    created_at: Time,
}

impl From<StoredGoal> for Goal {
    fn from(stored: StoredGoal) -> Self {
        let mut goal = Self {
            id: stored.id,
            text: stored.text,
            target: stored.target,
            period: stored.period,
            category: stored.category,
            sub_tasks: stored.sub_tasks,
            completed_count: 0,
            created_at: stored.created_at,
        };
        goal.recount();
        goal
    }
}

impl Goal {
    /// Create a goal. Returns `None` for blank text or a target that is not
    /// a positive 32-bit count.
    pub fn new(
        text: impl Into<String>,
        target: i64,
        period: Period,
        category: Category,
    ) -> Option<Self> {
        let text = text.into();
        if !has_text(&text) {
            return None;
        }
        let target = u32::try_from(target).ok().and_then(NonZeroU32::new)?;
        Some(Self {
            id: GoalId::new(),
            text,
            target,
            period,
            category,
            sub_tasks: Vec::new(),
            completed_count: 0,
            created_at: chrono::Utc::now(),
        })
    }

    /// Target count, always positive.
    pub fn target(&self) -> u32 {
        self.target.get()
    }

    /// Number of completed sub-tasks.
    pub fn completed_count(&self) -> usize {
        self.completed_count
    }

    /// Sub-tasks in insertion order.
    pub fn sub_tasks(&self) -> &[SubTask] {
        &self.sub_tasks
    }

    /// Append a sub-task.
    pub fn push_sub_task(&mut self, sub_task: SubTask) {
        self.sub_tasks.push(sub_task);
        self.recount();
    }

    /// Flip a sub-task. Returns false if the id is absent.
    pub fn toggle_sub_task(&mut self, id: SubTaskId) -> bool {
        let Some(sub_task) = self.sub_tasks.iter_mut().find(|s| s.id == id) else {
            return false;
        };
        sub_task.toggle();
        self.recount();
        true
    }

    /// Percentage of the target reached: `100 * completed / target`.
    ///
    /// Not clamped; over-completion yields values above 100.
    pub fn progress(&self) -> f64 {
        100.0 * self.completed_count as f64 / f64::from(self.target.get())
    }

    /// Whether the completed count has reached the target.
    pub fn is_reached(&self) -> bool {
        self.completed_count >= self.target.get() as usize
    }

    fn recount(&mut self) {
        self.completed_count = self.sub_tasks.iter().filter(|s| s.completed).count();
    }
}

/// Recurrence bucket used to group goals. Purely descriptive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Period {
    /// Every day
    Daily,
    /// Every week
    Weekly,
    /// Every month
    Monthly,
    /// Every year
    Yearly,
}

impl Period {
    /// All periods in display order.
    pub const ALL: [Period; 4] = [Period::Daily, Period::Weekly, Period::Monthly, Period::Yearly];

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Period::Daily => "Daily",
            Period::Weekly => "Weekly",
            Period::Monthly => "Monthly",
            Period::Yearly => "Yearly",
        }
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "daily" => Ok(Period::Daily),
            "weekly" => Ok(Period::Weekly),
            "monthly" => Ok(Period::Monthly),
            "yearly" => Ok(Period::Yearly),
            other => Err(format!("unknown period: {other}")),
        }
    }
}
