use serde::{Deserialize, Serialize};

/// A unit of work. A task whose `master_task_id` points at another task is a
/// subtask of it; the relation forms a forest because subtasks are always
/// newly created rows, never re-parented.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub owner: String,
    pub title: String,
    pub description: Option<String>,
    pub reluctance_score: i32,
    pub completed_at: Option<String>,
    pub created_at: String,
    pub note: Option<String>,
    pub broken_down: bool,
    pub master_task_id: Option<String>,
}

impl Task {
    /// `completed_at` is the single completion signal; the legacy boolean is
    /// derived from it, never stored.
    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }

    pub fn is_subtask(&self) -> bool {
        self.master_task_id.is_some()
    }
}

pub const MIN_RELUCTANCE: i32 = 1;
pub const MAX_RELUCTANCE: i32 = 5;

pub fn valid_reluctance(score: i32) -> bool {
    (MIN_RELUCTANCE..=MAX_RELUCTANCE).contains(&score)
}
