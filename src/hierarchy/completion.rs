use rusqlite::Connection;

use crate::db::task_repo;
use crate::error::{ErrorCode, TaskdownError};
use crate::models::Task;

/// The decision point surfaced when the last open sibling of a parent is
/// completed: "all subtasks done; complete the parent too?". The caller must
/// get an explicit yes before completing the parent — never an automatic
/// cascade.
#[derive(Debug, Clone)]
pub struct ParentDecision {
    pub parent: Task,
}

/// Evaluate what completing `completed` means for its parent, if any.
///
/// The task just marked complete is counted as complete by id, whatever its
/// row currently says: the decision uses the logical state, not a re-read
/// that might be stale. Returns `None` for top-level tasks, when a sibling
/// is still open, or when the parent vanished in the meantime.
pub fn after_completion(
    conn: &Connection,
    owner: &str,
    completed: &Task,
) -> Result<Option<ParentDecision>, TaskdownError> {
    let Some(parent_id) = completed.master_task_id.as_deref() else {
        return Ok(None);
    };

    let siblings = task_repo::subtasks_of(conn, owner, parent_id)?;
    let all_done = siblings
        .iter()
        .all(|s| s.id == completed.id || s.is_completed());
    if !all_done {
        return Ok(None);
    }

    match task_repo::get_task(conn, owner, parent_id) {
        Ok(parent) => Ok(Some(ParentDecision { parent })),
        Err(e) if e.code == ErrorCode::TaskNotFound => Ok(None),
        Err(e) => Err(e),
    }
}
