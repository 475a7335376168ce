use std::collections::{HashSet, VecDeque};

use rusqlite::Connection;

use crate::db::task_repo;
use crate::error::TaskdownError;

/// Delete a task together with its entire descendant subtree. Returns the
/// number of rows removed.
///
/// The subtree is gathered breadth-first with a worklist instead of call
/// recursion, then deleted in reverse collection order: every node is
/// removed only after all of its descendants, so no orphaned child ever
/// outlives its parent. The visited set bounds the walk even if corrupted
/// data were to form a cycle.
///
/// Deleting a nonexistent (or foreign-owned) id is a no-op success: the
/// child query simply returns nothing and the single delete touches zero
/// rows.
pub fn delete_tree(conn: &Connection, owner: &str, id: &str) -> Result<usize, TaskdownError> {
    let mut ordered = Vec::new();
    let mut queue = VecDeque::from([id.to_string()]);
    let mut seen = HashSet::new();

    while let Some(current) = queue.pop_front() {
        if !seen.insert(current.clone()) {
            continue;
        }
        for child in task_repo::subtask_ids(conn, owner, &current)? {
            queue.push_back(child);
        }
        ordered.push(current);
    }

    let mut deleted = 0;
    for node in ordered.iter().rev() {
        deleted += task_repo::delete_task(conn, owner, node)?;
    }
    Ok(deleted)
}
