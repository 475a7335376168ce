use rusqlite::Connection;

use crate::db::task_repo::{self, NewTask};
use crate::error::TaskdownError;
use crate::models::{valid_reluctance, SubtaskCandidate, Task};

/// Persist a batch of candidates, either as subtasks of `parent_id` or as
/// top-level tasks when no parent is given. One operation, two call sites.
///
/// With a parent: the parent is resolved first (missing or foreign → not
/// found, nothing written), its `broken_down` flag is set, then one child is
/// created per candidate. The writes are intentionally not a transaction:
/// a mid-batch failure leaves the earlier children in place and the caller
/// is expected to re-fetch rather than trust the error. The parent linkage
/// and owner always come from the resolved parent, never from the payload.
pub fn save_tasks(
    conn: &Connection,
    owner: &str,
    parent_id: Option<&str>,
    candidates: &[SubtaskCandidate],
) -> Result<Vec<Task>, TaskdownError> {
    validate(candidates)?;

    let parent = match parent_id {
        Some(id) => Some(task_repo::get_task(conn, owner, id)?),
        None => None,
    };

    let note = parent
        .as_ref()
        .map(|p| format!("Created from this big task: {}", p.title));

    if let Some(ref parent) = parent {
        // Flag first: between this write and the child inserts the parent is
        // observably broken_down with no children yet, which clients must
        // tolerate.
        task_repo::mark_broken_down(conn, owner, &parent.id)?;
    }

    let mut created = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        let id = ulid::Ulid::new().to_string();
        let task = task_repo::create_task(
            conn,
            owner,
            &NewTask {
                id: &id,
                title: &candidate.title,
                description: candidate.description.as_deref(),
                reluctance_score: candidate.reluctance_score,
                note: note.as_deref(),
                master_task_id: parent.as_ref().map(|p| p.id.as_str()),
            },
        )?;
        created.push(task);
    }
    Ok(created)
}

fn validate(candidates: &[SubtaskCandidate]) -> Result<(), TaskdownError> {
    for candidate in candidates {
        if candidate.title.trim().is_empty() {
            return Err(TaskdownError::validation("Task title must not be empty"));
        }
        if !valid_reluctance(candidate.reluctance_score) {
            return Err(TaskdownError::validation(format!(
                "Reluctance score must be between 1 and 5, got {}",
                candidate.reluctance_score
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations;
    use crate::error::ErrorCode;

    fn test_conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        migrations::run_migrations(&conn).unwrap();
        conn
    }

    fn candidates(entries: &[(&str, i32)]) -> Vec<SubtaskCandidate> {
        entries
            .iter()
            .map(|(t, s)| SubtaskCandidate::new(*t, *s))
            .collect()
    }

    #[test]
    fn save_subtasks_flags_parent_and_links_children() {
        let conn = test_conn();
        let parent = save_tasks(&conn, "alice", None, &candidates(&[("Plan trip", 2)]))
            .unwrap()
            .remove(0);
        assert!(!parent.broken_down);

        let subs = save_tasks(
            &conn,
            "alice",
            Some(&parent.id),
            &candidates(&[("Book flights", 3), ("Pack bags", 1)]),
        )
        .unwrap();

        assert_eq!(subs.len(), 2);
        for sub in &subs {
            assert_eq!(sub.master_task_id.as_deref(), Some(parent.id.as_str()));
            assert!(!sub.broken_down);
            assert!(sub.completed_at.is_none());
            assert!(sub.note.as_deref().unwrap().contains("Plan trip"));
        }

        let parent = crate::db::task_repo::get_task(&conn, "alice", &parent.id).unwrap();
        assert!(parent.broken_down);
        assert_eq!(
            crate::db::task_repo::subtasks_of(&conn, "alice", &parent.id)
                .unwrap()
                .len(),
            2
        );
    }

    #[test]
    fn missing_parent_is_not_found_with_no_side_effects() {
        let conn = test_conn();
        let err = save_tasks(&conn, "alice", Some("ghost"), &candidates(&[("A", 1)])).unwrap_err();
        assert_eq!(err.code, ErrorCode::TaskNotFound);
        assert!(crate::db::task_repo::list_top_level(&conn, "alice")
            .unwrap()
            .is_empty());
    }

    #[test]
    fn foreign_parent_is_not_found() {
        let conn = test_conn();
        let parent = save_tasks(&conn, "alice", None, &candidates(&[("Mine", 1)]))
            .unwrap()
            .remove(0);
        let err =
            save_tasks(&conn, "bob", Some(&parent.id), &candidates(&[("A", 1)])).unwrap_err();
        assert_eq!(err.code, ErrorCode::TaskNotFound);
    }

    #[test]
    fn no_parent_creates_plain_top_level_tasks() {
        let conn = test_conn();
        let tasks = save_tasks(&conn, "alice", None, &candidates(&[("A", 1), ("B", 5)])).unwrap();
        for task in &tasks {
            assert!(task.master_task_id.is_none());
            assert!(task.note.is_none());
            assert!(!task.broken_down);
        }
    }

    #[test]
    fn mid_batch_failure_keeps_flag_and_earlier_children() {
        let conn = test_conn();
        let parent = save_tasks(&conn, "alice", None, &candidates(&[("Clean garage", 2)]))
            .unwrap()
            .remove(0);

        // Make the second insert blow up mid-batch.
        conn.execute_batch(
            "CREATE TRIGGER reject_second BEFORE INSERT ON tasks
             WHEN NEW.title = 'Haul trash'
             BEGIN SELECT RAISE(ABORT, 'disk full'); END;",
        )
        .unwrap();

        let err = save_tasks(
            &conn,
            "alice",
            Some(&parent.id),
            &candidates(&[("Sort boxes", 2), ("Haul trash", 4)]),
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::DatabaseError);

        // No rollback: the flag flip and the first child survive the error,
        // and a re-fetch shows exactly what was written.
        let parent = crate::db::task_repo::get_task(&conn, "alice", &parent.id).unwrap();
        assert!(parent.broken_down);
        let subs = crate::db::task_repo::subtasks_of(&conn, "alice", &parent.id).unwrap();
        assert_eq!(subs.len(), 1);
        assert_eq!(subs[0].title, "Sort boxes");
    }

    #[test]
    fn invalid_candidates_fail_before_any_write() {
        let conn = test_conn();
        let parent = save_tasks(&conn, "alice", None, &candidates(&[("Parent", 1)]))
            .unwrap()
            .remove(0);

        let err = save_tasks(
            &conn,
            "alice",
            Some(&parent.id),
            &candidates(&[("Fine", 2), ("", 1)]),
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = save_tasks(&conn, "alice", Some(&parent.id), &candidates(&[("A", 7)]))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let parent = crate::db::task_repo::get_task(&conn, "alice", &parent.id).unwrap();
        assert!(!parent.broken_down, "validation failures must not flag the parent");
        assert!(crate::db::task_repo::subtasks_of(&conn, "alice", &parent.id)
            .unwrap()
            .is_empty());
    }
}
