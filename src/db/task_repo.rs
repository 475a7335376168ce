use chrono::Utc;
use rusqlite::{params, Connection};

use crate::error::TaskdownError;
use crate::models::Task;

const TASK_COLUMNS: &str = "id, owner, title, description, reluctance_score,
                completed_at, created_at, note, broken_down, master_task_id";

pub struct NewTask<'a> {
    pub id: &'a str,
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub reluctance_score: i32,
    pub note: Option<&'a str>,
    pub master_task_id: Option<&'a str>,
}

pub fn create_task(conn: &Connection, owner: &str, new: &NewTask) -> Result<Task, TaskdownError> {
    conn.execute(
        "INSERT INTO tasks (id, owner, title, description, reluctance_score, note, master_task_id)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            new.id,
            owner,
            new.title,
            new.description,
            new.reluctance_score,
            new.note,
            new.master_task_id
        ],
    )?;
    get_task(conn, owner, new.id)
}

pub fn get_task(conn: &Connection, owner: &str, id: &str) -> Result<Task, TaskdownError> {
    conn.query_row(
        &format!("SELECT {TASK_COLUMNS} FROM tasks WHERE owner = ?1 AND id = ?2"),
        params![owner, id],
        row_to_task,
    )
    .map_err(|e| match e {
        rusqlite::Error::QueryReturnedNoRows => TaskdownError::task_not_found(id),
        _ => TaskdownError::from(e),
    })
}

/// Top-level tasks only (no master), oldest first.
pub fn list_top_level(conn: &Connection, owner: &str) -> Result<Vec<Task>, TaskdownError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {TASK_COLUMNS} FROM tasks
         WHERE owner = ?1 AND master_task_id IS NULL
         ORDER BY created_at ASC, id ASC"
    ))?;
    let tasks = stmt
        .query_map(params![owner], row_to_task)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(tasks)
}

/// All subtasks of a parent, sorted by title. An empty result is valid; this
/// query deliberately does not check that the parent itself exists.
pub fn subtasks_of(conn: &Connection, owner: &str, parent_id: &str) -> Result<Vec<Task>, TaskdownError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {TASK_COLUMNS} FROM tasks
         WHERE owner = ?1 AND master_task_id = ?2
         ORDER BY title ASC"
    ))?;
    let tasks = stmt
        .query_map(params![owner, parent_id], row_to_task)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(tasks)
}

pub fn subtask_ids(conn: &Connection, owner: &str, parent_id: &str) -> Result<Vec<String>, TaskdownError> {
    let mut stmt =
        conn.prepare("SELECT id FROM tasks WHERE owner = ?1 AND master_task_id = ?2")?;
    let ids = stmt
        .query_map(params![owner, parent_id], |row| row.get(0))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ids)
}

/// The flag is one-way: nothing clears it, so a parent whose last subtask
/// is later deleted stays marked as broken down.
pub fn mark_broken_down(conn: &Connection, owner: &str, id: &str) -> Result<(), TaskdownError> {
    conn.execute(
        "UPDATE tasks SET broken_down = 1 WHERE owner = ?1 AND id = ?2",
        params![owner, id],
    )?;
    Ok(())
}

/// Set or clear `completed_at`. This is the only completion write path; the
/// legacy boolean the mobile client reads is derived at output time.
pub fn set_completed(
    conn: &Connection,
    owner: &str,
    id: &str,
    completed: bool,
) -> Result<(), TaskdownError> {
    let stamp = completed.then(|| Utc::now().to_rfc3339());
    let changed = conn.execute(
        "UPDATE tasks SET completed_at = ?1 WHERE owner = ?2 AND id = ?3",
        params![stamp, owner, id],
    )?;
    if changed == 0 {
        return Err(TaskdownError::task_not_found(id));
    }
    Ok(())
}

pub struct TaskPatch<'a> {
    pub title: Option<&'a str>,
    pub description: Option<&'a str>,
    pub reluctance_score: Option<i32>,
}

pub fn update_task(
    conn: &Connection,
    owner: &str,
    id: &str,
    patch: &TaskPatch,
) -> Result<Task, TaskdownError> {
    conn.execute(
        "UPDATE tasks SET
             title = COALESCE(?1, title),
             description = COALESCE(?2, description),
             reluctance_score = COALESCE(?3, reluctance_score)
         WHERE owner = ?4 AND id = ?5",
        params![patch.title, patch.description, patch.reluctance_score, owner, id],
    )?;
    get_task(conn, owner, id)
}

/// Delete a single row. Missing rows are not an error; the caller decides
/// what zero deletions means.
pub fn delete_task(conn: &Connection, owner: &str, id: &str) -> Result<usize, TaskdownError> {
    let deleted = conn.execute(
        "DELETE FROM tasks WHERE owner = ?1 AND id = ?2",
        params![owner, id],
    )?;
    Ok(deleted)
}

fn row_to_task(row: &rusqlite::Row) -> rusqlite::Result<Task> {
    Ok(Task {
        id: row.get(0)?,
        owner: row.get(1)?,
        title: row.get(2)?,
        description: row.get(3)?,
        reluctance_score: row.get(4)?,
        completed_at: row.get(5)?,
        created_at: row.get(6)?,
        note: row.get(7)?,
        broken_down: row.get::<_, i64>(8)? != 0,
        master_task_id: row.get(9)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations;

    fn test_conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        migrations::run_migrations(&conn).unwrap();
        conn
    }

    fn add(conn: &Connection, owner: &str, id: &str, title: &str) -> Task {
        create_task(
            conn,
            owner,
            &NewTask {
                id,
                title,
                description: None,
                reluctance_score: 1,
                note: None,
                master_task_id: None,
            },
        )
        .unwrap()
    }

    #[test]
    fn create_and_get_roundtrip() {
        let conn = test_conn();
        let task = add(&conn, "alice", "t1", "Write report");
        assert_eq!(task.title, "Write report");
        assert!(!task.broken_down);
        assert!(task.completed_at.is_none());
        assert!(task.master_task_id.is_none());
    }

    #[test]
    fn foreign_owner_is_invisible() {
        let conn = test_conn();
        add(&conn, "alice", "t1", "Private");
        let err = get_task(&conn, "bob", "t1").unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::TaskNotFound);
    }

    #[test]
    fn subtasks_sorted_by_title() {
        let conn = test_conn();
        add(&conn, "alice", "p", "Parent");
        for (id, title) in [("c1", "Zeta"), ("c2", "Alpha"), ("c3", "Mid")] {
            create_task(
                &conn,
                "alice",
                &NewTask {
                    id,
                    title,
                    description: None,
                    reluctance_score: 1,
                    note: None,
                    master_task_id: Some("p"),
                },
            )
            .unwrap();
        }
        let subs = subtasks_of(&conn, "alice", "p").unwrap();
        let titles: Vec<_> = subs.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, ["Alpha", "Mid", "Zeta"]);
    }

    #[test]
    fn subtasks_of_unknown_parent_is_empty_not_error() {
        let conn = test_conn();
        assert!(subtasks_of(&conn, "alice", "missing").unwrap().is_empty());
    }

    #[test]
    fn set_completed_writes_and_clears_timestamp() {
        let conn = test_conn();
        add(&conn, "alice", "t1", "Task");
        set_completed(&conn, "alice", "t1", true).unwrap();
        assert!(get_task(&conn, "alice", "t1").unwrap().is_completed());
        set_completed(&conn, "alice", "t1", false).unwrap();
        assert!(!get_task(&conn, "alice", "t1").unwrap().is_completed());
    }

    #[test]
    fn set_completed_missing_task_is_not_found() {
        let conn = test_conn();
        let err = set_completed(&conn, "alice", "nope", true).unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::TaskNotFound);
    }

    #[test]
    fn update_patches_only_given_fields() {
        let conn = test_conn();
        add(&conn, "alice", "t1", "Old title");
        let task = update_task(
            &conn,
            "alice",
            "t1",
            &TaskPatch {
                title: None,
                description: Some("details"),
                reluctance_score: Some(4),
            },
        )
        .unwrap();
        assert_eq!(task.title, "Old title");
        assert_eq!(task.description.as_deref(), Some("details"));
        assert_eq!(task.reluctance_score, 4);
    }
}
