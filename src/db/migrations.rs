use rusqlite::Connection;

use crate::error::TaskdownError;

pub fn run_migrations(conn: &Connection) -> Result<(), TaskdownError> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS tasks (
            id TEXT PRIMARY KEY,
            owner TEXT NOT NULL,
            title TEXT NOT NULL,
            description TEXT,
            reluctance_score INTEGER NOT NULL DEFAULT 1
                CHECK (reluctance_score BETWEEN 1 AND 5),
            completed_at TEXT,
            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            note TEXT,
            broken_down INTEGER NOT NULL DEFAULT 0,
            master_task_id TEXT REFERENCES tasks(id)
        );

        CREATE INDEX IF NOT EXISTS idx_tasks_owner ON tasks(owner);
        CREATE INDEX IF NOT EXISTS idx_tasks_parent ON tasks(master_task_id);
        ",
    )?;
    Ok(())
}
