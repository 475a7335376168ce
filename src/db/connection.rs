use std::env;
use std::fs;
use std::path::PathBuf;

use directories::ProjectDirs;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::error::TaskdownError;

use super::migrations;

/// Resolve the taskdown data directory. `TASKDOWN_DIR` wins so tests and
/// scripts can point at a sandbox; otherwise the platform data dir is used.
pub fn data_dir() -> Result<PathBuf, TaskdownError> {
    if let Ok(dir) = env::var("TASKDOWN_DIR") {
        return Ok(PathBuf::from(dir));
    }
    ProjectDirs::from("", "", "taskdown")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| TaskdownError::database("Could not determine a home directory"))
}

pub fn db_path() -> Result<PathBuf, TaskdownError> {
    Ok(data_dir()?.join("taskdown.db"))
}

pub fn config_path() -> Result<PathBuf, TaskdownError> {
    Ok(data_dir()?.join("config.json"))
}

/// Open a connection to the database. Returns error if not initialized.
pub fn open_db() -> Result<Connection, TaskdownError> {
    let path = db_path()?;
    if !path.exists() {
        return Err(TaskdownError::not_initialized());
    }
    let conn = Connection::open(&path)?;
    configure_connection(&conn)?;
    Ok(conn)
}

/// Initialize the database: create directories, database, and run migrations.
pub fn init_db() -> Result<PathBuf, TaskdownError> {
    let path = db_path()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| TaskdownError::database(e.to_string()))?;
    }
    let conn = Connection::open(&path)?;
    configure_connection(&conn)?;
    migrations::run_migrations(&conn)?;
    Ok(path)
}

fn configure_connection(conn: &Connection) -> Result<(), TaskdownError> {
    conn.execute_batch(
        "PRAGMA journal_mode=WAL;
         PRAGMA busy_timeout=5000;
         PRAGMA foreign_keys=ON;",
    )?;
    Ok(())
}

#[derive(Debug, Serialize, Deserialize)]
struct Config {
    owner: String,
}

/// Persist the default owner identity chosen at `init`.
pub fn write_owner(owner: &str) -> Result<(), TaskdownError> {
    let path = config_path()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| TaskdownError::database(e.to_string()))?;
    }
    let config = Config {
        owner: owner.to_string(),
    };
    let body = serde_json::to_string_pretty(&config)
        .map_err(|e| TaskdownError::database(e.to_string()))?;
    fs::write(&path, body).map_err(|e| TaskdownError::database(e.to_string()))?;
    Ok(())
}

/// Resolve the owner every operation is scoped to: the `--owner` flag wins,
/// then the configured default. Commands never accept owner ids embedded in
/// payloads.
pub fn resolve_owner(owner_flag: Option<&str>) -> Result<String, TaskdownError> {
    if let Some(owner) = owner_flag {
        return Ok(owner.to_string());
    }
    let path = config_path()?;
    let body = fs::read_to_string(&path).map_err(|_| TaskdownError::not_initialized())?;
    let config: Config = serde_json::from_str(&body)
        .map_err(|e| TaskdownError::database(format!("Invalid config.json: {e}")))?;
    Ok(config.owner)
}

/// Fallback identity used by `init` when no owner is given.
pub fn default_owner() -> String {
    env::var("USER")
        .or_else(|_| env::var("USERNAME"))
        .unwrap_or_else(|_| "default".to_string())
}
