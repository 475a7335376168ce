use std::io::{self, Read};

use serde::Deserialize;
use serde_json::json;

use crate::breakdown::{parser, prompt, LineFormat, ModelClient};
use crate::db::{connection, task_repo};
use crate::error::TaskdownError;
use crate::hierarchy;
use crate::models::SubtaskCandidate;
use crate::output;

use super::task::{print_success, tasks_json};

/// Ask the model for subtask suggestions. Read-only: the parent task is
/// never touched, whatever the model answers.
pub fn run_breakdown(id: &str, json_output: bool, owner_flag: Option<&str>) -> Result<i32, TaskdownError> {
    let conn = connection::open_db()?;
    let owner = connection::resolve_owner(owner_flag)?;
    let task = task_repo::get_task(&conn, &owner, id)?;

    let client = ModelClient::from_env()?;
    let prompt = prompt::breakdown_prompt(&task.title, task.description.as_deref().unwrap_or(""));
    let reply = client
        .complete(&prompt)
        .map_err(|e| TaskdownError::breakdown_failed(e.to_string()))?;

    // Zero candidates after a successful call is a valid-but-empty result,
    // not a failure.
    let candidates = parser::parse_reply(&reply, LineFormat::TitleWithScore);

    if json_output {
        let candidates_json: Vec<_> = candidates.iter().map(output::json::candidate_json).collect();
        print_success(json!({
            "task": output::json::task_summary(&task),
            "candidates": candidates_json,
        }));
    } else {
        output::text::print_candidates(&candidates);
    }
    Ok(0)
}

/// Mine a plain task list out of free text (the transcript flow).
pub fn run_extract(text: &str, json_output: bool) -> Result<i32, TaskdownError> {
    let client = ModelClient::from_env()?;
    let reply = client
        .complete(&prompt::extract_prompt(text))
        .map_err(|e| TaskdownError::breakdown_failed(e.to_string()))?;
    let candidates = parser::parse_reply(&reply, LineFormat::TitleOnly);

    if json_output {
        let candidates_json: Vec<_> = candidates.iter().map(output::json::candidate_json).collect();
        print_success(json!({ "candidates": candidates_json }));
    } else {
        output::text::print_candidates(&candidates);
    }
    Ok(0)
}

#[derive(Deserialize)]
struct SplitInput {
    subtasks: Vec<SubtaskCandidate>,
}

#[derive(Deserialize)]
struct SaveInput {
    tasks: Vec<SubtaskCandidate>,
}

pub fn run_split(id: &str, json_output: bool, owner_flag: Option<&str>) -> Result<i32, TaskdownError> {
    let input: SplitInput = read_stdin_json()?;

    let conn = connection::open_db()?;
    let owner = connection::resolve_owner(owner_flag)?;
    let created = hierarchy::save_tasks(&conn, &owner, Some(id), &input.subtasks)?;

    if json_output {
        print_success(json!({
            "parentId": id,
            "created": tasks_json(&created),
        }));
    } else {
        println!("Saved {} subtask(s) under {id}.", created.len());
    }
    Ok(0)
}

pub fn run_save(json_output: bool, owner_flag: Option<&str>) -> Result<i32, TaskdownError> {
    let input: SaveInput = read_stdin_json()?;

    let conn = connection::open_db()?;
    let owner = connection::resolve_owner(owner_flag)?;
    let created = hierarchy::save_tasks(&conn, &owner, None, &input.tasks)?;

    if json_output {
        print_success(json!({ "created": tasks_json(&created) }));
    } else {
        println!("Saved {} task(s).", created.len());
    }
    Ok(0)
}

fn read_stdin_json<T: serde::de::DeserializeOwned>() -> Result<T, TaskdownError> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .map_err(|e| TaskdownError::validation(e.to_string()))?;
    serde_json::from_str(&input).map_err(|e| TaskdownError::validation(format!("Invalid JSON: {e}")))
}
