use std::io::{self, BufRead};

use serde_json::json;

use crate::db::{connection, task_repo};
use crate::error::TaskdownError;
use crate::hierarchy;
use crate::models::{valid_reluctance, SubtaskCandidate, Task};
use crate::output;

pub fn run_add(
    title: &str,
    description: Option<&str>,
    score: i32,
    json_output: bool,
    owner_flag: Option<&str>,
) -> Result<i32, TaskdownError> {
    let conn = connection::open_db()?;
    let owner = connection::resolve_owner(owner_flag)?;

    let candidate = SubtaskCandidate {
        title: title.to_string(),
        description: description.map(str::to_string),
        reluctance_score: score,
    };
    let task = hierarchy::save_tasks(&conn, &owner, None, &[candidate])?.remove(0);

    if json_output {
        print_success(json!({ "task": output::json::task_json(&task) }));
    } else {
        println!("Added task: {} ({})", task.title, task.id);
    }
    Ok(0)
}

pub fn run_list(json_output: bool, owner_flag: Option<&str>) -> Result<i32, TaskdownError> {
    let conn = connection::open_db()?;
    let owner = connection::resolve_owner(owner_flag)?;
    let tasks = task_repo::list_top_level(&conn, &owner)?;

    if json_output {
        let tasks_json: Vec<_> = tasks.iter().map(output::json::task_summary).collect();
        print_success(json!({ "tasks": tasks_json }));
    } else {
        output::text::print_task_list(&tasks);
    }
    Ok(0)
}

pub fn run_show(id: &str, json_output: bool, owner_flag: Option<&str>) -> Result<i32, TaskdownError> {
    let conn = connection::open_db()?;
    let owner = connection::resolve_owner(owner_flag)?;
    let task = task_repo::get_task(&conn, &owner, id)?;

    if json_output {
        print_success(json!({ "task": output::json::task_json(&task) }));
    } else {
        output::text::print_task(&task);
    }
    Ok(0)
}

pub fn run_edit(
    id: &str,
    title: Option<&str>,
    description: Option<&str>,
    score: Option<i32>,
    json_output: bool,
    owner_flag: Option<&str>,
) -> Result<i32, TaskdownError> {
    if let Some(title) = title {
        if title.trim().is_empty() {
            return Err(TaskdownError::validation("Task title must not be empty"));
        }
    }
    if let Some(score) = score {
        if !valid_reluctance(score) {
            return Err(TaskdownError::validation(format!(
                "Reluctance score must be between 1 and 5, got {score}"
            )));
        }
    }

    let conn = connection::open_db()?;
    let owner = connection::resolve_owner(owner_flag)?;
    // Resolve first so an unknown id is not-found rather than a silent no-op.
    task_repo::get_task(&conn, &owner, id)?;
    let task = task_repo::update_task(
        &conn,
        &owner,
        id,
        &task_repo::TaskPatch {
            title,
            description,
            reluctance_score: score,
        },
    )?;

    if json_output {
        print_success(json!({ "task": output::json::task_json(&task) }));
    } else {
        println!("Updated task: {} ({})", task.title, task.id);
    }
    Ok(0)
}

pub fn run_subtasks(id: &str, json_output: bool, owner_flag: Option<&str>) -> Result<i32, TaskdownError> {
    let conn = connection::open_db()?;
    let owner = connection::resolve_owner(owner_flag)?;
    // No parent-existence check here: an unknown id simply has no subtasks.
    let subtasks = task_repo::subtasks_of(&conn, &owner, id)?;

    if json_output {
        let subtasks_json: Vec<_> = subtasks.iter().map(output::json::task_json).collect();
        print_success(json!({ "subtasks": subtasks_json }));
    } else {
        output::text::print_task_list(&subtasks);
    }
    Ok(0)
}

pub fn run_done(id: &str, json_output: bool, owner_flag: Option<&str>) -> Result<i32, TaskdownError> {
    let conn = connection::open_db()?;
    let owner = connection::resolve_owner(owner_flag)?;

    task_repo::set_completed(&conn, &owner, id, true)?;
    let mut task = task_repo::get_task(&conn, &owner, id)?;

    if json_output {
        // Non-interactive: surface the decision and let the caller re-invoke
        // `done` on the parent if the user says yes.
        let decision = hierarchy::after_completion(&conn, &owner, &task)?;
        print_success(json!({
            "task": output::json::task_json(&task),
            "parent_prompt": decision.as_ref().map(output::json::parent_prompt_json),
        }));
        return Ok(0);
    }

    println!("Completed: {} ({})", task.title, task.id);
    // Walk upward one confirmed step at a time; declining stops the chain.
    while let Some(decision) = hierarchy::after_completion(&conn, &owner, &task)? {
        let parent = decision.parent;
        if !confirm(&format!(
            "All subtasks of \"{}\" are done. Complete it too? [y/N] ",
            parent.title
        )) {
            break;
        }
        task_repo::set_completed(&conn, &owner, &parent.id, true)?;
        task = task_repo::get_task(&conn, &owner, &parent.id)?;
        println!("Completed: {} ({})", task.title, task.id);
    }
    Ok(0)
}

pub fn run_reopen(id: &str, json_output: bool, owner_flag: Option<&str>) -> Result<i32, TaskdownError> {
    let conn = connection::open_db()?;
    let owner = connection::resolve_owner(owner_flag)?;
    task_repo::set_completed(&conn, &owner, id, false)?;
    let task = task_repo::get_task(&conn, &owner, id)?;

    if json_output {
        print_success(json!({ "task": output::json::task_json(&task) }));
    } else {
        println!("Reopened: {} ({})", task.title, task.id);
    }
    Ok(0)
}

pub fn run_delete(id: &str, json_output: bool, owner_flag: Option<&str>) -> Result<i32, TaskdownError> {
    let conn = connection::open_db()?;
    let owner = connection::resolve_owner(owner_flag)?;
    let deleted = hierarchy::delete_tree(&conn, &owner, id)?;

    if json_output {
        print_success(json!({ "deleted": { "id": id, "count": deleted } }));
    } else if deleted == 0 {
        println!("Nothing to delete for {id}.");
    } else {
        println!("Deleted {deleted} task(s) under {id}.");
    }
    Ok(0)
}

fn confirm(prompt: &str) -> bool {
    print!("{prompt}");
    use std::io::Write;
    let _ = io::stdout().flush();
    let mut answer = String::new();
    match io::stdin().lock().read_line(&mut answer) {
        Ok(_) => matches!(answer.trim(), "y" | "Y" | "yes"),
        Err(_) => false,
    }
}

pub(super) fn print_success(data: serde_json::Value) {
    println!(
        "{}",
        serde_json::to_string_pretty(&output::json::success(data)).unwrap()
    );
}

pub(super) fn tasks_json(tasks: &[Task]) -> Vec<serde_json::Value> {
    tasks.iter().map(output::json::task_json).collect()
}
