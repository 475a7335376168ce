use crate::models::{SubtaskCandidate, Task};

pub fn print_task(t: &Task) {
    println!("Task: {} ({})", t.title, t.id);
    if let Some(ref desc) = t.description {
        println!("  Description: {desc}");
    }
    println!("  Reluctance: {}", t.reluctance_score);
    println!("  Created: {}", t.created_at);
    match t.completed_at {
        Some(ref done) => println!("  Completed: {done}"),
        None => println!("  Completed: no"),
    }
    if t.broken_down {
        println!("  Broken down: yes");
    }
    if let Some(ref note) = t.note {
        println!("  Note: {note}");
    }
    if let Some(ref master) = t.master_task_id {
        println!("  Subtask of: {master}");
    }
}

pub fn print_task_list(tasks: &[Task]) {
    if tasks.is_empty() {
        println!("No tasks found.");
        return;
    }
    for t in tasks {
        let done = if t.is_completed() { "x" } else { " " };
        let split = if t.broken_down { " +" } else { "" };
        println!(
            "  [{}] {} ({}) r={}{}",
            done,
            t.title,
            &t.id[..std::cmp::min(8, t.id.len())],
            t.reluctance_score,
            split
        );
    }
}

pub fn print_candidates(candidates: &[SubtaskCandidate]) {
    if candidates.is_empty() {
        println!("The model produced no usable subtasks. Try again.");
        return;
    }
    println!("Suggested subtasks:");
    for (i, c) in candidates.iter().enumerate() {
        println!("  {}. {} (reluctance {})", i + 1, c.title, c.reluctance_score);
    }
}
