use serde_json::{json, Value};

use crate::error::TaskdownError;
use crate::hierarchy::ParentDecision;
use crate::models::{SubtaskCandidate, Task};

pub fn success(data: Value) -> Value {
    json!({
        "success": true,
        "data": data
    })
}

pub fn error(err: &TaskdownError) -> Value {
    json!({
        "success": false,
        "error": {
            "code": err.code.as_str(),
            "message": err.message
        }
    })
}

pub fn task_json(t: &Task) -> Value {
    json!({
        "id": t.id,
        "title": t.title,
        "description": t.description,
        "reluctanceScore": t.reluctance_score,
        // Derived; completed_at is the authoritative signal.
        "completed": t.is_completed(),
        "completedAt": t.completed_at,
        "createdAt": t.created_at,
        "note": t.note,
        "brokenDown": t.broken_down,
        "masterTaskId": t.master_task_id,
    })
}

pub fn task_summary(t: &Task) -> Value {
    json!({
        "id": t.id,
        "title": t.title,
        "reluctanceScore": t.reluctance_score,
        "completed": t.is_completed(),
        "brokenDown": t.broken_down,
    })
}

pub fn candidate_json(c: &SubtaskCandidate) -> Value {
    json!({
        "title": c.title,
        "reluctanceScore": c.reluctance_score,
    })
}

pub fn parent_prompt_json(decision: &ParentDecision) -> Value {
    json!({
        "parentId": decision.parent.id,
        "parentTitle": decision.parent.title,
        "message": "All subtasks are done. Complete the parent task too?",
    })
}
