use serde::{Deserialize, Serialize};

/// A proposed subtask before it is persisted: what the breakdown parser
/// emits and what `split`/`save` accept on stdin. Field names match the
/// mobile client's wire format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubtaskCandidate {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default = "default_score")]
    pub reluctance_score: i32,
}

fn default_score() -> i32 {
    super::task::MIN_RELUCTANCE
}

impl SubtaskCandidate {
    pub fn new(title: impl Into<String>, reluctance_score: i32) -> Self {
        Self {
            title: title.into(),
            description: None,
            reluctance_score,
        }
    }
}
