/// Build the single user-turn instruction sent to the model.
///
/// `description` is a plain `&str` on purpose: a task without a description
/// passes an empty string, so no placeholder text can leak into the prompt.
pub fn breakdown_prompt(title: &str, description: &str) -> String {
    format!(
        "Given the task titled \"{title}\" with the description \"{description}\", \
         break it down into no more than 5 smaller, actionable subtasks that can be \
         easily followed. Fewer is better. Each subtask should include an estimated \
         reluctance score from 1 to 5, with 5 being the hardest. Format the response \
         as follows: subtask title - reluctance score."
    )
}

/// Prompt for mining a plain task list out of free text (a transcript,
/// pasted notes). The reply is expected as bare titles, one per line.
pub fn extract_prompt(text: &str) -> String {
    format!(
        "Extract a short list of actionable tasks from the following text: \"{text}\". \
         Respond with one task per line, no numbering and no extra commentary."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn includes_title_and_description() {
        let p = breakdown_prompt("Clean garage", "it is a mess");
        assert!(p.contains("\"Clean garage\""));
        assert!(p.contains("\"it is a mess\""));
        assert!(p.contains("no more than 5"));
    }

    #[test]
    fn empty_description_stays_empty() {
        let p = breakdown_prompt("Clean garage", "");
        assert!(p.contains("the description \"\""));
        assert!(!p.contains("undefined"));
    }

    #[test]
    fn extract_prompt_embeds_the_text() {
        let p = extract_prompt("buy milk and call the bank");
        assert!(p.contains("\"buy milk and call the bank\""));
        assert!(p.contains("one task per line"));
    }
}
