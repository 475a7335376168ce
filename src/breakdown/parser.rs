use crate::models::{SubtaskCandidate, MAX_RELUCTANCE, MIN_RELUCTANCE};

/// How reply lines are interpreted. `TitleWithScore` is what the breakdown
/// prompt asks for; `TitleOnly` handles replies that are plain task lists
/// (the transcription-extraction flow), where every task defaults to the
/// lowest reluctance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineFormat {
    TitleWithScore,
    TitleOnly,
}

/// Parse a free-text model reply into candidates, one per line.
///
/// Lines that do not match the active format are dropped; a single bad line
/// never fails the reply. Order is whatever the model produced. An empty
/// result is valid.
pub fn parse_reply(reply: &str, format: LineFormat) -> Vec<SubtaskCandidate> {
    reply
        .lines()
        .filter_map(|line| parse_line(line.trim(), format))
        .collect()
}

fn parse_line(line: &str, format: LineFormat) -> Option<SubtaskCandidate> {
    if line.is_empty() {
        return None;
    }
    match format {
        LineFormat::TitleOnly => Some(SubtaskCandidate::new(line, MIN_RELUCTANCE)),
        LineFormat::TitleWithScore => {
            let (title, score) = line.rsplit_once(" - ")?;
            let title = title.trim();
            let score: i32 = score.trim().parse().ok()?;
            if title.is_empty() {
                return None;
            }
            Some(SubtaskCandidate::new(
                title,
                score.clamp(MIN_RELUCTANCE, MAX_RELUCTANCE),
            ))
        }
    }
}
