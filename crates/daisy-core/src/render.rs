use crate::types::{ActionItem, SummaryResult};
use crate::upload::UploadedFile;

pub const PROCESSING_NOTICE: &str = "I'm processing your audio file. This may take a moment...";

/// Chat text for a finished transcription summary.
pub fn format_summary(result: &SummaryResult) -> String {
    let mut out = String::from("Transcription complete!\n\nSummary:\n");
    out.push_str(result.summary.trim());
    out.push_str("\n\nKey Points:\n");
    push_list(&mut out, result.key_points.iter().map(String::as_str));
    out.push_str("\n\nDecisions:\n");
    push_list(&mut out, result.decisions.iter().map(String::as_str));
    out.push_str("\n\nAction Items:\n");
    let items: Vec<String> = result.action_items.iter().map(format_action_item).collect();
    push_list(&mut out, items.iter().map(String::as_str));
    out
}

fn format_action_item(item: &ActionItem) -> String {
    let mut line = item.title.clone();
    if let Some(assignee) = &item.assignee {
        line.push_str(&format!(" ({assignee})"));
    }
    if let Some(due) = &item.due_date {
        line.push_str(&format!(" - due {due}"));
    }
    line
}

fn push_list<'a>(out: &mut String, items: impl Iterator<Item = &'a str>) {
    let mut empty = true;
    for (index, item) in items.enumerate() {
        if index > 0 {
            out.push('\n');
        }
        out.push_str("- ");
        out.push_str(item);
        empty = false;
    }
    if empty {
        out.push_str("- none");
    }
}

/// Reply for files that are not transcribed.
pub fn acknowledge_file(file: &UploadedFile) -> String {
    format!(
        "I've received your {} file \"{}\" ({}). I specialize in audio transcription, \
but I can answer questions about this file or help you organise meeting documents.",
        file.kind.label(),
        file.name,
        file.size_label
    )
}

/// Reply for audio uploads when no assistant service is in use.
pub fn acknowledge_demo_audio(file: &UploadedFile) -> String {
    format!(
        "I've received your audio file \"{}\" ({}). Transcription needs a connected \
assistant service, so in demo mode I can only describe how it works: I turn the recording \
into a transcript, then pull out the summary, key points, decisions and action items.",
        file.name, file.size_label
    )
}
