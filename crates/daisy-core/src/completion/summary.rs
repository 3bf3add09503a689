use serde::Deserialize;

use crate::AssistantError;
use crate::types::{ActionItem, SummaryResult};

/// Parse model output into a validated summary. Accepts a bare JSON object or
/// one wrapped in prose or code fences. Any shape problem is `MalformedResponse`.
pub(crate) fn parse_summary(output: &str) -> Result<SummaryResult, AssistantError> {
    let output = output.trim();
    let payload = match serde_json::from_str::<SummaryPayload>(output) {
        Ok(payload) => payload,
        Err(direct) => {
            let json = extract_json_object(output).ok_or_else(|| {
                AssistantError::MalformedResponse(format!("no json object found: {direct}"))
            })?;
            serde_json::from_str(json)
                .map_err(|e| AssistantError::MalformedResponse(e.to_string()))?
        }
    };
    payload.validate()
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SummaryPayload {
    summary: String,
    key_points: Vec<String>,
    decisions: Vec<String>,
    action_items: Vec<ActionItemPayload>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ActionItemPayload {
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    assignee: Option<String>,
    #[serde(default)]
    due_date: Option<String>,
}

impl SummaryPayload {
    fn validate(self) -> Result<SummaryResult, AssistantError> {
        let summary = self.summary.trim().to_string();
        if summary.is_empty() {
            return Err(AssistantError::MalformedResponse("summary is empty".into()));
        }

        let mut action_items = Vec::with_capacity(self.action_items.len());
        for (index, item) in self.action_items.into_iter().enumerate() {
            let title = item.title.trim().to_string();
            if title.is_empty() {
                return Err(AssistantError::MalformedResponse(format!(
                    "action item {index} has an empty title"
                )));
            }
            action_items.push(ActionItem {
                title,
                description: non_blank(item.description),
                assignee: non_blank(item.assignee),
                due_date: non_blank(item.due_date),
            });
        }

        Ok(SummaryResult {
            summary,
            key_points: clean_list(self.key_points),
            decisions: clean_list(self.decisions),
            action_items,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn clean_list(items: Vec<String>) -> Vec<String> {
    items
        .into_iter()
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}

fn extract_json_object(input: &str) -> Option<&str> {
    let start = input.find('{')?;
    let end = input.rfind('}')?;
    if end <= start {
        return None;
    }
    Some(&input[start..=end])
}

#[cfg(test)]
mod tests {
    use super::{extract_json_object, parse_summary};
    use crate::ErrorKind;

    const VALID: &str = r#"{
        "summary": "Team agreed on the launch plan.",
        "keyPoints": ["Launch moves to May", "  "],
        "decisions": ["Ship the beta first"],
        "actionItems": [
            {"title": "Draft release notes", "assignee": "Priya", "dueDate": "2026-05-01"},
            {"title": "Book the venue", "description": "", "assignee": null},
            {"title": "Email partners"}
        ]
    }"#;

    #[test]
    fn extract_json_object_finds_bounds() {
        let input = "prefix {\"summary\": \"x\"} suffix";
        assert_eq!(extract_json_object(input), Some("{\"summary\": \"x\"}"));
        assert_eq!(extract_json_object("} nothing {"), None);
    }

    #[test]
    fn action_item_count_matches_raw_json() {
        let result = parse_summary(VALID).unwrap();
        assert_eq!(result.action_items.len(), 3);
        assert_eq!(result.action_items[0].assignee.as_deref(), Some("Priya"));
        assert_eq!(result.action_items[0].due_date.as_deref(), Some("2026-05-01"));
        assert_eq!(result.action_items[1].description, None);
        assert_eq!(result.key_points, vec!["Launch moves to May"]);
    }

    #[test]
    fn fenced_output_is_accepted() {
        let fenced = format!("```json\n{VALID}\n```");
        assert_eq!(parse_summary(&fenced).unwrap().action_items.len(), 3);
    }

    #[test]
    fn invalid_json_is_malformed() {
        let err = parse_summary("Sure! Here is your summary: the team met.").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedResponse);

        let err = parse_summary("{\"summary\": \"cut off").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedResponse);
    }

    #[test]
    fn missing_field_is_malformed() {
        let err =
            parse_summary(r#"{"summary": "s", "keyPoints": [], "decisions": []}"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedResponse);
    }

    #[test]
    fn wrong_type_is_malformed() {
        let err = parse_summary(
            r#"{"summary": "s", "keyPoints": "one", "decisions": [], "actionItems": []}"#,
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedResponse);
    }

    #[test]
    fn blank_summary_or_title_is_malformed() {
        let err = parse_summary(
            r#"{"summary": " ", "keyPoints": [], "decisions": [], "actionItems": []}"#,
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedResponse);

        let err = parse_summary(
            r#"{"summary": "s", "keyPoints": [], "decisions": [], "actionItems": [{"title": ""}]}"#,
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedResponse);
    }
}
