use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// Who wrote a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    User,
    Assistant,
}

/// Kind of a file attached to a message or sitting in the upload tray.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttachmentKind {
    Audio,
    Image,
    Document,
}

impl AttachmentKind {
    pub fn from_mime(mime: &str) -> Self {
        let mime = mime.trim().to_ascii_lowercase();
        if mime.starts_with("audio/") {
            Self::Audio
        } else if mime.starts_with("image/") {
            Self::Image
        } else {
            Self::Document
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Audio => "audio",
            Self::Image => "image",
            Self::Document => "document",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub kind: AttachmentKind,
    pub name: String,
    pub size_bytes: u64,
}

/// A single chat message. Immutable once created.
#[derive(Debug, Clone)]
pub struct Message {
    pub id: String,
    pub content: String,
    pub sender: Sender,
    pub timestamp: OffsetDateTime,
    pub attachment: Option<Attachment>,
}

impl Message {
    pub fn new(sender: Sender, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7().to_string(),
            content: content.into(),
            sender,
            timestamp: now(),
            attachment: None,
        }
    }

    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachment = Some(attachment);
        self
    }

    pub fn is_user(&self) -> bool {
        self.sender == Sender::User
    }

    pub fn is_assistant(&self) -> bool {
        self.sender == Sender::Assistant
    }
}

fn now() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionCategory {
    Greeting,
    Feature,
    Help,
    Action,
    Followup,
}

/// A quick-reply entry from the static suggestion catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Suggestion {
    pub id: &'static str,
    pub text: &'static str,
    pub category: SuggestionCategory,
}

/// Structured meeting summary returned by the completion adapter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResult {
    pub summary: String,
    pub key_points: Vec<String>,
    pub decisions: Vec<String>,
    pub action_items: Vec<ActionItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionItem {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attachment_kind_from_mime() {
        assert_eq!(AttachmentKind::from_mime("audio/mpeg"), AttachmentKind::Audio);
        assert_eq!(AttachmentKind::from_mime("Image/PNG"), AttachmentKind::Image);
        assert_eq!(
            AttachmentKind::from_mime("application/pdf"),
            AttachmentKind::Document
        );
        assert_eq!(AttachmentKind::from_mime(""), AttachmentKind::Document);
    }

    #[test]
    fn messages_get_distinct_ids() {
        let first = Message::new(Sender::User, "one");
        let second = Message::new(Sender::Assistant, "two");
        assert_ne!(first.id, second.id);
        assert!(first.is_user());
        assert!(second.is_assistant());
        assert!(first.attachment.is_none());
    }

    #[test]
    fn summary_serializes_camel_case() {
        let summary = SummaryResult {
            summary: "s".into(),
            key_points: vec!["k".into()],
            decisions: vec![],
            action_items: vec![ActionItem {
                title: "t".into(),
                due_date: Some("2026-01-01".into()),
                ..ActionItem::default()
            }],
        };
        let json = serde_json::to_string(&summary).unwrap();
        assert!(json.contains("\"keyPoints\""));
        assert!(json.contains("\"actionItems\""));
        assert!(json.contains("\"dueDate\""));
        assert!(!json.contains("assignee"));
    }
}
