//! Quick-reply suggestions drawn from one static catalog.
//!
//! Every subset is emitted in catalog order, so results are stable for a given
//! conversation and draft.

use crate::respond;
use crate::types::{Message, Sender, Suggestion, SuggestionCategory};

pub const MAX_DRAFT_MATCHES: usize = 3;

const fn entry(id: &'static str, text: &'static str, category: SuggestionCategory) -> Suggestion {
    Suggestion { id, text, category }
}

use SuggestionCategory::{Action, Feature, Followup, Greeting, Help};

pub const CATALOG: &[Suggestion] = &[
    entry("greet-capabilities", "What can you do?", Greeting),
    entry("greet-start", "How do I get started?", Greeting),
    entry("feature-upload", "Upload a meeting recording", Feature),
    entry("feature-transcription", "How does transcription work?", Feature),
    entry("feature-integrations", "Show me integrations", Feature),
    entry("feature-list", "What are your features?", Feature),
    entry("action-summary", "Generate a summary from this recording", Action),
    entry("action-items", "Extract action items", Action),
    entry("action-speakers", "Identify speakers in the audio", Action),
    entry("action-export", "Export transcript as PDF", Action),
    entry("action-connect-calendar", "Connect Google Calendar", Action),
    entry("action-slack-notify", "Set up Slack notifications", Action),
    entry("action-notion-sync", "Configure Notion sync", Action),
    entry("followup-calendar", "Sync to Google Calendar", Followup),
    entry("followup-slack", "Send to Slack channel", Followup),
    entry("followup-notion", "Save to Notion", Followup),
    entry("help-security", "Is my meeting data secure?", Help),
    entry("help-languages", "Which languages do you support?", Help),
    entry("help-pricing", "How much does it cost?", Help),
];

const TRANSCRIPTION_IDS: &[&str] = &[
    "action-summary",
    "action-items",
    "action-speakers",
    "action-export",
];
const INTEGRATION_IDS: &[&str] = &[
    "action-connect-calendar",
    "action-slack-notify",
    "action-notion-sync",
];
const SUMMARY_IDS: &[&str] = &["followup-calendar", "followup-slack", "followup-notion"];
const GRATITUDE_IDS: &[&str] = &[
    "greet-capabilities",
    "feature-upload",
    "feature-integrations",
];
const GREETING_IDS: &[&str] = &[
    "greet-capabilities",
    "greet-start",
    "feature-upload",
    "feature-transcription",
];
const DEFAULT_IDS: &[&str] = &[
    "feature-upload",
    "feature-transcription",
    "feature-integrations",
    "feature-list",
];

/// Topic of the assistant's last reply, as seen by the suggestion selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyTopic {
    Transcription,
    Integration,
    SummaryOrAction,
    Gratitude,
}

impl ReplyTopic {
    /// Checked in declaration order; the first hit wins.
    pub fn detect(content: &str) -> Option<Self> {
        let content = content.to_lowercase();
        if content.contains("transcri") {
            Some(Self::Transcription)
        } else if content.contains("integrat") {
            Some(Self::Integration)
        } else if content.contains("summar") || content.contains("action item") {
            Some(Self::SummaryOrAction)
        } else if content.contains("welcome") {
            Some(Self::Gratitude)
        } else {
            None
        }
    }

    fn subset(self) -> &'static [&'static str] {
        match self {
            Self::Integration => INTEGRATION_IDS,
            Self::Transcription => TRANSCRIPTION_IDS,
            Self::SummaryOrAction => SUMMARY_IDS,
            Self::Gratitude => GRATITUDE_IDS,
        }
    }
}

/// Suggestions for the current conversation and in-progress draft.
pub fn select_suggestions(history: &[Message], draft: &str) -> Vec<Suggestion> {
    let draft = draft.trim();
    if !draft.is_empty() {
        return filter_catalog(draft);
    }

    let last_reply = last_content(history, Sender::Assistant);
    if let Some(topic) = last_reply.and_then(ReplyTopic::detect) {
        return subset(topic.subset());
    }

    if last_content(history, Sender::User).is_some_and(respond::is_greeting) {
        return subset(GREETING_IDS);
    }

    subset(DEFAULT_IDS)
}

/// Case-insensitive substring filter over the whole catalog.
pub fn filter_catalog(draft: &str) -> Vec<Suggestion> {
    let needle = draft.trim().to_lowercase();
    CATALOG
        .iter()
        .filter(|suggestion| suggestion.text.to_lowercase().contains(&needle))
        .take(MAX_DRAFT_MATCHES)
        .copied()
        .collect()
}

fn subset(ids: &[&str]) -> Vec<Suggestion> {
    CATALOG
        .iter()
        .filter(|suggestion| ids.contains(&suggestion.id))
        .copied()
        .collect()
}

fn last_content(history: &[Message], sender: Sender) -> Option<&str> {
    history
        .iter()
        .rev()
        .find(|message| message.sender == sender)
        .map(|message| message.content.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::respond::{INTRO, select_response};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn texts(suggestions: &[Suggestion]) -> Vec<&'static str> {
        suggestions.iter().map(|s| s.text).collect()
    }

    fn turn(user: &str, assistant: &str) -> Vec<Message> {
        vec![
            Message::new(Sender::User, user),
            Message::new(Sender::Assistant, assistant),
        ]
    }

    #[test]
    fn catalog_ids_are_unique_and_subsets_resolve() {
        for (i, a) in CATALOG.iter().enumerate() {
            for b in &CATALOG[i + 1..] {
                assert_ne!(a.id, b.id);
            }
        }
        for ids in [
            TRANSCRIPTION_IDS,
            INTEGRATION_IDS,
            SUMMARY_IDS,
            GRATITUDE_IDS,
            GREETING_IDS,
            DEFAULT_IDS,
        ] {
            let resolved = subset(ids);
            assert_eq!(resolved.len(), ids.len());
            assert!((3..=5).contains(&resolved.len()));
        }
    }

    #[test]
    fn integration_reply_yields_integration_subset_in_catalog_order() {
        let history = turn("slack?", "Would you like help setting up an integration?");
        let suggestions = select_suggestions(&history, "");
        assert_eq!(
            texts(&suggestions),
            vec![
                "Connect Google Calendar",
                "Set up Slack notifications",
                "Configure Notion sync",
            ]
        );
    }

    #[test]
    fn draft_filters_catalog_case_insensitively() {
        let suggestions = select_suggestions(&[], "cal");
        assert!(!suggestions.is_empty());
        assert!(suggestions.len() <= MAX_DRAFT_MATCHES);
        for suggestion in &suggestions {
            assert!(suggestion.text.to_lowercase().contains("cal"));
        }
        assert_eq!(
            texts(&suggestions),
            vec!["Connect Google Calendar", "Sync to Google Calendar"]
        );
    }

    #[test]
    fn draft_matches_are_capped() {
        // "o" appears in most entries
        let suggestions = select_suggestions(&[], "O");
        assert_eq!(suggestions.len(), MAX_DRAFT_MATCHES);
        assert_eq!(suggestions[0].id, "greet-capabilities");
    }

    #[test]
    fn draft_without_matches_is_empty() {
        assert!(select_suggestions(&[], "zzz").is_empty());
    }

    #[test]
    fn whitespace_draft_counts_as_empty() {
        assert_eq!(select_suggestions(&[], "   "), subset(DEFAULT_IDS));
    }

    #[test]
    fn fresh_conversation_gets_default_slice() {
        let history = vec![Message::new(Sender::Assistant, INTRO)];
        assert_eq!(
            texts(&select_suggestions(&history, "")),
            vec![
                "Upload a meeting recording",
                "How does transcription work?",
                "Show me integrations",
                "What are your features?",
            ]
        );
    }

    #[test]
    fn greeting_gets_greeting_subset() {
        let mut rng = StdRng::seed_from_u64(1);
        let reply = select_response("hello", &[], &mut rng);
        let history = turn("hello", &reply);
        let suggestions = select_suggestions(&history, "");
        assert_eq!(suggestions[0].category, SuggestionCategory::Greeting);
        assert_eq!(suggestions, subset(GREETING_IDS));
    }

    #[test]
    fn canned_replies_steer_follow_up_suggestions() {
        let mut rng = StdRng::seed_from_u64(1);
        let cases = [
            ("transcribe my audio", TRANSCRIPTION_IDS),
            ("can you summarize", SUMMARY_IDS),
            ("extract action items", SUMMARY_IDS),
            ("connect notion", INTEGRATION_IDS),
            ("thank you", GRATITUDE_IDS),
        ];
        for (input, expected) in cases {
            let reply = select_response(input, &[], &mut rng);
            let history = turn(input, &reply);
            assert_eq!(select_suggestions(&history, ""), subset(expected), "{input}");
        }
    }

    #[test]
    fn reply_topic_prefers_transcription_over_integration() {
        assert_eq!(
            ReplyTopic::detect("Transcript ready. Want an integration?"),
            Some(ReplyTopic::Transcription)
        );
        assert_eq!(
            ReplyTopic::detect("Integration done, action items synced"),
            Some(ReplyTopic::Integration)
        );
        assert_eq!(ReplyTopic::detect("nothing here"), None);
    }

    #[test]
    fn transcript_reply_mentioning_integration_suggests_transcript_actions() {
        let history = turn(
            "what next",
            "Your transcript is ready. Want to set up an integration?",
        );
        let ids: Vec<&str> = select_suggestions(&history, "")
            .iter()
            .map(|suggestion| suggestion.id)
            .collect();
        assert_eq!(
            ids,
            vec!["action-summary", "action-items", "action-speakers", "action-export"]
        );
    }
}
