//! Canned-reply selection for demo mode.
//!
//! Keyword groups are tested in a fixed priority order against the lowercased
//! message and the first matching group wins. A keyword is either a fragment
//! (plain substring) or a word (whole token), so "this" never reads as "hi".

use rand::Rng;
use rand::seq::SliceRandom;

use crate::types::Message;

pub const INTRO: &str = "Hello! I'm Daisy, your AI meeting assistant. Send me a meeting recording \
and I'll turn it into clear notes, highlights and follow-ups for your team. \
What would you like to do today?";

const REGREETING: &str = "Hi again! What can I help you with next?";

const TRANSCRIPTION: &str = "I'd be happy to transcribe that for you! Upload an MP3, WAV or M4A file \
and I'll turn it into an accurate, searchable transcript in more than 50 languages. \
Would you like to upload a file now?";

const SUMMARY: &str = "I can write meeting summaries that cover the key points, the decisions made \
and every action item with its owner. Upload your recording and I'll analyze it, flagging \
deadlines and follow-ups along the way.";

const ACTION_ITEMS: &str = "Pulling out action items is one of my specialties! I note who owns each \
task and when it's due, and I can sync them to your calendar or project tools so nothing slips \
through the cracks.";

const INTEGRATIONS: &str = "I work with the tools you already use: I can sync action items to \
Google Calendar, post notes to Slack and save them to Notion, plus 1000+ more apps through Zapier. \
Want help setting up an integration?";

const PRICING: &str = "There's a Free plan with 5 meetings a month. Pro is $29/month for unlimited \
meetings and every premium feature, and Enterprise plans are available for larger teams with \
extra admin and security controls.";

const FEATURES: &str = "Here's what I can do for you:\n\n\
• Transcribe audio accurately\n\
• Write smart meeting summaries\n\
• Extract action items and deadlines\n\
• Sync with your favorite tools\n\
• Caption meetings live\n\
• Work in 50+ languages\n\n\
What would you like to try first?";

const REAL_TIME: &str = "Yes! I can caption meetings live as they happen. Start a live recording \
and I'll take notes while you talk, then wrap everything up when the meeting ends so you can \
stay focused on the conversation.";

const LANGUAGES: &str = "I understand more than 50 languages, including English, Spanish, French, \
German, Italian, Portuguese, Dutch, Russian, Chinese and Japanese. The spoken language is \
detected automatically.";

const PRIVACY: &str = "Your privacy comes first. Recordings are encrypted in transit and at rest, \
audio is kept only as long as needed, and your meeting data is never used to train AI models.";

const GRATITUDE: &str = "You're welcome! Happy to help any time. Is there anything else you'd \
like to work on?";

const ONBOARDING: &str = "Getting started is easy: upload a meeting recording, review the notes I \
write for you, then share them with your team. Would you like to try it with a recording now?";

pub const DEFAULT_RESPONSES: &[&str] = &[
    "That's an interesting question! I'm built to help with meeting recordings, notes and follow-ups. \
Could you tell me more about what you're trying to get done?",
    "I'd love to help with that! As your meeting assistant I focus on recordings, meeting notes and \
follow-up tasks. Which of those can I help you with?",
    "Thanks for reaching out! I'm here to make your meetings more productive. Tell me what you'd \
like to work on and we'll get started.",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    Greeting,
    Transcription,
    Summary,
    ActionItems,
    Integrations,
    Pricing,
    Features,
    RealTime,
    Languages,
    Privacy,
    Gratitude,
    Onboarding,
}

#[derive(Debug, Clone, Copy)]
enum Keyword {
    Fragment(&'static str),
    Word(&'static str),
}

struct TopicRule {
    topic: Topic,
    keywords: &'static [Keyword],
    reply: &'static str,
}

use Keyword::{Fragment, Word};

// Priority order. Greeting's reply is replaced by REGREETING after the first user turn.
const RULES: &[TopicRule] = &[
    TopicRule {
        topic: Topic::Greeting,
        keywords: &[
            Word("hello"),
            Word("hi"),
            Word("hey"),
            Word("hiya"),
            Word("howdy"),
            Word("greetings"),
            Fragment("good morning"),
            Fragment("good afternoon"),
            Fragment("good evening"),
        ],
        reply: INTRO,
    },
    TopicRule {
        topic: Topic::Transcription,
        keywords: &[
            Fragment("transcri"),
            Fragment("audio"),
            Fragment("upload"),
            Fragment("recording"),
            Fragment("whisper"),
        ],
        reply: TRANSCRIPTION,
    },
    TopicRule {
        topic: Topic::Summary,
        keywords: &[
            Fragment("summar"),
            Fragment("recap"),
            Fragment("key points"),
        ],
        reply: SUMMARY,
    },
    TopicRule {
        topic: Topic::ActionItems,
        keywords: &[
            Fragment("action"),
            Word("task"),
            Word("tasks"),
            Word("todo"),
            Fragment("to-do"),
            Fragment("follow up"),
            Fragment("deadline"),
        ],
        reply: ACTION_ITEMS,
    },
    TopicRule {
        topic: Topic::Integrations,
        keywords: &[
            Fragment("integrat"),
            Fragment("calendar"),
            Fragment("slack"),
            Fragment("notion"),
            Fragment("zapier"),
            Word("sync"),
        ],
        reply: INTEGRATIONS,
    },
    TopicRule {
        topic: Topic::Pricing,
        keywords: &[
            Fragment("pric"),
            Word("cost"),
            Word("costs"),
            Word("plan"),
            Word("plans"),
            Word("free"),
            Fragment("subscription"),
        ],
        reply: PRICING,
    },
    TopicRule {
        topic: Topic::Features,
        keywords: &[
            Fragment("feature"),
            Fragment("what can"),
            Fragment("capabilit"),
            Word("help"),
        ],
        reply: FEATURES,
    },
    TopicRule {
        topic: Topic::RealTime,
        keywords: &[
            Fragment("real-time"),
            Fragment("realtime"),
            Fragment("real time"),
            Word("live"),
            Word("record"),
        ],
        reply: REAL_TIME,
    },
    TopicRule {
        topic: Topic::Languages,
        keywords: &[
            Fragment("language"),
            Fragment("translat"),
            Word("spanish"),
            Word("french"),
            Word("german"),
        ],
        reply: LANGUAGES,
    },
    TopicRule {
        topic: Topic::Privacy,
        keywords: &[
            Fragment("privacy"),
            Fragment("private"),
            Fragment("secur"),
            Fragment("encrypt"),
            Word("safe"),
            Word("gdpr"),
        ],
        reply: PRIVACY,
    },
    TopicRule {
        topic: Topic::Gratitude,
        keywords: &[Fragment("thank"), Word("thx"), Fragment("appreciate")],
        reply: GRATITUDE,
    },
    TopicRule {
        topic: Topic::Onboarding,
        keywords: &[
            Fragment("get started"),
            Fragment("getting started"),
            Fragment("how do i start"),
            Fragment("onboard"),
            Fragment("tutorial"),
            Fragment("new here"),
            Fragment("first time"),
        ],
        reply: ONBOARDING,
    },
];

/// Outcome of classifying a user message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Matched { topic: Topic, reply: &'static str },
    /// No keyword group matched; any candidate is an equally valid reply.
    Candidates(&'static [&'static str]),
}

struct Normalized {
    text: String,
    words: Vec<String>,
}

impl Normalized {
    fn new(input: &str) -> Self {
        let text = input.to_lowercase();
        let words = text
            .split(|ch: char| !ch.is_alphanumeric())
            .filter(|word| !word.is_empty())
            .map(str::to_string)
            .collect();
        Self { text, words }
    }

    fn matches(&self, keyword: Keyword) -> bool {
        match keyword {
            Keyword::Fragment(fragment) => self.text.contains(fragment),
            Keyword::Word(word) => self.words.iter().any(|candidate| candidate == word),
        }
    }

    fn matches_any(&self, keywords: &[Keyword]) -> bool {
        keywords.iter().any(|keyword| self.matches(*keyword))
    }
}

/// Return the first topic whose keywords appear in `text`.
pub fn detect_topic(text: &str) -> Option<Topic> {
    let normalized = Normalized::new(text);
    RULES
        .iter()
        .find(|rule| normalized.matches_any(rule.keywords))
        .map(|rule| rule.topic)
}

pub fn is_greeting(text: &str) -> bool {
    detect_topic(text) == Some(Topic::Greeting)
}

/// Classify a user message. `prior` is the conversation before this message.
pub fn classify(text: &str, prior: &[Message]) -> Selection {
    let normalized = Normalized::new(text);
    let Some(rule) = RULES
        .iter()
        .find(|rule| normalized.matches_any(rule.keywords))
    else {
        return Selection::Candidates(DEFAULT_RESPONSES);
    };

    let reply = if rule.topic == Topic::Greeting && prior.iter().any(Message::is_user) {
        REGREETING
    } else {
        rule.reply
    };
    Selection::Matched {
        topic: rule.topic,
        reply,
    }
}

/// Pick the canned reply for `text`. Randomness only applies when no keyword group matches.
pub fn select_response<R: Rng + ?Sized>(text: &str, prior: &[Message], rng: &mut R) -> String {
    match classify(text, prior) {
        Selection::Matched { reply, .. } => reply.to_string(),
        Selection::Candidates(candidates) => candidates
            .choose(rng)
            .copied()
            .unwrap_or(DEFAULT_RESPONSES[0])
            .to_string(),
    }
}
