//! Reply generation for a chat session, in either demo or live mode.

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::completion::CompletionClient;
use crate::conversation::Conversation;
use crate::render::{acknowledge_demo_audio, acknowledge_file, format_summary};
use crate::respond::select_response;
use crate::suggest::select_suggestions;
use crate::types::{Message, Suggestion};
use crate::upload::UploadedFile;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Demo,
    Live,
}

impl Mode {
    pub fn label(self) -> &'static str {
        match self {
            Self::Demo => "demo",
            Self::Live => "live",
        }
    }
}

/// Canned replies with an injected random source for the default branch.
pub struct CannedResponder {
    rng: Box<dyn RngCore + Send>,
}

impl CannedResponder {
    pub fn new() -> Self {
        Self::with_rng(Box::new(StdRng::from_entropy()))
    }

    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(Box::new(StdRng::seed_from_u64(seed)))
    }

    pub fn with_rng(rng: Box<dyn RngCore + Send>) -> Self {
        Self { rng }
    }

    pub fn reply(&mut self, text: &str, prior: &[Message]) -> String {
        select_response(text, prior, &mut *self.rng)
    }
}

impl Default for CannedResponder {
    fn default() -> Self {
        Self::new()
    }
}

/// A session uses exactly one of these for its whole lifetime.
pub enum Responder {
    Canned(CannedResponder),
    Live(CompletionClient),
}

impl Responder {
    pub fn mode(&self) -> Mode {
        match self {
            Self::Canned(_) => Mode::Demo,
            Self::Live(_) => Mode::Live,
        }
    }

    /// Reply to trimmed, non-empty user text. Never fails.
    pub fn reply(&mut self, text: &str, prior: &[Message]) -> String {
        match self {
            Self::Canned(canned) => canned.reply(text, prior),
            Self::Live(client) => client.chat_or_fallback(text),
        }
    }

    /// Reply to an uploaded file. Live audio goes through transcription and
    /// summary; everything else is acknowledged without network use.
    pub fn handle_upload(&mut self, file: &UploadedFile) -> String {
        match self {
            Self::Live(client) if file.is_audio() => {
                tracing::info!(file = %file.name, size = %file.size_label, "processing audio upload");
                let transcript = match client.transcribe_or_fallback(&file.audio_input()) {
                    Ok(transcript) => transcript,
                    Err(message) => return message,
                };
                match client.summarize_or_fallback(&transcript) {
                    Ok(summary) => format_summary(&summary),
                    Err(message) => message,
                }
            }
            Self::Canned(_) if file.is_audio() => acknowledge_demo_audio(file),
            _ => acknowledge_file(file),
        }
    }
}

/// Conversation plus responder. `&mut self` keeps one request in flight.
pub struct ChatSession {
    conversation: Conversation,
    responder: Responder,
}

impl ChatSession {
    pub fn new(responder: Responder) -> Self {
        Self::with_conversation(Conversation::new(), responder)
    }

    pub fn with_conversation(conversation: Conversation, responder: Responder) -> Self {
        Self {
            conversation,
            responder,
        }
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn mode(&self) -> Mode {
        self.responder.mode()
    }

    /// Send user text and record the reply. Whitespace-only input is a no-op.
    pub fn send(&mut self, input: &str) -> Option<&Message> {
        let text = input.trim();
        if text.is_empty() {
            return None;
        }
        let reply = self.responder.reply(text, self.conversation.messages());
        self.conversation.push_user(text);
        Some(self.conversation.push_assistant(reply))
    }

    pub fn upload(&mut self, file: &UploadedFile) -> &Message {
        self.conversation.push_upload(file);
        let reply = self.responder.handle_upload(file);
        self.conversation.push_assistant(reply)
    }

    pub fn suggestions(&self, draft: &str) -> Vec<Suggestion> {
        select_suggestions(self.conversation.messages(), draft)
    }
}
