use crate::respond::INTRO;
use crate::types::{Message, Sender};
use crate::upload::UploadedFile;

/// Ordered chat history for one session. Lives in memory only.
#[derive(Debug, Clone)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    /// A conversation opened by the persona welcome message.
    pub fn new() -> Self {
        Self {
            messages: vec![Message::new(Sender::Assistant, INTRO)],
        }
    }

    pub fn empty() -> Self {
        Self {
            messages: Vec::new(),
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Append trimmed user text. Whitespace-only input leaves the history untouched.
    pub fn push_user(&mut self, input: &str) -> Option<&Message> {
        let content = input.trim();
        if content.is_empty() {
            return None;
        }
        Some(self.push(Message::new(Sender::User, content)))
    }

    pub fn push_upload(&mut self, file: &UploadedFile) -> &Message {
        let message = Message::new(Sender::User, format!("I've uploaded {}", file.name))
            .with_attachment(file.attachment());
        self.push(message)
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) -> &Message {
        self.push(Message::new(Sender::Assistant, content))
    }

    pub fn last_from(&self, sender: Sender) -> Option<&Message> {
        self.messages.iter().rev().find(|m| m.sender == sender)
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn user_message_count(&self) -> usize {
        self.messages.iter().filter(|m| m.is_user()).count()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    fn push(&mut self, message: Message) -> &Message {
        self.messages.push(message);
        &self.messages[self.messages.len() - 1]
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AttachmentKind;

    #[test]
    fn new_conversation_opens_with_intro() {
        let conversation = Conversation::new();
        assert_eq!(conversation.len(), 1);
        assert_eq!(conversation.messages()[0].content, INTRO);
        assert_eq!(conversation.user_message_count(), 0);
        assert!(Conversation::empty().is_empty());
    }

    #[test]
    fn push_user_trims_and_skips_blank() {
        let mut conversation = Conversation::empty();
        assert!(conversation.push_user(" \n\t ").is_none());
        assert!(conversation.is_empty());

        let message = conversation.push_user("  hello  ").unwrap();
        assert_eq!(message.content, "hello");
        assert_eq!(conversation.user_message_count(), 1);
    }

    #[test]
    fn upload_message_carries_attachment() {
        let mut conversation = Conversation::empty();
        let file = UploadedFile::new("standup.m4a", "audio/mp4", vec![0; 4]);
        let message = conversation.push_upload(&file);
        assert_eq!(message.content, "I've uploaded standup.m4a");
        let attachment = message.attachment.as_ref().unwrap();
        assert_eq!(attachment.kind, AttachmentKind::Audio);
        assert_eq!(attachment.size_bytes, 4);
    }

    #[test]
    fn last_from_finds_latest_by_sender() {
        let mut conversation = Conversation::new();
        conversation.push_user("first");
        conversation.push_assistant("reply");
        conversation.push_user("second");
        assert_eq!(conversation.last_from(Sender::User).unwrap().content, "second");
        assert_eq!(
            conversation.last_from(Sender::Assistant).unwrap().content,
            "reply"
        );
        assert_eq!(conversation.last().unwrap().content, "second");
    }
}
