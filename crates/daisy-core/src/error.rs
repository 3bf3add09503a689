use thiserror::Error;

const CONFIGURATION_MESSAGE: &str = "I'm not connected to an assistant service yet. \
Ask whoever runs Daisy to set GEMINI_API_KEY or OPENAI_API_KEY and restart it.";
const UPSTREAM_MESSAGE: &str = "I'm having trouble reaching the assistant service right now. \
Please try again in a moment.";
const MALFORMED_MESSAGE: &str = "The assistant's answer came back in a form I couldn't use. \
Try again with a shorter or simpler transcript.";

/// Errors from the network transport underneath the completion adapter.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("http status {0}")]
    Status(u16),

    #[error("request timed out")]
    Timeout,

    #[error("network error: {0}")]
    Network(String),

    #[error("response body error: {0}")]
    Body(String),
}

/// Errors from the external completion adapter.
#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("assistant not configured: {0}")]
    Configuration(String),

    #[error("upstream request failed: {0}")]
    Upstream(String),

    #[error("malformed upstream response: {0}")]
    MalformedResponse(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Upstream,
    MalformedResponse,
}

impl AssistantError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Configuration(_) => ErrorKind::Configuration,
            Self::Upstream(_) => ErrorKind::Upstream,
            Self::MalformedResponse(_) => ErrorKind::MalformedResponse,
        }
    }

    /// Fixed text that is safe to show in the chat. Never includes provider output.
    pub fn user_message(&self) -> &'static str {
        match self.kind() {
            ErrorKind::Configuration => CONFIGURATION_MESSAGE,
            ErrorKind::Upstream => UPSTREAM_MESSAGE,
            ErrorKind::MalformedResponse => MALFORMED_MESSAGE,
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Upstream(_))
    }
}

impl From<TransportError> for AssistantError {
    fn from(err: TransportError) -> Self {
        Self::Upstream(err.to_string())
    }
}
