//! Adapter for OpenAI-compatible chat, transcription and summary calls.
//!
//! Each operation makes exactly one logical request (plus the transport's
//! single retry). Missing credentials fail before the transport is touched.

mod summary;
mod wire;

use std::time::Duration;

use crate::prompt::{PERSONA_PROMPT, SUMMARY_SYSTEM_PROMPT, build_summary_prompt};
use crate::provider::{Provider, ProviderConfig};
use crate::transport::{AudioRequest, JsonRequest, Transport, UreqTransport};
use crate::types::SummaryResult;
use crate::AssistantError;

const CHAT_PATH: &str = "chat/completions";
const TRANSCRIBE_PATH: &str = "audio/transcriptions";

/// Audio handed to the transcription endpoint.
#[derive(Debug, Clone, Copy)]
pub struct AudioInput<'a> {
    pub file_name: &'a str,
    pub mime: &'a str,
    pub bytes: &'a [u8],
}

pub struct CompletionClient {
    config: Option<ProviderConfig>,
    transport: Box<dyn Transport>,
}

impl CompletionClient {
    pub fn new(config: Option<ProviderConfig>, transport: Box<dyn Transport>) -> Self {
        Self { config, transport }
    }

    /// Client over the blocking `ureq` transport.
    pub fn with_timeout(config: Option<ProviderConfig>, timeout: Duration) -> Self {
        Self::new(config, Box::new(UreqTransport::with_timeout(timeout)))
    }

    pub fn is_configured(&self) -> bool {
        self.config.is_some()
    }

    pub fn provider(&self) -> Option<Provider> {
        self.config.as_ref().map(|config| config.provider)
    }

    /// One chat turn with the persona prompt. Returns the first choice's text.
    pub fn chat(&self, user_message: &str) -> Result<String, AssistantError> {
        let config = self.config()?;
        self.complete(config, PERSONA_PROMPT, user_message)
    }

    /// Transcribe an audio file. The language is fixed by the provider config.
    pub fn transcribe(&self, audio: &AudioInput<'_>) -> Result<String, AssistantError> {
        let config = self.config()?;
        tracing::debug!(
            provider = %config.provider,
            model = %config.transcribe_model,
            bytes = audio.bytes.len(),
            "transcription request"
        );
        let request = AudioRequest {
            url: config.endpoint(TRANSCRIBE_PATH),
            api_key: &config.api_key,
            model: &config.transcribe_model,
            language: &config.language,
            file_name: audio.file_name,
            mime: audio.mime,
            bytes: audio.bytes,
        };
        let body = self.transport.post_audio(&request)?;
        wire::parse_transcription_text(&body)
    }

    /// Structured summary of a transcript. Never returns a partial result.
    pub fn summarize(&self, transcript: &str) -> Result<SummaryResult, AssistantError> {
        let config = self.config()?;
        let content = self.complete(
            config,
            SUMMARY_SYSTEM_PROMPT,
            &build_summary_prompt(transcript),
        )?;
        summary::parse_summary(&content)
    }

    pub fn chat_or_fallback(&self, user_message: &str) -> String {
        self.chat(user_message)
            .unwrap_or_else(|err| fallback("chat", &err))
    }

    pub fn transcribe_or_fallback(&self, audio: &AudioInput<'_>) -> Result<String, String> {
        self.transcribe(audio)
            .map_err(|err| fallback("transcribe", &err))
    }

    pub fn summarize_or_fallback(&self, transcript: &str) -> Result<SummaryResult, String> {
        self.summarize(transcript)
            .map_err(|err| fallback("summarize", &err))
    }

    fn config(&self) -> Result<&ProviderConfig, AssistantError> {
        self.config.as_ref().ok_or_else(|| {
            AssistantError::Configuration("no GEMINI_API_KEY or OPENAI_API_KEY set".into())
        })
    }

    fn complete(
        &self,
        config: &ProviderConfig,
        system: &str,
        user: &str,
    ) -> Result<String, AssistantError> {
        tracing::debug!(
            provider = %config.provider,
            model = %config.chat_model,
            "chat completion request"
        );
        let request = JsonRequest {
            url: config.endpoint(CHAT_PATH),
            api_key: &config.api_key,
            body: wire::chat_body(&config.chat_model, system, user),
        };
        let body = self.transport.post_json(&request)?;
        wire::parse_chat_content(&body)
    }
}

fn fallback(operation: &'static str, err: &AssistantError) -> String {
    tracing::warn!(
        operation,
        kind = ?err.kind(),
        retryable = err.is_retryable(),
        error = %err,
        "assistant call failed"
    );
    err.user_message().to_string()
}
