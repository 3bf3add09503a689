use serde::Deserialize;
use serde_json::{Value, json};

use crate::AssistantError;

pub(crate) const TEMPERATURE: f64 = 0.3;

pub(crate) fn chat_body(model: &str, system: &str, user: &str) -> Value {
    json!({
        "model": model,
        "messages": [
            {"role": "system", "content": system},
            {"role": "user", "content": user},
        ],
        "temperature": TEMPERATURE,
    })
}

/// Text of the first choice. An envelope that does not parse is malformed;
/// an envelope with no usable content is an upstream failure.
pub(crate) fn parse_chat_content(body: &str) -> Result<String, AssistantError> {
    let response: ChatCompletionResponse = serde_json::from_str(body.trim())
        .map_err(|e| AssistantError::MalformedResponse(e.to_string()))?;
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| AssistantError::Upstream("no choices in completion".into()))?;
    choice
        .message
        .and_then(|message| message.content)
        .filter(|content| !content.trim().is_empty())
        .ok_or_else(|| AssistantError::Upstream("completion had no content".into()))
}

pub(crate) fn parse_transcription_text(body: &str) -> Result<String, AssistantError> {
    let response: TranscriptionResponse = serde_json::from_str(body.trim())
        .map_err(|e| AssistantError::MalformedResponse(e.to_string()))?;
    let text = response.text.trim();
    if text.is_empty() {
        return Err(AssistantError::Upstream("transcription was empty".into()));
    }
    Ok(text.to_string())
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: Option<ChatMessage>,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct TranscriptionResponse {
    text: String,
}
