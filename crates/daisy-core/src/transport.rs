use std::thread;
use std::time::Duration;

use serde_json::Value;
use ureq::Agent;
use ureq::http::Response;
use ureq::unversioned::multipart::{Form, Part};

use crate::TransportError;
use crate::http::{agent_with_timeout, default_agent, retry_delay, should_retry, transport_error};

const MAX_RETRIES: usize = 1;

/// A JSON POST with bearer auth.
#[derive(Debug, Clone)]
pub struct JsonRequest<'a> {
    pub url: String,
    pub api_key: &'a str,
    pub body: Value,
}

/// A multipart audio upload with bearer auth.
#[derive(Debug, Clone)]
pub struct AudioRequest<'a> {
    pub url: String,
    pub api_key: &'a str,
    pub model: &'a str,
    pub language: &'a str,
    pub file_name: &'a str,
    pub mime: &'a str,
    pub bytes: &'a [u8],
}

/// Outbound HTTP seam for the completion adapter. Both calls return the raw
/// response body on a 2xx status.
pub trait Transport: Send {
    fn post_json(&self, request: &JsonRequest<'_>) -> Result<String, TransportError>;
    fn post_audio(&self, request: &AudioRequest<'_>) -> Result<String, TransportError>;
}

/// Blocking transport over a shared `ureq` agent with one retry on transient errors.
pub struct UreqTransport {
    agent: Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        Self {
            agent: default_agent(),
        }
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            agent: agent_with_timeout(timeout),
        }
    }

    fn send_with_retry<F>(&self, url: &str, mut send: F) -> Result<String, TransportError>
    where
        F: FnMut(&Agent) -> Result<Response<ureq::Body>, ureq::Error>,
    {
        let mut attempt = 0;
        loop {
            match send(&self.agent) {
                Ok(response) => {
                    return response
                        .into_body()
                        .read_to_string()
                        .map_err(|e| TransportError::Body(e.to_string()));
                }
                Err(err) => {
                    if should_retry(&err) && attempt < MAX_RETRIES {
                        tracing::warn!(url, attempt, error = %err, "retrying request");
                        thread::sleep(retry_delay(attempt));
                        attempt += 1;
                        continue;
                    }
                    return Err(transport_error(err));
                }
            }
        }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn post_json(&self, request: &JsonRequest<'_>) -> Result<String, TransportError> {
        let auth = format!("Bearer {}", request.api_key);
        self.send_with_retry(&request.url, |agent| {
            agent
                .post(&request.url)
                .header("Authorization", &auth)
                .send_json(&request.body)
        })
    }

    fn post_audio(&self, request: &AudioRequest<'_>) -> Result<String, TransportError> {
        let auth = format!("Bearer {}", request.api_key);
        self.send_with_retry(&request.url, |agent| {
            let part = Part::bytes(request.bytes)
                .file_name(request.file_name)
                .mime_str(request.mime)?;
            let form = Form::new()
                .text("model", request.model)
                .text("language", request.language)
                .part("file", part);
            agent
                .post(&request.url)
                .header("Authorization", &auth)
                .send(form)
        })
    }
}
