use std::time::Duration;
use ureq::{Agent, Error as UreqError};

use crate::TransportError;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const TIMEOUT_RESOLVE: Duration = Duration::from_secs(5);
const TIMEOUT_CONNECT: Duration = Duration::from_secs(5);
const TIMEOUT_SEND_REQUEST: Duration = Duration::from_secs(5);

const RETRY_BASE_MS: u64 = 250;

/// Agent with a bounded overall timeout. Per-phase limits never exceed it.
pub fn agent_with_timeout(timeout: Duration) -> Agent {
    let config = Agent::config_builder()
        .timeout_global(Some(timeout))
        .timeout_resolve(Some(TIMEOUT_RESOLVE.min(timeout)))
        .timeout_connect(Some(TIMEOUT_CONNECT.min(timeout)))
        .timeout_send_request(Some(TIMEOUT_SEND_REQUEST.min(timeout)))
        .build();
    config.into()
}

pub fn default_agent() -> Agent {
    agent_with_timeout(DEFAULT_TIMEOUT)
}

pub fn should_retry(err: &UreqError) -> bool {
    match err {
        UreqError::StatusCode(code) => *code == 429 || (500..=599).contains(code),
        UreqError::Timeout(_)
        | UreqError::Io(_)
        | UreqError::HostNotFound
        | UreqError::ConnectionFailed => true,
        _ => false,
    }
}

pub fn retry_delay(attempt: usize) -> Duration {
    let shift = attempt.min(4) as u32;
    let delay = RETRY_BASE_MS.saturating_mul(1_u64 << shift);
    Duration::from_millis(delay)
}

pub fn transport_error(err: UreqError) -> TransportError {
    match err {
        UreqError::StatusCode(code) => TransportError::Status(code),
        UreqError::Timeout(_) => TransportError::Timeout,
        other => TransportError::Network(other.to_string()),
    }
}
