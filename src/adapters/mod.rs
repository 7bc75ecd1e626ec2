//! Backend family adapters
//!
//! One module per protocol family. Each adapter validates the fields its
//! family requires (failing with `Misconfigured` before any network
//! call), builds the outgoing payload with the personality prompt as the
//! system instruction, performs the HTTP request under the fixed per-call
//! deadline, and runs the body through the response normalizer.

pub mod gemini;
pub mod local;
pub mod openai;

use std::time::Duration;

use serde_json::Value;
use tracing::debug;

use crate::services::personality::build_personality_prompt;
use crate::types::{
    BackendDescriptor, BackendFamily, ConversationTurn, EmberError, PersonalitySettings, Result,
};

/// Per-call deadline for chat requests.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Deadline for best-effort connection tests.
const TEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Dispatch one request to the descriptor's family adapter.
///
/// Returns the normalized content string; the router owns latency
/// accounting and result assembly.
pub async fn attempt_request(
    descriptor: &BackendDescriptor,
    personality: &PersonalitySettings,
    conversation: &[ConversationTurn],
) -> Result<String> {
    let system_prompt = build_personality_prompt(personality);

    match descriptor.family {
        BackendFamily::Local => local::send_chat(descriptor, &system_prompt, conversation).await,
        BackendFamily::CloudGenerative => {
            gemini::send_chat(descriptor, &system_prompt, personality, conversation).await
        }
        BackendFamily::OpenaiCompatible => {
            openai::send_chat(descriptor, &system_prompt, personality, conversation).await
        }
    }
}

/// Best-effort reachability check for a configured descriptor.
///
/// Never errors: missing fields or any network failure yield `false`.
pub async fn test_connection(descriptor: &BackendDescriptor) -> bool {
    let client = match reqwest::Client::builder().timeout(TEST_TIMEOUT).build() {
        Ok(c) => c,
        Err(_) => return false,
    };

    let request = match descriptor.family {
        BackendFamily::Local => {
            let Some(endpoint) = descriptor.endpoint.as_deref() else {
                return false;
            };
            client.get(format!("{}/api/tags", endpoint.trim_end_matches('/')))
        }
        BackendFamily::CloudGenerative => {
            let Some(api_key) = descriptor.api_key.as_deref() else {
                return false;
            };
            client.get(format!("{}/v1/models?key={}", gemini::BASE_URL, api_key))
        }
        BackendFamily::OpenaiCompatible => {
            let Some(api_key) = descriptor.api_key.as_deref() else {
                return false;
            };
            client
                .get(format!("{}/v1/models", openai::BASE_URL))
                .bearer_auth(api_key)
        }
    };

    match request.send().await {
        Ok(resp) => resp.status().is_success(),
        Err(e) => {
            debug!("Connection test failed for {}: {}", descriptor.name, e);
            false
        }
    }
}

/// POST a JSON payload and parse the reply body.
///
/// Maps transport failures onto the error taxonomy: deadline overrun is
/// `Timeout`, other send errors are `Network`, a non-2xx status is
/// `Http` with status and body, and an unparseable body is `Parse`.
pub(crate) async fn post_json(
    url: &str,
    bearer_token: Option<&str>,
    payload: &Value,
) -> Result<Value> {
    let client = reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(|e| EmberError::Network(format!("HTTP client error: {}", e)))?;

    let mut request = client.post(url).json(payload);
    if let Some(token) = bearer_token {
        request = request.bearer_auth(token);
    }

    let response = request.send().await.map_err(|e| {
        if e.is_timeout() {
            EmberError::Timeout(format!("no response within {:?}", REQUEST_TIMEOUT))
        } else {
            EmberError::Network(e.to_string())
        }
    })?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(EmberError::Http(format!("HTTP {}: {}", status, body)));
    }

    response
        .json::<Value>()
        .await
        .map_err(|e| EmberError::Parse(e.to_string()))
}
