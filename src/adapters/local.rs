//! Local server adapter (Ollama-style `/api/chat`)

use serde_json::{json, Value};
use tracing::debug;

use crate::services::normalize;
use crate::types::{
    BackendDescriptor, BackendFamily, ConversationTurn, EmberError, Result,
};

/// Send one chat request to a self-hosted local server.
pub async fn send_chat(
    descriptor: &BackendDescriptor,
    system_prompt: &str,
    conversation: &[ConversationTurn],
) -> Result<String> {
    let (endpoint, model) = validate(descriptor)?;

    let url = format!("{}/api/chat", endpoint.trim_end_matches('/'));
    let payload = build_payload(model, system_prompt, conversation);

    debug!("Local chat request to {} (model {})", url, model);
    let body = super::post_json(&url, None, &payload).await?;

    normalize::extract_content(BackendFamily::Local, &body)
}

/// The local family requires an endpoint URL and a model name.
fn validate(descriptor: &BackendDescriptor) -> Result<(&str, &str)> {
    let endpoint = descriptor
        .endpoint
        .as_deref()
        .filter(|e| !e.is_empty())
        .ok_or_else(|| {
            EmberError::Misconfigured("local backend endpoint not configured".to_string())
        })?;

    url::Url::parse(endpoint).map_err(|e| {
        EmberError::Misconfigured(format!("invalid local endpoint URL: {}", e))
    })?;

    let model = descriptor
        .model
        .as_deref()
        .filter(|m| !m.is_empty())
        .ok_or_else(|| {
            EmberError::Misconfigured("local backend model not configured".to_string())
        })?;

    Ok((endpoint, model))
}

fn build_payload(model: &str, system_prompt: &str, conversation: &[ConversationTurn]) -> Value {
    let mut messages = vec![json!({"role": "system", "content": system_prompt})];
    messages.extend(
        conversation
            .iter()
            .map(|turn| json!({"role": turn.role.as_str(), "content": turn.content})),
    );

    json!({
        "model": model,
        "messages": messages,
        "stream": false
    })
}
