//! OpenAI-compatible adapter (`/v1/chat/completions`)

use serde_json::{json, Value};
use tracing::debug;

use crate::services::normalize;
use crate::types::{
    BackendDescriptor, BackendFamily, ConversationTurn, EmberError, PersonalitySettings, Result,
};

pub(crate) const BASE_URL: &str = "https://api.openai.com";

const MAX_TOKENS: u32 = 1024;

/// Send one chat request to an OpenAI-compatible API.
pub async fn send_chat(
    descriptor: &BackendDescriptor,
    system_prompt: &str,
    personality: &PersonalitySettings,
    conversation: &[ConversationTurn],
) -> Result<String> {
    let (api_key, model) = validate(descriptor)?;

    let url = format!("{}/v1/chat/completions", BASE_URL);
    let temperature = f64::from(personality.level) / 10.0;
    let payload = build_payload(model, system_prompt, temperature, conversation);

    debug!("OpenAI-compatible request (model {})", model);
    let body = super::post_json(&url, Some(api_key), &payload).await?;

    normalize::extract_content(BackendFamily::OpenaiCompatible, &body)
}

/// The openai-compatible family requires an API key and a model name.
fn validate(descriptor: &BackendDescriptor) -> Result<(&str, &str)> {
    let api_key = descriptor
        .api_key
        .as_deref()
        .filter(|k| !k.is_empty())
        .ok_or_else(|| {
            EmberError::Misconfigured("OpenAI API key not configured".to_string())
        })?;

    let model = descriptor
        .model
        .as_deref()
        .filter(|m| !m.is_empty())
        .ok_or_else(|| {
            EmberError::Misconfigured("OpenAI model not configured".to_string())
        })?;

    Ok((api_key, model))
}

fn build_payload(
    model: &str,
    system_prompt: &str,
    temperature: f64,
    conversation: &[ConversationTurn],
) -> Value {
    let mut messages = vec![json!({"role": "system", "content": system_prompt})];
    messages.extend(
        conversation
            .iter()
            .map(|turn| json!({"role": turn.role.as_str(), "content": turn.content})),
    );

    json!({
        "model": model,
        "messages": messages,
        "temperature": temperature,
        "max_tokens": MAX_TOKENS
    })
}
