//! Cloud generative-language adapter
//!
//! Speaks the `generateContent` API: conversation turns become
//! `contents` entries with `user`/`model` roles, and the personality
//! prompt travels as `systemInstruction` rather than a message turn.

use serde_json::{json, Value};
use tracing::debug;

use crate::services::normalize;
use crate::types::{
    BackendDescriptor, BackendFamily, ConversationTurn, EmberError, PersonalitySettings, Result,
    Role,
};

pub(crate) const BASE_URL: &str = "https://generativelanguage.googleapis.com";

const MAX_OUTPUT_TOKENS: u32 = 1024;

/// Send one chat request to the hosted generative-language API.
pub async fn send_chat(
    descriptor: &BackendDescriptor,
    system_prompt: &str,
    personality: &PersonalitySettings,
    conversation: &[ConversationTurn],
) -> Result<String> {
    let (api_key, model) = validate(descriptor)?;

    let url = format!(
        "{}/v1beta/models/{}:generateContent?key={}",
        BASE_URL, model, api_key
    );
    let payload = build_payload(system_prompt, temperature(personality), conversation);

    debug!("Cloud generative request (model {})", model);
    let body = super::post_json(&url, None, &payload).await?;

    normalize::extract_content(BackendFamily::CloudGenerative, &body)
}

/// The cloud-generative family requires an API key, a project id and a
/// model name. The project id is never sent on the wire but the
/// configuration contract still demands it.
fn validate(descriptor: &BackendDescriptor) -> Result<(&str, &str)> {
    let api_key = require(descriptor.api_key.as_deref(), "API key")?;
    require(descriptor.project_id.as_deref(), "project id")?;
    let model = require(descriptor.model.as_deref(), "model")?;
    Ok((api_key, model))
}

fn require<'a>(field: Option<&'a str>, what: &str) -> Result<&'a str> {
    field.filter(|v| !v.is_empty()).ok_or_else(|| {
        EmberError::Misconfigured(format!("cloud generative {} not configured", what))
    })
}

fn temperature(personality: &PersonalitySettings) -> f64 {
    f64::from(personality.level) / 10.0
}

fn build_payload(system_prompt: &str, temperature: f64, conversation: &[ConversationTurn]) -> Value {
    let contents: Vec<Value> = conversation
        .iter()
        .map(|turn| {
            let role = match turn.role {
                Role::User => "user",
                Role::Assistant => "model",
            };
            json!({"role": role, "parts": [{"text": turn.content}]})
        })
        .collect();

    json!({
        "contents": contents,
        "systemInstruction": {"parts": [{"text": system_prompt}]},
        "generationConfig": {
            "temperature": temperature,
            "maxOutputTokens": MAX_OUTPUT_TOKENS
        }
    })
}
