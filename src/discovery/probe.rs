//! Endpoint probe
//!
//! One bounded-time reachability and capability check against a single
//! host:port candidate. Every failure mode (refused, timeout, non-2xx,
//! malformed JSON) is a silent "not found" by design; discovery must
//! never surface an error for a server that simply is not there.

use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use super::signatures::{EndpointSignature, UNKNOWN_MODELS_PLACEHOLDER};
use crate::types::DiscoveredEndpoint;

/// Probe one candidate base URL for the given signature.
///
/// Returns `None` unless the signature path answered with a success
/// status. Availability and model enumeration are independent: an OK
/// answer with no extractable models still yields a hit carrying the
/// placeholder entry.
pub async fn probe(
    client: &Client,
    base_url: &str,
    signature: &EndpointSignature,
) -> Option<DiscoveredEndpoint> {
    let url = format!("{}{}", base_url, signature.path);

    let response = match client.get(&url).send().await {
        Ok(resp) => resp,
        Err(e) => {
            debug!("Probe {} unreachable: {}", url, e);
            return None;
        }
    };

    if !response.status().is_success() {
        debug!("Probe {} answered {}", url, response.status());
        return None;
    }

    let models = match response.json::<Value>().await {
        Ok(body) => extract_models(&body, signature.model_path),
        Err(_) => Vec::new(),
    };

    let models = if models.is_empty() {
        vec![UNKNOWN_MODELS_PLACEHOLDER.to_string()]
    } else {
        models
    };

    Some(DiscoveredEndpoint {
        name: signature.name.to_string(),
        endpoint: base_url.to_string(),
        models,
        available: true,
    })
}

/// Walk a dotted path into the reply body and collect model names.
///
/// A missing step anywhere along the path is not an error, just an empty
/// list. Array elements become names by: string used directly, object
/// `name` field, object `id` field, otherwise dropped.
pub fn extract_models(body: &Value, model_path: Option<&str>) -> Vec<String> {
    let Some(path) = model_path else {
        return Vec::new();
    };

    let mut current = body;
    for key in path.split('.') {
        match current.get(key) {
            Some(next) => current = next,
            None => return Vec::new(),
        }
    }

    let Some(items) = current.as_array() else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| {
            if let Some(s) = item.as_str() {
                Some(s.to_string())
            } else if let Some(name) = item.get("name").and_then(Value::as_str) {
                Some(name.to_string())
            } else if let Some(id) = item.get("id").and_then(Value::as_str) {
                Some(id.to_string())
            } else {
                None
            }
        })
        .collect()
}
