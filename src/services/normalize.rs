//! Response normalizer
//!
//! Each backend family replies with its own JSON shape, and the local
//! family alone has several incompatible variants in the wild (Ollama
//! native, bare `response`, OpenAI-style choices). The normalizer maps
//! any of them to a single content string so the router never branches
//! on a specific server implementation.

use serde_json::Value;

use crate::types::{BackendFamily, EmberError, Result};

/// Candidate extraction paths per family, tried in order. Expressed as
/// JSON pointers; the first path resolving to a non-empty string wins.
fn content_paths(family: BackendFamily) -> &'static [&'static str] {
    match family {
        BackendFamily::Local => &[
            "/message/content",
            "/response",
            "/choices/0/message/content",
        ],
        BackendFamily::CloudGenerative => &["/candidates/0/content/parts/0/text"],
        BackendFamily::OpenaiCompatible => &["/choices/0/message/content"],
    }
}

/// Extract the generated text from a raw parsed response body.
///
/// Fails with `EmptyContent` when no known path for the family yields a
/// non-empty string; an empty answer is a backend failure, not a success.
pub fn extract_content(family: BackendFamily, body: &Value) -> Result<String> {
    for path in content_paths(family) {
        if let Some(text) = body.pointer(path).and_then(Value::as_str) {
            if !text.is_empty() {
                return Ok(text.to_string());
            }
        }
    }

    Err(EmberError::EmptyContent(format!(
        "no text found in {} response",
        family.as_str()
    )))
}
