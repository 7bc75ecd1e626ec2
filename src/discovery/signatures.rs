//! Known local AI server signatures
//!
//! Each entry describes where a product listens, which path answers a
//! model-list request, and where in that reply the model array lives.

/// One well-known local AI server product.
#[derive(Debug, Clone, Copy)]
pub struct EndpointSignature {
    pub name: &'static str,
    pub port: u16,
    pub path: &'static str,
    /// Dotted path to the model array in the reply body; `None` when the
    /// product exposes no list.
    pub model_path: Option<&'static str>,
}

/// Signature table; the scan report preserves this order.
pub const SIGNATURES: [EndpointSignature; 6] = [
    EndpointSignature {
        name: "Ollama",
        port: 11434,
        path: "/api/tags",
        model_path: Some("models"),
    },
    EndpointSignature {
        name: "LM Studio",
        port: 1234,
        path: "/v1/models",
        model_path: Some("data.data"),
    },
    EndpointSignature {
        name: "llama.cpp",
        port: 8000,
        path: "/v1/models",
        model_path: Some("data"),
    },
    EndpointSignature {
        name: "Oobabooga",
        port: 5000,
        path: "/api/v1/model",
        model_path: None,
    },
    EndpointSignature {
        name: "vLLM",
        port: 8000,
        path: "/v1/models",
        model_path: Some("data"),
    },
    EndpointSignature {
        name: "LocalAI",
        port: 8080,
        path: "/v1/models",
        model_path: Some("data"),
    },
];

/// Local hostname aliases, tried in order; the loopback literal wins
/// when both answer.
pub const LOCAL_HOSTS: [&str; 2] = ["127.0.0.1", "localhost"];

/// Sentinel model entry for an endpoint that answered but whose model
/// list could not be determined.
pub const UNKNOWN_MODELS_PLACEHOLDER: &str = "(detected but models unknown)";
