pub mod error;

pub use error::{EmberError, Result};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Protocol family of a configured backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackendFamily {
    /// Self-hosted local server speaking the Ollama-style `/api/chat` API
    Local,
    /// Hosted generative-language API keyed by `api_key`
    CloudGenerative,
    /// Any server speaking the OpenAI `/v1/chat/completions` API
    OpenaiCompatible,
}

impl BackendFamily {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::CloudGenerative => "cloud-generative",
            Self::OpenaiCompatible => "openai-compatible",
        }
    }
}

/// One configured AI backend
///
/// Created and edited by the configuration layer; the router consumes
/// descriptors read-only and never mutates them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendDescriptor {
    pub id: String,
    pub name: String,
    pub family: BackendFamily,
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
    pub project_id: Option<String>,
    pub model: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl BackendDescriptor {
    pub fn new(name: impl Into<String>, family: BackendFamily) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            family,
            endpoint: None,
            api_key: None,
            project_id: None,
            model: None,
            is_active: false,
            created_at: Utc::now(),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_project_id(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }
}

/// Speaker of a conversation turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

/// One role/content turn of a conversation, ordered oldest first
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub content: String,
}

impl ConversationTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Communication tone for the personality prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Professional,
    Casual,
    Creative,
    Technical,
}

/// Personality configuration rendered into the system instruction
///
/// Owned by the UI layer and passed in on every call, so an edit takes
/// effect on the next request without any cache invalidation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonalitySettings {
    /// Engagement level, 0 (most reserved) to 10 (most enthusiastic)
    pub level: u8,
    pub tone: Tone,
    pub verbose: bool,
    /// Optional free-text instruction appended verbatim
    pub system_prompt: Option<String>,
}

impl Default for PersonalitySettings {
    fn default() -> Self {
        Self {
            level: 7,
            tone: Tone::Creative,
            verbose: true,
            system_prompt: None,
        }
    }
}

/// Normalized, backend-agnostic reply returned to the caller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanonicalResult {
    pub content: String,
    pub model: String,
    pub family: BackendFamily,
    /// Wall-clock milliseconds from the start of the overall routing
    /// attempt, including earlier failed backends.
    pub latency_ms: u64,
}

/// A local AI server found by the discovery scanner
///
/// Transient; the caller decides whether to promote one into a
/// `BackendDescriptor`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveredEndpoint {
    pub name: String,
    pub endpoint: String,
    pub models: Vec<String>,
    pub available: bool,
}
