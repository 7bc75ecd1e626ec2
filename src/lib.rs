//! ember.chat - AI backend routing and discovery engine
//!
//! The engine behind a desktop chat front-end that talks to
//! interchangeable AI text-generation backends: self-hosted local
//! servers, a hosted generative-language API, and OpenAI-compatible
//! APIs.
//!
//! ## Module Organization
//!
//! - `types/`: Data structures and the unified error type
//! - `services/`: Business logic (router, personality prompt builder,
//!   response normalizer)
//! - `adapters/`: Per-family HTTP request procedures
//! - `discovery/`: Local endpoint scanning and probing
//!
//! The UI and storage layers are external: they own the descriptor list
//! and personality settings and pass them in on every call, so
//! configuration edits apply to the very next request. This crate never
//! mutates a descriptor and never persists anything.

pub mod adapters;
pub mod discovery;
pub mod services;
pub mod types;

pub use adapters::test_connection;
pub use discovery::scan_for_local_backends;
pub use services::{build_personality_prompt, send_message};
pub use types::{
    BackendDescriptor, BackendFamily, CanonicalResult, ConversationTurn, DiscoveredEndpoint,
    EmberError, PersonalitySettings, Role, Tone,
};
