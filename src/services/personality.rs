//! Personality prompt builder
//!
//! Renders the structured personality settings into the natural-language
//! system instruction sent as the preamble of every outgoing
//! conversation. Pure function of its input: no I/O, no randomness.

use crate::types::{PersonalitySettings, Tone};

/// Qualitative descriptors indexed by engagement level 0..=10.
const LEVEL_DESCRIPTORS: [&str; 11] = [
    "extremely cautious and reserved",
    "very reserved",
    "reserved",
    "somewhat reserved",
    "neutral",
    "balanced",
    "somewhat engaging",
    "very engaging and friendly",
    "extremely engaging and enthusiastic",
    "maximally engaging and enthusiastic",
    "wildly enthusiastic and energetic",
];

/// Fallback for levels outside the table.
const BALANCED: &str = "balanced";

fn tone_descriptor(tone: Tone) -> &'static str {
    match tone {
        Tone::Professional => "Use professional terminology and formal language",
        Tone::Casual => "Use casual, friendly language like talking to a friend",
        Tone::Creative => "Be creative, imaginative, and think outside the box",
        Tone::Technical => "Be precise, technical, and include implementation details",
    }
}

/// Build the system instruction block from the current personality.
pub fn build_personality_prompt(settings: &PersonalitySettings) -> String {
    let level_desc = LEVEL_DESCRIPTORS
        .get(settings.level as usize)
        .copied()
        .unwrap_or(BALANCED);

    let verbosity = if settings.verbose {
        "Provide detailed, comprehensive answers"
    } else {
        "Be concise and to the point"
    };

    let mut prompt = format!(
        "You are Ember, an AI assistant with the following personality:\n\
         - Overall engagement level: {}\n\
         - Communication style: {}\n\
         - Verbosity: {}\n",
        level_desc,
        tone_descriptor(settings.tone),
        verbosity
    );

    if let Some(extra) = settings.system_prompt.as_deref() {
        if !extra.is_empty() {
            prompt.push_str(&format!("- Additional instructions: {}\n", extra));
        }
    }

    prompt.push_str("\nMaintain this personality consistently in all responses.");
    prompt
}
