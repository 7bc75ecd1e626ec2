//! Business logic (UI-agnostic)

pub mod normalize;
pub mod personality;
pub mod router;

pub use personality::build_personality_prompt;
pub use router::send_message;
