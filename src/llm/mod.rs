// OpenAI API access
// Used by the check-key command to validate a credential upstream

mod client;
mod types;

pub use client::{KeyCheckReport, OpenAiClient};
pub use types::{ChatMessage, ChatRequest, ChatResponse};
