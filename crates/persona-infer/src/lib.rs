//! Persona inference through an LLM chat-completion service

mod backend;
mod error;
mod fallback;
mod groq;
mod infer;
mod parse;
mod prompt;

pub use backend::{ChatBackend, ChatMessage, ChatRequest, Completion};
pub use error::InferenceError;
pub use fallback::{fallback_persona, GENERIC_SUBREDDITS};
pub use groq::GroqClient;
pub use infer::{infer_persona, InferenceOutcome};
pub use parse::{parse_persona_response, strip_code_fence, PersonaDraft};
pub use prompt::{build_persona_prompt, persona_request, SYSTEM_PROMPT};
