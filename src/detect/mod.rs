//! Prompt detection over the raw session output.

mod classify;
mod detector;

pub use classify::{classify, PromptEvent, PromptKind, PROMPT_TERMINATOR};
pub use detector::PromptDetector;
