use serde::{Deserialize, Serialize};

use super::Turn;

pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 100;
pub const DEFAULT_PERSONA: &str = "You are a chatbot for the startup software tech company \
Headstarter. Use a friendly, supportive, and encouraging tone. Ensure explanations are clear \
and easy to understand";

/// Settings every model session starts with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationConfig {
    persona: String,
    max_output_tokens: u32,
}

impl GenerationConfig {
    pub fn new(persona: impl Into<String>, max_output_tokens: u32) -> Self {
        Self {
            persona: persona.into(),
            max_output_tokens,
        }
    }

    pub fn persona(&self) -> &str {
        &self.persona
    }

    pub fn max_output_tokens(&self) -> u32 {
        self.max_output_tokens
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::new(DEFAULT_PERSONA, DEFAULT_MAX_OUTPUT_TOKENS)
    }
}

/// A single-request model session: generation settings plus the history the
/// provider replays before the new message.
#[derive(Debug, Clone)]
pub struct ChatSession {
    config: GenerationConfig,
    history: Vec<Turn>,
}

impl ChatSession {
    pub fn new(config: GenerationConfig) -> Self {
        Self {
            config,
            history: Vec::new(),
        }
    }

    pub fn with_history(mut self, history: impl Into<Vec<Turn>>) -> Self {
        self.history = history.into();
        self
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    pub fn history(&self) -> &[Turn] {
        &self.history
    }
}
