use serde::{Deserialize, Serialize};

/// Wire family a provider speaks. Several configured providers may share
/// one kind (all OpenRouter models are `OpenAI`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LLMProvider {
    OpenAI,
    Gemini,
}

impl LLMProvider {
    /// Returns the identifier used in configuration (e.g., "openai", "gemini")
    pub fn provider_name(&self) -> &'static str {
        match self {
            LLMProvider::OpenAI => "openai",
            LLMProvider::Gemini => "gemini",
        }
    }

    /// Helper to parse from a string (handles aliases)
    pub fn from_name(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "openai" | "openrouter" | "openai-compatible" => Some(LLMProvider::OpenAI),
            "gemini" | "google" => Some(LLMProvider::Gemini),
            _ => None,
        }
    }
}

impl std::fmt::Display for LLMProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.provider_name())
    }
}

pub const NO_RESPONSE_PLACEHOLDER: &str = "No response yet";
