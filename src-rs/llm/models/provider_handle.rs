use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;

use crate::config::{AppConfig, ProviderConfig};
use crate::cons::provider_cons::LLMProvider;
use crate::llm::utils::network::build_http_client;

use super::gemini::GeminiClient;
use super::openai::OpenAiClient;
pub use super::provider_base::{ProviderClient, ProviderOutcome};

pub enum AnyProviderClient {
    Gemini(GeminiClient),
    OpenAI(OpenAiClient),
}

impl ProviderClient for AnyProviderClient {
    async fn complete(&self, prompt: &str) -> ProviderOutcome {
        match self {
            AnyProviderClient::Gemini(c) => c.complete(prompt).await,
            AnyProviderClient::OpenAI(c) => c.complete(prompt).await,
        }
    }

    fn model(&self) -> &str {
        match self {
            AnyProviderClient::Gemini(c) => c.model(),
            AnyProviderClient::OpenAI(c) => c.model(),
        }
    }
}

pub fn create_client(config: &ProviderConfig, http_client: reqwest::Client) -> Result<AnyProviderClient> {
    let api_key = config.resolve_api_key();
    if api_key.is_none() {
        log::warn!(
            "No API key for provider {} (env {:?}); its panel will report not configured",
            config.id,
            config.api_key_env
        );
    }

    let client = match config.provider_kind()? {
        LLMProvider::Gemini => AnyProviderClient::Gemini(
            GeminiClient::new(config.base_url.clone(), api_key, config.model.clone(), http_client)
                .with_sampling(config.temperature, config.max_tokens),
        ),
        LLMProvider::OpenAI => AnyProviderClient::OpenAI(
            OpenAiClient::new(config.base_url.clone(), api_key, config.model.clone(), http_client)
                .with_sampling(config.temperature, config.max_tokens),
        ),
    };
    Ok(client)
}

/// One registered provider: what the panel shows plus the client behind it.
#[derive(Clone)]
pub struct ProviderEntry {
    pub id: String,
    pub title: String,
    pub client: Arc<AnyProviderClient>,
}

impl ProviderEntry {
    pub fn model(&self) -> &str {
        self.client.model()
    }
}

/// Builds the registry in configuration order. All clients share one
/// connection pool.
pub fn build_registry(config: &AppConfig) -> Result<Vec<ProviderEntry>> {
    let http_client = build_http_client(Duration::from_secs(config.request_timeout_secs))
        .context("Failed to build HTTP client")?;

    config
        .providers
        .iter()
        .map(|p| {
            let client = create_client(p, http_client.clone())
                .with_context(|| format!("Failed to create client for {}", p.id))?;
            Ok(ProviderEntry {
                id: p.id.clone(),
                title: p.display_title().to_string(),
                client: Arc::new(client),
            })
        })
        .collect()
}
