use serde_json::{json, Value};

use crate::llm::models::provider_base::{outcome_from, AdapterError, ProviderClient, ProviderOutcome};
use crate::llm::utils::network::{send_json_request, text_at};

#[derive(Debug, Clone)]
pub struct OpenAiClient {
    pub api_base: String,
    pub api_key: Option<String>,
    pub model: String,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    http_client: reqwest::Client,
}

impl OpenAiClient {
    pub fn new(
        api_base: String,
        api_key: Option<String>,
        model: String,
        http_client: reqwest::Client,
    ) -> Self {
        Self {
            api_base,
            api_key,
            model,
            temperature: None,
            max_tokens: None,
            http_client,
        }
    }

    pub fn with_sampling(mut self, temperature: Option<f32>, max_tokens: Option<u32>) -> Self {
        self.temperature = temperature;
        self.max_tokens = max_tokens;
        self
    }

    pub async fn chat(&self, prompt: &str) -> Result<String, AdapterError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| AdapterError::MissingApiKey(self.model.clone()))?;

        let request_body =
            build_chat_completions_request_body(&self.model, prompt, self.temperature, self.max_tokens);
        let url = chat_completions_url(&self.api_base);

        let request = self
            .http_client
            .post(&url)
            .header("Authorization", format!("Bearer {}", api_key))
            .json(&request_body);

        let json = send_json_request(request).await?;
        extract_message_content(&json)
    }
}

impl ProviderClient for OpenAiClient {
    async fn complete(&self, prompt: &str) -> ProviderOutcome {
        let label = format!("OpenAI-compatible ({})", self.model);
        outcome_from(&label, self.chat(prompt).await)
    }

    fn model(&self) -> &str {
        &self.model
    }
}

pub(crate) fn build_chat_completions_request_body(
    model: &str,
    prompt: &str,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
) -> Value {
    let mut request_body = json!({
        "model": model,
        "messages": [
            { "role": "user", "content": prompt }
        ],
    });
    if let Some(t) = temperature {
        request_body["temperature"] = json!(t);
    }
    if let Some(n) = max_tokens {
        request_body["max_tokens"] = json!(n);
    }
    request_body
}

pub(crate) fn chat_completions_url(api_base: &str) -> String {
    format!("{}/chat/completions", api_base.trim_end_matches('/'))
}

pub(crate) fn extract_message_content(json: &Value) -> Result<String, AdapterError> {
    text_at(json, "/choices/0/message/content", "choices[0].message.content")
}
