use serde_json::{json, Value};
use url::Url;

use crate::llm::models::provider_base::{outcome_from, AdapterError, ProviderClient, ProviderOutcome};
use crate::llm::utils::network::{send_json_request, text_at};

#[derive(Debug, Clone)]
pub struct GeminiClient {
    pub base_url: String,
    pub api_key: Option<String>,
    pub model_name: String,
    pub temperature: Option<f32>,
    pub max_output_tokens: Option<u32>,
    http_client: reqwest::Client,
}

impl GeminiClient {
    pub fn new(
        base_url: String,
        api_key: Option<String>,
        model_name: String,
        http_client: reqwest::Client,
    ) -> Self {
        Self {
            base_url,
            api_key,
            model_name,
            temperature: None,
            max_output_tokens: None,
            http_client,
        }
    }

    pub fn with_sampling(mut self, temperature: Option<f32>, max_output_tokens: Option<u32>) -> Self {
        self.temperature = temperature;
        self.max_output_tokens = max_output_tokens;
        self
    }

    pub async fn generate(&self, prompt: &str) -> Result<String, AdapterError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| AdapterError::MissingApiKey(self.model_name.clone()))?;

        let url = generate_content_url(&self.base_url, &self.model_name, api_key)?;
        let request_body =
            build_generate_content_body(prompt, self.temperature, self.max_output_tokens);

        let request = self.http_client.post(url).json(&request_body);

        let json = send_json_request(request).await?;
        extract_candidate_text(&json)
    }
}

impl ProviderClient for GeminiClient {
    async fn complete(&self, prompt: &str) -> ProviderOutcome {
        let label = format!("Gemini ({})", self.model_name);
        outcome_from(&label, self.generate(prompt).await)
    }

    fn model(&self) -> &str {
        &self.model_name
    }
}

/// The key travels in the query string; no auth header is sent.
pub(crate) fn generate_content_url(base_url: &str, model: &str, api_key: &str) -> Result<Url, AdapterError> {
    let mut url = Url::parse(&format!(
        "{}/models/{}:generateContent",
        base_url.trim_end_matches('/'),
        model
    ))?;
    url.query_pairs_mut().append_pair("key", api_key);
    Ok(url)
}

pub(crate) fn build_generate_content_body(
    prompt: &str,
    temperature: Option<f32>,
    max_output_tokens: Option<u32>,
) -> Value {
    let mut request_body = json!({
        "contents": [
            { "parts": [{ "text": prompt }] }
        ]
    });

    let mut generation_config = serde_json::Map::new();
    if let Some(t) = temperature {
        generation_config.insert("temperature".to_string(), json!(t));
    }
    if let Some(n) = max_output_tokens {
        generation_config.insert("maxOutputTokens".to_string(), json!(n));
    }
    if !generation_config.is_empty() {
        request_body["generationConfig"] = Value::Object(generation_config);
    }
    request_body
}

pub(crate) fn extract_candidate_text(json: &Value) -> Result<String, AdapterError> {
    text_at(
        json,
        "/candidates/0/content/parts/0/text",
        "candidates[0].content.parts[0].text",
    )
}
