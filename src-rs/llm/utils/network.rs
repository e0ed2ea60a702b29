use serde_json::Value;
use std::time::Duration;

use crate::llm::models::provider_base::AdapterError;

pub fn build_http_client(timeout: Duration) -> Result<reqwest::Client, AdapterError> {
    let client = reqwest::Client::builder().timeout(timeout).build()?;
    Ok(client)
}

/// Sends `request` and decodes a 2xx body as JSON.
pub async fn send_json_request(request: reqwest::RequestBuilder) -> Result<Value, AdapterError> {
    let response = request.send().await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(AdapterError::Http {
            status: status.as_u16(),
            body,
        });
    }

    let text = response.text().await?;
    serde_json::from_str(&text)
        .map_err(|e| AdapterError::Parse(format!("response body is not JSON: {}", e)))
}

/// Reads a string at a JSON pointer, naming `path` in the error.
pub fn text_at(json: &Value, pointer: &str, path: &str) -> Result<String, AdapterError> {
    json.pointer(pointer)
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .ok_or_else(|| AdapterError::Parse(format!("missing {}", path)))
}
