use crate::llm::models::openai::{
    build_chat_completions_request_body, chat_completions_url, extract_message_content, OpenAiClient,
};
use crate::llm::models::provider_base::{AdapterError, ProviderClient, ProviderOutcome};
use crate::tests::support::{capture_logs, logged_lines, openai_body, TEST_KEY};
use log::Level;
use mockito::Matcher;
use serde_json::json;

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str, key: Option<&str>) -> OpenAiClient {
        OpenAiClient::new(
            base.to_string(),
            key.map(str::to_string),
            "qwen/qwen-2-7b-instruct:free".to_string(),
            reqwest::Client::new(),
        )
    }

    #[test]
    fn request_body_is_a_single_user_message() {
        let body = build_chat_completions_request_body("m", "hello there", None, None);
        assert_eq!(
            body,
            json!({ "model": "m", "messages": [{ "role": "user", "content": "hello there" }] })
        );
    }

    #[test]
    fn request_body_carries_optional_sampling_params() {
        let body = build_chat_completions_request_body("m", "p", Some(0.5), Some(256));
        assert_eq!(body["temperature"], json!(0.5));
        assert_eq!(body["max_tokens"], json!(256));
    }

    #[test]
    fn url_tolerates_trailing_slash() {
        assert_eq!(
            chat_completions_url("https://openrouter.ai/api/v1/"),
            "https://openrouter.ai/api/v1/chat/completions"
        );
    }

    #[test]
    fn extract_reports_missing_path() {
        let err = extract_message_content(&json!({ "choices": [] })).expect_err("should fail");
        assert!(matches!(err, AdapterError::Parse(ref m) if m.contains("choices[0].message.content")));
    }

    #[tokio::test]
    async fn complete_returns_message_content() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .match_header("authorization", format!("Bearer {}", TEST_KEY).as_str())
            .match_header("content-type", "application/json")
            .match_body(Matcher::PartialJson(json!({
                "model": "qwen/qwen-2-7b-instruct:free",
                "messages": [{ "role": "user", "content": "say hello" }]
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(openai_body("hello"))
            .create_async()
            .await;

        let outcome = client(&server.url(), Some(TEST_KEY)).complete("say hello").await;
        assert_eq!(outcome, ProviderOutcome::Success { text: "hello".to_string() });
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn complete_maps_http_500_to_http_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/chat/completions")
            .with_status(500)
            .with_body("upstream exploded")
            .create_async()
            .await;

        let outcome = client(&server.url(), Some(TEST_KEY)).complete("hi").await;
        assert_eq!(
            outcome,
            ProviderOutcome::HttpError {
                status: 500,
                body: "upstream exploded".to_string()
            }
        );
        assert_eq!(outcome.error_label().as_deref(), Some("HTTP 500"));
    }

    #[tokio::test]
    async fn http_500_is_logged_with_the_model() {
        capture_logs();
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/chat/completions")
            .with_status(500)
            .with_body("{}")
            .create_async()
            .await;

        let client = OpenAiClient::new(
            server.url(),
            Some(TEST_KEY.to_string()),
            "model-for-500-log".to_string(),
            reqwest::Client::new(),
        );
        let outcome = client.complete("hi").await;
        assert_eq!(outcome.status_tag(), "http_error");

        let lines = logged_lines(Level::Error, "model-for-500-log");
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("500"));
    }

    #[tokio::test]
    async fn complete_maps_non_json_body_to_parse_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_body("<html>oops</html>")
            .create_async()
            .await;

        let outcome = client(&server.url(), Some(TEST_KEY)).complete("hi").await;
        assert!(matches!(outcome, ProviderOutcome::ParseError { .. }));
    }

    #[tokio::test]
    async fn complete_without_key_sends_nothing() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .expect(0)
            .create_async()
            .await;

        let outcome = client(&server.url(), None).complete("hi").await;
        assert!(matches!(outcome, ProviderOutcome::NotConfigured { .. }));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn complete_maps_connection_failure_to_transport_error() {
        // Nothing listens on port 9 of the loopback interface
        let outcome = client("http://127.0.0.1:9", Some(TEST_KEY)).complete("hi").await;
        assert!(matches!(outcome, ProviderOutcome::TransportError { .. }));
    }
}
