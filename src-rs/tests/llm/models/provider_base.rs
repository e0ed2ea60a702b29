use crate::llm::models::provider_base::{outcome_from, AdapterError, ProviderOutcome};
use crate::tests::support::{capture_logs, logged_lines};
use log::Level;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_call_is_logged_as_an_error() {
        capture_logs();
        let outcome = outcome_from(
            "failure-label-7f3a",
            Err(AdapterError::Http {
                status: 500,
                body: "boom".to_string(),
            }),
        );
        assert_eq!(outcome.status_tag(), "http_error");

        let lines = logged_lines(Level::Error, "failure-label-7f3a");
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("500"));
    }

    #[test]
    fn successful_call_logs_nothing() {
        capture_logs();
        let outcome = outcome_from("success-label-91c2", Ok("fine".to_string()));
        assert_eq!(outcome.text(), Some("fine"));
        assert!(logged_lines(Level::Error, "success-label-91c2").is_empty());
    }

    #[test]
    fn every_failure_carries_a_label() {
        let failures = [
            ProviderOutcome::HttpError {
                status: 404,
                body: String::new(),
            },
            ProviderOutcome::ParseError {
                message: "x".to_string(),
            },
            ProviderOutcome::TransportError {
                message: "x".to_string(),
            },
            ProviderOutcome::NotConfigured {
                message: "x".to_string(),
            },
            ProviderOutcome::Cancelled,
        ];
        for outcome in &failures {
            assert!(!outcome.is_success());
            assert!(outcome.error_label().is_some(), "{:?}", outcome);
        }
        assert_eq!(ProviderOutcome::Cancelled.status_tag(), "cancelled");
        assert_eq!(ProviderOutcome::Cancelled.error_label().as_deref(), Some("Cancelled"));
    }

    #[test]
    fn missing_key_maps_to_not_configured() {
        let outcome: ProviderOutcome = AdapterError::MissingApiKey("gemini".to_string()).into();
        assert!(matches!(outcome, ProviderOutcome::NotConfigured { ref message } if message.contains("gemini")));
    }
}
