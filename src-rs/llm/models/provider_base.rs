/// Failure raised while talking to one provider.
#[derive(Debug, thiserror::Error)]
pub enum AdapterError {
    #[error("HTTP error! Status: {status}")]
    Http { status: u16, body: String },

    #[error("Unexpected response: {0}")]
    Parse(String),

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid request URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("No API key configured for {0}")]
    MissingApiKey(String),
}

/// Resolved result of one provider call as the board stores it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderOutcome {
    Success { text: String },
    HttpError { status: u16, body: String },
    ParseError { message: String },
    TransportError { message: String },
    NotConfigured { message: String },
    /// The submission was cancelled before this provider answered
    Cancelled,
}

impl ProviderOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ProviderOutcome::Success { .. })
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            ProviderOutcome::Success { text } => Some(text.as_str()),
            _ => None,
        }
    }

    pub fn status_tag(&self) -> &'static str {
        match self {
            ProviderOutcome::Success { .. } => "success",
            ProviderOutcome::HttpError { .. } => "http_error",
            ProviderOutcome::ParseError { .. } => "parse_error",
            ProviderOutcome::TransportError { .. } => "transport_error",
            ProviderOutcome::NotConfigured { .. } => "not_configured",
            ProviderOutcome::Cancelled => "cancelled",
        }
    }

    /// Short label for a failed call, `None` on success.
    pub fn error_label(&self) -> Option<String> {
        match self {
            ProviderOutcome::Success { .. } => None,
            ProviderOutcome::HttpError { status, .. } => Some(format!("HTTP {}", status)),
            ProviderOutcome::ParseError { .. } => Some("Unexpected response".to_string()),
            ProviderOutcome::TransportError { .. } => Some("Network error".to_string()),
            ProviderOutcome::NotConfigured { .. } => Some("Not configured".to_string()),
            ProviderOutcome::Cancelled => Some("Cancelled".to_string()),
        }
    }
}

impl From<AdapterError> for ProviderOutcome {
    fn from(e: AdapterError) -> Self {
        match e {
            AdapterError::Http { status, body } => ProviderOutcome::HttpError { status, body },
            AdapterError::Parse(message) => ProviderOutcome::ParseError { message },
            AdapterError::Transport(err) => ProviderOutcome::TransportError {
                message: err.to_string(),
            },
            err @ (AdapterError::InvalidUrl(_) | AdapterError::MissingApiKey(_)) => {
                ProviderOutcome::NotConfigured {
                    message: err.to_string(),
                }
            }
        }
    }
}

/// Logs a failed call and folds it into an outcome. Callers never see the error.
pub(crate) fn outcome_from(label: &str, result: Result<String, AdapterError>) -> ProviderOutcome {
    match result {
        Ok(text) => ProviderOutcome::Success { text },
        Err(e) => {
            log::error!("{} request failed: {}", label, e);
            e.into()
        }
    }
}

#[allow(async_fn_in_trait)]
pub trait ProviderClient: Send + Sync {
    /// Sends `prompt` as a single user turn and returns the generated text.
    async fn complete(&self, prompt: &str) -> ProviderOutcome;

    fn model(&self) -> &str;
}
