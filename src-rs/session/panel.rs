use crate::cons::provider_cons::NO_RESPONSE_PLACEHOLDER;

use super::state::PanelState;

/// What one panel shows. Holds no state of its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelView {
    pub provider_id: String,
    pub title: String,
    pub model: String,
    /// Spinner flag; `body` is empty while set
    pub loading: bool,
    pub body: String,
    pub status: String,
    pub error: Option<String>,
}

pub fn render_panel(state: &PanelState) -> PanelView {
    let status = if state.loading {
        "loading"
    } else {
        state.outcome.as_ref().map(|o| o.status_tag()).unwrap_or("idle")
    };

    let body = if state.loading {
        String::new()
    } else if state.response.is_empty() {
        NO_RESPONSE_PLACEHOLDER.to_string()
    } else {
        state.response.clone()
    };

    let error = if state.loading {
        None
    } else {
        state.outcome.as_ref().and_then(|o| o.error_label())
    };

    PanelView {
        provider_id: state.provider_id.clone(),
        title: state.title.clone(),
        model: state.model.clone(),
        loading: state.loading,
        body,
        status: status.to_string(),
        error,
    }
}
