use crate::llm::models::provider_handle::{ProviderEntry, ProviderOutcome};

use super::types::PanelEvent;

/// Receives panel updates as they happen. The UI bridge implements this.
pub trait PanelEventSink: Send + Sync {
    fn emit(&self, event: &PanelEvent);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelState {
    pub provider_id: String,
    pub title: String,
    pub model: String,
    /// Generated text of the last resolved call; empty until then or on failure
    pub response: String,
    pub loading: bool,
    pub outcome: Option<ProviderOutcome>,
}

impl PanelState {
    pub fn new(entry: &ProviderEntry) -> Self {
        Self {
            provider_id: entry.id.clone(),
            title: entry.title.clone(),
            model: entry.model().to_string(),
            response: String::new(),
            loading: false,
            outcome: None,
        }
    }

    pub fn resolve(&mut self, outcome: ProviderOutcome) {
        self.response = outcome.text().unwrap_or_default().to_string();
        self.outcome = Some(outcome);
        self.loading = false;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardState {
    pub prompt: String,
    /// Number of submissions started so far; tags every in-flight call
    pub generation: u64,
    pub panels: Vec<PanelState>,
}

impl BoardState {
    pub fn new(providers: &[ProviderEntry]) -> Self {
        Self {
            prompt: String::new(),
            generation: 0,
            panels: providers.iter().map(PanelState::new).collect(),
        }
    }

    /// Opens a new generation and flips every panel to loading.
    pub fn begin_submission(&mut self) -> u64 {
        self.generation += 1;
        for panel in &mut self.panels {
            panel.loading = true;
        }
        self.generation
    }

    /// Applies one provider result. Returns false when the result belongs to
    /// an older generation and was dropped.
    pub fn apply(&mut self, generation: u64, index: usize, outcome: ProviderOutcome) -> bool {
        if generation != self.generation {
            return false;
        }
        match self.panels.get_mut(index) {
            Some(panel) => {
                panel.resolve(outcome);
                true
            }
            None => false,
        }
    }

    /// Resolves every panel still loading for `generation` as cancelled and
    /// returns their indices. Panels of any other generation are left alone.
    pub fn cancel_submission(&mut self, generation: u64) -> Vec<usize> {
        if generation != self.generation {
            return Vec::new();
        }
        let mut cancelled = Vec::new();
        for (index, panel) in self.panels.iter_mut().enumerate() {
            if panel.loading {
                panel.resolve(ProviderOutcome::Cancelled);
                cancelled.push(index);
            }
        }
        cancelled
    }

    pub fn is_idle(&self) -> bool {
        self.panels.iter().all(|p| !p.loading)
    }
}
