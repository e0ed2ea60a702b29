use anyhow::Result;
use futures::future::{AbortHandle, Abortable};
use futures::stream::{FuturesUnordered, StreamExt};
use std::sync::{Arc, Mutex as StdMutex, MutexGuard, PoisonError};

use crate::config::AppConfig;
use crate::llm::models::provider_handle::{build_registry, ProviderClient, ProviderEntry, ProviderOutcome};

use super::id::{generate_request_id, now_ms};
use super::panel::{render_panel, PanelView};
use super::state::{BoardState, PanelEventSink};
use super::types::{PanelEvent, PanelEventKind, SubmitOutcome};

/// One board: the prompt, one panel per registered provider, and the fan-out
/// that fills them.
pub struct Orchestrator {
    board_id: String,
    providers: Vec<ProviderEntry>,
    state: StdMutex<BoardState>,
    event_sink: StdMutex<Option<Arc<dyn PanelEventSink>>>,
    in_flight: StdMutex<Option<(u64, AbortHandle)>>,
}

impl Orchestrator {
    pub fn new(board_id: String, providers: Vec<ProviderEntry>) -> Self {
        let state = BoardState::new(&providers);
        Self {
            board_id,
            providers,
            state: StdMutex::new(state),
            event_sink: StdMutex::new(None),
            in_flight: StdMutex::new(None),
        }
    }

    pub fn from_config(board_id: String, config: &AppConfig) -> Result<Self> {
        let providers = build_registry(config)?;
        Ok(Self::new(board_id, providers))
    }

    pub fn board_id(&self) -> &str {
        &self.board_id
    }

    fn lock_state(&self) -> MutexGuard<'_, BoardState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Always taken while holding the `state` lock, never the other way round.
    fn lock_in_flight(&self) -> MutexGuard<'_, Option<(u64, AbortHandle)>> {
        self.in_flight.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_prompt(&self, prompt: String) {
        self.lock_state().prompt = prompt;
    }

    pub fn prompt(&self) -> String {
        self.lock_state().prompt.clone()
    }

    pub fn snapshot(&self) -> BoardState {
        self.lock_state().clone()
    }

    pub fn panels(&self) -> Vec<PanelView> {
        self.lock_state().panels.iter().map(render_panel).collect()
    }

    pub fn set_event_sink(&self, sink: Arc<dyn PanelEventSink>) {
        if let Ok(mut guard) = self.event_sink.lock() {
            *guard = Some(sink);
        }
    }

    pub fn clear_event_sink(&self) {
        if let Ok(mut guard) = self.event_sink.lock() {
            *guard = None;
        }
    }

    fn emit(&self, generation: u64, kind: PanelEventKind, panel: PanelView) {
        let sink = match self.event_sink.lock() {
            Ok(guard) => guard.clone(),
            Err(_) => None,
        };
        if let Some(sink) = sink {
            sink.emit(&PanelEvent {
                board_id: self.board_id.clone(),
                generation,
                ts_ms: now_ms(),
                kind,
                panel,
            });
        }
    }

    /// Cancels the in-flight fan-out, if any. Panels still waiting on it
    /// resolve as cancelled.
    pub fn cancel(&self) {
        let (generation, handle, cancelled) = {
            let mut state = self.lock_state();
            let Some((generation, handle)) = self.lock_in_flight().take() else {
                return;
            };
            let panels: Vec<PanelView> = state
                .cancel_submission(generation)
                .into_iter()
                .filter_map(|index| state.panels.get(index).map(render_panel))
                .collect();
            (generation, handle, panels)
        };

        log::info!(
            "[{}] cancelling submission #{} ({} panels left waiting)",
            self.board_id,
            generation,
            cancelled.len()
        );
        handle.abort();
        for panel in cancelled {
            self.emit(generation, PanelEventKind::Resolved, panel);
        }
    }

    /// Submits the stored prompt to every provider at once and resolves when
    /// all of them have answered or a newer submission took over.
    pub async fn submit(&self) -> SubmitOutcome {
        let (abort_handle, abort_registration) = AbortHandle::new_pair();

        // The generation bump and the handle swap happen under one lock so a
        // racing submit can never abort a newer one.
        let (prompt, generation, loading_panels, previous) = {
            let mut state = self.lock_state();
            if state.prompt.trim().is_empty() {
                log::debug!("[{}] ignoring blank prompt", self.board_id);
                return SubmitOutcome::Ignored;
            }
            let generation = state.begin_submission();
            let panels: Vec<PanelView> = state.panels.iter().map(render_panel).collect();
            let previous = self.lock_in_flight().replace((generation, abort_handle));
            (state.prompt.clone(), generation, panels, previous)
        };

        if let Some((prev_generation, prev_handle)) = previous {
            log::info!(
                "[{}] submission #{} supersedes #{}",
                self.board_id,
                generation,
                prev_generation
            );
            prev_handle.abort();
        }

        for panel in loading_panels {
            self.emit(generation, PanelEventKind::Loading, panel);
        }

        let request_id = generate_request_id();
        log::info!(
            "[{}] {} submission #{} to {} providers ({} chars)",
            self.board_id,
            request_id,
            generation,
            self.providers.len(),
            prompt.chars().count()
        );

        let result = Abortable::new(self.fan_out(generation, &prompt), abort_registration).await;

        {
            let mut guard = self.lock_in_flight();
            if guard.as_ref().is_some_and(|(g, _)| *g == generation) {
                *guard = None;
            }
        }

        match result {
            Ok((succeeded, failed)) => {
                log::info!(
                    "[{}] {} submission #{} finished: {} ok, {} failed",
                    self.board_id,
                    request_id,
                    generation,
                    succeeded,
                    failed
                );
                SubmitOutcome::Completed {
                    generation,
                    succeeded,
                    failed,
                }
            }
            Err(_) => SubmitOutcome::Superseded { generation },
        }
    }

    async fn fan_out(&self, generation: u64, prompt: &str) -> (usize, usize) {
        let mut pending: FuturesUnordered<_> = self
            .providers
            .iter()
            .enumerate()
            .map(|(index, entry)| async move { (index, entry.client.complete(prompt).await) })
            .collect();

        let mut succeeded = 0usize;
        let mut failed = 0usize;
        while let Some((index, outcome)) = pending.next().await {
            if outcome.is_success() {
                succeeded += 1;
            } else {
                failed += 1;
            }
            if let Some(panel) = self.apply_result(generation, index, outcome) {
                self.emit(generation, PanelEventKind::Resolved, panel);
            }
        }
        (succeeded, failed)
    }

    fn apply_result(&self, generation: u64, index: usize, outcome: ProviderOutcome) -> Option<PanelView> {
        let mut state = self.lock_state();
        if !state.apply(generation, index, outcome) {
            log::debug!(
                "[{}] dropped stale result for panel {} from submission #{}",
                self.board_id,
                index,
                generation
            );
            return None;
        }
        state.panels.get(index).map(render_panel)
    }
}

impl Drop for Orchestrator {
    fn drop(&mut self) {
        self.cancel();
    }
}
