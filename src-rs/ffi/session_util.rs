use napi::bindgen_prelude::*;
use napi::threadsafe_function::{ErrorStrategy, ThreadsafeFunction, ThreadsafeFunctionCallMode};
use std::sync::Arc;

use crate::config::AppConfig;
use crate::session::{
    generate_board_id, Orchestrator, PanelEvent, PanelEventSink, PanelView, SubmitOutcome,
    BOARD_MANAGER, PANEL_EVENT_PROTOCOL_VERSION,
};

#[napi_derive::napi(object)]
#[derive(Clone)]
pub struct CorePanel {
    #[napi(js_name = "providerId")]
    pub provider_id: String,
    pub title: String,
    pub model: String,
    #[napi(js_name = "isLoading")]
    pub is_loading: bool,
    pub content: String,
    pub status: String,
    pub error: Option<String>,
}

impl From<&PanelView> for CorePanel {
    fn from(v: &PanelView) -> Self {
        Self {
            provider_id: v.provider_id.clone(),
            title: v.title.clone(),
            model: v.model.clone(),
            is_loading: v.loading,
            content: v.body.clone(),
            status: v.status.clone(),
            error: v.error.clone(),
        }
    }
}

#[napi_derive::napi(object)]
#[derive(Clone)]
pub struct CorePanelEvent {
    #[napi(js_name = "protocolVersion")]
    pub protocol_version: u16,
    #[napi(js_name = "boardId")]
    pub board_id: String,
    pub generation: i64,
    #[napi(js_name = "tsMs")]
    pub ts_ms: i64,
    pub kind: String,
    pub panel: CorePanel,
}

impl From<&PanelEvent> for CorePanelEvent {
    fn from(e: &PanelEvent) -> Self {
        Self {
            protocol_version: PANEL_EVENT_PROTOCOL_VERSION,
            board_id: e.board_id.clone(),
            generation: e.generation as i64,
            ts_ms: e.ts_ms,
            kind: e.kind.as_str().to_string(),
            panel: CorePanel::from(&e.panel),
        }
    }
}

#[napi_derive::napi(object)]
pub struct CoreSubmitResult {
    pub status: String,
    pub generation: Option<i64>,
    pub succeeded: u32,
    pub failed: u32,
}

impl From<SubmitOutcome> for CoreSubmitResult {
    fn from(o: SubmitOutcome) -> Self {
        let status = o.status().to_string();
        match o {
            SubmitOutcome::Ignored => Self {
                status,
                generation: None,
                succeeded: 0,
                failed: 0,
            },
            SubmitOutcome::Completed {
                generation,
                succeeded,
                failed,
            } => Self {
                status,
                generation: Some(generation as i64),
                succeeded: succeeded as u32,
                failed: failed as u32,
            },
            SubmitOutcome::Superseded { generation } => Self {
                status,
                generation: Some(generation as i64),
                succeeded: 0,
                failed: 0,
            },
        }
    }
}

#[napi_derive::napi(object)]
pub struct CoreProviderInfo {
    pub id: String,
    pub title: String,
    pub kind: String,
    pub model: String,
    #[napi(js_name = "hasApiKey")]
    pub has_api_key: bool,
}

pub(crate) struct JsPanelEventSink {
    pub handler: ThreadsafeFunction<CorePanelEvent, ErrorStrategy::CalleeHandled>,
}

impl PanelEventSink for JsPanelEventSink {
    fn emit(&self, event: &PanelEvent) {
        let status = self
            .handler
            .call(Ok(CorePanelEvent::from(event)), ThreadsafeFunctionCallMode::NonBlocking);
        if status != Status::Ok {
            log::warn!(
                "[{}] failed to deliver panel event for {}: {:?}",
                event.board_id,
                event.panel.provider_id,
                status
            );
        }
    }
}

pub(crate) fn open_board(board_id: Option<String>) -> Result<Arc<Orchestrator>> {
    crate::init_logger();
    let board_id = board_id
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
        .unwrap_or_else(generate_board_id);

    let mut manager = BOARD_MANAGER
        .lock()
        .map_err(|_| Error::from_reason("Failed to lock board manager"))?;
    manager
        .get_or_create(&board_id, |id| {
            let config = AppConfig::load()?;
            log::info!("[{}] opening board with {} providers", id, config.providers.len());
            Orchestrator::from_config(id, &config)
        })
        .map_err(|e| Error::from_reason(format!("Failed to open board: {:#}", e)))
}

pub(crate) fn close_board(board_id: &str) {
    if let Ok(mut manager) = BOARD_MANAGER.lock() {
        if let Some(board) = manager.remove(board_id) {
            board.clear_event_sink();
            board.cancel();
            log::info!("[{}] board closed", board_id);
        }
    }
}

pub(crate) fn list_providers() -> Result<Vec<CoreProviderInfo>> {
    crate::init_logger();
    let config = AppConfig::load()
        .map_err(|e| Error::from_reason(format!("Failed to load config: {}", e)))?;
    Ok(config
        .providers
        .iter()
        .map(|p| CoreProviderInfo {
            id: p.id.clone(),
            title: p.display_title().to_string(),
            kind: p.kind.clone(),
            model: p.model.clone(),
            has_api_key: p.resolve_api_key().is_some(),
        })
        .collect())
}
