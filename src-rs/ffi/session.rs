use napi::bindgen_prelude::*;
use napi::threadsafe_function::{ErrorStrategy, ThreadsafeFunction};
use napi::JsFunction;
use napi_derive::napi;

use crate::session::{generate_board_id, Orchestrator};
use std::sync::Arc;

use super::session_util::{self, CorePanel, CorePanelEvent, CoreProviderInfo, CoreSubmitResult, JsPanelEventSink};

#[napi]
pub fn create_board_id() -> String {
    generate_board_id()
}

#[napi]
pub fn list_providers() -> Result<Vec<CoreProviderInfo>> {
    session_util::list_providers()
}

#[napi]
pub struct MultiChat {
    inner: Arc<Orchestrator>,
    board_id: String,
}

#[napi]
impl MultiChat {
    #[napi(factory)]
    pub fn open(board_id: Option<String>) -> Result<Self> {
        let inner = session_util::open_board(board_id)?;
        let board_id = inner.board_id().to_string();
        Ok(Self { inner, board_id })
    }

    #[napi(getter)]
    pub fn id(&self) -> String {
        self.board_id.clone()
    }

    #[napi]
    pub fn set_prompt(&self, prompt: String) {
        self.inner.set_prompt(prompt);
    }

    #[napi]
    pub fn get_prompt(&self) -> String {
        self.inner.prompt()
    }

    #[napi]
    pub async fn submit(&self) -> Result<CoreSubmitResult> {
        let outcome = self.inner.submit().await;
        Ok(CoreSubmitResult::from(outcome))
    }

    #[napi]
    pub fn get_panels(&self) -> Vec<CorePanel> {
        self.inner.panels().iter().map(CorePanel::from).collect()
    }

    #[napi]
    pub fn subscribe(&self, on_event: JsFunction) -> Result<()> {
        let tsfn: ThreadsafeFunction<CorePanelEvent, ErrorStrategy::CalleeHandled> =
            on_event.create_threadsafe_function(0, |ctx| Ok(vec![ctx.value]))?;

        self.inner.set_event_sink(Arc::new(JsPanelEventSink { handler: tsfn }));
        Ok(())
    }

    #[napi]
    pub fn unsubscribe(&self) {
        self.inner.clear_event_sink();
    }

    #[napi]
    pub fn close(&self) {
        session_util::close_board(&self.board_id);
    }
}
