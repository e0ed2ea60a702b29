use super::panel::PanelView;

pub const PANEL_EVENT_PROTOCOL_VERSION: u16 = 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanelEventKind {
    Loading,
    Resolved,
}

impl PanelEventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PanelEventKind::Loading => "loading",
            PanelEventKind::Resolved => "resolved",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PanelEvent {
    pub board_id: String,
    pub generation: u64,
    pub ts_ms: i64,
    pub kind: PanelEventKind,
    pub panel: PanelView,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Prompt was blank; nothing changed
    Ignored,
    Completed {
        generation: u64,
        succeeded: usize,
        failed: usize,
    },
    /// A newer submission cancelled this one before every provider answered
    Superseded { generation: u64 },
}

impl SubmitOutcome {
    pub fn status(&self) -> &'static str {
        match self {
            SubmitOutcome::Ignored => "ignored",
            SubmitOutcome::Completed { .. } => "completed",
            SubmitOutcome::Superseded { .. } => "superseded",
        }
    }
}
