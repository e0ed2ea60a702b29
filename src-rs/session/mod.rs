pub mod id;
pub mod manager;
pub mod orchestrator;
pub mod panel;
pub mod state;
pub mod types;

pub use id::{generate_board_id, generate_request_id};
pub use manager::{BoardManager, BOARD_MANAGER};
pub use orchestrator::Orchestrator;
pub use panel::{render_panel, PanelView};
pub use state::{BoardState, PanelEventSink, PanelState};
pub use types::{PanelEvent, PanelEventKind, SubmitOutcome, PANEL_EVENT_PROTOCOL_VERSION};
