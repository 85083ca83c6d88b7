//! Tracker core: pure popup state machine and view-model helpers.
mod effect;
mod msg;
mod sheet;
mod state;
mod update;
mod view_model;

pub use effect::{AppendFields, Effect};
pub use msg::Msg;
pub use sheet::parse_spreadsheet_id;
pub use state::{JobDetails, PopupState, StatusTone, STATUS_AUTO_DISMISS};
pub use update::update;
pub use view_model::{PopupView, Section, StatusView, NOT_FOUND};
