use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracker_engine::AtomicFileWriter;
use tracker_logging::{tracker_error, tracker_warn};

const STATE_FILENAME: &str = ".tracker_state.ron";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct PersistedState {
    sheet_id: Option<String>,
}

/// Loads the connected spreadsheet id. Missing or unreadable state reads as
/// "not connected".
pub(crate) fn load_sheet_id(state_dir: &Path) -> Option<String> {
    let path = state_dir.join(STATE_FILENAME);
    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return None,
        Err(err) => {
            tracker_warn!("Failed to read persisted state from {:?}: {}", path, err);
            return None;
        }
    };

    match ron::from_str::<PersistedState>(&content) {
        Ok(state) => state.sheet_id,
        Err(err) => {
            tracker_warn!("Failed to parse persisted state from {:?}: {}", path, err);
            None
        }
    }
}

pub(crate) fn save_sheet_id(state_dir: &Path, sheet_id: &str) {
    let state = PersistedState {
        sheet_id: Some(sheet_id.to_string()),
    };

    let pretty = ron::ser::PrettyConfig::new();
    let content = match ron::ser::to_string_pretty(&state, pretty) {
        Ok(text) => text,
        Err(err) => {
            tracker_error!("Failed to serialize persisted state: {}", err);
            return;
        }
    };

    let writer = AtomicFileWriter::new(state_dir.to_path_buf());
    if let Err(err) = writer.write(STATE_FILENAME, &content) {
        tracker_error!("Failed to write persisted state to {:?}: {}", state_dir, err);
    }
}

pub(crate) fn clear_sheet_id(state_dir: &Path) {
    let path = state_dir.join(STATE_FILENAME);
    if let Err(err) = fs::remove_file(&path) {
        if err.kind() != std::io::ErrorKind::NotFound {
            tracker_warn!("Failed to clear persisted state at {:?}: {}", path, err);
        }
    }
}
