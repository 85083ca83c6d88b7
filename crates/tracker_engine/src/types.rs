use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Capture-time source, injectable so tests are deterministic.
pub type Clock = Arc<dyn Fn() -> String + Send + Sync>;

/// Normalized fields for one job posting. Produced fresh per extraction and
/// immutable afterwards; every field may be empty when no selector matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRecord {
    pub company: String,
    pub role: String,
    pub application_link: String,
    pub timestamp: String,
}
