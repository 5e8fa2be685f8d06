use chrono::{DateTime, Utc};
use content_config::IngestConfig;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RunState {
    Stopped,
    Running,
    Paused,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct IngestStats {
    pub start_time: Option<DateTime<Utc>>,
    pub total_fetched: u64,
    pub items_added: u64,
    pub duplicates_skipped: u64,
    pub errors: u64,
    pub cycles_completed: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DaemonStatus {
    pub state: RunState,
    pub stats: IngestStats,
    pub config: IngestConfig,
}
