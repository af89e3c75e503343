use chrono::{DateTime, FixedOffset};
use metrics_exporter_prometheus::PrometheusHandle;
use side_quest::workflows::side_quest::SideQuestHunt;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) hunt: Arc<SideQuestHunt>,
    pub(crate) output_dir: Arc<PathBuf>,
}

pub(crate) fn parse_instant(raw: &str) -> Result<DateTime<FixedOffset>, String> {
    DateTime::parse_from_rfc3339(raw.trim())
        .map_err(|err| format!("failed to parse '{raw}' as an RFC 3339 timestamp ({err})"))
}
