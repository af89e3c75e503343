use super::pipeline::{HuntStats, SideQuestReport};
use super::projector::{ReportRow, SLOT_FORMAT};
use super::render::layout::COLUMNS;
use serde::Serialize;

pub const GENERATED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Serialize)]
pub struct PreviewRow {
    pub room: String,
    pub condition: String,
    pub status: String,
    pub occupied: &'static str,
    pub maintenance: String,
    pub maintenance_slot_until: String,
    pub maintenance_description: String,
    pub side_quest_material: bool,
}

impl From<&ReportRow> for PreviewRow {
    fn from(row: &ReportRow) -> Self {
        Self {
            room: row.room.clone(),
            condition: row.condition.clone(),
            status: row.status.clone(),
            occupied: row.occupancy.label(),
            maintenance: row.maintenance.clone(),
            maintenance_slot_until: row.slot_until.format(SLOT_FORMAT).to_string(),
            maintenance_description: row.maintenance_description.clone(),
            side_quest_material: row.side_quest,
        }
    }
}

/// Serializable on-screen rendition of a hunt.
#[derive(Debug, Clone, Serialize)]
pub struct HuntPreview {
    pub generated_at: String,
    pub timezone: &'static str,
    pub columns: Vec<&'static str>,
    pub rows: Vec<PreviewRow>,
    pub stats: HuntStats,
}

impl HuntPreview {
    pub fn from_report(report: &SideQuestReport) -> Self {
        Self {
            generated_at: report.generated_at.format(GENERATED_AT_FORMAT).to_string(),
            timezone: report.generated_at.timezone().name(),
            columns: COLUMNS.iter().map(|column| column.header).collect(),
            rows: report.rows.iter().map(PreviewRow::from).collect(),
            stats: report.stats,
        }
    }
}
