use super::classifier::MaintenancePlan;
use super::eligibility::is_eligible;
use super::normalizer::normalize_description;
use super::projector::{sort_by_side_quest, ProjectedRow, ReportRow};
use super::pruner::SlotWindow;
use super::render::{self, RenderError, RenderedReport};
use super::scorer::KeywordSet;
use super::views::HuntPreview;
use super::{SideQuestError, ValidationError};
use crate::config::ReportConfig;
use crate::workflows::housekeeping::{HousekeepingLoader, LoadedRecords, RoomRecord};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::Serialize;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

/// Counts gathered along one run, reported alongside the rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HuntStats {
    pub loaded: usize,
    pub skipped_rows: usize,
    pub eligible: usize,
    pub planned: usize,
    pub side_quests: usize,
    pub elapsed_slots: usize,
    pub missing_slots: usize,
    pub unparsable_slots: usize,
    pub reported: usize,
}

/// The finished hunt: rows in report order plus the instant they were
/// judged against.
#[derive(Debug, Clone)]
pub struct SideQuestReport {
    pub generated_at: DateTime<Tz>,
    pub rows: Vec<ReportRow>,
    pub stats: HuntStats,
}

impl SideQuestReport {
    pub fn render(&self) -> Result<RenderedReport, RenderError> {
        render::render_report(self)
    }

    pub fn preview(&self) -> HuntPreview {
        HuntPreview::from_report(self)
    }
}

/// Configured pipeline. Every run takes its "now" from the caller so the
/// slot cut-off and the document header always agree.
#[derive(Debug, Clone)]
pub struct SideQuestHunt {
    keywords: KeywordSet,
    timezone: Tz,
}

impl SideQuestHunt {
    pub fn new(keywords: KeywordSet, timezone: Tz) -> Self {
        Self { keywords, timezone }
    }

    pub fn from_config(config: &ReportConfig) -> Self {
        Self::new(config.keywords.clone(), config.timezone)
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    pub fn keywords(&self) -> &KeywordSet {
        &self.keywords
    }

    /// Reads the wall clock in the report zone. Call once per run.
    pub fn now(&self) -> DateTime<Tz> {
        Utc::now().with_timezone(&self.timezone)
    }

    pub fn run_path<P: AsRef<Path>>(
        &self,
        path: P,
        now: DateTime<Tz>,
    ) -> Result<SideQuestReport, SideQuestError> {
        let loaded = HousekeepingLoader::from_path(path)?;
        Ok(self.run(loaded, now)?)
    }

    pub fn run_reader<R: Read>(
        &self,
        reader: R,
        now: DateTime<Tz>,
    ) -> Result<SideQuestReport, SideQuestError> {
        let loaded = HousekeepingLoader::from_reader(reader)?;
        Ok(self.run(loaded, now)?)
    }

    /// Filter, classify, normalize, score, project, prune, relabel.
    pub fn run(
        &self,
        loaded: LoadedRecords,
        now: DateTime<Tz>,
    ) -> Result<SideQuestReport, ValidationError> {
        let LoadedRecords { records, skipped } = loaded;
        let mut stats = HuntStats {
            loaded: records.len(),
            skipped_rows: skipped,
            ..HuntStats::default()
        };

        let mut projected = Vec::new();
        for record in records.into_iter().filter(is_eligible) {
            stats.eligible += 1;
            match self.score(record) {
                Some(row) => projected.push(row),
                None => stats.planned += 1,
            }
        }
        stats.side_quests = projected.iter().filter(|row| row.side_quest).count();

        sort_by_side_quest(&mut projected);

        let mut open = Vec::with_capacity(projected.len());
        for row in projected {
            match SlotWindow::evaluate(row.maintenance_to.as_deref(), self.timezone, &now) {
                SlotWindow::Open(until) => open.push((row, until)),
                SlotWindow::Elapsed(_) => stats.elapsed_slots += 1,
                SlotWindow::Missing => {
                    debug!(room = %row.name, "excluding room without a maintenance slot");
                    stats.missing_slots += 1;
                }
                SlotWindow::Unparsable => {
                    warn!(
                        room = %row.name,
                        value = row.maintenance_to.as_deref().unwrap_or_default(),
                        "excluding room with unreadable maintenance slot"
                    );
                    stats.unparsable_slots += 1;
                }
            }
        }

        let rows = open
            .into_iter()
            .map(|(row, until)| row.into_report_row(until))
            .collect::<Result<Vec<_>, _>>()?;
        stats.reported = rows.len();

        info!(
            loaded = stats.loaded,
            skipped = stats.skipped_rows,
            eligible = stats.eligible,
            planned = stats.planned,
            elapsed = stats.elapsed_slots,
            missing = stats.missing_slots,
            unparsable = stats.unparsable_slots,
            reported = stats.reported,
            "side quest hunt complete"
        );

        Ok(SideQuestReport {
            generated_at: now,
            rows,
            stats,
        })
    }

    /// `None` for planned jobs; otherwise the projected row with its
    /// side quest flag.
    fn score(&self, record: RoomRecord) -> Option<ProjectedRow> {
        let description = record.maintenance_description.as_deref().unwrap_or_default();
        if !MaintenancePlan::classify(description).is_unplanned() {
            return None;
        }

        let normalized = normalize_description(description);
        let side_quest = self.keywords.matches(&normalized);

        Some(ProjectedRow {
            name: record.name,
            condition: record.condition,
            status: record.status,
            occupied: record.occupied,
            maintenance: record.maintenance,
            maintenance_to: record.maintenance_to,
            maintenance_description: normalized,
            side_quest,
        })
    }
}

impl Default for SideQuestHunt {
    fn default() -> Self {
        Self::new(KeywordSet::standard(), chrono_tz::Europe::London)
    }
}
