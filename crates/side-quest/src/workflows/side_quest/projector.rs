use super::ValidationError;
use chrono::DateTime;
use chrono_tz::Tz;
use serde::Serialize;

/// Output labels for the Occupied flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Occupancy {
    Occupied,
    Free,
}

impl Occupancy {
    /// Maps the boolean cell. Anything but true/false is rejected.
    pub fn from_flag(raw: Option<&str>) -> Option<Self> {
        let value = raw?.trim();
        if value.eq_ignore_ascii_case("true") {
            Some(Self::Occupied)
        } else if value.eq_ignore_ascii_case("false") {
            Some(Self::Free)
        } else {
            None
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Occupied => "Occupied",
            Self::Free => "Free",
        }
    }
}

/// A scored candidate reduced to the report columns, before the slot
/// window and occupancy are resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectedRow {
    pub name: String,
    pub condition: Option<String>,
    pub status: Option<String>,
    pub occupied: Option<String>,
    pub maintenance: Option<String>,
    pub maintenance_to: Option<String>,
    pub maintenance_description: String,
    pub side_quest: bool,
}

impl ProjectedRow {
    pub(crate) fn into_report_row(
        self,
        slot_until: DateTime<Tz>,
    ) -> Result<ReportRow, ValidationError> {
        let occupancy = Occupancy::from_flag(self.occupied.as_deref()).ok_or_else(|| {
            ValidationError::UnknownOccupancy {
                room: self.name.clone(),
                value: self.occupied.clone().unwrap_or_default(),
            }
        })?;

        Ok(ReportRow {
            room: self.name,
            condition: self.condition.unwrap_or_default(),
            status: self.status.unwrap_or_default(),
            occupancy,
            maintenance: self.maintenance.unwrap_or_default(),
            slot_until,
            maintenance_description: self.maintenance_description,
            side_quest: self.side_quest,
        })
    }
}

/// Side quest material first. The sort is stable, so rows with the same
/// flag keep their export order.
pub fn sort_by_side_quest(rows: &mut [ProjectedRow]) {
    rows.sort_by_key(|row| !row.side_quest);
}

/// One line of the finished hunt list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    pub room: String,
    pub condition: String,
    pub status: String,
    pub occupancy: Occupancy,
    pub maintenance: String,
    pub slot_until: DateTime<Tz>,
    pub maintenance_description: String,
    pub side_quest: bool,
}

pub const SLOT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

impl ReportRow {
    /// Cell text in report column order.
    pub fn cells(&self) -> [String; 8] {
        [
            self.room.clone(),
            self.condition.clone(),
            self.status.clone(),
            self.occupancy.label().to_string(),
            self.maintenance.clone(),
            self.slot_until.format(SLOT_FORMAT).to_string(),
            self.maintenance_description.clone(),
            if self.side_quest { "True" } else { "False" }.to_string(),
        ]
    }
}
