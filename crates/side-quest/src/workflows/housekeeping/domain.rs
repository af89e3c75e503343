use serde::Serialize;

/// One room line of the housekeeping export, kept as close to the source
/// text as possible. Typing happens in the stages that need it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomRecord {
    pub name: String,
    pub condition: Option<String>,
    pub status: Option<String>,
    pub occupied: Option<String>,
    pub maintenance: Option<String>,
    pub maintenance_to: Option<String>,
    pub maintenance_description: Option<String>,
}

impl RoomRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            condition: None,
            status: None,
            occupied: None,
            maintenance: None,
            maintenance_to: None,
            maintenance_description: None,
        }
    }

    pub fn description(&self) -> Option<&str> {
        self.maintenance_description.as_deref()
    }
}

/// Rows that survived a permissive load, plus how many were dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadedRecords {
    pub records: Vec<RoomRecord>,
    pub skipped: usize,
}
