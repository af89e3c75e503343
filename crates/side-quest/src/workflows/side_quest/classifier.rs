use serde::Serialize;

/// Literal marker the housekeeping system writes into pre-planned jobs.
pub const PLANNED_MARKER: &str = "PLN";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MaintenancePlan {
    Planned,
    Unplanned,
}

impl MaintenancePlan {
    /// Case-sensitive containment test, no tokenization.
    pub fn classify(description: &str) -> Self {
        if description.contains(PLANNED_MARKER) {
            Self::Planned
        } else {
            Self::Unplanned
        }
    }

    pub const fn is_unplanned(self) -> bool {
        matches!(self, Self::Unplanned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_anywhere_means_planned() {
        assert_eq!(MaintenancePlan::classify("PLN deep clean"), MaintenancePlan::Planned);
        assert_eq!(
            MaintenancePlan::classify("carpet|PLN-2024-11"),
            MaintenancePlan::Planned
        );
    }

    #[test]
    fn marker_is_case_sensitive() {
        assert_eq!(MaintenancePlan::classify("pln deep clean"), MaintenancePlan::Unplanned);
        assert!(MaintenancePlan::classify("Replan shower seal").is_unplanned());
    }
}
