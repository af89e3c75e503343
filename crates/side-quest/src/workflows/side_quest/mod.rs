//! Turns a housekeeping export into a ranked list of free rooms with
//! unplanned maintenance, ready for a technician's side quest round.

pub mod classifier;
pub mod eligibility;
pub mod normalizer;
mod pipeline;
pub mod projector;
pub mod pruner;
pub mod render;
pub mod scorer;
pub mod views;

pub use classifier::MaintenancePlan;
pub use pipeline::{HuntStats, SideQuestHunt, SideQuestReport};
pub use projector::{Occupancy, ReportRow};
pub use render::{RenderError, RenderedReport};
pub use scorer::KeywordSet;

use crate::workflows::housekeeping::LoadError;

#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("room {room}: Occupied must be true or false, found '{value}'")]
    UnknownOccupancy { room: String, value: String },
}

#[derive(Debug, thiserror::Error)]
pub enum SideQuestError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Render(#[from] RenderError),
}

impl SideQuestError {
    /// True when the uploaded report, not the service, is at fault.
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::Load(_) | Self::Validation(_))
    }
}
