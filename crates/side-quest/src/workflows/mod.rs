pub mod housekeeping;
pub mod side_quest;
