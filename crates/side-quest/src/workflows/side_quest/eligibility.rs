use crate::workflows::housekeeping::RoomRecord;

/// Room status meaning the guest stays through the maintenance window.
pub const STAY_THROUGH: &str = "Stay-through";
/// Maintenance state for rooms that are already fully out of service.
pub const OUT_OF_ORDER: &str = "Out of order";

/// A room is a candidate when it carries a maintenance description, is not
/// a stay-through and is not already out of order. Absent status or
/// maintenance cells never equal the sentinels.
pub fn is_eligible(record: &RoomRecord) -> bool {
    has_description(record) && !is_stay_through(record) && !is_out_of_order(record)
}

fn has_description(record: &RoomRecord) -> bool {
    record
        .maintenance_description
        .as_deref()
        .is_some_and(|description| !description.trim().is_empty())
}

fn is_stay_through(record: &RoomRecord) -> bool {
    record.status.as_deref() == Some(STAY_THROUGH)
}

fn is_out_of_order(record: &RoomRecord) -> bool {
    record.maintenance.as_deref() == Some(OUT_OF_ORDER)
}
