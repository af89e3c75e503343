//! Permissive loader for the semicolon separated housekeeping export.

pub mod domain;
mod parser;

pub use domain::{LoadedRecords, RoomRecord};

use std::io::Read;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read housekeeping report: {0}")]
    Io(#[from] std::io::Error),
    #[error("housekeeping report header could not be parsed: {0}")]
    Header(#[source] csv::Error),
    #[error("housekeeping report is empty")]
    Empty,
    #[error("housekeeping report is missing the '{0}' column")]
    MissingColumn(&'static str),
}

pub struct HousekeepingLoader;

impl HousekeepingLoader {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<LoadedRecords, LoadError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Reads every well-formed row. Rows with too many fields, invalid
    /// UTF-8, or no room name are counted in `skipped` instead of failing
    /// the load.
    pub fn from_reader<R: Read>(reader: R) -> Result<LoadedRecords, LoadError> {
        parser::parse_records(reader)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const HEADER: &str =
        "Name;Condition;Status;Occupied;Maintenance;Maintenance To;Maintenance description\n";

    fn load(body: &str) -> LoadedRecords {
        HousekeepingLoader::from_reader(Cursor::new(format!("{HEADER}{body}")))
            .expect("report loads")
    }

    #[test]
    fn loads_typed_rows_and_treats_blank_cells_as_absent() {
        let loaded = load("101;Dirty;Departure;False;;2026-10-17 10:00;TV remote missing\n102; ;Vacant;True;;;\n");

        assert_eq!(loaded.skipped, 0);
        assert_eq!(loaded.records.len(), 2);

        let first = &loaded.records[0];
        assert_eq!(first.name, "101");
        assert_eq!(first.condition.as_deref(), Some("Dirty"));
        assert_eq!(first.occupied.as_deref(), Some("False"));
        assert_eq!(first.maintenance, None);
        assert_eq!(first.maintenance_to.as_deref(), Some("2026-10-17 10:00"));
        assert_eq!(first.description(), Some("TV remote missing"));

        let second = &loaded.records[1];
        assert_eq!(second.condition, None);
        assert_eq!(second.maintenance_description, None);
    }

    #[test]
    fn skips_rows_with_extra_fields_and_pads_short_rows() {
        let loaded = load("101;Clean;Vacant;False;;2026-10-17 10:00;safe;extra\n102;Clean;Vacant\n");

        assert_eq!(loaded.skipped, 1);
        assert_eq!(loaded.records.len(), 1);
        let padded = &loaded.records[0];
        assert_eq!(padded.name, "102");
        assert_eq!(padded.occupied, None);
        assert_eq!(padded.maintenance_description, None);
    }

    #[test]
    fn skips_rows_without_a_room_name() {
        let loaded = load(";Clean;Vacant;False;;2026-10-17 10:00;safe\n");
        assert_eq!(loaded.skipped, 1);
        assert!(loaded.records.is_empty());
    }

    #[test]
    fn accepts_slot_until_header_spelling() {
        let csv = "Name;Occupied;Maintenance Slot Until;Maintenance description\n201;True;2026-10-17;cable loose\n";
        let loaded =
            HousekeepingLoader::from_reader(Cursor::new(csv)).expect("report loads");
        assert_eq!(
            loaded.records[0].maintenance_to.as_deref(),
            Some("2026-10-17")
        );
        assert_eq!(loaded.records[0].status, None);
    }

    #[test]
    fn tolerates_byte_order_mark_and_skips_invalid_utf8_rows() {
        let mut bytes = b"\xEF\xBB\xBF".to_vec();
        bytes.extend_from_slice(HEADER.as_bytes());
        bytes.extend_from_slice(b"101;Clean;Vacant;False;;2026-10-17 10:00;caf\xE9 cable\n");
        bytes.extend_from_slice(b"102;Clean;Vacant;False;;2026-10-17 10:00;tv\n");

        let loaded = HousekeepingLoader::from_reader(Cursor::new(bytes)).expect("report loads");

        assert_eq!(loaded.skipped, 1);
        assert_eq!(loaded.records.len(), 1);
        assert_eq!(loaded.records[0].name, "102");
    }

    #[test]
    fn prefers_maintenance_to_when_both_slot_spellings_are_present() {
        let csv = "Name;Occupied;Maintenance To;Maintenance Slot Until;Maintenance description\n\
301;False;2026-10-17 10:00;2026-10-20 08:00;safe\n\
302;True;2026-10-18 11:00;;tv\n";
        let loaded = HousekeepingLoader::from_reader(Cursor::new(csv)).expect("report loads");

        assert_eq!(loaded.skipped, 0);
        let slots: Vec<Option<&str>> = loaded
            .records
            .iter()
            .map(|record| record.maintenance_to.as_deref())
            .collect();
        assert_eq!(slots, [Some("2026-10-17 10:00"), Some("2026-10-18 11:00")]);
    }

    #[test]
    fn repeated_header_reads_the_first_occurrence() {
        let csv = "Name;Occupied;Status;Maintenance To;Status;Maintenance description\n\
401;False;Vacant;2026-10-17;Departure;cable loose\n";
        let loaded = HousekeepingLoader::from_reader(Cursor::new(csv)).expect("report loads");

        assert_eq!(loaded.skipped, 0);
        assert_eq!(loaded.records[0].status.as_deref(), Some("Vacant"));
        assert_eq!(loaded.records[0].description(), Some("cable loose"));
    }

    #[test]
    fn rejects_empty_source() {
        let error = HousekeepingLoader::from_reader(Cursor::new("")).expect_err("empty rejected");
        assert!(matches!(error, LoadError::Empty));
    }

    #[test]
    fn rejects_header_without_required_columns() {
        let error = HousekeepingLoader::from_reader(Cursor::new("Name;Status\n101;Vacant\n"))
            .expect_err("missing columns rejected");
        match error {
            LoadError::MissingColumn(column) => assert_eq!(column, "Occupied"),
            other => panic!("expected missing column, got {other:?}"),
        }
    }

    #[test]
    fn from_path_propagates_io_errors() {
        let error = HousekeepingLoader::from_path("./does-not-exist.csv")
            .expect_err("expected io error");
        assert!(matches!(error, LoadError::Io(_)));
    }
}
