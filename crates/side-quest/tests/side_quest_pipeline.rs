use chrono::{DateTime, Duration, TimeZone};
use chrono_tz::Europe::London;
use chrono_tz::Tz;
use side_quest::workflows::housekeeping::{HousekeepingLoader, LoadedRecords, RoomRecord};
use side_quest::workflows::side_quest::{
    KeywordSet, Occupancy, SideQuestError, SideQuestHunt, ValidationError,
};
use std::io::Cursor;

const HEADER: &str =
    "Name;Condition;Status;Occupied;Maintenance;Maintenance To;Maintenance description\n";

fn now() -> DateTime<Tz> {
    London
        .with_ymd_and_hms(2026, 10, 16, 12, 0, 0)
        .single()
        .expect("valid instant")
}

fn slot(offset: Duration) -> String {
    (now() + offset).format("%Y-%m-%d %H:%M").to_string()
}

fn tomorrow() -> String {
    slot(Duration::days(1))
}

fn yesterday() -> String {
    slot(-Duration::days(1))
}

fn run(body: &str) -> side_quest::workflows::side_quest::SideQuestReport {
    SideQuestHunt::default()
        .run_reader(Cursor::new(format!("{HEADER}{body}")), now())
        .expect("hunt succeeds")
}

fn room_names(report: &side_quest::workflows::side_quest::SideQuestReport) -> Vec<&str> {
    report.rows.iter().map(|row| row.room.as_str()).collect()
}

#[test]
fn only_free_unplanned_future_rooms_are_reported() {
    let future = tomorrow();
    let past = yesterday();
    let body = format!(
        "101;Dirty;Departure;False;Out of service;{future};Shower drain slow\n\
102;Clean;Stay-through;True;Out of service;{future};tv remote\n\
103;Clean;Vacant;False;Out of order;{future};safe locked\n\
104;Clean;Vacant;False;;{future};\n\
105;Clean;Vacant;False;Out of service;{future};PLN deep clean\n\
106;Clean;Vacant;False;Out of service;{past};charger missing\n\
107;Clean;Vacant;False;Out of service;soon;cable loose\n"
    );

    let report = run(&body);

    assert_eq!(room_names(&report), ["101"]);
    let stats = report.stats;
    assert_eq!(stats.loaded, 7);
    assert_eq!(stats.eligible, 4);
    assert_eq!(stats.planned, 1);
    assert_eq!(stats.elapsed_slots, 1);
    assert_eq!(stats.unparsable_slots, 1);
    assert_eq!(stats.missing_slots, 0);
    assert_eq!(stats.reported, 1);
}

#[test]
fn absent_slots_are_counted_apart_from_unreadable_ones() {
    let body = format!(
        "111;;;False;;;tv\n\
112;;;False;;whenever;tv\n\
113;;;False;;{};tv\n",
        tomorrow()
    );

    let report = run(&body);

    assert_eq!(room_names(&report), ["113"]);
    assert_eq!(report.stats.missing_slots, 1);
    assert_eq!(report.stats.unparsable_slots, 1);
}

#[test]
fn descriptions_are_normalized_and_flagged() {
    let future = tomorrow();
    let body = format!("201;Dirty;Departure;True;;{future};TV-arm broken|needs charger\n");

    let report = run(&body);
    let row = &report.rows[0];

    assert_eq!(row.maintenance_description, "TV arm broken needs charger");
    assert!(row.side_quest);
    assert_eq!(row.occupancy, Occupancy::Occupied);
    assert_eq!(report.stats.side_quests, 1);
}

#[test]
fn side_quests_lead_and_ties_keep_export_order() {
    let future = tomorrow();
    let body = format!(
        "301;;;False;;{future};Shower drain slow\n\
302;;;False;;{future};HDMI cable loose\n\
303;;;False;;{future};Carpet stain\n\
304;;;False;;{future};ipad battery flat\n"
    );

    let report = run(&body);

    assert_eq!(room_names(&report), ["302", "304", "301", "303"]);
    let flags: Vec<bool> = report.rows.iter().map(|row| row.side_quest).collect();
    assert_eq!(flags, [true, true, false, false]);
}

#[test]
fn zero_qualifying_rows_is_an_empty_report_not_an_error() {
    let report = run(&format!("401;;Stay-through;True;;{};tv\n", tomorrow()));
    assert!(report.rows.is_empty());
    assert_eq!(report.generated_at, now());
}

#[test]
fn malformed_rows_are_counted_not_fatal() {
    let future = tomorrow();
    let body = format!(
        "501;;;False;;{future};safe;unexpected\n\
502;;;False;;{future};safe\n"
    );

    let report = run(&body);

    assert_eq!(report.stats.skipped_rows, 1);
    assert_eq!(room_names(&report), ["502"]);
}

#[test]
fn unknown_occupancy_on_a_reported_row_aborts_the_run() {
    let body = format!("601;;;Maybe;;{};safe\n", tomorrow());
    let error = SideQuestHunt::default()
        .run_reader(Cursor::new(format!("{HEADER}{body}")), now())
        .expect_err("validation fails");

    assert!(error.is_input_error());
    match error {
        SideQuestError::Validation(ValidationError::UnknownOccupancy { room, value }) => {
            assert_eq!(room, "601");
            assert_eq!(value, "Maybe");
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn unknown_occupancy_on_a_pruned_row_is_never_inspected() {
    let body = format!("602;;;Maybe;;{};safe\n", yesterday());
    let report = run(&body);
    assert!(report.rows.is_empty());
}

#[test]
fn unreadable_header_is_a_load_error() {
    let error = SideQuestHunt::default()
        .run_reader(Cursor::new("Room;State\n1;x\n"), now())
        .expect_err("load fails");
    assert!(matches!(error, SideQuestError::Load(_)));
}

#[test]
fn custom_keywords_drive_the_flag() {
    let hunt = SideQuestHunt::new(KeywordSet::new(["lamp"]), London);
    let loaded = LoadedRecords {
        records: vec![
            RoomRecord {
                occupied: Some("false".to_string()),
                maintenance_to: Some(tomorrow()),
                maintenance_description: Some("Bedside lamp out".to_string()),
                ..RoomRecord::new("701")
            },
            RoomRecord {
                occupied: Some("false".to_string()),
                maintenance_to: Some(tomorrow()),
                maintenance_description: Some("tv broken".to_string()),
                ..RoomRecord::new("702")
            },
        ],
        skipped: 0,
    };

    let report = hunt.run(loaded, now()).expect("hunt succeeds");

    let flags: Vec<(&str, bool)> = report
        .rows
        .iter()
        .map(|row| (row.room.as_str(), row.side_quest))
        .collect();
    assert_eq!(flags, [("701", true), ("702", false)]);
}

#[test]
fn loader_and_pipeline_agree_on_file_input() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("hsk.csv");
    std::fs::write(
        &path,
        format!("{HEADER}801;;;True;;{};Airplay not pairing\n", tomorrow()),
    )
    .expect("write csv");

    let loaded = HousekeepingLoader::from_path(&path).expect("loads");
    assert_eq!(loaded.records.len(), 1);

    let report = SideQuestHunt::default()
        .run_path(&path, now())
        .expect("hunt succeeds");
    assert_eq!(room_names(&report), ["801"]);
    assert!(report.rows[0].side_quest);
}
