use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};
use chrono_tz::Tz;

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%d.%m.%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y"];

/// Where a maintenance slot stands relative to the run's captured instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotWindow {
    Open(DateTime<Tz>),
    Elapsed(DateTime<Tz>),
    Missing,
    Unparsable,
}

impl SlotWindow {
    /// Open only when the slot ends strictly after `now`. Absent and
    /// unreadable values fail closed.
    pub fn evaluate(raw: Option<&str>, timezone: Tz, now: &DateTime<Tz>) -> Self {
        let Some(value) = raw.filter(|value| !value.trim().is_empty()) else {
            return Self::Missing;
        };
        match parse_slot_until(value, timezone) {
            Some(until) if until > *now => Self::Open(until),
            Some(until) => Self::Elapsed(until),
            None => Self::Unparsable,
        }
    }
}

/// Parses a Maintenance To cell. Offsets are honoured when present,
/// otherwise the wall-clock value is read in `timezone`. Times that fall
/// in a DST gap do not exist and yield `None`; folded times take the
/// earlier instant.
pub fn parse_slot_until(value: &str, timezone: Tz) -> Option<DateTime<Tz>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&timezone));
    }

    for format in DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return localize(naive, timezone);
        }
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return date
                .and_hms_opt(0, 0, 0)
                .and_then(|naive| localize(naive, timezone));
        }
    }

    None
}

fn localize(naive: NaiveDateTime, timezone: Tz) -> Option<DateTime<Tz>> {
    timezone.from_local_datetime(&naive).earliest()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use chrono_tz::Europe::London;

    fn now() -> DateTime<Tz> {
        London
            .with_ymd_and_hms(2026, 10, 16, 12, 0, 0)
            .single()
            .expect("valid instant")
    }

    #[test]
    fn parses_common_housekeeping_formats() {
        let expected = London
            .with_ymd_and_hms(2026, 10, 17, 9, 30, 0)
            .single()
            .expect("valid instant");
        for raw in [
            "2026-10-17 09:30:00",
            "2026-10-17 09:30",
            "2026-10-17T09:30:00",
            "17/10/2026 09:30",
            "17.10.2026 09:30",
            "2026-10-17T08:30:00Z",
        ] {
            assert_eq!(parse_slot_until(raw, London), Some(expected), "{raw}");
        }
    }

    #[test]
    fn date_only_values_mean_local_midnight() {
        let parsed = parse_slot_until("2026-10-17", London).expect("date parses");
        assert_eq!(parsed.format("%Y-%m-%d %H:%M").to_string(), "2026-10-17 00:00");
    }

    #[test]
    fn dst_gap_times_do_not_exist() {
        assert_eq!(parse_slot_until("2026-03-29 01:30", London), None);
    }

    #[test]
    fn folded_times_take_the_earlier_instant() {
        let parsed = parse_slot_until("2026-10-25 01:30", London).expect("fold parses");
        let first_pass = chrono::Utc
            .with_ymd_and_hms(2026, 10, 25, 0, 30, 0)
            .single()
            .expect("valid instant");
        assert_eq!(parsed, first_pass);
        assert_eq!(parsed.format("%:z").to_string(), "+01:00");
    }

    #[test]
    fn future_slots_stay_open_and_past_slots_elapse() {
        let now = now();
        let tomorrow = (now + Duration::days(1)).format("%Y-%m-%d %H:%M").to_string();
        let yesterday = (now - Duration::days(1)).format("%Y-%m-%d %H:%M").to_string();

        assert!(matches!(
            SlotWindow::evaluate(Some(&tomorrow), London, &now),
            SlotWindow::Open(_)
        ));
        assert!(matches!(
            SlotWindow::evaluate(Some(&yesterday), London, &now),
            SlotWindow::Elapsed(_)
        ));
    }

    #[test]
    fn slot_ending_exactly_now_has_elapsed() {
        let now = now();
        assert_eq!(
            SlotWindow::evaluate(Some("2026-10-16 12:00:00"), London, &now),
            SlotWindow::Elapsed(now)
        );
    }

    #[test]
    fn unreadable_and_absent_values_fail_closed() {
        let now = now();
        assert_eq!(
            SlotWindow::evaluate(Some("next tuesday"), London, &now),
            SlotWindow::Unparsable
        );
        assert_eq!(SlotWindow::evaluate(None, London, &now), SlotWindow::Missing);
        assert_eq!(SlotWindow::evaluate(Some("  "), London, &now), SlotWindow::Missing);
    }
}
