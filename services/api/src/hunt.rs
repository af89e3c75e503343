use chrono::{DateTime, FixedOffset};
use chrono_tz::Tz;
use clap::Args;
use side_quest::config::AppConfig;
use side_quest::error::AppError;
use side_quest::telemetry;
use side_quest::workflows::side_quest::{SideQuestHunt, SideQuestReport};
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub(crate) struct HuntArgs {
    /// Semicolon-separated housekeeping export
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Directory for side_quest_hunt.pdf (defaults to REPORT_OUTPUT_DIR)
    #[arg(long)]
    pub(crate) output_dir: Option<PathBuf>,
    /// Evaluate slots against this RFC 3339 instant instead of the wall clock
    #[arg(long, value_parser = crate::infra::parse_instant)]
    pub(crate) now: Option<DateTime<FixedOffset>>,
}

pub(crate) fn run_hunt(args: HuntArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let hunt = SideQuestHunt::from_config(&config.report);
    let now = resolve_now(&hunt, args.now);
    let report = hunt.run_path(&args.input, now)?;

    let output_dir = args
        .output_dir
        .unwrap_or_else(|| config.report.output_dir.clone());
    let written = report.render()?.persist(&output_dir)?;

    print_preview(&report, &args.input, &written);
    Ok(())
}

fn resolve_now(hunt: &SideQuestHunt, requested: Option<DateTime<FixedOffset>>) -> DateTime<Tz> {
    match requested {
        Some(instant) => instant.with_timezone(&hunt.timezone()),
        None => hunt.now(),
    }
}

fn print_preview(report: &SideQuestReport, input: &Path, written: &Path) {
    let preview = report.preview();
    let stats = preview.stats;

    println!("Side quest hunt");
    println!(
        "Source: {} (evaluated {} {})",
        input.display(),
        preview.generated_at,
        preview.timezone
    );
    println!(
        "Rows: {} loaded, {} skipped, {} eligible, {} planned",
        stats.loaded, stats.skipped_rows, stats.eligible, stats.planned
    );
    println!(
        "Slots: {} elapsed, {} missing, {} unreadable",
        stats.elapsed_slots, stats.missing_slots, stats.unparsable_slots
    );

    if preview.rows.is_empty() {
        println!("\nOpen maintenance: none");
    } else {
        println!("\nOpen maintenance ({} side quests)", stats.side_quests);
        for row in &preview.rows {
            let marker = if row.side_quest_material { "*" } else { "-" };
            println!(
                "{} {} | {} | until {} | {}",
                marker,
                row.room,
                row.occupied,
                row.maintenance_slot_until,
                row.maintenance_description
            );
        }
    }

    println!("\nReport written to {}", written.display());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::parse_instant;
    use chrono::Timelike;

    #[test]
    fn requested_instant_is_moved_into_the_report_zone() {
        let hunt = SideQuestHunt::default();
        let requested = parse_instant("2026-10-16T11:00:00Z").expect("instant parses");

        let now = resolve_now(&hunt, Some(requested));

        assert_eq!(now.timezone(), chrono_tz::Europe::London);
        assert_eq!(now.hour(), 12);
    }

    #[test]
    fn wall_clock_is_used_without_an_override() {
        let hunt = SideQuestHunt::default();
        let before = hunt.now();
        let now = resolve_now(&hunt, None);
        assert!(now >= before);
    }
}
