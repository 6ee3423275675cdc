//! Reporter: `HostReport` → human-readable text.
//!
//! Pure formatting. The orchestrator decides where the text goes.

use std::fmt::Write;

use crate::domain::{EndDate, HostOutcome, HostReport, SkippedHost};

const TABLE_HEADER: &str = "End Date\t\tName";
const TABLE_RULE: &str = "=============================================";

pub fn render(report: &HostReport) -> String {
    let mut out = String::new();
    match &report.outcome {
        HostOutcome::Listed { matches, .. } => {
            line(&mut out, format_args!("{} matching assets.", matches.len()));
            table(
                &mut out,
                matches.iter().map(|row| (&row.end_date, row.name.as_str())),
            );
        }
        HostOutcome::Reported { assets } => {
            line(
                &mut out,
                format_args!("{} assets found on {}:", assets.len(), report.host),
            );
            table(
                &mut out,
                assets.iter().map(|asset| (&asset.end_date, asset.name.as_str())),
            );
        }
        HostOutcome::Deleted {
            processed,
            failures,
        } => {
            for failure in failures {
                line(
                    &mut out,
                    format_args!(
                        "Error deleting asset {}: {}",
                        failure.asset_id, failure.reason
                    ),
                );
            }
            line(
                &mut out,
                format_args!("Deleted {} assets from {}.", processed, report.host),
            );
        }
    }
    out
}

pub fn render_skipped(skipped: &SkippedHost) -> String {
    format!("{}: {}\n", skipped.host, skipped.reason)
}

/// Header, rule and one `end_date<TAB>name` row per entry, then a blank line.
/// Nothing at all when there are no rows.
fn table<'a>(out: &mut String, rows: impl ExactSizeIterator<Item = (&'a EndDate, &'a str)>) {
    if rows.len() == 0 {
        return;
    }
    line(out, format_args!("{TABLE_HEADER}"));
    line(out, format_args!("{TABLE_RULE}"));
    for (end_date, name) in rows {
        line(out, format_args!("{end_date}\t{name}"));
    }
    out.push('\n');
}

fn line(out: &mut String, args: std::fmt::Arguments<'_>) {
    // String への書き込みは失敗しない
    let _ = out.write_fmt(args);
    out.push('\n');
}
