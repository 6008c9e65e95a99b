// src/printer/summary.rs

//! Printing of the results table and, with CLI option `--summary`, of
//! processing counters.
//! Only used by `pfstats.rs`.

use std::collections::BTreeMap;
use std::io::Write;
use std::time::Duration;

#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};
pub use ::termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::common::{Count, FPath};
use crate::data::line::Outcome;
use crate::data::resultset::ResultSets;
use crate::readers::correlator::CorrelatorSummary;

const BANNER_RESULTS: &str = "************************* RESULTS *************************";
const BANNER_END: &str = "***********************************************************";

/// Color of an outcome name in the results table.
pub const fn color_outcome(outcome: Outcome) -> Color {
    match outcome {
        Outcome::Sent => Color::Green,
        Outcome::Deferred => Color::Yellow,
        Outcome::Bounced => Color::Red,
        Outcome::Rejected => Color::Magenta,
        Outcome::Unknown => Color::White,
    }
}

/// One row of the results table, without the colored outcome name.
///
/// `sent` is short so it gets extra padding to align with the others.
pub fn results_row_tail(
    outcome: Outcome,
    count: Count,
    file_name: &str,
) -> String {
    let pad: &str = match outcome {
        Outcome::Sent => ":   \t",
        _ => ":\t",
    };

    format!("{}{}\t\t{}\n", pad, count, file_name)
}

/// Print the results table to `out`.
///
/// `files` maps each outcome to the base name of its output file.
pub fn print_results<W: WriteColor>(
    out: &mut W,
    results: &ResultSets,
    files: &BTreeMap<Outcome, FPath>,
) -> std::io::Result<()> {
    defn!();
    writeln!(out, "\n{}\n", BANNER_RESULTS)?;
    for (outcome, set) in results.iter() {
        out.set_color(ColorSpec::new().set_fg(Some(color_outcome(outcome))))?;
        write!(out, "{}", outcome)?;
        out.reset()?;
        let file_name: &str = files.get(&outcome).map_or("", |f| f.as_str());
        write!(out, "{}", results_row_tail(outcome, set.count(), file_name))?;
    }
    writeln!(out, "\n-----\nTotal:\t\t{}", results.total())?;
    writeln!(out, "\n{}", BANNER_END)?;
    out.flush()?;
    defx!();

    Ok(())
}

/// Print the elapsed time line.
pub fn print_elapsed<W: Write>(
    out: &mut W,
    elapsed: Duration,
) -> std::io::Result<()> {
    writeln!(out, "--- {} seconds ---", elapsed.as_secs_f64())
}

/// Print processing counters and segment information.
pub fn print_summary<W: Write>(
    out: &mut W,
    summary: &CorrelatorSummary,
    segments_read: &[FPath],
    segments_missing: &[FPath],
    lines_read: Count,
) -> std::io::Result<()> {
    writeln!(out, "\nSummary:")?;
    writeln!(out, "  segments read        : {}", segments_read.len())?;
    for segment in segments_read.iter() {
        writeln!(out, "    {}", segment)?;
    }
    writeln!(out, "  segments missing     : {}", segments_missing.len())?;
    for segment in segments_missing.iter() {
        writeln!(out, "    {}", segment)?;
    }
    writeln!(out, "  lines read           : {}", lines_read)?;
    writeln!(out, "  lines of other dates : {}", summary.lines_other_date)?;
    writeln!(out, "  lines processed      : {}", summary.lines_processed)?;
    writeln!(out, "  submissions          : {}", summary.submissions)?;
    writeln!(out, "  submissions filtered : {}", summary.submissions_filtered)?;
    writeln!(out, "  status lines         : {}", summary.status_lines)?;
    writeln!(out, "  status lines unknown : {}", summary.status_lines_unknown)?;
    writeln!(out, "  lines dropped        : {}", summary.lines_dropped)?;
    writeln!(out, "  joins dropped        : {}", summary.joins_dropped)?;

    Ok(())
}
