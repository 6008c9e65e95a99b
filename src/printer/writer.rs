// src/printer/writer.rs

//! Delimited text output of [`ResultSet`]s, one file per [`Outcome`], and
//! the reverse parse of that output.
//!
//! Each file has a header row of the column names then one row per
//! [`CorrelatedRecord`], fields in [`COLUMNS`] order, joined by the delimiter,
//! rows terminated by `'\n'`.
//!
//! Field values are written verbatim. A row that does not split back into
//! the values written, e.g. with the delimiter inside one of the first five
//! columns, is ambiguous; such rows are counted in
//! [`WriteSummary::ambiguous_rows`]. The delimiter inside the last column,
//! `host_message`, is harmless since rows are split into at most six fields.

use std::io::{BufWriter, Write};
use std::path::Path;

#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

use crate::common::{err_from_err_path, Count, FPath, File, PipelineError, ResultPipeline};
use crate::data::line::Outcome;
use crate::data::records::CorrelatedRecord;
use crate::data::resultset::ResultSet;
use crate::readers::helpers::path_to_fpath;

/// Output column names in order.
pub const COLUMNS: [&str; 6] = [
    "date",
    "sender",
    "receiver",
    "message_id",
    "subject",
    "host_message",
];

/// Counts of one written [`ResultSet`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct WriteSummary {
    /// record rows written, header excluded
    pub rows: Count,
    /// rows that do not read back as written
    pub ambiguous_rows: Count,
}

/// The header row, without line terminator.
pub fn header_row(delimiter: &str) -> String {
    COLUMNS.join(delimiter)
}

/// One record row, without line terminator.
pub fn record_row(
    record: &CorrelatedRecord,
    delimiter: &str,
) -> String {
    record.fields().join(delimiter)
}

/// Will `record` fail to read back as written?
///
/// Decided by splitting the written row again, which also catches a field
/// ending in part of a multi-character delimiter.
pub fn record_is_ambiguous(
    record: &CorrelatedRecord,
    delimiter: &str,
) -> bool {
    if record
        .fields()
        .iter()
        .any(|field| field.contains('\n'))
    {
        return true;
    }
    match parse_row(record_row(record, delimiter).as_str(), delimiter, record.outcome) {
        Ok(parsed) => &parsed != record,
        Err(_err) => true,
    }
}

pub fn write_header<W: Write>(
    writer: &mut W,
    delimiter: &str,
) -> std::io::Result<()> {
    writer.write_all(header_row(delimiter).as_bytes())?;
    writer.write_all(b"\n")
}

/// Write one row. Returns `true` if the row is ambiguous.
pub fn write_record<W: Write>(
    writer: &mut W,
    record: &CorrelatedRecord,
    delimiter: &str,
) -> std::io::Result<bool> {
    writer.write_all(record_row(record, delimiter).as_bytes())?;
    writer.write_all(b"\n")?;

    Ok(record_is_ambiguous(record, delimiter))
}

/// Write the header then every record of `set`.
pub fn write_resultset<W: Write>(
    writer: &mut W,
    set: &ResultSet,
    delimiter: &str,
) -> std::io::Result<WriteSummary> {
    let mut summary: WriteSummary = WriteSummary::default();
    write_header(writer, delimiter)?;
    for record in set.records().iter() {
        if write_record(writer, record, delimiter)? {
            summary.ambiguous_rows += 1;
        }
        summary.rows += 1;
    }
    writer.flush()?;

    Ok(summary)
}

/// File name of an outcome's output, e.g. `bounced-123456.csv`.
pub fn output_file_name(
    outcome: Outcome,
    number: u32,
    filetype: &str,
) -> String {
    format!("{}-{}.{}", outcome, number, filetype)
}

/// Create `output_dir/<output_file_name>` and write `set` to it.
pub fn write_outcome_file(
    output_dir: &Path,
    outcome: Outcome,
    number: u32,
    filetype: &str,
    set: &ResultSet,
    delimiter: &str,
) -> ResultPipeline<(FPath, WriteSummary)> {
    let path = output_dir.join(output_file_name(outcome, number, filetype));
    let fpath: FPath = path_to_fpath(&path);
    defn!("({:?})", fpath);
    let file: File = match File::create(&path) {
        Ok(val) => val,
        Err(err) => {
            defx!("File::create error {}", err);
            return Err(err_from_err_path(err, &fpath));
        }
    };
    let mut bufwriter: BufWriter<File> = BufWriter::new(file);
    let summary: WriteSummary = match write_resultset(&mut bufwriter, set, delimiter) {
        Ok(val) => val,
        Err(err) => {
            defx!("write_resultset error {}", err);
            return Err(err_from_err_path(err, &fpath));
        }
    };
    defx!("{:?}", summary);

    Ok((fpath, summary))
}

fn malformed(
    row: &str,
    reason: String,
) -> PipelineError {
    PipelineError::MalformedRow {
        row: String::from(row),
        reason,
    }
}

/// Parse one row written by [`write_record`].
pub fn parse_row(
    row: &str,
    delimiter: &str,
    outcome: Outcome,
) -> ResultPipeline<CorrelatedRecord> {
    let fields: Vec<&str> = row.splitn(COLUMNS.len(), delimiter).collect();
    if fields.len() != COLUMNS.len() {
        return Err(malformed(
            row,
            format!("expected {} fields, found {}", COLUMNS.len(), fields.len()),
        ));
    }

    Ok(CorrelatedRecord {
        date: String::from(fields[0]),
        sender: String::from(fields[1]),
        receiver: String::from(fields[2]),
        message_id: String::from(fields[3]),
        subject: String::from(fields[4]),
        host_message: String::from(fields[5]),
        outcome,
    })
}

/// Parse output written by [`write_resultset`]; the header row must match.
pub fn parse_rows(
    text: &str,
    delimiter: &str,
    outcome: Outcome,
) -> ResultPipeline<Vec<CorrelatedRecord>> {
    let mut lines = text.lines();
    let header: String = header_row(delimiter);
    match lines.next() {
        Some(first) if first == header => {}
        Some(first) => {
            return Err(malformed(first, format!("expected header {:?}", header)));
        }
        None => {
            return Err(malformed("", String::from("missing header")));
        }
    }

    lines
        .map(|row| parse_row(row, delimiter, outcome))
        .collect()
}
