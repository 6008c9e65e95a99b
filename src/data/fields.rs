// src/data/fields.rs

//! Pure functions that extract one named field from one Postfix log line.
//!
//! Every field is located by fixed textual markers, e.g. `from=<` and `>`.
//! A missing marker is a recoverable [`PipelineError::FieldNotFound`];
//! callers drop the line and carry on.
//!
//! A submission line looks like
//!
//! ```text
//! Jul 26 10:00:01 mx1 postfix/cleanup[4242]: ABC123: warning: header Subject: hello from mx1[10.0.0.1]; from=<a@b.com> to=<c@d.com>
//! ```
//!
//! and a delivery status line looks like
//!
//! ```text
//! Jul 26 10:00:02 mx1 postfix/smtp[4243]: ABC123: to=<c@d.com>, relay=d.com[10.0.0.2]:25, dsn=2.0.0, status=sent (250 2.0.0 OK)
//! ```

use crate::common::{Field, PipelineError, ResultPipeline};

#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

/// Number of whitespace-delimited syslog prefix fields preceding the queue
/// id: month, day, time, host, process[pid].
///
/// [`extract_message_id`] takes the token right after these. A line with a
/// different prefix shape silently yields the wrong token.
pub const PREFIX_FIELDS_DEFAULT: usize = 5;

const MARK_TO: &str = "to=<";
const MARK_FROM: &str = "from=<";
const MARK_ADDR_END: &str = ">";
const MARK_SUBJECT: &str = "Subject: ";
const MARK_SUBJECT_END: &str = " from";
pub(crate) const MARK_STATUS: &str = "status=";

/// Return the text after the first `start` up to the next `end`.
fn text_between<'a>(
    line: &'a str,
    start: &str,
    end: &str,
    field: Field,
) -> ResultPipeline<&'a str> {
    let at: usize = match line.find(start) {
        Some(val) => val + start.len(),
        None => {
            return Err(PipelineError::field_not_found(field, line));
        }
    };
    let rest: &str = &line[at..];
    match rest.find(end) {
        Some(len) => Ok(&rest[..len]),
        None => Err(PipelineError::field_not_found(field, line)),
    }
}

/// Text between `to=<` and the next `>`.
pub fn extract_receiver(line: &str) -> ResultPipeline<String> {
    text_between(line, MARK_TO, MARK_ADDR_END, Field::Receiver).map(String::from)
}

/// Text between `from=<` and the next `>`.
pub fn extract_sender(line: &str) -> ResultPipeline<String> {
    text_between(line, MARK_FROM, MARK_ADDR_END, Field::Sender).map(String::from)
}

/// Text between `Subject: ` and the next literal ` from`.
pub fn extract_subject(line: &str) -> ResultPipeline<String> {
    text_between(line, MARK_SUBJECT, MARK_SUBJECT_END, Field::Subject).map(String::from)
}

/// The token following `status=` up to the next whitespace.
///
/// A `status=` at the very end of a line has no terminating whitespace and
/// is not a status.
pub fn extract_status(line: &str) -> ResultPipeline<String> {
    let at: usize = match line.find(MARK_STATUS) {
        Some(val) => val + MARK_STATUS.len(),
        None => {
            return Err(PipelineError::field_not_found(Field::Status, line));
        }
    };
    let rest: &str = &line[at..];
    match rest.find(char::is_whitespace) {
        Some(0) | None => Err(PipelineError::field_not_found(Field::Status, line)),
        Some(len) => Ok(String::from(&rest[..len])),
    }
}

/// Remainder of the line after `status=<status_keyword> `.
pub fn extract_host_message(
    line: &str,
    status_keyword: &str,
) -> ResultPipeline<String> {
    let marker: String = format!("{}{} ", MARK_STATUS, status_keyword);
    let at: usize = match line.find(marker.as_str()) {
        Some(val) => val + marker.len(),
        None => {
            return Err(PipelineError::field_not_found(Field::HostMessage, line));
        }
    };
    let rest: &str = line[at..].trim_end_matches(['\r', '\n']);
    if rest.is_empty() {
        return Err(PipelineError::field_not_found(Field::HostMessage, line));
    }

    Ok(String::from(rest))
}

/// The queue id of a line; the 6th whitespace token, trailing colon removed.
///
/// Same as [`extract_message_id_at`] with [`PREFIX_FIELDS_DEFAULT`].
pub fn extract_message_id(line: &str) -> ResultPipeline<String> {
    extract_message_id_at(line, PREFIX_FIELDS_DEFAULT)
}

/// The whitespace token after `prefix_fields` tokens, trailing colon removed.
pub fn extract_message_id_at(
    line: &str,
    prefix_fields: usize,
) -> ResultPipeline<String> {
    defñ!("(…, {})", prefix_fields);
    let token: &str = match line.split_whitespace().nth(prefix_fields) {
        Some(val) => val,
        None => {
            return Err(PipelineError::field_not_found(Field::MessageId, line));
        }
    };
    let id: &str = token.strip_suffix(':').unwrap_or(token);
    if id.is_empty() {
        return Err(PipelineError::field_not_found(Field::MessageId, line));
    }

    Ok(String::from(id))
}

/// Month and day tokens of the line joined by one space, e.g. `"Jul 2"`.
pub fn extract_line_date(line: &str) -> ResultPipeline<String> {
    let mut tokens = line.split_whitespace();
    match (tokens.next(), tokens.next()) {
        (Some(month), Some(day)) => Ok(format!("{} {}", month, day)),
        _ => Err(PipelineError::field_not_found(Field::LineDate, line)),
    }
}
