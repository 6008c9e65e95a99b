// src/data/line.rs

//! A [`LogLine`] and the functions that classify it as a submission line,
//! a delivery status line, or neither.

use std::fmt;
use std::str::FromStr;

use crate::common::{PipelineError, ResultPipeline};
use crate::data::fields::{extract_status, MARK_STATUS};

use ::memchr::memmem;
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

const MARK_CLEANUP: &str = "cleanup";
const MARK_FROM_EQ: &str = "from=";
const MARK_SUBJECT: &str = "Subject";
pub(crate) const MARK_TO_EQ: &str = "to=";
pub(crate) const MARK_DSN_EQ: &str = "dsn=";

/// Delivery outcome read from the `status=` keyword of a line.
///
/// Variant order is the report order; `BTreeMap<Outcome, _>` iterates
/// bounced, deferred, sent, rejected.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Outcome {
    Bounced,
    Deferred,
    Sent,
    Rejected,
    /// `status=` keyword that is none of the above
    Unknown,
}

impl Outcome {
    /// The four terminal outcomes, in report order.
    pub const KNOWN: [Outcome; 4] = [
        Outcome::Bounced,
        Outcome::Deferred,
        Outcome::Sent,
        Outcome::Rejected,
    ];

    /// Map a `status=` keyword. Anything unrecognized is `Unknown`.
    pub fn from_keyword(keyword: &str) -> Outcome {
        match keyword {
            "bounced" => Outcome::Bounced,
            "deferred" => Outcome::Deferred,
            "sent" => Outcome::Sent,
            "rejected" => Outcome::Rejected,
            _ => Outcome::Unknown,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Outcome::Bounced => "bounced",
            Outcome::Deferred => "deferred",
            Outcome::Sent => "sent",
            Outcome::Rejected => "rejected",
            Outcome::Unknown => "unknown",
        }
    }

    pub const fn is_known(&self) -> bool {
        !matches!(self, Outcome::Unknown)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which outcomes an invocation reports.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OutcomeFilter {
    All,
    Only(Outcome),
}

impl OutcomeFilter {
    /// Outcomes in scope, in report order.
    pub fn outcomes(&self) -> Vec<Outcome> {
        match self {
            OutcomeFilter::All => Outcome::KNOWN.to_vec(),
            OutcomeFilter::Only(outcome) => vec![*outcome],
        }
    }
}

impl FromStr for OutcomeFilter {
    type Err = PipelineError;

    /// Parse the selector `bounced`, `deferred`, `sent`, `rejected`, or `all`.
    fn from_str(s: &str) -> ResultPipeline<OutcomeFilter> {
        if s == "all" {
            return Ok(OutcomeFilter::All);
        }
        match Outcome::from_keyword(s) {
            Outcome::Unknown => Err(PipelineError::InvalidOutcome { value: String::from(s) }),
            outcome => Ok(OutcomeFilter::Only(outcome)),
        }
    }
}

impl fmt::Display for OutcomeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutcomeFilter::All => write!(f, "all"),
            OutcomeFilter::Only(outcome) => write!(f, "{}", outcome),
        }
    }
}

/// Result of [`classify_status_line`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LineStatus {
    NotAStatusLine,
    StatusLine(Outcome),
}

/// One line of log text, line terminator removed.
///
/// Yielded by [`SegmentReader`] and checked by [`DateGate`] before any
/// classification.
///
/// [`SegmentReader`]: crate::readers::segmentreader::SegmentReader
/// [`DateGate`]: crate::data::datetime::DateGate
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LogLine {
    text: String,
}

impl LogLine {
    pub fn new(text: String) -> LogLine {
        LogLine { text }
    }

    pub fn as_str(&self) -> &str {
        self.text.as_str()
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Byte substring search.
#[inline(always)]
pub fn line_contains(
    line: &str,
    needle: &str,
) -> bool {
    memmem::find(line.as_bytes(), needle.as_bytes()).is_some()
}

/// `true` iff the line has the `cleanup`, `from=`, and `Subject` markers.
pub fn is_submission_line(line: &str) -> bool {
    line_contains(line, MARK_CLEANUP) && line_contains(line, MARK_FROM_EQ) && line_contains(line, MARK_SUBJECT)
}

/// `true` iff the line has the `status=`, `to=`, and `dsn=` markers.
pub fn has_status_markers(line: &str) -> bool {
    line_contains(line, MARK_STATUS) && line_contains(line, MARK_TO_EQ) && line_contains(line, MARK_DSN_EQ)
}

/// `true` iff the line has `status=<outcome>`, `to=`, and `dsn=`.
pub fn has_outcome_markers(
    line: &str,
    outcome: Outcome,
) -> bool {
    let marker: String = format!("{}{}", MARK_STATUS, outcome.as_str());

    line_contains(line, marker.as_str()) && line_contains(line, MARK_TO_EQ) && line_contains(line, MARK_DSN_EQ)
}

/// Decide if `line` is a delivery status line and with which outcome.
pub fn classify_status_line(line: &str) -> LineStatus {
    if !has_status_markers(line) {
        return LineStatus::NotAStatusLine;
    }
    let outcome: Outcome = match extract_status(line) {
        Ok(keyword) => Outcome::from_keyword(keyword.as_str()),
        Err(_err) => {
            defñ!("{}", _err);
            Outcome::Unknown
        }
    };

    LineStatus::StatusLine(outcome)
}
