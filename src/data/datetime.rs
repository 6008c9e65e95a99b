// src/data/datetime.rs

//! Calendar date handling: parsing the user-requested date, the
//! [`DateGate`] that passes only lines of that date, and the `%Y%m%d`
//! stamps used in rotated segment file names.
//!
//! Postfix syslog lines carry no year. A day's lines begin with the month
//! abbreviation and a day of month right-aligned to width two, e.g.
//! `"Jul  2 10:00:01"` or `"Jul 12 10:00:01"`.

use ::chrono::{Datelike, NaiveDate};
use ::lazy_static::lazy_static;
use ::regex::Regex;
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

use crate::common::{PipelineError, ResultPipeline};
use crate::data::line::LogLine;

/// `strftime` pattern of segment file name stamps.
pub const DATE_STAMP_FORMAT: &str = "%Y%m%d";

lazy_static! {
    /// syslog style `"Jul 26"` or `"Jul  2"`
    static ref REGEX_SYSLOG_DATE: Regex = {
        Regex::new(r"^(?P<month>[A-Za-z]{3})\s{1,2}(?P<day>\d{1,2})$").unwrap()
    };
    /// ISO 8601 `"2024-07-26"`
    static ref REGEX_ISO_DATE: Regex = {
        Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap()
    };
}

fn invalid_date(
    date: &str,
    reason: &str,
) -> PipelineError {
    PipelineError::InvalidDateRequest {
        date: String::from(date),
        reason: String::from(reason),
    }
}

/// Parse a user-requested date.
///
/// Accepts `"Jul 26"`, `"Jul  2"` (one or two spaces), taken as a day of the
/// year of `today`, or an ISO `"2024-07-26"`. A date later than `today` is
/// rejected.
pub fn parse_requested_date(
    date: &str,
    today: NaiveDate,
) -> ResultPipeline<NaiveDate> {
    defn!("({:?}, {:?})", date, today);
    let date_t: &str = date.trim();
    let parsed: NaiveDate = if let Some(captures) = REGEX_SYSLOG_DATE.captures(date_t) {
        let month: &str = captures.name("month").map_or("", |m| m.as_str());
        let day: &str = captures.name("day").map_or("", |m| m.as_str());
        let with_year: String = format!("{} {} {}", today.year(), month, day);
        defo!("with_year {:?}", with_year);
        match NaiveDate::parse_from_str(with_year.as_str(), "%Y %b %d") {
            Ok(val) => val,
            Err(err) => {
                defx!("parse_from_str error {}", err);
                return Err(invalid_date(date, err.to_string().as_str()));
            }
        }
    } else if REGEX_ISO_DATE.is_match(date_t) {
        match NaiveDate::parse_from_str(date_t, "%Y-%m-%d") {
            Ok(val) => val,
            Err(err) => {
                defx!("parse_from_str error {}", err);
                return Err(invalid_date(date, err.to_string().as_str()));
            }
        }
    } else {
        defx!("no pattern matched");
        return Err(invalid_date(date, "expected a date like \"Jan 20\", \"Jan  2\", or \"2024-01-20\""));
    };
    if parsed > today {
        defx!("{:?} > {:?}", parsed, today);
        return Err(invalid_date(date, "the date is later than today"));
    }
    defx!("return {:?}", parsed);

    Ok(parsed)
}

/// `%Y%m%d` stamp of `date`, e.g. `"20240726"`.
pub fn date_stamp(date: NaiveDate) -> String {
    date.format(DATE_STAMP_FORMAT).to_string()
}

/// The text a syslog line of `date` begins with, e.g. `"Jul  2"` or
/// `"Jul 12"`.
pub fn syslog_date_text(date: NaiveDate) -> String {
    format!("{} {:>2}", date.format("%b"), date.day())
}

/// Passes only lines containing the syslog text of one date.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DateGate {
    date: NaiveDate,
    pattern: String,
}

impl DateGate {
    pub fn new(date: NaiveDate) -> DateGate {
        let pattern: String = syslog_date_text(date);
        defñ!("pattern {:?}", pattern);

        DateGate { date, pattern }
    }

    /// `true` iff `line` contains the date text anywhere.
    #[inline(always)]
    pub fn passes(
        &self,
        line: &LogLine,
    ) -> bool {
        line.as_str().contains(self.pattern.as_str())
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
}
