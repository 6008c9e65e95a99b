// src/readers/correlator.rs

//! The [`Correlator`] retains submission and delivery status lines of one
//! log stream, then joins them by message id into [`ResultSets`].
//!
//! Processing has two phases:
//!
//! 1. [`process_line`] per line, in stream order. Submission lines passing
//!    the sender and subject filters become [`SubmissionRecord`]s. Delivery
//!    status lines become [`DeliveryStatusRecord`]s, pooled by outcome.
//! 2. [`correlate`] once. For each outcome in scope, for each submission,
//!    for each pooled status line mentioning the submission's message id,
//!    one [`CorrelatedRecord`] is emitted.
//!
//! All retained records are held in memory until phase 2. The count is
//! bounded by [`CorrelatorConfig::max_records`].
//!
//! [`process_line`]: Correlator::process_line
//! [`correlate`]: Correlator::correlate

use std::collections::BTreeMap;

#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

use crate::common::{Count, PipelineError, ResultPipeline};
use crate::data::datetime::DateGate;
use crate::data::fields::PREFIX_FIELDS_DEFAULT;
use crate::data::line::{
    classify_status_line,
    has_outcome_markers,
    is_submission_line,
    line_contains,
    LineStatus,
    LogLine,
    Outcome,
    OutcomeFilter,
};
use crate::data::records::{CorrelatedRecord, DeliveryStatusRecord, SubmissionRecord};
use crate::data::resultset::ResultSets;
use crate::de_wrn;

/// Default bound of retained submission and status records.
pub const MAX_RECORDS_DEFAULT: usize = 5_000_000;

/// Filters and limits of one [`Correlator`]. Fixed at construction.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CorrelatorConfig {
    /// outcomes to report
    pub outcome_filter: OutcomeFilter,
    /// substring a submission line must contain
    pub sender: Option<String>,
    /// substring a submission line must contain
    pub subject: Option<String>,
    /// syslog prefix fields before the message id
    pub prefix_fields: usize,
    /// retained records limit
    pub max_records: usize,
}

impl Default for CorrelatorConfig {
    fn default() -> CorrelatorConfig {
        CorrelatorConfig {
            outcome_filter: OutcomeFilter::All,
            sender: None,
            subject: None,
            prefix_fields: PREFIX_FIELDS_DEFAULT,
            max_records: MAX_RECORDS_DEFAULT,
        }
    }
}

impl CorrelatorConfig {
    pub fn new(outcome_filter: OutcomeFilter) -> CorrelatorConfig {
        CorrelatorConfig {
            outcome_filter,
            ..CorrelatorConfig::default()
        }
    }

    /// Every configured sender and subject filter is in `line`.
    pub fn submission_passes(
        &self,
        line: &str,
    ) -> bool {
        let sender_ok: bool = match &self.sender {
            Some(sender) => line_contains(line, sender),
            None => true,
        };
        let subject_ok: bool = match &self.subject {
            Some(subject) => line_contains(line, subject),
            None => true,
        };

        sender_ok && subject_ok
    }
}

/// Counters of one [`Correlator`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct CorrelatorSummary {
    /// lines given to `process_line`
    pub lines_processed: Count,
    /// lines rejected by the date gate
    pub lines_other_date: Count,
    /// submission records retained
    pub submissions: Count,
    /// submission lines rejected by sender or subject filter
    pub submissions_filtered: Count,
    /// delivery status records retained
    pub status_lines: Count,
    /// status lines with an outcome not in [`Outcome::KNOWN`]
    pub status_lines_unknown: Count,
    /// lines dropped for a missing field
    pub lines_dropped: Count,
    /// joins dropped for a missing field
    pub joins_dropped: Count,
}

/// Retains and joins the records of one log stream.
#[derive(Debug)]
pub struct Correlator {
    config: CorrelatorConfig,
    submissions: Vec<SubmissionRecord>,
    /// status lines of the single outcome of `OutcomeFilter::Only`
    all_status_lines: Vec<DeliveryStatusRecord>,
    /// status lines by outcome for `OutcomeFilter::All`
    status_lines_by_outcome: BTreeMap<Outcome, Vec<DeliveryStatusRecord>>,
    retained: usize,
    summary: CorrelatorSummary,
}

impl Correlator {
    pub fn new(config: CorrelatorConfig) -> Correlator {
        defñ!("({:?})", config);
        let mut status_lines_by_outcome: BTreeMap<Outcome, Vec<DeliveryStatusRecord>> = BTreeMap::new();
        if config.outcome_filter == OutcomeFilter::All {
            for outcome in Outcome::KNOWN.iter() {
                status_lines_by_outcome.insert(*outcome, Vec::new());
            }
        }

        Correlator {
            config,
            submissions: Vec::new(),
            all_status_lines: Vec::new(),
            status_lines_by_outcome,
            retained: 0,
            summary: CorrelatorSummary::default(),
        }
    }

    pub fn summary(&self) -> CorrelatorSummary {
        self.summary
    }

    pub fn submissions(&self) -> &[SubmissionRecord] {
        self.submissions.as_slice()
    }

    /// Status records retained for `outcome`.
    pub fn status_lines(
        &self,
        outcome: Outcome,
    ) -> &[DeliveryStatusRecord] {
        match self.config.outcome_filter {
            OutcomeFilter::Only(only) if only == outcome => self.all_status_lines.as_slice(),
            OutcomeFilter::Only(_) => &[],
            OutcomeFilter::All => match self.status_lines_by_outcome.get(&outcome) {
                Some(pool) => pool.as_slice(),
                None => &[],
            },
        }
    }

    fn retain_one(&mut self) -> ResultPipeline<()> {
        if self.retained >= self.config.max_records {
            return Err(PipelineError::RecordLimitExceeded {
                limit: self.config.max_records,
            });
        }
        self.retained += 1;

        Ok(())
    }

    /// Classify one line and retain it if it is of interest.
    ///
    /// A missing field drops the line. Only exceeding
    /// [`CorrelatorConfig::max_records`] is an error.
    pub fn process_line(
        &mut self,
        line: &str,
    ) -> ResultPipeline<()> {
        self.summary.lines_processed += 1;

        if is_submission_line(line) {
            if !self.config.submission_passes(line) {
                self.summary.submissions_filtered += 1;
                return Ok(());
            }
            match SubmissionRecord::from_line(line, self.config.prefix_fields) {
                Ok(submission) => {
                    self.retain_one()?;
                    defo!("submission {:?}", submission.message_id);
                    self.submissions.push(submission);
                    self.summary.submissions += 1;
                }
                Err(err) if err.is_recoverable() => {
                    de_wrn!("{}", err);
                    self.summary.lines_dropped += 1;
                }
                Err(err) => {
                    return Err(err);
                }
            }
            return Ok(());
        }

        match self.config.outcome_filter {
            OutcomeFilter::Only(outcome) => {
                if has_outcome_markers(line, outcome) {
                    self.retain_one()?;
                    self.all_status_lines
                        .push(DeliveryStatusRecord::new(outcome, String::from(line)));
                    self.summary.status_lines += 1;
                }
            }
            OutcomeFilter::All => match classify_status_line(line) {
                LineStatus::NotAStatusLine => {}
                LineStatus::StatusLine(Outcome::Unknown) => {
                    defo!("unknown status {:?}", line);
                    self.summary.status_lines_unknown += 1;
                }
                LineStatus::StatusLine(outcome) => {
                    self.retain_one()?;
                    self.status_lines_by_outcome
                        .entry(outcome)
                        .or_default()
                        .push(DeliveryStatusRecord::new(outcome, String::from(line)));
                    self.summary.status_lines += 1;
                }
            },
        }

        Ok(())
    }

    /// Pass each line of `lines` through `gate` then [`process_line`].
    ///
    /// I/O errors from `lines` end processing.
    ///
    /// [`process_line`]: Correlator::process_line
    pub fn process_lines<I>(
        &mut self,
        lines: I,
        gate: &DateGate,
    ) -> ResultPipeline<()>
    where
        I: Iterator<Item = ResultPipeline<LogLine>>,
    {
        defn!("gate {:?}", gate.pattern());
        for line_res in lines {
            let line: LogLine = line_res?;
            if !gate.passes(&line) {
                self.summary.lines_other_date += 1;
                continue;
            }
            self.process_line(line.as_str())?;
        }
        defx!("{:?}", self.summary);

        Ok(())
    }

    /// Join retained submissions to retained status lines.
    ///
    /// Returns [`PipelineError::NoMatchingRecords`] if no submission was
    /// retained.
    pub fn correlate(&mut self) -> ResultPipeline<ResultSets> {
        defn!("{} submissions", self.submissions.len());
        if self.submissions.is_empty() {
            defx!("NoMatchingRecords");
            return Err(PipelineError::NoMatchingRecords);
        }
        let outcomes: Vec<Outcome> = self.config.outcome_filter.outcomes();
        let mut results: ResultSets = ResultSets::new(&outcomes);
        let mut joins_dropped: Count = 0;
        for outcome in outcomes.into_iter() {
            let pool: &[DeliveryStatusRecord] = self.status_lines(outcome);
            joins_dropped += join_pool(&self.submissions, pool, outcome, &mut results)?;
        }
        self.summary.joins_dropped += joins_dropped;
        defx!("total {}, joins_dropped {}", results.total(), joins_dropped);

        Ok(results)
    }
}

/// Join every submission to every record of `pool` mentioning its message
/// id. Returns the count of joins dropped for a missing field.
fn join_pool(
    submissions: &[SubmissionRecord],
    pool: &[DeliveryStatusRecord],
    outcome: Outcome,
    results: &mut ResultSets,
) -> ResultPipeline<Count> {
    let mut dropped: Count = 0;
    for submission in submissions.iter() {
        for status in pool
            .iter()
            .filter(|status| status.mentions(submission.message_id.as_str()))
        {
            match CorrelatedRecord::join(submission, status, outcome) {
                Ok(record) => results.push(record),
                Err(err) if err.is_recoverable() => {
                    de_wrn!("{}", err);
                    dropped += 1;
                }
                Err(err) => {
                    return Err(err);
                }
            }
        }
    }

    Ok(dropped)
}
