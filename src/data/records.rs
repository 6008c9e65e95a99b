// src/data/records.rs

//! Records retained from classified lines, and the [`CorrelatedRecord`]
//! produced by joining them.

use crate::common::ResultPipeline;
use crate::data::fields::{
    extract_host_message,
    extract_line_date,
    extract_message_id_at,
    extract_receiver,
    extract_sender,
    extract_subject,
};
use crate::data::line::Outcome;

/// A message accepted for delivery, from a `cleanup` line.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SubmissionRecord {
    pub message_id: String,
    pub sender: String,
    pub subject: String,
    pub raw_line: String,
}

impl SubmissionRecord {
    /// Parse a line already known to be a submission line.
    pub fn from_line(
        line: &str,
        prefix_fields: usize,
    ) -> ResultPipeline<SubmissionRecord> {
        Ok(SubmissionRecord {
            message_id: extract_message_id_at(line, prefix_fields)?,
            sender: extract_sender(line)?,
            subject: extract_subject(line)?,
            raw_line: String::from(line),
        })
    }
}

/// A delivery attempt, from a `status=` line.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DeliveryStatusRecord {
    pub outcome: Outcome,
    pub raw_line: String,
}

impl DeliveryStatusRecord {
    pub fn new(
        outcome: Outcome,
        raw_line: String,
    ) -> DeliveryStatusRecord {
        DeliveryStatusRecord { outcome, raw_line }
    }

    /// Message ids are matched as substrings of the whole line, not as a
    /// delimited token.
    pub fn mentions(
        &self,
        message_id: &str,
    ) -> bool {
        self.raw_line.contains(message_id)
    }
}

/// One submission joined to one delivery status line.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CorrelatedRecord {
    pub date: String,
    pub sender: String,
    pub receiver: String,
    pub message_id: String,
    pub subject: String,
    pub host_message: String,
    pub outcome: Outcome,
}

impl CorrelatedRecord {
    /// Join; fails if the status line lacks a receiver, date, or host
    /// message for `outcome`.
    pub fn join(
        submission: &SubmissionRecord,
        status: &DeliveryStatusRecord,
        outcome: Outcome,
    ) -> ResultPipeline<CorrelatedRecord> {
        let line: &str = status.raw_line.as_str();

        Ok(CorrelatedRecord {
            date: extract_line_date(line)?,
            sender: submission.sender.clone(),
            receiver: extract_receiver(line)?,
            message_id: submission.message_id.clone(),
            subject: submission.subject.clone(),
            host_message: extract_host_message(line, outcome.as_str())?,
            outcome,
        })
    }

    /// Field values in output column order.
    pub fn fields(&self) -> [&str; 6] {
        [
            self.date.as_str(),
            self.sender.as_str(),
            self.receiver.as_str(),
            self.message_id.as_str(),
            self.subject.as_str(),
            self.host_message.as_str(),
        ]
    }
}
