// src/data/mod.rs

//! The `data` module is specialized data containers and the pure functions
//! that derive them from log lines.
//!
//! ## Definitions of data
//!
//! ### Line
//!
//! A "line" is one line of a Postfix log, represented by a [`LogLine`].
//! It begins with a syslog prefix of five fields, month, day, time, host,
//! and process, followed by the queue id, e.g.
//! `Jul 26 10:00:01 mx1 postfix/smtp[4243]: ABC123: …`.
//!
//! ### Submission
//!
//! A "submission" line marks a message accepted for delivery. It holds the
//! sender and subject. Represented by a [`SubmissionRecord`].
//!
//! ### Delivery status
//!
//! A "delivery status" line marks the outcome of one delivery attempt. It
//! holds the receiver, the [`Outcome`], and the remote host's message.
//! Represented by a [`DeliveryStatusRecord`].
//!
//! ### Correlated record
//!
//! A submission and a delivery status line sharing a message id, joined.
//! Represented by a [`CorrelatedRecord`] and collected in [`ResultSets`].
//!
//! [`LogLine`]: crate::data::line::LogLine
//! [`Outcome`]: crate::data::line::Outcome
//! [`SubmissionRecord`]: crate::data::records::SubmissionRecord
//! [`DeliveryStatusRecord`]: crate::data::records::DeliveryStatusRecord
//! [`CorrelatedRecord`]: crate::data::records::CorrelatedRecord
//! [`ResultSets`]: crate::data::resultset::ResultSets

pub mod datetime;
pub mod fields;
pub mod line;
pub mod records;
pub mod resultset;
