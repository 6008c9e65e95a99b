// src/lib.rs

//! _pfslib_ extracts delivery outcomes from Postfix mail logs.
//!
//! Submission lines (`cleanup` ... `from=<…>` ... `Subject: …`) are joined
//! by message id to delivery status lines (`to=<…>` ... `dsn=` ...
//! `status=…`) and the joined records are bucketed as sent, bounced,
//! deferred, or rejected.
//!
//! Also see [_Overview of readers_] and [_Definitions of data_].
//!
//! [_Overview of readers_]: crate::readers
//! [_Definitions of data_]: crate::data

pub mod common;
pub mod data;
pub mod debug;
pub mod printer;
pub mod readers;
#[cfg(test)]
pub mod tests;
