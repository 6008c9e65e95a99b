// src/printer/mod.rs

//! Output of results: delimited files per outcome, and the results table
//! printed on the terminal.

pub mod summary;
pub mod writer;
