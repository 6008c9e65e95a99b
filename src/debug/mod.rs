// src/debug/mod.rs

//! The `debug` module is functions for printing warnings and errors, and
//! helpers for test builds.

#[cfg(test)]
pub mod helpers;

pub mod printers;
