// src/tests/mod.rs

//! Tests for _pfslib_.
//!
//! Tests are placed at `src/tests/`, inside the `pfslib`, for crate-internal
//! visibility.

pub mod common;
pub mod segmentresolver_tests;
