// src/readers/mod.rs

//! "Readers" for _pfslib_.
//!
//! ## Overview of readers
//!
//! * [`resolve_segments`] decides which log segment files hold a date.
//! * A [`SegmentReader`] streams the lines of those segments in order,
//!   decompressing `.gz` segments.
//! * A [`Correlator`] retains the lines of interest passing a [`DateGate`]
//!   and joins them into [`ResultSets`].
//! * [`run_pipeline`] drives the above for one invocation.
//!
//! [`resolve_segments`]: crate::readers::segmentresolver::resolve_segments
//! [`SegmentReader`]: crate::readers::segmentreader::SegmentReader
//! [`Correlator`]: crate::readers::correlator::Correlator
//! [`DateGate`]: crate::data::datetime::DateGate
//! [`ResultSets`]: crate::data::resultset::ResultSets
//! [`run_pipeline`]: crate::readers::pipeline::run_pipeline

pub mod correlator;
pub mod helpers;
pub mod pipeline;
pub mod segmentreader;
pub mod segmentresolver;
