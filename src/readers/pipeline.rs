// src/readers/pipeline.rs

//! Drive one invocation: choose the input segments, stream them through the
//! [`DateGate`] into a [`Correlator`], and correlate.

use std::path::Path;

use ::chrono::NaiveDate;
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

use crate::common::{Count, FPath, FPaths, PipelineError, ResultPipeline};
use crate::data::datetime::DateGate;
use crate::data::resultset::ResultSets;
use crate::readers::correlator::{Correlator, CorrelatorConfig, CorrelatorSummary};
use crate::readers::segmentreader::SegmentReader;
use crate::readers::segmentresolver::{check_segments, resolve_segments, SegmentCheck, SegmentSelection};

/// Input segments chosen for an invocation.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct InputPlan {
    /// paths to read, in order
    pub paths: FPaths,
    /// resolved segment names absent from the log directory
    pub missing: FPaths,
}

/// Choose the input for `requested`.
///
/// With `use_rotated` and a past date, the rotated segments of `log_dir`
/// are used; otherwise `log_file` alone. Every rotated segment missing is
/// [`PipelineError::NoSegmentsFound`].
pub fn plan_input(
    log_file: &FPath,
    use_rotated: bool,
    log_dir: &Path,
    requested: NaiveDate,
    today: NaiveDate,
) -> ResultPipeline<InputPlan> {
    defn!("({:?}, {}, {:?}, {:?}, {:?})", log_file, use_rotated, log_dir, requested, today);
    let selection: SegmentSelection = resolve_segments(requested, today)?;
    let names: FPaths = match selection {
        SegmentSelection::Rotated(names) if use_rotated => names,
        SegmentSelection::Rotated(_) | SegmentSelection::LiveLog => {
            defx!("return single {:?}", log_file);
            return Ok(InputPlan {
                paths: vec![log_file.clone()],
                missing: FPaths::new(),
            });
        }
    };
    let mut plan: InputPlan = InputPlan::default();
    for check in check_segments(log_dir, &names)?.into_iter() {
        match check {
            SegmentCheck::Present(path) => plan.paths.push(path),
            SegmentCheck::Missing(name) => plan.missing.push(name),
        }
    }
    if plan.paths.is_empty() {
        defx!("NoSegmentsFound");
        return Err(PipelineError::NoSegmentsFound { segments: names });
    }
    defx!("return {:?}", plan);

    Ok(plan)
}

/// Everything one invocation produced.
#[derive(Clone, Debug)]
pub struct PipelineOutput {
    pub results: ResultSets,
    pub summary: CorrelatorSummary,
    pub segments_read: FPaths,
    pub segments_missing: FPaths,
    pub lines_read: Count,
}

/// Stream `paths` through a date gate for `requested` and correlate.
pub fn run_pipeline(
    paths: FPaths,
    requested: NaiveDate,
    config: CorrelatorConfig,
) -> ResultPipeline<PipelineOutput> {
    defn!("({:?}, {:?})", paths, requested);
    let gate: DateGate = DateGate::new(requested);
    let mut reader: SegmentReader = SegmentReader::new(paths);
    let mut correlator: Correlator = Correlator::new(config);
    correlator.process_lines(&mut reader, &gate)?;
    let results: ResultSets = correlator.correlate()?;
    let segments_missing: FPaths = reader.segments_missing().to_vec();
    let segments_read: FPaths = reader
        .paths()
        .iter()
        .filter(|path| !segments_missing.contains(path))
        .cloned()
        .collect();
    defx!("total {}", results.total());

    Ok(PipelineOutput {
        results,
        summary: correlator.summary(),
        segments_read,
        segments_missing,
        lines_read: reader.lines_read(),
    })
}
