// src/readers/segmentresolver.rs

//! Decide which rotated log segments hold the lines of a requested date.
//!
//! The rotation daemon renames the live `mail.log` to `mail.log-YYYYMMDD`
//! stamped with the day it rotates, and compresses it the day after to
//! `mail.log-YYYYMMDD.gz`. So the lines of one calendar day straddle two
//! files on disk:
//!
//! | requested date    | segments                                          |
//! |-------------------|---------------------------------------------------|
//! | today             | the live log                                      |
//! | yesterday         | `mail.log-<today>`, `mail.log-<yesterday>.gz`     |
//! | older             | `mail.log-<date>.gz`, `mail.log-<date + 1>.gz`    |
//! | later than today  | invalid                                           |

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use ::chrono::{Days, NaiveDate};
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

use crate::common::{FPath, FPaths, PipelineError, ResultPipeline, SUFFIX_GZ};
use crate::data::datetime::date_stamp;
use crate::readers::helpers::{basename, path_to_fpath};

/// Base file name of the live Postfix log.
pub const LIVE_LOG_NAME: &str = "mail.log";

/// Segments required for a requested date.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SegmentSelection {
    /// requested date is today; read the live log
    LiveLog,
    /// requested date is in the past; read these segment file names in order
    Rotated(FPaths),
}

/// Presence of one resolved segment in the log directory.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SegmentCheck {
    Present(FPath),
    Missing(FPath),
}

impl SegmentCheck {
    pub const fn is_present(&self) -> bool {
        matches!(self, SegmentCheck::Present(_))
    }
}

/// Resolve segments of [`LIVE_LOG_NAME`].
pub fn resolve_segments(
    requested: NaiveDate,
    today: NaiveDate,
) -> ResultPipeline<SegmentSelection> {
    resolve_segments_named(LIVE_LOG_NAME, requested, today)
}

/// Resolve segments of a live log named `base`.
pub fn resolve_segments_named(
    base: &str,
    requested: NaiveDate,
    today: NaiveDate,
) -> ResultPipeline<SegmentSelection> {
    defn!("({:?}, {:?}, {:?})", base, requested, today);
    if requested > today {
        defx!("requested later than today");
        return Err(PipelineError::InvalidDateRequest {
            date: requested.to_string(),
            reason: String::from("the date is later than today"),
        });
    }
    if requested == today {
        defx!("return LiveLog");
        return Ok(SegmentSelection::LiveLog);
    }
    // `requested < today` so neither can underflow
    let yesterday: Option<NaiveDate> = today.checked_sub_days(Days::new(1));
    let segments: FPaths = if Some(requested) == yesterday {
        vec![
            format!("{}-{}", base, date_stamp(today)),
            format!("{}-{}{}", base, date_stamp(requested), SUFFIX_GZ),
        ]
    } else {
        let next_day: NaiveDate = match requested.checked_add_days(Days::new(1)) {
            Some(val) => val,
            None => {
                return Err(PipelineError::InvalidDateRequest {
                    date: requested.to_string(),
                    reason: String::from("the date is out of range"),
                });
            }
        };
        vec![
            format!("{}-{}{}", base, date_stamp(requested), SUFFIX_GZ),
            format!("{}-{}{}", base, date_stamp(next_day), SUFFIX_GZ),
        ]
    };
    defx!("return Rotated({:?})", segments);

    Ok(SegmentSelection::Rotated(segments))
}

/// File names of the regular files directly inside `log_dir`.
pub fn files_in_log_dir(log_dir: &Path) -> ResultPipeline<BTreeSet<FPath>> {
    defn!("({:?})", log_dir);
    let mut names: BTreeSet<FPath> = BTreeSet::new();
    for entry in walkdir::WalkDir::new(log_dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(val) => val,
            Err(err) => {
                if err.depth() == 0 {
                    let fpath: FPath = path_to_fpath(log_dir);
                    defx!("WalkDir error at root {:?}", err);
                    return Err(PipelineError::Io {
                        path: fpath,
                        err: err
                            .into_io_error()
                            .unwrap_or_else(|| std::io::Error::new(std::io::ErrorKind::Other, "walkdir error")),
                    });
                }
                defo!("skip entry error {:?}", err);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            defo!("skip non-file {:?}", entry.path());
            continue;
        }
        names.insert(basename(&path_to_fpath(entry.path())));
    }
    if names.is_empty() {
        defx!("no files");
        return Err(PipelineError::EmptyLogDirectory {
            log_dir: path_to_fpath(log_dir),
        });
    }
    defx!("return {} names", names.len());

    Ok(names)
}

/// Check each resolved segment name against the files in `log_dir`.
///
/// Order of `segments` is kept. Present segments carry their full path.
pub fn check_segments(
    log_dir: &Path,
    segments: &[FPath],
) -> ResultPipeline<Vec<SegmentCheck>> {
    let present: BTreeSet<FPath> = files_in_log_dir(log_dir)?;
    let checks: Vec<SegmentCheck> = segments
        .iter()
        .map(|name| {
            if present.contains(name) {
                let path: PathBuf = log_dir.join(name);
                SegmentCheck::Present(path_to_fpath(&path))
            } else {
                SegmentCheck::Missing(name.clone())
            }
        })
        .collect();
    defñ!("return {:?}", checks);

    Ok(checks)
}
