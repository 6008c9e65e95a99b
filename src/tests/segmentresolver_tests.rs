// src/tests/segmentresolver_tests.rs

//! tests for `segmentresolver.rs` functions

#![allow(non_snake_case)]

use std::collections::BTreeSet;

use ::chrono::NaiveDate;

use crate::common::{FPath, PipelineError};
use crate::debug::helpers::{create_temp_log_dir, TempDir};
use crate::readers::helpers::path_to_fpath;
use crate::readers::segmentresolver::{
    check_segments,
    files_in_log_dir,
    resolve_segments,
    resolve_segments_named,
    SegmentCheck,
    SegmentSelection,
};
use crate::tests::common::ymd;

use ::test_case::test_case;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[test_case(
    ymd(2024, 7, 27), ymd(2024, 7, 28),
    &["mail.log-20240728", "mail.log-20240727.gz"];
    "yesterday"
)]
#[test_case(
    ymd(2024, 7, 20), ymd(2024, 7, 28),
    &["mail.log-20240720.gz", "mail.log-20240721.gz"];
    "older"
)]
#[test_case(
    ymd(2024, 2, 29), ymd(2024, 3, 1),
    &["mail.log-20240301", "mail.log-20240229.gz"];
    "yesterday across month"
)]
#[test_case(
    ymd(2023, 12, 31), ymd(2024, 1, 5),
    &["mail.log-20231231.gz", "mail.log-20240101.gz"];
    "older across year"
)]
fn test_resolve_segments_rotated(requested: NaiveDate, today: NaiveDate, expect: &[&str]) {
    let expect: Vec<FPath> = expect.iter().map(|s| FPath::from(*s)).collect();
    assert_eq!(resolve_segments(requested, today).unwrap(), SegmentSelection::Rotated(expect));
}

#[test]
fn test_resolve_segments_today() {
    let today: NaiveDate = ymd(2024, 7, 28);
    assert_eq!(resolve_segments(today, today).unwrap(), SegmentSelection::LiveLog);
}

#[test]
fn test_resolve_segments_later_than_today() {
    match resolve_segments(ymd(2024, 7, 29), ymd(2024, 7, 28)) {
        Err(PipelineError::InvalidDateRequest { .. }) => {}
        other => panic!("expected InvalidDateRequest, got {:?}", other),
    }
}

#[test]
fn test_resolve_segments_named() {
    let selection = resolve_segments_named("maillog", ymd(2024, 7, 1), ymd(2024, 7, 28)).unwrap();
    assert_eq!(
        selection,
        SegmentSelection::Rotated(vec![
            FPath::from("maillog-20240701.gz"),
            FPath::from("maillog-20240702.gz"),
        ])
    );
}

#[test]
fn test_files_in_log_dir() {
    let dir: TempDir = create_temp_log_dir(&[
        ("mail.log", "a\n"),
        ("mail.log-20240728", "b\n"),
        ("mail.log-20240727.gz", "c\n"),
    ]);
    std::fs::create_dir(dir.path().join("subdir")).unwrap();
    let names: BTreeSet<FPath> = files_in_log_dir(dir.path()).unwrap();
    let expect: BTreeSet<FPath> = ["mail.log", "mail.log-20240727.gz", "mail.log-20240728"]
        .iter()
        .map(|s| FPath::from(*s))
        .collect();
    assert_eq!(names, expect);
}

#[test]
fn test_files_in_log_dir_empty() {
    let dir: TempDir = create_temp_log_dir(&[]);
    match files_in_log_dir(dir.path()) {
        Err(PipelineError::EmptyLogDirectory { log_dir }) => {
            assert_eq!(log_dir, path_to_fpath(dir.path()));
        }
        other => panic!("expected EmptyLogDirectory, got {:?}", other),
    }
}

#[test]
fn test_files_in_log_dir_not_exist() {
    let dir: TempDir = create_temp_log_dir(&[]);
    let gone = dir.path().join("does-not-exist");
    match files_in_log_dir(gone.as_path()) {
        Err(PipelineError::Io { .. }) => {}
        other => panic!("expected Io, got {:?}", other),
    }
}

#[test]
fn test_check_segments() {
    let dir: TempDir = create_temp_log_dir(&[
        ("mail.log-20240728", "b\n"),
        ("other.log", "x\n"),
    ]);
    let segments: Vec<FPath> = vec![
        FPath::from("mail.log-20240728"),
        FPath::from("mail.log-20240727.gz"),
    ];
    let checks: Vec<SegmentCheck> = check_segments(dir.path(), &segments).unwrap();
    assert_eq!(
        checks,
        vec![
            SegmentCheck::Present(path_to_fpath(&dir.path().join("mail.log-20240728"))),
            SegmentCheck::Missing(FPath::from("mail.log-20240727.gz")),
        ]
    );
    assert!(checks[0].is_present());
    assert!(!checks[1].is_present());
}
