// tests/pipeline_tests.rs

//! End-to-end run over a log directory of rotated segments, through the
//! public API of `pfslib`: plan the input, correlate, write one file per
//! outcome, and read the files back.

#![allow(non_snake_case)]

extern crate pfslib;

use std::io::Write;

use ::chrono::NaiveDate;
use ::flate2::write::GzEncoder;
use ::flate2::Compression;
use ::tempfile::TempDir;

use pfslib::common::{FPath, LOG_FILE_DEFAULT, OUTPUT_DELIMITER_DEFAULT};
use pfslib::data::line::{Outcome, OutcomeFilter};
use pfslib::printer::writer::{parse_rows, write_outcome_file, WriteSummary};
use pfslib::readers::correlator::CorrelatorConfig;
use pfslib::readers::pipeline::{plan_input, run_pipeline, InputPlan, PipelineOutput};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

const SEGMENT_OLDER: &str = "\
Jul 19 23:59:58 mx1 postfix/smtp[9]: OLD999: to=<x@example.org>, dsn=2.0.0, status=sent (250 ok)
Jul 20 09:00:00 mx1 postfix/cleanup[10]: QQ1001: warning: header Subject: Invoice 7 from mx1[10.0.0.1]; from=<billing@example.com> to=<a@example.org> proto=ESMTP
Jul 20 09:00:01 mx1 postfix/smtp[11]: QQ1001: to=<a@example.org>, relay=mx[10.0.0.2]:25, dsn=2.0.0, status=sent (250 2.0.0 queued; id 77)
Jul 20 09:00:02 mx1 postfix/smtp[11]: QQ1001: to=<b@example.org>, relay=mx[10.0.0.2]:25, dsn=5.1.1, status=bounced (550 5.1.1 no such user)
";

const SEGMENT_NEWER: &str = "\
Jul 20 23:10:00 mx1 postfix/cleanup[12]: QQ2002: warning: header Subject: Newsletter from mx1[10.0.0.1]; from=<news@example.com> to=<c@example.org> proto=ESMTP
Jul 20 23:10:30 mx1 postfix/smtp[13]: QQ2002: to=<c@example.org>, relay=none, dsn=4.4.1, status=deferred (connection timed out)
Jul 20 23:11:00 mx1 postfix/smtpd[14]: NOQUEUE: reject: RCPT from client[10.0.0.9]: 554 5.7.1 denied; from=<spam@example.net> to=<d@example.org>
Jul 21 00:00:01 mx1 postfix/smtp[15]: QQ1001: to=<e@example.org>, dsn=2.0.0, status=sent (250 late)
";

fn gz_bytes(data: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

fn create_log_dir() -> TempDir {
    let dir: TempDir = ::tempfile::Builder::new()
        .prefix("tmp-pfstats-test-")
        .tempdir()
        .unwrap();
    std::fs::write(dir.path().join("mail.log-20240720.gz"), gz_bytes(SEGMENT_OLDER.as_bytes())).unwrap();
    std::fs::write(dir.path().join("mail.log-20240721.gz"), gz_bytes(SEGMENT_NEWER.as_bytes())).unwrap();

    dir
}

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

#[test]
fn test_rotated_segments_to_files() {
    let log_dir: TempDir = create_log_dir();
    let out_dir: TempDir = ::tempfile::Builder::new()
        .prefix("tmp-pfstats-test-")
        .tempdir()
        .unwrap();
    let requested: NaiveDate = ymd(2024, 7, 20);
    let today: NaiveDate = ymd(2024, 7, 28);

    let plan: InputPlan = plan_input(&FPath::from(LOG_FILE_DEFAULT), true, log_dir.path(), requested, today).unwrap();
    assert_eq!(plan.paths.len(), 2);
    assert!(plan.missing.is_empty());

    let output: PipelineOutput = run_pipeline(plan.paths, requested, CorrelatorConfig::default()).unwrap();
    assert_eq!(output.lines_read, 8);
    assert_eq!(output.summary.lines_other_date, 2);
    assert_eq!(output.results.count(Outcome::Sent), 1);
    assert_eq!(output.results.count(Outcome::Bounced), 1);
    assert_eq!(output.results.count(Outcome::Deferred), 1);
    assert_eq!(output.results.count(Outcome::Rejected), 0);

    for (outcome, set) in output.results.iter() {
        let (fpath, summary): (FPath, WriteSummary) =
            write_outcome_file(out_dir.path(), outcome, 123456, "csv", set, OUTPUT_DELIMITER_DEFAULT).unwrap();
        assert!(fpath.ends_with(&format!("{}-123456.csv", outcome)));
        assert_eq!(summary.rows, set.count());
        assert_eq!(summary.ambiguous_rows, 0);
        let text: String = std::fs::read_to_string(&fpath).unwrap();
        let parsed = parse_rows(text.as_str(), OUTPUT_DELIMITER_DEFAULT, outcome).unwrap();
        assert_eq!(parsed.as_slice(), set.records());
    }

    let sent = &output.results.records(Outcome::Sent)[0];
    assert_eq!(sent.date, "Jul 20");
    assert_eq!(sent.sender, "billing@example.com");
    assert_eq!(sent.subject, "Invoice 7");
    assert_eq!(sent.host_message, "(250 2.0.0 queued; id 77)");
}

#[test]
fn test_rotated_segments_only_deferred_with_sender() {
    let log_dir: TempDir = create_log_dir();
    let requested: NaiveDate = ymd(2024, 7, 20);
    let plan: InputPlan =
        plan_input(&FPath::from(LOG_FILE_DEFAULT), true, log_dir.path(), requested, ymd(2024, 7, 28)).unwrap();
    let mut config: CorrelatorConfig = CorrelatorConfig::new(OutcomeFilter::Only(Outcome::Deferred));
    config.sender = Some(String::from("news@example.com"));
    let output: PipelineOutput = run_pipeline(plan.paths, requested, config).unwrap();
    assert_eq!(output.results.outcomes(), vec![Outcome::Deferred]);
    let deferred = output.results.records(Outcome::Deferred);
    assert_eq!(deferred.len(), 1);
    assert_eq!(deferred[0].receiver, "c@example.org");
    assert_eq!(deferred[0].message_id, "QQ2002");
}
