// src/bin/pfstats.rs

//! Driver program _pfstats_ drives the [_pfslib_].
//!
//! Processes user-passed command-line arguments, validates them, then
//! chooses the log input. For today's date that is the live log. For a
//! past date and the default live log, the rotated segments of the log
//! directory covering that date are read instead, see
//! [`resolve_segments`].
//!
//! The lines of the date are correlated by [`run_pipeline`]. One delimited
//! file per outcome is written to the output directory, then a results
//! table is printed.
//!
//! [_pfslib_]: pfslib
//! [`resolve_segments`]: pfslib::readers::segmentresolver::resolve_segments
//! [`run_pipeline`]: pfslib::readers::pipeline::run_pipeline

#![allow(non_camel_case_types)]

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use ::anyhow::Context;
use ::chrono::{Local, NaiveDate};
use ::clap::{Parser, ValueEnum};
use ::const_format::concatcp;
use ::rand::Rng;
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

use ::pfslib::common::{
    FPath,
    PipelineError,
    LOG_DIR_DEFAULT,
    LOG_FILE_DEFAULT,
    OUTPUT_DELIMITER_DEFAULT,
};
use ::pfslib::data::datetime::{parse_requested_date, syslog_date_text};
use ::pfslib::data::fields::PREFIX_FIELDS_DEFAULT;
use ::pfslib::data::line::{Outcome, OutcomeFilter};
use ::pfslib::data::resultset::ResultSets;
use ::pfslib::debug::printers::{e_err, e_wrn};
use ::pfslib::printer::summary::{
    print_elapsed,
    print_results,
    print_summary,
    ColorChoice,
    StandardStream,
};
use ::pfslib::printer::writer::{write_outcome_file, WriteSummary};
use ::pfslib::readers::correlator::{CorrelatorConfig, MAX_RECORDS_DEFAULT};
use ::pfslib::readers::helpers::{basename, fpath_to_path};
use ::pfslib::readers::pipeline::{plan_input, run_pipeline, InputPlan, PipelineOutput};

// --------------------
// command-line parsing

/// Output file numbers are drawn from this range.
const OUTPUT_NUMBER_MIN: u32 = 100000;
const OUTPUT_NUMBER_MAX: u32 = 999990;

/// CLI enum that maps to [`termcolor::ColorChoice`].
///
/// [`termcolor::ColorChoice`]: https://docs.rs/termcolor/1.4.1/termcolor/enum.ColorChoice.html
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    ValueEnum, // from `clap`
)]
enum CLI_Color_Choice {
    always,
    auto,
    never,
}

const CLI_HELP_AFTER: &str = concatcp!(
    "Example, find bounced mail from one sender on July 26:

    pfstats -d 'Jul 26' -t bounced -s 'info@example.com'

The date is formatted like the Postfix log, \"Jan 20\" or \"Jan  2\", or
is an ISO date \"2024-01-20\".
For a date other than today with the default log file ",
    LOG_FILE_DEFAULT,
    ",
the rotated log files of LOG_DIR are read, including compressed `.gz` files.

Message id matching is by substring; a message id that is a substring of
another message id will match both.
"
);

/// Note:
/// * the `about` is taken from `Cargo.toml:[package]:description`.
#[derive(Parser, Debug)]
#[clap(
    about = env!("CARGO_PKG_DESCRIPTION"),
    author = env!("CARGO_PKG_AUTHORS"),
    name = "pfstats",
    // write expanded information for the `--version` output
    version = concatcp!(
        "\n",
        "Version: ",
        env!("CARGO_PKG_VERSION_MAJOR"), ".",
        env!("CARGO_PKG_VERSION_MINOR"), ".",
        env!("CARGO_PKG_VERSION_PATCH"), "\n",
        "MSRV: ", env!("CARGO_PKG_RUST_VERSION"), "\n",
        "License: ", env!("CARGO_PKG_LICENSE"), "\n",
        "Author: ", env!("CARGO_PKG_AUTHORS"), "\n",
    ),
    after_help = CLI_HELP_AFTER,
    verbatim_doc_comment,
)]
struct CLI_Args {
    /// Date of the log lines to process. Default is today.
    /// Format: "Jan 20" (one space), "Jan  2" (two spaces), or "2024-01-20".
    #[clap(
        short = 'd',
        long,
        verbatim_doc_comment,
    )]
    date: Option<String>,

    /// Type of email status: bounced, deferred, sent, rejected, or all.
    #[clap(
        short = 't',
        long = "type",
        verbatim_doc_comment,
        value_parser = cli_process_outcome_filter,
        default_value = "all",
    )]
    outcome_type: OutcomeFilter,

    /// Only process mail with this sender address.
    #[clap(
        short = 's',
        long,
        verbatim_doc_comment,
    )]
    sender: Option<String>,

    /// Only process mail with this subject message.
    /// The Postfix log format must log the Subject header for this option
    /// to work.
    #[clap(
        short = 'm',
        long,
        verbatim_doc_comment,
    )]
    message: Option<String>,

    /// The log file to use.
    #[clap(
        short = 'l',
        long,
        verbatim_doc_comment,
        default_value = LOG_FILE_DEFAULT,
    )]
    log: String,

    /// The log directory of rotated log files.
    #[clap(
        long = "log-dir",
        verbatim_doc_comment,
        default_value = LOG_DIR_DEFAULT,
    )]
    log_dir: String,

    /// Directory of the generated file(s).
    /// Default is the current working directory.
    #[clap(
        long = "output-directory",
        verbatim_doc_comment,
    )]
    output_directory: Option<String>,

    /// Field delimiter of the generated file(s).
    #[clap(
        long = "output-delimiter",
        verbatim_doc_comment,
        value_parser = cli_process_delimiter,
        default_value = OUTPUT_DELIMITER_DEFAULT,
    )]
    output_delimiter: String,

    /// File name extension of the generated file(s).
    #[clap(
        long = "output-filetype",
        verbatim_doc_comment,
        default_value = "csv",
    )]
    output_filetype: String,

    /// Count of syslog fields preceding the message id on each line.
    /// The standard prefix is month, day, time, host, and process.
    #[clap(
        long = "prefix-fields",
        verbatim_doc_comment,
        default_value_t = PREFIX_FIELDS_DEFAULT,
    )]
    prefix_fields: usize,

    /// Most log lines held in memory for correlation.
    #[clap(
        long = "max-records",
        verbatim_doc_comment,
        default_value_t = MAX_RECORDS_DEFAULT,
    )]
    max_records: usize,

    /// Choose to print to terminal using colors.
    #[clap(
        required = false,
        short = 'c',
        long = "color",
        verbatim_doc_comment,
        value_enum,
        default_value_t = CLI_Color_Choice::auto,
    )]
    color_choice: CLI_Color_Choice,

    /// Print a summary of files and lines processed to stderr.
    #[clap(
        long,
        verbatim_doc_comment,
    )]
    summary: bool,
}

/// `clap` argument processor for `--type`.
fn cli_process_outcome_filter(value: &str) -> std::result::Result<OutcomeFilter, String> {
    value
        .parse::<OutcomeFilter>()
        .map_err(|err| err.to_string())
}

/// `clap` argument processor for `--output-delimiter`.
fn cli_process_delimiter(value: &str) -> std::result::Result<String, String> {
    if value.is_empty() {
        return Err(String::from("delimiter must not be empty"));
    }
    if value.contains('\n') {
        return Err(String::from("delimiter must not contain a newline"));
    }

    Ok(String::from(value))
}

/// Validated user-passed arguments.
#[derive(Debug)]
struct CLI_Config {
    requested: NaiveDate,
    today: NaiveDate,
    log_file: FPath,
    log_dir: PathBuf,
    output_directory: PathBuf,
    output_delimiter: String,
    output_filetype: String,
    color_choice: ColorChoice,
    summary: bool,
    correlator: CorrelatorConfig,
}

/// Process user-passed CLI argument strings into expected types.
///
/// Returns `Err` with a message for the user.
fn cli_process_args(args: CLI_Args) -> std::result::Result<CLI_Config, String> {
    defn!("{:?}", args);
    let today: NaiveDate = Local::now().date_naive();

    if !fpath_to_path(&args.log).is_file() {
        return Err(format!("Provided log file does not exist: {}", args.log));
    }
    let log_dir: PathBuf = PathBuf::from(&args.log_dir);
    if !log_dir.is_dir() {
        return Err(format!(
            "This log directory does not exist in this system: {}\nMaybe provide a different log dir with --log-dir",
            args.log_dir
        ));
    }
    let output_directory: PathBuf = match args.output_directory {
        Some(dir) => PathBuf::from(dir),
        None => match std::env::current_dir() {
            Ok(val) => val,
            Err(err) => {
                return Err(format!("Cannot determine the current working directory: {}", err));
            }
        },
    };
    if !output_directory.is_dir() {
        return Err(format!(
            "Generated output file(s) directory does not exist: {}",
            output_directory.display()
        ));
    }

    let date: String = args
        .date
        .unwrap_or_else(|| syslog_date_text(today));
    let requested: NaiveDate = parse_requested_date(&date, today).map_err(|err| err.to_string())?;
    defo!("requested {:?}, today {:?}", requested, today);

    let color_choice: ColorChoice = match args.color_choice {
        CLI_Color_Choice::always => ColorChoice::Always,
        CLI_Color_Choice::auto => ColorChoice::Auto,
        CLI_Color_Choice::never => ColorChoice::Never,
    };

    let correlator = CorrelatorConfig {
        outcome_filter: args.outcome_type,
        sender: args.sender,
        subject: args.message,
        prefix_fields: args.prefix_fields,
        max_records: args.max_records,
    };
    defx!();

    Ok(CLI_Config {
        requested,
        today,
        log_file: args.log,
        log_dir,
        output_directory,
        output_delimiter: args.output_delimiter,
        output_filetype: args.output_filetype,
        color_choice,
        summary: args.summary,
        correlator,
    })
}

/// Write one file per outcome. Returns the base name of each file written.
fn write_outputs(
    results: &ResultSets,
    config: &CLI_Config,
) -> anyhow::Result<BTreeMap<Outcome, FPath>> {
    let number: u32 = rand::rng().random_range(OUTPUT_NUMBER_MIN..=OUTPUT_NUMBER_MAX);
    defn!("number {}", number);
    let mut files: BTreeMap<Outcome, FPath> = BTreeMap::new();
    for (outcome, set) in results.iter() {
        let (fpath, write_summary): (FPath, WriteSummary) = write_outcome_file(
            &config.output_directory,
            outcome,
            number,
            &config.output_filetype,
            set,
            &config.output_delimiter,
        )
        .with_context(|| format!("failed writing {} results", outcome))?;
        if write_summary.ambiguous_rows != 0 {
            e_wrn!(
                "{} row(s) of {} have a field containing the delimiter {:?} and cannot be read back reliably",
                write_summary.ambiguous_rows,
                fpath,
                config.output_delimiter,
            );
        }
        files.insert(outcome, basename(&fpath));
    }
    defx!("{:?}", files);

    Ok(files)
}

/// Run one invocation after arguments are validated.
fn processing(config: &CLI_Config) -> anyhow::Result<bool> {
    let start_time = Instant::now();
    let use_rotated: bool = config.requested != config.today && config.log_file == LOG_FILE_DEFAULT;
    let plan: InputPlan = match plan_input(
        &config.log_file,
        use_rotated,
        &config.log_dir,
        config.requested,
        config.today,
    ) {
        Ok(val) => val,
        Err(err) => {
            e_err!("{}", err);
            return Ok(false);
        }
    };
    for name in plan.missing.iter() {
        e_wrn!("{}", PipelineError::SegmentMissing { segment: name.clone() });
    }
    let source: String = plan.paths.join(", ");

    let output: PipelineOutput = match run_pipeline(plan.paths, config.requested, config.correlator.clone()) {
        Ok(val) => val,
        Err(PipelineError::NoMatchingRecords) => {
            e_err!("{} in log file ({}). Exiting...", PipelineError::NoMatchingRecords, source);
            return Ok(false);
        }
        Err(err) => {
            e_err!("{}", err);
            return Ok(false);
        }
    };

    for segment in output.segments_missing.iter() {
        e_wrn!("{}", PipelineError::SegmentMissing { segment: segment.clone() });
    }

    let files: BTreeMap<Outcome, FPath> = write_outputs(&output.results, config)?;

    let mut stdout: StandardStream = StandardStream::stdout(config.color_choice);
    print_results(&mut stdout, &output.results, &files).context("failed printing results")?;
    if config.summary {
        let mut missing = plan.missing.clone();
        missing.extend(output.segments_missing.iter().cloned());
        print_summary(
            &mut std::io::stderr(),
            &output.summary,
            &output.segments_read,
            &missing,
            output.lines_read,
        )
        .context("failed printing summary")?;
    }
    print_elapsed(&mut stdout, start_time.elapsed()).context("failed printing elapsed time")?;

    Ok(true)
}

/// Process the user-passed command-line arguments.
/// Start function `processing`.
/// Determine a process return code.
pub fn main() -> ExitCode {
    defn!();
    let args: CLI_Args = CLI_Args::parse();
    let config: CLI_Config = match cli_process_args(args) {
        Ok(val) => val,
        Err(err) => {
            e_err!("{}", err);
            return ExitCode::FAILURE;
        }
    };
    defo!("output to {:?}", config.output_directory);

    let exitcode: ExitCode = match processing(&config) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            e_err!("{:#}", err);
            ExitCode::FAILURE
        }
    };
    defx!("exitcode {:?}", exitcode);

    exitcode
}
