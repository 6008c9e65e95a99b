// src/common.rs
//
// common imports, type aliases, and other globals (avoids circular imports)

//! Common type aliases, constants, and the [`PipelineError`] type shared by
//! all modules of _pfslib_.

use std::fmt;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// file-handling
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

pub use std::fs::File;
pub use std::path::Path;

// TODO: use `std::path::PathBuf` for `FPath`
/// `F`ake `Path` or `F`ile `Path`
pub type FPath = String;
pub type FPaths = Vec<FPath>;

/// general counting type
pub type Count = u64;

/// File name suffix of compressed log segments.
pub const SUFFIX_GZ: &str = ".gz";

/// Default live Postfix log file.
pub const LOG_FILE_DEFAULT: &str = "/var/log/postfix/mail.log";

/// Default Postfix log directory holding rotated segments.
pub const LOG_DIR_DEFAULT: &str = "/var/log/postfix/";

/// Default output field delimiter.
pub const OUTPUT_DELIMITER_DEFAULT: &str = ";";

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// errors
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// The named fields that may be extracted from a log line.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Field {
    Receiver,
    Sender,
    Subject,
    Status,
    HostMessage,
    MessageId,
    LineDate,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name: &str = match self {
            Field::Receiver => "receiver",
            Field::Sender => "sender",
            Field::Subject => "subject",
            Field::Status => "status",
            Field::HostMessage => "host_message",
            Field::MessageId => "message_id",
            Field::LineDate => "date",
        };
        write!(f, "{}", name)
    }
}

/// Errors of the log processing pipeline.
///
/// `FieldNotFound` and `SegmentMissing` are recoverable; the line or segment
/// is dropped and processing continues. All other variants terminate an
/// invocation.
#[derive(Debug)]
pub enum PipelineError {
    /// an expected marker is absent from a line
    FieldNotFound { field: Field, line: String },
    /// requested date does not parse or is later than today
    InvalidDateRequest { date: String, reason: String },
    /// a resolved segment file is not in the log directory
    SegmentMissing { segment: FPath },
    /// every resolved segment is missing
    NoSegmentsFound { segments: FPaths },
    /// the log directory holds no files
    EmptyLogDirectory { log_dir: FPath },
    /// no submission line passed the filters
    NoMatchingRecords,
    /// more records were retained than allowed
    RecordLimitExceeded { limit: usize },
    /// outcome selector is not one of the known keywords or `all`
    InvalidOutcome { value: String },
    /// a written output row that cannot be read back
    MalformedRow { row: String, reason: String },
    /// I/O failure with the path involved
    Io { path: FPath, err: std::io::Error },
}

pub type ResultPipeline<T> = std::result::Result<T, PipelineError>;

impl PipelineError {
    /// Returns `true` for conditions that must not abort processing.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, PipelineError::FieldNotFound { .. } | PipelineError::SegmentMissing { .. })
    }

    /// Helper for the most common construction.
    pub fn field_not_found(field: Field, line: &str) -> PipelineError {
        PipelineError::FieldNotFound {
            field,
            line: String::from(line),
        }
    }
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::FieldNotFound { field, line } => {
                write!(f, "field {} not found in line {:?}", field, line)
            }
            PipelineError::InvalidDateRequest { date, reason } => {
                write!(f, "Provided date {:?} is wrong or higher than today's date; {}", date, reason)
            }
            PipelineError::SegmentMissing { segment } => {
                write!(f, "File not found: {}", segment)
            }
            PipelineError::NoSegmentsFound { segments } => {
                write!(f, "None of the log files for the requested date were found: {}", segments.join(", "))
            }
            PipelineError::EmptyLogDirectory { log_dir } => {
                write!(f, "Log directory has no files in it: {}", log_dir)
            }
            PipelineError::NoMatchingRecords => {
                write!(f, "No matching lines found to be processed with provided filters")
            }
            PipelineError::RecordLimitExceeded { limit } => {
                write!(f, "More than {} log lines retained; narrow the filters or raise --max-records", limit)
            }
            PipelineError::InvalidOutcome { value } => {
                write!(
                    f,
                    "Unknown email status type {:?}; expected one of bounced, deferred, sent, rejected, all",
                    value
                )
            }
            PipelineError::MalformedRow { row, reason } => {
                write!(f, "malformed row {:?}; {}", row, reason)
            }
            PipelineError::Io { path, err } => {
                write!(f, "{} for file {:?}", err, path)
            }
        }
    }
}

impl std::error::Error for PipelineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PipelineError::Io { err, .. } => Some(err),
            _ => None,
        }
    }
}

/// Wrap an [`std::io::Error`] with the path it concerns.
pub fn err_from_err_path(
    err: std::io::Error,
    path: &FPath,
) -> PipelineError {
    PipelineError::Io {
        path: path.clone(),
        err,
    }
}
