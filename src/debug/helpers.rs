// src/debug/helpers.rs

//! Temporary file helpers for tests: plain and gzip log segments, and log
//! directories holding rotated segments.

use std::io::Write; // for `NamedTempFile.write_all`

use ::flate2::write::GzEncoder;
use ::flate2::Compression;
use ::lazy_static::lazy_static;
#[allow(unused_imports)]
use ::si_trace_print::{defo, defñ};

#[doc(hidden)]
pub use ::tempfile::{NamedTempFile, TempDir};

use crate::common::FPath;
use crate::readers::helpers::path_to_fpath;

/// NamedTempFile instances default to this file name prefix.
pub const STR_TEMPFILE_PREFIX: &str = "tmp-pfstats-test-";

lazy_static! {
    pub static ref STRING_TEMPFILE_PREFIX: String = String::from(STR_TEMPFILE_PREFIX);
}

/// Small helper function for copying `NamedTempFile` path to a `FPath`.
pub fn ntf_fpath(ntf: &NamedTempFile) -> FPath {
    path_to_fpath(ntf.path())
}

/// Gzip compress `data`.
pub fn gz_bytes(data: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    match encoder.write_all(data) {
        Ok(_) => {}
        Err(err) => {
            panic!("GzEncoder::write_all() return Err {}", err);
        }
    }
    match encoder.finish() {
        Ok(val) => val,
        Err(err) => {
            panic!("GzEncoder::finish() return Err {}", err);
        }
    }
}

/// Testing helper function to write a `[u8]` to a temporary file with a
/// specific suffix.
pub fn create_temp_file_bytes_with_suffix(
    data: &[u8],
    suffix: &str,
) -> NamedTempFile {
    let mut ntf = match ::tempfile::Builder::new()
        // use known prefix for easier cleanup
        .prefix::<str>(&STRING_TEMPFILE_PREFIX)
        .suffix(suffix)
        .tempfile()
    {
        Ok(val) => val,
        Err(err) => {
            panic!("tempfile::Builder::new()..tempfile() return Err {}", err);
        }
    };
    match ntf.write_all(data) {
        Ok(_) => {}
        Err(err) => {
            panic!("NamedTempFile::write_all() return Err {}", err);
        }
    }
    defñ!("{:?}", ntf.path());

    ntf
}

/// Testing helper function to write a `str` to a temporary `.log` file.
pub fn create_temp_file(data: &str) -> NamedTempFile {
    create_temp_file_bytes_with_suffix(data.as_bytes(), ".log")
}

/// Testing helper function to write a `str` gzip compressed to a temporary
/// `.gz` file.
pub fn create_temp_gz_file(data: &str) -> NamedTempFile {
    create_temp_file_bytes_with_suffix(&gz_bytes(data.as_bytes()), ".gz")
}

/// Testing helper function to create a directory of log segments.
///
/// Each `(name, data)` is written to `name`; names ending `.gz` are gzip
/// compressed.
pub fn create_temp_log_dir(files: &[(&str, &str)]) -> TempDir {
    let dir: TempDir = match ::tempfile::Builder::new()
        .prefix::<str>(&STRING_TEMPFILE_PREFIX)
        .tempdir()
    {
        Ok(val) => val,
        Err(err) => {
            panic!("tempfile::Builder::new()..tempdir() return Err {}", err);
        }
    };
    for (name, data) in files.iter() {
        let bytes: Vec<u8> = if name.ends_with(".gz") {
            gz_bytes(data.as_bytes())
        } else {
            data.as_bytes().to_vec()
        };
        let path = dir.path().join(name);
        defo!("write {:?}", path);
        if let Err(err) = std::fs::write(&path, bytes) {
            panic!("std::fs::write({:?}) return Err {}", path, err);
        }
    }

    dir
}
