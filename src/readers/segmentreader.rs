// src/readers/segmentreader.rs

//! A [`SegmentReader`] concatenates the lines of several log segments,
//! plain or gzip compressed, into one stream.
//!
//! Lines are read one at a time; memory use is bounded by the longest line,
//! not by the size of the segments.

use std::io::{BufRead, BufReader, ErrorKind};

// `flate2` is for gzip files.
use ::flate2::read::MultiGzDecoder;
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

use crate::common::{err_from_err_path, Count, FPath, FPaths, File, ResultPipeline};
use crate::data::line::LogLine;
use crate::readers::helpers::{fpath_is_gz, fpath_to_path};

type SegmentBufRead = Box<dyn BufRead>;

/// Open one segment for line reading, decompressing `.gz` files.
pub fn open_segment(path: &FPath) -> std::io::Result<SegmentBufRead> {
    defñ!("({:?})", path);
    let file: File = File::open(fpath_to_path(path))?;
    if fpath_is_gz(path) {
        // `MultiGzDecoder` also reads logs appended as further gzip members
        let decoder: MultiGzDecoder<BufReader<File>> = MultiGzDecoder::new(BufReader::new(file));
        return Ok(Box::new(BufReader::new(decoder)));
    }

    Ok(Box::new(BufReader::new(file)))
}

/// Iterator over the lines of segments in the order given.
///
/// A segment that does not exist is skipped and noted in
/// [`segments_missing`]. Line terminators are removed and invalid UTF-8 is
/// replaced.
///
/// [`segments_missing`]: SegmentReader::segments_missing
pub struct SegmentReader {
    paths: FPaths,
    /// index into `paths` of the next segment to open
    index: usize,
    current: Option<SegmentBufRead>,
    current_path: FPath,
    buffer: Vec<u8>,
    segments_missing: FPaths,
    segments_opened: Count,
    lines_read: Count,
}

impl std::fmt::Debug for SegmentReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SegmentReader")
            .field("paths", &self.paths)
            .field("index", &self.index)
            .field("current_path", &self.current_path)
            .field("segments_missing", &self.segments_missing)
            .field("segments_opened", &self.segments_opened)
            .field("lines_read", &self.lines_read)
            .finish()
    }
}

impl SegmentReader {
    pub fn new(paths: FPaths) -> SegmentReader {
        defñ!("({:?})", paths);

        SegmentReader {
            paths,
            index: 0,
            current: None,
            current_path: FPath::new(),
            buffer: Vec::with_capacity(1024),
            segments_missing: FPaths::new(),
            segments_opened: 0,
            lines_read: 0,
        }
    }

    /// Segments that were not found when their turn came.
    pub fn segments_missing(&self) -> &[FPath] {
        self.segments_missing.as_slice()
    }

    pub fn segments_opened(&self) -> Count {
        self.segments_opened
    }

    pub fn lines_read(&self) -> Count {
        self.lines_read
    }

    pub fn paths(&self) -> &[FPath] {
        self.paths.as_slice()
    }

    /// Open the next existing segment. Returns `Ok(false)` when all segments
    /// are consumed.
    fn open_next(&mut self) -> ResultPipeline<bool> {
        while self.index < self.paths.len() {
            let path: FPath = self.paths[self.index].clone();
            self.index += 1;
            match open_segment(&path) {
                Ok(reader) => {
                    defo!("opened {:?}", path);
                    self.current = Some(reader);
                    self.current_path = path;
                    self.segments_opened += 1;
                    return Ok(true);
                }
                Err(err) if err.kind() == ErrorKind::NotFound => {
                    defo!("segment missing {:?}", path);
                    self.segments_missing.push(path);
                }
                Err(err) => {
                    defo!("open_segment({:?}) error {}", path, err);
                    return Err(err_from_err_path(err, &path));
                }
            }
        }

        Ok(false)
    }
}

impl Iterator for SegmentReader {
    type Item = ResultPipeline<LogLine>;

    fn next(&mut self) -> Option<ResultPipeline<LogLine>> {
        loop {
            if self.current.is_none() {
                match self.open_next() {
                    Ok(true) => {}
                    Ok(false) => {
                        return None;
                    }
                    Err(err) => {
                        return Some(Err(err));
                    }
                }
            }
            let reader: &mut SegmentBufRead = match self.current.as_mut() {
                Some(val) => val,
                None => continue,
            };
            self.buffer.clear();
            match reader.read_until(b'\n', &mut self.buffer) {
                Ok(0) => {
                    defo!("EOF {:?}", self.current_path);
                    self.current = None;
                }
                Ok(_) => {
                    if self.buffer.last() == Some(&b'\n') {
                        self.buffer.pop();
                        if self.buffer.last() == Some(&b'\r') {
                            self.buffer.pop();
                        }
                    }
                    self.lines_read += 1;
                    let line: LogLine = LogLine::new(String::from_utf8_lossy(&self.buffer).into_owned());
                    return Some(Ok(line));
                }
                Err(err) => {
                    defo!("read_until error {} for {:?}", err, self.current_path);
                    self.current = None;
                    return Some(Err(err_from_err_path(err, &self.current_path)));
                }
            }
        }
    }
}
