// src/readers/helpers.rs

//! Miscellaneous helper functions for _Readers_.

use crate::common::{FPath, SUFFIX_GZ};

/// Return the basename of an `FPath`.
pub fn basename(path: &FPath) -> FPath {
    let mut riter = path.rsplit(std::path::MAIN_SEPARATOR);

    FPath::from(riter.next().unwrap_or(""))
}

/// Helper function for a slightly annoying set of calls.
pub fn path_to_fpath(path: &std::path::Path) -> FPath {
    // `PathBuf` to `String` https://stackoverflow.com/q/37388107/471376
    (*(path.to_string_lossy())).to_string()
}

/// Helper function for completeness.
pub fn fpath_to_path(path: &FPath) -> &std::path::Path {
    std::path::Path::new(path)
}

/// Is this a gzip compressed segment? Decided by file name suffix only.
pub fn fpath_is_gz(path: &FPath) -> bool {
    path.ends_with(SUFFIX_GZ)
}
