use std::path::{Path, PathBuf};

use thiserror::Error;

pub mod export;

pub use export::load_export;

pub const DEFAULT_PREAMBLE_LINES: usize = 17;
pub const DEFAULT_FOOTER_ROWS: usize = 21;

/// Fixed framing of an instrument export around the data table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportLayout {
    /// Raw lines before the header row.
    pub preamble_lines: usize,
    /// Data rows at the end of the table that belong to the instrument footer.
    pub footer_rows: usize,
}

impl Default for ExportLayout {
    fn default() -> Self {
        Self {
            preamble_lines: DEFAULT_PREAMBLE_LINES,
            footer_rows: DEFAULT_FOOTER_ROWS,
        }
    }
}

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is too short: {details}")]
    TooShort { path: PathBuf, details: String },

    #[error("parse error in {path} at line {line}: {details}")]
    Parse {
        path: PathBuf,
        line: u64,
        details: String,
    },
}

impl LoadError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        LoadError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn too_short(path: &Path, details: impl Into<String>) -> Self {
        LoadError::TooShort {
            path: path.to_path_buf(),
            details: details.into(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
