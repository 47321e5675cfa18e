pub mod json;
pub mod text;
pub mod xlsx;

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::model::dataset::{COL_CLASSIFICATION, COL_SAMPLE_ID, Cell, Dataset};
use crate::pipeline::stage4_aggregate::AggregatedResult;

#[derive(Error, Debug)]
pub enum WriteError {
    #[error("cannot write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("workbook rendering failed: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("sheet '{sheet}' exceeds spreadsheet limits: {details}")]
    Limit { sheet: String, details: String },

    #[error("cannot serialize run summary: {0}")]
    Json(#[from] serde_json::Error),

    #[error("cannot write classifications to the console: {0}")]
    Console(#[source] std::io::Error),
}

impl WriteError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        WriteError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// One named sheet of a workbook.
#[derive(Debug, Clone, Copy)]
pub struct SheetTable<'a> {
    pub name: &'a str,
    pub data: &'a Dataset,
}

pub fn results_dataset(results: &[AggregatedResult]) -> Dataset {
    Dataset {
        columns: vec![COL_SAMPLE_ID.to_string(), COL_CLASSIFICATION.to_string()],
        rows: results
            .iter()
            .map(|r| {
                vec![
                    Cell::Text(r.sample_id.clone()),
                    Cell::Text(r.classification.clone()),
                ]
            })
            .collect(),
    }
}

/// Bytes written and synced to a temporary file beside `target`, not yet visible
/// under the target name.
#[derive(Debug)]
pub struct StagedFile {
    tmp: tempfile::NamedTempFile,
    target: PathBuf,
}

impl StagedFile {
    /// Renames the staged file over the target.
    pub fn commit(self) -> Result<(), WriteError> {
        let target = self.target;
        self.tmp
            .persist(&target)
            .map_err(|e| WriteError::io(&target, e.error))?;
        Ok(())
    }
}

/// Stages `bytes` for `path`. The temporary file takes the existing target's
/// permissions, or the umask-filtered default for a new file.
pub fn stage_file(path: &Path, bytes: &[u8]) -> Result<StagedFile, WriteError> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut builder = tempfile::Builder::new();
    builder.prefix(".kira-hfeqc");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o666));
    }
    let mut tmp = builder
        .tempfile_in(dir)
        .map_err(|e| WriteError::io(path, e))?;

    if let Ok(meta) = fs::metadata(path) {
        tmp.as_file()
            .set_permissions(meta.permissions())
            .map_err(|e| WriteError::io(path, e))?;
    }
    tmp.write_all(bytes).map_err(|e| WriteError::io(path, e))?;
    tmp.as_file()
        .sync_all()
        .map_err(|e| WriteError::io(path, e))?;

    Ok(StagedFile {
        tmp,
        target: path.to_path_buf(),
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/mod.rs"]
mod tests;
