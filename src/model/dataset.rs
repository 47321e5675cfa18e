use std::borrow::Cow;

use thiserror::Error;

pub const COL_SAMPLE_ID: &str = "Sample ID";
pub const COL_ASSAY_NAME: &str = "Assay Name";
pub const COL_CALL: &str = "Call";
pub const COL_CLASSIFICATION: &str = "Classification";

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    Missing,
}

impl Cell {
    /// String form used for rule matching, grouping and sorting.
    pub fn as_key(&self) -> Cow<'_, str> {
        match self {
            Cell::Text(s) => Cow::Borrowed(s.as_str()),
            Cell::Number(v) => Cow::Owned(v.to_string()),
            Cell::Missing => Cow::Borrowed(""),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dataset {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Dataset {
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// Copy keeping only the first `n` columns.
    pub fn truncate_columns(&self, n: usize) -> Dataset {
        let keep = n.min(self.columns.len());
        Dataset {
            columns: self.columns[..keep].to_vec(),
            rows: self
                .rows
                .iter()
                .map(|row| row.iter().take(keep).cloned().collect())
                .collect(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("required column '{0}' is absent from the header")]
    MissingColumn(&'static str),

    #[error("required column '{column}' appears more than once in the header")]
    DuplicateColumn { column: &'static str },

    #[error("data row {row} has no '{column}' field")]
    MissingField { row: usize, column: &'static str },
}

/// Validated positions of the columns the classifier reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schema {
    pub sample_id: usize,
    pub assay_name: usize,
    pub call: usize,
}

impl Schema {
    pub fn resolve(columns: &[String]) -> Result<Self, SchemaError> {
        Ok(Self {
            sample_id: find_unique(columns, COL_SAMPLE_ID)?,
            assay_name: find_unique(columns, COL_ASSAY_NAME)?,
            call: find_unique(columns, COL_CALL)?,
        })
    }

    pub fn fields<'a>(&self, row: &'a [Cell], row_no: usize) -> Result<RowFields<'a>, SchemaError> {
        let get = |idx: usize, column: &'static str| {
            row.get(idx)
                .map(Cell::as_key)
                .ok_or(SchemaError::MissingField { row: row_no, column })
        };
        Ok(RowFields {
            sample_id: get(self.sample_id, COL_SAMPLE_ID)?,
            assay_name: get(self.assay_name, COL_ASSAY_NAME)?,
            call: get(self.call, COL_CALL)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowFields<'a> {
    pub sample_id: Cow<'a, str>,
    pub assay_name: Cow<'a, str>,
    pub call: Cow<'a, str>,
}

fn find_unique(columns: &[String], name: &'static str) -> Result<usize, SchemaError> {
    let mut hits = columns
        .iter()
        .enumerate()
        .filter(|(_, c)| c.as_str() == name)
        .map(|(i, _)| i);
    let first = hits.next().ok_or(SchemaError::MissingColumn(name))?;
    if hits.next().is_some() {
        return Err(SchemaError::DuplicateColumn { column: name });
    }
    Ok(first)
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/dataset.rs"]
mod tests;
