use std::fs;
use std::path::Path;

use crate::input::{ExportLayout, LoadError};
use crate::model::dataset::{Cell, Dataset};

const UTF8_BOM: char = '\u{feff}';

/// Field values read as missing, matching the NA markers the instrument
/// software and spreadsheet tools emit.
const NA_TOKENS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

fn is_na(field: &str) -> bool {
    field.is_empty() || NA_TOKENS.contains(&field)
}

/// Reads a tab-delimited instrument export, dropping the preamble lines and
/// the footer rows described by `layout`.
pub fn load_export(path: &Path, layout: &ExportLayout) -> Result<Dataset, LoadError> {
    let bytes = fs::read(path).map_err(|e| LoadError::io(path, e))?;
    let text = std::str::from_utf8(&bytes).map_err(|e| {
        let line = bytes[..e.valid_up_to()]
            .iter()
            .filter(|&&b| b == b'\n')
            .count() as u64
            + 1;
        LoadError::Parse {
            path: path.to_path_buf(),
            line,
            details: "file is not valid UTF-8".to_string(),
        }
    })?;
    let text = text.strip_prefix(UTF8_BOM).unwrap_or(text);

    let body = skip_lines(text, layout.preamble_lines).ok_or_else(|| {
        LoadError::too_short(
            path,
            format!(
                "expected at least {} preamble lines before the header",
                layout.preamble_lines
            ),
        )
    })?;

    let (columns, raw_rows) = read_table(path, body, layout.preamble_lines as u64)?;

    if raw_rows.len() < layout.footer_rows {
        return Err(LoadError::too_short(
            path,
            format!(
                "{} data rows, but the instrument footer alone spans {} rows",
                raw_rows.len(),
                layout.footer_rows
            ),
        ));
    }
    let keep = raw_rows.len() - layout.footer_rows;
    let mut raw_rows = raw_rows;
    raw_rows.truncate(keep);

    if raw_rows.is_empty() {
        tracing::warn!(path = %path.display(), "export contains no data rows after the footer is removed");
    }

    let numeric = numeric_columns(columns.len(), &raw_rows);
    let rows = raw_rows
        .into_iter()
        .map(|row| {
            row.into_iter()
                .enumerate()
                .map(|(idx, field)| to_cell(field, numeric[idx]))
                .collect()
        })
        .collect();

    Ok(Dataset { columns, rows })
}

fn skip_lines(text: &str, n: usize) -> Option<&str> {
    let mut rest = text;
    for _ in 0..n {
        let idx = rest.find('\n')?;
        rest = &rest[idx + 1..];
    }
    Some(rest)
}

type RawRow = Vec<Option<String>>;

fn read_table(
    path: &Path,
    body: &str,
    line_offset: u64,
) -> Result<(Vec<String>, Vec<RawRow>), LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .from_reader(body.as_bytes());

    let parse_err = |line: u64, details: String| LoadError::Parse {
        path: path.to_path_buf(),
        line: line + line_offset,
        details,
    };

    let mut columns: Option<Vec<String>> = None;
    let mut rows = Vec::new();

    for record in reader.records() {
        let record = record.map_err(|e| {
            let line = e.position().map(|p| p.line()).unwrap_or(0);
            parse_err(line, e.to_string())
        })?;
        if record.iter().all(|f| f.is_empty()) && record.len() <= 1 {
            continue;
        }
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        if columns.is_none() {
            columns = Some(record.iter().map(|s| s.trim().to_string()).collect());
            continue;
        }

        let n_cols = columns.as_ref().map_or(0, Vec::len);
        if record.len() > n_cols && record.iter().skip(n_cols).any(|f| !f.is_empty()) {
            return Err(parse_err(
                line,
                format!("expected {} fields, found {}", n_cols, record.len()),
            ));
        }
        let mut row: RawRow = Vec::with_capacity(n_cols);
        for idx in 0..n_cols {
            let field = record.get(idx).unwrap_or("");
            row.push(if is_na(field) {
                None
            } else {
                Some(field.to_string())
            });
        }
        rows.push(row);
    }

    let columns = columns.ok_or_else(|| LoadError::too_short(path, "no header row after the preamble"))?;
    Ok((columns, rows))
}

fn parse_number(field: &str) -> Option<f64> {
    let trimmed = field.trim();
    if !trimmed.bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

/// A column is numeric when it has at least one value and every value parses as a number.
fn numeric_columns(n_cols: usize, rows: &[RawRow]) -> Vec<bool> {
    (0..n_cols)
        .map(|idx| {
            let mut seen = false;
            for row in rows {
                if let Some(field) = &row[idx] {
                    if parse_number(field).is_none() {
                        return false;
                    }
                    seen = true;
                }
            }
            seen
        })
        .collect()
}

fn to_cell(field: Option<String>, numeric: bool) -> Cell {
    match field {
        None => Cell::Missing,
        Some(s) if numeric => parse_number(&s).map(Cell::Number).unwrap_or(Cell::Text(s)),
        Some(s) => Cell::Text(s),
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/export.rs"]
mod tests;
