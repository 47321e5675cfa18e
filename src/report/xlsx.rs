use rust_xlsxwriter::{Format, Workbook};

use crate::model::dataset::Cell;
use crate::report::{SheetTable, WriteError};

pub const EXCEL_MAX_ROWS: usize = 1_048_576;
pub const EXCEL_MAX_COLS: usize = 16_384;

/// Renders the sheets, in order, into an in-memory xlsx file.
pub fn render_workbook(sheets: &[SheetTable<'_>]) -> Result<Vec<u8>, WriteError> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();

    for sheet in sheets {
        check_limits(sheet)?;
        let ws = workbook.add_worksheet();
        ws.set_name(sheet.name)?;

        for (col, name) in sheet.data.columns.iter().enumerate() {
            ws.write_string_with_format(0, col as u16, name.as_str(), &header)?;
        }

        for (r, row) in sheet.data.rows.iter().enumerate() {
            let row_num = (r + 1) as u32;
            for (col, cell) in row.iter().enumerate() {
                let col = col as u16;
                match cell {
                    Cell::Text(s) if s.is_empty() => {}
                    Cell::Text(s) => {
                        ws.write_string(row_num, col, s.as_str())?;
                    }
                    Cell::Number(v) if v.is_finite() => {
                        ws.write_number(row_num, col, *v)?;
                    }
                    // xlsx has no encoding for NaN/inf
                    Cell::Number(v) => {
                        ws.write_string(row_num, col, v.to_string())?;
                    }
                    Cell::Missing => {}
                }
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}

fn check_limits(sheet: &SheetTable<'_>) -> Result<(), WriteError> {
    let n_rows = sheet.data.rows.len() + 1;
    if n_rows > EXCEL_MAX_ROWS {
        return Err(WriteError::Limit {
            sheet: sheet.name.to_string(),
            details: format!("{} rows, maximum is {}", n_rows, EXCEL_MAX_ROWS),
        });
    }
    let n_cols = sheet.data.columns.len();
    if n_cols > EXCEL_MAX_COLS {
        return Err(WriteError::Limit {
            sheet: sheet.name.to_string(),
            details: format!("{} columns, maximum is {}", n_cols, EXCEL_MAX_COLS),
        });
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/xlsx.rs"]
mod tests;
