use crate::model::dataset::{Cell, Dataset, Schema};

/// Removes ASCII punctuation, then trims surrounding whitespace.
pub fn normalize_text(value: &str) -> String {
    let stripped: String = value.chars().filter(|c| !c.is_ascii_punctuation()).collect();
    stripped.trim().to_string()
}

pub fn normalize_cell(cell: &Cell) -> Cell {
    match cell {
        Cell::Text(s) => Cell::Text(normalize_text(s)),
        Cell::Number(v) => Cell::Number(*v),
        Cell::Missing => Cell::Text(String::new()),
    }
}

/// Cleans every cell and orders rows by assay name. Ties keep input order.
pub fn run_stage2(input: &Dataset, schema: &Schema) -> Dataset {
    let mut rows: Vec<Vec<Cell>> = input
        .rows
        .iter()
        .map(|row| row.iter().map(normalize_cell).collect())
        .collect();

    let idx = schema.assay_name;
    rows.sort_by(|a, b| {
        let ka = a.get(idx).map(Cell::as_key).unwrap_or_default();
        let kb = b.get(idx).map(Cell::as_key).unwrap_or_default();
        ka.cmp(&kb)
    });

    tracing::info!(rows = rows.len(), "normalized export rows");

    Dataset {
        columns: input.columns.clone(),
        rows,
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_normalize.rs"]
mod tests;
