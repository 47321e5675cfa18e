use super::*;

fn cols(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_schema_resolves_required_columns() {
    let schema = Schema::resolve(&cols(&["Well", "Call", "Sample ID", "Assay Name"])).unwrap();
    assert_eq!(
        schema,
        Schema {
            sample_id: 2,
            assay_name: 3,
            call: 1
        }
    );
}

#[test]
fn test_schema_missing_column() {
    let err = Schema::resolve(&cols(&["Sample ID", "Assay Name"])).unwrap_err();
    assert_eq!(err, SchemaError::MissingColumn("Call"));
}

#[test]
fn test_schema_duplicate_column() {
    let err = Schema::resolve(&cols(&["Sample ID", "Assay Name", "Call", "Call"])).unwrap_err();
    assert_eq!(err, SchemaError::DuplicateColumn { column: "Call" });
}

#[test]
fn test_fields_reports_short_row() {
    let schema = Schema::resolve(&cols(&["Sample ID", "Assay Name", "Call"])).unwrap();
    let row = vec![Cell::Text("S1".to_string()), Cell::Text("C282Y".to_string())];
    let err = schema.fields(&row, 7).unwrap_err();
    assert_eq!(
        err,
        SchemaError::MissingField {
            row: 7,
            column: "Call"
        }
    );
}

#[test]
fn test_cell_keys() {
    assert_eq!(Cell::Text("WTWT".to_string()).as_key(), "WTWT");
    assert_eq!(Cell::Number(12.0).as_key(), "12");
    assert_eq!(Cell::Number(0.25).as_key(), "0.25");
    assert_eq!(Cell::Missing.as_key(), "");
}

#[test]
fn test_truncate_columns() {
    let ds = Dataset {
        columns: cols(&["a", "b", "c"]),
        rows: vec![vec![Cell::Number(1.0), Cell::Missing, Cell::Text("x".to_string())]],
    };
    let cut = ds.truncate_columns(2);
    assert_eq!(cut.columns, cols(&["a", "b"]));
    assert_eq!(cut.rows[0].len(), 2);
    assert_eq!(ds.truncate_columns(10), ds);
}
