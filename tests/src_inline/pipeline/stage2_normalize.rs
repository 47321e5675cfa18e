use super::*;

fn text(s: &str) -> Cell {
    Cell::Text(s.to_string())
}

fn dataset(rows: Vec<Vec<Cell>>) -> (Dataset, Schema) {
    let columns = vec![
        "Sample ID".to_string(),
        "Assay Name".to_string(),
        "Call".to_string(),
        "Quality".to_string(),
    ];
    let schema = Schema::resolve(&columns).unwrap();
    (Dataset { columns, rows }, schema)
}

#[test]
fn test_normalize_text_strips_punctuation_and_whitespace() {
    assert_eq!(normalize_text("  WT/MUT. "), "WTMUT");
    assert_eq!(normalize_text("S-001\n"), "S001");
    assert_eq!(normalize_text("NA13591"), "NA13591");
    assert_eq!(normalize_text("..."), "");
    assert_eq!(normalize_text(" a , b "), "a  b");
}

#[test]
fn test_normalize_text_is_idempotent() {
    for s in ["  WT/MUT. ", " - x - ", "\t\"NTC\"\t", "plain", "", "a . b"] {
        let once = normalize_text(s);
        assert_eq!(normalize_text(&once), once, "input {s:?}");
    }
}

#[test]
fn test_cells_numbers_pass_missing_becomes_empty() {
    assert_eq!(normalize_cell(&Cell::Number(0.75)), Cell::Number(0.75));
    assert_eq!(normalize_cell(&Cell::Missing), text(""));
    assert_eq!(normalize_cell(&text("MUT,MUT")), text("MUTMUT"));
}

#[test]
fn test_rows_sorted_by_assay_stable() {
    let (ds, schema) = dataset(vec![
        vec![text("S1"), text("H63D"), text("WTWT"), Cell::Number(1.0)],
        vec![text("S2"), text("C282Y"), text("WTWT"), Cell::Number(2.0)],
        vec![text("S1"), text("C282Y"), text("WTMUT"), Cell::Number(3.0)],
        vec![text("S2"), text("H63D"), Cell::Missing, Cell::Number(4.0)],
    ]);
    let out = run_stage2(&ds, &schema);

    let order: Vec<f64> = out
        .rows
        .iter()
        .map(|r| match r[3] {
            Cell::Number(v) => v,
            _ => panic!("quality should stay numeric"),
        })
        .collect();
    assert_eq!(order, vec![2.0, 3.0, 1.0, 4.0]);
    assert_eq!(out.rows[3][2], text(""));
    assert_eq!(out.columns, ds.columns);
}

#[test]
fn test_stage2_is_idempotent() {
    let (ds, schema) = dataset(vec![
        vec![text(" S-1 "), text("H63D."), text("WT;WT"), Cell::Missing],
        vec![text("S2"), text("C282Y"), text("NOAMP"), Cell::Number(0.1)],
    ]);
    let once = run_stage2(&ds, &schema);
    let twice = run_stage2(&once, &schema);
    assert_eq!(once, twice);
}

#[test]
fn test_input_is_not_mutated() {
    let (ds, schema) = dataset(vec![vec![text("S.1"), text("H63D"), text("WTWT"), Cell::Missing]]);
    let before = ds.clone();
    let _ = run_stage2(&ds, &schema);
    assert_eq!(ds, before);
}
