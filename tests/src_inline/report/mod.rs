use super::*;
use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("kira_hfeqc_report_{}_{}", std::process::id(), id));
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn test_results_dataset_has_two_columns() {
    let ds = results_dataset(&[AggregatedResult {
        sample_id: "S001".to_string(),
        classification: "S001 is het for C282Y".to_string(),
    }]);
    assert_eq!(ds.columns, vec!["Sample ID", "Classification"]);
    assert_eq!(ds.rows[0][1], Cell::Text("S001 is het for C282Y".to_string()));
}

#[test]
fn test_staged_file_replaces_target_on_commit() {
    let dir = make_temp_dir();
    let path = dir.join("out.bin");
    fs::write(&path, b"old").unwrap();

    let staged = stage_file(&path, b"new contents").unwrap();
    assert_eq!(fs::read(&path).unwrap(), b"old");
    staged.commit().unwrap();

    assert_eq!(fs::read(&path).unwrap(), b"new contents");
    assert_eq!(fs::read_dir(&dir).unwrap().count(), 1);
}

#[test]
fn test_dropped_stage_leaves_no_file() {
    let dir = make_temp_dir();
    let path = dir.join("out.bin");
    let staged = stage_file(&path, b"x").unwrap();
    drop(staged);
    assert!(!path.exists());
    assert_eq!(fs::read_dir(&dir).unwrap().count(), 0);
}

#[test]
fn test_stage_into_missing_directory_fails() {
    let dir = make_temp_dir();
    let path = dir.join("no_such_dir").join("out.bin");
    let err = stage_file(&path, b"x").unwrap_err();
    assert!(matches!(err, WriteError::Io { .. }));
    assert!(!path.exists());
}

#[cfg(unix)]
#[test]
fn test_new_file_gets_default_create_mode() {
    use std::os::unix::fs::PermissionsExt;

    let dir = make_temp_dir();
    let reference = dir.join("reference.bin");
    fs::File::create(&reference).unwrap();
    let expected = fs::metadata(&reference).unwrap().permissions().mode() & 0o777;

    let path = dir.join("report.xlsx");
    stage_file(&path, b"x").unwrap().commit().unwrap();
    let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
    assert_eq!(mode, expected);
}

#[cfg(unix)]
#[test]
fn test_replaced_file_keeps_its_mode() {
    use std::os::unix::fs::PermissionsExt;

    let dir = make_temp_dir();
    let path = dir.join("report.xlsx");
    fs::write(&path, b"old").unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o640)).unwrap();

    stage_file(&path, b"new").unwrap().commit().unwrap();
    let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
    assert_eq!(mode, 0o640);
}
