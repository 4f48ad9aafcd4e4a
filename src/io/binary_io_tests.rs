use std::fs;
use std::path::Path;

use tempfile::tempdir;

use crate::io::{read_i32_file, snapshot_path, start_iteration_from_name, write_positions};
use crate::models::{Body, Vector3};
use crate::utils::LayoutError;

#[test]
fn test_read_i32_file_little_endian() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("links.bin");
    let values = [-1i32, 2, 3, i32::MAX, i32::MIN];
    let bytes: Vec<u8> = values.iter().flat_map(|v| v.to_le_bytes()).collect();
    fs::write(&path, bytes).expect("write fixture");

    assert_eq!(read_i32_file(&path).expect("readable file"), values.to_vec());
}

#[test]
fn test_read_i32_file_rejects_truncated_file() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("weights.bin");
    fs::write(&path, [1u8, 0, 0, 0, 7, 0]).expect("write fixture");

    match read_i32_file(&path) {
        Err(LayoutError::TruncatedFile { len, .. }) => assert_eq!(len, 6),
        other => panic!("Expected TruncatedFile, got {:?}", other),
    }
}

#[test]
fn test_read_i32_file_reports_missing_file() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("missing.bin");
    match read_i32_file(&path) {
        Err(LayoutError::Io { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("Expected Io, got {:?}", other),
    }
}

#[test]
fn test_write_positions_rounds_half_up() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("positions.bin");
    let bodies = vec![
        Body::new(Vector3::new(1.5, -1.5, 2.49), 1.0).expect("valid body"),
        Body::new(Vector3::new(-0.5, 0.2, -7.6), 1.0).expect("valid body"),
    ];
    write_positions(&path, &bodies).expect("writable file");

    assert_eq!(fs::metadata(&path).expect("metadata").len(), 24);
    assert_eq!(read_i32_file(&path).expect("readable file"), vec![2, -1, 2, 0, 0, -8]);
}

#[test]
fn test_written_positions_seed_a_new_layout() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("positions.bin");
    let bodies = vec![
        Body::new(Vector3::new(10.0, 20.0, 30.0), 1.0).expect("valid body"),
        Body::new(Vector3::new(-4.0, 0.0, 9.0), 1.0).expect("valid body"),
    ];
    write_positions(&path, &bodies).expect("writable file");

    let positions = read_i32_file(&path).expect("readable file");
    let layout = crate::layout::Layout::builder(&[-1, 2])
        .positions(&positions)
        .build()
        .expect("valid layout");
    assert_eq!(layout.positions()[1], Vector3::new(-4.0, 0.0, 9.0));
}

#[test]
fn test_snapshot_path() {
    assert_eq!(snapshot_path(Path::new("positions.bin"), 10), Path::new("positions_10.bin"));
    assert_eq!(snapshot_path(Path::new("/tmp/run/out.dat"), 0), Path::new("/tmp/run/out_0.dat"));
    assert_eq!(snapshot_path(Path::new("layout"), 7), Path::new("layout_7"));
}

#[test]
fn test_start_iteration_from_name() {
    assert_eq!(start_iteration_from_name(Path::new("positions_0.bin")), 1);
    assert_eq!(start_iteration_from_name(Path::new("/data/graph_positions_250.bin")), 251);
    assert_eq!(start_iteration_from_name(Path::new("positions.bin")), 0);
    assert_eq!(start_iteration_from_name(Path::new("positions_12.dat")), 0);
    assert_eq!(start_iteration_from_name(Path::new("positions_.bin")), 0);
    assert_eq!(start_iteration_from_name(Path::new("positions_1a.bin")), 0);
}
