//! Integration tests for reading and writing grid files on disk.

use std::path::Path;

use approx::assert_abs_diff_eq;

use orbgrid_core::{AxisSpec, GridForm, GridState, VectorGrid};
use orbgrid_io::reader::load_grid_file;
use orbgrid_io::{read_grid_file, write_grid_file, GridDefinition, GridFileError, DEFAULT_COMMENT};

#[test]
fn test_regular_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("regular.grid");
    let specs = [
        AxisSpec::new(-5.0, 5.0, 11),
        AxisSpec::new(-2.0, 2.0, 5),
        AxisSpec::new(0.0, 0.0, 1),
    ];

    write_grid_file(&path, &GridDefinition::Regular(specs), DEFAULT_COMMENT).unwrap();
    let def = read_grid_file(&path, DEFAULT_COMMENT).unwrap();
    assert_eq!(def, GridDefinition::Regular(specs));
}

#[test]
fn test_awkward_floats_survive_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("points.grid");
    let grid = VectorGrid::from_points(&[
        [0.1 + 0.2, -1.0e-9, 123456.789],
        [std::f64::consts::PI, 1.0 / 3.0, -0.0],
    ]);

    write_grid_file(&path, &GridDefinition::Vector(grid.clone()), "%").unwrap();
    let def = read_grid_file(&path, "%").unwrap();
    assert_eq!(def, GridDefinition::Vector(grid));
}

#[test]
fn test_load_vector_file_initialises_state() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vector.grid");
    std::fs::write(&path, "# two points\nx y z\n5 -5 0\n2 7 0\n").unwrap();

    let mut state = GridState::new();
    let form = load_grid_file(&mut state, &path, DEFAULT_COMMENT).unwrap();

    assert_eq!(form, GridForm::Vector);
    assert!(state.is_initialized());
    let grid = state.vector().unwrap();
    assert_eq!(grid.point(0), Some([5.0, -5.0, 0.0]));
    assert_eq!(grid.point(1), Some([2.0, 7.0, 0.0]));
}

#[test]
fn test_load_regular_file_requires_init() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("regular.grid");
    std::fs::write(&path, "x -5 5 11\ny -2 2 5\nz 0 0 1\n").unwrap();

    let mut state = GridState::new();
    state.init(false).unwrap();
    let form = load_grid_file(&mut state, &path, DEFAULT_COMMENT).unwrap();

    assert_eq!(form, GridForm::Regular);
    assert!(!state.is_initialized());
    assert_eq!(state.specs()[0], AxisSpec::new(-5.0, 5.0, 11));

    state.init(false).unwrap();
    assert_eq!(state.regular().unwrap().shape(), [11, 5, 1]);
    assert_abs_diff_eq!(state.cell_volume().unwrap(), 1.0);
}

#[test]
fn test_malformed_file_leaves_state_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.grid");
    std::fs::write(&path, "x y z\n1 2 3\n4 5 6\nx -1 1 3\n").unwrap();

    let mut state = GridState::new();
    state.init(false).unwrap();
    let before = state.regular().unwrap().clone();

    let err = load_grid_file(&mut state, &path, DEFAULT_COMMENT).unwrap_err();
    assert!(matches!(err, GridFileError::FormatError { line: 4, .. }));
    assert!(state.is_initialized());
    assert_eq!(state.regular(), Some(&before));
}

#[test]
fn test_non_utf8_file_is_format_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("binary.grid");
    std::fs::write(&path, b"x y z\n1 2 3\n4 \xff 6\n").unwrap();

    let err = read_grid_file(&path, DEFAULT_COMMENT).unwrap_err();
    assert!(matches!(err, GridFileError::FormatError { line: 3, .. }));
}

#[test]
fn test_missing_file_is_not_found() {
    let err = read_grid_file(Path::new("/nonexistent/dir/grid.txt"), DEFAULT_COMMENT).unwrap_err();
    assert!(matches!(err, GridFileError::NotFound { .. }));
    assert!(err.to_string().contains("grid.txt"));
}
