//! Integration tests for the build → scale → export lifecycle.
//!
//! These tests go through the public API only and check the exact bytes of
//! the exported dataset and bounds files.

use approx::assert_relative_eq;
use scaled_data::prelude::*;
use std::fs;
use std::path::Path;

fn three_case_dataset() -> ScaledData {
    let mut data = ScaledData::new(3, 1).unwrap();
    data.add_row(&[0.0], 1.0, 0).unwrap();
    data.add_row(&[10.0], 5.0, 1).unwrap();
    data.add_row(&[5.0], 3.0, 2).unwrap();
    data
}

fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

// =============================================================================
// Target scaling
// =============================================================================

#[test]
fn targets_are_scaled_to_unit_interval() {
    let mut data = ScaledData::new(3, 1).unwrap();
    data.add_target_value(1.0, 0).unwrap();
    data.add_target_value(5.0, 1).unwrap();
    data.add_target_value(3.0, 2).unwrap();

    assert_eq!(data.target_min(), Some(1.0));
    assert_eq!(data.target_max(), Some(5.0));

    data.scale_target().unwrap();
    assert_eq!(data.scaled_target_values(), &[0.0, 1.0, 0.5]);
}

#[test]
fn running_mean_is_available_before_all_rows() {
    let mut data = ScaledData::new(4, 1).unwrap();
    data.add_target_value(2.0, 0).unwrap();
    assert_eq!(data.target_mean(), Some(2.0));

    data.add_target_value(4.0, 1).unwrap();
    data.add_target_value(6.0, 2).unwrap();
    assert_relative_eq!(data.target_mean().unwrap(), 4.0, epsilon = 1e-12);
}

#[test]
fn constant_target_is_rejected_by_default() {
    let mut data = ScaledData::new(2, 1).unwrap();
    data.add_target_value(7.0, 0).unwrap();
    data.add_target_value(7.0, 1).unwrap();

    assert_eq!(
        data.scale_target().unwrap_err(),
        ScalingError::DegenerateRange {
            column: Column::Target,
            value: 7.0
        }
    );
}

#[test]
fn constant_target_propagates_nan_when_configured() {
    let config = ScalingConfig::new().with_degenerate_policy(DegeneratePolicy::Propagate);
    let mut data = ScaledData::with_config(2, 1, config).unwrap();
    data.add_row(&[0.0], 7.0, 0).unwrap();
    data.add_row(&[1.0], 7.0, 1).unwrap();

    let scaled = data.scale_target().unwrap();
    assert!(scaled[0].is_nan());
    assert!(scaled[1].is_nan());
}

// =============================================================================
// Export
// =============================================================================

#[test]
fn export_writes_normalized_dataset_and_bounds() {
    let dir = tempfile::tempdir().unwrap();
    let data_path = dir.path().join("normalized.csv");
    let bounds_path = dir.path().join("bounds.txt");

    let mut data = three_case_dataset();
    data.scale_target().unwrap();
    data.normalize_values(&data_path, &bounds_path).unwrap();

    assert_eq!(
        fs::read_to_string(&data_path).unwrap(),
        "0.0,0.0\n1.0,1.0\n0.5,0.5\n"
    );

    let bounds = read_lines(&bounds_path);
    assert_eq!(bounds.len(), 2);
    assert_eq!(bounds.first().unwrap(), "0.0 10.0");
    assert_eq!(bounds.last().unwrap(), "1.0 5.0");
}

#[test]
fn export_with_several_features() {
    let dir = tempfile::tempdir().unwrap();
    let data_path = dir.path().join("normalized.csv");
    let bounds_path = dir.path().join("bounds.txt");

    let mut data = ScaledData::new(2, 3).unwrap();
    data.add_row(&[1.0, -2.0, 100.0], 10.0, 0).unwrap();
    data.add_row(&[3.0, 2.0, 300.0], 20.0, 1).unwrap();
    data.scale_target().unwrap();
    data.normalize_values(&data_path, &bounds_path).unwrap();

    assert_eq!(
        read_lines(&data_path),
        vec!["0.0,0.0,0.0,0.0", "1.0,1.0,1.0,1.0"]
    );
    assert_eq!(
        read_lines(&bounds_path),
        vec!["1.0 3.0", "-2.0 2.0", "100.0 300.0", "10.0 20.0"]
    );
}

#[test]
fn export_requires_scaled_target() {
    let dir = tempfile::tempdir().unwrap();
    let data_path = dir.path().join("normalized.csv");
    let bounds_path = dir.path().join("bounds.txt");

    let data = three_case_dataset();
    assert_eq!(
        data.normalize_values(&data_path, &bounds_path).unwrap_err(),
        ScalingError::ScaleRequired
    );
    assert!(!data_path.exists());
    assert!(!bounds_path.exists());
}

#[test]
fn degenerate_feature_fails_before_any_file_is_written() {
    let dir = tempfile::tempdir().unwrap();
    let data_path = dir.path().join("normalized.csv");
    let bounds_path = dir.path().join("bounds.txt");

    let mut data = ScaledData::new(2, 2).unwrap();
    data.add_row(&[4.0, 1.0], 0.0, 0).unwrap();
    data.add_row(&[4.0, 2.0], 1.0, 1).unwrap();
    data.scale_target().unwrap();

    let err = data.normalize_values(&data_path, &bounds_path).unwrap_err();
    assert_eq!(
        err,
        ScalingError::DegenerateRange {
            column: Column::Feature(0),
            value: 4.0
        }
    );
    assert!(!data_path.exists());
    assert!(!bounds_path.exists());
}

#[test]
fn degenerate_feature_is_written_as_nan_when_propagating() {
    let dir = tempfile::tempdir().unwrap();
    let data_path = dir.path().join("normalized.csv");
    let bounds_path = dir.path().join("bounds.txt");

    let config = ScalingConfig::new()
        .with_degenerate_policy(DegeneratePolicy::Propagate)
        .with_atomic_writes(false);
    let mut data = ScaledData::with_config(2, 1, config).unwrap();
    data.add_row(&[4.0], 0.0, 0).unwrap();
    data.add_row(&[4.0], 1.0, 1).unwrap();
    data.scale_target().unwrap();
    data.normalize_values(&data_path, &bounds_path).unwrap();

    assert_eq!(read_lines(&data_path), vec!["NaN,0.0", "NaN,1.0"]);
    assert_eq!(read_lines(&bounds_path), vec!["4.0 4.0", "0.0 1.0"]);
}

#[test]
fn export_into_missing_directory_is_io_failure() {
    let dir = tempfile::tempdir().unwrap();
    let data_path = dir.path().join("missing").join("normalized.csv");
    let bounds_path = dir.path().join("bounds.txt");

    let mut data = three_case_dataset();
    data.scale_target().unwrap();
    let err = data.normalize_values(&data_path, &bounds_path).unwrap_err();
    assert!(matches!(err, ScalingError::IoFailure { .. }));
}

#[cfg(unix)]
#[test]
fn export_keeps_permissions_of_replaced_files() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let data_path = dir.path().join("normalized.csv");
    let bounds_path = dir.path().join("bounds.txt");
    for path in [&data_path, &bounds_path] {
        fs::write(path, "previous\n").unwrap();
        fs::set_permissions(path, fs::Permissions::from_mode(0o644)).unwrap();
    }

    let mut data = three_case_dataset();
    data.scale_target().unwrap();
    data.normalize_values(&data_path, &bounds_path).unwrap();

    for path in [&data_path, &bounds_path] {
        let mode = fs::metadata(path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o644, "{}", path.display());
    }
}

// =============================================================================
// Non-finite input
// =============================================================================

#[test]
fn nan_target_is_rejected_regardless_of_position() {
    for first in [true, false] {
        let mut data = ScaledData::new(3, 1).unwrap();
        let targets = if first {
            [f64::NAN, 1.0, 5.0]
        } else {
            [1.0, f64::NAN, 5.0]
        };
        let mut rejected = 0;
        for (i, &y) in targets.iter().enumerate() {
            match data.add_row(&[i as f64], y, i) {
                Ok(()) => {}
                Err(ScalingError::NonFiniteValue { column, .. }) => {
                    assert_eq!(column, Column::Target);
                    rejected += 1;
                }
                Err(other) => panic!("unexpected error: {other:?}"),
            }
        }
        assert_eq!(rejected, 1);
        assert_eq!(data.target_min(), Some(1.0));
        assert_eq!(data.target_max(), Some(5.0));
    }
}

#[test]
fn nan_in_csv_is_a_parse_error() {
    let err = read_csv(
        "NaN,1.0\n10.0,5.0\n5.0,3.0\n".as_bytes(),
        &CsvOptions::default(),
        &ScalingConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(err, ScalingError::Parse { line: 1, .. }));
}

#[test]
fn overflowing_target_range_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let data_path = dir.path().join("normalized.csv");
    let bounds_path = dir.path().join("bounds.txt");

    let mut data = ScaledData::new(2, 1).unwrap();
    data.add_row(&[0.0], -1e308, 0).unwrap();
    data.add_row(&[1.0], 1e308, 1).unwrap();

    assert!(matches!(
        data.scale_target(),
        Err(ScalingError::NonFiniteRange {
            column: Column::Target,
            ..
        })
    ));
    assert_eq!(
        data.normalize_values(&data_path, &bounds_path).unwrap_err(),
        ScalingError::ScaleRequired
    );
    assert!(!data_path.exists());
    assert!(!bounds_path.exists());
}

// =============================================================================
// Round trip through files
// =============================================================================

#[test]
fn exported_files_invert_to_original_values() {
    let dir = tempfile::tempdir().unwrap();
    let data_path = dir.path().join("normalized.csv");
    let bounds_path = dir.path().join("bounds.txt");

    let features = [
        vec![0.125, -3.0],
        vec![17.5, 4.25],
        vec![9.0, 0.5],
        vec![-2.0, 1234.5],
    ];
    let targets = [3.3, -1.7, 42.0, 0.001];

    let mut data = ScaledData::new(features.len(), 2).unwrap();
    for (i, (row, &y)) in features.iter().zip(&targets).enumerate() {
        data.add_row(row, y, i).unwrap();
    }
    data.scale_target().unwrap();
    data.normalize_values(&data_path, &bounds_path).unwrap();

    let bounds = BoundsTable::read_from(&bounds_path).unwrap();
    for (i, line) in read_lines(&data_path).iter().enumerate() {
        let normalized: Vec<f64> = line.split(',').map(|v| v.parse().unwrap()).collect();
        let original = bounds.denormalize_row(&normalized).unwrap();

        for (j, &x) in features[i].iter().enumerate() {
            assert_relative_eq!(original[j], x, max_relative = 1e-9, epsilon = 1e-9);
        }
        assert_relative_eq!(original[2], targets[i], max_relative = 1e-9, epsilon = 1e-9);
    }
}

#[test]
fn csv_load_then_export() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input.csv");
    let data_path = dir.path().join("normalized.csv");
    let bounds_path = dir.path().join("bounds.txt");
    fs::write(&input, "0.0,1.0\n10.0,5.0\n5.0,3.0\n").unwrap();

    let data = load_csv(&input, &CsvOptions::default(), &ScalingConfig::default()).unwrap();
    data.normalize_values(&data_path, &bounds_path).unwrap();

    assert_eq!(
        fs::read_to_string(&data_path).unwrap(),
        "0.0,0.0\n1.0,1.0\n0.5,0.5\n"
    );
    assert_eq!(fs::read_to_string(&bounds_path).unwrap(), "0.0 10.0\n1.0 5.0\n");
}

// =============================================================================
// Read-only view
// =============================================================================

fn summarize(source: &dyn DataSource) -> (usize, usize, Option<f64>) {
    (
        source.number_of_fitness_cases(),
        source.number_of_features(),
        source.target_mean(),
    )
}

#[test]
fn dataset_is_usable_through_data_source() {
    let data = three_case_dataset();
    assert_eq!(summarize(&data), (3, 1, Some(3.0)));
    assert_eq!(data.input_values()[1], vec![10.0]);
    assert_eq!(data.target_values(), &[1.0, 5.0, 3.0]);
}
