//! Loading fitness cases from numeric CSV.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::config::{CsvOptions, ScalingConfig};
use crate::core::{DataSource, ScaledData};
use crate::error::{Result, ScalingError};

/// Load a CSV file into a dataset with its target already scaled.
///
/// The file is read fully to size the dataset; every record must have the
/// same number of numeric fields.
pub fn load_csv<P: AsRef<Path>>(
    path: P,
    options: &CsvOptions,
    config: &ScalingConfig,
) -> Result<ScaledData> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| ScalingError::io(path, e))?;
    let data = read_csv(file, options, config)?;
    tracing::info!(
        path = %path.display(),
        rows = data.number_of_fitness_cases(),
        features = data.number_of_features(),
        "loaded dataset"
    );
    Ok(data)
}

/// Read CSV from any reader. See [`load_csv`].
pub fn read_csv<R: Read>(
    reader: R,
    options: &CsvOptions,
    config: &ScalingConfig,
) -> Result<ScaledData> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(options.has_headers)
        .delimiter(options.delimiter)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut rows: Vec<(Vec<f64>, f64)> = Vec::new();
    let mut width: Option<usize> = None;

    for result in rdr.records() {
        let record = result.map_err(csv_error)?;
        let line = record_line(&record);

        let expected = *width.get_or_insert(record.len());
        if record.len() != expected {
            return Err(ScalingError::Parse {
                line,
                message: format!("expected {} fields, got {}", expected, record.len()),
            });
        }

        let target_column = options.target_column.unwrap_or(expected.saturating_sub(1));
        if target_column >= expected {
            return Err(ScalingError::IndexOutOfRange {
                index: target_column,
                size: expected,
            });
        }

        let mut features = Vec::with_capacity(expected.saturating_sub(1));
        let mut target = 0.0;
        for (j, field) in record.iter().enumerate() {
            let value = parse_field(field, line)?;
            if j == target_column {
                target = value;
            } else {
                features.push(value);
            }
        }
        rows.push((features, target));
    }

    let number_of_features = width.map_or(0, |w| w.saturating_sub(1));
    let mut data = ScaledData::with_config(rows.len(), number_of_features, config.clone())?;
    for (index, (features, target)) in rows.iter().enumerate() {
        data.add_row(features, *target, index)?;
    }
    data.scale_target()?;
    Ok(data)
}

fn record_line(record: &StringRecord) -> usize {
    record.position().map_or(0, |p| p.line() as usize)
}

fn parse_field(field: &str, line: usize) -> Result<f64> {
    let value = field.parse::<f64>().map_err(|_| ScalingError::Parse {
        line,
        message: format!("'{}' is not a number", field),
    })?;
    if !value.is_finite() {
        return Err(ScalingError::Parse {
            line,
            message: format!("'{}' is not a finite number", field),
        });
    }
    Ok(value)
}

fn csv_error(err: csv::Error) -> ScalingError {
    let line = err.position().map_or(0, |p| p.line() as usize);
    ScalingError::Parse {
        line,
        message: err.to_string(),
    }
}
