//! Loader for point datasets stored as CSV.
//!
//! Each record is one point; every field is one coordinate. Records may have
//! different lengths, since the orderer tolerates mixed dimensionality.

use std::path::{Path, PathBuf};

use csv::ReaderBuilder;
use thiserror::Error;

use super::Dataset;
use crate::config::InputConfig;

/// Errors that can occur during file loading.
#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Empty file: {0}")]
    EmptyFile(PathBuf),

    #[error("Invalid delimiter {0:?}: must be a single-byte character")]
    InvalidDelimiter(char),

    #[error("Parse error at record {record}, field {field}: {value:?} is not a number")]
    ParseError {
        record: usize,
        field: usize,
        value: String,
    },
}

/// Result type for loader operations.
pub type Result<T> = std::result::Result<T, LoaderError>;

/// Load a point dataset from a CSV file.
///
/// # Arguments
///
/// * `path` - Path to the CSV file
/// * `config` - Header and delimiter settings
///
/// # Errors
///
/// Returns an error if the file cannot be read, a field is not a number, or
/// the file holds no records.
pub fn load_points_csv<P: AsRef<Path>>(path: P, config: &InputConfig) -> Result<Dataset> {
    let path = path.as_ref();

    if !config.delimiter.is_ascii() {
        return Err(LoaderError::InvalidDelimiter(config.delimiter));
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(config.has_headers)
        .delimiter(config.delimiter as u8)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)?;

    let mut dataset = Dataset::new();
    for (record_idx, record) in reader.records().enumerate() {
        let record = record?;
        let point = record
            .iter()
            .enumerate()
            .map(|(field_idx, value)| {
                value.parse::<f64>().map_err(|_| LoaderError::ParseError {
                    record: record_idx,
                    field: field_idx,
                    value: value.to_string(),
                })
            })
            .collect::<Result<Vec<f64>>>()?;
        dataset.push(point);
    }

    if dataset.is_empty() {
        return Err(LoaderError::EmptyFile(path.to_path_buf()));
    }

    log::debug!("Loaded {} points from {}", dataset.len(), path.display());
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_points_csv() -> Result<()> {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "0.0,0.0").unwrap();
        writeln!(file, "0.0, 1.5").unwrap();
        writeln!(file, "8,9").unwrap();
        file.flush().unwrap();

        let dataset = load_points_csv(file.path(), &InputConfig::default())?;
        assert_eq!(dataset, vec![vec![0.0, 0.0], vec![0.0, 1.5], vec![8.0, 9.0]]);

        Ok(())
    }

    #[test]
    fn test_load_points_csv_with_header_and_ragged_rows() -> Result<()> {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "x;y;z").unwrap();
        writeln!(file, "1;2;3").unwrap();
        writeln!(file, "4").unwrap();
        file.flush().unwrap();

        let config = InputConfig {
            has_headers: true,
            delimiter: ';',
        };
        let dataset = load_points_csv(file.path(), &config)?;
        assert_eq!(dataset, vec![vec![1.0, 2.0, 3.0], vec![4.0]]);

        Ok(())
    }

    #[test]
    fn test_load_points_csv_rejects_text() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "1.0,2.0").unwrap();
        writeln!(file, "3.0,abc").unwrap();
        file.flush().unwrap();

        match load_points_csv(file.path(), &InputConfig::default()) {
            Err(LoaderError::ParseError {
                record,
                field,
                value,
            }) => {
                assert_eq!(record, 1);
                assert_eq!(field, 1);
                assert_eq!(value, "abc");
            }
            other => panic!("Expected ParseError, got {other:?}"),
        }
    }

    #[test]
    fn test_load_points_csv_empty() {
        let file = NamedTempFile::new().unwrap();
        let result = load_points_csv(file.path(), &InputConfig::default());
        assert!(matches!(result, Err(LoaderError::EmptyFile(_))));
    }

    #[test]
    fn test_load_points_csv_missing_file() {
        let result = load_points_csv("/nonexistent/points.csv", &InputConfig::default());
        assert!(result.is_err());
    }
}
