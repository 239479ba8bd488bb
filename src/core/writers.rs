//! CSV writers for OPTICS results.
//!
//! - Reachability plot: `order,point_id,reachability`, with an empty cell for
//!   undefined reachability
//! - Cluster membership: `point_id,cluster_id` in discovery order

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

use thiserror::Error;

use super::Cluster;
use crate::processors::optics::ReachabilityPoint;

/// Errors that can occur during write operations.
#[derive(Error, Debug)]
pub enum WriteError {
    /// Failed to create parent directories.
    #[error("failed to create parent directories for '{path}': {source}")]
    CreateDirectory {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to create or open file for writing.
    #[error("failed to create file '{path}': {source}")]
    CreateFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write data to file.
    #[error("failed to write to file '{path}': {source}")]
    WriteFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// CSV writing error.
    #[error("CSV write error for '{path}': {source}")]
    CsvError {
        path: String,
        #[source]
        source: csv::Error,
    },
}

/// Result type for write operations.
pub type Result<T> = std::result::Result<T, WriteError>;

/// Creates parent directories for a file path if they don't exist.
fn ensure_parent_dirs(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| WriteError::CreateDirectory {
                path: parent.display().to_string(),
                source: e,
            })?;
        }
    }
    Ok(())
}

/// Opens a CSV writer on `path`, creating parent directories first.
fn create_csv_writer(path: &Path) -> Result<csv::Writer<BufWriter<File>>> {
    ensure_parent_dirs(path)?;
    let file = File::create(path).map_err(|e| WriteError::CreateFile {
        path: path.display().to_string(),
        source: e,
    })?;
    Ok(csv::Writer::from_writer(BufWriter::new(file)))
}

fn write_rows<I>(path: &Path, header: &[&str], rows: I) -> Result<()>
where
    I: IntoIterator<Item = Vec<String>>,
{
    let mut csv_writer = create_csv_writer(path)?;
    let path_str = path.display().to_string();

    csv_writer
        .write_record(header)
        .map_err(|e| WriteError::CsvError {
            path: path_str.clone(),
            source: e,
        })?;

    for row in rows {
        csv_writer
            .write_record(&row)
            .map_err(|e| WriteError::CsvError {
                path: path_str.clone(),
                source: e,
            })?;
    }

    csv_writer.flush().map_err(|e| WriteError::WriteFile {
        path: path_str,
        source: e,
    })?;

    Ok(())
}

/// Write a reachability plot to CSV.
///
/// One row per plot entry in processing order. Undefined reachability is
/// written as an empty field.
///
/// # Errors
///
/// Returns an error if the file or its parent directories cannot be created
/// or written.
pub fn write_reachability_csv(path: &Path, plot: &[ReachabilityPoint]) -> Result<()> {
    let rows = plot.iter().enumerate().map(|(order, entry)| {
        vec![
            order.to_string(),
            entry.point_id.to_string(),
            entry
                .reachability
                .map(|r| format!("{:.6}", r))
                .unwrap_or_default(),
        ]
    });
    write_rows(path, &["order", "point_id", "reachability"], rows)
}

/// Write cluster membership to CSV, one row per point.
///
/// # Errors
///
/// Returns an error if the file or its parent directories cannot be created
/// or written.
pub fn write_clusters_csv(path: &Path, clusters: &[Cluster]) -> Result<()> {
    let rows = clusters.iter().enumerate().flat_map(|(cluster_id, members)| {
        members
            .iter()
            .map(move |point_id| vec![point_id.to_string(), cluster_id.to_string()])
    });
    write_rows(path, &["point_id", "cluster_id"], rows)
}
