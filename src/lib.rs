//! OPTICS cluster ordering for point datasets.
//!
//! This crate provides tools for:
//! - Ordering points by density reachability (OPTICS) with a linear-scan neighborhood
//! - Producing reachability plots and the clusters formed during traversal
//! - Loading point CSVs and writing ordering results back to CSV
//!
//! # Example
//!
//! ```
//! use optics_ordering::ClusterOrderer;
//!
//! let points = vec![vec![1.0, 1.0]; 4];
//! let mut orderer = ClusterOrderer::new();
//! orderer.run(points, Some(1.0), Some(2), None).unwrap();
//! let plot = orderer.reachability_plot();
//! assert_eq!(plot[0].reachability, None);
//! assert_eq!(plot[1].reachability, Some(0.0));
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod processors;

pub use config::{InputConfig, OpticsConfig, PipelineConfig};
pub use crate::core::{Cluster, Dataset, DistanceFn, DistanceMetric, Point, SeedList, SortOrder};
pub use processors::{ClusterOrderer, OpticsError, ReachabilityPoint};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
