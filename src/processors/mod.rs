//! Data processing modules.

pub mod optics;

// Re-export key types for convenience
pub use optics::{
    process_csv_ordering, ClusterOrderer, OpticsError, OrderingReport, ReachabilityPoint,
};
