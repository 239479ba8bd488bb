//! Core data types, the seed list and I/O operations.

pub mod distance;
pub mod loaders;
pub mod seed_list;
pub mod writers;

pub use distance::{euclidean_distance, DistanceFn, DistanceMetric};
pub use loaders::{load_points_csv, LoaderError};
pub use seed_list::{SeedList, SeedListError, SortOrder};
pub use writers::{write_clusters_csv, write_reachability_csv, WriteError};

/// A point: coordinates of any dimensionality.
pub type Point = Vec<f64>;

/// Points addressed by their index.
pub type Dataset = Vec<Point>;

/// Point indices of one cluster in discovery order.
pub type Cluster = Vec<usize>;
