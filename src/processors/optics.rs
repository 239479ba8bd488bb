//! OPTICS cluster ordering over a linear-scan neighborhood model.
//!
//! [`ClusterOrderer`] walks the dataset in index order, opens a cluster at every
//! unprocessed point and grows it through a [`SeedList`] ranked by
//! reachability distance. The output is the processing order with each point's
//! reachability (the reachability plot) plus the clusters formed on the way.
//!
//! # Example
//!
//! ```
//! use optics_ordering::processors::optics::ClusterOrderer;
//!
//! let dataset = vec![vec![0.0, 0.0], vec![0.0, 1.0], vec![0.0, 8.0], vec![0.0, 9.0]];
//! let mut orderer = ClusterOrderer::new();
//! let clusters = orderer.run(dataset, Some(3.0), Some(2), None).unwrap();
//! assert_eq!(clusters, &[vec![0, 1], vec![2, 3]]);
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result as AnyResult};
use thiserror::Error;

use crate::config::{OpticsConfig, PipelineConfig};
use crate::core::distance::{euclidean_distance, DistanceFn};
use crate::core::seed_list::{SeedList, SortOrder};
use crate::core::{Cluster, Dataset};

/// Errors raised by the cluster orderer.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum OpticsError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result type for orderer operations.
pub type Result<T> = std::result::Result<T, OpticsError>;

/// One entry of the reachability plot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReachabilityPoint {
    /// Index of the point in the dataset.
    pub point_id: usize,
    /// Reachability at the moment the point was processed; `None` for points
    /// that opened a cluster without being reached first.
    pub reachability: Option<f64>,
}

/// Per-point traversal state, rebuilt at the start of every run.
#[derive(Debug, Clone, Default)]
struct TraversalState {
    processed: Vec<bool>,
    reachability: Vec<Option<f64>>,
}

impl TraversalState {
    fn reset(&mut self, size: usize) {
        self.processed = vec![false; size];
        self.reachability = vec![None; size];
    }
}

/// One pass over the seed list: scans positions `position..end`, where `end`
/// is the seed list length when the pass started.
struct ScanFrame {
    position: usize,
    end: usize,
}

impl ScanFrame {
    fn capture(seeds: &SeedList) -> Self {
        Self {
            position: 0,
            end: seeds.len(),
        }
    }
}

/// OPTICS engine owning the dataset, the configuration and traversal state.
///
/// Configuration survives between runs: any parameter not supplied to
/// [`ClusterOrderer::run`] keeps its previous value.
pub struct ClusterOrderer {
    dataset: Dataset,
    epsilon: f64,
    min_pts: usize,
    distance: DistanceFn,
    state: TraversalState,
    clusters: Vec<Cluster>,
    ordered_list: Vec<usize>,
}

impl ClusterOrderer {
    /// Creates an orderer with `epsilon = 1`, `min_pts = 1` and Euclidean distance.
    pub fn new() -> Self {
        Self {
            dataset: Vec::new(),
            epsilon: 1.0,
            min_pts: 1,
            distance: Box::new(euclidean_distance),
            state: TraversalState::default(),
            clusters: Vec::new(),
            ordered_list: Vec::new(),
        }
    }

    /// Creates an orderer with any subset of the parameters supplied.
    ///
    /// # Errors
    ///
    /// Returns [`OpticsError::InvalidArgument`] for a negative or non-finite epsilon.
    pub fn with_params(
        dataset: Option<Dataset>,
        epsilon: Option<f64>,
        min_pts: Option<usize>,
        distance: Option<DistanceFn>,
    ) -> Result<Self> {
        let mut orderer = Self::new();
        orderer.configure(epsilon, min_pts, distance)?;
        if let Some(dataset) = dataset {
            orderer.set_dataset(dataset);
        }
        Ok(orderer)
    }

    /// Creates an orderer from a deserialized [`OpticsConfig`].
    pub fn from_config(config: &OpticsConfig) -> Result<Self> {
        Self::with_params(
            None,
            Some(config.epsilon),
            Some(config.min_pts),
            Some(config.metric.boxed()),
        )
    }

    /// Updates configuration values that are supplied.
    ///
    /// `Some(0.0)` for epsilon and `Some(0)` for `min_pts` count as not
    /// supplied and keep the current value.
    pub fn configure(
        &mut self,
        epsilon: Option<f64>,
        min_pts: Option<usize>,
        distance: Option<DistanceFn>,
    ) -> Result<()> {
        if let Some(epsilon) = epsilon {
            if !epsilon.is_finite() || epsilon < 0.0 {
                return Err(OpticsError::InvalidArgument(format!(
                    "epsilon must be a positive finite number, {} given",
                    epsilon
                )));
            }
            if epsilon > 0.0 {
                self.epsilon = epsilon;
            }
        }

        if let Some(min_pts) = min_pts.filter(|&m| m > 0) {
            self.min_pts = min_pts;
        }

        if let Some(distance) = distance {
            self.distance = distance;
        }

        Ok(())
    }

    /// Replaces the dataset and clears all results of the previous run.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        self.dataset = dataset;
        self.state.reset(self.dataset.len());
        self.clusters.clear();
        self.ordered_list.clear();
    }

    /// Runs the OPTICS traversal and returns the clusters in creation order.
    ///
    /// # Algorithm
    ///
    /// For each point index in ascending order that is not yet processed:
    /// 1. Mark it processed, open a cluster holding only that point and append
    ///    it to the ordered list.
    /// 2. If it is a core point, seed an ascending [`SeedList`] with its
    ///    neighbors ranked by reachability and expand the cluster from it.
    ///
    /// # Errors
    ///
    /// Returns [`OpticsError::InvalidArgument`] if `epsilon` is negative or not finite.
    pub fn run(
        &mut self,
        dataset: Dataset,
        epsilon: Option<f64>,
        min_pts: Option<usize>,
        distance: Option<DistanceFn>,
    ) -> Result<&[Cluster]> {
        self.configure(epsilon, min_pts, distance)?;
        self.set_dataset(dataset);

        log::debug!(
            "OPTICS run: {} points, epsilon={}, min_pts={}",
            self.dataset.len(),
            self.epsilon,
            self.min_pts
        );

        for point_id in 0..self.dataset.len() {
            if self.state.processed[point_id] {
                continue;
            }

            self.state.processed[point_id] = true;
            self.clusters.push(vec![point_id]);
            let cluster_id = self.clusters.len() - 1;
            self.ordered_list.push(point_id);

            let neighbors = self.region_query(point_id, None);
            if self.distance_to_core(point_id).is_some() {
                log::debug!(
                    "cluster {} seeded at core point {} ({} neighbors)",
                    cluster_id,
                    point_id,
                    neighbors.len()
                );
                let mut seeds = SeedList::new(SortOrder::Ascending);
                self.update_queue(point_id, &neighbors, &mut seeds);
                self.expand_cluster(cluster_id, &mut seeds);
            }
        }

        log::info!(
            "OPTICS ordered {} points into {} clusters",
            self.ordered_list.len(),
            self.clusters.len()
        );

        Ok(&self.clusters)
    }

    /// Reachability plot of the last run, in processing order.
    pub fn reachability_plot(&self) -> Vec<ReachabilityPoint> {
        self.ordered_list
            .iter()
            .map(|&point_id| ReachabilityPoint {
                point_id,
                reachability: self.state.reachability[point_id],
            })
            .collect()
    }

    /// Indices of all points whose distance to `point_id` is strictly below `radius`.
    ///
    /// `point_id` itself is included. `None` and a radius of zero both mean
    /// the configured epsilon. Results are in ascending index order.
    ///
    /// # Panics
    ///
    /// Panics if `point_id` is not an index into the current dataset.
    pub(crate) fn region_query(&self, point_id: usize, radius: Option<f64>) -> Vec<usize> {
        let radius = self.effective_radius(radius);
        let origin = &self.dataset[point_id];

        self.dataset
            .iter()
            .enumerate()
            .filter(|(_, other)| (self.distance)(origin.as_slice(), other.as_slice()) < radius)
            .map(|(id, _)| id)
            .collect()
    }

    /// Smallest integer radius below epsilon whose region query holds at least
    /// `min_pts` points, or `None` if the point is not a core point.
    ///
    /// Only integer candidates `0, 1, 2, ..` strictly below epsilon are
    /// considered, so this is a coarse stand-in for the distance to the
    /// `min_pts`-th nearest neighbor. Candidate `0` queries at epsilon (see
    /// [`ClusterOrderer::region_query`]). Every later candidate `k < epsilon`
    /// sees a subset of that neighborhood because the region test is strict,
    /// so the scan is decided by candidate `0` alone and stops there.
    ///
    /// # Panics
    ///
    /// Panics if `point_id` is not an index into the current dataset.
    pub(crate) fn distance_to_core(&self, point_id: usize) -> Option<f64> {
        let radius = 0.0;
        if radius < self.epsilon && self.region_query(point_id, Some(radius)).len() >= self.min_pts
        {
            return Some(radius);
        }
        None
    }

    /// Pushes the unprocessed `neighbors` of core point `point_id` into `seeds`.
    ///
    /// A neighbor without reachability is inserted; one whose reachability
    /// strictly improves is moved to its new rank.
    fn update_queue(&mut self, point_id: usize, neighbors: &[usize], seeds: &mut SeedList) {
        let core_distance = self.distance_to_core(point_id).unwrap_or(0.0);
        let origin = &self.dataset[point_id];

        for &neighbor in neighbors {
            if self.state.processed[neighbor] {
                continue;
            }

            let dist = (self.distance)(origin.as_slice(), self.dataset[neighbor].as_slice());
            let candidate = core_distance.max(dist);

            match self.state.reachability[neighbor] {
                None => {
                    self.state.reachability[neighbor] = Some(candidate);
                    seeds.insert(neighbor, candidate);
                }
                Some(current) if candidate < current => {
                    log::trace!(
                        "reachability of {} lowered {} -> {} via {}",
                        neighbor,
                        current,
                        candidate,
                        point_id
                    );
                    self.state.reachability[neighbor] = Some(candidate);
                    seeds.remove(neighbor);
                    seeds.insert(neighbor, candidate);
                }
                Some(_) => {}
            }
        }
    }

    /// Grows cluster `cluster_id` from `seeds`.
    ///
    /// Each pass scans the seed list front to back up to the length it had
    /// when the pass began, reading the list as it changes. Processing a core
    /// point updates the list and starts a nested pass; when the nested pass
    /// finishes the outer one resumes at its own position. Passes are kept on
    /// an explicit stack so nesting depth is not bounded by the call stack.
    fn expand_cluster(&mut self, cluster_id: usize, seeds: &mut SeedList) {
        let mut frames = vec![ScanFrame::capture(seeds)];

        while let Some(frame) = frames.last_mut() {
            if frame.position >= frame.end {
                frames.pop();
                continue;
            }
            let position = frame.position;
            frame.position += 1;

            let Some(&point_id) = seeds.elements().get(position) else {
                continue;
            };
            if self.state.processed[point_id] {
                continue;
            }

            let neighbors = self.region_query(point_id, None);
            self.state.processed[point_id] = true;
            self.clusters[cluster_id].push(point_id);
            self.ordered_list.push(point_id);

            if self.distance_to_core(point_id).is_some() {
                self.update_queue(point_id, &neighbors, seeds);
                frames.push(ScanFrame::capture(seeds));
            }
        }
    }

    #[inline]
    fn effective_radius(&self, radius: Option<f64>) -> f64 {
        match radius {
            Some(r) if r != 0.0 => r,
            _ => self.epsilon,
        }
    }

    /// Clusters of the last run.
    #[inline]
    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    /// Point indices in processing order.
    #[inline]
    pub fn ordered_list(&self) -> &[usize] {
        &self.ordered_list
    }

    #[inline]
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    #[inline]
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    #[inline]
    pub fn min_pts(&self) -> usize {
        self.min_pts
    }
}

impl Default for ClusterOrderer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ClusterOrderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClusterOrderer")
            .field("points", &self.dataset.len())
            .field("epsilon", &self.epsilon)
            .field("min_pts", &self.min_pts)
            .field("clusters", &self.clusters.len())
            .field("ordered", &self.ordered_list.len())
            .finish_non_exhaustive()
    }
}

/// Files and counts produced by [`process_csv_ordering`].
#[derive(Debug, Clone)]
pub struct OrderingReport {
    pub reachability_csv: PathBuf,
    pub clusters_csv: PathBuf,
    pub points: usize,
    pub clusters: usize,
    /// Plot entries with undefined reachability.
    pub undefined: usize,
}

/// Process a point CSV: load, order, and write reachability and cluster CSVs.
///
/// Output files are `<stem>_reachability.csv` and `<stem>_clusters.csv` in
/// `output_dir`, defaulting to the input file's directory.
///
/// # Errors
///
/// Returns error if loading, configuration or file writing fails.
pub fn process_csv_ordering(
    csv_path: &Path,
    output_dir: Option<&Path>,
    config: &PipelineConfig,
) -> AnyResult<OrderingReport> {
    use crate::core::loaders::load_points_csv;
    use crate::core::writers::{write_clusters_csv, write_reachability_csv};

    let dataset = load_points_csv(csv_path, &config.input)
        .with_context(|| format!("failed to load points from {}", csv_path.display()))?;
    let file_name = csv_path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("unknown");
    log::info!("{}: loaded {} points", file_name, dataset.len());

    let mut orderer = ClusterOrderer::from_config(&config.optics)?;
    let points = dataset.len();
    let clusters = orderer.run(dataset, None, None, None)?.len();
    let plot = orderer.reachability_plot();
    let undefined = plot.iter().filter(|p| p.reachability.is_none()).count();
    log::info!(
        "{}: {} clusters, {} undefined reachabilities",
        file_name,
        clusters,
        undefined
    );

    let out_dir = output_dir
        .map(PathBuf::from)
        .unwrap_or_else(|| csv_path.parent().unwrap_or(Path::new(".")).to_path_buf());
    let stem = csv_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");

    let reachability_csv = out_dir.join(format!("{}_reachability.csv", stem));
    write_reachability_csv(&reachability_csv, &plot)?;
    log::info!("Reachability CSV -> {}", reachability_csv.display());

    let clusters_csv = out_dir.join(format!("{}_clusters.csv", stem));
    write_clusters_csv(&clusters_csv, orderer.clusters())?;
    log::info!("Clusters CSV -> {}", clusters_csv.display());

    Ok(OrderingReport {
        reachability_csv,
        clusters_csv,
        points,
        clusters,
        undefined,
    })
}
