//! Distance functions over coordinate sequences.
//!
//! Points are plain `f64` slices and may differ in dimensionality. Every
//! built-in metric compares only the common prefix `min(p.len(), q.len())`,
//! so mismatched points never produce an error.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Pluggable distance capability: symmetric and non-negative by contract.
pub type DistanceFn = Box<dyn Fn(&[f64], &[f64]) -> f64 + Send + Sync>;

/// Named metrics selectable from configuration files and the CLI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceMetric {
    #[default]
    Euclidean,
    Manhattan,
    Chebyshev,
}

impl DistanceMetric {
    /// Returns the plain function implementing this metric.
    pub fn function(self) -> fn(&[f64], &[f64]) -> f64 {
        match self {
            DistanceMetric::Euclidean => euclidean_distance,
            DistanceMetric::Manhattan => manhattan_distance,
            DistanceMetric::Chebyshev => chebyshev_distance,
        }
    }

    /// Boxes this metric as a [`DistanceFn`].
    pub fn boxed(self) -> DistanceFn {
        Box::new(self.function())
    }
}

impl FromStr for DistanceMetric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "euclidean" => Ok(DistanceMetric::Euclidean),
            "manhattan" | "cityblock" => Ok(DistanceMetric::Manhattan),
            "chebyshev" => Ok(DistanceMetric::Chebyshev),
            other => Err(format!(
                "unknown metric '{}' (expected euclidean, manhattan or chebyshev)",
                other
            )),
        }
    }
}

impl fmt::Display for DistanceMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DistanceMetric::Euclidean => "euclidean",
            DistanceMetric::Manhattan => "manhattan",
            DistanceMetric::Chebyshev => "chebyshev",
        };
        f.write_str(name)
    }
}

/// Euclidean distance over the common coordinate prefix of `p` and `q`.
#[inline]
pub fn euclidean_distance(p: &[f64], q: &[f64]) -> f64 {
    p.iter()
        .zip(q)
        .map(|(a, b)| (a - b) * (a - b))
        .sum::<f64>()
        .sqrt()
}

/// Manhattan (L1) distance over the common coordinate prefix.
#[inline]
pub fn manhattan_distance(p: &[f64], q: &[f64]) -> f64 {
    p.iter().zip(q).map(|(a, b)| (a - b).abs()).sum()
}

/// Chebyshev (L-infinity) distance over the common coordinate prefix.
#[inline]
pub fn chebyshev_distance(p: &[f64], q: &[f64]) -> f64 {
    p.iter()
        .zip(q)
        .map(|(a, b)| (a - b).abs())
        .fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_euclidean_basic() {
        assert!((euclidean_distance(&[0.0, 0.0], &[3.0, 4.0]) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_euclidean_identity_and_symmetry() {
        let points = [
            vec![1.0, 2.0, 3.0],
            vec![-4.5, 0.0, 7.25],
            vec![0.0],
            vec![],
        ];
        for p in &points {
            assert_eq!(euclidean_distance(p, p), 0.0);
            for q in &points {
                assert_eq!(euclidean_distance(p, q), euclidean_distance(q, p));
            }
        }
    }

    #[test]
    fn test_euclidean_common_prefix() {
        let p = [1.0, 2.0, 3.0];
        let q = [4.0, 6.0, 3.0, 100.0, -100.0];
        let expected = euclidean_distance(&p, &q[..3]);
        assert_eq!(euclidean_distance(&p, &q), expected);
        assert!((expected - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_other_metrics() {
        let p = [0.0, 0.0];
        let q = [3.0, -4.0];
        assert_eq!(manhattan_distance(&p, &q), 7.0);
        assert_eq!(chebyshev_distance(&p, &q), 4.0);
        assert_eq!(chebyshev_distance(&p, &[]), 0.0);
    }

    #[test]
    fn test_metric_lookup() {
        let metric: DistanceMetric = "Manhattan".parse().unwrap();
        assert_eq!(metric, DistanceMetric::Manhattan);
        assert_eq!((metric.function())(&[1.0], &[3.0]), 2.0);
        let boxed = DistanceMetric::default().boxed();
        assert_eq!(boxed(&[0.0, 0.0][..], &[3.0, 4.0][..]), 5.0);
        assert!("hamming".parse::<DistanceMetric>().is_err());
    }
}
