//! Clustering results and configuration.

use crate::error::{Error, Result};
use crate::space::{Distance, DistanceMetric, PointId};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A group of points produced by a clustering run.
///
/// Points are kept in discovery order. Exactly one group per [`Clustering`]
/// carries the noise flag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Cluster {
    /// Points belonging to this group.
    pub points: Vec<PointId>,
    /// Whether this group holds the points not assigned to any cluster.
    pub noise: bool,
}

impl Cluster {
    /// Creates a regular cluster from points in discovery order.
    #[must_use]
    pub fn new(points: Vec<PointId>) -> Self {
        Self {
            points,
            noise: false,
        }
    }

    /// Creates the noise group.
    #[must_use]
    pub fn noise(points: Vec<PointId>) -> Self {
        Self {
            points,
            noise: true,
        }
    }

    /// Returns the number of points in the group.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if the group is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns true if this is the noise group.
    #[must_use]
    pub fn is_noise(&self) -> bool {
        self.noise
    }

    /// Returns true if `id` belongs to this group.
    #[must_use]
    pub fn contains(&self, id: PointId) -> bool {
        self.points.contains(&id)
    }

    /// Returns an iterator over the points.
    pub fn iter(&self) -> impl Iterator<Item = &PointId> {
        self.points.iter()
    }
}

impl FromIterator<PointId> for Cluster {
    fn from_iter<I: IntoIterator<Item = PointId>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Partition of a point space into clusters plus one noise group.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Clustering {
    clusters: Vec<Cluster>,
    noise: Cluster,
}

impl Default for Clustering {
    fn default() -> Self {
        Self::new(Vec::new(), Vec::new())
    }
}

impl Clustering {
    /// Builds a clustering from clusters in emission order and the noise set.
    #[must_use]
    pub fn new(clusters: Vec<Vec<PointId>>, noise: Vec<PointId>) -> Self {
        Self {
            clusters: clusters.into_iter().map(Cluster::new).collect(),
            noise: Cluster::noise(noise),
        }
    }

    /// Regular clusters in emission order.
    #[must_use]
    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    /// The noise group.
    #[must_use]
    pub fn noise(&self) -> &Cluster {
        &self.noise
    }

    /// Number of regular clusters.
    #[must_use]
    pub fn num_clusters(&self) -> usize {
        self.clusters.len()
    }

    /// Every group: regular clusters first, then the noise group.
    pub fn all_clusters(&self) -> impl Iterator<Item = &Cluster> {
        self.clusters.iter().chain(std::iter::once(&self.noise))
    }

    /// Per-point cluster labels for a space of `len` points.
    ///
    /// Label `Some(i)` refers to `clusters()[i]`; noise points get `None`.
    #[must_use]
    pub fn labels(&self, len: usize) -> Vec<Option<usize>> {
        let mut labels = vec![None; len];
        for (label, cluster) in self.clusters.iter().enumerate() {
            for id in cluster.iter() {
                if let Some(slot) = labels.get_mut(id.index()) {
                    *slot = Some(label);
                }
            }
        }
        labels
    }

    /// Summary counts for this clustering.
    #[must_use]
    pub fn statistics(&self) -> ClusteringStatistics {
        ClusteringStatistics::from_clusters(&self.clusters, self.noise.len())
    }
}

/// Summary of a [`Clustering`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClusteringStatistics {
    /// Number of regular clusters.
    pub num_clusters: usize,
    /// Points assigned to some regular cluster.
    pub clustered_points: usize,
    /// Points in the noise group.
    pub noise_points: usize,
    /// Size of the largest regular cluster (0 if none).
    pub largest_cluster: usize,
    /// Mean regular cluster size (0.0 if none).
    pub mean_cluster_size: f64,
}

impl ClusteringStatistics {
    #[allow(clippy::cast_precision_loss)]
    fn from_clusters(clusters: &[Cluster], noise_points: usize) -> Self {
        let clustered_points: usize = clusters.iter().map(Cluster::len).sum();
        let largest_cluster = clusters.iter().map(Cluster::len).max().unwrap_or(0);
        let mean_cluster_size = if clusters.is_empty() {
            0.0
        } else {
            clustered_points as f64 / clusters.len() as f64
        };
        Self {
            num_clusters: clusters.len(),
            clustered_points,
            noise_points,
            largest_cluster,
            mean_cluster_size,
        }
    }

    /// Total number of points covered by the clustering.
    #[must_use]
    pub fn total_points(&self) -> usize {
        self.clustered_points + self.noise_points
    }
}

/// Raw configuration for projected DBSCAN.
///
/// Epsilon is kept in the textual notation of the distance metric; it only
/// becomes a typed radius once [`resolve`](Self::resolve)d against a metric.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClusteringConfig {
    /// Maximum radius of the neighborhood, in the metric's notation.
    pub epsilon: String,
    /// Minimum number of points in the epsilon-neighborhood of a core point.
    pub min_pts: usize,
    /// Intrinsic dimensionality of the clusters to find.
    pub lambda: usize,
}

impl Default for ClusteringConfig {
    fn default() -> Self {
        Self {
            epsilon: "1.0".to_string(),
            min_pts: 5,
            lambda: 1,
        }
    }
}

impl ClusteringConfig {
    /// Creates a new clustering configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the epsilon radius.
    #[must_use]
    pub fn with_epsilon(mut self, epsilon: impl Into<String>) -> Self {
        self.epsilon = epsilon.into();
        self
    }

    /// Sets the minimum neighborhood size.
    #[must_use]
    pub fn with_min_pts(mut self, min_pts: usize) -> Self {
        self.min_pts = min_pts;
        self
    }

    /// Sets the target cluster dimensionality.
    #[must_use]
    pub fn with_lambda(mut self, lambda: usize) -> Self {
        self.lambda = lambda;
        self
    }

    /// Checks the metric-independent constraints.
    ///
    /// # Errors
    ///
    /// Returns an error if `min_pts` or `lambda` is zero or epsilon is blank.
    pub fn validate(&self) -> Result<()> {
        check_positive("min_pts", self.min_pts)?;
        check_positive("lambda", self.lambda)?;
        if self.epsilon.trim().is_empty() {
            return Err(Error::InvalidEpsilon {
                raw: self.epsilon.clone(),
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Validates the configuration and parses epsilon with `metric`.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails or the metric rejects epsilon.
    pub fn resolve<M: DistanceMetric>(
        &self,
        metric: &M,
    ) -> Result<ProjectedDbscanParams<M::Distance>> {
        self.validate()?;
        let epsilon = metric.parse_distance(self.epsilon.trim())?;
        ProjectedDbscanParams::new(epsilon, self.min_pts, self.lambda)
    }

    /// Decodes and validates a configuration from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or validation fails.
    #[cfg(feature = "serde")]
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}

/// Validated parameters of a projected DBSCAN run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedDbscanParams<D> {
    epsilon: D,
    min_pts: usize,
    lambda: usize,
}

impl<D: Distance> ProjectedDbscanParams<D> {
    /// Creates validated parameters.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if `min_pts` or `lambda` is zero.
    pub fn new(epsilon: D, min_pts: usize, lambda: usize) -> Result<Self> {
        check_positive("min_pts", min_pts)?;
        check_positive("lambda", lambda)?;
        Ok(Self {
            epsilon,
            min_pts,
            lambda,
        })
    }

    /// Neighborhood radius.
    #[must_use]
    pub fn epsilon(&self) -> D {
        self.epsilon
    }

    /// Minimum neighborhood size of a core point.
    #[must_use]
    pub fn min_pts(&self) -> usize {
        self.min_pts
    }

    /// Target cluster dimensionality.
    #[must_use]
    pub fn lambda(&self) -> usize {
        self.lambda
    }
}

fn check_positive(name: &'static str, value: usize) -> Result<()> {
    if value == 0 {
        return Err(Error::InvalidParameter {
            name,
            message: "must be greater than 0",
        });
    }
    Ok(())
}
