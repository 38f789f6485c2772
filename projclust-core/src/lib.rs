//! projclust-core: Core traits and types for projected density-based clustering.
//!
//! This crate provides the collaborator abstractions (point spaces, distance
//! metrics, range queries), the clustering result types, configuration and
//! progress reporting shared by the algorithm crates.
//!

pub mod clustering;
pub mod error;
pub mod progress;
pub mod space;

pub use clustering::{
    Cluster, Clustering, ClusteringConfig, ClusteringStatistics, ProjectedDbscanParams,
};
pub use error::{Error, Result};
pub use progress::{ClusteringProgress, LogProgress, NoProgress, ProgressObserver};
pub use space::{Distance, DistanceMetric, Neighbor, PointId, PointSpace, RangeQuery};
