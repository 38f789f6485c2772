//! projclust-algorithms: Projected density-based clustering.
//!
//! This crate provides:
//! - **Projected DBSCAN** - cluster expansion gated by local dimensionality
//! - **Reference collaborators** - an in-memory vector space, Euclidean and
//!   locally weighted metrics, brute-force range queries
//! - **Neighborhood cache** - range queries evaluated in parallel up front
//!
#![warn(missing_docs)]

mod metric;
mod neighborhood;
mod projected_dbscan;
mod scan;
mod subspace;
mod vector_space;

pub use metric::{parse_radius, EuclideanMetric, LocallyWeightedMetric};
pub use neighborhood::PrecomputedNeighborhoods;
pub use projected_dbscan::ProjectedDbscan;
pub use scan::LinearScan;
pub use subspace::{LocalSubspace, DEFAULT_WEAK_WEIGHT};
pub use vector_space::VectorSpace;

// Re-export core clustering types
pub use projclust_core::{
    Cluster, Clustering, ClusteringConfig, ClusteringProgress, ClusteringStatistics,
    LogProgress, NoProgress, PointId, ProgressObserver, ProjectedDbscanParams,
};
