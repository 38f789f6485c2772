//! Error types for projclust-core.

use thiserror::Error;

/// Result type alias for projclust operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for projclust operations.
///
/// Clustering itself never fails: every error here is raised while building
/// parameters or point spaces, before a run starts.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid parameter value.
    #[error("invalid parameter {name}: {message}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Human-readable explanation.
        message: &'static str,
    },

    /// Epsilon string does not match the pattern of the distance metric.
    #[error("invalid epsilon {raw:?}: {reason}")]
    InvalidEpsilon {
        /// The raw epsilon value as supplied.
        raw: String,
        /// Why the metric rejected it.
        reason: String,
    },

    /// Points or matrices have inconsistent dimensionality.
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch {
        /// Expected dimensionality.
        expected: usize,
        /// Found dimensionality.
        found: usize,
    },

    /// A per-point attribute column does not cover every point.
    #[error("{what} has {found} entries, expected {expected}")]
    LengthMismatch {
        /// Name of the attribute column.
        what: &'static str,
        /// Number of points in the space.
        expected: usize,
        /// Number of entries supplied.
        found: usize,
    },

    /// Configuration could not be decoded.
    #[cfg(feature = "serde")]
    #[error("configuration error: {0}")]
    Json(#[from] serde_json::Error),
}
