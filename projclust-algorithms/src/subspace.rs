//! Local subspace summaries produced by a local PCA.
//!
//! The eigen-decomposition itself happens upstream. A [`LocalSubspace`] only
//! keeps its result: the eigenvectors of a point's neighborhood, ordered by
//! decreasing eigenvalue, and how many of them are *strong* (span the local
//! subspace). From that it derives the point's local dimensionality and the
//! similarity matrix used by [`LocallyWeightedMetric`](crate::LocallyWeightedMetric).

use ndarray::{Array2, ArrayView1};
use projclust_core::{Error, Result};

/// Weight applied to weak eigen-directions when none is configured.
pub const DEFAULT_WEAK_WEIGHT: f64 = 50.0;

/// Eigenvectors of one point's neighborhood split into strong and weak parts.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalSubspace {
    /// Eigenvectors as columns, by decreasing eigenvalue.
    eigenvectors: Array2<f64>,
    strong: usize,
}

impl LocalSubspace {
    /// Creates a summary from column eigenvectors and the strong count.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if `eigenvectors` is not square
    /// or `strong` exceeds its dimensionality.
    pub fn new(eigenvectors: Array2<f64>, strong: usize) -> Result<Self> {
        let (rows, cols) = eigenvectors.dim();
        if rows != cols {
            return Err(Error::DimensionMismatch {
                expected: rows,
                found: cols,
            });
        }
        if strong > rows {
            return Err(Error::DimensionMismatch {
                expected: rows,
                found: strong,
            });
        }
        Ok(Self {
            eigenvectors,
            strong,
        })
    }

    /// Dimensionality of the embedding space.
    #[must_use]
    pub fn dimensionality(&self) -> usize {
        self.eigenvectors.nrows()
    }

    /// Number of strong eigenvectors, i.e. the local dimensionality.
    #[must_use]
    pub fn local_dimensionality(&self) -> usize {
        self.strong
    }

    /// The `i`-th eigenvector.
    #[must_use]
    pub fn eigenvector(&self, i: usize) -> ArrayView1<'_, f64> {
        self.eigenvectors.column(i)
    }

    /// Similarity matrix `V·Ê·Vᵀ`.
    ///
    /// `Ê` is diagonal with 1 for strong directions and `weak_weight` for weak
    /// ones, so distances orthogonal to the local subspace are inflated.
    #[must_use]
    pub fn similarity_matrix(&self, weak_weight: f64) -> Array2<f64> {
        let dim = self.dimensionality();
        let mut weights = Array2::<f64>::zeros((dim, dim));
        for i in 0..dim {
            weights[[i, i]] = if i < self.strong { 1.0 } else { weak_weight };
        }
        self.eigenvectors
            .dot(&weights)
            .dot(&self.eigenvectors.t())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_axis_aligned_similarity() {
        let subspace = LocalSubspace::new(Array2::eye(2), 1).unwrap();
        assert_eq!(subspace.local_dimensionality(), 1);
        assert_eq!(subspace.dimensionality(), 2);

        let m = subspace.similarity_matrix(50.0);
        assert_relative_eq!(m[[0, 0]], 1.0);
        assert_relative_eq!(m[[1, 1]], 50.0);
        assert_relative_eq!(m[[0, 1]], 0.0);
    }

    #[test]
    fn test_rotated_similarity_is_symmetric() {
        let s = std::f64::consts::FRAC_1_SQRT_2;
        let subspace = LocalSubspace::new(array![[s, -s], [s, s]], 1).unwrap();
        let m = subspace.similarity_matrix(9.0);

        assert_relative_eq!(m[[0, 1]], m[[1, 0]], epsilon = 1e-12);
        // Along the strong direction (1, 1)/√2 the quadratic form is 1.
        let v = subspace.eigenvector(0);
        assert_relative_eq!(v.dot(&m.dot(&v)), 1.0, epsilon = 1e-12);
        let w = subspace.eigenvector(1);
        assert_relative_eq!(w.dot(&m.dot(&w)), 9.0, epsilon = 1e-12);
    }

    #[test]
    fn test_rejects_bad_shapes() {
        assert!(LocalSubspace::new(Array2::zeros((2, 3)), 1).is_err());
        assert!(LocalSubspace::new(Array2::eye(2), 3).is_err());
    }
}
