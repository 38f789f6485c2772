//! In-memory point space over dense real vectors.
//!
//! Holds the vectors plus every per-point attribute the clustering needs.
//! All attributes are supplied by the caller; nothing here analyses the data.

use ndarray::{Array2, ArrayView1, ArrayView2};
use projclust_core::{Error, PointId, PointSpace, Result};

use crate::subspace::LocalSubspace;

/// Dense vectors with labels, local dimensionalities and similarity matrices.
#[derive(Debug, Clone, Default)]
pub struct VectorSpace {
    data: Array2<f64>,
    labels: Vec<Option<String>>,
    local_dims: Vec<Option<usize>>,
    similarity: Vec<Array2<f64>>,
}

impl VectorSpace {
    /// Creates a space with one point per row of `data`.
    ///
    /// Local dimensionalities start out unknown.
    #[must_use]
    pub fn new(data: Array2<f64>) -> Self {
        let n = data.nrows();
        Self {
            data,
            labels: vec![None; n],
            local_dims: vec![None; n],
            similarity: Vec::new(),
        }
    }

    /// Creates a space from row vectors.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if rows differ in length.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let dim = rows.first().map_or(0, Vec::len);
        let mut flat = Vec::with_capacity(rows.len() * dim);
        for row in rows {
            if row.len() != dim {
                return Err(Error::DimensionMismatch {
                    expected: dim,
                    found: row.len(),
                });
            }
            flat.extend_from_slice(row);
        }
        let data = Array2::from_shape_vec((rows.len(), dim), flat).map_err(|_| {
            Error::DimensionMismatch {
                expected: dim,
                found: 0,
            }
        })?;
        Ok(Self::new(data))
    }

    /// Attaches one label per point.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LengthMismatch`] if the count differs from `len()`.
    pub fn with_labels<I, L>(mut self, labels: I) -> Result<Self>
    where
        I: IntoIterator<Item = L>,
        L: Into<String>,
    {
        let labels: Vec<Option<String>> = labels.into_iter().map(|l| Some(l.into())).collect();
        self.check_len("labels", labels.len())?;
        self.labels = labels;
        Ok(self)
    }

    /// Attaches one local dimensionality per point (`None` = unknown).
    ///
    /// # Errors
    ///
    /// Returns [`Error::LengthMismatch`] if the count differs from `len()`.
    pub fn with_local_dimensionalities(mut self, dims: Vec<Option<usize>>) -> Result<Self> {
        self.check_len("local dimensionalities", dims.len())?;
        self.local_dims = dims;
        Ok(self)
    }

    /// Attaches one similarity matrix per point.
    ///
    /// # Errors
    ///
    /// Returns an error if the count differs from `len()` or a matrix is not
    /// `dim x dim`.
    pub fn with_similarity_matrices(mut self, matrices: Vec<Array2<f64>>) -> Result<Self> {
        self.check_len("similarity matrices", matrices.len())?;
        let dim = self.dimensionality();
        for matrix in &matrices {
            let (rows, cols) = matrix.dim();
            if rows != dim || cols != dim {
                return Err(Error::DimensionMismatch {
                    expected: dim,
                    found: if rows == dim { cols } else { rows },
                });
            }
        }
        self.similarity = matrices;
        Ok(self)
    }

    /// Attaches local dimensionalities and similarity matrices derived from
    /// one [`LocalSubspace`] per point.
    ///
    /// # Errors
    ///
    /// Returns an error if the count differs from `len()` or a subspace has
    /// the wrong dimensionality.
    pub fn with_local_subspaces(
        self,
        subspaces: &[LocalSubspace],
        weak_weight: f64,
    ) -> Result<Self> {
        let dims = subspaces
            .iter()
            .map(|s| Some(s.local_dimensionality()))
            .collect();
        let matrices = subspaces
            .iter()
            .map(|s| s.similarity_matrix(weak_weight))
            .collect();
        self.with_local_dimensionalities(dims)?
            .with_similarity_matrices(matrices)
    }

    /// Dimensionality of the vectors.
    #[must_use]
    pub fn dimensionality(&self) -> usize {
        self.data.ncols()
    }

    /// The vector of a point.
    #[must_use]
    pub fn vector(&self, id: PointId) -> ArrayView1<'_, f64> {
        self.data.row(id.index())
    }

    /// The similarity matrix of a point, if matrices were attached.
    #[must_use]
    pub fn similarity_matrix(&self, id: PointId) -> Option<ArrayView2<'_, f64>> {
        self.similarity.get(id.index()).map(Array2::view)
    }

    /// Returns true if every point has a similarity matrix.
    #[must_use]
    pub fn has_similarity_matrices(&self) -> bool {
        self.similarity.len() == self.len() && !self.similarity.is_empty()
    }

    fn check_len(&self, what: &'static str, found: usize) -> Result<()> {
        let expected = self.len();
        if found != expected {
            return Err(Error::LengthMismatch {
                what,
                expected,
                found,
            });
        }
        Ok(())
    }
}

impl PointSpace for VectorSpace {
    fn len(&self) -> usize {
        self.data.nrows()
    }

    fn label(&self, id: PointId) -> Option<&str> {
        self.labels.get(id.index())?.as_deref()
    }

    fn local_dimensionality(&self, id: PointId) -> Option<usize> {
        self.local_dims.get(id.index()).copied().flatten()
    }
}
