//! Distance metrics over a [`VectorSpace`].
//!
//! Both metrics measure real-valued distances, so epsilon is written as a
//! plain non-negative decimal number.

use ndarray::{ArrayView1, ArrayView2};
use projclust_core::{DistanceMetric, Error, PointId, PointSpace, Result};

use crate::vector_space::VectorSpace;

/// Parses a non-negative, finite radius.
///
/// # Errors
///
/// Returns [`Error::InvalidEpsilon`] if `raw` is not a number or is negative,
/// infinite or NaN.
pub fn parse_radius(raw: &str) -> Result<f64> {
    let invalid = |reason: &str| Error::InvalidEpsilon {
        raw: raw.to_string(),
        reason: reason.to_string(),
    };
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| invalid("expected a decimal number"))?;
    if !value.is_finite() {
        return Err(invalid("must be finite"));
    }
    if value < 0.0 {
        return Err(invalid("must not be negative"));
    }
    Ok(value)
}

/// Plain Euclidean distance.
#[derive(Debug, Clone, Copy)]
pub struct EuclideanMetric<'a> {
    space: &'a VectorSpace,
}

impl<'a> EuclideanMetric<'a> {
    /// Binds the metric to `space`.
    #[must_use]
    pub fn bind(space: &'a VectorSpace) -> Self {
        Self { space }
    }
}

impl DistanceMetric for EuclideanMetric<'_> {
    type Distance = f64;

    fn distance(&self, a: PointId, b: PointId) -> f64 {
        let diff = &self.space.vector(a) - &self.space.vector(b);
        diff.dot(&diff).sqrt()
    }

    fn parse_distance(&self, raw: &str) -> Result<f64> {
        parse_radius(raw)
    }
}

/// Distance weighted by the local subspace of both points.
///
/// With `d = a - b` and `M_a`, `M_b` the similarity matrices of `a` and `b`:
///
/// ```text
/// dist(a, b) = max( sqrt(dᵀ·M_a·d), sqrt(dᵀ·M_b·d) )
/// ```
///
/// Two points are close only if each lies near the other's local subspace.
#[derive(Debug, Clone, Copy)]
pub struct LocallyWeightedMetric<'a> {
    space: &'a VectorSpace,
}

impl<'a> LocallyWeightedMetric<'a> {
    /// Binds the metric to `space`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LengthMismatch`] if the space carries no similarity
    /// matrices.
    pub fn bind(space: &'a VectorSpace) -> Result<Self> {
        if !space.is_empty() && !space.has_similarity_matrices() {
            return Err(Error::LengthMismatch {
                what: "similarity matrices",
                expected: space.len(),
                found: 0,
            });
        }
        Ok(Self { space })
    }

    fn quadratic_form(diff: ArrayView1<'_, f64>, matrix: Option<ArrayView2<'_, f64>>) -> f64 {
        match matrix {
            Some(m) => diff.dot(&m.dot(&diff)).max(0.0),
            None => diff.dot(&diff),
        }
    }
}

impl DistanceMetric for LocallyWeightedMetric<'_> {
    type Distance = f64;

    fn distance(&self, a: PointId, b: PointId) -> f64 {
        let diff = &self.space.vector(a) - &self.space.vector(b);
        let da = Self::quadratic_form(diff.view(), self.space.similarity_matrix(a));
        let db = Self::quadratic_form(diff.view(), self.space.similarity_matrix(b));
        da.max(db).sqrt()
    }

    fn parse_distance(&self, raw: &str) -> Result<f64> {
        parse_radius(raw)
    }
}
