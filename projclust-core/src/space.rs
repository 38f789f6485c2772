//! Point spaces, distance metrics and range queries.
//!
//! The clustering engine never owns point data. It sees the data set through
//! three collaborators:
//!
//! - [`PointSpace`]: the ordered set of points and their per-point attributes
//!   (label, local dimensionality).
//! - [`DistanceMetric`]: a distance bound to one point space when it is
//!   constructed, usually weighted by each point's local structure.
//! - [`RangeQuery`]: epsilon-neighborhood lookups produced by pairing a space
//!   with a bound metric.

use std::fmt;

use crate::error::Result;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Identifier of a point within a [`PointSpace`].
///
/// Identifiers are dense indices `0..len`. A space iterates its points in
/// ascending identifier order, and that order never changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PointId(pub usize);

impl PointId {
    /// Creates an identifier from a dense index.
    #[inline]
    #[must_use]
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the dense index of this identifier.
    #[inline]
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

impl From<usize> for PointId {
    #[inline]
    fn from(index: usize) -> Self {
        Self(index)
    }
}

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Value type produced by a [`DistanceMetric`].
pub trait Distance: Copy + PartialOrd + fmt::Debug + Send + Sync {}

impl<T> Distance for T where T: Copy + PartialOrd + fmt::Debug + Send + Sync {}

/// One entry of a range query result.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Neighbor<D> {
    /// Distance from the query point.
    pub distance: D,
    /// The neighboring point.
    pub id: PointId,
}

impl<D> Neighbor<D> {
    /// Creates a neighbor record.
    #[inline]
    pub fn new(distance: D, id: PointId) -> Self {
        Self { distance, id }
    }
}

/// Ordered, finite collection of points with per-point attributes.
pub trait PointSpace {
    /// Number of points in the space.
    fn len(&self) -> usize;

    /// Returns true if the space holds no points.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates every point identifier in the stable space order.
    fn ids(&self) -> impl Iterator<Item = PointId> {
        (0..self.len()).map(PointId)
    }

    /// Human-readable label of a point, used for diagnostics only.
    fn label(&self, _id: PointId) -> Option<&str> {
        None
    }

    /// Local intrinsic dimensionality of a point.
    ///
    /// `None` means the preprocessor could not determine it.
    fn local_dimensionality(&self, id: PointId) -> Option<usize>;
}

/// A distance function bound to a point space.
///
/// Implementations capture whatever per-point structure they need when they
/// are constructed, so a metric is only meaningful for the space it was bound
/// to. The distance need not be symmetric.
pub trait DistanceMetric {
    /// Distance value type.
    type Distance: Distance;

    /// Distance from point `a` to point `b`.
    fn distance(&self, a: PointId, b: PointId) -> Self::Distance;

    /// Parses an epsilon radius written in this metric's notation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEpsilon`](crate::Error::InvalidEpsilon) if
    /// `raw` does not describe a valid distance for this metric.
    fn parse_distance(&self, raw: &str) -> Result<Self::Distance>;
}

impl<M: DistanceMetric + ?Sized> DistanceMetric for &M {
    type Distance = M::Distance;

    #[inline]
    fn distance(&self, a: PointId, b: PointId) -> Self::Distance {
        (**self).distance(a, b)
    }

    fn parse_distance(&self, raw: &str) -> Result<Self::Distance> {
        (**self).parse_distance(raw)
    }
}

/// Epsilon-neighborhood queries over a point space.
///
/// The result of [`range_query`](Self::range_query) must contain every point
/// whose distance from `id` is at most `epsilon`, in ascending distance
/// order, with `id` itself as the first record at distance zero.
pub trait RangeQuery {
    /// Distance value type.
    type Distance: Distance;

    /// Returns the epsilon-neighborhood of `id`.
    fn range_query(&self, id: PointId, epsilon: &Self::Distance) -> Vec<Neighbor<Self::Distance>>;
}

impl<Q: RangeQuery + ?Sized> RangeQuery for &Q {
    type Distance = Q::Distance;

    fn range_query(&self, id: PointId, epsilon: &Self::Distance) -> Vec<Neighbor<Self::Distance>> {
        (**self).range_query(id, epsilon)
    }
}
