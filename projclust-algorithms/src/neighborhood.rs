//! Range queries evaluated up front, in parallel.
//!
//! Classification must stay sequential, but the range queries it issues are
//! independent of each other. [`PrecomputedNeighborhoods`] runs one query per
//! point on the rayon pool and then serves the clustering from memory.

use log::debug;
use projclust_core::{Distance, Neighbor, PointId, PointSpace, RangeQuery};
use rayon::prelude::*;

/// Cached epsilon-neighborhoods of every point.
#[derive(Debug, Clone)]
pub struct PrecomputedNeighborhoods<D> {
    epsilon: D,
    neighborhoods: Vec<Vec<Neighbor<D>>>,
}

impl<D: Distance> PrecomputedNeighborhoods<D> {
    /// Evaluates `queries` at radius `epsilon` for every point of `space`.
    pub fn build<S, Q>(space: &S, queries: &Q, epsilon: D) -> Self
    where
        S: PointSpace + ?Sized,
        Q: RangeQuery<Distance = D> + Sync,
    {
        let ids: Vec<PointId> = space.ids().collect();
        let neighborhoods: Vec<Vec<Neighbor<D>>> = ids
            .par_iter()
            .map(|&id| queries.range_query(id, &epsilon))
            .collect();

        debug!(
            "precomputed {} neighborhoods ({} records) at epsilon {:?}",
            neighborhoods.len(),
            neighborhoods.iter().map(Vec::len).sum::<usize>(),
            epsilon
        );

        Self {
            epsilon,
            neighborhoods,
        }
    }

    /// Radius the cache was built with.
    pub fn epsilon(&self) -> D {
        self.epsilon
    }

    /// Number of cached neighborhoods.
    pub fn len(&self) -> usize {
        self.neighborhoods.len()
    }

    /// Returns true if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.neighborhoods.is_empty()
    }

    /// The cached neighborhood of `id` at the build radius.
    pub fn neighborhood(&self, id: PointId) -> &[Neighbor<D>] {
        self.neighborhoods
            .get(id.index())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

impl<D: Distance> RangeQuery for PrecomputedNeighborhoods<D> {
    type Distance = D;

    /// Answers from the cache.
    ///
    /// Radii up to the build radius are exact; larger radii are answered as if
    /// they were the build radius.
    fn range_query(&self, id: PointId, epsilon: &D) -> Vec<Neighbor<D>> {
        debug_assert!(
            *epsilon <= self.epsilon,
            "query radius {epsilon:?} exceeds cached radius {:?}",
            self.epsilon
        );
        self.neighborhood(id)
            .iter()
            .take_while(|n| n.distance <= *epsilon)
            .copied()
            .collect()
    }
}
