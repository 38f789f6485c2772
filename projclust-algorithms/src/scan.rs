//! Brute-force range queries.

use std::cmp::Ordering;

use projclust_core::{DistanceMetric, Neighbor, PointId, PointSpace, RangeQuery};

/// Range queries answered by measuring the distance to every point.
///
/// Results are sorted by ascending distance. Ties keep space order, except
/// that the query point always comes first.
#[derive(Debug, Clone)]
pub struct LinearScan<'a, S: ?Sized, M> {
    space: &'a S,
    metric: M,
}

impl<'a, S: PointSpace + ?Sized, M: DistanceMetric> LinearScan<'a, S, M> {
    /// Pairs `space` with a metric bound to it.
    pub fn new(space: &'a S, metric: M) -> Self {
        Self { space, metric }
    }

    /// The metric used for distance evaluation.
    pub fn metric(&self) -> &M {
        &self.metric
    }
}

impl<S: PointSpace + ?Sized, M: DistanceMetric> RangeQuery for LinearScan<'_, S, M> {
    type Distance = M::Distance;

    fn range_query(&self, id: PointId, epsilon: &M::Distance) -> Vec<Neighbor<M::Distance>> {
        let mut neighbors: Vec<Neighbor<M::Distance>> = self
            .space
            .ids()
            .filter_map(|other| {
                let distance = self.metric.distance(id, other);
                (distance <= *epsilon).then(|| Neighbor::new(distance, other))
            })
            .collect();

        neighbors.sort_by(|a, b| {
            a.distance
                .partial_cmp(&b.distance)
                .unwrap_or(Ordering::Equal)
                .then_with(|| (a.id != id).cmp(&(b.id != id)))
        });
        neighbors
    }
}
