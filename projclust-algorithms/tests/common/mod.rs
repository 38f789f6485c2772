#![allow(dead_code)]

use std::collections::HashSet;

use projclust_algorithms::{Clustering, PointId};
use projclust_core::{Neighbor, PointSpace, RangeQuery};

/// Space whose neighborhoods are written out by hand.
///
/// `neighborhoods[i]` lists the neighbors of `i` other than `i` itself, in
/// ascending distance order.
pub struct TableSpace {
    pub dims: Vec<Option<usize>>,
    pub neighborhoods: Vec<Vec<usize>>,
}

impl PointSpace for TableSpace {
    fn len(&self) -> usize {
        self.dims.len()
    }

    fn local_dimensionality(&self, id: PointId) -> Option<usize> {
        self.dims[id.index()]
    }
}

impl RangeQuery for TableSpace {
    type Distance = f64;

    #[allow(clippy::cast_precision_loss)]
    fn range_query(&self, id: PointId, _epsilon: &f64) -> Vec<Neighbor<f64>> {
        std::iter::once(id.index())
            .chain(self.neighborhoods[id.index()].iter().copied())
            .enumerate()
            .map(|(rank, other)| Neighbor::new(rank as f64, PointId(other)))
            .collect()
    }
}

pub fn ids(raw: &[usize]) -> Vec<PointId> {
    raw.iter().copied().map(PointId).collect()
}

/// Asserts every point of `0..len` is in exactly one group.
pub fn assert_partition(clustering: &Clustering, len: usize) {
    let mut seen = HashSet::new();
    for group in clustering.all_clusters() {
        for id in group.iter() {
            assert!(id.index() < len, "{id} is outside the space");
            assert!(seen.insert(*id), "{id} appears in more than one group");
        }
    }
    assert_eq!(seen.len(), len, "some points were not classified");
}
