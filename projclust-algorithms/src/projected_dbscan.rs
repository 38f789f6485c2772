//! Projected DBSCAN: density-based clustering restricted to points whose
//! local dimensionality fits the target subspace dimensionality `lambda`.
//!
//! The scan visits points in space order and tries to grow a cluster from
//! each one not yet processed. A point can only anchor or extend a cluster if
//! its local dimensionality is known and at most `lambda`; everything else is
//! noise. Noise is provisional while the run lasts: a later expansion may
//! reclaim a noise point as a border point. Points in an emitted cluster are
//! never reassigned.
//!
//! Anchoring uses `|N(p)| >= min_pts`, propagation uses the strict
//! `|N(q)| > min_pts`.

use std::collections::VecDeque;
use std::time::Instant;

use log::{debug, trace};
use projclust_core::{
    Clustering, ClusteringConfig, ClusteringProgress, Distance, DistanceMetric, NoProgress,
    PointId, PointSpace, ProgressObserver, ProjectedDbscanParams, RangeQuery, Result,
};

use crate::scan::LinearScan;

/// Projected DBSCAN clustering.
///
/// The value is immutable; every run owns its own state, so one instance can
/// serve concurrent runs on different threads.
#[derive(Debug, Clone)]
pub struct ProjectedDbscan<D> {
    params: ProjectedDbscanParams<D>,
}

/// Mutable bookkeeping of one run.
struct RunState {
    processed: Vec<bool>,
    processed_count: usize,
    noise: Vec<bool>,
    noise_count: usize,
    clusters: Vec<Vec<PointId>>,
}

impl RunState {
    fn new(len: usize) -> Self {
        Self {
            processed: vec![false; len],
            processed_count: 0,
            noise: vec![false; len],
            noise_count: 0,
            clusters: Vec::new(),
        }
    }

    fn len(&self) -> usize {
        self.processed.len()
    }

    fn is_processed(&self, id: PointId) -> bool {
        self.processed[id.index()]
    }

    fn mark_processed(&mut self, id: PointId) {
        let slot = &mut self.processed[id.index()];
        if !*slot {
            *slot = true;
            self.processed_count += 1;
        }
    }

    fn is_noise(&self, id: PointId) -> bool {
        self.noise[id.index()]
    }

    fn add_noise(&mut self, id: PointId) {
        let slot = &mut self.noise[id.index()];
        if !*slot {
            *slot = true;
            self.noise_count += 1;
        }
    }

    fn remove_noise(&mut self, id: PointId) {
        let slot = &mut self.noise[id.index()];
        if *slot {
            *slot = false;
            self.noise_count -= 1;
        }
    }

    /// Every point processed and none left in noise: nothing can change.
    fn is_settled(&self) -> bool {
        self.processed_count == self.len() && self.noise_count == 0
    }

    fn progress(&self, pending_clusters: usize) -> ClusteringProgress {
        ClusteringProgress {
            processed: self.processed_count,
            total: self.len(),
            clusters: self.clusters.len() + pending_clusters,
        }
    }

    fn into_clustering(self) -> Clustering {
        let noise = self
            .noise
            .iter()
            .enumerate()
            .filter_map(|(i, &is_noise)| is_noise.then_some(PointId(i)))
            .collect();
        Clustering::new(self.clusters, noise)
    }
}

impl<D: Distance> ProjectedDbscan<D> {
    /// Creates the algorithm from validated parameters.
    pub fn new(params: ProjectedDbscanParams<D>) -> Self {
        Self { params }
    }

    /// Creates the algorithm from a raw configuration, parsing epsilon with
    /// `metric`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the metric rejects
    /// its epsilon.
    pub fn from_config<M>(config: &ClusteringConfig, metric: &M) -> Result<Self>
    where
        M: DistanceMetric<Distance = D>,
    {
        config.resolve(metric).map(Self::new)
    }

    /// The parameters of this instance.
    pub fn params(&self) -> &ProjectedDbscanParams<D> {
        &self.params
    }

    /// Clusters `space` using `queries` for epsilon-neighborhoods.
    pub fn run<S, Q>(&self, space: &S, queries: &Q) -> Clustering
    where
        S: PointSpace + ?Sized,
        Q: RangeQuery<Distance = D> + ?Sized,
    {
        self.run_with_progress(space, queries, &mut NoProgress)
    }

    /// Clusters `space` with brute-force range queries under `metric`.
    pub fn run_with_metric<S, M>(&self, space: &S, metric: M) -> Clustering
    where
        S: PointSpace + ?Sized,
        M: DistanceMetric<Distance = D>,
    {
        self.run(space, &LinearScan::new(space, metric))
    }

    /// Clusters `space`, reporting progress to `observer`.
    pub fn run_with_progress<S, Q, O>(&self, space: &S, queries: &Q, observer: &mut O) -> Clustering
    where
        S: PointSpace + ?Sized,
        Q: RangeQuery<Distance = D> + ?Sized,
        O: ProgressObserver + ?Sized,
    {
        let started = Instant::now();
        let mut state = RunState::new(space.len());

        if space.len() < self.params.min_pts() {
            debug!(
                "{} points cannot reach min_pts {}; all points are noise",
                space.len(),
                self.params.min_pts()
            );
            for id in space.ids() {
                state.add_noise(id);
                state.mark_processed(id);
            }
            observer.update(&state.progress(0));
        } else {
            for id in space.ids() {
                if state.is_processed(id) {
                    continue;
                }
                self.expand_cluster(space, queries, id, &mut state, observer);
                observer.update(&state.progress(0));
                if state.is_settled() {
                    break;
                }
            }
        }

        observer.finish(&state.progress(0));
        let clustering = state.into_clustering();
        debug!(
            "projected DBSCAN found {} clusters and {} noise points among {} points in {:?}",
            clustering.num_clusters(),
            clustering.noise().len(),
            space.len(),
            started.elapsed()
        );
        clustering
    }

    /// Returns true if a point of dimensionality `dim` can take part in a
    /// `lambda`-dimensional cluster. Unknown dimensionality never can.
    fn fits_subspace(&self, dim: Option<usize>) -> bool {
        dim.is_some_and(|d| d <= self.params.lambda())
    }

    #[allow(clippy::too_many_lines)]
    fn expand_cluster<S, Q, O>(
        &self,
        space: &S,
        queries: &Q,
        start: PointId,
        state: &mut RunState,
        observer: &mut O,
    ) where
        S: PointSpace + ?Sized,
        Q: RangeQuery<Distance = D> + ?Sized,
        O: ProgressObserver + ?Sized,
    {
        let min_pts = self.params.min_pts();
        let epsilon = self.params.epsilon();
        let start_dim = space.local_dimensionality(start);

        debug!(
            "expand cluster id = {start} label = {:?} local dim = {start_dim:?}, #clusters: {}",
            space.label(start),
            state.clusters.len()
        );

        if !self.fits_subspace(start_dim) {
            trace!("{start} cannot anchor a {}-dim cluster", self.params.lambda());
            state.add_noise(start);
            state.mark_processed(start);
            return;
        }

        let seeds = queries.range_query(start, &epsilon);
        if seeds.len() < min_pts {
            trace!("{start} has {} neighbors, below min_pts", seeds.len());
            state.add_noise(start);
            state.mark_processed(start);
            return;
        }

        // The seed consumes its own record: it joins the cluster but is not
        // queued again.
        let mut current = vec![start];
        state.mark_processed(start);

        let mut queue: VecDeque<PointId> = VecDeque::with_capacity(seeds.len());
        for neighbor in seeds.iter().filter(|n| n.id != start) {
            let id = neighbor.id;
            queue.push_back(id);

            if !self.fits_subspace(space.local_dimensionality(id)) {
                trace!("{id} is not subspace-reachable from {start}");
                continue;
            }
            if !state.is_processed(id) {
                current.push(id);
                state.mark_processed(id);
            } else if state.is_noise(id) {
                current.push(id);
                state.remove_noise(id);
            }
        }

        while let Some(q) = queue.pop_front() {
            if !self.fits_subspace(space.local_dimensionality(q)) {
                continue;
            }

            let reachables = queries.range_query(q, &epsilon);
            if reachables.len() > min_pts {
                for r in reachables.iter().map(|n| n.id) {
                    if !self.fits_subspace(space.local_dimensionality(r)) {
                        continue;
                    }

                    let in_noise = state.is_noise(r);
                    let unclassified = !state.is_processed(r);
                    if in_noise || unclassified {
                        if unclassified {
                            queue.push_back(r);
                        }
                        current.push(r);
                        state.mark_processed(r);
                        if in_noise {
                            state.remove_noise(r);
                        }
                        observer.update(&state.progress(usize::from(current.len() > min_pts)));
                    }
                }
            }

            if state.is_settled() {
                break;
            }
        }

        if current.len() >= min_pts {
            debug!(
                "cluster {} committed with {} points",
                state.clusters.len(),
                current.len()
            );
            state.clusters.push(current);
        } else {
            debug!(
                "expansion from {start} gathered {} points, below min_pts; moved to noise",
                current.len()
            );
            for id in current {
                state.add_noise(id);
            }
            state.add_noise(start);
            state.mark_processed(start);
        }
    }
}
