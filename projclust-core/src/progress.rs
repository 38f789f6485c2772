//! Progress reporting for clustering runs.
//!
//! Observers only watch a run; nothing they do can change its outcome.

use log::info;

/// Snapshot of a running clustering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClusteringProgress {
    /// Points classified so far (never decreases).
    pub processed: usize,
    /// Points in the space.
    pub total: usize,
    /// Clusters found so far, including one still being expanded once it is
    /// large enough to be kept (never decreases).
    pub clusters: usize,
}

impl ClusteringProgress {
    /// Fraction of points processed, in `0.0..=1.0`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.processed as f64 / self.total as f64
        }
    }
}

/// Receives progress snapshots from a clustering run.
pub trait ProgressObserver {
    /// Called whenever the counts may have changed.
    fn update(&mut self, progress: &ClusteringProgress);

    /// Called once with the final counts.
    fn finish(&mut self, progress: &ClusteringProgress) {
        self.update(progress);
    }
}

/// Observer that ignores every update.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {
    #[inline]
    fn update(&mut self, _progress: &ClusteringProgress) {}
}

impl<F> ProgressObserver for F
where
    F: FnMut(&ClusteringProgress),
{
    fn update(&mut self, progress: &ClusteringProgress) {
        self(progress);
    }
}

/// Observer that reports progress through the `log` facade.
///
/// A line is emitted each time another `step_percent` of the points has been
/// processed, and once more when the run finishes.
#[derive(Debug, Clone)]
pub struct LogProgress {
    step_percent: usize,
    next_percent: usize,
}

impl Default for LogProgress {
    fn default() -> Self {
        Self::new(10)
    }
}

impl LogProgress {
    /// Creates an observer logging every `step_percent` percent (minimum 1).
    #[must_use]
    pub fn new(step_percent: usize) -> Self {
        let step_percent = step_percent.clamp(1, 100);
        Self {
            step_percent,
            next_percent: step_percent,
        }
    }

    fn percent(progress: &ClusteringProgress) -> usize {
        if progress.total == 0 {
            100
        } else {
            progress.processed * 100 / progress.total
        }
    }
}

impl ProgressObserver for LogProgress {
    fn update(&mut self, progress: &ClusteringProgress) {
        let percent = Self::percent(progress);
        if percent >= self.next_percent {
            info!(
                "processing objects: {}/{} ({percent}%), clusters: {}",
                progress.processed, progress.total, progress.clusters
            );
            self.next_percent = (percent / self.step_percent + 1) * self.step_percent;
        }
    }

    fn finish(&mut self, progress: &ClusteringProgress) {
        info!(
            "processed {}/{} objects, {} clusters",
            progress.processed, progress.total, progress.clusters
        );
    }
}
