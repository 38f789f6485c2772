mod common;

use common::{assert_partition, ids, TableSpace};
use ndarray::{array, Array2};
use projclust_algorithms::{
    ClusteringConfig, EuclideanMetric, LinearScan, LocalSubspace, LocallyWeightedMetric,
    PointId, PrecomputedNeighborhoods, ProjectedDbscan, ProjectedDbscanParams, VectorSpace,
};
use projclust_core::{Error, PointSpace};

fn params(epsilon: f64, min_pts: usize, lambda: usize) -> ProjectedDbscan<f64> {
    ProjectedDbscan::new(ProjectedDbscanParams::new(epsilon, min_pts, lambda).unwrap())
}

/// Two parallel horizontal lines 0.6 apart, five points each, every point
/// with the x axis as its local subspace.
fn parallel_lines() -> VectorSpace {
    let mut rows = Vec::new();
    for y in [0.0, 0.6] {
        for i in 0..5 {
            rows.push(vec![f64::from(i) * 0.5, y]);
        }
    }
    let x_axis = LocalSubspace::new(Array2::eye(2), 1).unwrap();
    VectorSpace::from_rows(&rows)
        .unwrap()
        .with_local_subspaces(&vec![x_axis; 10], 50.0)
        .unwrap()
}

#[test]
fn test_dense_group_with_isolated_point() {
    let space = VectorSpace::new(array![[0.0], [0.1], [0.2], [0.3], [10.0]])
        .with_labels(["A", "B", "C", "D", "E"])
        .unwrap()
        .with_local_dimensionalities(vec![Some(1); 5])
        .unwrap();
    let metric = EuclideanMetric::bind(&space);
    let config = ClusteringConfig::new()
        .with_epsilon("0.5")
        .with_min_pts(4)
        .with_lambda(1);

    let algo = ProjectedDbscan::from_config(&config, &metric).unwrap();
    let clustering = algo.run_with_metric(&space, metric);

    assert_eq!(clustering.num_clusters(), 1);
    assert_eq!(clustering.clusters()[0].points, ids(&[0, 1, 2, 3]));
    assert_eq!(clustering.noise().points, ids(&[4]));
    assert_eq!(space.label(clustering.noise().points[0]), Some("E"));
    assert_partition(&clustering, space.len());
}

#[test]
fn test_unknown_dimensionality_is_always_noise() {
    let space = VectorSpace::new(array![[0.0], [0.1], [0.2], [0.3], [0.4]])
        .with_local_dimensionalities(vec![Some(1), Some(1), None, Some(1), Some(1)])
        .unwrap();

    let clustering = params(0.5, 3, 1).run_with_metric(&space, EuclideanMetric::bind(&space));

    assert_eq!(clustering.num_clusters(), 1);
    assert!(!clustering.clusters()[0].contains(PointId(2)));
    assert_eq!(clustering.clusters()[0].points, ids(&[0, 1, 3, 4]));
    assert_eq!(clustering.noise().points, ids(&[2]));
}

#[test]
fn test_too_high_dimensionality_is_noise() {
    let space = VectorSpace::new(array![[0.0], [0.1], [0.2], [0.3]])
        .with_local_dimensionalities(vec![Some(1), Some(2), Some(1), Some(1)])
        .unwrap();

    let clustering = params(0.5, 3, 1).run_with_metric(&space, EuclideanMetric::bind(&space));

    assert_eq!(clustering.clusters()[0].points, ids(&[0, 2, 3]));
    assert_eq!(clustering.noise().points, ids(&[1]));

    // Raising lambda admits the point.
    let clustering = params(0.5, 3, 2).run_with_metric(&space, EuclideanMetric::bind(&space));
    assert_eq!(clustering.clusters()[0].points, ids(&[0, 1, 2, 3]));
    assert!(clustering.noise().is_empty());
}

#[test]
fn test_reached_neighbor_with_unknown_dimensionality_is_skipped() {
    // Point 3 lies inside the neighborhood of every other point but has no
    // known dimensionality, so expansion passes over it.
    let space = VectorSpace::new(array![[0.0], [0.1], [0.2], [0.15]])
        .with_local_dimensionalities(vec![Some(1), Some(1), Some(1), None])
        .unwrap();

    let clustering = params(0.5, 3, 1).run_with_metric(&space, EuclideanMetric::bind(&space));

    assert_eq!(clustering.clusters()[0].points, ids(&[0, 1, 2]));
    assert_eq!(clustering.noise().points, ids(&[3]));
}

#[test]
fn test_border_point_does_not_propagate() {
    // G = 0 has exactly min_pts points in its neighborhood (G, X, H) and
    // anchors the cluster. H = 2 also has exactly min_pts (H, G, Y): it is
    // included, but it is not a core point, so Y = 3 is not reached.
    let space = VectorSpace::new(array![[0.0], [-1.0], [1.0], [2.0]])
        .with_labels(["G", "X", "H", "Y"])
        .unwrap()
        .with_local_dimensionalities(vec![Some(1); 4])
        .unwrap();

    let clustering = params(1.0, 3, 1).run_with_metric(&space, EuclideanMetric::bind(&space));

    assert_eq!(clustering.num_clusters(), 1);
    assert_eq!(clustering.clusters()[0].points, ids(&[0, 1, 2]));
    assert_eq!(clustering.noise().points, ids(&[3]));
}

#[test]
fn test_core_point_propagates() {
    // Same chain with one more point near H: H now has min_pts + 1 points in
    // its neighborhood and pulls Y into the cluster.
    let space = TableSpace {
        dims: vec![Some(1); 5],
        neighborhoods: vec![vec![1, 2], vec![0], vec![0, 3, 4], vec![2], vec![2]],
    };

    let clustering = params(1.0, 3, 1).run(&space, &space);

    assert_eq!(clustering.clusters()[0].points, ids(&[0, 1, 2, 3, 4]));
    assert!(clustering.noise().is_empty());
}

#[test]
fn test_fewer_points_than_min_pts() {
    let space = VectorSpace::new(array![[0.0], [0.0], [0.0]])
        .with_local_dimensionalities(vec![Some(1); 3])
        .unwrap();

    let clustering = params(1.0, 4, 1).run_with_metric(&space, EuclideanMetric::bind(&space));

    assert_eq!(clustering.num_clusters(), 0);
    assert_eq!(clustering.noise().points, ids(&[0, 1, 2]));
}

#[test]
fn test_empty_space() {
    let space = VectorSpace::default();
    let clustering = params(1.0, 1, 1).run_with_metric(&space, EuclideanMetric::bind(&space));

    assert_eq!(clustering.num_clusters(), 0);
    assert!(clustering.noise().is_empty());
    assert_eq!(clustering.all_clusters().count(), 1);
}

#[test]
fn test_locally_weighted_metric_separates_parallel_lines() {
    let space = parallel_lines();
    let metric = LocallyWeightedMetric::bind(&space).unwrap();
    let config = ClusteringConfig::new()
        .with_epsilon("0.7")
        .with_min_pts(2)
        .with_lambda(1);

    let clustering = ProjectedDbscan::from_config(&config, &metric)
        .unwrap()
        .run_with_metric(&space, metric);

    assert_eq!(clustering.num_clusters(), 2);
    assert_eq!(clustering.clusters()[0].points, ids(&[0, 1, 2, 3, 4]));
    assert_eq!(clustering.clusters()[1].points, ids(&[5, 6, 7, 8, 9]));
    assert!(clustering.noise().is_empty());

    let stats = clustering.statistics();
    assert_eq!(stats.largest_cluster, 5);
    assert_eq!(stats.total_points(), 10);
}

#[test]
fn test_euclidean_metric_merges_parallel_lines() {
    let space = parallel_lines();

    let clustering = params(0.7, 2, 1).run_with_metric(&space, EuclideanMetric::bind(&space));

    assert_eq!(clustering.num_clusters(), 1);
    assert_eq!(clustering.clusters()[0].len(), 10);
    assert_partition(&clustering, space.len());
}

#[test]
fn test_invalid_epsilon_is_rejected() {
    let space = parallel_lines();
    let metric = LocallyWeightedMetric::bind(&space).unwrap();

    let err = ProjectedDbscan::from_config(&ClusteringConfig::new().with_epsilon("-0.7"), &metric)
        .unwrap_err();
    assert!(matches!(err, Error::InvalidEpsilon { .. }));

    let err = ProjectedDbscan::from_config(&ClusteringConfig::new().with_min_pts(0), &metric)
        .unwrap_err();
    assert!(matches!(err, Error::InvalidParameter { name: "min_pts", .. }));
}

#[test]
fn test_precomputed_neighborhoods_match_linear_scan() {
    let space = parallel_lines();
    let metric = LocallyWeightedMetric::bind(&space).unwrap();
    let scan = LinearScan::new(&space, metric);
    let algo = params(0.7, 2, 1);

    let cache = PrecomputedNeighborhoods::build(&space, &scan, 0.7);

    assert_eq!(algo.run(&space, &cache), algo.run(&space, &scan));
}

#[test]
fn test_runs_are_deterministic_and_independent() {
    let space = parallel_lines();
    let metric = LocallyWeightedMetric::bind(&space).unwrap();
    let scan = LinearScan::new(&space, metric);
    let algo = params(0.7, 2, 1);

    let first = algo.run(&space, &scan);
    let (a, b) = std::thread::scope(|s| {
        let a = s.spawn(|| algo.run(&space, &scan));
        let b = s.spawn(|| algo.run(&space, &scan));
        (a.join().unwrap(), b.join().unwrap())
    });

    assert_eq!(first, a);
    assert_eq!(first, b);
    assert_eq!(first.labels(space.len())[7], Some(1));
}
