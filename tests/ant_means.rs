use antclump::cluster::{Ant, AntMeans, AntParams, ClusteringData, ParameterSource, PheromoneMatrix};
use antclump::distance::Coordinate;
use antclump::parallel::{Executor, Pool};
use antclump::Error;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn blobs() -> ClusteringData {
    let mut rows = Vec::new();
    for (cx, cy) in [(0.0, 0.0), (8.0, 8.0), (16.0, 0.0)] {
        for i in 0..6 {
            let t = i as f64 * 0.05;
            rows.push(vec![cx + t, cy - t]);
        }
    }
    ClusteringData::new(rows).unwrap()
}

#[test]
fn identical_points_share_a_cluster() {
    let data = ClusteringData::from_coordinates(&[
        Coordinate::from([0.0, 0.0]),
        Coordinate::from([0.0, 0.0]),
        Coordinate::from([10.0, 10.0]),
    ])
    .unwrap();
    let model = AntMeans::new(AntParams::default().with_iterations(40).with_ant_count(25))
        .with_seed(11)
        .with_pool(Pool::new(3));
    let result = model.process(&data, 2).unwrap();

    let clusters = result.clusters();
    let mut sizes: Vec<usize> = clusters.iter().map(Vec::len).collect();
    sizes.sort_unstable();
    assert_eq!(sizes, vec![1, 2]);
    assert_eq!(result.labels()[0], result.labels()[1]);
    assert_ne!(result.labels()[0], result.labels()[2]);
}

#[test]
fn seeded_runs_are_reproducible() {
    let params = AntParams::default().with_iterations(20).with_ant_count(10);
    let a = AntMeans::new(params.clone()).with_seed(5).with_pool(Pool::new(2));
    let b = AntMeans::new(params).with_seed(5).with_pool(Pool::new(2));
    assert_eq!(a.process(&blobs(), 3).unwrap(), b.process(&blobs(), 3).unwrap());
}

#[test]
fn result_does_not_depend_on_pool_size() {
    let params = AntParams::default().with_iterations(10).with_ant_count(8);
    let data = blobs();
    let reference = AntMeans::new(params.clone())
        .with_seed(99)
        .with_pool(Pool::sequential())
        .process(&data, 3)
        .unwrap();
    for pool in [
        Pool::new(0),
        Pool::new(1),
        Pool::new(5),
        Pool::new(4).with_executor(Executor::Sequential),
    ] {
        let other = AntMeans::new(params.clone())
            .with_seed(99)
            .with_pool(pool)
            .process(&data, 3)
            .unwrap();
        assert_eq!(reference, other);
    }
}

#[test]
fn injected_rng_is_deterministic() {
    let model = AntMeans::new(AntParams::default().with_iterations(5)).with_pool(Pool::new(2));
    let data = blobs();
    let a = model
        .process_with_rng(&data, 3, &mut StdRng::seed_from_u64(1234))
        .unwrap();
    let b = model
        .process_with_rng(&data, 3, &mut StdRng::seed_from_u64(1234))
        .unwrap();
    assert_eq!(a, b);
}

#[test]
fn zero_iterations_samples_initial_pheromone() {
    for init in [0.0, 0.1] {
        let model = AntMeans::new(
            AntParams::default()
                .with_iterations(0)
                .with_pheromone_init(init),
        )
        .with_seed(2);
        let result = model.process(&blobs(), 3).unwrap();
        assert_eq!(result.iterations(), 0);
        assert!(result.history().is_empty());
        assert_eq!(result.labels().len(), 18);
        assert!(result.labels().iter().all(|&l| l < 3));
        assert!(result.fitness() > 0.0 && result.fitness() <= 1.0);
    }
}

#[test]
fn single_cluster_has_constant_fitness() {
    let model = AntMeans::new(AntParams::default().with_iterations(12))
        .with_seed(8)
        .with_pool(Pool::new(2));
    let result = model.process(&blobs(), 1).unwrap();
    assert!(result.labels().iter().all(|&l| l == 0));
    let first = result.history()[0];
    assert!(result.history().iter().all(|&f| f == first));
    assert_eq!(result.fitness(), first);
}

#[test]
fn fit_predict_validates_input() {
    let model = AntMeans::default().with_seed(0);
    assert!(matches!(model.fit_predict(&[], 1), Err(Error::EmptyInput)));
    assert!(matches!(
        model.fit_predict(&[vec![0.0, 1.0], vec![1.0]], 1),
        Err(Error::DimensionMismatch { expected: 2, found: 1 })
    ));
    assert_eq!(model.fit_predict(&[vec![1.0], vec![2.0]], 2).unwrap().len(), 2);
}

struct Fixed;

impl ParameterSource for Fixed {
    fn evaporation_rate(&self) -> f64 {
        0.5
    }

    fn pheromone_init(&self) -> f64 {
        1.0
    }

    fn iterations(&self) -> usize {
        3
    }

    fn ant_count(&self) -> usize {
        2
    }
}

#[test]
fn custom_parameter_source() {
    let result = AntMeans::new(Fixed)
        .with_seed(1)
        .with_pool(Pool::sequential())
        .process(&blobs(), 2)
        .unwrap();
    assert_eq!(result.iterations(), 3);
    assert_eq!(result.n_clusters(), 2);
}

#[test]
fn ant_can_be_driven_outside_the_engine() {
    let data = blobs();
    let mut pheromone = PheromoneMatrix::new(data.len(), 3, 1.0).unwrap();
    // Bias every object towards cluster 2.
    pheromone.reinforce(&vec![2; data.len()], 1.0e6);

    let mut ant = Ant::new(data.len(), 3);
    assert_eq!(ant.fitness(), 0.0);
    ant.construct(&pheromone, &mut StdRng::seed_from_u64(9));
    assert_eq!(ant.labels().len(), data.len());
    assert!(ant.labels().iter().filter(|&&l| l == 2).count() >= data.len() - 1);
    for row in ant.membership() {
        assert_eq!(row.iter().filter(|&&b| b).count(), 1);
    }

    let fitness = ant.evaluate(&data);
    assert!(fitness > 0.0 && fitness <= 1.0);
    assert_eq!(ant.fitness(), fitness);
}
