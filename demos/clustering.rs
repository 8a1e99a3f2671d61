//! Ant-colony clustering on a simple 2D dataset.
//!
//! Run with `RUST_LOG=antclump=debug` to see per-run logging.

use antclump::{AntMeans, AntParams, ClusteringData, Coordinate, DistanceMatrix, Pool};
use tracing_subscriber::EnvFilter;

fn main() -> antclump::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Three well-separated groups in 2D.
    let points: Vec<Coordinate> = vec![
        // Group A (near origin)
        [0.0, 0.0].into(),
        [0.1, 0.2].into(),
        [0.2, 0.1].into(),
        // Group B (near (5, 5))
        [5.0, 5.0].into(),
        [5.1, 4.9].into(),
        [4.9, 5.1].into(),
        // Group C (near (10, 0))
        [10.0, 0.0].into(),
        [10.1, 0.1].into(),
        [9.9, -0.1].into(),
    ];

    let pool = Pool::from_available_parallelism();
    let distances = DistanceMatrix::from_coordinates_with(&points, &pool)?;
    println!("=== Distances from point 0 ===");
    for (j, d) in distances.row(0).iter().enumerate() {
        println!("  0 -> {j}: {d:6.2}");
    }

    let data = ClusteringData::from_coordinates(&points)?;
    let model = AntMeans::new(AntParams::default().with_iterations(100).with_ant_count(40))
        .with_seed(42)
        .with_pool(pool);
    let result = model.process(&data, 3)?;

    println!("\n=== Ant colony (k=3) ===");
    for (i, label) in result.labels().iter().enumerate() {
        let p = points[i].as_slice();
        println!("  point {i:2} ({:5.1}, {:5.1}) => cluster {label}", p[0], p[1]);
    }
    println!("  fitness: {:.4}", result.fitness());
    Ok(())
}
