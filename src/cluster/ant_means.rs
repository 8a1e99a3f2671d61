//! Ant-colony clustering with mean-based fitness.
//!
//! # The Algorithm
//!
//! A pheromone matrix holds one weight per (object, cluster) pair. Each iteration:
//!
//! 1. Every ant labels every object by a roulette-wheel draw over that object's
//!    pheromone row.
//! 2. Every ant is scored: cluster centers are the means of their members and
//!    `F = 1 / (1 + Σ ||x - μ(x)||²)`.
//! 3. The best clustering seen so far is replaced only by a strictly fitter ant.
//! 4. Pheromone evaporates by `1 - ρ` and each ant deposits `F` on the cells it
//!    chose.
//!
//! Fit ants deposit more, so their choices become more likely in later rounds.
//!
//! # Randomness
//!
//! Every iteration the run's generator draws one seed per ant and each ant samples
//! with its own [`StdRng`]. Construction can therefore run on any number of
//! workers and a seeded run gives the same answer regardless of pool size.

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use tracing::{debug, trace};

use super::ant::Ant;
use super::data::ClusteringData;
use super::params::{self, AntParams, ParameterSource};
use super::pheromone::PheromoneMatrix;
use super::result::AntClusteringResult;
use crate::error::{Error, Result};
use crate::parallel::Pool;

/// Ant-colony clusterer.
#[derive(Clone, Debug)]
pub struct AntMeans<P = AntParams> {
    params: P,
    seed: Option<u64>,
    pool: Pool,
}

#[derive(Debug)]
struct Best {
    labels: Vec<usize>,
    fitness: f64,
}

impl<P: ParameterSource> AntMeans<P> {
    /// Clusterer reading its parameters from `params`, on a hardware-sized pool.
    pub fn new(params: P) -> Self {
        Self {
            params,
            seed: None,
            pool: Pool::default(),
        }
    }

    /// Fix the random seed for reproducible runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Run ant construction and scoring on `pool`.
    pub fn with_pool(mut self, pool: Pool) -> Self {
        self.pool = pool;
        self
    }

    /// Parameter source.
    pub fn params(&self) -> &P {
        &self.params
    }

    /// Cluster `data` into `n_clusters` groups.
    ///
    /// Uses the configured seed, or a thread-local generator if none was set.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidParameter`] for out-of-range parameters.
    /// - [`Error::InvalidClusterCount`] unless `1 <= n_clusters <= data.len()`.
    /// - [`Error::WorkerFailure`] if a worker panics.
    /// - [`Error::NonFinitePheromone`] if the pheromone update overflows.
    pub fn process(&self, data: &ClusteringData, n_clusters: usize) -> Result<AntClusteringResult> {
        let mut rng: Box<dyn RngCore> = match self.seed {
            Some(s) => Box::new(StdRng::seed_from_u64(s)),
            None => Box::new(rand::rng()),
        };
        self.process_with_rng(data, n_clusters, &mut *rng)
    }

    /// [`AntMeans::process`] drawing all randomness from `rng`.
    pub fn process_with_rng<R: RngCore + ?Sized>(
        &self,
        data: &ClusteringData,
        n_clusters: usize,
        rng: &mut R,
    ) -> Result<AntClusteringResult> {
        params::validate(&self.params)?;
        let n = data.len();
        if n_clusters == 0 || n_clusters > n {
            return Err(Error::InvalidClusterCount {
                requested: n_clusters,
                n_items: n,
            });
        }

        let rate = self.params.evaporation_rate();
        let iterations = self.params.iterations();
        let ant_count = self.params.ant_count();
        debug!(
            n_items = n,
            n_clusters,
            iterations,
            ant_count,
            workers = self.pool.workers(),
            "ant clustering start"
        );

        let mut pheromone = PheromoneMatrix::new(n, n_clusters, self.params.pheromone_init())?;
        let mut ants: Vec<Ant> = (0..ant_count).map(|_| Ant::new(n, n_clusters)).collect();
        let mut best: Option<Best> = None;
        let mut history = Vec::new();

        for iteration in 0..iterations {
            self.construct_ants(&mut ants, &pheromone, rng)?;
            self.pool
                .parallel_for_each_mut(&mut ants, |ant| {
                    ant.evaluate(data);
                })?;

            let improved = update_best(&mut best, &ants);

            pheromone.evaporate(rate);
            for ant in &ants {
                pheromone.reinforce(ant.labels(), ant.fitness());
            }
            pheromone.check_finite()?;

            let best_fitness = best.as_ref().map_or(0.0, |b| b.fitness);
            history.push(best_fitness);
            trace!(iteration, best_fitness, improved, "iteration done");
        }

        let best = match best {
            Some(best) => best,
            None => {
                // No iterations: sample once from the untouched pheromone.
                let mut ant = Ant::new(n, n_clusters);
                let mut ant_rng = StdRng::seed_from_u64(rng.next_u64());
                ant.construct(&pheromone, &mut ant_rng);
                let fitness = ant.evaluate(data);
                Best {
                    labels: ant.labels().to_vec(),
                    fitness,
                }
            }
        };

        debug!(fitness = best.fitness, iterations, "ant clustering done");
        Ok(AntClusteringResult::new(
            best.labels,
            n_clusters,
            best.fitness,
            history,
        ))
    }

    /// Validate `data` and return one label per point.
    pub fn fit_predict(&self, data: &[Vec<f64>], n_clusters: usize) -> Result<Vec<usize>> {
        let data = ClusteringData::new(data.to_vec())?;
        Ok(self.process(&data, n_clusters)?.into_labels())
    }

    fn construct_ants<R: RngCore + ?Sized>(
        &self,
        ants: &mut [Ant],
        pheromone: &PheromoneMatrix,
        rng: &mut R,
    ) -> Result<()> {
        let seeds: Vec<u64> = (0..ants.len()).map(|_| rng.next_u64()).collect();
        self.pool
            .parallel_for_each_iter(ants.iter_mut().zip(seeds), |(ant, seed)| {
                let mut ant_rng = StdRng::seed_from_u64(seed);
                ant.construct(pheromone, &mut ant_rng);
            })
    }
}

impl Default for AntMeans<AntParams> {
    fn default() -> Self {
        Self::new(AntParams::default())
    }
}

/// Replace `best` with the first ant that is strictly fitter. Ties keep the
/// earlier clustering.
fn update_best(best: &mut Option<Best>, ants: &[Ant]) -> bool {
    let mut improved = false;
    for ant in ants {
        if best.as_ref().is_none_or(|b| ant.fitness() > b.fitness) {
            *best = Some(Best {
                labels: ant.labels().to_vec(),
                fitness: ant.fitness(),
            });
            improved = true;
        }
    }
    improved
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_points() -> ClusteringData {
        ClusteringData::new(vec![vec![0.0, 0.0], vec![0.0, 0.0], vec![10.0, 10.0]]).unwrap()
    }

    fn ant_with(labels: Vec<usize>, fitness: f64) -> Ant {
        Ant::from_parts(labels, 2, fitness)
    }

    #[test]
    fn test_identical_points_grouped() {
        let model = AntMeans::new(AntParams::default().with_iterations(30).with_ant_count(20))
            .with_seed(42)
            .with_pool(Pool::new(2));
        let result = model.process(&three_points(), 2).unwrap();
        let labels = result.labels();
        assert_eq!(labels[0], labels[1]);
        assert_ne!(labels[0], labels[2]);
        assert_eq!(result.fitness(), 1.0);
    }

    #[test]
    fn test_invalid_cluster_count() {
        let model = AntMeans::default().with_seed(0);
        for k in [0, 4] {
            let err = model.process(&three_points(), k).unwrap_err();
            assert!(matches!(err, Error::InvalidClusterCount { requested, n_items: 3 } if requested == k));
        }
    }

    #[test]
    fn test_invalid_params_fail_before_running() {
        let model = AntMeans::new(AntParams::default().with_ant_count(0));
        assert!(matches!(
            model.process(&three_points(), 2),
            Err(Error::InvalidParameter { name: "ant_count", .. })
        ));
    }

    #[test]
    fn test_update_best_strict_improvement() {
        let mut best = None;
        assert!(update_best(&mut best, &[ant_with(vec![0, 1], 0.5), ant_with(vec![1, 0], 0.5)]));
        assert_eq!(best.as_ref().unwrap().labels, vec![0, 1]);

        // A later tie does not replace.
        assert!(!update_best(&mut best, &[ant_with(vec![1, 1], 0.5)]));
        assert_eq!(best.as_ref().unwrap().labels, vec![0, 1]);

        assert!(update_best(&mut best, &[ant_with(vec![1, 1], 0.6)]));
        assert_eq!(best.as_ref().unwrap().labels, vec![1, 1]);
    }

    #[test]
    fn test_history_is_monotone() {
        let data = ClusteringData::new((0..12).map(|i| vec![(i % 3) as f64 * 5.0, i as f64 * 0.01]).collect())
            .unwrap();
        let model = AntMeans::new(AntParams::default().with_iterations(15))
            .with_seed(3)
            .with_pool(Pool::new(1));
        let result = model.process(&data, 3).unwrap();
        assert_eq!(result.iterations(), 15);
        assert!(result.history().windows(2).all(|w| w[1] >= w[0]));
        assert_eq!(*result.history().last().unwrap(), result.fitness());
    }
}
