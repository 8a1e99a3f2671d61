use rand::Rng;

use super::data::ClusteringData;
use super::pheromone::PheromoneMatrix;
use super::sampling::weighted_choice;
use super::util::{cluster_centers, squared_euclidean};

/// Fitness for a given within-cluster sum of squares.
///
/// `1 / (1 + dispersion)`: strictly decreasing, and `1.0` for a perfect fit.
#[inline]
pub fn fitness_from_dispersion(dispersion: f64) -> f64 {
    1.0 / (1.0 + dispersion)
}

/// One candidate clustering.
///
/// Each object carries a single cluster label, so every membership row has
/// exactly one `true`.
#[derive(Clone, Debug)]
pub struct Ant {
    labels: Vec<usize>,
    n_clusters: usize,
    fitness: f64,
}

impl Ant {
    /// An unevaluated ant with every object in cluster 0.
    ///
    /// Call [`Ant::construct`] to draw labels and [`Ant::evaluate`] to score them.
    pub fn new(n_objects: usize, n_clusters: usize) -> Self {
        Self {
            labels: vec![0; n_objects],
            n_clusters,
            fitness: 0.0,
        }
    }

    #[cfg(test)]
    pub(crate) fn from_parts(labels: Vec<usize>, n_clusters: usize, fitness: f64) -> Self {
        Self {
            labels,
            n_clusters,
            fitness,
        }
    }

    /// Cluster label per object.
    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    /// Fitness from the last [`Ant::evaluate`].
    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    /// Object × cluster membership matrix.
    pub fn membership(&self) -> Vec<Vec<bool>> {
        membership_rows(&self.labels, self.n_clusters)
    }

    /// Draw a cluster for every object from its pheromone row.
    ///
    /// # Panics
    ///
    /// If `pheromone` was not built for this ant's object and cluster counts.
    pub fn construct<R: Rng + ?Sized>(&mut self, pheromone: &PheromoneMatrix, rng: &mut R) {
        assert_eq!(pheromone.n_clusters(), self.n_clusters, "pheromone cluster count");
        assert_eq!(pheromone.n_objects(), self.labels.len(), "pheromone object count");
        for (object, label) in self.labels.iter_mut().enumerate() {
            *label = weighted_choice(pheromone.row(object), rng);
        }
        self.fitness = 0.0;
    }

    /// Score the current labels against `data` and store the result.
    ///
    /// # Panics
    ///
    /// If `data` does not hold one item per label.
    pub fn evaluate(&mut self, data: &ClusteringData) -> f64 {
        assert_eq!(data.len(), self.labels.len(), "one data item per label");
        let centers = cluster_centers(data.rows(), &self.labels, self.n_clusters, data.dimension());
        let dispersion: f64 = data
            .rows()
            .iter()
            .zip(&self.labels)
            .map(|(row, &label)| match &centers[label] {
                Some(center) => squared_euclidean(row, center),
                None => 0.0,
            })
            .sum();
        self.fitness = fitness_from_dispersion(dispersion);
        self.fitness
    }
}

pub(crate) fn membership_rows(labels: &[usize], n_clusters: usize) -> Vec<Vec<bool>> {
    labels
        .iter()
        .map(|&label| {
            let mut row = vec![false; n_clusters];
            row[label] = true;
            row
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn data() -> ClusteringData {
        ClusteringData::new(vec![vec![0.0, 0.0], vec![0.0, 0.0], vec![10.0, 10.0]]).unwrap()
    }

    #[test]
    fn test_construct_one_hot_rows() {
        let ph = PheromoneMatrix::new(3, 2, 0.1).unwrap();
        let mut ant = Ant::new(3, 2);
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..50 {
            ant.construct(&ph, &mut rng);
            for row in ant.membership() {
                assert_eq!(row.iter().filter(|&&b| b).count(), 1);
            }
        }
    }

    #[test]
    fn test_construct_follows_dominant_pheromone() {
        let mut ph = PheromoneMatrix::new(3, 2, 0.0).unwrap();
        ph.reinforce(&[1, 0, 1], 1.0);
        let mut ant = Ant::new(3, 2);
        ant.construct(&ph, &mut StdRng::seed_from_u64(0));
        assert_eq!(ant.labels(), &[1, 0, 1]);
    }

    #[test]
    fn test_perfect_split_has_max_fitness() {
        let mut ant = Ant::new(3, 2);
        ant.labels = vec![0, 0, 1];
        assert_eq!(ant.evaluate(&data()), 1.0);
    }

    #[test]
    fn test_mixed_split_scores_lower() {
        let mut ant = Ant::new(3, 2);
        ant.labels = vec![0, 1, 1];
        // Center (5, 5); two points at squared distance 50 each.
        let f = ant.evaluate(&data());
        assert!((f - 1.0 / 101.0).abs() < 1e-12);
    }

    #[test]
    #[should_panic(expected = "pheromone object count")]
    fn test_construct_rejects_mismatched_pheromone() {
        let ph = PheromoneMatrix::new(2, 2, 0.1).unwrap();
        Ant::new(3, 2).construct(&ph, &mut StdRng::seed_from_u64(1));
    }
}
