use super::ant::membership_rows;

/// Best clustering found by a run.
#[derive(Clone, Debug, PartialEq)]
pub struct AntClusteringResult {
    labels: Vec<usize>,
    n_clusters: usize,
    fitness: f64,
    history: Vec<f64>,
}

impl AntClusteringResult {
    pub(crate) fn new(labels: Vec<usize>, n_clusters: usize, fitness: f64, history: Vec<f64>) -> Self {
        Self {
            labels,
            n_clusters,
            fitness,
            history,
        }
    }

    /// Object × cluster membership; each row has exactly one `true`.
    pub fn membership(&self) -> Vec<Vec<bool>> {
        membership_rows(&self.labels, self.n_clusters)
    }

    /// Cluster label per object.
    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    /// Consume into labels.
    pub fn into_labels(self) -> Vec<usize> {
        self.labels
    }

    /// Member object indices for each cluster, in ascending order.
    ///
    /// Clusters nobody was assigned to are empty.
    pub fn clusters(&self) -> Vec<Vec<usize>> {
        let mut out = vec![Vec::new(); self.n_clusters];
        for (object, &label) in self.labels.iter().enumerate() {
            out[label].push(object);
        }
        out
    }

    /// Requested number of clusters.
    pub fn n_clusters(&self) -> usize {
        self.n_clusters
    }

    /// Fitness of the returned clustering.
    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    /// Best fitness known after each iteration (empty for zero iterations).
    pub fn history(&self) -> &[f64] {
        &self.history
    }

    /// Number of iterations run.
    pub fn iterations(&self) -> usize {
        self.history.len()
    }
}
