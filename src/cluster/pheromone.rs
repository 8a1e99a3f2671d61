use crate::error::{Error, Result};

/// Object × cluster affinity weights, all non-negative.
///
/// Mutated only by the orchestrating thread between parallel phases; workers see
/// it through shared references.
#[derive(Clone, Debug, PartialEq)]
pub struct PheromoneMatrix {
    n_clusters: usize,
    values: Vec<f64>,
}

impl PheromoneMatrix {
    /// Every cell set to `init`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidParameter`] if `init` is negative or not finite, or if
    /// there are no clusters.
    pub fn new(n_objects: usize, n_clusters: usize, init: f64) -> Result<Self> {
        if n_clusters == 0 {
            return Err(Error::InvalidParameter {
                name: "n_clusters",
                message: "must be at least 1",
            });
        }
        if !init.is_finite() || init < 0.0 {
            return Err(Error::InvalidParameter {
                name: "pheromone_init",
                message: "must be finite and non-negative",
            });
        }
        Ok(Self {
            n_clusters,
            values: vec![init; n_objects * n_clusters],
        })
    }

    /// Number of objects (rows).
    pub fn n_objects(&self) -> usize {
        self.values.len() / self.n_clusters
    }

    /// Number of clusters (columns).
    pub fn n_clusters(&self) -> usize {
        self.n_clusters
    }

    /// Weights of object `object` over all clusters.
    #[inline]
    pub fn row(&self, object: usize) -> &[f64] {
        let start = object * self.n_clusters;
        &self.values[start..start + self.n_clusters]
    }

    /// A single cell.
    pub fn get(&self, object: usize, cluster: usize) -> f64 {
        self.row(object)[cluster]
    }

    /// Scale every cell by `1 - rate`, clamping at zero.
    pub fn evaporate(&mut self, rate: f64) {
        let keep = 1.0 - rate;
        for v in &mut self.values {
            *v = (*v * keep).max(0.0);
        }
    }

    /// Add `amount` to every cell an ant's labels select.
    ///
    /// # Panics
    ///
    /// If `labels` does not have one entry per object, or a label is not a
    /// valid cluster index.
    pub fn reinforce(&mut self, labels: &[usize], amount: f64) {
        assert_eq!(
            labels.len(),
            self.n_objects(),
            "expected one label per object"
        );
        let n_clusters = self.n_clusters;
        for (row, &cluster) in self.values.chunks_mut(n_clusters).zip(labels) {
            assert!(
                cluster < n_clusters,
                "label {cluster} out of range for {n_clusters} clusters"
            );
            row[cluster] += amount;
        }
    }

    /// Fail on the first NaN or infinite cell.
    pub fn check_finite(&self) -> Result<()> {
        match self.values.iter().position(|v| !v.is_finite()) {
            Some(pos) => Err(Error::NonFinitePheromone {
                object: pos / self.n_clusters,
                cluster: pos % self.n_clusters,
            }),
            None => Ok(()),
        }
    }
}
