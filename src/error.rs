use thiserror::Error;

/// Errors returned by the clustering engine and the parallel substrate.
#[derive(Debug, Error)]
pub enum Error {
    /// Input slice is empty.
    #[error("empty input")]
    EmptyInput,

    /// Invalid parameter value.
    #[error("invalid parameter {name}: {message}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Human-readable explanation.
        message: &'static str,
    },

    /// Requested cluster count is incompatible with the dataset.
    #[error("invalid cluster count: requested {requested}, but dataset has {n_items} items")]
    InvalidClusterCount {
        /// Requested number of clusters.
        requested: usize,
        /// Number of items in the dataset.
        n_items: usize,
    },

    /// Points in a dataset have inconsistent dimensionality.
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch {
        /// Expected dimensionality.
        expected: usize,
        /// Found dimensionality.
        found: usize,
    },

    /// A precomputed distance matrix is not square.
    #[error("distance matrix is not square: row {row} has {found} entries, expected {expected}")]
    NonSquareMatrix {
        /// Offending row.
        row: usize,
        /// Number of rows in the matrix.
        expected: usize,
        /// Length of the offending row.
        found: usize,
    },

    /// A dispatched partition panicked.
    #[error("worker for partition {partition} failed: {message}")]
    WorkerFailure {
        /// Partition index in dispatch order.
        partition: usize,
        /// Panic payload, when it was a string.
        message: String,
    },

    /// A pheromone entry became NaN or infinite.
    #[error("non-finite pheromone at object {object}, cluster {cluster}")]
    NonFinitePheromone {
        /// Object (row) index.
        object: usize,
        /// Cluster (column) index.
        cluster: usize,
    },

    /// Other error.
    #[error("{0}")]
    Other(String),
}

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, Error>;
