//! Ant-colony clustering.
//!
//! `antclump` clusters dense vectors with an ant-colony metaheuristic and ships the
//! small fork-join substrate it runs on.
//!
//! - [`cluster`]: pheromone model, ants, and the [`AntMeans`] engine
//! - [`parallel`]: `parallel_for` / `parallel_for_each` over a bounded [`Pool`]
//! - [`distance`]: coordinates and pairwise distance matrices

#![forbid(unsafe_code)]

pub mod cluster;
pub mod distance;
pub mod error;
pub mod parallel;

pub use cluster::{
    weighted_choice, AntClusteringResult, AntMeans, AntParams, ClusteringData, ParameterSource,
    PheromoneMatrix,
};
pub use distance::{Coordinate, DistanceMatrix};
pub use error::{Error, Result};
pub use parallel::{Executor, LoopIndex, Pool};
