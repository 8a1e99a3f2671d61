//! Ant-colony clustering.
//!
//! Each ant is a complete hard clustering (one label per object) drawn at random
//! from a shared pheromone matrix. Ants are scored by how tightly their clusters
//! gather around their means, and the fitter an ant, the more pheromone it leaves
//! on the (object, cluster) pairs it chose. Over iterations the colony converges
//! on compact clusterings.
//!
//! **Objective**: the fitness of an assignment is
//!
//! ```text
//! F = 1 / (1 + Σ_k Σ_{x ∈ C_k} ||x - μ_k||²)
//! ```
//!
//! so it is `1` exactly when every cluster is a single repeated point.
//!
//! ## Usage
//!
//! ```rust
//! use antclump::cluster::{AntMeans, AntParams, ClusteringData};
//! use antclump::parallel::Pool;
//!
//! let data = ClusteringData::new(vec![
//!     vec![0.0, 0.0],
//!     vec![0.0, 0.0],
//!     vec![10.0, 10.0],
//! ])
//! .unwrap();
//!
//! let model = AntMeans::new(AntParams::default())
//!     .with_seed(7)
//!     .with_pool(Pool::new(2));
//! let result = model.process(&data, 2).unwrap();
//! let labels = result.labels();
//! assert_eq!(labels[0], labels[1]);
//! assert_ne!(labels[0], labels[2]);
//! ```

mod ant;
mod ant_means;
mod data;
mod params;
mod pheromone;
mod result;
mod sampling;
pub(crate) mod util;

pub use ant::{fitness_from_dispersion, Ant};
pub use ant_means::AntMeans;
pub use data::ClusteringData;
pub use params::{AntParams, ParameterSource};
pub use pheromone::PheromoneMatrix;
pub use result::AntClusteringResult;
pub use sampling::weighted_choice;
