use crate::error::{Error, Result};

/// Read-only source of ant-colony parameters.
///
/// The engine only reads these values; how they are built or loaded is up to the
/// caller. [`AntParams`] is the stock implementation.
pub trait ParameterSource {
    /// Fraction of pheromone removed each iteration, in `(0, 1)`.
    fn evaporation_rate(&self) -> f64;

    /// Starting value of every pheromone cell, `>= 0`.
    fn pheromone_init(&self) -> f64;

    /// Number of search rounds.
    fn iterations(&self) -> usize;

    /// Ants generated per round, `> 0`.
    fn ant_count(&self) -> usize;
}

/// Ant-colony clustering parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AntParams {
    /// Fraction of pheromone removed before reinforcement.
    pub evaporation_rate: f64,

    /// Initial pheromone on every (object, cluster) cell.
    pub pheromone_init: f64,

    /// Number of search rounds. Zero returns a clustering sampled from the
    /// initial pheromone.
    pub iterations: usize,

    /// Ants per round.
    pub ant_count: usize,
}

impl Default for AntParams {
    fn default() -> Self {
        Self {
            evaporation_rate: 0.7,
            pheromone_init: 0.1,
            iterations: 50,
            ant_count: 20,
        }
    }
}

impl AntParams {
    /// Set the evaporation rate.
    pub fn with_evaporation_rate(mut self, rate: f64) -> Self {
        self.evaporation_rate = rate;
        self
    }

    /// Set the initial pheromone.
    pub fn with_pheromone_init(mut self, init: f64) -> Self {
        self.pheromone_init = init;
        self
    }

    /// Set the number of iterations.
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Set the number of ants per iteration.
    pub fn with_ant_count(mut self, ant_count: usize) -> Self {
        self.ant_count = ant_count;
        self
    }
}

impl ParameterSource for AntParams {
    fn evaporation_rate(&self) -> f64 {
        self.evaporation_rate
    }

    fn pheromone_init(&self) -> f64 {
        self.pheromone_init
    }

    fn iterations(&self) -> usize {
        self.iterations
    }

    fn ant_count(&self) -> usize {
        self.ant_count
    }
}

/// Check any parameter source before a run starts.
pub(crate) fn validate<P: ParameterSource + ?Sized>(params: &P) -> Result<()> {
    let rate = params.evaporation_rate();
    if !(rate > 0.0 && rate < 1.0) {
        return Err(Error::InvalidParameter {
            name: "evaporation_rate",
            message: "must be in (0, 1)",
        });
    }

    let init = params.pheromone_init();
    if !init.is_finite() || init < 0.0 {
        return Err(Error::InvalidParameter {
            name: "pheromone_init",
            message: "must be finite and non-negative",
        });
    }

    if params.ant_count() == 0 {
        return Err(Error::InvalidParameter {
            name: "ant_count",
            message: "must be at least 1",
        });
    }

    Ok(())
}
