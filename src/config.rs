//! Engine configuration.
//!
//! [`EngineConfig`] holds all parameters that control a path search.
//!
//! # Defaults
//!
//! ```
//! use pathwise::EngineConfig;
//!
//! let config = EngineConfig::default();
//! assert_eq!(config.population_size, 50);
//! assert_eq!(config.generations, 100);
//! ```
//!
//! # Builder Pattern
//!
//! ```
//! use pathwise::EngineConfig;
//!
//! let config = EngineConfig::default()
//!     .with_population_size(80)
//!     .with_mutation_rate(0.2)
//!     .with_seed(42);
//! ```

use crate::error::Error;

/// Configuration for the evolutionary path search.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Number of candidate paths per generation. Constant across the run.
    pub population_size: usize,

    /// Number of generations to run. 0 is legal: only the initial
    /// population is evaluated.
    pub generations: usize,

    /// Probability that a freshly produced child undergoes mutation
    /// (0.0–1.0). Which mutation fires is a fixed inner partition.
    pub mutation_rate: f64,

    /// Tournament size for parent selection. Capped at the population size
    /// when sampling.
    pub tournament_size: usize,

    /// Proficiency below this is a weak concept (0–100).
    pub weak_threshold: f64,

    /// Proficiency at or above this is a strong concept (0–100).
    pub strong_threshold: f64,

    /// Minimum readiness score for a unit to enter the candidate pool
    /// (0–100).
    pub readiness_threshold: f64,

    /// Random seed. `None` draws one from entropy; any fixed value makes
    /// the whole search reproducible.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            generations: 100,
            mutation_rate: 0.1,
            tournament_size: 3,
            weak_threshold: 50.0,
            strong_threshold: 70.0,
            readiness_threshold: 40.0,
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of generations.
    pub fn with_generations(mut self, n: usize) -> Self {
        self.generations = n;
        self
    }

    /// Sets the mutation rate, clamped to [0, 1].
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the tournament size.
    pub fn with_tournament_size(mut self, k: usize) -> Self {
        self.tournament_size = k;
        self
    }

    /// Sets the weak-concept threshold, clamped to [0, 100].
    pub fn with_weak_threshold(mut self, t: f64) -> Self {
        self.weak_threshold = t.clamp(0.0, 100.0);
        self
    }

    /// Sets the strong-concept threshold, clamped to [0, 100].
    pub fn with_strong_threshold(mut self, t: f64) -> Self {
        self.strong_threshold = t.clamp(0.0, 100.0);
        self
    }

    /// Sets the readiness threshold, clamped to [0, 100].
    pub fn with_readiness_threshold(mut self, t: f64) -> Self {
        self.readiness_threshold = t.clamp(0.0, 100.0);
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    /// [`Error::InvalidConfig`] with a description of the offending
    /// parameter.
    pub fn validate(&self) -> Result<(), Error> {
        if self.population_size < 1 {
            return Err(Error::InvalidConfig("population_size must be at least 1".into()));
        }
        if self.tournament_size < 1 {
            return Err(Error::InvalidConfig("tournament_size must be at least 1".into()));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(Error::InvalidConfig("mutation_rate must be in [0, 1]".into()));
        }
        if self.weak_threshold > self.strong_threshold {
            return Err(Error::InvalidConfig(
                "weak_threshold must not exceed strong_threshold".into(),
            ));
        }
        Ok(())
    }
}
