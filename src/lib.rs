//! Genetic learning-path optimizer.
//!
//! Sequences a catalog of learning units into a personalized, time-bounded
//! study plan for a learner whose per-concept proficiencies are known. The
//! search space — orderings and subsets of units under competing objectives
//! (weak-area coverage, prerequisites, time budget, difficulty progression)
//! — has no closed-form optimum, so the engine runs a genetic metaheuristic:
//! tournament selection, ordered crossover, a four-branch mutation
//! partition, and single-elite generational replacement.
//!
//! # Key Types
//!
//! - [`Catalog`] / [`Unit`]: the immutable unit collection, built once
//! - [`LearnerProfile`]: per-concept proficiency, target outcome, weekly
//!   time budget
//! - [`EngineConfig`]: search parameters (population, generations, rates,
//!   thresholds, seed)
//! - [`StudyPath`]: a candidate plan — ordered, duplicate-free units
//! - [`EvolveResult`]: the best plan found plus run statistics
//!
//! # Usage
//!
//! ```
//! use pathwise::{Catalog, EngineConfig, LearnerProfile, Unit};
//!
//! let catalog = Catalog::builder()
//!     .unit(Unit::new(1, "Integer Properties", 1, 25, ["integers"]))
//!     .unit(Unit::new(2, "Prime Factorization", 2, 30, ["primes"]))
//!     .requires(2, 1)
//!     .build()?;
//!
//! let profile = LearnerProfile::new(160, 300)
//!     .with_concept("integers", 70.0)
//!     .with_concept("primes", 25.0);
//!
//! let config = EngineConfig::default().with_seed(42);
//! let result = pathwise::evolve(&catalog, &profile, &config)?;
//!
//! println!("plan: {:?} ({} min)", result.best.unit_ids(), result.best.total_time());
//! # Ok::<(), pathwise::Error>(())
//! ```
//!
//! # Determinism & Concurrency
//!
//! A search is single-threaded and, given a fixed seed, fully
//! reproducible: one explicit RNG is threaded through initialization and
//! every operator. Independent searches can run concurrently — the catalog
//! shares units immutably (`Arc`), the profile is never mutated, and each
//! search owns its population and RNG.

pub mod catalog;
pub mod config;
pub mod error;
pub mod filter;
pub mod fitness;
pub mod operators;
pub mod path;
pub mod profile;
pub mod runner;
pub mod selection;

pub use catalog::{Catalog, CatalogBuilder, Concept, Unit};
pub use config::EngineConfig;
pub use error::Error;
pub use fitness::Evaluator;
pub use path::StudyPath;
pub use profile::LearnerProfile;
pub use runner::{evolve, evolve_seeded, EvolveResult};
