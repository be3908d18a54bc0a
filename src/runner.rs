//! Evolutionary loop execution.
//!
//! [`evolve`] orchestrates the complete search: availability filtering →
//! population initialization → evaluation → a fixed number of generations
//! of selection, crossover, and mutation with single-elite carry-over →
//! the fittest candidate of the final population.
//!
//! Termination is generation-count-based only; there is no
//! convergence-based early exit. With a fixed seed the whole sequence of
//! populations is reproducible.

use log::{debug, info};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

use std::sync::Arc;

use crate::catalog::{Catalog, Unit};
use crate::config::EngineConfig;
use crate::error::Error;
use crate::filter::available_units;
use crate::fitness::Evaluator;
use crate::operators::{mutate, ordered_crossover};
use crate::path::StudyPath;
use crate::profile::LearnerProfile;
use crate::selection::tournament;

/// Initial candidate length bounds. The time-budget-derived target is
/// clamped into this range, then capped at the candidate pool size.
const MIN_INITIAL_LEN: usize = 5;
const MAX_INITIAL_LEN: usize = 20;

/// Generations between progress log lines.
const LOG_EVERY: usize = 10;

/// Result of one evolutionary search.
#[derive(Debug, Clone)]
pub struct EvolveResult {
    /// The fittest candidate of the final population.
    pub best: StudyPath,

    /// Its fitness, in [0, 1] (same as `best.fitness()`).
    pub best_fitness: f64,

    /// Number of generations executed.
    pub generations: usize,

    /// Best fitness after initialization and after each generation
    /// (`generations + 1` entries). Non-decreasing, by elitism.
    pub fitness_history: Vec<f64>,
}

/// Runs a full evolutionary search for `profile` over `catalog`.
///
/// # Errors
/// [`Error::InvalidConfig`] for out-of-range parameters,
/// [`Error::InvalidProfile`] for a zero weekly time budget, and
/// [`Error::NoEligibleUnits`] when no unit survives the availability
/// filter and its fallback.
pub fn evolve(
    catalog: &Catalog,
    profile: &LearnerProfile,
    config: &EngineConfig,
) -> Result<EvolveResult, Error> {
    evolve_seeded(catalog, profile, config, None)
}

/// Like [`evolve`], but optionally plants an existing path into the
/// initial population (e.g. a previously generated plan to improve upon).
///
/// # Errors
/// As [`evolve`]; additionally [`Error::UnknownUnit`] if the seed path
/// references a unit that is not in the catalog.
pub fn evolve_seeded(
    catalog: &Catalog,
    profile: &LearnerProfile,
    config: &EngineConfig,
    initial: Option<StudyPath>,
) -> Result<EvolveResult, Error> {
    config.validate()?;
    if profile.available_time_week == 0 {
        return Err(Error::InvalidProfile);
    }
    if let Some(path) = &initial {
        for id in path.unit_ids() {
            if catalog.get(id).is_none() {
                return Err(Error::UnknownUnit(id));
            }
        }
    }

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::seed_from_u64(rand::random::<u64>()),
    };

    let pool = available_units(catalog, profile, config, &mut rng)?;
    let evaluator = Evaluator::new(catalog, profile, config);

    debug!(
        "starting search: population={} generations={} pool={}",
        config.population_size,
        config.generations,
        pool.len()
    );

    // Initial population, evaluated up front.
    let mut population: Vec<StudyPath> = Vec::with_capacity(config.population_size);
    if let Some(path) = initial {
        population.push(path);
    }
    while population.len() < config.population_size {
        population.push(random_path(&pool, profile, &mut rng));
    }
    population.truncate(config.population_size);
    for candidate in &mut population {
        evaluator.score(candidate);
    }

    let mut fitness_history = Vec::with_capacity(config.generations + 1);
    fitness_history.push(best_of(&population).fitness());

    for gen in 0..config.generations {
        let elite = best_of(&population).clone();
        let mut next_gen: Vec<StudyPath> = Vec::with_capacity(config.population_size);
        next_gen.push(elite);

        while next_gen.len() < config.population_size {
            let parent_a = tournament(&population, config.tournament_size, &mut rng);
            let parent_b = tournament(&population, config.tournament_size, &mut rng);

            let mut child = ordered_crossover(parent_a, parent_b, &mut rng);
            if rng.random_range(0.0..1.0) < config.mutation_rate {
                mutate(&mut child, &pool, profile, config, &mut rng);
            }
            evaluator.score(&mut child);
            next_gen.push(child);
        }

        population = next_gen;
        let gen_best = best_of(&population).fitness();
        fitness_history.push(gen_best);

        if (gen + 1) % LOG_EVERY == 0 {
            debug!("generation {}: best fitness {:.3}", gen + 1, gen_best);
        }
    }

    let best = best_of(&population).clone();
    info!(
        "search complete: fitness {:.3}, {} units, {} min",
        best.fitness(),
        best.len(),
        best.total_time()
    );

    Ok(EvolveResult {
        best_fitness: best.fitness(),
        best,
        generations: config.generations,
        fitness_history,
    })
}

/// Draws one random candidate from the pool.
///
/// Length is the weekly budget divided by the pool's mean unit time,
/// clamped to [`MIN_INITIAL_LEN`]..=[`MAX_INITIAL_LEN`] and capped at the
/// pool size; units are drawn without replacement.
fn random_path<R: Rng>(pool: &[Arc<Unit>], profile: &LearnerProfile, rng: &mut R) -> StudyPath {
    let mean_time = pool.iter().map(|u| u.time_estimate).sum::<u32>() as f64 / pool.len() as f64;
    let target = target_length(profile.available_time_week, mean_time).min(pool.len());
    let units: Vec<Arc<Unit>> = pool.choose_multiple(rng, target).map(Arc::clone).collect();
    StudyPath::new(units)
}

/// Time-budget-derived candidate length, before the pool-size cap.
fn target_length(available_time_week: u32, mean_unit_time: f64) -> usize {
    let raw = (f64::from(available_time_week) / mean_unit_time).floor() as usize;
    raw.clamp(MIN_INITIAL_LEN, MAX_INITIAL_LEN)
}

/// The fittest candidate; first of equals, so repeated calls on the same
/// population agree.
fn best_of(population: &[StudyPath]) -> &StudyPath {
    let mut best = &population[0];
    for candidate in &population[1..] {
        if candidate.fitness() > best.fitness() {
            best = candidate;
        }
    }
    best
}
