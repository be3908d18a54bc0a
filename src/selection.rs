//! Parent selection.
//!
//! Tournament selection: sample a handful of candidates uniformly without
//! replacement and keep the fittest. Tournament size controls selection
//! pressure; 3 is a moderate default.

use rand::Rng;

use crate::path::StudyPath;

/// Selects a parent by tournament.
///
/// Samples `min(k, population.len())` candidates without replacement and
/// returns the one with the highest fitness. `k` is raised to 1 if 0 is
/// passed.
///
/// # Panics
/// Panics if `population` is empty.
pub fn tournament<'a, R: Rng>(population: &'a [StudyPath], k: usize, rng: &mut R) -> &'a StudyPath {
    assert!(!population.is_empty(), "cannot select from empty population");

    let k = k.max(1).min(population.len());
    let entrants = rand::seq::index::sample(rng, population.len(), k);

    let mut best = entrants.index(0);
    for idx in entrants.iter().skip(1) {
        if population[idx].fitness() > population[best].fitness() {
            best = idx;
        }
    }
    &population[best]
}
