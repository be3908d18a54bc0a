//! Genetic operators: ordered crossover and the mutation partition.
//!
//! Both operators preserve the no-duplicate-unit invariant of
//! [`StudyPath`]. Crossover recombines two parents while keeping relative
//! order; mutation applies exactly one of four structural edits, chosen by
//! a fixed probability partition.

use std::collections::HashSet;
use std::sync::Arc;

use rand::seq::{IndexedRandom, SliceRandom};
use rand::Rng;

use crate::catalog::Unit;
use crate::config::EngineConfig;
use crate::path::StudyPath;
use crate::profile::LearnerProfile;

/// Mutation partition: cumulative cutoffs for swap / insert / remove /
/// scramble (40% / 25% / 20% / 15%).
const SWAP_CUTOFF: f64 = 0.40;
const INSERT_CUTOFF: f64 = 0.65;
const REMOVE_CUTOFF: f64 = 0.85;

/// Remove never shrinks a path to or below this length.
const MIN_PATH_AFTER_REMOVE: usize = 3;

// ============================================================================
// Crossover
// ============================================================================

/// Ordered crossover preserving unit-id uniqueness.
///
/// Chooses two distinct cut indices over `min(len_a, len_b)`, copies parent
/// A's segment `[low, high)` into the same child positions, then fills the
/// remaining slots in order by walking parent B and taking each unit not
/// already present. Unresolved slots are dropped (a correct fill pass
/// leaves none). If either parent has fewer than 2 units, returns an
/// unmodified copy of parent A.
pub fn ordered_crossover<R: Rng>(
    parent_a: &StudyPath,
    parent_b: &StudyPath,
    rng: &mut R,
) -> StudyPath {
    if parent_a.len() < 2 || parent_b.len() < 2 {
        return StudyPath::new(parent_a.units().to_vec());
    }

    let n = parent_a.len().min(parent_b.len());
    let (low, high) = distinct_cut_points(n, rng);
    let units = ox_child(parent_a.units(), parent_b.units(), low, high);
    StudyPath::new(units)
}

/// Builds the child sequence: segment `[low, high)` from `a`, the rest
/// filled left to right from `b`.
fn ox_child(a: &[Arc<Unit>], b: &[Arc<Unit>], low: usize, high: usize) -> Vec<Arc<Unit>> {
    let n = a.len().min(b.len());
    let mut slots: Vec<Option<Arc<Unit>>> = vec![None; n];

    let mut segment_ids = HashSet::with_capacity(high - low);
    for i in low..high {
        slots[i] = Some(Arc::clone(&a[i]));
        segment_ids.insert(a[i].id);
    }

    // Parent B is itself duplicate-free, so skipping the segment ids is
    // enough to keep the child duplicate-free.
    let mut donor = b.iter().filter(|u| !segment_ids.contains(&u.id));
    for slot in slots.iter_mut() {
        if slot.is_none() {
            *slot = donor.next().map(Arc::clone);
        }
    }

    let units: Vec<Arc<Unit>> = slots.into_iter().flatten().collect();
    debug_assert_eq!(units.len(), n, "ordered crossover fill pass left unresolved slots");
    units
}

/// Two distinct indices in `0..n`, returned ordered. Requires `n >= 2`.
fn distinct_cut_points<R: Rng>(n: usize, rng: &mut R) -> (usize, usize) {
    let i = rng.random_range(0..n);
    let mut j = rng.random_range(0..n - 1);
    if j >= i {
        j += 1;
    }
    (i.min(j), i.max(j))
}

// ============================================================================
// Mutation
// ============================================================================

/// Applies exactly one mutation to `path`, chosen by the fixed partition:
/// 40% swap, 25% insert, 20% remove, 15% scramble.
///
/// Whether a child is mutated at all is governed by the engine's
/// `mutation_rate` upstream; this function always fires one branch.
pub fn mutate<R: Rng>(
    path: &mut StudyPath,
    available: &[Arc<Unit>],
    profile: &LearnerProfile,
    config: &EngineConfig,
    rng: &mut R,
) {
    let roll: f64 = rng.random_range(0.0..1.0);
    if roll < SWAP_CUTOFF {
        swap_positions(path, rng);
    } else if roll < INSERT_CUTOFF {
        insert_unit(path, available, profile, config, rng);
    } else if roll < REMOVE_CUTOFF {
        remove_unit(path, profile, config, rng);
    } else {
        scramble_segment(path, rng);
    }
    path.debug_check();
}

/// Exchanges two randomly chosen positions. No-op below length 2.
fn swap_positions<R: Rng>(path: &mut StudyPath, rng: &mut R) {
    let n = path.len();
    if n < 2 {
        return;
    }
    let i = rng.random_range(0..n);
    let j = rng.random_range(0..n);
    path.units_mut().swap(i, j);
}

/// Inserts an unused available unit at a random position, preferring units
/// that touch a weak concept. No-op when every available unit is already
/// in the path.
fn insert_unit<R: Rng>(
    path: &mut StudyPath,
    available: &[Arc<Unit>],
    profile: &LearnerProfile,
    config: &EngineConfig,
    rng: &mut R,
) {
    let unused: Vec<&Arc<Unit>> = available.iter().filter(|u| !path.contains(u.id)).collect();
    if unused.is_empty() {
        return;
    }

    let weak = profile.weak_concepts(config.weak_threshold);
    let weak_pool: Vec<&Arc<Unit>> = unused.iter().copied().filter(|u| u.touches(&weak)).collect();

    let pick = if weak_pool.is_empty() {
        unused.choose(rng)
    } else {
        weak_pool.choose(rng)
    };
    let Some(&unit) = pick else { return };

    let pos = rng.random_range(0..=path.len());
    path.units_mut().insert(pos, Arc::clone(unit));
}

/// Removes one unit, preferring one whose concepts are all strong. No-op
/// at length 3 or below.
fn remove_unit<R: Rng>(
    path: &mut StudyPath,
    profile: &LearnerProfile,
    config: &EngineConfig,
    rng: &mut R,
) {
    if path.len() <= MIN_PATH_AFTER_REMOVE {
        return;
    }

    let strong = profile.strong_concepts(config.strong_threshold);
    let all_strong: Vec<usize> = path
        .units()
        .iter()
        .enumerate()
        .filter(|(_, u)| u.concepts.iter().all(|c| strong.contains(c)))
        .map(|(i, _)| i)
        .collect();

    let idx = match all_strong.choose(rng) {
        Some(&i) => i,
        None => rng.random_range(0..path.len()),
    };
    path.units_mut().remove(idx);
}

/// Shuffles a randomly chosen contiguous sub-segment in place. No-op below
/// length 2.
fn scramble_segment<R: Rng>(path: &mut StudyPath, rng: &mut R) {
    let n = path.len();
    if n < 2 {
        return;
    }
    let (start, end) = random_segment(n, rng);
    path.units_mut()[start..=end].shuffle(rng);
}

/// A random inclusive segment `[start, end]` within `0..n`.
fn random_segment<R: Rng>(n: usize, rng: &mut R) -> (usize, usize) {
    let a = rng.random_range(0..n);
    let b = rng.random_range(0..n);
    (a.min(b), a.max(b))
}

// ============================================================================
// Tests
// ============================================================================
