//! Candidate study path — the chromosome.
//!
//! A [`StudyPath`] is an ordered, duplicate-free sequence of shared unit
//! references plus a cached fitness. Paths are created by initialization,
//! crossover, or mutation; their fitness is stale until the evaluator
//! recomputes it.

use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use crate::catalog::{Concept, Unit};

/// An ordered, duplicate-free sequence of units representing one proposed
/// study plan.
#[derive(Debug, Clone)]
pub struct StudyPath {
    units: Vec<Arc<Unit>>,
    fitness: f64,
}

impl StudyPath {
    /// Wraps a unit sequence as a candidate with fitness 0.
    ///
    /// # Panics
    /// Panics if the sequence contains the same unit id twice. Operators
    /// are required to preserve uniqueness; a duplicate is a bug in the
    /// caller, not a recoverable condition.
    pub fn new(units: Vec<Arc<Unit>>) -> Self {
        let mut seen = HashSet::with_capacity(units.len());
        for unit in &units {
            assert!(seen.insert(unit.id), "study path contains duplicate unit id {}", unit.id);
        }
        Self { units, fitness: 0.0 }
    }

    /// Units in study order.
    pub fn units(&self) -> &[Arc<Unit>] {
        &self.units
    }

    /// Number of units.
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Returns `true` for the empty path.
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Unit ids in study order.
    pub fn unit_ids(&self) -> Vec<u32> {
        self.units.iter().map(|u| u.id).collect()
    }

    /// Total estimated time in minutes.
    pub fn total_time(&self) -> u32 {
        self.units.iter().map(|u| u.time_estimate).sum()
    }

    /// Distinct concepts taught across the whole path.
    pub fn covered_concepts(&self) -> BTreeSet<&Concept> {
        self.units.iter().flat_map(|u| u.concepts.iter()).collect()
    }

    /// Number of distinct concepts taught.
    pub fn concepts_covered(&self) -> usize {
        self.covered_concepts().len()
    }

    /// Returns `true` if the path already contains `id`.
    pub fn contains(&self, id: u32) -> bool {
        self.units.iter().any(|u| u.id == id)
    }

    /// Most recently computed fitness, in [0, 1]. 0 until first evaluation.
    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    pub(crate) fn set_fitness(&mut self, fitness: f64) {
        self.fitness = fitness;
    }

    /// Mutable access for the genetic operators. Callers must keep unit
    /// ids unique; [`debug_check`](Self::debug_check) verifies after.
    pub(crate) fn units_mut(&mut self) -> &mut Vec<Arc<Unit>> {
        &mut self.units
    }

    /// Debug-build verification of the uniqueness invariant.
    pub(crate) fn debug_check(&self) {
        if cfg!(debug_assertions) {
            let ids: HashSet<u32> = self.units.iter().map(|u| u.id).collect();
            debug_assert_eq!(ids.len(), self.units.len(), "study path lost id uniqueness");
        }
    }
}
