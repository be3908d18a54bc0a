//! Learner profile and readiness scoring.
//!
//! A [`LearnerProfile`] is read-only during a search: the engine derives
//! weak/strong concept views and per-unit readiness from it but never
//! writes back. Proficiency bookkeeping during fitness evaluation happens
//! on private copies.

use std::collections::{BTreeMap, BTreeSet};

use crate::catalog::{Concept, Unit};

/// A learner's state: target outcome, weekly time budget, and per-concept
/// proficiency in [0, 100].
///
/// Concepts absent from the map are treated as proficiency 0 wherever a
/// score is needed; absence is never an error.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LearnerProfile {
    /// Target outcome score (e.g. a 130–170 exam scale).
    pub target_outcome: i32,
    /// Weekly study budget in minutes.
    pub available_time_week: u32,
    /// Proficiency per assessed concept, 0–100.
    pub known_concepts: BTreeMap<Concept, f64>,
}

impl LearnerProfile {
    /// Creates a profile with no assessed concepts.
    pub fn new(target_outcome: i32, available_time_week: u32) -> Self {
        Self {
            target_outcome,
            available_time_week,
            known_concepts: BTreeMap::new(),
        }
    }

    /// Records an assessed concept, clamping proficiency to [0, 100].
    pub fn with_concept(mut self, concept: impl Into<Concept>, proficiency: f64) -> Self {
        self.known_concepts.insert(concept.into(), proficiency.clamp(0.0, 100.0));
        self
    }

    /// Proficiency for `concept`, 0 if never assessed.
    pub fn proficiency(&self, concept: &str) -> f64 {
        self.known_concepts.get(concept).copied().unwrap_or(0.0)
    }

    /// Assessed concepts with proficiency below `threshold`.
    pub fn weak_concepts(&self, threshold: f64) -> BTreeSet<Concept> {
        self.known_concepts
            .iter()
            .filter(|(_, &p)| p < threshold)
            .map(|(c, _)| c.clone())
            .collect()
    }

    /// Assessed concepts with proficiency at or above `threshold`.
    pub fn strong_concepts(&self, threshold: f64) -> BTreeSet<Concept> {
        self.known_concepts
            .iter()
            .filter(|(_, &p)| p >= threshold)
            .map(|(c, _)| c.clone())
            .collect()
    }

    /// How prepared the learner is for `unit`, 0–100.
    ///
    /// A unit without prerequisite concepts scores 100. Otherwise this is
    /// the arithmetic mean of the proficiencies of its prerequisite
    /// concepts, with unassessed concepts contributing 0.
    pub fn readiness(&self, unit: &Unit) -> f64 {
        if unit.prerequisite_concepts.is_empty() {
            return 100.0;
        }
        let total: f64 = unit
            .prerequisite_concepts
            .iter()
            .map(|c| self.proficiency(c))
            .sum();
        total / unit.prerequisite_concepts.len() as f64
    }
}
