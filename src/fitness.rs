//! Six-term fitness evaluation.
//!
//! [`Evaluator`] scores a candidate path against the learner profile in a
//! single pass over its ordered units. The six weighted terms sum to 1.0
//! and the final score is clamped to [0, 1]. Evaluation is total: sparse
//! profile or catalog data never fails, absent concepts simply count as
//! proficiency 0.
//!
//! This is the one canonical weighting scheme; it supersedes every earlier
//! draft of the formula.

use std::collections::BTreeSet;

use crate::catalog::{Catalog, Concept};
use crate::config::EngineConfig;
use crate::path::StudyPath;
use crate::profile::LearnerProfile;

/// Term weights. Sum to 1.0, priority-ordered: weak-area coverage first.
const W_WEAK_COVERAGE: f64 = 0.30;
const W_REQUIRED_COVERAGE: f64 = 0.25;
const W_TIME_FIT: f64 = 0.15;
const W_PREREQUISITES: f64 = 0.12;
const W_PROGRESSION: f64 = 0.10;
const W_REVIEW: f64 = 0.08;

/// Overage tolerated by the time-fit term before the steep penalty regime.
const TIME_OVERAGE_TOLERANCE: f64 = 0.2;

/// A missing prerequisite below this proficiency counts as a double
/// violation.
const LOW_PROFICIENCY: f64 = 30.0;

/// Target outcome at or above which every catalog concept is required.
const TARGET_FULL_COVERAGE: i32 = 165;
/// Target outcome at or above which concepts up to difficulty 4 are
/// required; below it, up to difficulty 3.
const TARGET_EXTENDED_COVERAGE: i32 = 155;

/// Scores candidate paths for one (catalog, profile, config) triple.
///
/// Construction precomputes the concept views every evaluation needs, so
/// scoring a candidate is a single pass over its units.
pub struct Evaluator<'a> {
    profile: &'a LearnerProfile,
    weak: BTreeSet<Concept>,
    strong: BTreeSet<Concept>,
    required: BTreeSet<Concept>,
    /// Concepts the learner effectively knows (proficiency at or above the
    /// weak threshold). Seeds the running learned set of the prerequisite
    /// term; the profile itself is never touched.
    learned_seed: BTreeSet<Concept>,
}

impl<'a> Evaluator<'a> {
    /// Builds an evaluator, deriving weak/strong/required concept sets.
    pub fn new(catalog: &Catalog, profile: &'a LearnerProfile, config: &EngineConfig) -> Self {
        let required = if profile.target_outcome >= TARGET_FULL_COVERAGE {
            catalog.concepts_up_to(5)
        } else if profile.target_outcome >= TARGET_EXTENDED_COVERAGE {
            catalog.concepts_up_to(4)
        } else {
            catalog.concepts_up_to(3)
        };
        Self {
            profile,
            weak: profile.weak_concepts(config.weak_threshold),
            strong: profile.strong_concepts(config.strong_threshold),
            required,
            learned_seed: profile.strong_concepts(config.weak_threshold),
        }
    }

    /// Computes the fitness of `path`, in [0, 1]. Empty paths score 0.
    pub fn evaluate(&self, path: &StudyPath) -> f64 {
        if path.is_empty() {
            return 0.0;
        }
        let touched = path.covered_concepts();

        let score = W_WEAK_COVERAGE * self.weak_coverage(&touched)
            + W_REQUIRED_COVERAGE * self.required_coverage(&touched)
            + W_TIME_FIT * time_fit(path.total_time(), self.profile.available_time_week)
            + W_PREREQUISITES * self.prerequisite_compliance(path)
            + W_PROGRESSION * progression_smoothness(path)
            + W_REVIEW * self.review_efficiency(&touched);

        score.clamp(0.0, 1.0)
    }

    /// Evaluates `path` and stores the result on it.
    pub fn score(&self, path: &mut StudyPath) {
        let fitness = self.evaluate(path);
        path.set_fitness(fitness);
    }

    /// Term (a): share of the learner's weak concepts the path touches.
    /// 1.0 when the learner has no weak concepts.
    fn weak_coverage(&self, touched: &BTreeSet<&Concept>) -> f64 {
        if self.weak.is_empty() {
            return 1.0;
        }
        let covered = self.weak.iter().filter(|c| touched.contains(*c)).count();
        covered as f64 / self.weak.len() as f64
    }

    /// Term (b): share of the required concepts (tiered by target outcome)
    /// the path touches. 1.0 when nothing is required.
    fn required_coverage(&self, touched: &BTreeSet<&Concept>) -> f64 {
        if self.required.is_empty() {
            return 1.0;
        }
        let covered = self.required.iter().filter(|c| touched.contains(*c)).count();
        covered as f64 / self.required.len() as f64
    }

    /// Term (d): prerequisite compliance along the sequence.
    ///
    /// Walks the path with a local learned set seeded from the profile's
    /// effectively-known concepts. Each prerequisite slot not yet learned
    /// is a violation, double-weighted when the learner's proficiency for
    /// it is below [`LOW_PROFICIENCY`]. Normalized against the worst case
    /// of every slot being a double violation.
    fn prerequisite_compliance(&self, path: &StudyPath) -> f64 {
        let mut learned: BTreeSet<&Concept> = self.learned_seed.iter().collect();
        let mut weighted = 0.0;
        let mut max_weighted = 0.0;

        for unit in path.units() {
            for prereq in &unit.prerequisite_concepts {
                max_weighted += 2.0;
                if !learned.contains(prereq) {
                    weighted += if self.profile.proficiency(prereq) < LOW_PROFICIENCY {
                        2.0
                    } else {
                        1.0
                    };
                }
            }
            learned.extend(unit.concepts.iter());
        }

        if max_weighted == 0.0 {
            1.0
        } else {
            1.0 - weighted / max_weighted
        }
    }

    /// Term (f): penalizes paths that mostly re-teach mastered material.
    fn review_efficiency(&self, touched: &BTreeSet<&Concept>) -> f64 {
        let strong_touched = touched.iter().filter(|c| self.strong.contains(**c)).count();
        1.0 - strong_touched as f64 / touched.len() as f64
    }
}

/// Term (c): how well the path's total time fits the weekly budget.
///
/// Within a 20% overage tolerance the score falls linearly with distance
/// from the budget (floored at 0); beyond it the score is the inverse
/// ratio, a steep penalty for badly oversized plans.
fn time_fit(total_time: u32, available_time_week: u32) -> f64 {
    let total = total_time as f64;
    let available = available_time_week as f64;
    let ratio = total / available;
    if ratio <= 1.0 + TIME_OVERAGE_TOLERANCE {
        (1.0 - (ratio - 1.0).abs()).max(0.0)
    } else {
        available / total
    }
}

/// Term (e): smoothness of the difficulty curve. 1.0 for paths of fewer
/// than two units.
fn progression_smoothness(path: &StudyPath) -> f64 {
    let units = path.units();
    if units.len() < 2 {
        return 1.0;
    }
    let total_delta: f64 = units
        .windows(2)
        .map(|w| (f64::from(w[1].difficulty) - f64::from(w[0].difficulty)).abs())
        .sum();
    let mean_delta = total_delta / (units.len() - 1) as f64;
    1.0 / (1.0 + mean_delta)
}
