//! Learning-unit catalog.
//!
//! A [`Catalog`] is an immutable, load-once collection of [`Unit`] records.
//! Units are stored behind [`Arc`] so candidate paths share them by
//! reference; nothing is mutated after [`CatalogBuilder::build`] returns.
//!
//! Prerequisites are declared between *units* (by id) but consumed as
//! *concept tags*: `build()` runs a single resolution pass that unions each
//! prerequisite unit's concept tags into the dependent unit's
//! prerequisite-concept set. The union is idempotent, so declaring a link
//! twice has no additional effect.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use crate::error::Error;

/// An atomic skill tag. Opaque to the engine; equality is all that matters.
pub type Concept = String;

/// A catalog learning item: difficulty, time cost, taught concepts, and
/// prerequisite concepts.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Unit {
    /// Unique id within the catalog.
    pub id: u32,
    /// Display name.
    pub name: String,
    /// Difficulty on a 1–5 scale.
    pub difficulty: u8,
    /// Estimated completion time in minutes.
    pub time_estimate: u32,
    /// Concepts this unit teaches. Never empty.
    pub concepts: BTreeSet<Concept>,
    /// Concepts the learner should already hold. May be empty.
    pub prerequisite_concepts: BTreeSet<Concept>,
}

impl Unit {
    /// Creates a unit with no prerequisite concepts.
    ///
    /// # Panics
    /// Panics if `difficulty` is outside 1–5, `time_estimate` is zero, or
    /// `concepts` is empty. Catalog metadata is authored upstream; a
    /// violation here is a data bug, not a runtime condition.
    pub fn new<I, C>(id: u32, name: impl Into<String>, difficulty: u8, time_estimate: u32, concepts: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Concept>,
    {
        let concepts: BTreeSet<Concept> = concepts.into_iter().map(Into::into).collect();
        assert!((1..=5).contains(&difficulty), "unit {id}: difficulty must be 1..=5");
        assert!(time_estimate > 0, "unit {id}: time_estimate must be positive");
        assert!(!concepts.is_empty(), "unit {id}: concepts must not be empty");
        Self {
            id,
            name: name.into(),
            difficulty,
            time_estimate,
            concepts,
            prerequisite_concepts: BTreeSet::new(),
        }
    }

    /// Adds prerequisite concept tags directly, bypassing unit-id links.
    pub fn with_prerequisites<I, C>(mut self, concepts: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Concept>,
    {
        self.prerequisite_concepts.extend(concepts.into_iter().map(Into::into));
        self
    }

    /// Returns `true` if any of this unit's taught concepts is in `set`.
    pub fn touches(&self, set: &BTreeSet<Concept>) -> bool {
        self.concepts.iter().any(|c| set.contains(c))
    }
}

/// Immutable collection of learning units.
#[derive(Debug, Clone)]
pub struct Catalog {
    units: Vec<Arc<Unit>>,
    by_id: HashMap<u32, usize>,
}

impl Catalog {
    /// Starts an empty builder.
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::default()
    }

    /// All units, in registration order.
    pub fn units(&self) -> &[Arc<Unit>] {
        &self.units
    }

    /// Looks up a unit by id.
    pub fn get(&self, id: u32) -> Option<&Arc<Unit>> {
        self.by_id.get(&id).map(|&i| &self.units[i])
    }

    /// Number of units.
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Returns `true` if the catalog holds no units.
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Union of concepts taught by units with difficulty at most
    /// `max_difficulty`. Pass 5 for the full concept universe.
    pub fn concepts_up_to(&self, max_difficulty: u8) -> BTreeSet<Concept> {
        self.units
            .iter()
            .filter(|u| u.difficulty <= max_difficulty)
            .flat_map(|u| u.concepts.iter().cloned())
            .collect()
    }
}

/// Assembles a [`Catalog`]: register units, declare unit-id prerequisite
/// links, then [`build`](CatalogBuilder::build).
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    units: Vec<Unit>,
    links: Vec<(u32, u32)>,
}

impl CatalogBuilder {
    /// Registers a unit.
    pub fn unit(mut self, unit: Unit) -> Self {
        self.units.push(unit);
        self
    }

    /// Declares that `unit_id` depends on `prereq_id`: at build time the
    /// prerequisite unit's concept tags are unioned into the dependent
    /// unit's prerequisite-concept set.
    pub fn requires(mut self, unit_id: u32, prereq_id: u32) -> Self {
        self.links.push((unit_id, prereq_id));
        self
    }

    /// Resolves all links in one pass and freezes the catalog.
    ///
    /// # Errors
    /// [`Error::DuplicateUnit`] if two units share an id;
    /// [`Error::UnknownUnit`] if a link references an unregistered id.
    pub fn build(self) -> Result<Catalog, Error> {
        let mut by_id: HashMap<u32, usize> = HashMap::with_capacity(self.units.len());
        for (idx, unit) in self.units.iter().enumerate() {
            if by_id.insert(unit.id, idx).is_some() {
                return Err(Error::DuplicateUnit(unit.id));
            }
        }

        let mut units = self.units;
        for (unit_id, prereq_id) in &self.links {
            let &prereq_idx = by_id.get(prereq_id).ok_or(Error::UnknownUnit(*prereq_id))?;
            let &unit_idx = by_id.get(unit_id).ok_or(Error::UnknownUnit(*unit_id))?;
            let tags: Vec<Concept> = units[prereq_idx].concepts.iter().cloned().collect();
            units[unit_idx].prerequisite_concepts.extend(tags);
        }

        Ok(Catalog {
            units: units.into_iter().map(Arc::new).collect(),
            by_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(id: u32, difficulty: u8, concepts: &[&str]) -> Unit {
        Unit::new(id, format!("unit-{id}"), difficulty, 30, concepts.iter().copied())
    }

    #[test]
    fn test_build_resolves_links_to_concepts() {
        let catalog = Catalog::builder()
            .unit(unit(1, 1, &["integers"]))
            .unit(unit(2, 2, &["primes", "factorization"]))
            .unit(unit(3, 3, &["divisibility"]))
            .requires(2, 1)
            .requires(3, 1)
            .requires(3, 2)
            .build()
            .unwrap();

        let three = catalog.get(3).unwrap();
        let expected: BTreeSet<Concept> = ["integers", "primes", "factorization"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(three.prerequisite_concepts, expected);

        let one = catalog.get(1).unwrap();
        assert!(one.prerequisite_concepts.is_empty());
    }

    #[test]
    fn test_build_link_union_is_idempotent() {
        let catalog = Catalog::builder()
            .unit(unit(1, 1, &["integers"]))
            .unit(unit(2, 2, &["primes"]))
            .requires(2, 1)
            .requires(2, 1)
            .build()
            .unwrap();

        let two = catalog.get(2).unwrap();
        assert_eq!(two.prerequisite_concepts.len(), 1);
        assert!(two.prerequisite_concepts.contains("integers"));
    }

    #[test]
    fn test_build_rejects_duplicate_ids() {
        let err = Catalog::builder()
            .unit(unit(7, 1, &["a"]))
            .unit(unit(7, 2, &["b"]))
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateUnit(7)));
    }

    #[test]
    fn test_build_rejects_unknown_link_target() {
        let err = Catalog::builder()
            .unit(unit(1, 1, &["a"]))
            .requires(1, 99)
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::UnknownUnit(99)));
    }

    #[test]
    fn test_concepts_up_to_filters_by_difficulty() {
        let catalog = Catalog::builder()
            .unit(unit(1, 1, &["a"]))
            .unit(unit(2, 3, &["b"]))
            .unit(unit(3, 5, &["c"]))
            .build()
            .unwrap();

        let easy = catalog.concepts_up_to(3);
        assert!(easy.contains("a") && easy.contains("b") && !easy.contains("c"));
        assert_eq!(catalog.concepts_up_to(5).len(), 3);
    }

    #[test]
    fn test_direct_prerequisites() {
        let u = unit(1, 2, &["fractions"]).with_prerequisites(["arithmetic"]);
        assert!(u.prerequisite_concepts.contains("arithmetic"));
    }

    #[test]
    #[should_panic(expected = "concepts must not be empty")]
    fn test_unit_requires_concepts() {
        Unit::new(1, "empty", 1, 10, Vec::<String>::new());
    }

    #[test]
    #[should_panic(expected = "difficulty must be 1..=5")]
    fn test_unit_rejects_difficulty_zero() {
        Unit::new(1, "bad", 0, 10, ["a"]);
    }
}
