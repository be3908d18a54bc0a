//! Crate-wide error type.
//!
//! Every fallible public operation returns [`Error`]. Fitness evaluation is
//! total for any well-formed candidate and has no error path; a candidate
//! with duplicate unit ids is a programming error and fails fast via an
//! assertion instead.

use thiserror::Error;

/// Errors produced by catalog construction and path searches.
#[derive(Debug, Error)]
pub enum Error {
    /// The catalog is empty, or no unit passed the availability filter even
    /// after the low-difficulty fallback.
    #[error("no eligible units to schedule")]
    NoEligibleUnits,

    /// The learner profile cannot drive a search (zero weekly time budget).
    #[error("invalid profile: weekly available time must be positive")]
    InvalidProfile,

    /// An engine parameter is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Two catalog units were registered with the same id.
    #[error("duplicate unit id {0} in catalog")]
    DuplicateUnit(u32),

    /// A prerequisite link or seed path referenced a unit id that is not in
    /// the catalog.
    #[error("unknown unit id {0}")]
    UnknownUnit(u32),
}
