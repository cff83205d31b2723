//! Domain types for case monitoring.
//!
//! Tracked cases are identified by [`CaseId`]; the newtype keeps case ids from
//! being mixed up with movement record ids in service signatures.

pub mod fingerprint;
pub mod movement;
pub mod outcome;

pub use movement::Movement;
pub use outcome::SyncOutcome;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a tracked case.
///
/// # Examples
///
/// ```rust
/// use docket_watch::domain::CaseId;
///
/// let id = CaseId::new(7);
/// assert_eq!(id.value(), 7);
/// assert_eq!(id.to_string(), "7");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct CaseId(i32);

impl CaseId {
    #[must_use]
    pub const fn new(id: i32) -> Self {
        debug_assert!(id >= 0, "CaseId should be non-negative");
        Self(id)
    }

    #[must_use]
    pub const fn value(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for CaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<CaseId> for i32 {
    fn from(id: CaseId) -> Self {
        id.0
    }
}

impl From<i32> for CaseId {
    fn from(id: i32) -> Self {
        Self::new(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn case_id_round_trips_through_i32() {
        let id = CaseId::from(42);
        assert_eq!(i32::from(id), 42);
    }

    #[test]
    fn case_id_serializes_transparently() {
        let json = serde_json::to_string(&CaseId::new(3)).unwrap();
        assert_eq!(json, "3");
    }
}
