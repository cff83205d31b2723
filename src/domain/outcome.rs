use super::Movement;

/// Result of synchronizing one tracked case.
///
/// `sync_case` only ever produces the first four variants; a full run turns a
/// propagated error into [`SyncOutcome::Failed`] so that every case ends up in
/// the digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    Changed(Movement),
    Unchanged(Movement),
    NoHits,
    NoMovements,
    Failed(String),
}

impl SyncOutcome {
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Changed(_) => "changed",
            Self::Unchanged(_) => "unchanged",
            Self::NoHits => "no_hits",
            Self::NoMovements => "no_movements",
            Self::Failed(_) => "failed",
        }
    }

    #[must_use]
    pub const fn latest(&self) -> Option<&Movement> {
        match self {
            Self::Changed(movement) | Self::Unchanged(movement) => Some(movement),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_changed(&self) -> bool {
        matches!(self, Self::Changed(_))
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(reason) => Some(reason),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latest_only_for_movement_variants() {
        let movement = Movement::new("2024-01-01", "A", "");
        assert_eq!(
            SyncOutcome::Changed(movement.clone()).latest(),
            Some(&movement)
        );
        assert!(SyncOutcome::NoHits.latest().is_none());
        assert!(SyncOutcome::Failed("boom".into()).latest().is_none());
    }

    #[test]
    fn labels_are_stable() {
        assert_eq!(SyncOutcome::NoMovements.label(), "no_movements");
        assert_eq!(SyncOutcome::Failed(String::new()).label(), "failed");
        assert!(SyncOutcome::Changed(Movement::default()).is_changed());
        assert!(!SyncOutcome::Unchanged(Movement::default()).is_changed());
    }
}
