//! Record lifecycle

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;

/// Whether a stored row is live or has been soft-deleted.
///
/// Rows are never physically removed; read paths only ever return [`RecordState::Active`]
/// rows. The deleted variant is seen by the existence check behind `soft_delete_*`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordState {
    Active,
    Deleted { at: Timestamp },
}

impl RecordState {
    /// Build the state from a nullable `deleted_at` column.
    #[must_use]
    pub fn from_deleted_at(deleted_at: Option<Timestamp>) -> Self {
        match deleted_at {
            Some(at) => Self::Deleted { at },
            None => Self::Active,
        }
    }

    pub(crate) fn from_column(deleted_at: Option<SqlxTimestamp>) -> Self {
        Self::from_deleted_at(deleted_at.map(SqlxTimestamp::to_jiff))
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }

    #[must_use]
    pub const fn deleted_at(&self) -> Option<Timestamp> {
        match self {
            Self::Active => None,
            Self::Deleted { at } => Some(*at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_deleted_at_is_active() {
        let state = RecordState::from_deleted_at(None);

        assert!(state.is_active());
        assert_eq!(state.deleted_at(), None);
    }

    #[test]
    fn stamped_deleted_at_is_deleted() {
        let at = Timestamp::UNIX_EPOCH;
        let state = RecordState::from_deleted_at(Some(at));

        assert_eq!(state, RecordState::Deleted { at });
        assert!(!state.is_active());
        assert_eq!(state.deleted_at(), Some(at));
    }
}
