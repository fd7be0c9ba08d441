//! The in-flight transition record.

use std::fmt;

use crate::fleet::ManagerId;

/// A handover in progress: `old_primary` is being demoted while
/// `new_primary` is being promoted. At most one record exists at a time;
/// the coordinator stores it as `Option<TransitionRecord>` and clears it on
/// completion or abort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionRecord {
    /// The manager holding `Primary` when the handover started.
    pub old_primary: ManagerId,
    /// The validated manager being promoted.
    pub new_primary: ManagerId,
}

impl TransitionRecord {
    /// Whether `id` is one of the two participants.
    pub fn involves(&self, id: ManagerId) -> bool {
        id == self.old_primary || id == self.new_primary
    }
}

impl fmt::Display for TransitionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TransitionRecord{{old_primary={}, new_primary={}}}",
            self.old_primary, self.new_primary
        )
    }
}
