//! Single-bit signals.

use crate::ids::SigId;
use electron_common::Logic;
use serde::{Deserialize, Serialize};

/// What a signal carries.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum SigValue {
    /// A fixed logic level.
    Const(Logic),
    /// Unresolved: whatever the named signal carries. A fresh signal refers
    /// to itself; assignment makes it refer to the driving signal.
    Symbolic(SigId),
}

/// One wire: an identity plus its value.
///
/// Copying a `Signal` copies the identity with it; two signals are the same
/// wire exactly when their ids are equal.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Signal {
    /// Unique identity.
    pub id: SigId,
    /// Current value.
    pub value: SigValue,
}

impl Signal {
    /// A signal with no value of its own yet.
    pub fn fresh(id: SigId) -> Self {
        Self {
            id,
            value: SigValue::Symbolic(id),
        }
    }

    /// A signal tied to a constant level.
    pub fn constant(id: SigId, level: Logic) -> Self {
        Self {
            id,
            value: SigValue::Const(level),
        }
    }

    /// Returns `true` if nothing was assigned to this signal.
    pub fn is_unassigned(&self) -> bool {
        self.value == SigValue::Symbolic(self.id)
    }

    /// The constant level, if the value is one.
    pub fn level(&self) -> Option<Logic> {
        match self.value {
            SigValue::Const(level) => Some(level),
            SigValue::Symbolic(_) => None,
        }
    }
}
