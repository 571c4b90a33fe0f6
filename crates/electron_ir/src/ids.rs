//! Typed `u32` ids for IR entities.

use crate::arena::ArenaId;
use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
        pub struct $name(u32);

        impl $name {
            /// Creates an id from a raw index.
            pub fn from_raw(index: u32) -> Self {
                Self(index)
            }

            /// Returns the raw index.
            pub fn as_raw(self) -> u32 {
                self.0
            }
        }

        impl ArenaId for $name {
            fn from_raw(index: u32) -> Self {
                Self(index)
            }

            fn as_raw(self) -> u32 {
                self.0
            }
        }
    };
}

define_id!(
    /// A module of a [`Netlist`](crate::Netlist).
    ModuleId
);

define_id!(
    /// A cell while its parent module is being compiled.
    CellId
);

define_id!(
    /// The identity of one single-bit signal. Unique within a compilation
    /// unit and allocated in increasing order.
    SigId
);

impl fmt::Display for SigId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sig_ids_order_by_allocation() {
        assert!(SigId::from_raw(1) < SigId::from_raw(2));
        assert_eq!(SigId::from_raw(7).to_string(), "$7");
    }
}
