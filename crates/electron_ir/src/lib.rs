//! The electron netlist IR.
//!
//! A [`Netlist`] holds compiled [`Module`]s. Each module lists its ports,
//! nets and cells; every bit is a separate [`Signal`] with its own identity,
//! so there is no bus type in the IR. Cells point at the module they
//! instantiate through a [`ModuleId`].

#![warn(missing_docs)]

pub mod arena;
pub mod attr;
pub mod cell;
pub mod ids;
pub mod module;
pub mod netlist;
pub mod port;
pub mod signal;

pub use arena::{Arena, ArenaId};
pub use attr::{find_attr, Attr, AttrKey, AttrValue};
pub use cell::{Assign, Cell, Param, ParamValue};
pub use ids::{CellId, ModuleId, SigId};
pub use module::Module;
pub use netlist::Netlist;
pub use port::{Net, Port, PortDirection};
pub use signal::{SigValue, Signal};
