//! Shared foundational types used across the electron compiler.
//!
//! This crate provides interned identifiers, single-bit 4-state logic values,
//! content hashing for structural fingerprints, and the internal error type
//! that marks compiler defects.

#![warn(missing_docs)]

pub mod hash;
pub mod ident;
pub mod logic;
pub mod result;

pub use hash::ContentHash;
pub use ident::{Ident, Interner};
pub use logic::Logic;
pub use result::{ElectronResult, InternalError};
