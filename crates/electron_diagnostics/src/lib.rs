//! User-facing diagnostics and the sink that collects them.
//!
//! A [`Diagnostic`] pairs a [`Severity`] and a [`DiagnosticCode`] with a
//! message and source [`Label`]s. Every stage of the compiler reports user
//! mistakes into a shared [`DiagnosticSink`] and keeps going, so one run
//! surfaces as many problems as possible. Formatting diagnostics for a
//! terminal is left to the driver.

#![warn(missing_docs)]

pub mod code;
pub mod diagnostic;
pub mod label;
pub mod severity;
pub mod sink;

pub use code::{Category, DiagnosticCode};
pub use diagnostic::Diagnostic;
pub use label::{Label, LabelStyle};
pub use severity::Severity;
pub use sink::DiagnosticSink;
