//! AST-to-IR compilation for the electron language.
//!
//! [`compile`] links the design's imports, checks names, and compiles every
//! parameterless module into a [`Netlist`]. The pieces are usable on their
//! own:
//!
//! - [`symbol_table`]: lexically scoped bindings
//! - [`attributes`]: the attribute handler registry
//! - [`check`]: name checking ahead of compilation
//! - [`imports`]: linking modules from in-memory packages
//! - [`compiler`]: the AST compiler itself
//!
//! # Usage
//!
//! ```ignore
//! let design = electron_elaborate::elaborate(file_id, &db, &interner, &sink)?;
//! let netlist = compile(&design, &Packages::new(), &config, &interner, &sink)?;
//! ```

#![warn(missing_docs)]

pub mod attributes;
pub mod cache;
pub mod catalog;
pub mod check;
pub mod compiler;
pub mod errors;
pub mod imports;
pub mod signals;
pub mod symbol_table;
pub mod value;

pub use attributes::{AttributeHandler, AttributeRegistry};
pub use catalog::PartsCatalog;
pub use compiler::Compiler;
pub use imports::Packages;
pub use symbol_table::SymbolTable;
pub use value::WrappedValue;

use electron_common::{Interner, InternalError};
use electron_config::{CompilerConfig, ConfigError, ElectronConfig};
use electron_diagnostics::{Diagnostic, DiagnosticSink};
use electron_elaborate::Design;
use electron_ir::Netlist;
use tracing::instrument;

/// Options of the AST compiler.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CompileOptions {
    /// Compile a non-declared module once per distinct parameter set instead
    /// of once per instantiation.
    pub share_instances: bool,
}

impl From<&CompilerConfig> for CompileOptions {
    fn from(config: &CompilerConfig) -> Self {
        Self {
            share_instances: config.share_instances,
        }
    }
}

/// Why a design could not be compiled.
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    /// The first error found in the design. All of them are also held by
    /// the sink.
    #[error("{}: {}", .0.code, .0.message)]
    Diagnostic(Diagnostic),
    /// A defect in the compiler.
    #[error(transparent)]
    Internal(#[from] InternalError),
    /// The parts catalog of the configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Links, checks and compiles `design`.
///
/// Fails with the first error reported during this call; warnings do not
/// fail. Compilation is skipped when linking or checking reported errors.
#[instrument(skip_all, fields(modules = design.modules.len(), imports = design.imports.len()))]
pub fn compile(
    design: &Design,
    packages: &Packages,
    config: &ElectronConfig,
    interner: &Interner,
    sink: &DiagnosticSink,
) -> Result<Netlist, CompileError> {
    let mark = sink.len();
    let registry = AttributeRegistry::new(PartsCatalog::from_config(&config.catalog)?);

    let modules = imports::link_imports(design, packages, interner, sink);
    check::check_design(&modules, &registry, interner, sink);
    if let Some(diag) = sink.first_error_from(mark) {
        return Err(CompileError::Diagnostic(diag));
    }

    let options = CompileOptions::from(&config.compiler);
    let netlist = Compiler::new(interner, sink, &registry, options).compile(&modules)?;
    match sink.first_error_from(mark) {
        Some(diag) => Err(CompileError::Diagnostic(diag)),
        None => Ok(netlist),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use electron_source::FileId;

    fn run(source: &str) -> (Result<Netlist, CompileError>, DiagnosticSink) {
        let interner = Interner::new();
        let sink = DiagnosticSink::new();
        let design =
            electron_elaborate::elaborate_str(source, FileId::from_raw(0), &interner, &sink)
                .unwrap();
        let result = compile(
            &design,
            &Packages::new(),
            &ElectronConfig::default(),
            &interner,
            &sink,
        );
        (result, sink)
    }

    #[test]
    fn compiles_clean_design() {
        let (result, sink) = run("module m { input[2] a; output[2] b; b = a; }");
        assert_eq!(result.unwrap().len(), 1);
        assert!(sink.is_empty());
    }

    #[test]
    fn checker_errors_stop_compilation() {
        let (result, sink) = run("module m { b = a; }");
        let Err(CompileError::Diagnostic(diag)) = result else {
            panic!("expected a diagnostic");
        };
        assert_eq!(diag.code, errors::E302);
        assert_eq!(sink.error_count(), 2);
    }

    #[test]
    fn compile_errors_fail() {
        let (result, _) = run("module m { net[2] a; net b; b = a; }");
        let err = result.unwrap_err();
        assert!(err.to_string().starts_with("E314:"), "{err}");
    }

    #[test]
    fn literal_assignment_target_fails_with_a_diagnostic() {
        let (result, _) = run("module m { 1 = 2; }");
        let Err(CompileError::Diagnostic(diag)) = result else {
            panic!("expected a diagnostic");
        };
        assert_eq!(diag.code, errors::E319);
    }

    #[test]
    fn mismatched_kinds_fail_with_a_diagnostic() {
        let (result, _) = run(
            "module r(v) { net n; n = v; }
             module top { cell c; c = r {} (1); }",
        );
        let Err(CompileError::Diagnostic(diag)) = result else {
            panic!("expected a diagnostic");
        };
        assert_eq!(diag.code, errors::E317);
    }

    #[test]
    fn warnings_do_not_fail() {
        let (result, sink) = run("module m { cell c; }");
        assert!(result.is_ok());
        assert_eq!(sink.diagnostics()[0].code, errors::W301);
    }

    #[test]
    fn options_from_config() {
        let config = CompilerConfig {
            share_instances: true,
            ..CompilerConfig::default()
        };
        assert!(CompileOptions::from(&config).share_instances);
        assert!(!CompileOptions::default().share_instances);
    }
}
