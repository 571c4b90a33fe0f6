//! Conformance test helpers for the electron front end.
//!
//! Runs source text through the whole pipeline (elaborate, link and check,
//! compile, passes) and returns a [`PipelineResult`] for assertions in the
//! integration tests.

#![warn(missing_docs)]

use electron_common::Interner;
use electron_compile::{CompileError, Packages};
use electron_config::{load_config_from_str, ElectronConfig};
use electron_diagnostics::{Diagnostic, DiagnosticCode, DiagnosticSink, Severity};
use electron_elaborate::ElaborateError;
use electron_ir::{Module, ModuleId, Netlist};
use electron_passes::{passes_from_config, run_passes};
use electron_source::SourceDb;

/// Result of running the full pipeline.
pub struct PipelineResult {
    /// The netlist after all passes, absent when the pipeline stopped on an
    /// error.
    pub netlist: Option<Netlist>,
    /// Interner that resolves the netlist's names.
    pub interner: Interner,
    /// All diagnostics emitted during the pipeline.
    pub diagnostics: Vec<Diagnostic>,
    /// Internal compiler errors, which are not diagnostics.
    pub internal: Vec<String>,
    /// Whether any errors were emitted or an internal error occurred.
    pub has_errors: bool,
    /// Number of error-severity diagnostics.
    pub error_count: usize,
    /// Number of warning-severity diagnostics.
    pub warning_count: usize,
}

impl PipelineResult {
    /// The netlist. Panics if the pipeline failed.
    pub fn netlist(&self) -> &Netlist {
        match &self.netlist {
            Some(netlist) => netlist,
            None => panic!(
                "pipeline failed: {:?} {:?}",
                self.messages(),
                self.internal
            ),
        }
    }

    /// Resolves an interned name.
    pub fn name(&self, ident: electron_common::Ident) -> &str {
        self.interner.resolve(ident)
    }

    /// Module names in netlist order.
    pub fn names(&self) -> Vec<&str> {
        self.netlist()
            .iter()
            .map(|(_, m)| self.name(m.name))
            .collect()
    }

    /// The first module called `name`. Panics if there is none.
    pub fn module(&self, name: &str) -> &Module {
        self.module_id(name)
            .map(|id| self.netlist().module(id))
            .unwrap_or_else(|| panic!("no module {name} in {:?}", self.names()))
    }

    /// Id of the first module called `name`.
    pub fn module_id(&self, name: &str) -> Option<ModuleId> {
        let ident = self.interner.get(name)?;
        self.netlist().find(ident)
    }

    /// Codes of all diagnostics in emission order.
    pub fn codes(&self) -> Vec<String> {
        self.diagnostics.iter().map(|d| d.code.to_string()).collect()
    }

    /// Messages of all diagnostics in emission order.
    pub fn messages(&self) -> Vec<&str> {
        self.diagnostics.iter().map(|d| d.message.as_str()).collect()
    }

    /// Returns `true` if some diagnostic has `code`.
    pub fn has_code(&self, code: DiagnosticCode) -> bool {
        self.diagnostics.iter().any(|d| d.code == code)
    }
}

/// Parses an `electron.toml` body. Panics on invalid configuration.
pub fn make_config(toml: &str) -> ElectronConfig {
    load_config_from_str(toml).unwrap()
}

/// Runs the full pipeline on one source file with the default configuration.
pub fn full_pipeline(source: &str) -> PipelineResult {
    full_pipeline_with(source, &[], &ElectronConfig::default())
}

/// Runs the full pipeline on one source file with a custom configuration.
pub fn full_pipeline_with_config(source: &str, config: &ElectronConfig) -> PipelineResult {
    full_pipeline_with(source, &[], config)
}

/// Runs the full pipeline on one source file that imports from the given
/// packages.
///
/// Each entry in `packages` is `(package_name, source_text)`. Packages are
/// elaborated into the same interner as the main file, each as its own
/// source file.
pub fn full_pipeline_with_packages(source: &str, packages: &[(&str, &str)]) -> PipelineResult {
    full_pipeline_with(source, packages, &ElectronConfig::default())
}

/// Runs the full pipeline with packages and a custom configuration.
pub fn full_pipeline_with(
    source: &str,
    packages: &[(&str, &str)],
    config: &ElectronConfig,
) -> PipelineResult {
    let mut source_db = SourceDb::new();
    let interner = Interner::new();
    let sink = DiagnosticSink::new();

    let mut internal = Vec::new();
    let mut linked = Packages::new();
    for (name, text) in packages {
        let file_id = source_db.add_source(format!("{name}.el"), text.to_string());
        match electron_elaborate::elaborate(file_id, &source_db, &interner, &sink) {
            Ok(design) => {
                linked.insert(name.to_string(), design);
            }
            Err(ElaborateError::Internal(err)) => internal.push(err.to_string()),
            Err(ElaborateError::Diagnostic(_)) => {}
        }
    }

    let file_id = source_db.add_source("main.el", source.to_string());
    let compiled = match electron_elaborate::elaborate(file_id, &source_db, &interner, &sink) {
        Ok(design) => electron_compile::compile(&design, &linked, config, &interner, &sink),
        Err(ElaborateError::Internal(err)) => Err(CompileError::Internal(err)),
        Err(ElaborateError::Diagnostic(diag)) => Err(CompileError::Diagnostic(diag)),
    };
    let netlist = match compiled {
        Ok(netlist) => {
            let passes = passes_from_config(&config.compiler);
            Some(run_passes(netlist, &passes, &interner))
        }
        Err(CompileError::Internal(err)) => {
            internal.push(err.to_string());
            None
        }
        Err(_) => None,
    };

    finish(netlist, internal, interner, &sink)
}

fn finish(
    netlist: Option<Netlist>,
    internal: Vec<String>,
    interner: Interner,
    sink: &DiagnosticSink,
) -> PipelineResult {
    let diagnostics = sink.take_all();
    let error_count = diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Error)
        .count();
    let warning_count = diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Warning)
        .count();
    PipelineResult {
        netlist,
        interner,
        diagnostics,
        has_errors: error_count > 0 || !internal.is_empty(),
        internal,
        error_count,
        warning_count,
    }
}
