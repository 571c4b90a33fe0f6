//! IR-to-IR passes run after compilation.
//!
//! A [`Pass`] consumes a netlist and returns the transformed one. Passes
//! compose by folding left to right, which is all [`run_passes`] does.

#![warn(missing_docs)]

pub mod hierarchy;
pub mod rename;

pub use hierarchy::Hierarchy;
pub use rename::Rename;

use electron_common::Interner;
use electron_config::{CompilerConfig, PassName};
use electron_ir::Netlist;
use tracing::{debug, instrument};

/// A netlist transformation.
pub trait Pass {
    /// Name used in `compiler.passes` and in logs.
    fn name(&self) -> &'static str;

    /// Transforms `netlist`. Module references of cells must stay valid.
    fn transform(&self, netlist: Netlist, interner: &Interner) -> Netlist;
}

/// Runs `passes` in order.
#[instrument(skip_all, fields(passes = passes.len()))]
pub fn run_passes(netlist: Netlist, passes: &[Box<dyn Pass>], interner: &Interner) -> Netlist {
    passes.iter().fold(netlist, |netlist, pass| {
        let before = netlist.len();
        let netlist = pass.transform(netlist, interner);
        debug!(
            pass = pass.name(),
            modules_before = before,
            modules_after = netlist.len(),
            "pass finished"
        );
        netlist
    })
}

/// The pipeline configured in `compiler.passes`.
pub fn passes_from_config(config: &CompilerConfig) -> Vec<Box<dyn Pass>> {
    config
        .passes
        .iter()
        .map(|name| -> Box<dyn Pass> {
            match name {
                PassName::Hierarchy => Box::new(Hierarchy),
                PassName::Rename => Box::new(Rename),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use electron_ir::Module;
    use electron_source::Span;

    struct Append(&'static str);

    impl Pass for Append {
        fn name(&self) -> &'static str {
            "append"
        }

        fn transform(&self, mut netlist: Netlist, interner: &Interner) -> Netlist {
            netlist.add(Module::new(interner.get_or_intern(self.0), Span::DUMMY));
            netlist
        }
    }

    #[test]
    fn passes_fold_left_to_right() {
        let interner = Interner::new();
        let passes: Vec<Box<dyn Pass>> = vec![Box::new(Append("a")), Box::new(Append("b"))];
        let netlist = run_passes(Netlist::new(), &passes, &interner);
        let names: Vec<_> = netlist
            .iter()
            .map(|(_, m)| interner.resolve(m.name))
            .collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn default_pipeline() {
        let passes = passes_from_config(&CompilerConfig::default());
        let names: Vec<_> = passes.iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["hierarchy", "rename"]);
    }

    #[test]
    fn empty_pipeline_is_identity() {
        let interner = Interner::new();
        let mut netlist = Netlist::new();
        netlist.add(Module::new(interner.get_or_intern("m"), Span::DUMMY));
        let out = run_passes(netlist, &[], &interner);
        assert_eq!(out.len(), 1);
    }
}
