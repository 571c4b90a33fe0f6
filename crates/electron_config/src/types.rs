//! Configuration types deserialized from `electron.toml`.

use serde::Deserialize;
use std::collections::BTreeMap;

/// The whole configuration file. Every section is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ElectronConfig {
    /// Compiler and pass pipeline settings.
    #[serde(default)]
    pub compiler: CompilerConfig,
    /// Parts catalog used by `@cpl`.
    #[serde(default)]
    pub catalog: CatalogConfig,
}

/// Settings of the AST compiler and the pass pipeline.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct CompilerConfig {
    /// Passes to run after compilation, in order.
    #[serde(default = "default_passes")]
    pub passes: Vec<PassName>,
    /// Reuse one compiled module for every instantiation with the same
    /// parameter values instead of compiling each instantiation separately.
    #[serde(default)]
    pub share_instances: bool,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            passes: default_passes(),
            share_instances: false,
        }
    }
}

fn default_passes() -> Vec<PassName> {
    vec![PassName::Hierarchy, PassName::Rename]
}

/// A pass that can appear in `compiler.passes`.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PassName {
    /// Merge identical modules and order them children first.
    Hierarchy,
    /// Name anonymous cells and resolve cell name collisions.
    Rename,
}

/// Parts catalog settings.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    /// Whether the bundled catalog is included.
    #[serde(default = "default_true")]
    pub builtin: bool,
    /// Project parts, keyed by catalog key. These override bundled entries
    /// with the same key.
    #[serde(default)]
    pub parts: BTreeMap<String, PartSpec>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            builtin: true,
            parts: BTreeMap::new(),
        }
    }
}

fn default_true() -> bool {
    true
}

/// One catalog entry.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct PartSpec {
    /// Electrical value, e.g. `10k` or `100nF`.
    #[serde(default)]
    pub value: Option<String>,
    /// Package or footprint name, e.g. `0603`.
    #[serde(default)]
    pub footprint: Option<String>,
    /// Extra search words, e.g. `resistor`.
    #[serde(default)]
    pub keywords: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ElectronConfig::default();
        assert_eq!(
            config.compiler.passes,
            vec![PassName::Hierarchy, PassName::Rename]
        );
        assert!(!config.compiler.share_instances);
        assert!(config.catalog.builtin);
        assert!(config.catalog.parts.is_empty());
    }

    #[test]
    fn pass_names_lowercase() {
        let config: CompilerConfig = toml::from_str("passes = [\"rename\"]").unwrap();
        assert_eq!(config.passes, vec![PassName::Rename]);
    }
}
