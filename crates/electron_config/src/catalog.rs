//! The parts catalog bundled with the compiler.

use crate::error::ConfigError;
use crate::types::PartSpec;
use serde::Deserialize;
use std::collections::BTreeMap;

const BUILTIN_CATALOG: &str = include_str!("builtin_catalog.toml");

#[derive(Deserialize)]
struct CatalogFile {
    #[serde(default)]
    parts: BTreeMap<String, PartSpec>,
}

/// Parses the bundled catalog.
pub fn builtin_parts() -> Result<BTreeMap<String, PartSpec>, ConfigError> {
    let file: CatalogFile =
        toml::from_str(BUILTIN_CATALOG).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    Ok(file.parts)
}

impl crate::types::CatalogConfig {
    /// Returns the effective catalog: the bundled parts (if enabled) with the
    /// project parts layered on top.
    pub fn resolved_parts(&self) -> Result<BTreeMap<String, PartSpec>, ConfigError> {
        let mut parts = if self.builtin {
            builtin_parts()?
        } else {
            BTreeMap::new()
        };
        parts.extend(self.parts.clone());
        Ok(parts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CatalogConfig;

    #[test]
    fn builtin_parses_and_is_not_empty() {
        let parts = builtin_parts().unwrap();
        assert!(parts.contains_key("CPL-RES-0603-10K"));
        assert!(parts.values().all(|p| p.value.is_some()));
    }

    #[test]
    fn project_parts_override_builtin() {
        let mut config = CatalogConfig::default();
        config.parts.insert(
            "CPL-RES-0603-10K".into(),
            PartSpec {
                value: Some("10k".into()),
                footprint: Some("R0603".into()),
                keywords: vec![],
            },
        );
        let parts = config.resolved_parts().unwrap();
        assert_eq!(
            parts["CPL-RES-0603-10K"].footprint.as_deref(),
            Some("R0603")
        );
    }

    #[test]
    fn builtin_can_be_disabled() {
        let config = CatalogConfig {
            builtin: false,
            parts: BTreeMap::new(),
        };
        assert!(config.resolved_parts().unwrap().is_empty());
    }
}
