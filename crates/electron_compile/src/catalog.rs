//! The parts catalog behind `@cpl`.

use electron_config::{CatalogConfig, ConfigError, PartSpec};
use std::collections::BTreeMap;

/// Catalog entries keyed by part number, in key order.
#[derive(Debug, Clone, Default)]
pub struct PartsCatalog {
    parts: BTreeMap<String, PartSpec>,
}

impl PartsCatalog {
    /// A catalog over the given entries.
    pub fn new(parts: BTreeMap<String, PartSpec>) -> Self {
        Self { parts }
    }

    /// The bundled catalog layered with the project's parts.
    pub fn from_config(config: &CatalogConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(config.resolved_parts()?))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Returns `true` if the catalog has no entries.
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// The entry stored under `key`.
    pub fn get(&self, key: &str) -> Option<&PartSpec> {
        self.parts.get(key)
    }

    /// Keys of every entry matching `query`, in key order.
    ///
    /// Each whitespace-separated word of the query must occur, ignoring case,
    /// in the key, value, footprint or one of the keywords of the entry. An
    /// empty query matches nothing.
    pub fn matches(&self, query: &str) -> Vec<&str> {
        let words: Vec<String> = query.split_whitespace().map(str::to_lowercase).collect();
        if words.is_empty() {
            return Vec::new();
        }
        self.parts
            .iter()
            .filter(|(key, part)| {
                let fields = haystack(key, part);
                words.iter().all(|w| fields.iter().any(|f| f.contains(w.as_str())))
            })
            .map(|(key, _)| key.as_str())
            .collect()
    }

    /// The first key matching `query`.
    pub fn resolve(&self, query: &str) -> Option<&str> {
        self.matches(query).into_iter().next()
    }
}

fn haystack(key: &str, part: &PartSpec) -> Vec<String> {
    let mut fields = vec![key.to_lowercase()];
    fields.extend(part.value.as_deref().map(str::to_lowercase));
    fields.extend(part.footprint.as_deref().map(str::to_lowercase));
    fields.extend(part.keywords.iter().map(|k| k.to_lowercase()));
    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builtin() -> PartsCatalog {
        PartsCatalog::from_config(&CatalogConfig::default()).unwrap()
    }

    #[test]
    fn first_match_in_key_order() {
        let catalog = builtin();
        let matches = catalog.matches("10k resistor");
        assert_eq!(matches, vec!["CPL-RES-0603-10K", "CPL-RES-0805-10K"]);
        assert_eq!(catalog.resolve("10k resistor"), Some("CPL-RES-0603-10K"));
    }

    #[test]
    fn every_word_must_match() {
        let catalog = builtin();
        assert_eq!(
            catalog.resolve("10K 0805 RES"),
            Some("CPL-RES-0805-10K")
        );
        assert!(catalog.matches("10k capacitor").is_empty());
    }

    #[test]
    fn empty_query_matches_nothing() {
        assert!(builtin().matches("   ").is_empty());
    }

    #[test]
    fn project_parts_are_searchable() {
        let mut config = CatalogConfig {
            builtin: false,
            ..CatalogConfig::default()
        };
        config.parts.insert(
            "ACME-XTAL-16M".into(),
            PartSpec {
                value: Some("16MHz".into()),
                footprint: Some("HC49".into()),
                keywords: vec!["crystal".into()],
            },
        );
        let catalog = PartsCatalog::from_config(&config).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.resolve("crystal 16mhz"), Some("ACME-XTAL-16M"));
    }
}
