//! Memoization of compiled modules.
//!
//! Declared modules are compiled once per name. Other modules are compiled
//! once per instantiation unless instance sharing is enabled, in which case
//! they are keyed by name and a hash of the bound parameter values.

use electron_common::{ContentHash, Ident, Interner};
use electron_ir::{ModuleId, Param};
use std::collections::HashMap;

/// Identifies one specialization of a parameterized module.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct InstanceKey {
    /// Declared module name.
    pub name: Ident,
    /// Hash of the ordered parameter names and values.
    pub params: ContentHash,
}

impl InstanceKey {
    /// Builds the key for `name` specialized with `params`.
    pub fn new(name: Ident, params: &[Param], interner: &Interner) -> Self {
        let parts: Vec<String> = params
            .iter()
            .flat_map(|p| {
                [
                    interner.resolve(p.name).to_string(),
                    format!("{:?}", p.value),
                ]
            })
            .collect();
        Self {
            name,
            params: ContentHash::from_parts(parts.iter().map(String::as_str)),
        }
    }
}

/// Compiled module ids by declared name and by specialization.
#[derive(Debug, Default)]
pub struct ModuleCache {
    declared: HashMap<Ident, ModuleId>,
    instances: HashMap<InstanceKey, ModuleId>,
}

impl ModuleCache {
    /// An empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// The compiled declared module `name`.
    pub fn declared(&self, name: Ident) -> Option<ModuleId> {
        self.declared.get(&name).copied()
    }

    /// Records the compiled declared module `name`.
    pub fn insert_declared(&mut self, name: Ident, id: ModuleId) {
        self.declared.insert(name, id);
    }

    /// The compiled specialization for `key`.
    pub fn instance(&self, key: &InstanceKey) -> Option<ModuleId> {
        self.instances.get(key).copied()
    }

    /// Records the compiled specialization for `key`.
    pub fn insert_instance(&mut self, key: InstanceKey, id: ModuleId) {
        self.instances.insert(key, id);
    }

    /// Forgets everything.
    pub fn clear(&mut self) {
        self.declared.clear();
        self.instances.clear();
    }
}

/// The prefix that makes a specialization's name unique, e.g. `n_4$` for
/// `n = 4`. Empty for no parameters.
pub fn mangling_prefix(params: &[Param], interner: &Interner) -> String {
    if params.is_empty() {
        return String::new();
    }
    let parts: Vec<String> = params
        .iter()
        .map(|p| format!("{}_{}", interner.resolve(p.name), p.value))
        .collect();
    format!("{}$", parts.join("_"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use electron_ir::ParamValue;

    fn param(interner: &Interner, name: &str, value: ParamValue) -> Param {
        Param {
            name: interner.get_or_intern(name),
            value,
        }
    }

    #[test]
    fn prefix_lists_params_in_order() {
        let interner = Interner::new();
        let params = vec![
            param(&interner, "n", ParamValue::Int(4)),
            param(&interner, "kind", ParamValue::Str("fast".into())),
        ];
        assert_eq!(mangling_prefix(&params, &interner), "n_4_kind_fast$");
        assert_eq!(mangling_prefix(&[], &interner), "");
    }

    #[test]
    fn keys_distinguish_value_types() {
        let interner = Interner::new();
        let name = interner.get_or_intern("adder");
        let int = InstanceKey::new(name, &[param(&interner, "n", ParamValue::Int(1))], &interner);
        let string = InstanceKey::new(
            name,
            &[param(&interner, "n", ParamValue::Str("1".into()))],
            &interner,
        );
        let again = InstanceKey::new(name, &[param(&interner, "n", ParamValue::Int(1))], &interner);
        assert_ne!(int, string);
        assert_eq!(int, again);
    }

    #[test]
    fn cache_lookup() {
        let interner = Interner::new();
        let name = interner.get_or_intern("io");
        let mut cache = ModuleCache::new();
        assert_eq!(cache.declared(name), None);
        cache.insert_declared(name, ModuleId::from_raw(3));
        assert_eq!(cache.declared(name), Some(ModuleId::from_raw(3)));
        let key = InstanceKey::new(name, &[], &interner);
        cache.insert_instance(key, ModuleId::from_raw(4));
        assert_eq!(cache.instance(&key), Some(ModuleId::from_raw(4)));
        cache.clear();
        assert_eq!(cache.instance(&key), None);
    }
}
