//! Dense, append-only storage addressed by typed ids.
//!
//! Modules of a [`Netlist`](crate::Netlist) and the cells a compiler builds
//! up live in arenas. Entries are never removed; a pass that drops entries
//! builds a fresh arena and remaps ids.

use serde::{Deserialize, Serialize};
use std::marker::PhantomData;
use std::ops::{Index, IndexMut};

/// An id type usable as an arena key.
pub trait ArenaId: Copy {
    /// Creates an id from a raw index.
    fn from_raw(index: u32) -> Self;

    /// Returns the raw index.
    fn as_raw(self) -> u32;
}

/// Entries of type `T` addressed by ids of type `I`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Arena<I: ArenaId, T> {
    items: Vec<T>,
    #[serde(skip)]
    _marker: PhantomData<I>,
}

impl<I: ArenaId, T> Default for Arena<I, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: ArenaId, T> Arena<I, T> {
    /// Creates an empty arena.
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            _marker: PhantomData,
        }
    }

    /// Appends an entry and returns its id.
    pub fn alloc(&mut self, item: T) -> I {
        let id = I::from_raw(self.items.len() as u32);
        self.items.push(item);
        id
    }

    /// Returns the entry for `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not allocated by this arena.
    pub fn get(&self, id: I) -> &T {
        &self.items[id.as_raw() as usize]
    }

    /// Returns the entry for `id`, or `None` if it is out of range.
    pub fn try_get(&self, id: I) -> Option<&T> {
        self.items.get(id.as_raw() as usize)
    }

    /// Returns the entry for `id` mutably.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not allocated by this arena.
    pub fn get_mut(&mut self, id: I) -> &mut T {
        &mut self.items[id.as_raw() as usize]
    }

    /// Returns `true` if `id` addresses an entry.
    pub fn contains(&self, id: I) -> bool {
        (id.as_raw() as usize) < self.items.len()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if nothing was allocated.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// All ids in allocation order.
    pub fn ids(&self) -> impl Iterator<Item = I> {
        (0..self.items.len() as u32).map(I::from_raw)
    }

    /// `(id, entry)` pairs in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = (I, &T)> {
        self.items
            .iter()
            .enumerate()
            .map(|(i, item)| (I::from_raw(i as u32), item))
    }

    /// `(id, entry)` pairs in allocation order, mutably.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (I, &mut T)> {
        self.items
            .iter_mut()
            .enumerate()
            .map(|(i, item)| (I::from_raw(i as u32), item))
    }

    /// Entries in allocation order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    /// Consumes the arena, yielding entries in allocation order.
    pub fn into_values(self) -> impl Iterator<Item = T> {
        self.items.into_iter()
    }
}

impl<I: ArenaId, T> FromIterator<T> for Arena<I, T> {
    fn from_iter<It: IntoIterator<Item = T>>(iter: It) -> Self {
        Self {
            items: iter.into_iter().collect(),
            _marker: PhantomData,
        }
    }
}

impl<I: ArenaId, T> Index<I> for Arena<I, T> {
    type Output = T;

    fn index(&self, id: I) -> &T {
        self.get(id)
    }
}

impl<I: ArenaId, T> IndexMut<I> for Arena<I, T> {
    fn index_mut(&mut self, id: I) -> &mut T {
        self.get_mut(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::{CellId, ModuleId};

    #[test]
    fn alloc_returns_sequential_ids() {
        let mut arena: Arena<CellId, &str> = Arena::new();
        let a = arena.alloc("r1");
        let b = arena.alloc("r2");
        assert_eq!((a.as_raw(), b.as_raw()), (0, 1));
        assert_eq!(arena[b], "r2");
        assert_eq!(arena.ids().collect::<Vec<_>>(), vec![a, b]);
    }

    #[test]
    fn index_mut_rebinds_entry() {
        let mut arena: Arena<CellId, String> = Arena::new();
        let id = arena.alloc("placeholder".to_string());
        arena[id] = "bound".to_string();
        assert_eq!(arena[id], "bound");
    }

    #[test]
    fn try_get_out_of_range() {
        let arena: Arena<ModuleId, u8> = Arena::default();
        assert!(arena.is_empty());
        assert!(arena.try_get(ModuleId::from_raw(0)).is_none());
        assert!(!arena.contains(ModuleId::from_raw(0)));
    }

    #[test]
    fn collect_and_drain_keep_order() {
        let arena: Arena<ModuleId, u32> = vec![3, 1, 2].into_iter().collect();
        assert_eq!(arena.len(), 3);
        assert_eq!(arena[ModuleId::from_raw(2)], 2);
        assert_eq!(arena.into_values().collect::<Vec<_>>(), vec![3, 1, 2]);
    }

    #[test]
    fn serde_roundtrip() {
        let mut arena: Arena<ModuleId, String> = Arena::new();
        arena.alloc("and2".to_string());
        let json = serde_json::to_string(&arena).unwrap();
        let back: Arena<ModuleId, String> = serde_json::from_str(&json).unwrap();
        assert_eq!(back[ModuleId::from_raw(0)], "and2");
    }
}
