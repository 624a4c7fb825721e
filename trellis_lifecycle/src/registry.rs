// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Parent-owned mapping from child kinds to live child handles.

use alloc::vec::Vec;

/// Mapping from a child kind to the handle of its live record.
///
/// Holds at most one entry per kind. Entries keep insertion order, so bulk
/// operations visit children in the order they were first built.
///
/// Lookups are linear; kinds are a small closed set chosen by the parent's
/// domain, so a flat vector beats hashing here.
///
/// ```
/// use trellis_lifecycle::ChildRegistry;
///
/// let mut reg: ChildRegistry<&str, u32> = ChildRegistry::new();
/// assert_eq!(reg.insert("feed", 7), None);
/// assert_eq!(reg.get(&"feed"), Some(7));
/// assert_eq!(reg.kind_of(7), Some("feed"));
/// assert_eq!(reg.remove(&"feed"), Some(7));
/// assert!(reg.is_empty());
/// ```
#[derive(Clone, Debug)]
pub struct ChildRegistry<K, V> {
    entries: Vec<(K, V)>,
}

impl<K, V> Default for ChildRegistry<K, V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<K: Copy + Eq, V: Copy + Eq> ChildRegistry<K, V> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered children.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no child is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Handle registered for `kind`, if any.
    pub fn get(&self, kind: &K) -> Option<V> {
        self.entries
            .iter()
            .find(|(k, _)| k == kind)
            .map(|(_, v)| *v)
    }

    /// True if `kind` has a registered child.
    pub fn contains(&self, kind: &K) -> bool {
        self.get(kind).is_some()
    }

    /// Register `value` under `kind`.
    ///
    /// If `kind` was already registered the old handle is replaced in place
    /// and returned; callers that want to keep the one-live-record invariant
    /// resolve before inserting.
    pub fn insert(&mut self, kind: K, value: V) -> Option<V> {
        if let Some(slot) = self.entries.iter_mut().find(|(k, _)| *k == kind) {
            return Some(core::mem::replace(&mut slot.1, value));
        }
        self.entries.push((kind, value));
        None
    }

    /// Unregister `kind`, returning its handle.
    pub fn remove(&mut self, kind: &K) -> Option<V> {
        let pos = self.entries.iter().position(|(k, _)| k == kind)?;
        Some(self.entries.remove(pos).1)
    }

    /// Reverse lookup by handle identity.
    pub fn kind_of(&self, value: V) -> Option<K> {
        self.entries
            .iter()
            .find(|(_, v)| *v == value)
            .map(|(k, _)| *k)
    }

    /// Iterate `(kind, handle)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (K, V)> + '_ {
        self.entries.iter().copied()
    }

    /// Remove and return every entry, leaving the registry empty.
    pub fn take_all(&mut self) -> Vec<(K, V)> {
        core::mem::take(&mut self.entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[derive(Copy, Clone, Debug, Eq, PartialEq)]
    enum Kind {
        Feed,
        Settings,
        Profile,
    }

    #[test]
    fn one_entry_per_kind() {
        let mut reg = ChildRegistry::new();
        assert_eq!(reg.insert(Kind::Feed, 1_u32), None);
        assert_eq!(reg.insert(Kind::Feed, 2), Some(1));
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.get(&Kind::Feed), Some(2));
    }

    #[test]
    fn reverse_lookup_is_by_handle() {
        let mut reg = ChildRegistry::new();
        reg.insert(Kind::Feed, 10_u32);
        reg.insert(Kind::Settings, 11);
        assert_eq!(reg.kind_of(11), Some(Kind::Settings));
        assert_eq!(reg.kind_of(12), None);
    }

    #[test]
    fn take_all_preserves_insertion_order() {
        let mut reg = ChildRegistry::new();
        reg.insert(Kind::Profile, 3_u32);
        reg.insert(Kind::Feed, 1);
        reg.insert(Kind::Settings, 2);
        reg.remove(&Kind::Feed);
        assert_eq!(
            reg.take_all(),
            vec![(Kind::Profile, 3), (Kind::Settings, 2)]
        );
        assert!(reg.is_empty());
        assert!(!reg.contains(&Kind::Profile));
    }

    #[test]
    fn remove_missing_is_none() {
        let mut reg: ChildRegistry<Kind, u32> = ChildRegistry::new();
        assert_eq!(reg.remove(&Kind::Feed), None);
    }
}
