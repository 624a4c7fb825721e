// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ordered, deduplicated tab-slot lists.

use alloc::vec::Vec;

/// The fixed set of children shown as tab slots, plus the current selection.
///
/// The slot list is supplied explicitly by the caller, deduplicated on
/// construction (first occurrence wins), and never changes afterwards.
///
/// ```
/// use trellis_lifecycle::TabSlots;
///
/// let mut tabs = TabSlots::new(['a', 'b', 'a', 'c']);
/// assert_eq!(tabs.kinds(), &['a', 'b', 'c']);
/// assert_eq!(tabs.selected(), Some(0));
/// assert_eq!(tabs.select(&'c'), Some(2));
/// assert_eq!(tabs.select(&'z'), None);
/// assert_eq!(tabs.selected(), Some(2));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TabSlots<K> {
    kinds: Vec<K>,
    selected: Option<usize>,
}

impl<K: Copy + Eq> TabSlots<K> {
    /// Build a slot list from `kinds`, removing duplicates.
    ///
    /// The first slot starts selected; an empty list has no selection.
    pub fn new(kinds: impl IntoIterator<Item = K>) -> Self {
        let mut out: Vec<K> = Vec::new();
        for kind in kinds {
            if !out.contains(&kind) {
                out.push(kind);
            }
        }
        let selected = if out.is_empty() { None } else { Some(0) };
        Self {
            kinds: out,
            selected,
        }
    }

    /// Slot kinds in display order.
    pub fn kinds(&self) -> &[K] {
        &self.kinds
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    /// True if there are no slots.
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Position of `kind` in the slot list.
    pub fn index_of(&self, kind: &K) -> Option<usize> {
        self.kinds.iter().position(|k| k == kind)
    }

    /// True if `kind` is one of the slots.
    pub fn contains(&self, kind: &K) -> bool {
        self.index_of(kind).is_some()
    }

    /// Currently selected index.
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Kind in the currently selected slot.
    pub fn selected_kind(&self) -> Option<K> {
        self.selected.map(|i| self.kinds[i])
    }

    /// Select `kind`, returning its index.
    ///
    /// Selecting a kind that is not a slot leaves the selection unchanged and
    /// returns `None`.
    pub fn select(&mut self, kind: &K) -> Option<usize> {
        let index = self.index_of(kind)?;
        self.selected = Some(index);
        Some(index)
    }
}
