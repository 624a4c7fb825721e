// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-child record of how a child was made visible.
//!
//! ## Overview
//!
//! A parent writes one [`Transition`] per child when the child's surface is
//! attached and reads it back when the child completes, so the teardown can
//! invert exactly what the attach did.
//!
//! An entry exists only while the child is visible through that mechanism.
//! Inverting a transition removes the entry; [`Transition::Permanent`] entries
//! are never inverted and stay until the parent clears the ledger.

use alloc::vec::Vec;

/// The mechanism used to make a child visible.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Transition {
    /// Appended to the parent's stack container; inverted by popping.
    Pushed,
    /// Shown as a modal overlay above the host surface; inverted by dismissing.
    Presented,
    /// Installed as a fixed tab slot; never inverted.
    Permanent,
}

impl Transition {
    /// True if the completion path may undo this transition.
    pub const fn is_dismissible(self) -> bool {
        !matches!(self, Self::Permanent)
    }
}

/// Ledger of the transitions currently in effect for a parent's children.
#[derive(Clone, Debug)]
pub struct TransitionLedger<K> {
    entries: Vec<(K, Transition)>,
}

impl<K> Default for TransitionLedger<K> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<K: Copy + Eq> TransitionLedger<K> {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `kind` became visible through `transition`.
    ///
    /// Returns the transition previously recorded for `kind`, if any.
    pub fn record(&mut self, kind: K, transition: Transition) -> Option<Transition> {
        if let Some(slot) = self.entries.iter_mut().find(|(k, _)| *k == kind) {
            return Some(core::mem::replace(&mut slot.1, transition));
        }
        self.entries.push((kind, transition));
        None
    }

    /// Transition in effect for `kind`.
    pub fn get(&self, kind: &K) -> Option<Transition> {
        self.entries
            .iter()
            .find(|(k, _)| k == kind)
            .map(|(_, t)| *t)
    }

    /// Remove and return the entry for `kind` so the caller can invert it.
    ///
    /// A [`Transition::Permanent`] entry is left in place and `None` is
    /// returned, since tab slots are not dismissible.
    ///
    /// ```
    /// use trellis_lifecycle::{Transition, TransitionLedger};
    ///
    /// let mut ledger = TransitionLedger::new();
    /// ledger.record('a', Transition::Pushed);
    /// ledger.record('b', Transition::Permanent);
    /// assert_eq!(ledger.take_dismissible(&'a'), Some(Transition::Pushed));
    /// assert_eq!(ledger.take_dismissible(&'a'), None);
    /// assert_eq!(ledger.take_dismissible(&'b'), None);
    /// assert_eq!(ledger.get(&'b'), Some(Transition::Permanent));
    /// ```
    pub fn take_dismissible(&mut self, kind: &K) -> Option<Transition> {
        let pos = self
            .entries
            .iter()
            .position(|(k, t)| k == kind && t.is_dismissible())?;
        Some(self.entries.remove(pos).1)
    }

    /// Kinds pushed after `kind`, oldest first.
    ///
    /// Entries keep the order they were recorded in, so these are the
    /// children whose surfaces sit above `kind`'s on a shared stack.
    ///
    /// ```
    /// use trellis_lifecycle::{Transition, TransitionLedger};
    ///
    /// let mut ledger = TransitionLedger::new();
    /// ledger.record('a', Transition::Pushed);
    /// ledger.record('b', Transition::Presented);
    /// ledger.record('c', Transition::Pushed);
    /// assert_eq!(ledger.pushed_after(&'a'), vec!['c']);
    /// assert!(ledger.pushed_after(&'c').is_empty());
    /// ```
    pub fn pushed_after(&self, kind: &K) -> Vec<K> {
        let Some(pos) = self.entries.iter().position(|(k, _)| k == kind) else {
            return Vec::new();
        };
        self.entries[pos + 1..]
            .iter()
            .filter(|(_, t)| *t == Transition::Pushed)
            .map(|(k, _)| *k)
            .collect()
    }

    /// Drop the entry for `kind` whatever its transition.
    pub fn forget(&mut self, kind: &K) -> Option<Transition> {
        let pos = self.entries.iter().position(|(k, _)| k == kind)?;
        Some(self.entries.remove(pos).1)
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of recorded transitions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing is recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn record_replaces_previous_entry() {
        let mut ledger = TransitionLedger::new();
        assert_eq!(ledger.record(1_u8, Transition::Presented), None);
        assert_eq!(
            ledger.record(1, Transition::Pushed),
            Some(Transition::Presented)
        );
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.get(&1), Some(Transition::Pushed));
    }

    #[test]
    fn permanent_survives_take_but_not_forget() {
        let mut ledger = TransitionLedger::new();
        ledger.record(3_u8, Transition::Permanent);
        assert_eq!(ledger.take_dismissible(&3), None);
        assert_eq!(ledger.forget(&3), Some(Transition::Permanent));
        assert!(ledger.is_empty());
    }

    #[test]
    fn take_is_idempotent() {
        let mut ledger = TransitionLedger::new();
        ledger.record(2_u8, Transition::Presented);
        assert_eq!(ledger.take_dismissible(&2), Some(Transition::Presented));
        assert_eq!(ledger.take_dismissible(&2), None);
    }

    #[test]
    fn repushed_kind_moves_to_the_top() {
        let mut ledger = TransitionLedger::new();
        ledger.record(1_u8, Transition::Pushed);
        ledger.record(2, Transition::Pushed);
        assert_eq!(ledger.pushed_after(&1), vec![2]);

        ledger.take_dismissible(&1);
        ledger.record(1, Transition::Pushed);
        assert_eq!(ledger.pushed_after(&2), vec![1]);
        assert!(ledger.pushed_after(&1).is_empty());
        assert!(ledger.pushed_after(&9).is_empty());
    }

    #[test]
    fn dismissible_flags() {
        assert!(Transition::Pushed.is_dismissible());
        assert!(Transition::Presented.is_dismissible());
        assert!(!Transition::Permanent.is_dismissible());
    }
}
