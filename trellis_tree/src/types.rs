// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the module tree: identifiers, capabilities, and routes.

/// Identifier for a module record in a [`ModuleTree`](crate::ModuleTree).
///
/// This is a small, copyable handle. It consists of a slot index and a
/// generation counter.
///
/// ## Semantics
///
/// - When a module is inserted or built, a fresh slot is allocated with generation `1`.
/// - When a module is torn down, its slot is freed and every existing `ModuleId`
///   for it becomes stale.
/// - Reusing a freed slot increments its generation, so a stale id never
///   aliases a different live module.
///
/// Use [`ModuleTree::is_alive`](crate::ModuleTree::is_alive) to check liveness.
/// Behavior on generation overflow is unspecified.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ModuleId(pub(crate) u32, pub(crate) u32);

impl ModuleId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }

    pub(crate) const fn generation(self) -> u32 {
        self.1
    }
}

bitflags::bitflags! {
    /// What a module record is able to do, derived from its configuration.
    ///
    /// Routing operations check these flags instead of inspecting concrete
    /// router types.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Capabilities: u8 {
        /// Has a visual surface of its own.
        const SURFACE         = 0b0000_0001;
        /// Established a stack container and owns it.
        const OWNS_STACK      = 0b0000_0010;
        /// Holds a non-owning reference to an ancestor's stack container.
        const SHARES_STACK    = 0b0000_0100;
        /// Owns a tab container with fixed slots.
        const OWNS_TABS       = 0b0000_1000;
        /// Can build child modules.
        const BUILDS_CHILDREN = 0b0001_0000;
        /// Headless, but inherited a host surface from its parent.
        const SUBSTITUTED     = 0b0010_0000;
    }
}

impl Capabilities {
    /// Any stack container, owned or shared.
    pub const STACK: Self = Self::OWNS_STACK.union(Self::SHARES_STACK);

    /// True if the module can host an overlay presentation.
    pub const fn can_host(self) -> bool {
        self.intersects(
            Self::STACK
                .union(Self::OWNS_TABS)
                .union(Self::SURFACE)
                .union(Self::SUBSTITUTED),
        )
    }
}

/// The display mechanism a router prefers for a child kind.
///
/// Consulted by [`ModuleTree::route`](crate::ModuleTree::route).
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum Route {
    /// Push onto the parent's stack container.
    Push,
    /// Present as an overlay above the parent's host surface.
    #[default]
    Present,
    /// Switch the parent's tab container to the child's slot.
    Select,
}
