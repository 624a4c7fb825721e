// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lifecycle states, edges, and hook ordering.
//!
//! ## Edges
//!
//! ```text
//! Inactive  --Activate-->   Active
//! Active    --Suspend-->    Suspended
//! Suspended --Resume-->     Active
//! Active    --Deactivate--> Inactive
//! Suspended --Deactivate--> Inactive
//! ```
//!
//! `Deactivate` is terminal for a module instance: a record that reaches
//! [`State::Inactive`] through it is discarded by its owner.
//!
//! ## Hook order
//!
//! Each edge fires one router hook and one handler hook. Opening edges
//! ([`Edge::Activate`], [`Edge::Resume`]) run the router first; closing edges
//! ([`Edge::Suspend`], [`Edge::Deactivate`]) run the handler first.
//! See [`Edge::hook_order`].

/// Lifecycle state of a module.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum State {
    /// Not running. Either never activated or already torn down.
    #[default]
    Inactive,
    /// Running; the handler may receive business calls and live passes.
    Active,
    /// Hidden but retained; wiring is kept so that resuming is cheap.
    Suspended,
}

/// A lifecycle transition.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Edge {
    /// First activation of a freshly built module.
    Activate,
    /// Hide a module while keeping it loaded.
    Suspend,
    /// Bring a suspended module back.
    Resume,
    /// Tear a module down for good.
    Deactivate,
}

/// The component a lifecycle hook is delivered to.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Component {
    /// The navigation-decision half of a module.
    Router,
    /// The business-logic half of a module.
    Handler,
}

impl State {
    /// Returns the state reached by taking `edge` from `self`, or `None` if the
    /// edge is not allowed from this state.
    ///
    /// ```
    /// use trellis_lifecycle::{Edge, State};
    ///
    /// assert_eq!(State::Inactive.apply(Edge::Activate), Some(State::Active));
    /// assert_eq!(State::Active.apply(Edge::Activate), None);
    /// assert_eq!(State::Suspended.apply(Edge::Deactivate), Some(State::Inactive));
    /// ```
    #[must_use]
    pub const fn apply(self, edge: Edge) -> Option<Self> {
        match (self, edge) {
            (Self::Inactive, Edge::Activate) => Some(Self::Active),
            (Self::Active, Edge::Suspend) => Some(Self::Suspended),
            (Self::Suspended, Edge::Resume) => Some(Self::Active),
            (Self::Active | Self::Suspended, Edge::Deactivate) => Some(Self::Inactive),
            _ => None,
        }
    }

    /// True if the module is [`State::Active`].
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }

    /// True if the module is [`State::Suspended`].
    pub const fn is_suspended(self) -> bool {
        matches!(self, Self::Suspended)
    }
}

impl Edge {
    /// The order in which the two components receive the hook for this edge.
    pub const fn hook_order(self) -> [Component; 2] {
        match self {
            Self::Activate | Self::Resume => [Component::Router, Component::Handler],
            Self::Suspend | Self::Deactivate => [Component::Handler, Component::Router],
        }
    }

    /// True for edges that bring a module on screen.
    pub const fn is_opening(self) -> bool {
        matches!(self, Self::Activate | Self::Resume)
    }
}
