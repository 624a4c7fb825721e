// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Lifecycle: the bookkeeping primitives of a module tree.
//!
//! Trellis Lifecycle is the leaf building block under `trellis_tree`.
//! It knows nothing about surfaces, handlers, or builders; it only describes
//! the rules the engine enforces.
//!
//! - [`State`] and [`Edge`]: the lifecycle state machine and the order in which
//!   router and handler hooks run for each edge.
//! - [`ChildRegistry`]: parent-owned mapping from a child kind to its live record,
//!   with reverse lookup by handle identity.
//! - [`TransitionLedger`] and [`Transition`]: how each child was made visible, so
//!   teardown can invert it.
//! - [`TabSlots`]: an explicit, deduplicated, ordered list of tab-slot kinds with
//!   a selection that non-member kinds cannot move.
//!
//! Everything is generic over the child kind `K` and the handle type `V`.
//!
//! # Example
//!
//! ```rust
//! use trellis_lifecycle::{ChildRegistry, Edge, State, Transition, TransitionLedger};
//!
//! #[derive(Copy, Clone, Debug, Eq, PartialEq)]
//! enum Kind { Feed, Settings }
//!
//! let mut children: ChildRegistry<Kind, u32> = ChildRegistry::new();
//! let mut ledger = TransitionLedger::new();
//!
//! // A parent builds Feed and pushes it.
//! let mut feed = State::Inactive;
//! feed = feed.apply(Edge::Activate).unwrap();
//! children.insert(Kind::Feed, 1);
//! ledger.record(Kind::Feed, Transition::Pushed);
//!
//! // Feed completes while staying loaded: invert the push, then suspend.
//! assert_eq!(ledger.take_dismissible(&Kind::Feed), Some(Transition::Pushed));
//! feed = feed.apply(Edge::Suspend).unwrap();
//! assert_eq!(feed, State::Suspended);
//! assert_eq!(children.get(&Kind::Feed), Some(1));
//! assert!(!children.contains(&Kind::Settings));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod ledger;
pub mod registry;
pub mod slots;
pub mod state;

pub use ledger::{Transition, TransitionLedger};
pub use registry::ChildRegistry;
pub use slots::TabSlots;
pub use state::{Component, Edge, State};
