// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Tree: a hierarchical module lifecycle and transition engine for UI
//! navigation.
//!
//! A [`ModuleTree`] holds modules. Each module pairs a [`Router`] (navigation
//! decisions) with a [`Handler`] (business logic) and optionally a visual
//! surface. Parents build their children lazily through a [`Builder`], and the
//! tree keeps activation, suspension, resumption, and teardown in lockstep with
//! the navigation actions that show or hide a module's surface.
//!
//! The tree renders nothing. Surfaces and containers are opaque handles owned
//! by a [`Toolkit`], which the tree asks to push, pop, present, dismiss, or
//! select them.
//!
//! ## API overview
//!
//! - [`Domain`]: binds the caller's child kinds, message payload, and toolkit.
//! - [`Module`]: what a builder returns; handler, router, and optional surface,
//!   child builder, stack container, and tab slots.
//! - [`ModuleTree`]: the arena and engine. Records are addressed by generational
//!   [`ModuleId`]s.
//! - [`Context`]: handed to every hook, bound to the module being called.
//!
//! Key operations:
//! - [`ModuleTree::launch`]: show a root in a window and activate it.
//! - [`ModuleTree::push`], [`ModuleTree::present`], [`ModuleTree::select`],
//!   [`ModuleTree::route`]: display a child, building it first if needed.
//! - [`ModuleTree::complete`]: hide a child again by inverting the recorded
//!   [`Transition`], then suspend or tear it down.
//! - [`ModuleTree::pass_to_child`], [`ModuleTree::pass_to_parent`]: live messages.
//!
//! Operations whose preconditions do not hold change nothing and return
//! [`Declined`]. Misusing the lifecycle (activating twice, resuming a module
//! that is not suspended) panics.
//!
//! ## Lifecycle
//!
//! Module state lives in [`trellis_lifecycle`]; see [`State`] and [`Edge`] for
//! the allowed edges and hook order.
//!
//! ## Logging
//!
//! The tree emits [`tracing`] events: `trace` for lifecycle edges, hooks, and
//! deferred callbacks; `debug` for builds, attachments, teardown, and every
//! declined operation. Install a subscriber in the application to see them.
//!
//! ## Example
//!
//! ```
//! use trellis_tree::{Context, Domain, Handler, Module, ModuleTree, Route, State, Toolkit};
//!
//! #[derive(Copy, Clone, Debug, Eq, PartialEq)]
//! enum Screen { Inbox, Compose }
//!
//! /// Keeps each stack's contents as a list of surface ids.
//! #[derive(Default)]
//! struct Stacks(Vec<(u32, Vec<u32>)>);
//!
//! impl Stacks {
//!     fn items(&mut self, stack: u32) -> &mut Vec<u32> {
//!         if !self.0.iter().any(|(s, _)| *s == stack) {
//!             self.0.push((stack, Vec::new()));
//!         }
//!         &mut self.0.iter_mut().find(|(s, _)| *s == stack).unwrap().1
//!     }
//! }
//!
//! impl Toolkit for Stacks {
//!     type Surface = u32;
//!     fn show_root(&mut self, _: &u32, _: &u32) {}
//!     fn push(&mut self, stack: &u32, surface: &u32, _: bool) {
//!         self.items(*stack).push(*surface);
//!     }
//!     fn pop(&mut self, stack: &u32, surface: &u32, _: bool) {
//!         let items = self.items(*stack);
//!         if let Some(i) = items.iter().position(|s| s == surface) {
//!             items.truncate(i);
//!         }
//!     }
//!     fn present(&mut self, _: &u32, _: &u32, _: bool) {}
//!     fn dismiss(&mut self, _: &u32, _: bool) {}
//!     fn install_tabs(&mut self, _: &u32, _: &[u32]) {}
//!     fn select_tab(&mut self, _: &u32, _: usize) {}
//!     fn placeholder(&mut self) -> u32 { 0 }
//! }
//!
//! struct Mail;
//!
//! impl Domain for Mail {
//!     type Kind = Screen;
//!     type Message = String;
//!     type Toolkit = Stacks;
//! }
//!
//! /// Remembers the last draft a child handed back.
//! #[derive(Default)]
//! struct Inbox { last_draft: Option<String> }
//!
//! impl Handler<Mail> for Inbox {
//!     fn child_did_complete(&mut self, _: &mut Context<'_, Mail>, _: Screen, output: Option<String>) {
//!         self.last_draft = output;
//!     }
//! }
//!
//! let mut tree: ModuleTree<Mail> = ModuleTree::new(Stacks::default());
//! let inbox = tree.insert(
//!     Module::new(Inbox::default(), Route::Push)
//!         .with_surface(1)
//!         .with_stack(100)
//!         .with_builder(|_: Screen| -> Module<Mail> { Module::new((), ()).with_surface(2) }),
//! );
//! tree.launch(inbox, 0).unwrap();
//!
//! // Route to Compose: the inbox router prefers pushing.
//! tree.route(inbox, Screen::Compose, Some("Hi".into()), true).unwrap();
//! let compose = tree.child(inbox, Screen::Compose).unwrap();
//! assert_eq!(tree.toolkit_mut().items(100), &vec![1, 2]);
//!
//! // Compose finishes; its surface is popped and it is torn down.
//! tree.complete(compose, Some("Draft".into()), true, false).unwrap();
//! assert_eq!(tree.toolkit_mut().items(100), &vec![1]);
//! assert_eq!(tree.child_state(inbox, Screen::Compose), State::Inactive);
//! let draft = tree.interact(inbox, |inbox: &mut Inbox, _| inbox.last_draft.clone());
//! assert_eq!(draft, Some(Some("Draft".to_string())));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod context;
mod error;
mod message;
mod module;
mod routing;
#[cfg(test)]
mod testing;
mod toolkit;
mod tree;
mod types;

pub use context::Context;
pub use error::{Declined, Routed};
pub use module::{Builder, Domain, Handler, Module, Router, Surface};
pub use toolkit::Toolkit;
pub use tree::ModuleTree;
pub use types::{Capabilities, ModuleId, Route};

pub use trellis_lifecycle::{Edge, State, Transition};
