// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Parent/child messaging.
//!
//! ## Shapes
//!
//! - Pre-display input: [`Handler::will_display`], once per display operation,
//!   right before the surface is attached. Headless children get it too.
//! - Live pass down: [`ModuleTree::pass_to_child`] to an active child.
//! - Live pass up: [`ModuleTree::pass_to_parent`] from an active child to its
//!   active parent; the parent learns the sender's kind.
//! - Completion output: [`Handler::child_did_complete`], once per completion,
//!   after the child was hidden and suspended or torn down. A suspended parent
//!   hears it right after it resumes.
//!
//! Messages aimed at a module whose callback is running are queued and
//! delivered once it returns.

use alloc::boxed::Box;

use tracing::debug;
use trellis_lifecycle::State;

use crate::context::Context;
use crate::error::{Declined, Routed};
use crate::module::{Domain, Handler};
use crate::tree::ModuleTree;
use crate::types::ModuleId;

pub(crate) enum Delivery<D: Domain> {
    Display(Option<D::Message>),
    FromParent(D::Message),
    FromChild(D::Kind, D::Message),
    Completed(D::Kind, Option<D::Message>),
}

impl<D: Domain> Delivery<D> {
    /// Handlers only hear anything while active.
    pub(crate) fn accepted_in(&self, state: State) -> bool {
        state.is_active()
    }

    /// Completion output waits for a suspended parent to resume; everything
    /// else is dropped.
    pub(crate) fn parks_while_suspended(&self) -> bool {
        matches!(self, Self::Completed(..))
    }

    pub(crate) fn dispatch(self, handler: &mut Box<dyn Handler<D>>, cx: &mut Context<'_, D>) {
        match self {
            Self::Display(input) => handler.will_display(cx, input),
            Self::FromParent(message) => handler.parent_did_pass(cx, message),
            Self::FromChild(kind, message) => handler.child_did_pass(cx, kind, message),
            Self::Completed(kind, output) => handler.child_did_complete(cx, kind, output),
        }
    }
}

impl<D: Domain> ModuleTree<D> {
    /// Send a live message to the active child of `kind`.
    pub fn pass_to_child(&mut self, parent: ModuleId, kind: D::Kind, message: D::Message) -> Routed {
        let result = self.check_pass_to_child(parent, kind);
        match result {
            Ok(child) => {
                self.deliver(child, Delivery::FromParent(message));
                Ok(())
            }
            Err(reason) => {
                debug!(module = ?parent, ?kind, %reason, "pass to child declined");
                Err(reason)
            }
        }
    }

    fn check_pass_to_child(&self, parent: ModuleId, kind: D::Kind) -> Result<ModuleId, Declined> {
        let rec = self.record(parent).ok_or(Declined::Dead)?;
        let child = rec.children.get(&kind).ok_or(Declined::NotRegistered)?;
        if !self.state(child).is_some_and(State::is_active) {
            return Err(Declined::Inactive);
        }
        Ok(child)
    }

    /// Send a live message from `child` to its parent.
    ///
    /// Both ends must be active. The parent receives the child's kind, so the
    /// child never needs to know how it is addressed.
    pub fn pass_to_parent(&mut self, child: ModuleId, message: D::Message) -> Routed {
        match self.check_pass_to_parent(child) {
            Ok((parent, kind)) => {
                self.deliver(parent, Delivery::FromChild(kind, message));
                Ok(())
            }
            Err(reason) => {
                debug!(module = ?child, %reason, "pass to parent declined");
                Err(reason)
            }
        }
    }

    fn check_pass_to_parent(&self, child: ModuleId) -> Result<(ModuleId, D::Kind), Declined> {
        let rec = self.record(child).ok_or(Declined::Dead)?;
        if !rec.state.is_active() {
            return Err(Declined::Inactive);
        }
        let parent = rec.parent.ok_or(Declined::Orphan)?;
        let prec = self.record(parent).ok_or(Declined::Orphan)?;
        let kind = prec.children.kind_of(child).ok_or(Declined::NotRegistered)?;
        if !prec.state.is_active() {
            return Err(Declined::Inactive);
        }
        Ok((parent, kind))
    }
}
