// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Routing façade: display children, take them down again, and configure
//! containers.
//!
//! ## Display
//!
//! [`ModuleTree::push`], [`ModuleTree::present`], and [`ModuleTree::select`]
//! each resolve or build the child, hand it its pre-display input, attach its
//! surface with the matching mechanism, and record the [`Transition`] used.
//! [`ModuleTree::route`] picks one of them from the parent's router.
//!
//! ## Teardown
//!
//! [`ModuleTree::complete`] reads the recorded transition back and inverts it
//! (pop or dismiss), then suspends or tears the child down and reports the
//! output to the parent. Tab slots are permanent and never complete.
//! Popping a child also tears down whatever was pushed above it.
//! [`ModuleTree::detach`] inverts the same way but tells the parent nothing.
//!
//! ## Headless modules
//!
//! A child without a surface is never attached. Pushed, it still receives the
//! parent's stack; presented, it inherits the parent's host surface, so its
//! own children can be presented there.
//!
//! Every precondition failure is a no-op reported as [`Declined`].

use alloc::boxed::Box;
use alloc::vec::Vec;

use tracing::debug;
use trellis_lifecycle::{State, TabSlots, Transition};

use crate::error::{Declined, Routed};
use crate::message::Delivery;
use crate::module::{Domain, Surface};
use crate::toolkit::Toolkit;
use crate::tree::{ModuleTree, Record, StackRef, Tabs};
use crate::types::{Capabilities, ModuleId, Route};

fn declined(op: &'static str, module: ModuleId, result: Routed) -> Routed {
    if let Err(reason) = &result {
        debug!(op, module = ?module, %reason, "declined");
    }
    result
}

impl<D: Domain> ModuleTree<D> {
    /// Alive and active, else the reason why not.
    fn live(&self, id: ModuleId) -> Result<&Record<D>, Declined> {
        let rec = self.record(id).ok_or(Declined::Dead)?;
        if !rec.state.is_active() {
            return Err(Declined::Inactive);
        }
        Ok(rec)
    }

    /// Show `root` in `window` and activate it.
    ///
    /// The root's upper surface becomes the window's content. A headless root
    /// shows nothing and takes the window as its substituted surface.
    pub fn launch(&mut self, root: ModuleId, window: Surface<D>) -> Routed {
        declined("launch", root, self.launch_inner(root, window))
    }

    fn launch_inner(&mut self, root: ModuleId, window: Surface<D>) -> Routed {
        let rec = self.record_mut(root).ok_or(Declined::Dead)?;
        if rec.activated {
            return Err(Declined::AlreadyActivated);
        }
        let upper = rec.upper_surface().cloned();
        if let Some(surface) = upper {
            self.toolkit.show_root(&window, &surface);
        } else if let Some(rec) = self.record_mut(root) {
            rec.substituted = Some(window);
        }
        debug!(module = ?root, "launch");
        self.activate(root);
        Ok(())
    }

    /// Give a not yet activated module its own stack container.
    ///
    /// The module's tab container or surface is pushed as the stack's root,
    /// without animation.
    pub fn establish_stack(&mut self, id: ModuleId, stack: Surface<D>) -> Routed {
        declined("establish_stack", id, self.establish_stack_inner(id, stack))
    }

    fn establish_stack_inner(&mut self, id: ModuleId, stack: Surface<D>) -> Routed {
        let rec = self.record_mut(id).ok_or(Declined::Dead)?;
        if rec.activated {
            return Err(Declined::AlreadyActivated);
        }
        let root = rec.own_surface().cloned();
        rec.stack = Some(StackRef::Owned(stack.clone()));
        if let Some(root) = root {
            self.toolkit.push(&stack, &root, false);
        }
        Ok(())
    }

    /// Give a not yet activated module a tab container with fixed slots.
    ///
    /// Duplicate kinds are dropped, keeping the first occurrence. The slots
    /// are built, activated, and installed when the module activates, before
    /// its own activation hooks run.
    pub fn establish_tabs(
        &mut self,
        id: ModuleId,
        tabs: Surface<D>,
        slots: impl IntoIterator<Item = D::Kind>,
    ) -> Routed {
        declined("establish_tabs", id, self.establish_tabs_inner(id, tabs, slots))
    }

    fn establish_tabs_inner(
        &mut self,
        id: ModuleId,
        container: Surface<D>,
        slots: impl IntoIterator<Item = D::Kind>,
    ) -> Routed {
        let rec = self.record_mut(id).ok_or(Declined::Dead)?;
        if rec.activated {
            return Err(Declined::AlreadyActivated);
        }
        if rec.builder.is_none() {
            return Err(Declined::NoBuilder);
        }
        let slots = TabSlots::new(slots);
        if slots.is_empty() {
            return Err(Declined::NoTabs);
        }
        rec.tabs = Some(Tabs { container, slots });
        Ok(())
    }

    /// Run `f` once, after the module's overlay is dismissed by
    /// [`ModuleTree::complete`] or [`ModuleTree::detach`].
    pub fn on_dismissed(&mut self, id: ModuleId, f: impl FnOnce() + 'static) -> Routed {
        let Some(rec) = self.record_mut(id) else {
            return declined("on_dismissed", id, Err(Declined::Dead));
        };
        rec.on_dismissed = Some(Box::new(f));
        Ok(())
    }

    /// Push the child of `kind` onto the parent's stack container.
    ///
    /// The stack is shared with the child only after the push, so the child's
    /// own pushes land on top of it.
    pub fn push(
        &mut self,
        parent: ModuleId,
        kind: D::Kind,
        input: Option<D::Message>,
        animated: bool,
    ) -> Routed {
        declined("push", parent, self.push_inner(parent, kind, input, animated))
    }

    fn push_inner(
        &mut self,
        parent: ModuleId,
        kind: D::Kind,
        input: Option<D::Message>,
        animated: bool,
    ) -> Routed {
        let rec = self.live(parent)?;
        let stack = rec.stack_surface().cloned().ok_or(Declined::NoContainer)?;
        if rec.ledger.get(&kind).is_some() {
            return Err(Declined::AlreadyShown);
        }
        let child = self.resolve_or_build(parent, kind)?;
        self.deliver(child, Delivery::Display(input));
        let upper = self.record_mut(child).and_then(|c| {
            c.stack = None;
            c.upper_surface().cloned()
        });
        if let Some(surface) = upper {
            self.toolkit.push(&stack, &surface, animated);
            if let Some(rec) = self.record_mut(parent) {
                rec.ledger.record(kind, Transition::Pushed);
            }
        }
        if let Some(c) = self.record_mut(child) {
            c.stack = Some(StackRef::Shared(stack));
        }
        debug!(parent = ?parent, child = ?child, ?kind, "pushed");
        Ok(())
    }

    /// Present the child of `kind` as an overlay on the parent's host surface.
    ///
    /// A headless child is not presented; it inherits the host surface instead.
    pub fn present(
        &mut self,
        parent: ModuleId,
        kind: D::Kind,
        input: Option<D::Message>,
        animated: bool,
    ) -> Routed {
        declined(
            "present",
            parent,
            self.present_inner(parent, kind, input, animated),
        )
    }

    fn present_inner(
        &mut self,
        parent: ModuleId,
        kind: D::Kind,
        input: Option<D::Message>,
        animated: bool,
    ) -> Routed {
        let rec = self.live(parent)?;
        let host = rec.host_surface().cloned().ok_or(Declined::NoContainer)?;
        if rec.ledger.get(&kind).is_some() {
            return Err(Declined::AlreadyShown);
        }
        let child = self.resolve_or_build(parent, kind)?;
        self.deliver(child, Delivery::Display(input));
        let upper = self.record(child).and_then(|c| c.upper_surface().cloned());
        match upper {
            Some(surface) => {
                self.toolkit.present(&host, &surface, animated);
                if let Some(rec) = self.record_mut(parent) {
                    rec.ledger.record(kind, Transition::Presented);
                }
                debug!(parent = ?parent, child = ?child, ?kind, "presented");
            }
            None => {
                if let Some(c) = self.record_mut(child) {
                    c.substituted = Some(host);
                }
                debug!(parent = ?parent, child = ?child, ?kind, "substituted");
            }
        }
        Ok(())
    }

    /// Switch the parent's tab container to the slot of `kind`.
    ///
    /// If the slot's module is active, `input` reaches it as a live pass.
    /// Selecting a kind that is not a slot leaves the selection unchanged.
    pub fn select(&mut self, parent: ModuleId, kind: D::Kind, input: Option<D::Message>) -> Routed {
        declined("select", parent, self.select_inner(parent, kind, input))
    }

    fn select_inner(
        &mut self,
        parent: ModuleId,
        kind: D::Kind,
        input: Option<D::Message>,
    ) -> Routed {
        self.live(parent)?;
        let rec = self.record_mut(parent).ok_or(Declined::Dead)?;
        let tabs = rec.tabs.as_mut().ok_or(Declined::NoTabs)?;
        let index = tabs.slots.select(&kind).ok_or(Declined::NotATab)?;
        let container = tabs.container.clone();
        let child = rec.children.get(&kind);
        self.toolkit.select_tab(&container, index);
        debug!(parent = ?parent, ?kind, index, "selected");
        if let (Some(child), Some(message)) = (child, input) {
            if self.state(child).is_some_and(State::is_active) {
                self.deliver(child, Delivery::FromParent(message));
            } else {
                debug!(parent = ?parent, ?kind, "slot inactive, input dropped");
            }
        }
        Ok(())
    }

    /// Display the child of `kind` the way the parent's router prefers.
    ///
    /// Called from inside one of the parent's own router hooks, the router
    /// cannot be asked yet; the route runs as soon as the hook returns and
    /// any decline is only logged.
    pub fn route(
        &mut self,
        parent: ModuleId,
        kind: D::Kind,
        input: Option<D::Message>,
        animated: bool,
    ) -> Routed {
        let route = match self.preferred_route(parent, kind) {
            Ok(Some(route)) => route,
            Ok(None) => {
                self.defer_route(parent, kind, input, animated);
                return Ok(());
            }
            Err(reason) => return declined("route", parent, Err(reason)),
        };
        match route {
            Route::Push => self.push(parent, kind, input, animated),
            Route::Present => self.present(parent, kind, input, animated),
            Route::Select => self.select(parent, kind, input),
        }
    }

    /// `None` while the router is out running one of its hooks.
    fn preferred_route(&self, parent: ModuleId, kind: D::Kind) -> Result<Option<Route>, Declined> {
        let rec = self.live(parent)?;
        Ok(rec.router.as_ref().map(|router| router.preferred_route(kind)))
    }

    /// Finish `child`: hide it, suspend or tear it down, and hand `output` to
    /// its parent.
    ///
    /// The recorded transition is inverted: a pushed child is popped along
    /// with everything above it, a presented child is dismissed. With
    /// `keep_loaded` the child stays registered and suspended, and the next
    /// display of its kind resumes it.
    pub fn complete(
        &mut self,
        child: ModuleId,
        output: Option<D::Message>,
        animated: bool,
        keep_loaded: bool,
    ) -> Routed {
        declined(
            "complete",
            child,
            self.complete_inner(child, output, animated, keep_loaded),
        )
    }

    fn complete_inner(
        &mut self,
        child: ModuleId,
        output: Option<D::Message>,
        animated: bool,
        keep_loaded: bool,
    ) -> Routed {
        let rec = self.live(child)?;
        let parent = rec.parent.ok_or(Declined::Orphan)?;
        let prec = self.record(parent).ok_or(Declined::Orphan)?;
        let kind = prec.children.kind_of(child).ok_or(Declined::NotRegistered)?;
        if prec.ledger.get(&kind) == Some(Transition::Permanent) {
            return Err(Declined::Permanent);
        }
        self.invert(parent, kind, child, animated);
        debug!(parent = ?parent, child = ?child, ?kind, keep_loaded, "complete");
        if keep_loaded {
            self.suspend(child);
        } else {
            self.deactivate(child);
        }
        self.deliver_after(child, parent, Delivery::Completed(kind, output));
        Ok(())
    }

    /// Undo the transition recorded for the child of `kind` and drop the entry.
    ///
    /// Popping a child off the stack takes everything above it along: later
    /// pushed siblings and the child's own stacked descendants are torn down,
    /// since their surfaces are gone. Permanent entries are left alone.
    pub(crate) fn invert(
        &mut self,
        parent: ModuleId,
        kind: D::Kind,
        child: ModuleId,
        animated: bool,
    ) -> Option<Transition> {
        let prec = self.record(parent)?;
        let stack = prec.stack_surface().cloned();
        let above = self.stacked_above(parent, kind, child, stack.as_ref());
        let crec = self.record(child)?;
        let own = crec.own_surface().cloned();
        let upper = crec.upper_surface().cloned();
        let transition = self.record_mut(parent)?.ledger.take_dismissible(&kind)?;
        match transition {
            Transition::Pushed => {
                if let (Some(stack), Some(surface)) = (stack, own) {
                    self.toolkit.pop(&stack, &surface, animated);
                }
                for id in above {
                    debug!(module = ?id, below = ?child, "popped from under");
                    self.deactivate(id);
                }
            }
            Transition::Presented => {
                if let Some(surface) = upper {
                    self.toolkit.dismiss(&surface, animated);
                }
                let dismissed = self.record_mut(child).and_then(|c| c.on_dismissed.take());
                if let Some(f) = dismissed {
                    f();
                }
            }
            Transition::Permanent => {}
        }
        Some(transition)
    }

    /// Modules whose surfaces sit above the child of `kind` on `stack`.
    fn stacked_above(
        &self,
        parent: ModuleId,
        kind: D::Kind,
        child: ModuleId,
        stack: Option<&Surface<D>>,
    ) -> Vec<ModuleId> {
        let (Some(prec), Some(crec), Some(stack)) = (self.record(parent), self.record(child), stack)
        else {
            return Vec::new();
        };
        let mut above: Vec<ModuleId> = prec
            .ledger
            .pushed_after(&kind)
            .into_iter()
            .filter_map(|k| prec.children.get(&k))
            .collect();
        above.extend(crec.children.iter().filter_map(|(_, id)| {
            let shares = self
                .record(id)
                .is_some_and(|r| matches!(&r.stack, Some(StackRef::Shared(s)) if s == stack));
            shares.then_some(id)
        }));
        above
    }

    /// True if the module can host an overlay.
    pub fn can_host(&self, id: ModuleId) -> bool {
        self.capabilities(id).can_host()
    }

    /// True if the module owns or shares a stack container.
    pub fn has_stack(&self, id: ModuleId) -> bool {
        self.capabilities(id).intersects(Capabilities::STACK)
    }
}
