// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: records, lifecycle edges, child registry, and
//! deferred callbacks.

use alloc::boxed::Box;
use alloc::collections::VecDeque;
use alloc::vec::Vec;
use core::any::Any;

use tracing::{debug, trace};
use trellis_lifecycle::{
    ChildRegistry, Component, Edge, State, TabSlots, Transition, TransitionLedger,
};

use crate::context::Context;
use crate::error::{Declined, Routed};
use crate::message::Delivery;
use crate::module::{Builder, Domain, Handler, Module, Router, Surface};
use crate::toolkit::Toolkit;
use crate::types::{Capabilities, ModuleId};

/// Stack container reference held by a record.
#[derive(Clone, Debug)]
pub(crate) enum StackRef<S> {
    /// Established by this module.
    Owned(S),
    /// Received from the parent after a push.
    Shared(S),
}

impl<S> StackRef<S> {
    pub(crate) fn surface(&self) -> &S {
        match self {
            Self::Owned(s) | Self::Shared(s) => s,
        }
    }
}

pub(crate) struct Tabs<D: Domain> {
    pub(crate) container: Surface<D>,
    pub(crate) slots: TabSlots<D::Kind>,
}

pub(crate) struct Record<D: Domain> {
    generation: u32,
    pub(crate) parent: Option<ModuleId>,
    pub(crate) state: State,
    pub(crate) activated: bool,
    busy: bool,
    // Taken out while one of their callbacks runs.
    pub(crate) handler: Option<Box<dyn Handler<D>>>,
    pub(crate) router: Option<Box<dyn Router<D>>>,
    pub(crate) builder: Option<Box<dyn Builder<D>>>,
    pub(crate) surface: Option<Surface<D>>,
    pub(crate) substituted: Option<Surface<D>>,
    pub(crate) stack: Option<StackRef<Surface<D>>>,
    pub(crate) tabs: Option<Tabs<D>>,
    pub(crate) on_dismissed: Option<Box<dyn FnOnce()>>,
    pub(crate) children: ChildRegistry<D::Kind, ModuleId>,
    pub(crate) ledger: TransitionLedger<D::Kind>,
    // Completion output that arrived while suspended.
    parked: Vec<Delivery<D>>,
}

impl<D: Domain> Record<D> {
    fn new(generation: u32, parent: Option<ModuleId>, module: Module<D>) -> Self {
        Self {
            generation,
            parent,
            state: State::Inactive,
            activated: false,
            busy: false,
            handler: Some(module.handler),
            router: Some(module.router),
            builder: module.builder,
            surface: module.surface,
            substituted: None,
            stack: None,
            tabs: None,
            on_dismissed: None,
            children: ChildRegistry::new(),
            ledger: TransitionLedger::new(),
            parked: Vec::new(),
        }
    }

    pub(crate) fn capabilities(&self) -> Capabilities {
        let mut caps = Capabilities::empty();
        caps.set(Capabilities::SURFACE, self.surface.is_some());
        match self.stack {
            Some(StackRef::Owned(_)) => caps |= Capabilities::OWNS_STACK,
            Some(StackRef::Shared(_)) => caps |= Capabilities::SHARES_STACK,
            None => {}
        }
        caps.set(Capabilities::OWNS_TABS, self.tabs.is_some());
        caps.set(Capabilities::BUILDS_CHILDREN, self.builder.is_some());
        caps.set(Capabilities::SUBSTITUTED, self.substituted.is_some());
        caps
    }

    /// Tab container, else own surface.
    pub(crate) fn own_surface(&self) -> Option<&Surface<D>> {
        self.tabs
            .as_ref()
            .map(|t| &t.container)
            .or(self.surface.as_ref())
    }

    /// Stack container, else [`Record::own_surface`].
    pub(crate) fn upper_surface(&self) -> Option<&Surface<D>> {
        self.stack
            .as_ref()
            .map(StackRef::surface)
            .or_else(|| self.own_surface())
    }

    /// [`Record::upper_surface`], else the substituted surface.
    pub(crate) fn host_surface(&self) -> Option<&Surface<D>> {
        self.upper_surface().or(self.substituted.as_ref())
    }

    pub(crate) fn stack_surface(&self) -> Option<&Surface<D>> {
        self.stack.as_ref().map(StackRef::surface)
    }
}

/// Callback postponed because its module was running another callback.
enum Job<D: Domain> {
    Edge(ModuleId, Edge),
    Deliver(ModuleId, Delivery<D>),
    Route(ModuleId, D::Kind, Option<D::Message>, bool),
}

/// Arena of module records and the engine that drives them.
///
/// Records are addressed by generational [`ModuleId`]s. Parents own their
/// children through a per-parent registry; children hold a non-owning parent
/// id. Tearing a module down tears its whole subtree down and frees the slots.
///
/// ## Re-entrancy
///
/// Hooks and handler calls receive a [`Context`] and may drive the tree from
/// inside the callback. A module never runs two callbacks at once: anything
/// aimed at a module whose callback is still running is queued and delivered
/// in order once the outermost callback returns.
pub struct ModuleTree<D: Domain> {
    records: Vec<Option<Record<D>>>, // slots
    generations: Vec<u32>,           // last generation per slot (persists across frees)
    free_list: Vec<usize>,
    pub(crate) toolkit: D::Toolkit,
    jobs: VecDeque<Job<D>>,
    depth: usize,
    draining: bool,
}

impl<D: Domain> core::fmt::Debug for ModuleTree<D> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.records.len();
        let alive = self.len();
        f.debug_struct("ModuleTree")
            .field("records_total", &total)
            .field("records_alive", &alive)
            .field("free_list", &self.free_list.len())
            .field("pending_jobs", &self.jobs.len())
            .finish_non_exhaustive()
    }
}

impl<D: Domain> ModuleTree<D> {
    /// Create an empty tree driving `toolkit`.
    pub fn new(toolkit: D::Toolkit) -> Self {
        Self {
            records: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            toolkit,
            jobs: VecDeque::new(),
            depth: 0,
            draining: false,
        }
    }

    /// The toolkit the tree drives.
    pub fn toolkit(&self) -> &D::Toolkit {
        &self.toolkit
    }

    /// Mutable access to the toolkit.
    pub fn toolkit_mut(&mut self) -> &mut D::Toolkit {
        &mut self.toolkit
    }

    /// Insert `module` as a detached root.
    ///
    /// The root stays inactive until [`ModuleTree::launch`] or
    /// [`ModuleTree::activate`].
    pub fn insert(&mut self, module: Module<D>) -> ModuleId {
        self.alloc(None, module)
    }

    fn alloc(&mut self, parent: Option<ModuleId>, mut module: Module<D>) -> ModuleId {
        let tabs = module.tabs.take();
        let stack = module.stack.take();
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.records[idx] = Some(Record::new(generation, parent, module));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "ModuleId stores 32-bit slot indices."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.records
                .push(Some(Record::new(generation, parent, module)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "ModuleId stores 32-bit slot indices."
            )]
            ((self.records.len() - 1) as u32, generation)
        };
        let id = ModuleId::new(idx, generation);
        // Tabs first, so an owned stack gets the tab container as its root.
        if let Some((container, slots)) = tabs {
            let _ = self.establish_tabs(id, container, slots);
        }
        if let Some(stack) = stack {
            let _ = self.establish_stack(id, stack);
        }
        id
    }

    fn free(&mut self, id: ModuleId) {
        if !self.is_alive(id) {
            return;
        }
        trace!(module = ?id, "free");
        self.records[id.idx()] = None;
        self.free_list.push(id.idx());
    }

    /// Returns `true` if `id` refers to a live record.
    ///
    /// A record stays alive from insertion (or build) until its teardown hooks
    /// have run.
    pub fn is_alive(&self, id: ModuleId) -> bool {
        self.record(id).is_some()
    }

    /// Number of live records.
    pub fn len(&self) -> usize {
        self.records.iter().filter(|r| r.is_some()).count()
    }

    /// True if the tree holds no records.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn record(&self, id: ModuleId) -> Option<&Record<D>> {
        let r = self.records.get(id.idx())?.as_ref()?;
        (r.generation == id.generation()).then_some(r)
    }

    pub(crate) fn record_mut(&mut self, id: ModuleId) -> Option<&mut Record<D>> {
        let r = self.records.get_mut(id.idx())?.as_mut()?;
        if r.generation != id.generation() {
            return None;
        }
        Some(r)
    }

    /// Lifecycle state, or `None` if `id` is stale.
    pub fn state(&self, id: ModuleId) -> Option<State> {
        self.record(id).map(|r| r.state)
    }

    /// Parent of `id`, if it has one and is alive.
    pub fn parent(&self, id: ModuleId) -> Option<ModuleId> {
        self.record(id)?.parent
    }

    /// The kind `id` is registered under in its parent.
    pub fn kind_of(&self, id: ModuleId) -> Option<D::Kind> {
        let parent = self.parent(id)?;
        self.record(parent)?.children.kind_of(id)
    }

    /// Live child of `parent` registered under `kind`.
    pub fn child(&self, parent: ModuleId, kind: D::Kind) -> Option<ModuleId> {
        self.record(parent)?.children.get(&kind)
    }

    /// Registered children of `parent`, in build order.
    pub fn children(&self, parent: ModuleId) -> Vec<(D::Kind, ModuleId)> {
        self.record(parent)
            .map(|r| r.children.iter().collect())
            .unwrap_or_default()
    }

    /// State of the child of `kind`; [`State::Inactive`] if there is none.
    pub fn child_state(&self, parent: ModuleId, kind: D::Kind) -> State {
        self.child(parent, kind)
            .and_then(|c| self.state(c))
            .unwrap_or_default()
    }

    /// How the child of `kind` is currently shown by `parent`.
    pub fn transition_of(&self, parent: ModuleId, kind: D::Kind) -> Option<Transition> {
        self.record(parent)?.ledger.get(&kind)
    }

    /// What the module is able to do, derived from its configuration.
    pub fn capabilities(&self, id: ModuleId) -> Capabilities {
        self.record(id)
            .map(Record::capabilities)
            .unwrap_or_default()
    }

    /// The module's own surface, if it is not headless.
    pub fn surface(&self, id: ModuleId) -> Option<&Surface<D>> {
        self.record(id)?.surface.as_ref()
    }

    /// The surface shown when the module is displayed: its stack container,
    /// else its tab container, else its own surface.
    pub fn upper_surface(&self, id: ModuleId) -> Option<&Surface<D>> {
        self.record(id)?.upper_surface()
    }

    /// The surface overlays are presented on: the upper surface, else the
    /// surface substituted for a headless module.
    pub fn host_surface(&self, id: ModuleId) -> Option<&Surface<D>> {
        self.record(id)?.host_surface()
    }

    /// The stack container the module owns or shares.
    pub fn stack(&self, id: ModuleId) -> Option<&Surface<D>> {
        self.record(id)?.stack_surface()
    }

    /// Kind in the selected tab slot of a tab-owning module.
    pub fn selected_tab(&self, id: ModuleId) -> Option<D::Kind> {
        self.record(id)?.tabs.as_ref()?.slots.selected_kind()
    }

    // --- lifecycle ---

    /// Activate a freshly inserted module.
    ///
    /// Builds the tab slots if the module owns tabs, then runs the router's and
    /// the handler's activation hooks. Stale ids are ignored.
    ///
    /// # Panics
    ///
    /// Panics if the module was activated before.
    pub fn activate(&mut self, id: ModuleId) {
        let Some(rec) = self.record_mut(id) else {
            return;
        };
        assert!(
            !rec.activated && rec.state == State::Inactive,
            "module {id:?} was already activated"
        );
        rec.activated = true;
        rec.state = State::Active;
        trace!(module = ?id, "activate");
        self.fire(id, Edge::Activate);
    }

    /// Hide an active module while keeping it loaded.
    ///
    /// Its wiring (parent link, stack reference, substitute, children) is kept.
    /// Anything but an active module is left alone.
    pub fn suspend(&mut self, id: ModuleId) {
        let Some(rec) = self.record_mut(id) else {
            return;
        };
        let Some(next) = rec.state.apply(Edge::Suspend) else {
            return;
        };
        rec.state = next;
        trace!(module = ?id, "suspend");
        self.fire(id, Edge::Suspend);
    }

    /// Bring a suspended module back.
    ///
    /// # Panics
    ///
    /// Panics if the module is not suspended.
    pub fn resume(&mut self, id: ModuleId) {
        let Some(rec) = self.record_mut(id) else {
            return;
        };
        assert!(
            rec.state.is_suspended(),
            "module {id:?} resumed while {:?}",
            rec.state
        );
        rec.state = State::Active;
        let parked = core::mem::take(&mut rec.parked);
        trace!(module = ?id, "resume");
        self.fire(id, Edge::Resume);
        for delivery in parked {
            self.deliver(id, delivery);
        }
    }

    /// Tear a module and its subtree down.
    ///
    /// Unregisters the module from its parent, runs the handler's and the
    /// router's teardown hooks, tears down every child, and frees the record.
    /// A module that was never activated is simply discarded. Calling this on
    /// a stale or already torn down id does nothing.
    pub fn deactivate(&mut self, id: ModuleId) {
        let Some(rec) = self.record_mut(id) else {
            return;
        };
        if !rec.activated {
            self.free(id);
            return;
        }
        let Some(next) = rec.state.apply(Edge::Deactivate) else {
            return;
        };
        rec.state = next;
        let parent = rec.parent.take();
        if let Some(parent) = parent
            && let Some(prec) = self.record_mut(parent)
            && let Some(kind) = prec.children.kind_of(id)
        {
            prec.children.remove(&kind);
            prec.ledger.forget(&kind);
        }
        trace!(module = ?id, "deactivate");
        self.fire(id, Edge::Deactivate);
    }

    /// Run the side effects of an edge whose state change was already applied.
    fn fire(&mut self, id: ModuleId, edge: Edge) {
        let Some(rec) = self.record(id) else {
            return;
        };
        if rec.busy {
            trace!(module = ?id, ?edge, "hooks deferred");
            self.jobs.push_back(Job::Edge(id, edge));
            return;
        }
        self.depth += 1;
        self.callback(id, |tree| {
            if edge == Edge::Activate {
                tree.build_tab_slots(id);
            }
            for component in edge.hook_order() {
                trace!(module = ?id, ?edge, ?component, "hook");
                match component {
                    Component::Router => {
                        tree.call_router(id, |router, cx| router_hook(router, edge, cx));
                    }
                    Component::Handler => {
                        tree.call_handler(id, |handler, cx| handler_hook(handler, edge, cx));
                    }
                }
            }
        });
        if edge == Edge::Deactivate {
            self.detach_all(id);
            if let Some(rec) = self.record_mut(id) {
                rec.stack = None;
                rec.substituted = None;
            }
            self.free(id);
        }
        self.depth -= 1;
        self.drain();
    }

    fn build_tab_slots(&mut self, id: ModuleId) {
        let Some(tabs) = self.record(id).and_then(|r| r.tabs.as_ref()) else {
            return;
        };
        let container = tabs.container.clone();
        let kinds = tabs.slots.kinds().to_vec();
        let mut surfaces = Vec::with_capacity(kinds.len());
        for kind in kinds {
            let child = match self.resolve_or_build(id, kind) {
                Ok(child) => child,
                Err(reason) => {
                    debug!(module = ?id, ?kind, %reason, "tab slot skipped");
                    continue;
                }
            };
            self.deliver(child, Delivery::Display(None));
            let upper = self
                .record(child)
                .and_then(|r| r.upper_surface().cloned());
            let surface = match upper {
                Some(surface) => surface,
                None => {
                    let placeholder = self.toolkit.placeholder();
                    if let Some(rec) = self.record_mut(child) {
                        rec.substituted = Some(placeholder.clone());
                    }
                    placeholder
                }
            };
            if let Some(rec) = self.record_mut(id) {
                rec.ledger.record(kind, Transition::Permanent);
            }
            surfaces.push(surface);
        }
        debug!(module = ?id, slots = surfaces.len(), "tabs installed");
        self.toolkit.install_tabs(&container, &surfaces);
    }

    // --- callbacks ---

    /// Mark `id` busy for the duration of `f`, then run whatever was deferred
    /// if this was the outermost callback.
    fn callback<R>(&mut self, id: ModuleId, f: impl FnOnce(&mut Self) -> R) -> Option<R> {
        let rec = self.record_mut(id)?;
        if rec.busy {
            return None;
        }
        rec.busy = true;
        self.depth += 1;
        let out = f(self);
        self.depth -= 1;
        if let Some(rec) = self.record_mut(id) {
            rec.busy = false;
        }
        self.drain();
        Some(out)
    }

    pub(crate) fn call_handler<R>(
        &mut self,
        id: ModuleId,
        f: impl FnOnce(&mut Box<dyn Handler<D>>, &mut Context<'_, D>) -> R,
    ) -> Option<R> {
        let mut handler = self.record_mut(id)?.handler.take()?;
        let out = f(&mut handler, &mut Context::new(self, id));
        if let Some(rec) = self.record_mut(id) {
            rec.handler = Some(handler);
        }
        Some(out)
    }

    fn call_router<R>(
        &mut self,
        id: ModuleId,
        f: impl FnOnce(&mut Box<dyn Router<D>>, &mut Context<'_, D>) -> R,
    ) -> Option<R> {
        let mut router = self.record_mut(id)?.router.take()?;
        let out = f(&mut router, &mut Context::new(self, id));
        if let Some(rec) = self.record_mut(id) {
            rec.router = Some(router);
        }
        Some(out)
    }

    /// Hand `delivery` to the handler of `id`, now or once it is free.
    pub(crate) fn deliver(&mut self, id: ModuleId, delivery: Delivery<D>) {
        let Some(rec) = self.record(id) else {
            return;
        };
        if rec.busy {
            trace!(module = ?id, "delivery deferred");
            self.jobs.push_back(Job::Deliver(id, delivery));
            return;
        }
        if rec.state.is_suspended() && delivery.parks_while_suspended() {
            trace!(module = ?id, "delivery parked until resume");
            if let Some(rec) = self.record_mut(id) {
                rec.parked.push(delivery);
            }
            return;
        }
        if !delivery.accepted_in(rec.state) {
            debug!(module = ?id, state = ?rec.state, "delivery dropped");
            return;
        }
        self.callback(id, move |tree| {
            tree.call_handler(id, move |handler, cx| delivery.dispatch(handler, cx));
        });
    }

    /// Like [`ModuleTree::deliver`], but queued behind the pending callbacks
    /// of `after` while `after` is busy.
    pub(crate) fn deliver_after(&mut self, after: ModuleId, id: ModuleId, delivery: Delivery<D>) {
        if self.record(after).is_some_and(|r| r.busy) {
            self.jobs.push_back(Job::Deliver(id, delivery));
        } else {
            self.deliver(id, delivery);
        }
    }

    /// Run [`ModuleTree::route`] for `parent` once its router is back.
    pub(crate) fn defer_route(
        &mut self,
        parent: ModuleId,
        kind: D::Kind,
        input: Option<D::Message>,
        animated: bool,
    ) {
        trace!(module = ?parent, ?kind, "route deferred");
        self.jobs.push_back(Job::Route(parent, kind, input, animated));
    }

    fn drain(&mut self) {
        if self.depth > 0 || self.draining {
            return;
        }
        self.draining = true;
        while let Some(job) = self.jobs.pop_front() {
            match job {
                Job::Edge(id, edge) => self.fire(id, edge),
                Job::Deliver(id, delivery) => self.deliver(id, delivery),
                Job::Route(id, kind, input, animated) => {
                    let _ = self.route(id, kind, input, animated);
                }
            }
        }
        self.draining = false;
    }

    /// Make a business call on the handler of an active module.
    ///
    /// Returns `None` if the module is not active, is running another
    /// callback, or its handler is not an `H`.
    pub fn interact<H: Handler<D>, R>(
        &mut self,
        id: ModuleId,
        f: impl FnOnce(&mut H, &mut Context<'_, D>) -> R,
    ) -> Option<R> {
        let rec = self.record(id)?;
        if !rec.state.is_active() {
            debug!(module = ?id, state = ?rec.state, "business call refused");
            return None;
        }
        self.callback(id, |tree| {
            tree.call_handler(id, |handler, cx| {
                let any: &mut (dyn Any + 'static) = &mut **handler;
                any.downcast_mut::<H>().map(|h| f(h, cx))
            })
        })
        .flatten()
        .flatten()
    }

    // --- registry ---

    /// Return the live child of `kind`, building and activating it first if
    /// needed.
    ///
    /// A suspended child is resumed instead of rebuilt.
    pub fn resolve_or_build(
        &mut self,
        parent: ModuleId,
        kind: D::Kind,
    ) -> Result<ModuleId, Declined> {
        let rec = self.record_mut(parent).ok_or(Declined::Dead)?;
        if let Some(child) = rec.children.get(&kind) {
            if self.state(child).is_some_and(State::is_suspended) {
                self.resume(child);
            }
            return Ok(child);
        }
        let mut builder = rec.builder.take().ok_or(Declined::NoBuilder)?;
        let module = builder.build(kind);
        if let Some(rec) = self.record_mut(parent) {
            rec.builder = Some(builder);
        }
        let child = self.alloc(Some(parent), module);
        if let Some(rec) = self.record_mut(parent) {
            rec.children.insert(kind, child);
        }
        debug!(parent = ?parent, child = ?child, ?kind, "built");
        self.activate(child);
        Ok(child)
    }

    /// Hide the child of `kind`: suspend it if `keep_loaded`, else tear it
    /// down and unregister it.
    ///
    /// A pushed or presented child is popped or dismissed first, without
    /// animation, so the next display of its kind attaches it again. The
    /// parent is not notified.
    pub fn detach(&mut self, parent: ModuleId, kind: D::Kind, keep_loaded: bool) -> Routed {
        let rec = self.record(parent).ok_or(Declined::Dead)?;
        let child = rec.children.get(&kind).ok_or(Declined::NotRegistered)?;
        debug!(parent = ?parent, child = ?child, ?kind, keep_loaded, "detach");
        self.invert(parent, kind, child, false);
        if keep_loaded {
            self.suspend(child);
        } else {
            self.deactivate(child);
        }
        Ok(())
    }

    /// Tear down every child of `parent`, suspended ones included.
    pub fn detach_all(&mut self, parent: ModuleId) {
        let Some(rec) = self.record_mut(parent) else {
            return;
        };
        let children = rec.children.take_all();
        rec.ledger.clear();
        for (kind, child) in children {
            debug!(parent = ?parent, child = ?child, ?kind, "detach");
            self.deactivate(child);
        }
    }
}

fn router_hook<D: Domain>(router: &mut Box<dyn Router<D>>, edge: Edge, cx: &mut Context<'_, D>) {
    match edge {
        Edge::Activate => router.did_activate(cx),
        Edge::Suspend => router.will_suspend(cx),
        Edge::Resume => router.did_resume(cx),
        Edge::Deactivate => router.will_deactivate(cx),
    }
}

fn handler_hook<D: Domain>(
    handler: &mut Box<dyn Handler<D>>,
    edge: Edge,
    cx: &mut Context<'_, D>,
) {
    match edge {
        Edge::Activate => handler.did_activate(cx),
        Edge::Suspend => handler.will_suspend(cx),
        Edge::Resume => handler.did_resume(cx),
        Edge::Deactivate => handler.will_deactivate(cx),
    }
}
