// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The view of the tree a module gets inside its callbacks.

use trellis_lifecycle::{State, Transition};

use crate::error::{Declined, Routed};
use crate::module::Domain;
use crate::tree::ModuleTree;
use crate::types::ModuleId;

/// A [`ModuleTree`] bound to the module whose callback is running.
///
/// Every routing method acts on behalf of that module: `push`, `present`,
/// `select`, and `route` display one of its children; `complete` finishes the
/// module itself. The whole tree stays reachable through
/// [`Context::tree_mut`].
pub struct Context<'a, D: Domain> {
    tree: &'a mut ModuleTree<D>,
    module: ModuleId,
}

impl<D: Domain> core::fmt::Debug for Context<'_, D> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Context")
            .field("module", &self.module)
            .finish_non_exhaustive()
    }
}

impl<'a, D: Domain> Context<'a, D> {
    pub(crate) fn new(tree: &'a mut ModuleTree<D>, module: ModuleId) -> Self {
        Self { tree, module }
    }

    /// The module this context acts for.
    pub fn module(&self) -> ModuleId {
        self.module
    }

    /// The whole tree, read-only.
    pub fn tree(&self) -> &ModuleTree<D> {
        &*self.tree
    }

    /// The whole tree.
    pub fn tree_mut(&mut self) -> &mut ModuleTree<D> {
        &mut *self.tree
    }

    /// The toolkit the tree drives.
    pub fn toolkit_mut(&mut self) -> &mut D::Toolkit {
        self.tree.toolkit_mut()
    }

    /// Current state of this module.
    pub fn state(&self) -> State {
        self.tree.state(self.module).unwrap_or_default()
    }

    /// This module's parent.
    pub fn parent(&self) -> Option<ModuleId> {
        self.tree.parent(self.module)
    }

    /// The kind this module is registered under in its parent.
    pub fn kind(&self) -> Option<D::Kind> {
        self.tree.kind_of(self.module)
    }

    /// This module's live child of `kind`.
    pub fn child(&self, kind: D::Kind) -> Option<ModuleId> {
        self.tree.child(self.module, kind)
    }

    /// State of the child of `kind`; [`State::Inactive`] if there is none.
    pub fn child_state(&self, kind: D::Kind) -> State {
        self.tree.child_state(self.module, kind)
    }

    /// How the child of `kind` is currently shown.
    pub fn transition_of(&self, kind: D::Kind) -> Option<Transition> {
        self.tree.transition_of(self.module, kind)
    }

    /// See [`ModuleTree::push`].
    pub fn push(&mut self, kind: D::Kind, input: Option<D::Message>, animated: bool) -> Routed {
        self.tree.push(self.module, kind, input, animated)
    }

    /// See [`ModuleTree::present`].
    pub fn present(&mut self, kind: D::Kind, input: Option<D::Message>, animated: bool) -> Routed {
        self.tree.present(self.module, kind, input, animated)
    }

    /// See [`ModuleTree::select`].
    pub fn select(&mut self, kind: D::Kind, input: Option<D::Message>) -> Routed {
        self.tree.select(self.module, kind, input)
    }

    /// See [`ModuleTree::route`].
    pub fn route(&mut self, kind: D::Kind, input: Option<D::Message>, animated: bool) -> Routed {
        self.tree.route(self.module, kind, input, animated)
    }

    /// Finish this module. See [`ModuleTree::complete`].
    ///
    /// Called from the module's own callback, the surface is hidden at once;
    /// the teardown hooks and the parent's notification follow when the
    /// callback returns.
    pub fn complete(&mut self, output: Option<D::Message>, animated: bool, keep_loaded: bool) -> Routed {
        self.tree.complete(self.module, output, animated, keep_loaded)
    }

    /// See [`ModuleTree::detach`].
    pub fn detach(&mut self, kind: D::Kind, keep_loaded: bool) -> Routed {
        self.tree.detach(self.module, kind, keep_loaded)
    }

    /// See [`ModuleTree::pass_to_child`].
    pub fn pass_to_child(&mut self, kind: D::Kind, message: D::Message) -> Routed {
        self.tree.pass_to_child(self.module, kind, message)
    }

    /// See [`ModuleTree::pass_to_parent`].
    pub fn pass_to_parent(&mut self, message: D::Message) -> Routed {
        self.tree.pass_to_parent(self.module, message)
    }

    /// See [`ModuleTree::on_dismissed`]; registers for the child of `kind`.
    pub fn on_child_dismissed(&mut self, kind: D::Kind, f: impl FnOnce() + 'static) -> Routed {
        let child = self.child(kind).ok_or(Declined::NotRegistered)?;
        self.tree.on_dismissed(child, f)
    }
}
