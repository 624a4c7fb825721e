// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Module components: the domain binding, handler and router traits, and the
//! bundle a builder returns.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::any::Any;
use core::fmt::Debug;

use crate::context::Context;
use crate::toolkit::Toolkit;
use crate::types::Route;

/// Binds the caller's types to a [`ModuleTree`](crate::ModuleTree).
///
/// ```
/// use trellis_tree::{Domain, Toolkit};
///
/// #[derive(Copy, Clone, Debug, Eq, PartialEq)]
/// enum Screen { Feed, Settings }
///
/// struct Headless;
///
/// impl Toolkit for Headless {
///     type Surface = u32;
///     fn show_root(&mut self, _: &u32, _: &u32) {}
///     fn push(&mut self, _: &u32, _: &u32, _: bool) {}
///     fn pop(&mut self, _: &u32, _: &u32, _: bool) {}
///     fn present(&mut self, _: &u32, _: &u32, _: bool) {}
///     fn dismiss(&mut self, _: &u32, _: bool) {}
///     fn install_tabs(&mut self, _: &u32, _: &[u32]) {}
///     fn select_tab(&mut self, _: &u32, _: usize) {}
///     fn placeholder(&mut self) -> u32 { 0 }
/// }
///
/// struct App;
///
/// impl Domain for App {
///     type Kind = Screen;
///     type Message = String;
///     type Toolkit = Headless;
/// }
/// ```
pub trait Domain: Sized + 'static {
    /// Closed set of child kinds a parent can build.
    type Kind: Copy + Eq + Debug + 'static;
    /// Payload of pre-display input, live passes, and completion output.
    type Message: 'static;
    /// The UI toolkit that owns the surfaces.
    type Toolkit: Toolkit;
}

/// Surface handle type of a domain's toolkit.
pub type Surface<D> = <<D as Domain>::Toolkit as Toolkit>::Surface;

/// Business logic of a module.
///
/// Every method has an empty default, so a handler only implements the hooks
/// it cares about. Each call receives a [`Context`] bound to the module, through
/// which the handler can route, pass messages, or complete.
///
/// Business calls from outside the tree go through
/// [`ModuleTree::interact`](crate::ModuleTree::interact), which only reaches
/// the handler while the module is active.
pub trait Handler<D: Domain>: Any {
    /// The module was activated for the first time.
    fn did_activate(&mut self, cx: &mut Context<'_, D>) {
        let _ = cx;
    }

    /// The module is about to be hidden while staying loaded.
    fn will_suspend(&mut self, cx: &mut Context<'_, D>) {
        let _ = cx;
    }

    /// The module was brought back from suspension.
    fn did_resume(&mut self, cx: &mut Context<'_, D>) {
        let _ = cx;
    }

    /// The module is about to be torn down.
    fn will_deactivate(&mut self, cx: &mut Context<'_, D>) {
        let _ = cx;
    }

    /// Pre-display input, delivered once per display operation right before
    /// the surface is attached.
    fn will_display(&mut self, cx: &mut Context<'_, D>, input: Option<D::Message>) {
        let _ = (cx, input);
    }

    /// Live message from the parent.
    fn parent_did_pass(&mut self, cx: &mut Context<'_, D>, message: D::Message) {
        let _ = (cx, message);
    }

    /// Live message from the child of `kind`.
    fn child_did_pass(&mut self, cx: &mut Context<'_, D>, kind: D::Kind, message: D::Message) {
        let _ = (cx, kind, message);
    }

    /// The child of `kind` completed, after it was hidden and suspended or torn down.
    fn child_did_complete(
        &mut self,
        cx: &mut Context<'_, D>,
        kind: D::Kind,
        output: Option<D::Message>,
    ) {
        let _ = (cx, kind, output);
    }
}

/// A handler with no behavior.
impl<D: Domain> Handler<D> for () {}

/// Navigation decisions of a module.
///
/// Lifecycle hooks mirror the handler's. On opening edges the router hears
/// first; on closing edges it hears last.
pub trait Router<D: Domain> {
    /// The module was activated for the first time.
    fn did_activate(&mut self, cx: &mut Context<'_, D>) {
        let _ = cx;
    }

    /// The module is about to be hidden while staying loaded.
    fn will_suspend(&mut self, cx: &mut Context<'_, D>) {
        let _ = cx;
    }

    /// The module was brought back from suspension.
    fn did_resume(&mut self, cx: &mut Context<'_, D>) {
        let _ = cx;
    }

    /// The module is about to be torn down.
    fn will_deactivate(&mut self, cx: &mut Context<'_, D>) {
        let _ = cx;
    }

    /// How [`ModuleTree::route`](crate::ModuleTree::route) should display a
    /// child of `kind`.
    fn preferred_route(&self, kind: D::Kind) -> Route {
        let _ = kind;
        Route::Present
    }
}

/// A router that presents every child.
impl<D: Domain> Router<D> for () {}

/// A router that prefers the same route for every child.
impl<D: Domain> Router<D> for Route {
    fn preferred_route(&self, _kind: D::Kind) -> Route {
        *self
    }
}

/// Factory for a parent's children.
///
/// Builders construct fresh modules and nothing else; the tree activates,
/// registers, and displays what they return. Closures taking a kind and
/// returning a [`Module`] are builders.
pub trait Builder<D: Domain> {
    /// Build a fresh module for `kind`.
    fn build(&mut self, kind: D::Kind) -> Module<D>;
}

impl<D: Domain, F: FnMut(D::Kind) -> Module<D>> Builder<D> for F {
    fn build(&mut self, kind: D::Kind) -> Module<D> {
        self(kind)
    }
}

/// A module ready to be inserted into a tree.
///
/// ```
/// # use trellis_tree::{Domain, Toolkit};
/// # #[derive(Copy, Clone, Debug, Eq, PartialEq)]
/// # enum Screen { Feed, Settings }
/// # struct Headless;
/// # impl Toolkit for Headless {
/// #     type Surface = u32;
/// #     fn show_root(&mut self, _: &u32, _: &u32) {}
/// #     fn push(&mut self, _: &u32, _: &u32, _: bool) {}
/// #     fn pop(&mut self, _: &u32, _: &u32, _: bool) {}
/// #     fn present(&mut self, _: &u32, _: &u32, _: bool) {}
/// #     fn dismiss(&mut self, _: &u32, _: bool) {}
/// #     fn install_tabs(&mut self, _: &u32, _: &[u32]) {}
/// #     fn select_tab(&mut self, _: &u32, _: usize) {}
/// #     fn placeholder(&mut self) -> u32 { 0 }
/// # }
/// # struct App;
/// # impl Domain for App { type Kind = Screen; type Message = String; type Toolkit = Headless; }
/// use trellis_tree::{Module, Route};
///
/// let home: Module<App> = Module::new((), Route::Push)
///     .with_surface(1)
///     .with_tabs(2, [Screen::Feed, Screen::Settings])
///     .with_builder(|kind: Screen| -> Module<App> {
///         match kind {
///             Screen::Feed => Module::new((), ()).with_surface(10),
///             Screen::Settings => Module::new((), ()),
///         }
///     });
/// assert!(home.has_builder());
/// ```
pub struct Module<D: Domain> {
    pub(crate) handler: Box<dyn Handler<D>>,
    pub(crate) router: Box<dyn Router<D>>,
    pub(crate) surface: Option<Surface<D>>,
    pub(crate) builder: Option<Box<dyn Builder<D>>>,
    pub(crate) stack: Option<Surface<D>>,
    pub(crate) tabs: Option<(Surface<D>, Vec<D::Kind>)>,
}

impl<D: Domain> Module<D> {
    /// A headless module with no children.
    pub fn new(handler: impl Handler<D>, router: impl Router<D> + 'static) -> Self {
        Self {
            handler: Box::new(handler),
            router: Box::new(router),
            surface: None,
            builder: None,
            stack: None,
            tabs: None,
        }
    }

    /// Give the module its own visual surface.
    #[must_use]
    pub fn with_surface(mut self, surface: Surface<D>) -> Self {
        self.surface = Some(surface);
        self
    }

    /// Let the module build children of its domain's kinds.
    #[must_use]
    pub fn with_builder(mut self, builder: impl Builder<D> + 'static) -> Self {
        self.builder = Some(Box::new(builder));
        self
    }

    /// Establish a stack container owned by this module.
    ///
    /// On insertion the module's own surface becomes the stack's root.
    #[must_use]
    pub fn with_stack(mut self, stack: Surface<D>) -> Self {
        self.stack = Some(stack);
        self
    }

    /// Own a tab container with the given slots, built when the module activates.
    ///
    /// Duplicate kinds are dropped, keeping the first occurrence. Slots are
    /// only built if the module also has a builder.
    #[must_use]
    pub fn with_tabs(mut self, tabs: Surface<D>, slots: impl IntoIterator<Item = D::Kind>) -> Self {
        self.tabs = Some((tabs, slots.into_iter().collect()));
        self
    }

    /// True if a builder is configured.
    pub fn has_builder(&self) -> bool {
        self.builder.is_some()
    }
}

impl<D: Domain> Debug for Module<D> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Module")
            .field("surface", &self.surface)
            .field("builder", &self.builder.is_some())
            .field("stack", &self.stack)
            .field("tabs", &self.tabs)
            .finish_non_exhaustive()
    }
}
