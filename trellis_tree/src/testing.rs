// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Test doubles: a recording toolkit and journaling handlers and routers.

use alloc::format;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::RefCell;

use crate::{Builder, Context, Domain, Handler, Module, Route, Router, Toolkit};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum Screen {
    Feed,
    Settings,
    Profile,
    Detail,
}

impl Screen {
    fn name(self) -> &'static str {
        match self {
            Self::Feed => "Feed",
            Self::Settings => "Settings",
            Self::Profile => "Profile",
            Self::Detail => "Detail",
        }
    }
}

#[derive(Debug)]
pub(crate) struct App;

impl Domain for App {
    type Kind = Screen;
    type Message = &'static str;
    type Toolkit = Recorder;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Op {
    ShowRoot(u32, u32),
    Push(u32, u32),
    Pop(u32, u32),
    Present(u32, u32),
    Dismiss(u32),
    InstallTabs(u32, Vec<u32>),
    SelectTab(u32, usize),
}

/// Models stacks, overlays, and tab selection with `u32` surfaces.
#[derive(Debug, Default)]
pub(crate) struct Recorder {
    pub(crate) ops: Vec<Op>,
    pub(crate) roots: Vec<(u32, u32)>,
    pub(crate) overlays: Vec<(u32, u32)>,
    pub(crate) dismissed: Vec<u32>,
    stacks: Vec<(u32, Vec<u32>)>,
    selected: Vec<(u32, usize)>,
    placeholders: u32,
    journal: Option<Journal>,
}

impl Recorder {
    /// Also writes every op into `journal`, interleaved with the hooks.
    pub(crate) fn journaled(journal: &Journal) -> Self {
        Self {
            journal: Some(journal.clone()),
            ..Self::default()
        }
    }

    fn log(&mut self, op: Op) {
        if let Some(journal) = &self.journal {
            journal.push(format!("toolkit {op:?}"));
        }
        self.ops.push(op);
    }

    pub(crate) fn stack(&self, stack: u32) -> Vec<u32> {
        self.stacks
            .iter()
            .find(|(s, _)| *s == stack)
            .map(|(_, items)| items.clone())
            .unwrap_or_default()
    }

    pub(crate) fn selected(&self, tabs: u32) -> Option<usize> {
        self.selected
            .iter()
            .find(|(t, _)| *t == tabs)
            .map(|(_, i)| *i)
    }

    fn stack_mut(&mut self, stack: u32) -> &mut Vec<u32> {
        let pos = match self.stacks.iter().position(|(s, _)| *s == stack) {
            Some(pos) => pos,
            None => {
                self.stacks.push((stack, Vec::new()));
                self.stacks.len() - 1
            }
        };
        &mut self.stacks[pos].1
    }

    fn set_selected(&mut self, tabs: u32, index: usize) {
        self.selected.retain(|(t, _)| *t != tabs);
        self.selected.push((tabs, index));
    }
}

impl Toolkit for Recorder {
    type Surface = u32;

    fn show_root(&mut self, window: &u32, surface: &u32) {
        self.log(Op::ShowRoot(*window, *surface));
        self.roots.push((*window, *surface));
    }

    fn push(&mut self, stack: &u32, surface: &u32, _animated: bool) {
        self.log(Op::Push(*stack, *surface));
        self.stack_mut(*stack).push(*surface);
    }

    fn pop(&mut self, stack: &u32, surface: &u32, _animated: bool) {
        self.log(Op::Pop(*stack, *surface));
        let items = self.stack_mut(*stack);
        if let Some(pos) = items.iter().position(|s| s == surface) {
            items.truncate(pos);
        }
    }

    fn present(&mut self, host: &u32, surface: &u32, _animated: bool) {
        self.log(Op::Present(*host, *surface));
        self.overlays.push((*host, *surface));
    }

    fn dismiss(&mut self, surface: &u32, _animated: bool) {
        self.log(Op::Dismiss(*surface));
        self.dismissed.push(*surface);
        self.overlays.retain(|(_, s)| s != surface);
    }

    fn install_tabs(&mut self, tabs: &u32, slots: &[u32]) {
        self.log(Op::InstallTabs(*tabs, slots.to_vec()));
        self.set_selected(*tabs, 0);
    }

    fn select_tab(&mut self, tabs: &u32, index: usize) {
        self.log(Op::SelectTab(*tabs, index));
        self.set_selected(*tabs, index);
    }

    fn placeholder(&mut self) -> u32 {
        self.placeholders += 1;
        1000 + self.placeholders
    }
}

/// Shared, ordered log of everything handlers and routers heard.
#[derive(Clone, Debug, Default)]
pub(crate) struct Journal(Rc<RefCell<Vec<String>>>);

impl Journal {
    pub(crate) fn push(&self, event: impl Into<String>) {
        self.0.borrow_mut().push(event.into());
    }

    pub(crate) fn take(&self) -> Vec<String> {
        core::mem::take(&mut *self.0.borrow_mut())
    }

    pub(crate) fn count(&self, event: &str) -> usize {
        self.0.borrow().iter().filter(|e| *e == event).count()
    }
}

pub(crate) fn journal() -> Journal {
    Journal::default()
}

#[derive(Debug)]
pub(crate) struct Probe {
    pub(crate) name: &'static str,
    pub(crate) journal: Journal,
    greet_parent: bool,
}

impl Probe {
    fn new(name: &'static str, journal: &Journal, greet_parent: bool) -> Self {
        Self {
            name,
            journal: journal.clone(),
            greet_parent,
        }
    }

    fn note(&self, event: &str) {
        self.journal.push(format!("{} {event}", self.name));
    }
}

impl Handler<App> for Probe {
    fn did_activate(&mut self, cx: &mut Context<'_, App>) {
        self.note("did_activate");
        if self.greet_parent {
            let _ = cx.pass_to_parent("hello");
        }
    }

    fn will_suspend(&mut self, _cx: &mut Context<'_, App>) {
        self.note("will_suspend");
    }

    fn did_resume(&mut self, _cx: &mut Context<'_, App>) {
        self.note("did_resume");
    }

    fn will_deactivate(&mut self, _cx: &mut Context<'_, App>) {
        self.note("will_deactivate");
    }

    fn will_display(&mut self, _cx: &mut Context<'_, App>, input: Option<&'static str>) {
        self.note(&format!("will_display {}", input.unwrap_or("-")));
    }

    fn parent_did_pass(&mut self, _cx: &mut Context<'_, App>, message: &'static str) {
        self.note(&format!("parent_did_pass {message}"));
    }

    fn child_did_pass(&mut self, _cx: &mut Context<'_, App>, kind: Screen, message: &'static str) {
        self.note(&format!("child_did_pass {} {message}", kind.name()));
    }

    fn child_did_complete(
        &mut self,
        _cx: &mut Context<'_, App>,
        kind: Screen,
        output: Option<&'static str>,
    ) {
        self.note(&format!(
            "child_did_complete {} {}",
            kind.name(),
            output.unwrap_or("-")
        ));
    }
}

#[derive(Debug)]
struct ProbeRouter {
    name: &'static str,
    journal: Journal,
    route: Route,
}

impl ProbeRouter {
    fn new(name: &'static str, journal: &Journal, route: Route) -> Self {
        Self {
            name,
            journal: journal.clone(),
            route,
        }
    }

    fn note(&self, event: &str) {
        self.journal.push(format!("{} router {event}", self.name));
    }
}

impl Router<App> for ProbeRouter {
    fn did_activate(&mut self, _cx: &mut Context<'_, App>) {
        self.note("did_activate");
    }

    fn will_suspend(&mut self, _cx: &mut Context<'_, App>) {
        self.note("will_suspend");
    }

    fn did_resume(&mut self, _cx: &mut Context<'_, App>) {
        self.note("did_resume");
    }

    fn will_deactivate(&mut self, _cx: &mut Context<'_, App>) {
        self.note("will_deactivate");
    }

    fn preferred_route(&self, _kind: Screen) -> Route {
        self.route
    }
}

/// Builds Feed (10), Settings (11), and Detail (13) with surfaces, and a
/// headless Profile. Feed and Profile can build children of their own.
#[derive(Debug)]
struct Children {
    journal: Journal,
    greet: bool,
}

impl Children {
    fn nested(&self) -> Self {
        Self {
            journal: self.journal.clone(),
            greet: false,
        }
    }
}

impl Builder<App> for Children {
    fn build(&mut self, kind: Screen) -> Module<App> {
        self.journal.push(format!("build {}", kind.name()));
        let greet = self.greet && kind == Screen::Feed;
        let module = Module::new(
            Probe::new(kind.name(), &self.journal, greet),
            ProbeRouter::new(kind.name(), &self.journal, Route::Push),
        );
        match kind {
            Screen::Feed => module.with_surface(10).with_builder(self.nested()),
            Screen::Settings => module.with_surface(11),
            Screen::Detail => module.with_surface(13),
            Screen::Profile => module.with_builder(self.nested()),
        }
    }
}

/// "Root": surface 100 on its own stack 200, pushes children.
pub(crate) fn navigation_root(journal: &Journal) -> Module<App> {
    root_with(
        journal,
        Probe::new("Root", journal, false),
        ProbeRouter::new("Root", journal, Route::Push),
    )
}

/// Surface 100 on its own stack 200 with the usual children, driven by the
/// given handler and router.
pub(crate) fn root_with(
    journal: &Journal,
    handler: impl Handler<App>,
    router: impl Router<App> + 'static,
) -> Module<App> {
    Module::new(handler, router)
        .with_surface(100)
        .with_stack(200)
        .with_builder(Children {
            journal: journal.clone(),
            greet: false,
        })
}

/// "Tabs": tab container 300; its Feed greets the parent on activation.
pub(crate) fn tab_root(journal: &Journal, slots: impl IntoIterator<Item = Screen>) -> Module<App> {
    Module::new(
        Probe::new("Tabs", journal, false),
        ProbeRouter::new("Tabs", journal, Route::Select),
    )
    .with_tabs(300, slots)
    .with_builder(Children {
        journal: journal.clone(),
        greet: true,
    })
}

/// "Root": headless, presents children.
pub(crate) fn headless_root(journal: &Journal) -> Module<App> {
    Module::new(
        Probe::new("Root", journal, false),
        ProbeRouter::new("Root", journal, Route::Present),
    )
    .with_builder(Children {
        journal: journal.clone(),
        greet: false,
    })
}
