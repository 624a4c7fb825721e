// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Navigation basics.
//!
//! A mail inbox owns a stack. It pushes a thread, the thread presents a reply
//! sheet, and both complete again. The console toolkit prints every visual
//! operation the tree asks for; handlers log their lifecycle through `tracing`.
//!
//! Run:
//! - `cargo run -p trellis_demos --example navigation_basics`
//! - `RUST_LOG=trellis_tree=debug cargo run -p trellis_demos --example navigation_basics`

use tracing::info;
use trellis_tree::{Context, Declined, Domain, Handler, Module, ModuleTree, Route, Toolkit};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Screen {
    Thread,
    Reply,
}

/// Prints toolkit calls instead of drawing.
#[derive(Default)]
struct Console {
    placeholders: u32,
}

impl Toolkit for Console {
    type Surface = String;

    fn show_root(&mut self, window: &String, surface: &String) {
        println!("  [ui] show {surface} in {window}");
    }

    fn push(&mut self, stack: &String, surface: &String, animated: bool) {
        println!("  [ui] push {surface} onto {stack} (animated: {animated})");
    }

    fn pop(&mut self, stack: &String, surface: &String, animated: bool) {
        println!("  [ui] pop {stack} down through {surface} (animated: {animated})");
    }

    fn present(&mut self, host: &String, surface: &String, animated: bool) {
        println!("  [ui] present {surface} over {host} (animated: {animated})");
    }

    fn dismiss(&mut self, surface: &String, animated: bool) {
        println!("  [ui] dismiss {surface} (animated: {animated})");
    }

    fn install_tabs(&mut self, tabs: &String, slots: &[String]) {
        println!("  [ui] install {slots:?} into {tabs}");
    }

    fn select_tab(&mut self, tabs: &String, index: usize) {
        println!("  [ui] select tab {index} of {tabs}");
    }

    fn placeholder(&mut self) -> String {
        self.placeholders += 1;
        format!("blank-{}", self.placeholders)
    }
}

struct Mail;

impl Domain for Mail {
    type Kind = Screen;
    type Message = String;
    type Toolkit = Console;
}

/// Logs what it hears under a fixed name.
struct Screenlet {
    name: &'static str,
}

impl Handler<Mail> for Screenlet {
    fn did_activate(&mut self, _cx: &mut Context<'_, Mail>) {
        info!(module = self.name, "activated");
    }

    fn will_suspend(&mut self, _cx: &mut Context<'_, Mail>) {
        info!(module = self.name, "suspending");
    }

    fn did_resume(&mut self, _cx: &mut Context<'_, Mail>) {
        info!(module = self.name, "resumed");
    }

    fn will_deactivate(&mut self, _cx: &mut Context<'_, Mail>) {
        info!(module = self.name, "deactivating");
    }

    fn will_display(&mut self, _cx: &mut Context<'_, Mail>, input: Option<String>) {
        info!(module = self.name, ?input, "about to display");
    }

    fn child_did_complete(
        &mut self,
        _cx: &mut Context<'_, Mail>,
        kind: Screen,
        output: Option<String>,
    ) {
        info!(module = self.name, ?kind, ?output, "child completed");
    }
}

fn inbox_children(kind: Screen) -> Module<Mail> {
    match kind {
        Screen::Thread => Module::new(Screenlet { name: "thread" }, Route::Present)
            .with_surface("thread".into())
            .with_builder(thread_children),
        Screen::Reply => reply(),
    }
}

fn thread_children(kind: Screen) -> Module<Mail> {
    match kind {
        Screen::Reply => reply(),
        Screen::Thread => Module::new(Screenlet { name: "nested thread" }, ())
            .with_surface("nested-thread".into()),
    }
}

fn reply() -> Module<Mail> {
    Module::new(Screenlet { name: "reply" }, ()).with_surface("reply".into())
}

fn main() -> Result<(), Declined> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .init();

    let mut tree: ModuleTree<Mail> = ModuleTree::new(Console::default());
    let inbox = tree.insert(
        Module::new(Screenlet { name: "inbox" }, Route::Push)
            .with_surface("inbox".into())
            .with_stack("mail-stack".into())
            .with_builder(inbox_children),
    );

    println!("== Launch ==");
    tree.launch(inbox, "window".into())?;

    println!("== Open a thread (inbox pushes) ==");
    tree.route(inbox, Screen::Thread, Some("message 42".into()), true)?;
    let thread = tree.child(inbox, Screen::Thread).ok_or(Declined::NotRegistered)?;

    println!("== Reply (thread presents) ==");
    tree.route(thread, Screen::Reply, Some("Re: hello".into()), true)?;
    let reply = tree.child(thread, Screen::Reply).ok_or(Declined::NotRegistered)?;

    println!("== Send the reply ==");
    tree.complete(reply, Some("sent".into()), true, false)?;
    println!("reply is {:?}", tree.child_state(thread, Screen::Reply));

    println!("== Back to the inbox, keeping the thread loaded ==");
    tree.complete(thread, None, true, true)?;
    println!("thread is {:?}", tree.child_state(inbox, Screen::Thread));

    println!("== Reopen the thread ==");
    tree.route(inbox, Screen::Thread, Some("message 42".into()), true)?;
    println!("thread is {:?}", tree.child_state(inbox, Screen::Thread));

    println!("== Close it for good ==");
    tree.complete(thread, None, false, false)?;
    println!(
        "thread is {:?}, {} module(s) left",
        tree.child_state(inbox, Screen::Thread),
        tree.len()
    );
    Ok(())
}
