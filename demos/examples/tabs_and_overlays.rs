// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tabs and overlays.
//!
//! A shell module owns a tab container with three slots. The account slot is
//! headless, so the toolkit hands out a blank placeholder for it, and the
//! sign-in sheet it presents lands over that placeholder. The home slot counts
//! unread items and reports them to the shell as live messages.
//!
//! Run:
//! - `cargo run -p trellis_demos --example tabs_and_overlays`
//! - `RUST_LOG=trellis_tree=trace cargo run -p trellis_demos --example tabs_and_overlays`

use tracing::info;
use trellis_tree::{Context, Declined, Domain, Handler, Module, ModuleTree, Route, Toolkit};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Tab {
    Home,
    Search,
    Account,
    SignIn,
}

#[derive(Default)]
struct Console {
    placeholders: u32,
}

impl Toolkit for Console {
    type Surface = String;

    fn show_root(&mut self, window: &String, surface: &String) {
        println!("  [ui] show {surface} in {window}");
    }

    fn push(&mut self, stack: &String, surface: &String, _animated: bool) {
        println!("  [ui] push {surface} onto {stack}");
    }

    fn pop(&mut self, stack: &String, surface: &String, _animated: bool) {
        println!("  [ui] pop {stack} down through {surface}");
    }

    fn present(&mut self, host: &String, surface: &String, _animated: bool) {
        println!("  [ui] present {surface} over {host}");
    }

    fn dismiss(&mut self, surface: &String, _animated: bool) {
        println!("  [ui] dismiss {surface}");
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

struct Shop;

impl Domain for Shop {
    type Kind = Tab;
    type Message = String;
    type Toolkit = Console;
}

/// Shows the unread badge its home tab reports.
#[derive(Default)]
struct Shell {
    badge: Option<String>,
}

impl Handler<Shop> for Shell {
    fn child_did_pass(&mut self, _cx: &mut Context<'_, Shop>, kind: Tab, message: String) {
        info!(?kind, %message, "badge update");
        self.badge = Some(message);
    }

    fn child_did_complete(&mut self, _cx: &mut Context<'_, Shop>, kind: Tab, output: Option<String>) {
        info!(?kind, ?output, "tab completed");
    }
}

struct Home {
    unread: u32,
}

impl Home {
    fn report(&self, cx: &mut Context<'_, Shop>) {
        if let Err(reason) = cx.pass_to_parent(format!("{} unread", self.unread)) {
            info!(%reason, "badge not delivered");
        }
    }
}

impl Handler<Shop> for Home {
    fn did_activate(&mut self, cx: &mut Context<'_, Shop>) {
        self.report(cx);
    }

    fn parent_did_pass(&mut self, cx: &mut Context<'_, Shop>, message: String) {
        info!(%message, "home heard");
        self.unread = 0;
        self.report(cx);
    }
}

/// Headless; presents the sign-in sheet when asked.
#[derive(Default)]
struct Account {
    user: Option<String>,
}

impl Handler<Shop> for Account {
    fn child_did_complete(&mut self, _cx: &mut Context<'_, Shop>, _kind: Tab, output: Option<String>) {
        info!(?output, "signed in");
        self.user = output;
    }
}

fn shell_children(kind: Tab) -> Module<Shop> {
    match kind {
        Tab::Home => Module::new(Home { unread: 3 }, ()).with_surface("home".into()),
        Tab::Search => Module::new((), ()).with_surface("search".into()),
        Tab::Account => Module::new(Account::default(), Route::Present).with_builder(account_children),
        Tab::SignIn => sign_in(),
    }
}

fn account_children(kind: Tab) -> Module<Shop> {
    match kind {
        Tab::SignIn => sign_in(),
        other => Module::new((), ()).with_surface(format!("{other:?}").to_lowercase()),
    }
}

fn sign_in() -> Module<Shop> {
    Module::new((), ()).with_surface("sign-in".into())
}

fn main() -> Result<(), Declined> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .init();

    let mut tree: ModuleTree<Shop> = ModuleTree::new(Console::default());
    let shell = tree.insert(
        Module::new(Shell::default(), Route::Select)
            .with_tabs("tabs".into(), [Tab::Home, Tab::Search, Tab::Account])
            .with_builder(shell_children),
    );

    println!("== Launch: slots are built before the shell's own hooks ==");
    tree.launch(shell, "window".into())?;
    for (kind, child) in tree.children(shell) {
        println!("{kind:?}: {:?} shown as {:?}", tree.state(child), tree.host_surface(child));
    }

    println!("== Select Home with input: delivered as a live pass ==");
    tree.route(shell, Tab::Home, Some("mark all read".into()), false)?;
    let badge = tree.interact(shell, |shell: &mut Shell, _| shell.badge.clone());
    println!("badge: {badge:?}");

    println!("== Select a kind that is not a slot ==");
    if let Err(reason) = tree.select(shell, Tab::SignIn, None) {
        println!("declined: {reason}");
    }

    println!("== Account presents sign-in over its placeholder ==");
    tree.select(shell, Tab::Account, None)?;
    let account = tree.child(shell, Tab::Account).ok_or(Declined::NotRegistered)?;
    tree.interact(account, |_: &mut Account, cx| cx.present(Tab::SignIn, None, true))
        .ok_or(Declined::Inactive)??;
    tree.interact(account, |_: &mut Account, cx| {
        cx.on_child_dismissed(Tab::SignIn, || println!("sign-in sheet is gone"))
    })
    .ok_or(Declined::Inactive)??;

    let sign_in = tree.child(account, Tab::SignIn).ok_or(Declined::NotRegistered)?;
    tree.complete(sign_in, Some("ada".into()), true, false)?;
    let user = tree.interact(account, |account: &mut Account, _| account.user.clone());
    println!("account user: {user:?}");

    println!("== Tabs are permanent ==");
    let home = tree.child(shell, Tab::Home).ok_or(Declined::NotRegistered)?;
    if let Err(reason) = tree.complete(home, None, false, false) {
        println!("declined: {reason}");
    }
    Ok(())
}
