// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The seam to the external UI toolkit.

use core::fmt::Debug;

/// Visual operations the tree asks of the UI toolkit.
///
/// The tree never renders anything. It treats every surface and container as
/// an opaque [`Toolkit::Surface`] handle, compares handles for identity, and
/// calls back into the toolkit to make them visible or hide them again.
///
/// Stack and tab containers are surfaces too: a module that owns a stack
/// shows the stack handle as its visible surface.
pub trait Toolkit {
    /// Opaque handle to a surface or container.
    type Surface: Clone + PartialEq + Debug;

    /// Show `surface` as the top-level content of `window`.
    fn show_root(&mut self, window: &Self::Surface, surface: &Self::Surface);

    /// Append `surface` to the top of `stack`.
    fn push(&mut self, stack: &Self::Surface, surface: &Self::Surface, animated: bool);

    /// Remove `surface` and everything above it from `stack`.
    fn pop(&mut self, stack: &Self::Surface, surface: &Self::Surface, animated: bool);

    /// Show `surface` as an overlay above `host`.
    fn present(&mut self, host: &Self::Surface, surface: &Self::Surface, animated: bool);

    /// Hide an overlay previously shown with [`Toolkit::present`].
    fn dismiss(&mut self, surface: &Self::Surface, animated: bool);

    /// Replace the slots of a tab container, selecting the first.
    fn install_tabs(&mut self, tabs: &Self::Surface, slots: &[Self::Surface]);

    /// Switch a tab container to the slot at `index`.
    fn select_tab(&mut self, tabs: &Self::Surface, index: usize);

    /// A blank surface for a headless tab slot.
    fn placeholder(&mut self) -> Self::Surface;
}
