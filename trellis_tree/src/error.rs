// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Why a routing or messaging operation did nothing.

/// The reason an operation was declined.
///
/// Declining is not a failure of the tree: the operation is a no-op and the
/// tree is unchanged. Callers that do not care may ignore the result.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, thiserror::Error)]
pub enum Declined {
    /// The id refers to a module that has been torn down.
    #[error("module is not alive")]
    Dead,
    /// The module (or its counterpart) is not active.
    #[error("module is not active")]
    Inactive,
    /// The module has no parent to report to.
    #[error("module has no parent")]
    Orphan,
    /// The module is not registered as a child of its parent.
    #[error("module is not registered with its parent")]
    NotRegistered,
    /// No container to attach the child to.
    #[error("no container to attach to")]
    NoContainer,
    /// The module owns no tab container.
    #[error("module owns no tabs")]
    NoTabs,
    /// The kind is not one of the tab slots.
    #[error("kind is not a tab slot")]
    NotATab,
    /// The module cannot build children.
    #[error("module has no builder")]
    NoBuilder,
    /// The child occupies a permanent tab slot.
    #[error("child is a permanent tab slot")]
    Permanent,
    /// The child is already visible through a recorded transition.
    #[error("child is already shown")]
    AlreadyShown,
    /// Configuration that is only allowed before activation.
    #[error("module was already activated")]
    AlreadyActivated,
}

/// Result of a routing or messaging operation.
pub type Routed = Result<(), Declined>;
