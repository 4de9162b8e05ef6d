// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types for tree edits and drag-and-drop stores.

use understory_dispatcher::DispatchError;

/// A node or key path that should exist in a tree does not.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum TreeError {
    /// A key along the path has no child.
    #[error("no child at key path depth {depth}")]
    MissingKey {
        /// Zero-based position of the failing key in the path.
        depth: usize,
    },
    /// A container operation was applied to a node that has no elements.
    #[error("node is not a container")]
    NotAContainer,
    /// The node could not be located by identity.
    #[error("node not found in tree")]
    NotFound,
    /// Deleting requires at least one key; the root cannot delete itself.
    #[error("cannot delete the root of a tree")]
    EmptyPath,
}

/// Errors surfaced by stores handling tree actions.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    /// The dispatch protocol was violated.
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
    /// A tree invariant was violated.
    #[error(transparent)]
    Tree(#[from] TreeError),
    /// A drag-over arrived while no drag had been started.
    #[error("no drag operation is in progress")]
    NotDragging,
}
