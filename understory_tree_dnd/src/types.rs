// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core value types shared by the drag-and-drop stores.

use alloc::vec::Vec;
use core::fmt;

use crate::key_path::TreeNode;

/// How a store reads and rebuilds the containers of a tree.
///
/// The drag-and-drop store never looks inside a node by itself; it goes through this trait.
pub trait ElementAccess<N> {
    /// Stable external key of a node.
    type Id: Clone + Ord + fmt::Debug;

    /// The identifier of `node`.
    fn identifier(&self, node: &N) -> Self::Id;

    /// Ordered children of `container`, or `None` if it is not a container.
    fn elements(&self, container: &N) -> Option<Vec<N>>;

    /// A new container value holding `elements`, or `None` if `container` is not a container.
    fn with_elements(&self, container: &N, elements: Vec<N>) -> Option<N>;
}

/// A container's value before and after a drag-driven change.
///
/// `before` is the reference observed when the container first joined the drag. `after` only ever
/// changes by being replaced with a new value.
#[derive(Clone, Debug)]
pub struct Mutation<N> {
    /// Original container.
    pub before: N,
    /// Container with the changes applied so far.
    pub after: N,
}

impl<N: TreeNode> Mutation<N> {
    /// A mutation that has not changed anything yet.
    pub fn unchanged(node: N) -> Self {
        Self {
            after: node.clone(),
            before: node,
        }
    }

    /// Returns true if `after` is a different node than `before`.
    pub fn is_mutated(&self) -> bool {
        !self.before.same(&self.after)
    }
}

/// Kind of drag in progress.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum DragType {
    /// No drag in progress.
    #[default]
    None,
    /// An element already in the tree is being moved.
    Existing,
    /// A new element is being dropped into the tree.
    New,
}

/// Mutations to apply to the tree once a drag ends.
///
/// When the source was nested in the target (or the reverse) both are folded into `target` and
/// `source` is `None`.
#[derive(Clone, Debug)]
pub struct DropOutcome<N> {
    /// Container receiving the dragged element.
    pub target: Mutation<N>,
    /// Container the element was moved out of, when unrelated to the target.
    pub source: Option<Mutation<N>>,
}

bitflags::bitflags! {
    /// How a node takes part in the current drag.
    #[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
    pub struct Involvement: u8 {
        /// The node is the original source container.
        const SOURCE         = 0b0000_0001;
        /// The node is the original target container.
        const TARGET         = 0b0000_0010;
        /// The node is the source and the source has changed.
        const MUTATED_SOURCE = 0b0000_0100;
        /// The node is the target and the target has changed.
        const MUTATED_TARGET = 0b0000_1000;
    }
}
