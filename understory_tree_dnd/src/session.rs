// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The state of one drag gesture and the read-only queries views ask about it.
//!
//! All queries are safe with no drag in progress: node queries return `false` and
//! [`DragSession::relevant_state_for`] hands the node back.

use core::fmt;

use crate::key_path::TreeNode;
use crate::types::{DragType, Involvement, Mutation};

/// One in-flight drag.
#[derive(Clone)]
pub struct DragSession<N> {
    pub(crate) drag_type: DragType,
    pub(crate) dragged: Option<N>,
    pub(crate) under_dragged: Option<N>,
    pub(crate) source: Option<Mutation<N>>,
    pub(crate) target: Option<Mutation<N>>,
}

impl<N> Default for DragSession<N> {
    fn default() -> Self {
        Self {
            drag_type: DragType::None,
            dragged: None,
            under_dragged: None,
            source: None,
            target: None,
        }
    }
}

impl<N: fmt::Debug> fmt::Debug for DragSession<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DragSession")
            .field("drag_type", &self.drag_type)
            .field("dragged", &self.dragged)
            .field("under_dragged", &self.under_dragged)
            .field("source", &self.source)
            .field("target", &self.target)
            .finish()
    }
}

impl<N> DragSession<N> {
    /// Kind of drag in progress.
    pub fn drag_type(&self) -> DragType {
        self.drag_type
    }

    /// Returns true between a drag start and the matching drag end.
    pub fn is_active(&self) -> bool {
        self.drag_type != DragType::None
    }

    /// The element being dragged.
    pub fn dragged(&self) -> Option<&N> {
        self.dragged.as_ref()
    }

    /// The element currently hovered.
    pub fn under_dragged(&self) -> Option<&N> {
        self.under_dragged.as_ref()
    }

    /// The container the element came from, for existing elements.
    pub fn source(&self) -> Option<&Mutation<N>> {
        self.source.as_ref()
    }

    /// The container currently hosting the element.
    pub fn target(&self) -> Option<&Mutation<N>> {
        self.target.as_ref()
    }
}

impl<N: TreeNode> DragSession<N> {
    /// Returns true if `node` is the original source container.
    pub fn is_drag_operation_source(&self, node: &N) -> bool {
        self.source.as_ref().is_some_and(|m| m.before.same(node))
    }

    /// Returns true if `node` is the original target container.
    pub fn is_drag_operation_target(&self, node: &N) -> bool {
        self.target.as_ref().is_some_and(|m| m.before.same(node))
    }

    /// Returns true if `node` is the source or the target.
    pub fn is_involved_in_drag_operations(&self, node: &N) -> bool {
        self.is_drag_operation_source(node) || self.is_drag_operation_target(node)
    }

    /// Returns true if the source container has changed.
    pub fn is_source_mutated(&self) -> bool {
        self.source.as_ref().is_some_and(Mutation::is_mutated)
    }

    /// Returns true if the target container has changed.
    pub fn is_target_mutated(&self) -> bool {
        self.target.as_ref().is_some_and(Mutation::is_mutated)
    }

    /// Returns true if `node` is the source and it has changed.
    pub fn is_mutated_source(&self, node: &N) -> bool {
        self.is_drag_operation_source(node) && self.is_source_mutated()
    }

    /// Returns true if `node` is the target and it has changed.
    pub fn is_mutated_target(&self, node: &N) -> bool {
        self.is_drag_operation_target(node) && self.is_target_mutated()
    }

    /// Returns true if `node` is a changed source or target.
    pub fn is_mutated_by_drag_operations(&self, node: &N) -> bool {
        self.is_mutated_source(node) || self.is_mutated_target(node)
    }

    /// What a view should render in place of `node`.
    ///
    /// The target wins when a node is both the mutated target and the mutated source.
    pub fn relevant_state_for(&self, node: &N) -> N {
        if self.is_mutated_target(node)
            && let Some(target) = &self.target
        {
            return target.after.clone();
        }
        if self.is_mutated_source(node)
            && let Some(source) = &self.source
        {
            return source.after.clone();
        }
        node.clone()
    }

    /// Every way `node` takes part in the drag.
    pub fn involvement(&self, node: &N) -> Involvement {
        let mut flags = Involvement::empty();
        flags.set(Involvement::SOURCE, self.is_drag_operation_source(node));
        flags.set(Involvement::TARGET, self.is_drag_operation_target(node));
        flags.set(Involvement::MUTATED_SOURCE, self.is_mutated_source(node));
        flags.set(Involvement::MUTATED_TARGET, self.is_mutated_target(node));
        flags
    }
}
