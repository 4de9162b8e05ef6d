// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Key paths: locate nodes in a persistent tree and rebuild it along a path.
//!
//! ## Identity
//!
//! Nodes are compared by reference ([`TreeNode::same`]), never by value. Two structurally identical
//! subtrees are distinct; only the very node that was put into the tree is found again.
//!
//! ## Search order
//!
//! [`deep_key`] is a depth-first, pre-order search. The root is tested first, then each child in the
//! container's natural order. The first match wins, so results are reproducible for a fixed tree.

use alloc::vec::Vec;
use core::fmt;

use crate::error::TreeError;

/// Ordered keys locating a node from a tree root. Empty means the root itself.
pub type KeyPath<K> = Vec<K>;

/// A node of a persistent tree.
///
/// Cloning must be cheap (a reference count bump). Updates return new values and never change an
/// existing node in place.
pub trait TreeNode: Clone + fmt::Debug {
    /// Key of a child within its container (an index, a field name, ...).
    type Key: Clone + fmt::Debug;

    /// Returns true if `self` and `other` are the same node (reference identity).
    fn same(&self, other: &Self) -> bool;

    /// Children in natural order, or `None` if this node is not traversable.
    fn children(&self) -> Option<Vec<(Self::Key, Self)>>;

    /// The child at `key`.
    fn child(&self, key: &Self::Key) -> Option<Self>;

    /// A copy of this node with the child at `key` replaced. `None` if there is no such child.
    fn with_child(&self, key: &Self::Key, child: Self) -> Option<Self>;

    /// A copy of this node with the child at `key` removed. `None` if there is no such child.
    fn without_child(&self, key: &Self::Key) -> Option<Self>;
}

/// Key path to the first node, in pre-order, for which `predicate` holds.
pub fn deep_key<N, F>(tree: &N, mut predicate: F) -> Option<KeyPath<N::Key>>
where
    N: TreeNode,
    F: FnMut(&N) -> bool,
{
    let mut path = Vec::new();
    search(tree, &mut predicate, &mut path).then_some(path)
}

/// Key path to `value` inside `tree`, by identity.
pub fn deep_key_of<N: TreeNode>(tree: &N, value: &N) -> Option<KeyPath<N::Key>> {
    deep_key(tree, |node| node.same(value))
}

fn search<N, F>(node: &N, predicate: &mut F, path: &mut Vec<N::Key>) -> bool
where
    N: TreeNode,
    F: FnMut(&N) -> bool,
{
    if predicate(node) {
        return true;
    }
    let Some(children) = node.children() else {
        return false;
    };
    for (key, child) in children {
        path.push(key);
        if search(&child, predicate, path) {
            return true;
        }
        path.pop();
    }
    false
}

/// The node at `path`, if every key resolves.
pub fn get_in<N: TreeNode>(tree: &N, path: &[N::Key]) -> Option<N> {
    let mut node = tree.clone();
    for key in path {
        node = node.child(key)?;
    }
    Some(node)
}

/// A copy of `tree` with the node at `path` replaced by `value`.
///
/// Siblings along the path are shared with `tree`. An empty path returns `value`.
pub fn set_in<N: TreeNode>(tree: &N, path: &[N::Key], value: N) -> Result<N, TreeError> {
    set_at(tree, path, 0, value)
}

fn set_at<N: TreeNode>(node: &N, path: &[N::Key], depth: usize, value: N) -> Result<N, TreeError> {
    let Some((key, rest)) = path.split_first() else {
        return Ok(value);
    };
    let child = node.child(key).ok_or(TreeError::MissingKey { depth })?;
    let updated = set_at(&child, rest, depth + 1, value)?;
    node.with_child(key, updated)
        .ok_or(TreeError::MissingKey { depth })
}

/// A copy of `tree` with the node at `path` removed from its container.
pub fn delete_in<N: TreeNode>(tree: &N, path: &[N::Key]) -> Result<N, TreeError> {
    let Some((last, parents)) = path.split_last() else {
        return Err(TreeError::EmptyPath);
    };
    let mut parent = tree.clone();
    for (depth, key) in parents.iter().enumerate() {
        parent = parent.child(key).ok_or(TreeError::MissingKey { depth })?;
    }
    let pruned = parent
        .without_child(last)
        .ok_or(TreeError::MissingKey {
            depth: parents.len(),
        })?;
    set_in(tree, parents, pruned)
}
