// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Identity-based helpers over a container's child list.
//!
//! Positions are looked up with [`TreeNode::same`]. A missing anchor (`None`, or a node that is not
//! in the list) means "the end of the list".

use alloc::vec::Vec;

use crate::key_path::TreeNode;

/// Index of `node` in `items`, by identity.
pub fn position_of<N: TreeNode>(items: &[N], node: &N) -> Option<usize> {
    items.iter().position(|item| item.same(node))
}

/// Returns true if `items` holds `node` itself.
pub fn contains_same<N: TreeNode>(items: &[N], node: &N) -> bool {
    position_of(items, node).is_some()
}

/// `items` with `node` inserted at `index`; `None` or an out-of-range index appends.
pub fn insert_at<N>(mut items: Vec<N>, node: N, index: Option<usize>) -> Vec<N> {
    match index {
        Some(i) if i <= items.len() => items.insert(i, node),
        _ => items.push(node),
    }
    items
}

/// `items` with the element at `from` moved to `to`.
///
/// The element is removed first and then inserted at `to`, so moving forward lands it just before
/// whatever now occupies `to`. `None` or an out-of-range `to` moves it to the end. An out-of-range
/// `from` leaves the list as it is.
pub fn move_in_list<N>(mut items: Vec<N>, from: usize, to: Option<usize>) -> Vec<N> {
    if from >= items.len() {
        return items;
    }
    let item = items.remove(from);
    insert_at(items, item, to)
}

/// `items` without `node`, or `None` if it was not there.
pub fn remove_same<N: TreeNode>(mut items: Vec<N>, node: &N) -> Option<Vec<N>> {
    let index = position_of(&items, node)?;
    items.remove(index);
    Some(items)
}
