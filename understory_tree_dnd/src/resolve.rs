// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reconcile two container mutations into the smallest set that is safe to apply.
//!
//! When one container sits inside the other, applying both mutations separately would lose one of
//! them: the outer `after` still holds the inner `before`. [`resolve`] folds the inner mutation into
//! the outer one instead.

use crate::error::TreeError;
use crate::key_path::{TreeNode, deep_key_of, set_in};
use crate::types::Mutation;

/// Result of [`resolve`].
#[derive(Clone, Debug)]
pub enum Resolution<N> {
    /// One container held the other; a single mutation covers both.
    Merged(Mutation<N>),
    /// Unrelated containers, returned in argument order and unchanged.
    Independent(Mutation<N>, Mutation<N>),
}

impl<N> Resolution<N> {
    /// Returns true if the mutations were folded into one.
    pub fn is_merged(&self) -> bool {
        matches!(self, Self::Merged(_))
    }

    /// The first mutation and, for independent results, the second.
    pub fn into_parts(self) -> (Mutation<N>, Option<Mutation<N>>) {
        match self {
            Self::Merged(m) => (m, None),
            Self::Independent(a, b) => (a, Some(b)),
        }
    }
}

/// Fold `a` and `b` into one mutation if either container holds the other.
///
/// `b` is searched for inside `a.after` first, then `a` inside `b.after`.
pub fn resolve<N: TreeNode>(a: Mutation<N>, b: Mutation<N>) -> Result<Resolution<N>, TreeError> {
    if let Some(merged) = merge_into(&a, &b)? {
        return Ok(Resolution::Merged(merged));
    }
    if let Some(merged) = merge_into(&b, &a)? {
        return Ok(Resolution::Merged(merged));
    }
    Ok(Resolution::Independent(a, b))
}

fn merge_into<N: TreeNode>(
    outer: &Mutation<N>,
    inner: &Mutation<N>,
) -> Result<Option<Mutation<N>>, TreeError> {
    let Some(path) = deep_key_of(&outer.after, &inner.before) else {
        return Ok(None);
    };
    let after = set_in(&outer.after, &path, inner.after.clone())?;
    Ok(Some(Mutation {
        before: outer.before.clone(),
        after,
    }))
}
