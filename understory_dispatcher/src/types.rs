// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types for the dispatcher: payloads, store handles, and subscription tokens.

use core::fmt;

/// An action payload routed by a [`Dispatcher`](crate::Dispatcher).
///
/// Subscribers register against a [`Payload::Kind`]; each dispatch delivers the
/// payload to every subscriber registered for its kind.
pub trait Payload {
    /// Discriminant used to select subscribers.
    type Kind: Copy + Ord + fmt::Debug;

    /// Returns the kind of this payload, or `None` if it has no usable type.
    ///
    /// Payloads without a kind are rejected with
    /// [`DispatchError::InvalidPayload`](crate::DispatchError::InvalidPayload).
    fn kind(&self) -> Option<Self::Kind>;
}

/// Handle for a subscribing store.
///
/// Allocated by [`Dispatcher::register_store`](crate::Dispatcher::register_store).
/// A store registers at most one callback per payload kind, and other stores name
/// it in [`Dispatch::wait_for`](crate::Dispatch::wait_for).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct StoreId(pub(crate) u32);

impl fmt::Display for StoreId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "store #{}", self.0)
    }
}

/// Subscription token returned by [`Dispatcher::register`](crate::Dispatcher::register).
///
/// Registering the same `(kind, store)` pair again returns the original token.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Token(pub(crate) u64);

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn store_ids_order_by_allocation() {
        assert!(StoreId(1) < StoreId(2));
        assert_eq!(StoreId(3), StoreId(3));
    }

    #[test]
    fn store_id_display() {
        assert_eq!(StoreId(7).to_string(), "store #7");
    }
}
