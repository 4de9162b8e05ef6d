// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Protocol errors raised by the dispatcher.

use crate::types::StoreId;

/// Misuse of the dispatch protocol.
///
/// All of these are fatal to the call that raised them. The dispatcher itself
/// stays usable afterwards.
#[derive(Copy, Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum DispatchError {
    /// [`Dispatcher::dispatch`](crate::Dispatcher::dispatch) was called from inside a subscriber.
    #[error("cannot dispatch in the middle of a dispatch")]
    AlreadyDispatching,
    /// A dispatch-scoped query was made while no dispatch is in progress.
    #[error("must be invoked while dispatching")]
    NotDispatching,
    /// The payload carried no kind.
    #[error("cannot dispatch a payload without a type")]
    InvalidPayload,
    /// The `(kind, store)` pair was never registered.
    #[error("{store} was never registered for this action type")]
    NotRegistered {
        /// Store named in the failed call.
        store: StoreId,
    },
    /// A subscriber waited, directly or transitively, on one that is still running.
    #[error("circular dependency detected while waiting for {store}")]
    CircularDependency {
        /// Store whose callback was already running.
        store: StoreId,
    },
}
