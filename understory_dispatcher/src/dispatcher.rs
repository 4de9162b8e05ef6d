// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dispatcher implementation.
//!
//! ## Overview
//!
//! Delivers one payload per [`Dispatcher::dispatch`] call to every subscriber registered for its kind.
//! Subscribers run in registration order unless one of them pulls another forward with
//! [`Dispatch::wait_for`].
//!
//! ## Per-dispatch state
//!
//! Pending/handled bookkeeping lives in the [`Dispatch`] context created by each call and handed to
//! every callback. It is never reused across calls, so a failed dispatch cannot leak state into the next.
//! The only state kept on the dispatcher itself is the kind currently being dispatched, which is reset
//! by a drop guard on every exit path, including a panicking subscriber.
//!
//! ## Subscriber identity
//!
//! A subscription is identified by `(kind, store)`. Stores obtain a [`StoreId`] from
//! [`Dispatcher::register_store`] and name each other by it in [`Dispatch::wait_for`].

use alloc::collections::BTreeMap;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};
use core::fmt;

use crate::error::DispatchError;
use crate::types::{Payload, StoreId, Token};

type Callback<P, E> = dyn FnMut(&mut Dispatch<'_, P, E>) -> Result<(), E>;

struct Subscriber<P: Payload, E> {
    store: StoreId,
    token: Token,
    callback: Rc<RefCell<Callback<P, E>>>,
}

impl<P: Payload, E> Clone for Subscriber<P, E> {
    fn clone(&self) -> Self {
        Self {
            store: self.store,
            token: self.token,
            callback: Rc::clone(&self.callback),
        }
    }
}

/// Synchronous payload broadcaster with intra-dispatch dependency ordering.
///
/// ## Usage
///
/// - Allocate a [`StoreId`] per subscribing store with [`Dispatcher::register_store`].
/// - Subscribe with [`Dispatcher::register`]; the callback receives the [`Dispatch`] context.
/// - Call [`Dispatcher::dispatch`] with a mutable payload. Subscribers may augment the payload in
///   place; the caller observes the result once `dispatch` returns.
///
/// `E` is the error type subscribers return. It must absorb [`DispatchError`] so that protocol
/// violations raised inside a callback propagate with `?`.
pub struct Dispatcher<P: Payload, E = DispatchError> {
    subscribers: RefCell<BTreeMap<P::Kind, Vec<Subscriber<P, E>>>>,
    next_store: Cell<u32>,
    next_token: Cell<u64>,
    dispatching: Cell<Option<P::Kind>>,
}

impl<P: Payload, E> fmt::Debug for Dispatcher<P, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kinds = self.subscribers.borrow().len();
        f.debug_struct("Dispatcher")
            .field("kinds", &kinds)
            .field("stores", &self.next_store.get())
            .field("dispatching", &self.dispatching.get())
            .finish_non_exhaustive()
    }
}

impl<P: Payload, E> Default for Dispatcher<P, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Payload, E> Dispatcher<P, E> {
    /// Create a dispatcher with no subscribers.
    pub fn new() -> Self {
        Self {
            subscribers: RefCell::new(BTreeMap::new()),
            next_store: Cell::new(0),
            next_token: Cell::new(0),
            dispatching: Cell::new(None),
        }
    }

    /// Allocate a fresh store handle.
    pub fn register_store(&self) -> StoreId {
        let id = StoreId(self.next_store.get());
        self.next_store.set(id.0 + 1);
        id
    }

    /// Subscribe `store` to payloads of `kind`.
    ///
    /// Registering the same `(kind, store)` pair twice is a no-op: the original callback is kept
    /// and its token returned. Registering during a dispatch takes effect from the next dispatch.
    pub fn register<F>(&self, kind: P::Kind, store: StoreId, callback: F) -> Token
    where
        F: FnMut(&mut Dispatch<'_, P, E>) -> Result<(), E> + 'static,
    {
        let mut subscribers = self.subscribers.borrow_mut();
        let list = subscribers.entry(kind).or_default();
        if let Some(existing) = list.iter().find(|s| s.store == store) {
            return existing.token;
        }
        let token = Token(self.next_token.get());
        self.next_token.set(token.0 + 1);
        let callback: Rc<RefCell<Callback<P, E>>> = Rc::new(RefCell::new(callback));
        list.push(Subscriber {
            store,
            token,
            callback,
        });
        token
    }

    /// Remove the subscription of `store` to `kind`.
    pub fn unregister(&self, kind: P::Kind, store: StoreId) -> Result<(), DispatchError> {
        let mut subscribers = self.subscribers.borrow_mut();
        let list = subscribers
            .get_mut(&kind)
            .ok_or(DispatchError::NotRegistered { store })?;
        let index = list
            .iter()
            .position(|s| s.store == store)
            .ok_or(DispatchError::NotRegistered { store })?;
        list.remove(index);
        Ok(())
    }

    /// Returns true if `store` is subscribed to `kind`.
    pub fn is_registered(&self, kind: P::Kind, store: StoreId) -> bool {
        self.subscribers
            .borrow()
            .get(&kind)
            .is_some_and(|list| list.iter().any(|s| s.store == store))
    }

    /// Returns true while a dispatch is in progress.
    pub fn is_dispatching(&self) -> bool {
        self.dispatching.get().is_some()
    }

    /// Kind of the payload currently being dispatched.
    pub fn current_kind(&self) -> Result<P::Kind, DispatchError> {
        self.dispatching.get().ok_or(DispatchError::NotDispatching)
    }
}

impl<P: Payload, E: From<DispatchError>> Dispatcher<P, E> {
    /// Deliver `payload` to every subscriber registered for its kind.
    ///
    /// Fails with [`DispatchError::AlreadyDispatching`] when called from inside a subscriber and
    /// with [`DispatchError::InvalidPayload`] when the payload has no kind. A subscriber error
    /// stops the dispatch and is returned as-is; which subscribers ran before it is unspecified.
    pub fn dispatch(&self, payload: &mut P) -> Result<(), E> {
        if self.is_dispatching() {
            return Err(DispatchError::AlreadyDispatching.into());
        }
        let Some(kind) = payload.kind() else {
            return Err(DispatchError::InvalidPayload.into());
        };
        let subscribers = self
            .subscribers
            .borrow()
            .get(&kind)
            .cloned()
            .unwrap_or_default();
        log::trace!(
            "dispatching {kind:?} to {} subscriber(s)",
            subscribers.len()
        );

        self.dispatching.set(Some(kind));
        let _guard = DispatchGuard(&self.dispatching);
        let mut dispatch = Dispatch::new(kind, payload, subscribers);
        for index in 0..dispatch.subscribers.len() {
            if !dispatch.pending[index] {
                dispatch.invoke(index)?;
            }
        }
        Ok(())
    }
}

struct DispatchGuard<'a, K: Copy>(&'a Cell<Option<K>>);

impl<K: Copy> Drop for DispatchGuard<'_, K> {
    fn drop(&mut self) {
        self.0.set(None);
    }
}

/// State of one in-progress dispatch.
///
/// Handed to every subscriber callback. It only exists for the duration of a
/// [`Dispatcher::dispatch`] call, so waiting outside a dispatch cannot be expressed.
pub struct Dispatch<'a, P: Payload, E = DispatchError> {
    kind: P::Kind,
    payload: &'a mut P,
    subscribers: Vec<Subscriber<P, E>>,
    pending: Vec<bool>,
    handled: Vec<bool>,
}

impl<P: Payload, E> fmt::Debug for Dispatch<'_, P, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatch")
            .field("kind", &self.kind)
            .field("pending", &self.pending)
            .field("handled", &self.handled)
            .finish_non_exhaustive()
    }
}

impl<'a, P: Payload, E> Dispatch<'a, P, E> {
    fn new(kind: P::Kind, payload: &'a mut P, subscribers: Vec<Subscriber<P, E>>) -> Self {
        let len = subscribers.len();
        Self {
            kind,
            payload,
            subscribers,
            pending: alloc::vec![false; len],
            handled: alloc::vec![false; len],
        }
    }

    /// Kind of the payload being dispatched.
    pub fn kind(&self) -> P::Kind {
        self.kind
    }

    /// The payload being dispatched.
    pub fn payload(&self) -> &P {
        self.payload
    }

    /// Mutable access to the payload, for subscribers that augment it for later ones.
    pub fn payload_mut(&mut self) -> &mut P {
        self.payload
    }

    /// Returns true if `store` has finished handling this payload.
    pub fn has_handled(&self, store: StoreId) -> bool {
        self.subscribers
            .iter()
            .position(|s| s.store == store)
            .is_some_and(|index| self.handled[index])
    }
}

impl<P: Payload, E: From<DispatchError>> Dispatch<'_, P, E> {
    /// Run the callbacks of `stores` before continuing the current one.
    ///
    /// Stores not subscribed to this kind are skipped, as are stores that already ran.
    /// Waiting on a store whose callback is still running fails with
    /// [`DispatchError::CircularDependency`].
    pub fn wait_for(&mut self, stores: &[StoreId]) -> Result<(), E> {
        for &store in stores {
            let Some(index) = self.subscribers.iter().position(|s| s.store == store) else {
                continue;
            };
            if self.pending[index] {
                if !self.handled[index] {
                    log::debug!("circular wait on {store} within {:?}", self.kind);
                    return Err(DispatchError::CircularDependency { store }.into());
                }
                continue;
            }
            log::trace!("pulling {store} forward within {:?}", self.kind);
            self.invoke(index)?;
        }
        Ok(())
    }

    fn invoke(&mut self, index: usize) -> Result<(), E> {
        self.pending[index] = true;
        let cell = Rc::clone(&self.subscribers[index].callback);
        // Pending callbacks are never re-entered, so this borrow cannot overlap.
        let mut callback = cell.borrow_mut();
        (&mut *callback)(self)?;
        self.handled[index] = true;
        Ok(())
    }
}
