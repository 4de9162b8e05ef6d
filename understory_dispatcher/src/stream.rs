// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Update stream: the notification side of a store.
//!
//! Stores own an [`UpdateStream`] and emit on it after every state-changing transition.
//! Listeners (for example a rendering layer) receive a shared reference to the emitted value.
//! There is no batching and no deduplication: one emit is one call per listener.
//!
//! ```
//! use understory_dispatcher::UpdateStream;
//! use std::{cell::Cell, rc::Rc};
//!
//! let hits = Rc::new(Cell::new(0));
//! let mut stream: UpdateStream<u32> = UpdateStream::new();
//! let seen = Rc::clone(&hits);
//! let id = stream.subscribe(move |v| seen.set(seen.get() + *v));
//! stream.emit(&2);
//! stream.emit(&3);
//! assert_eq!(hits.get(), 5);
//! assert!(stream.unsubscribe(id));
//! stream.emit(&4);
//! assert_eq!(hits.get(), 5);
//! ```

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

/// Identifier returned by [`UpdateStream::subscribe`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ListenerId(u64);

/// Ordered list of listeners notified synchronously on every emit.
pub struct UpdateStream<T: ?Sized> {
    listeners: Vec<(ListenerId, Box<dyn FnMut(&T)>)>,
    next_id: u64,
}

impl<T: ?Sized> fmt::Debug for UpdateStream<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpdateStream")
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl<T: ?Sized> Default for UpdateStream<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> UpdateStream<T> {
    /// Create a stream with no listeners.
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
            next_id: 0,
        }
    }

    /// Add a listener; it is called after the ones already subscribed.
    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&T) + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns false if it was not subscribed.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(l, _)| *l != id);
        self.listeners.len() != before
    }

    /// Notify every listener, in subscription order.
    pub fn emit(&mut self, value: &T) {
        for (_, listener) in &mut self.listeners {
            listener(value);
        }
    }

    /// Number of listeners.
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Returns true if nobody is listening.
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::vec;
    use core::cell::RefCell;

    #[test]
    fn emits_in_subscription_order_without_dedupe() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut stream: UpdateStream<u8> = UpdateStream::new();
        for tag in [b'a', b'b'] {
            let log = Rc::clone(&log);
            stream.subscribe(move |v| log.borrow_mut().push((tag, *v)));
        }
        stream.emit(&1);
        stream.emit(&1);
        assert_eq!(
            *log.borrow(),
            vec![(b'a', 1), (b'b', 1), (b'a', 1), (b'b', 1)]
        );
    }

    #[test]
    fn unsubscribe_unknown_is_false() {
        let mut stream: UpdateStream<str> = UpdateStream::new();
        let id = stream.subscribe(|_| {});
        assert_eq!(stream.len(), 1);
        assert!(stream.unsubscribe(id));
        assert!(!stream.unsubscribe(id));
        assert!(stream.is_empty());
    }
}
