// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_dispatcher --heading-base-level=0

//! Understory Dispatcher: a synchronous, `no_std` action dispatcher for UI stores.
//!
//! ## Overview
//!
//! A [`Dispatcher`] delivers a single payload to every subscriber registered for the payload's kind,
//! exactly once per [`Dispatcher::dispatch`] call.
//! A subscriber can declare "run after these other subscribers have handled this same payload" with
//! [`Dispatch::wait_for`]; circular waits are detected and rejected.
//!
//! ## Inputs
//!
//! Payloads implement [`Payload`], which reports a [`Payload::Kind`] used to select subscribers.
//! Subscribers are identified by a [`StoreId`] handed out by [`Dispatcher::register_store`].
//!
//! ## Ordering
//!
//! - Within one dispatch, subscribers run in registration order.
//! - [`Dispatch::wait_for`] pulls a dependency forward; it then does not run again in its own turn.
//! - Across dispatches, order is the call order of `dispatch`. There is no queue: dispatching from
//!   inside a subscriber fails with [`DispatchError::AlreadyDispatching`].
//!
//! ## Errors
//!
//! Subscribers return `Result<(), E>` where `E: From<DispatchError>`. Any error stops the dispatch and is
//! returned from [`Dispatcher::dispatch`]. The dispatcher stays usable afterwards.
//!
//! ## Stores
//!
//! [`UpdateStream`] is the other half of a store: after handling a payload, a store emits on its stream
//! so that views can re-read its state.
//!
//! ## Example
//!
//! ```
//! use std::{cell::RefCell, rc::Rc};
//! use understory_dispatcher::{Dispatcher, Payload};
//!
//! struct Ping(&'static str);
//!
//! impl Payload for Ping {
//!     type Kind = &'static str;
//!     fn kind(&self) -> Option<&'static str> {
//!         (!self.0.is_empty()).then_some(self.0)
//!     }
//! }
//!
//! let dispatcher: Dispatcher<Ping> = Dispatcher::new();
//! let log = Rc::new(RefCell::new(Vec::new()));
//! let a = dispatcher.register_store();
//! let b = dispatcher.register_store();
//!
//! let seen = Rc::clone(&log);
//! dispatcher.register("ping", a, move |d| {
//!     // `b` is registered later but must see the payload first.
//!     d.wait_for(&[b])?;
//!     seen.borrow_mut().push("a");
//!     Ok(())
//! });
//! let seen = Rc::clone(&log);
//! dispatcher.register("ping", b, move |_| {
//!     seen.borrow_mut().push("b");
//!     Ok(())
//! });
//!
//! dispatcher.dispatch(&mut Ping("ping")).unwrap();
//! assert_eq!(*log.borrow(), ["b", "a"]);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod dispatcher;
mod error;
mod stream;
mod types;

pub use dispatcher::{Dispatch, Dispatcher};
pub use error::DispatchError;
pub use stream::{ListenerId, UpdateStream};
pub use types::{Payload, StoreId, Token};
