// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dispatcher basics.
//!
//! Three stores subscribe to the same action. The last one registered is pulled forward by the
//! first with `wait_for`, and a second action shows what a circular wait looks like.
//!
//! Run:
//! - `cargo run -p understory_demos --example dispatcher_basics`

use std::cell::RefCell;
use std::rc::Rc;

use understory_dispatcher::{DispatchError, Dispatcher, Payload, StoreId};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd)]
enum Kind {
    Save,
    Loop,
}

#[derive(Debug)]
struct Action {
    kind: Kind,
    trail: Vec<&'static str>,
}

impl Payload for Action {
    type Kind = Kind;
    fn kind(&self) -> Option<Kind> {
        Some(self.kind)
    }
}

fn main() {
    let dispatcher: Rc<Dispatcher<Action>> = Rc::new(Dispatcher::new());
    let names = ["audit", "cache", "storage"];
    let ids: Vec<StoreId> = names.iter().map(|_| dispatcher.register_store()).collect();
    let storage = ids[2];

    dispatcher.register(Kind::Save, ids[0], move |d| {
        // The audit log only records what storage already wrote.
        d.wait_for(&[storage])?;
        d.payload_mut().trail.push("audit");
        Ok(())
    });
    dispatcher.register(Kind::Save, ids[1], |d| {
        d.payload_mut().trail.push("cache");
        Ok(())
    });
    dispatcher.register(Kind::Save, storage, |d| {
        d.payload_mut().trail.push("storage");
        Ok(())
    });

    let mut save = Action {
        kind: Kind::Save,
        trail: Vec::new(),
    };
    dispatcher.dispatch(&mut save).unwrap();
    println!("== Save ==");
    println!("  ran: {}", save.trail.join(" -> "));

    let seen = Rc::new(RefCell::new(Vec::new()));
    for (i, &id) in ids.iter().enumerate().take(2) {
        let other = ids[1 - i];
        let seen = Rc::clone(&seen);
        dispatcher.register(Kind::Loop, id, move |d| {
            seen.borrow_mut().push(names[i]);
            d.wait_for(&[other])
        });
    }
    let mut looping = Action {
        kind: Kind::Loop,
        trail: Vec::new(),
    };
    let err: DispatchError = dispatcher.dispatch(&mut looping).unwrap_err();
    println!("== Loop ==");
    println!("  entered: {:?}", seen.borrow());
    println!("  error: {err}");
    println!("  still dispatching: {}", dispatcher.is_dispatching());
}
