// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tree drag-and-drop basics.
//!
//! Drags an element out of a nested list into its parent, printing what a view would render after
//! each step, then drops it and prints the tree held by the data store.
//!
//! Run:
//! - `cargo run -p understory_demos --example tree_dnd_basics`

use std::rc::Rc;

use understory_dispatcher::Dispatcher;
use understory_tree_dnd::node::{Node, RecordAccess};
use understory_tree_dnd::{
    DataStore, DragAndDropStore, ExpandedElementsStore, TreeActions, TreeDispatcher,
};

fn container(id: &str, items: Vec<Node>) -> Node {
    Node::record([("_id", Node::leaf(id)), ("elements", Node::list(items))])
}

fn main() {
    let dragged = Node::leaf("draggable");
    let b = Node::leaf("b");
    let inner = container(
        "inner",
        vec![Node::leaf("a1"), dragged.clone(), Node::leaf("b1")],
    );
    let outer = container(
        "outer",
        vec![Node::leaf("a"), b.clone(), inner.clone(), Node::leaf("c")],
    );

    let dispatcher: Rc<TreeDispatcher<Node>> = Rc::new(Dispatcher::new());
    let dnd = DragAndDropStore::new(&dispatcher, RecordAccess::default());
    let data = DataStore::new(&dispatcher, outer.clone(), dnd.borrow().id());
    let expanded = ExpandedElementsStore::new(&dispatcher, RecordAccess::default());
    let actions = TreeActions::new(Rc::clone(&dispatcher));

    {
        let outer = outer.clone();
        let inner = inner.clone();
        dnd.borrow_mut().updates_mut().subscribe(move |session| {
            println!(
                "  {:?}: outer = {}",
                session.drag_type(),
                session.relevant_state_for(&outer)
            );
            println!("  {:?}: inner = {}", session.drag_type(), session.relevant_state_for(&inner));
        });
    }

    actions.expand_element(inner.clone()).unwrap();
    println!("inner expanded: {}", expanded.borrow().is_expanded(&inner));

    println!("== Drag ==");
    actions
        .start_existing_element_drag(dragged.clone(), inner.clone())
        .unwrap();
    actions
        .drag_element_over_another(outer.clone(), Some(b))
        .unwrap();
    println!(
        "  involvement: outer {:?}, inner {:?}",
        dnd.borrow().involvement(&outer),
        dnd.borrow().involvement(&inner)
    );

    println!("== Drop ==");
    let outcome = actions.end_element_drag().unwrap();
    if let Some(outcome) = outcome {
        println!("  merged: {}", outcome.source.is_none());
    }
    println!("  data = {}", data.borrow().data());
}
