// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_tree_dnd --heading-base-level=0

//! Understory Tree DnD: drag-and-drop over editable trees of persistent nodes.
//!
//! ## Overview
//!
//! A tree widget lets users drag elements between nested containers. While the pointer moves, the
//! [`DragAndDropStore`] keeps two mutations: the container the element came from (the source) and
//! the container it hovers (the target). Nothing touches the real tree until the drop. Then the two
//! mutations are reconciled by [`resolve`]: if one container sits inside the other they are folded
//! into one, otherwise both are kept. The [`DataStore`] applies the result.
//!
//! The stores are driven by [`TreeAction`] payloads sent through an
//! [`understory_dispatcher::Dispatcher`]; [`TreeActions`] builds and sends them.
//!
//! ## Trees
//!
//! Any persistent tree can be used by implementing [`TreeNode`] (identity, children, rebuild along a
//! path) and [`ElementAccess`] (identifier and child list of a container). Identity is by reference:
//! two equal subtrees are different nodes. [`node::Node`] is a ready-made implementation.
//!
//! ## Example
//!
//! ```
//! use std::rc::Rc;
//! use understory_dispatcher::Dispatcher;
//! use understory_tree_dnd::node::{Node, RecordAccess};
//! use understory_tree_dnd::{DataStore, DragAndDropStore, TreeActions, TreeDispatcher};
//!
//! fn container(id: &str, items: Vec<Node>) -> Node {
//!     Node::record([("_id", Node::leaf(id)), ("elements", Node::list(items))])
//! }
//!
//! let moved = Node::leaf("moved");
//! let stay = Node::leaf("stay");
//! let left = container("left", vec![stay, moved.clone()]);
//! let right = container("right", vec![Node::leaf("x")]);
//! let root = Node::record([("elements", Node::list([left.clone(), right.clone()]))]);
//!
//! let dispatcher: Rc<TreeDispatcher<Node>> = Rc::new(Dispatcher::new());
//! let dnd = DragAndDropStore::new(&dispatcher, RecordAccess::default());
//! let data = DataStore::new(&dispatcher, root, dnd.borrow().id());
//! let actions = TreeActions::new(Rc::clone(&dispatcher));
//!
//! actions.start_existing_element_drag(moved, left.clone()).unwrap();
//! actions.drag_element_over_another(right.clone(), None).unwrap();
//! assert!(dnd.borrow().is_mutated_source(&left));
//! actions.end_element_drag().unwrap();
//!
//! assert_eq!(
//!     data.borrow().data().to_string(),
//!     "{elements: [{_id: left, elements: [stay]}, {_id: right, elements: [x, moved]}]}"
//! );
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod action;
mod data;
mod error;
mod expanded;
mod key_path;
mod list;
pub mod node;
mod resolve;
mod session;
mod store;
mod types;

pub use action::{ActionType, TreeAction, TreeActions, TreeDispatcher};
pub use data::DataStore;
pub use error::{Error, TreeError};
pub use expanded::ExpandedElementsStore;
pub use key_path::{KeyPath, TreeNode, deep_key, deep_key_of, delete_in, get_in, set_in};
pub use list::{contains_same, insert_at, move_in_list, position_of, remove_same};
pub use resolve::{Resolution, resolve};
pub use session::DragSession;
pub use store::DragAndDropStore;
pub use types::{DragType, DropOutcome, ElementAccess, Involvement, Mutation};
