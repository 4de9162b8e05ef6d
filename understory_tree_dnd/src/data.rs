// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Data store: holds the authoritative tree and applies drops and deletions to it.

use alloc::rc::Rc;
use core::cell::RefCell;
use core::fmt;

use understory_dispatcher::{StoreId, UpdateStream};

use crate::action::{ActionType, TreeAction, TreeDispatcher};
use crate::error::{Error, TreeError};
use crate::key_path::{TreeNode, deep_key_of, delete_in, set_in};
use crate::types::{DropOutcome, Mutation};

/// Store owning the tree being edited.
///
/// On a drag end it waits for the drag-and-drop store, then locates each mutation's `before` node
/// in the tree and replaces it with `after`.
pub struct DataStore<N> {
    id: StoreId,
    drag_store: StoreId,
    data: N,
    updates: UpdateStream<N>,
}

impl<N: fmt::Debug> fmt::Debug for DataStore<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataStore")
            .field("id", &self.id)
            .field("drag_store", &self.drag_store)
            .field("data", &self.data)
            .finish_non_exhaustive()
    }
}

impl<N: TreeNode + 'static> DataStore<N> {
    /// Create a store holding `data`, reading drop outcomes from `drag_store`.
    pub fn new(dispatcher: &TreeDispatcher<N>, data: N, drag_store: StoreId) -> Rc<RefCell<Self>> {
        let id = dispatcher.register_store();
        let store = Rc::new(RefCell::new(Self {
            id,
            drag_store,
            data,
            updates: UpdateStream::new(),
        }));
        for kind in [ActionType::SetData, ActionType::DeleteElement] {
            let weak = Rc::downgrade(&store);
            dispatcher.register(kind, id, move |d| match weak.upgrade() {
                Some(store) => store.borrow_mut().handle(d.payload()),
                None => Ok(()),
            });
        }
        let weak = Rc::downgrade(&store);
        dispatcher.register(ActionType::DragEnd, id, move |d| {
            let Some(store) = weak.upgrade() else {
                return Ok(());
            };
            let drag_store = store.borrow().drag_store;
            d.wait_for(&[drag_store])?;
            store.borrow_mut().handle(d.payload())
        });
        store
    }
}

impl<N: TreeNode> DataStore<N> {
    /// Store id.
    pub fn id(&self) -> StoreId {
        self.id
    }

    /// The current tree.
    pub fn data(&self) -> &N {
        &self.data
    }

    /// Stream notified with the tree after every handled action.
    ///
    /// Listeners run while the store is mutably borrowed; they get the new tree as their argument.
    pub fn updates_mut(&mut self) -> &mut UpdateStream<N> {
        &mut self.updates
    }

    /// Apply a tree action. Drag and expansion actions other than a drag end are ignored.
    pub fn handle(&mut self, action: &TreeAction<N>) -> Result<(), Error> {
        match action {
            TreeAction::SetData { data } => self.set_data(data.clone()),
            TreeAction::DeleteElement { element } => self.delete_element(element)?,
            TreeAction::DragEnd {
                outcome: Some(outcome),
            } => self.apply_drop(outcome)?,
            _ => return Ok(()),
        }
        Ok(())
    }

    /// Replace the tree.
    pub fn set_data(&mut self, data: N) {
        self.data = data;
        self.updates.emit(&self.data);
    }

    /// Remove `element` from the tree.
    pub fn delete_element(&mut self, element: &N) -> Result<(), TreeError> {
        let path = deep_key_of(&self.data, element).ok_or(TreeError::NotFound)?;
        self.data = delete_in(&self.data, &path)?;
        self.updates.emit(&self.data);
        Ok(())
    }

    /// Apply the source mutation (if any), then the target mutation.
    pub fn apply_drop(&mut self, outcome: &DropOutcome<N>) -> Result<(), TreeError> {
        let mut data = self.data.clone();
        if let Some(source) = &outcome.source {
            data = apply(&data, source)?;
        }
        data = apply(&data, &outcome.target)?;
        self.set_data(data);
        Ok(())
    }
}

fn apply<N: TreeNode>(tree: &N, mutation: &Mutation<N>) -> Result<N, TreeError> {
    if !mutation.is_mutated() {
        return Ok(tree.clone());
    }
    let path = deep_key_of(tree, &mutation.before).ok_or(TreeError::NotFound)?;
    set_in(tree, &path, mutation.after.clone())
}
