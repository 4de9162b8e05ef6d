// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag-and-drop store: tracks one drag gesture and computes the mutations it produces.
//!
//! ## States
//!
//! A session starts in [`DragType::None`], moves to [`DragType::Existing`] or [`DragType::New`] on a
//! drag start, and returns to `None` on drag end. A second drag start replaces the session.
//!
//! ## Drag over
//!
//! Each hover first re-anchors the target if the hovered container is not the one already being
//! tracked. Then:
//! - if the target does not hold the dragged element yet, the element is removed from the source and
//!   inserted before the hovered element (or appended);
//! - if it does, the element is moved to the hovered element's position, unless it is hovering
//!   itself.
//!
//! Every transition emits the session on [`DragAndDropStore::updates_mut`]. Listeners get the
//! session itself; the store is still mutably borrowed while they run.
//!
//! ## Drag end
//!
//! The source and target mutations are passed to [`resolve`](crate::resolve::resolve) and the
//! session is reset. When dispatched, the result is written into the
//! [`TreeAction::DragEnd`] payload for stores that wait on this one.

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;
use core::mem;

use understory_dispatcher::{StoreId, UpdateStream};

use crate::action::{ActionType, TreeAction, TreeDispatcher};
use crate::error::{Error, TreeError};
use crate::key_path::TreeNode;
use crate::list::{contains_same, insert_at, move_in_list, position_of, remove_same};
use crate::resolve::resolve;
use crate::session::DragSession;
use crate::types::{DragType, DropOutcome, ElementAccess, Involvement, Mutation};

/// Store owning the current [`DragSession`].
pub struct DragAndDropStore<N, A> {
    id: StoreId,
    access: A,
    session: DragSession<N>,
    dependencies: Vec<StoreId>,
    updates: UpdateStream<DragSession<N>>,
}

impl<N: fmt::Debug, A> fmt::Debug for DragAndDropStore<N, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DragAndDropStore")
            .field("id", &self.id)
            .field("session", &self.session)
            .field("dependencies", &self.dependencies)
            .field("updates", &self.updates)
            .finish_non_exhaustive()
    }
}

impl<N, A> DragAndDropStore<N, A>
where
    N: TreeNode + 'static,
    A: ElementAccess<N> + 'static,
{
    /// Create a store and subscribe it to the drag actions of `dispatcher`.
    pub fn new(dispatcher: &TreeDispatcher<N>, access: A) -> Rc<RefCell<Self>> {
        Self::with_store_id(dispatcher, dispatcher.register_store(), access)
    }

    /// Like [`DragAndDropStore::new`], under an id allocated beforehand.
    ///
    /// Lets stores that wait on this one be created, and registered, first.
    pub fn with_store_id(
        dispatcher: &TreeDispatcher<N>,
        id: StoreId,
        access: A,
    ) -> Rc<RefCell<Self>> {
        let store = Rc::new(RefCell::new(Self::detached(id, access)));
        for kind in [
            ActionType::DragStartExisting,
            ActionType::DragStartNew,
            ActionType::DragOver,
        ] {
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
            let dependencies = store.borrow().dependencies.clone();
            d.wait_for(&dependencies)?;
            let outcome = store.borrow_mut().end()?;
            if let TreeAction::DragEnd { outcome: slot } = d.payload_mut() {
                *slot = outcome;
            }
            Ok(())
        });
        store
    }
}

impl<N: TreeNode, A: ElementAccess<N>> DragAndDropStore<N, A> {
    /// A store that is not subscribed to any dispatcher; drive it with its methods directly.
    pub fn detached(id: StoreId, access: A) -> Self {
        Self {
            id,
            access,
            session: DragSession::default(),
            dependencies: Vec::new(),
            updates: UpdateStream::new(),
        }
    }

    /// The id this store is subscribed under.
    pub fn id(&self) -> StoreId {
        self.id
    }

    /// The current session.
    pub fn session(&self) -> &DragSession<N> {
        &self.session
    }

    /// Stream notified with the session after every transition.
    ///
    /// Listeners run while the store is mutably borrowed: they must read the session they are
    /// given, not borrow the store's `RefCell` again.
    pub fn updates_mut(&mut self) -> &mut UpdateStream<DragSession<N>> {
        &mut self.updates
    }

    /// Stores that must handle a drag end before this one computes the outcome.
    pub fn set_dependencies(&mut self, stores: impl IntoIterator<Item = StoreId>) {
        self.dependencies = stores.into_iter().collect();
    }

    /// Apply one drag action. Other actions are ignored.
    pub fn handle(&mut self, action: &TreeAction<N>) -> Result<(), Error> {
        match action {
            TreeAction::DragStartExisting { dragged, source } => {
                self.start_existing(dragged.clone(), source.clone());
                Ok(())
            }
            TreeAction::DragStartNew { dragged } => {
                self.start_new(dragged.clone());
                Ok(())
            }
            TreeAction::DragOver {
                target,
                under_dragged,
            } => self.drag_over(target.clone(), under_dragged.clone()),
            _ => Ok(()),
        }
    }

    /// Start dragging `dragged` out of `source`.
    pub fn start_existing(&mut self, dragged: N, source: N) {
        log::debug!("drag start: existing {dragged:?}");
        self.session = DragSession {
            drag_type: DragType::Existing,
            dragged: Some(dragged),
            under_dragged: None,
            source: Some(Mutation::unchanged(source.clone())),
            target: Some(Mutation::unchanged(source)),
        };
        self.notify();
    }

    /// Start dragging a new element.
    pub fn start_new(&mut self, dragged: N) {
        log::debug!("drag start: new {dragged:?}");
        self.session = DragSession {
            drag_type: DragType::New,
            dragged: Some(dragged),
            ..DragSession::default()
        };
        self.notify();
    }

    /// The dragged element is over `under_dragged` inside `target`.
    ///
    /// On error the session is left as it was before the call and no update is emitted.
    pub fn drag_over(&mut self, target: N, under_dragged: Option<N>) -> Result<(), Error> {
        let dragged = self.session.dragged.clone().ok_or(Error::NotDragging)?;
        let previous = self.session.clone();
        match self.hover(dragged, target, under_dragged) {
            Ok(()) => {
                self.notify();
                Ok(())
            }
            Err(err) => {
                self.session = previous;
                Err(err)
            }
        }
    }

    fn hover(&mut self, dragged: N, target: N, under_dragged: Option<N>) -> Result<(), Error> {
        self.anchor_target(target);
        self.session.under_dragged = under_dragged;

        let Some(tracked) = &self.session.target else {
            return Ok(());
        };
        let elements = self
            .access
            .elements(&tracked.after)
            .ok_or(TreeError::NotAContainer)?;
        let under = self.session.under_dragged.clone();
        let anchor = |items: &[N]| under.as_ref().and_then(|u| position_of(items, u));

        let updated = if !contains_same(&elements, &dragged) {
            self.remove_from_source(&dragged)?;
            let index = anchor(&elements);
            log::debug!("drag over: insert at {index:?}");
            Some(insert_at(elements, dragged, index))
        } else if under.as_ref().is_some_and(|u| u.same(&dragged)) {
            log::debug!("drag over: hovering itself");
            None
        } else {
            let to = anchor(&elements);
            // `contains_same` held, so the element has a position.
            let from = position_of(&elements, &dragged).unwrap_or(elements.len());
            log::debug!("drag over: move {from} to {to:?}");
            Some(move_in_list(elements, from, to))
        };

        if let Some(elements) = updated
            && let Some(tracked) = &mut self.session.target
        {
            tracked.after = self
                .access
                .with_elements(&tracked.after, elements)
                .ok_or(TreeError::NotAContainer)?;
        }
        Ok(())
    }

    /// Finish the drag: reset the session and return the mutations to apply.
    ///
    /// Returns `None` when no container was ever hovered.
    pub fn end(&mut self) -> Result<Option<DropOutcome<N>>, Error> {
        let session = mem::take(&mut self.session);
        let outcome = match (session.target, session.source) {
            (None, _) => Ok(None),
            (Some(target), None) => Ok(Some(DropOutcome {
                target,
                source: None,
            })),
            (Some(target), Some(source)) => resolve(target, source).map(|resolution| {
                log::debug!("drag end: merged {}", resolution.is_merged());
                let (target, source) = resolution.into_parts();
                Some(DropOutcome { target, source })
            }),
        };
        self.notify();
        outcome.map_err(Error::from)
    }

    fn anchor_target(&mut self, target: N) {
        if self
            .session
            .target
            .as_ref()
            .is_some_and(|tracked| tracked.before.same(&target))
        {
            return;
        }
        // Back over the source container: its pending removal no longer applies.
        if let Some(source) = &mut self.session.source
            && source.before.same(&target)
        {
            source.after = source.before.clone();
        }
        self.session.target = Some(Mutation::unchanged(target));
    }

    fn remove_from_source(&mut self, dragged: &N) -> Result<(), Error> {
        let Some(source) = &mut self.session.source else {
            return Ok(());
        };
        let elements = self
            .access
            .elements(&source.after)
            .ok_or(TreeError::NotAContainer)?;
        if let Some(rest) = remove_same(elements, dragged) {
            source.after = self
                .access
                .with_elements(&source.after, rest)
                .ok_or(TreeError::NotAContainer)?;
        }
        Ok(())
    }

    fn notify(&mut self) {
        self.updates.emit(&self.session);
    }

    /// See [`DragSession::is_drag_operation_source`].
    pub fn is_drag_operation_source(&self, node: &N) -> bool {
        self.session.is_drag_operation_source(node)
    }

    /// See [`DragSession::is_drag_operation_target`].
    pub fn is_drag_operation_target(&self, node: &N) -> bool {
        self.session.is_drag_operation_target(node)
    }

    /// See [`DragSession::is_involved_in_drag_operations`].
    pub fn is_involved_in_drag_operations(&self, node: &N) -> bool {
        self.session.is_involved_in_drag_operations(node)
    }

    /// See [`DragSession::is_source_mutated`].
    pub fn is_source_mutated(&self) -> bool {
        self.session.is_source_mutated()
    }

    /// See [`DragSession::is_target_mutated`].
    pub fn is_target_mutated(&self) -> bool {
        self.session.is_target_mutated()
    }

    /// See [`DragSession::is_mutated_source`].
    pub fn is_mutated_source(&self, node: &N) -> bool {
        self.session.is_mutated_source(node)
    }

    /// See [`DragSession::is_mutated_target`].
    pub fn is_mutated_target(&self, node: &N) -> bool {
        self.session.is_mutated_target(node)
    }

    /// See [`DragSession::is_mutated_by_drag_operations`].
    pub fn is_mutated_by_drag_operations(&self, node: &N) -> bool {
        self.session.is_mutated_by_drag_operations(node)
    }

    /// See [`DragSession::relevant_state_for`].
    pub fn relevant_state_for(&self, node: &N) -> N {
        self.session.relevant_state_for(node)
    }

    /// See [`DragSession::involvement`].
    pub fn involvement(&self, node: &N) -> Involvement {
        self.session.involvement(node)
    }
}
