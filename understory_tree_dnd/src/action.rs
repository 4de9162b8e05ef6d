// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tree actions and the creator that dispatches them.

use alloc::rc::Rc;
use core::fmt;

use understory_dispatcher::{Dispatcher, Payload};

use crate::error::Error;
use crate::types::DropOutcome;

/// Kind of a [`TreeAction`], used to route it to stores.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum ActionType {
    /// Replace the whole tree.
    SetData,
    /// Start dragging an element that is already in the tree.
    DragStartExisting,
    /// Start dragging a new element.
    DragStartNew,
    /// The dragged element moved over another one.
    DragOver,
    /// The drag finished.
    DragEnd,
    /// Show the children of an element.
    ExpandElement,
    /// Hide the children of an element.
    CollapseElement,
    /// Remove an element from the tree.
    DeleteElement,
}

/// A payload for the tree stores.
#[derive(Clone, Debug)]
pub enum TreeAction<N> {
    /// Replace the whole tree.
    SetData {
        /// New tree root.
        data: N,
    },
    /// Start dragging `dragged` out of `source`.
    DragStartExisting {
        /// Element being dragged.
        dragged: N,
        /// Container currently holding it.
        source: N,
    },
    /// Start dragging a new element.
    DragStartNew {
        /// Element being dragged.
        dragged: N,
    },
    /// The dragged element is over `under_dragged` inside `target`.
    DragOver {
        /// Hovered container.
        target: N,
        /// Hovered element, if any.
        under_dragged: Option<N>,
    },
    /// The drag finished.
    ///
    /// The drag-and-drop store fills in `outcome` before later stores see the payload.
    DragEnd {
        /// Mutations to apply, or `None` if nothing was hovered.
        outcome: Option<DropOutcome<N>>,
    },
    /// Show the children of `element`.
    ExpandElement {
        /// Element to expand.
        element: N,
    },
    /// Hide the children of `element`.
    CollapseElement {
        /// Element to collapse.
        element: N,
    },
    /// Remove `element` from the tree.
    DeleteElement {
        /// Element to remove.
        element: N,
    },
}

impl<N> TreeAction<N> {
    /// A drag end with no outcome yet.
    pub fn drag_end() -> Self {
        Self::DragEnd { outcome: None }
    }

    /// The kind of this action.
    pub fn action_type(&self) -> ActionType {
        match self {
            Self::SetData { .. } => ActionType::SetData,
            Self::DragStartExisting { .. } => ActionType::DragStartExisting,
            Self::DragStartNew { .. } => ActionType::DragStartNew,
            Self::DragOver { .. } => ActionType::DragOver,
            Self::DragEnd { .. } => ActionType::DragEnd,
            Self::ExpandElement { .. } => ActionType::ExpandElement,
            Self::CollapseElement { .. } => ActionType::CollapseElement,
            Self::DeleteElement { .. } => ActionType::DeleteElement,
        }
    }

    /// The drop outcome carried by a drag end.
    pub fn into_outcome(self) -> Option<DropOutcome<N>> {
        match self {
            Self::DragEnd { outcome } => outcome,
            _ => None,
        }
    }
}

impl<N> Payload for TreeAction<N> {
    type Kind = ActionType;

    fn kind(&self) -> Option<ActionType> {
        Some(self.action_type())
    }
}

/// The dispatcher shared by the tree stores.
pub type TreeDispatcher<N> = Dispatcher<TreeAction<N>, Error>;

/// Builds tree actions and dispatches them.
pub struct TreeActions<N> {
    dispatcher: Rc<TreeDispatcher<N>>,
}

impl<N> fmt::Debug for TreeActions<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeActions")
            .field("dispatcher", &self.dispatcher)
            .finish()
    }
}

impl<N> Clone for TreeActions<N> {
    fn clone(&self) -> Self {
        Self {
            dispatcher: Rc::clone(&self.dispatcher),
        }
    }
}

impl<N> TreeActions<N> {
    /// Dispatch through `dispatcher`.
    pub fn new(dispatcher: Rc<TreeDispatcher<N>>) -> Self {
        Self { dispatcher }
    }

    /// The dispatcher actions go through.
    pub fn dispatcher(&self) -> &Rc<TreeDispatcher<N>> {
        &self.dispatcher
    }

    /// Replace the whole tree.
    pub fn set_data(&self, data: N) -> Result<(), Error> {
        self.dispatcher.dispatch(&mut TreeAction::SetData { data })
    }

    /// Start dragging `dragged`, which currently sits in `source`.
    pub fn start_existing_element_drag(&self, dragged: N, source: N) -> Result<(), Error> {
        self.dispatcher
            .dispatch(&mut TreeAction::DragStartExisting { dragged, source })
    }

    /// Start dragging a new element.
    pub fn start_new_element_drag(&self, dragged: N) -> Result<(), Error> {
        self.dispatcher
            .dispatch(&mut TreeAction::DragStartNew { dragged })
    }

    /// Report the dragged element hovering `under_dragged` inside `target`.
    pub fn drag_element_over_another(
        &self,
        target: N,
        under_dragged: Option<N>,
    ) -> Result<(), Error> {
        self.dispatcher.dispatch(&mut TreeAction::DragOver {
            target,
            under_dragged,
        })
    }

    /// Finish the drag and return the outcome computed by the drag-and-drop store.
    pub fn end_element_drag(&self) -> Result<Option<DropOutcome<N>>, Error> {
        let mut action = TreeAction::drag_end();
        self.dispatcher.dispatch(&mut action)?;
        Ok(action.into_outcome())
    }

    /// Expand `element`.
    pub fn expand_element(&self, element: N) -> Result<(), Error> {
        self.dispatcher
            .dispatch(&mut TreeAction::ExpandElement { element })
    }

    /// Collapse `element`.
    pub fn collapse_element(&self, element: N) -> Result<(), Error> {
        self.dispatcher
            .dispatch(&mut TreeAction::CollapseElement { element })
    }

    /// Remove `element` from the tree.
    pub fn delete_element(&self, element: N) -> Result<(), Error> {
        self.dispatcher
            .dispatch(&mut TreeAction::DeleteElement { element })
    }
}
