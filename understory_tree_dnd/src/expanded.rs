// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Expanded elements store: which containers show their children.

use alloc::collections::BTreeSet;
use alloc::rc::Rc;
use core::cell::RefCell;
use core::fmt;

use understory_dispatcher::{StoreId, UpdateStream};

use crate::action::{ActionType, TreeAction, TreeDispatcher};
use crate::types::ElementAccess;

/// Set of expanded element identifiers.
pub struct ExpandedElementsStore<N, A: ElementAccess<N>> {
    id: StoreId,
    access: A,
    expanded: BTreeSet<A::Id>,
    updates: UpdateStream<N>,
}

impl<N, A: ElementAccess<N>> fmt::Debug for ExpandedElementsStore<N, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExpandedElementsStore")
            .field("id", &self.id)
            .field("expanded", &self.expanded)
            .finish_non_exhaustive()
    }
}

impl<N: 'static, A: ElementAccess<N> + 'static> ExpandedElementsStore<N, A> {
    /// Create a store and subscribe it to expand and collapse actions.
    pub fn new(dispatcher: &TreeDispatcher<N>, access: A) -> Rc<RefCell<Self>> {
        let id = dispatcher.register_store();
        let store = Rc::new(RefCell::new(Self {
            id,
            access,
            expanded: BTreeSet::new(),
            updates: UpdateStream::new(),
        }));
        for kind in [ActionType::ExpandElement, ActionType::CollapseElement] {
            let weak = Rc::downgrade(&store);
            dispatcher.register(kind, id, move |d| {
                if let Some(store) = weak.upgrade() {
                    store.borrow_mut().handle(d.payload());
                }
                Ok(())
            });
        }
        store
    }
}

impl<N, A: ElementAccess<N>> ExpandedElementsStore<N, A> {
    /// Store id.
    pub fn id(&self) -> StoreId {
        self.id
    }

    /// Stream notified with the element after every expand or collapse.
    ///
    /// Listeners run while the store is mutably borrowed.
    pub fn updates_mut(&mut self) -> &mut UpdateStream<N> {
        &mut self.updates
    }

    /// Apply an expand or collapse action.
    pub fn handle(&mut self, action: &TreeAction<N>) {
        match action {
            TreeAction::ExpandElement { element } => self.expand(element),
            TreeAction::CollapseElement { element } => self.collapse(element),
            _ => {}
        }
    }

    /// Mark `element` expanded.
    pub fn expand(&mut self, element: &N) {
        self.expanded.insert(self.access.identifier(element));
        self.updates.emit(element);
    }

    /// Mark `element` collapsed.
    pub fn collapse(&mut self, element: &N) {
        self.expanded.remove(&self.access.identifier(element));
        self.updates.emit(element);
    }

    /// Returns true if `element` is expanded.
    pub fn is_expanded(&self, element: &N) -> bool {
        self.expanded.contains(&self.access.identifier(element))
    }

    /// Identifiers of expanded elements, in order.
    pub fn expanded(&self) -> impl Iterator<Item = &A::Id> + '_ {
        self.expanded.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::TreeActions;
    use crate::node::{Node, RecordAccess};
    use alloc::vec::Vec;
    use understory_dispatcher::Dispatcher;

    fn container(id: &str) -> Node {
        Node::record([("_id", Node::leaf(id)), ("elements", Node::list([]))])
    }

    #[test]
    fn expansion_is_keyed_by_identifier() {
        let dispatcher: Rc<TreeDispatcher<Node>> = Rc::new(Dispatcher::new());
        let store = ExpandedElementsStore::new(&dispatcher, RecordAccess::default());
        let actions = TreeActions::new(Rc::clone(&dispatcher));

        let first = container("one");
        actions.expand_element(first.clone()).unwrap();
        // A rebuilt node with the same id stays expanded.
        assert!(store.borrow().is_expanded(&container("one")));
        assert!(!store.borrow().is_expanded(&container("two")));

        actions.expand_element(container("two")).unwrap();
        let ids: Vec<_> = store.borrow().expanded().cloned().collect();
        assert_eq!(ids, ["one", "two"]);

        actions.collapse_element(first).unwrap();
        assert!(!store.borrow().is_expanded(&container("one")));
    }

    #[test]
    fn every_toggle_emits_the_element() {
        let dispatcher: TreeDispatcher<Node> = Dispatcher::new();
        let store = ExpandedElementsStore::new(&dispatcher, RecordAccess::default());
        let seen = Rc::new(RefCell::new(Vec::new()));
        {
            let seen = Rc::clone(&seen);
            store
                .borrow_mut()
                .updates_mut()
                .subscribe(move |node: &Node| seen.borrow_mut().push(node.clone()));
        }
        let node = container("x");
        dispatcher
            .dispatch(&mut TreeAction::ExpandElement {
                element: node.clone(),
            })
            .unwrap();
        dispatcher
            .dispatch(&mut TreeAction::CollapseElement {
                element: node.clone(),
            })
            .unwrap();
        dispatcher
            .dispatch(&mut TreeAction::CollapseElement {
                element: node.clone(),
            })
            .unwrap();
        assert_eq!(seen.borrow().len(), 3);
        assert!(seen.borrow().iter().all(|n| n.same(&node)));
    }
}
