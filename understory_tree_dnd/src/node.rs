// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A small persistent tree value implementing [`TreeNode`].
//!
//! [`Node`] is a reference-counted handle to an immutable [`Kind`]: a text leaf, an ordered list,
//! or a record with ordered named fields. Every update returns a new handle and shares the untouched
//! parts with the old one, so [`Node::same`] can tell "this exact node" apart from "an equal node".
//!
//! [`RecordAccess`] exposes records holding their children under a named field (`elements` by
//! default) to the drag-and-drop store.
//!
//! ```
//! use understory_tree_dnd::node::Node;
//!
//! let b = Node::leaf("b");
//! let list = Node::record([("elements", Node::list([Node::leaf("a"), b.clone()]))]);
//! assert_eq!(list.to_string(), "{elements: [a, b]}");
//!
//! let items = list.get("elements").and_then(Node::as_list).unwrap();
//! assert!(items[1].same(&b));
//! assert!(!items[1].same(&Node::leaf("b")));
//! ```

use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::key_path::TreeNode;
use crate::types::ElementAccess;

/// Shared handle to an immutable tree value.
#[derive(Clone)]
pub struct Node(Rc<Kind>);

/// Contents of a [`Node`].
#[derive(Debug)]
pub enum Kind {
    /// A text leaf.
    Leaf(String),
    /// An ordered list of nodes.
    List(Vec<Node>),
    /// Named fields in insertion order.
    Record(Vec<(String, Node)>),
}

/// Key of a child within a [`Node`].
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Key {
    /// Position in a list.
    Index(usize),
    /// Field name in a record.
    Field(String),
}

impl Node {
    /// A text leaf.
    pub fn leaf(text: impl Into<String>) -> Self {
        Self(Rc::new(Kind::Leaf(text.into())))
    }

    /// A list of nodes.
    pub fn list(items: impl IntoIterator<Item = Self>) -> Self {
        Self(Rc::new(Kind::List(items.into_iter().collect())))
    }

    /// A record; later duplicates of a field name replace earlier ones.
    pub fn record<K: Into<String>>(fields: impl IntoIterator<Item = (K, Self)>) -> Self {
        let mut out: Vec<(String, Self)> = Vec::new();
        for (name, value) in fields {
            let name = name.into();
            match out.iter_mut().find(|(n, _)| *n == name) {
                Some(slot) => slot.1 = value,
                None => out.push((name, value)),
            }
        }
        Self(Rc::new(Kind::Record(out)))
    }

    /// The contents of this node.
    pub fn kind(&self) -> &Kind {
        &self.0
    }

    /// Text of a leaf.
    pub fn as_leaf(&self) -> Option<&str> {
        match self.kind() {
            Kind::Leaf(text) => Some(text),
            _ => None,
        }
    }

    /// Items of a list.
    pub fn as_list(&self) -> Option<&[Self]> {
        match self.kind() {
            Kind::List(items) => Some(items),
            _ => None,
        }
    }

    /// Field of a record.
    pub fn get(&self, field: &str) -> Option<&Self> {
        match self.kind() {
            Kind::Record(fields) => fields.iter().find(|(n, _)| n == field).map(|(_, v)| v),
            _ => None,
        }
    }

    /// A copy of this record with `field` set to `value` (appended if new).
    ///
    /// Returns `None` if this node is not a record.
    pub fn set(&self, field: &str, value: Self) -> Option<Self> {
        let Kind::Record(fields) = self.kind() else {
            return None;
        };
        let mut fields = fields.clone();
        match fields.iter_mut().find(|(n, _)| n == field) {
            Some(slot) => slot.1 = value,
            None => fields.push((String::from(field), value)),
        }
        Some(Self(Rc::new(Kind::Record(fields))))
    }

    /// Returns true if both handles point at the same node.
    pub fn same(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Structural equality, ignoring identity.
    pub fn deep_eq(&self, other: &Self) -> bool {
        if self.same(other) {
            return true;
        }
        match (self.kind(), other.kind()) {
            (Kind::Leaf(a), Kind::Leaf(b)) => a == b,
            (Kind::List(a), Kind::List(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.deep_eq(y))
            }
            (Kind::Record(a), Kind::Record(b)) => {
                a.len() == b.len()
                    && a
                        .iter()
                        .zip(b)
                        .all(|((na, va), (nb, vb))| na == nb && va.deep_eq(vb))
            }
            _ => false,
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            Kind::Leaf(text) => f.write_str(text),
            Kind::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Kind::Record(fields) => {
                f.write_str("{")?;
                for (i, (name, value)) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{name}: {value}")?;
                }
                f.write_str("}")
            }
        }
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node({self})")
    }
}

impl TreeNode for Node {
    type Key = Key;

    fn same(&self, other: &Self) -> bool {
        Self::same(self, other)
    }

    fn children(&self) -> Option<Vec<(Key, Self)>> {
        match self.kind() {
            Kind::Leaf(_) => None,
            Kind::List(items) => Some(
                items
                    .iter()
                    .enumerate()
                    .map(|(i, n)| (Key::Index(i), n.clone()))
                    .collect(),
            ),
            Kind::Record(fields) => Some(
                fields
                    .iter()
                    .map(|(name, n)| (Key::Field(name.clone()), n.clone()))
                    .collect(),
            ),
        }
    }

    fn child(&self, key: &Key) -> Option<Self> {
        match (self.kind(), key) {
            (Kind::List(items), Key::Index(i)) => items.get(*i).cloned(),
            (Kind::Record(_), Key::Field(name)) => self.get(name).cloned(),
            _ => None,
        }
    }

    fn with_child(&self, key: &Key, child: Self) -> Option<Self> {
        match (self.kind(), key) {
            (Kind::List(items), Key::Index(i)) if *i < items.len() => {
                let mut items = items.clone();
                items[*i] = child;
                Some(Self(Rc::new(Kind::List(items))))
            }
            (Kind::Record(_), Key::Field(name)) => {
                self.get(name)?;
                self.set(name, child)
            }
            _ => None,
        }
    }

    fn without_child(&self, key: &Key) -> Option<Self> {
        match (self.kind(), key) {
            (Kind::List(items), Key::Index(i)) if *i < items.len() => {
                let mut items = items.clone();
                items.remove(*i);
                Some(Self(Rc::new(Kind::List(items))))
            }
            (Kind::Record(fields), Key::Field(name)) => {
                let index = fields.iter().position(|(n, _)| n == name)?;
                let mut fields = fields.clone();
                fields.remove(index);
                Some(Self(Rc::new(Kind::Record(fields))))
            }
            _ => None,
        }
    }
}

/// [`ElementAccess`] for record nodes that keep their children in a list field.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RecordAccess {
    /// Field holding the record's identifier leaf.
    pub id_field: &'static str,
    /// Field holding the record's child list.
    pub elements_field: &'static str,
}

impl Default for RecordAccess {
    fn default() -> Self {
        Self {
            id_field: "_id",
            elements_field: "elements",
        }
    }
}

impl ElementAccess<Node> for RecordAccess {
    type Id = String;

    /// The id field of a record, the text of a leaf, or an empty string.
    fn identifier(&self, node: &Node) -> String {
        match node.kind() {
            Kind::Leaf(text) => text.clone(),
            Kind::Record(_) => node
                .get(self.id_field)
                .and_then(Node::as_leaf)
                .map(String::from)
                .unwrap_or_default(),
            Kind::List(_) => String::new(),
        }
    }

    fn elements(&self, container: &Node) -> Option<Vec<Node>> {
        container
            .get(self.elements_field)?
            .as_list()
            .map(<[Node]>::to_vec)
    }

    fn with_elements(&self, container: &Node, elements: Vec<Node>) -> Option<Node> {
        container.get(self.elements_field)?.as_list()?;
        container.set(self.elements_field, Node::list(elements))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec;

    #[test]
    fn display_renders_nested_values() {
        let node = Node::record([
            ("_id", Node::leaf("t")),
            (
                "elements",
                Node::list([Node::leaf("a"), Node::list([]), Node::record::<&str>([])]),
            ),
        ]);
        assert_eq!(node.to_string(), "{_id: t, elements: [a, [], {}]}");
    }

    #[test]
    fn record_keeps_field_order_and_last_duplicate() {
        let node = Node::record([
            ("b", Node::leaf("1")),
            ("a", Node::leaf("2")),
            ("b", Node::leaf("3")),
        ]);
        assert_eq!(node.to_string(), "{b: 3, a: 2}");
    }

    #[test]
    fn set_replaces_or_appends() {
        let node = Node::record([("a", Node::leaf("1"))]);
        let replaced = node.set("a", Node::leaf("2")).unwrap();
        let appended = replaced.set("b", Node::leaf("3")).unwrap();
        assert_eq!(node.to_string(), "{a: 1}");
        assert_eq!(appended.to_string(), "{a: 2, b: 3}");
        assert!(Node::leaf("x").set("a", Node::leaf("1")).is_none());
    }

    #[test]
    fn identity_differs_from_structural_equality() {
        let a = Node::list([Node::leaf("x")]);
        let b = Node::list([Node::leaf("x")]);
        assert!(a.deep_eq(&b));
        assert!(!a.same(&b));
        assert!(a.same(&a.clone()));
        assert!(!a.deep_eq(&Node::leaf("x")));
    }

    #[test]
    fn with_child_rejects_missing_keys() {
        let list = Node::list([Node::leaf("a")]);
        assert!(list.with_child(&Key::Index(1), Node::leaf("b")).is_none());
        assert!(
            list.with_child(&Key::Field("a".to_string()), Node::leaf("b"))
                .is_none()
        );
        let record = Node::record([("a", Node::leaf("1"))]);
        assert!(
            record
                .with_child(&Key::Field("b".to_string()), Node::leaf("2"))
                .is_none()
        );
        assert!(Node::leaf("a").children().is_none());
    }

    #[test]
    fn without_child_removes_item_or_field() {
        let list = Node::list([Node::leaf("a"), Node::leaf("b")]);
        assert_eq!(
            list.without_child(&Key::Index(0)).unwrap().to_string(),
            "[b]"
        );
        let record = Node::record([("a", Node::leaf("1")), ("b", Node::leaf("2"))]);
        assert_eq!(
            record
                .without_child(&Key::Field("a".to_string()))
                .unwrap()
                .to_string(),
            "{b: 2}"
        );
    }

    #[test]
    fn record_access_reads_and_replaces_elements() {
        let access = RecordAccess::default();
        let a = Node::leaf("a");
        let container = Node::record([
            ("_id", Node::leaf("box")),
            ("elements", Node::list([a.clone()])),
        ]);
        assert_eq!(access.identifier(&container), "box");
        assert_eq!(access.identifier(&a), "a");
        let elements = access.elements(&container).unwrap();
        assert!(elements[0].same(&a));

        let updated = access
            .with_elements(&container, vec![Node::leaf("b"), a.clone()])
            .unwrap();
        assert_eq!(updated.to_string(), "{_id: box, elements: [b, a]}");
        assert!(access.elements(&a).is_none());
        assert!(access.with_elements(&a, vec![]).is_none());
    }
}
