mod json;


use crate::value::Value;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

// re-exports
pub use json::{LoadError, load_roots};

///
/// CONSTANTS
///

/// Conventional child collection name for person-shaped documents.
pub const CHILDREN: &str = "children";

///
/// Node
///
/// One hierarchical record: scalar attributes plus named, ordered child
/// collections. A single nested record (`"company": {..}`) is held as a
/// one-element collection under its field name so every level is traversed
/// the same way.
///
/// Nodes are immutable once built; evaluation only ever borrows them.
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Node {
    attributes: BTreeMap<String, Value>,
    collections: BTreeMap<String, Vec<Self>>,
}

impl Node {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    ///
    /// BUILDERS
    ///

    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_children(mut self, field: impl Into<String>, children: Vec<Self>) -> Self {
        self.collections.insert(field.into(), children);
        self
    }

    /// Attach a single nested record under `field`.
    #[must_use]
    pub fn with_record(self, field: impl Into<String>, record: Self) -> Self {
        self.with_children(field, vec![record])
    }

    ///
    /// ACCESSORS
    ///

    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    #[must_use]
    pub const fn attributes(&self) -> &BTreeMap<String, Value> {
        &self.attributes
    }

    /// Named child collection, or `None` when the field is absent.
    #[must_use]
    pub fn collection(&self, field: &str) -> Option<&[Self]> {
        self.collections.get(field).map(Vec::as_slice)
    }

    /// Named child collection; an absent field reads as zero children.
    #[must_use]
    pub fn children(&self, field: &str) -> &[Self] {
        self.collection(field).unwrap_or_default()
    }

    #[must_use]
    pub fn collection_names(&self) -> impl Iterator<Item = &str> {
        self.collections.keys().map(String::as_str)
    }

    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.collections.values().all(Vec::is_empty)
    }

    /// Total number of nodes in this subtree, including `self`.
    #[must_use]
    pub fn subtree_len(&self) -> usize {
        1 + self
            .collections
            .values()
            .flatten()
            .map(Self::subtree_len)
            .sum::<usize>()
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}
