//! Attribute-bearing tree nodes used as the save format for participant state

use crate::hash::{hash_node, NodeHash};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Display;

/// A named element with string attributes and ordered children
///
/// Attributes are kept sorted by key so that serialization and hashing are
/// deterministic. Children keep document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Element name (tag)
    name: String,
    /// String-keyed attributes
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    attributes: BTreeMap<String, String>,
    /// Child elements in document order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    children: Vec<Node>,
}

impl Node {
    /// Create a new element with no attributes or children
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    /// Element name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the element in place
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Set an attribute, stringifying the value
    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Display) -> &mut Self {
        self.attributes.insert(key.into(), value.to_string());
        self
    }

    /// Get an attribute value
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Get an attribute parsed as a boolean
    ///
    /// Accepts `1`/`0` as written by the save path, and `true`/`false`.
    pub fn bool_attribute(&self, key: &str) -> Option<bool> {
        match self.attribute(key)?.trim() {
            "1" | "true" => Some(true),
            "0" | "false" => Some(false),
            _ => None,
        }
    }

    pub fn has_attribute(&self, key: &str) -> bool {
        self.attributes.contains_key(key)
    }

    pub fn remove_attribute(&mut self, key: &str) -> Option<String> {
        self.attributes.remove(key)
    }

    /// Iterate attributes sorted by key
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn attribute_count(&self) -> usize {
        self.attributes.len()
    }

    /// Append a child and return a handle to it
    pub fn append_child(&mut self, child: Node) -> &mut Node {
        self.children.push(child);
        let last = self.children.len() - 1;
        &mut self.children[last]
    }

    /// Direct children in document order
    pub fn children(&self) -> std::slice::Iter<'_, Node> {
        self.children.iter()
    }

    pub fn children_mut(&mut self) -> std::slice::IterMut<'_, Node> {
        self.children.iter_mut()
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// First direct child with the given name
    pub fn first_child_named(&self, name: &str) -> Option<&Node> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Depth-first pre-order traversal of this node and all descendants
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            stack: vec![(self.name.clone(), 0, self)],
        }
    }

    /// Visit this node and every descendant mutably, pre-order
    pub fn visit_mut(&mut self, f: &mut impl FnMut(&mut Node)) {
        f(self);
        for child in &mut self.children {
            child.visit_mut(f);
        }
    }

    /// Content hash of this node and its subtree
    pub fn content_hash(&self) -> NodeHash {
        hash_node(self)
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize node")
    }

    /// Parse a node from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse node JSON")
    }
}

/// A node reached by [`Node::walk`]
#[derive(Debug, Clone)]
pub struct Visit<'a> {
    /// Slash-separated names from the root, siblings disambiguated as `name[i]`
    pub path: String,
    /// Depth below the walk root (root is 0)
    pub depth: usize,
    pub node: &'a Node,
}

/// Pre-order iterator over a subtree
pub struct Walk<'a> {
    stack: Vec<(String, usize, &'a Node)>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = Visit<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let (path, depth, node) = self.stack.pop()?;

        // Push in reverse so children come out in document order
        for (index, child) in node.children.iter().enumerate().rev() {
            let child_path = format!("{}/{}[{}]", path, child.name, index);
            self.stack.push((child_path, depth + 1, child));
        }

        Some(Visit { path, depth, node })
    }
}
