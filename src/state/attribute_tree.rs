// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Raw attribute tree with structural merge.
//!
//! JSON objects become [`AttributeTree::Node`]s; everything else, arrays
//! included, is a [`AttributeTree::Leaf`]. Merging a patch descends through
//! nodes present on both sides and overwrites leaves, so keys absent from the
//! patch are never touched.
//!
//! # Examples
//!
//! ```
//! use serde_json::json;
//! use automower_lib::state::AttributeTree;
//!
//! let mut tree = AttributeTree::from(json!({
//!     "settings": { "cuttingHeight": 4, "headlight": { "mode": "ALWAYS_ON" } }
//! }));
//! tree.merge(AttributeTree::from(json!({
//!     "settings": { "headlight": { "mode": "ALWAYS_OFF" } }
//! })));
//!
//! assert_eq!(
//!     tree.to_value(),
//!     json!({ "settings": { "cuttingHeight": 4, "headlight": { "mode": "ALWAYS_OFF" } } })
//! );
//! ```

use std::collections::BTreeMap;

use serde_json::{Map, Value};

/// A leaf value or a nested object.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeTree {
    /// Scalar, array or null.
    Leaf(Value),
    /// Object with named children.
    Node(BTreeMap<String, AttributeTree>),
}

impl Default for AttributeTree {
    fn default() -> Self {
        Self::Node(BTreeMap::new())
    }
}

impl From<Value> for AttributeTree {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => {
                Self::Node(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
            other => Self::Leaf(other),
        }
    }
}

impl AttributeTree {
    /// Merges `patch` into this tree.
    ///
    /// Nodes on both sides merge key by key; any other combination replaces
    /// the existing subtree with the patch.
    pub fn merge(&mut self, patch: AttributeTree) {
        match (self, patch) {
            (Self::Node(existing), Self::Node(incoming)) => {
                for (key, subtree) in incoming {
                    match existing.get_mut(&key) {
                        Some(current) => current.merge(subtree),
                        None => {
                            existing.insert(key, subtree);
                        }
                    }
                }
            }
            (slot, patch) => *slot = patch,
        }
    }

    /// Returns the subtree at `path`.
    #[must_use]
    pub fn get(&self, path: &[&str]) -> Option<&AttributeTree> {
        path.iter().try_fold(self, |tree, key| match tree {
            Self::Node(children) => children.get(*key),
            Self::Leaf(_) => None,
        })
    }

    /// Returns the leaf value at `path`.
    #[must_use]
    pub fn leaf(&self, path: &[&str]) -> Option<&Value> {
        match self.get(path)? {
            Self::Leaf(value) => Some(value),
            Self::Node(_) => None,
        }
    }

    /// Sets the subtree at `path`, creating intermediate nodes.
    ///
    /// Leaves in the way are replaced by nodes. An empty path replaces the
    /// whole tree.
    pub fn set(&mut self, path: &[&str], subtree: AttributeTree) {
        let Some((first, rest)) = path.split_first() else {
            *self = subtree;
            return;
        };
        if matches!(self, Self::Leaf(_)) {
            *self = Self::default();
        }
        if let Self::Node(children) = self {
            children
                .entry((*first).to_string())
                .or_default()
                .set(rest, subtree);
        }
    }

    /// Converts back into JSON.
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Self::Leaf(value) => value.clone(),
            Self::Node(children) => Value::Object(
                children
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_value()))
                    .collect::<Map<_, _>>(),
            ),
        }
    }
}
