//! Selector compilation and validation.
//!
//! A selector is a JSON object tree whose leaves are marker strings. Keys name
//! object members in the data; a marker says "edit here". Validation runs once,
//! when the selector is compiled, never at apply time.

use serde_json::Value;

use crate::error::{ReduceError, SelectorFault};
use crate::types::{ReducerOptions, Target};

/// A validated selector tree together with the markers it contains.
#[derive(Debug, Clone, PartialEq)]
pub struct Selector {
    tree: Value,
    markers: Vec<Target>,
    sentinel: char,
}

impl Selector {
    /// Compile a selector with the default `#` sentinel.
    ///
    /// # Example
    ///
    /// ```
    /// use json_state_reducer::{Selector, Target};
    /// use serde_json::json;
    ///
    /// let selector = Selector::new(json!({"detail": {"friends": "#1", "age": "#2"}})).unwrap();
    /// assert_eq!(selector.markers().len(), 2);
    /// assert!(selector.contains(&Target::Named("#2".to_string())));
    ///
    /// assert!(Selector::new(json!([])).is_err());
    /// assert!(Selector::new(json!({})).is_err());
    /// ```
    pub fn new(tree: Value) -> Result<Self, ReduceError> {
        Self::with_options(tree, ReducerOptions::default())
    }

    pub fn with_options(tree: Value, options: ReducerOptions) -> Result<Self, ReduceError> {
        validate_selector(&tree)?;
        let mut markers = Vec::new();
        collect_markers(&tree, options.sentinel, &mut markers);
        Ok(Self {
            tree,
            markers,
            sentinel: options.sentinel,
        })
    }

    pub fn tree(&self) -> &Value {
        &self.tree
    }

    pub fn into_tree(self) -> Value {
        self.tree
    }

    pub fn sentinel(&self) -> char {
        self.sentinel
    }

    /// Distinct markers in the order they are first met in the tree.
    pub fn markers(&self) -> &[Target] {
        &self.markers
    }

    pub fn contains(&self, target: &Target) -> bool {
        self.markers.contains(target)
    }

    pub(crate) fn is_marker(&self, node: &Value) -> Option<Target> {
        match node {
            Value::String(s) => Target::parse(s, self.sentinel),
            _ => None,
        }
    }
}

/// Check that `tree` can serve as a selector root.
///
/// # Errors
///
/// - `null` → [`SelectorFault::Null`]
/// - an array → [`SelectorFault::Array`]
/// - any other non-object → [`SelectorFault::NotObject`]
/// - an object without keys → [`SelectorFault::Empty`]
pub fn validate_selector(tree: &Value) -> Result<(), SelectorFault> {
    match tree {
        Value::Null => Err(SelectorFault::Null),
        Value::Array(_) => Err(SelectorFault::Array),
        Value::Object(map) if map.is_empty() => Err(SelectorFault::Empty),
        Value::Object(_) => Ok(()),
        _ => Err(SelectorFault::NotObject),
    }
}

fn collect_markers(node: &Value, sentinel: char, out: &mut Vec<Target>) {
    match node {
        Value::String(s) => {
            if let Some(target) = Target::parse(s, sentinel) {
                if !out.contains(&target) {
                    out.push(target);
                }
            }
        }
        Value::Object(map) => {
            for child in map.values() {
                collect_markers(child, sentinel, out);
            }
        }
        _ => {}
    }
}
