//! Building selectors from JSON Pointers (RFC 6901).
//!
//! `"/detail/address/permanent"` becomes
//! `{"detail": {"address": {"permanent": "#"}}}`.

use serde_json::{Map, Value};

use crate::error::{ReduceError, SelectorFault};
use crate::selector::Selector;
use crate::types::{ReducerOptions, Target};

/// Unescape a pointer component: `~1` → `/`, then `~0` → `~`.
fn unescape_component(component: &str) -> String {
    if !component.contains('~') {
        return component.to_string();
    }
    component.replace("~1", "/").replace("~0", "~")
}

/// Split a pointer into object keys. A missing leading `/` is tolerated.
fn parse_pointer(pointer: &str) -> Vec<String> {
    if pointer.is_empty() {
        return Vec::new();
    }
    let body = pointer.strip_prefix('/').unwrap_or(pointer);
    body.split('/').map(unescape_component).collect()
}

impl Selector {
    /// Selector with a single default target at `pointer`.
    ///
    /// ```
    /// use json_state_reducer::Selector;
    /// use serde_json::json;
    ///
    /// let selector = Selector::from_pointer("/detail/address/permanent").unwrap();
    /// assert_eq!(selector.tree(), &json!({"detail": {"address": {"permanent": "#"}}}));
    /// ```
    pub fn from_pointer(pointer: &str) -> Result<Self, ReduceError> {
        let sentinel = ReducerOptions::default().sentinel.to_string();
        Self::from_pointers([(pointer, sentinel.as_str())])
    }

    /// Selector with one marker per `(pointer, marker)` pair.
    pub fn from_pointers<'p, I>(targets: I) -> Result<Self, ReduceError>
    where
        I: IntoIterator<Item = (&'p str, &'p str)>,
    {
        Self::from_pointers_with_options(targets, ReducerOptions::default())
    }

    pub fn from_pointers_with_options<'p, I>(
        targets: I,
        options: ReducerOptions,
    ) -> Result<Self, ReduceError>
    where
        I: IntoIterator<Item = (&'p str, &'p str)>,
    {
        let mut root = Map::new();
        for (pointer, marker) in targets {
            if Target::parse(marker, options.sentinel).is_none() {
                return Err(SelectorFault::NotMarker(marker.to_string()).into());
            }
            let path = parse_pointer(pointer);
            insert_marker(&mut root, &path, marker, pointer)?;
        }
        Selector::with_options(Value::Object(root), options)
    }
}

fn insert_marker(
    root: &mut Map<String, Value>,
    path: &[String],
    marker: &str,
    pointer: &str,
) -> Result<(), SelectorFault> {
    let (last, parents) = path.split_last().ok_or(SelectorFault::RootPointer)?;
    let mut node = root;
    for key in parents {
        let child = node
            .entry(key.clone())
            .or_insert_with(|| Value::Object(Map::new()));
        node = match child {
            Value::Object(map) => map,
            _ => return Err(SelectorFault::Overlap(pointer.to_string())),
        };
    }
    if node.contains_key(last) {
        return Err(SelectorFault::Overlap(pointer.to_string()));
    }
    node.insert(last.clone(), Value::String(marker.to_string()));
    Ok(())
}
