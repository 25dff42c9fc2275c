//! Chainable accumulator of pending operations.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::ReduceError;
use crate::operation::OperationKind;
use crate::selector::Selector;
use crate::transform::Transform;
use crate::types::{PendingOperation, Target};

/// Records at most one operation per target, then applies them all in a
/// single traversal of the root document.
///
/// Every recording method returns `&mut Self`, so calls chain:
///
/// ```
/// use json_state_reducer::make_reducer;
/// use serde_json::json;
///
/// let state = json!({"detail": {"friends": ["Robus"], "age": 23}});
/// let reducer = make_reducer(json!({"detail": {"friends": "#1", "age": "#2"}})).unwrap();
/// let next = reducer
///     .reduce(&state)
///     .of("#1")
///     .append("Chumlung")
///     .of("#2")
///     .set(24)
///     .apply()
///     .unwrap();
/// assert_eq!(next, json!({"detail": {"friends": ["Robus", "Chumlung"], "age": 24}}));
/// ```
#[derive(Debug, Clone)]
pub struct Builder<'a> {
    root: &'a Value,
    selector: &'a Selector,
    pending: BTreeMap<Target, PendingOperation>,
    active: Target,
}

impl<'a> Builder<'a> {
    pub(crate) fn new(selector: &'a Selector, root: &'a Value) -> Self {
        Self {
            root,
            selector,
            pending: BTreeMap::new(),
            active: Target::Default,
        }
    }

    pub fn root(&self) -> &'a Value {
        self.root
    }

    pub fn active_target(&self) -> &Target {
        &self.active
    }

    pub fn pending(&self) -> &BTreeMap<Target, PendingOperation> {
        &self.pending
    }

    /// Switch the active target. Strings that are not markers are ignored.
    pub fn of(&mut self, target: &str) -> &mut Self {
        if let Some(target) = Target::parse(target, self.selector.sentinel()) {
            self.active = target;
        }
        self
    }

    pub fn set(&mut self, value: impl Into<Value>) -> &mut Self {
        self.record(OperationKind::Set, value.into())
    }

    pub fn append(&mut self, value: impl Into<Value>) -> &mut Self {
        self.record(OperationKind::Append, value.into())
    }

    pub fn merge(&mut self, value: impl Into<Value>) -> &mut Self {
        self.record(OperationKind::Merge, value.into())
    }

    pub fn extend(&mut self, value: impl Into<Value>) -> &mut Self {
        self.record(OperationKind::Extend, value.into())
    }

    /// Delete an index (number) from a sequence or a key (string) from a mapping.
    pub fn delete(&mut self, key: impl Into<Value>) -> &mut Self {
        self.record(OperationKind::Delete, key.into())
    }

    /// Record `kind` under the active target, replacing anything already there.
    pub fn record(&mut self, kind: OperationKind, value: Value) -> &mut Self {
        self.pending
            .insert(self.active.clone(), PendingOperation::new(kind, value));
        self
    }

    pub fn set_many<I, K, V>(&mut self, entries: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        self.record_many(OperationKind::Set, entries)
    }

    pub fn append_many<I, K, V>(&mut self, entries: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        self.record_many(OperationKind::Append, entries)
    }

    pub fn merge_many<I, K, V>(&mut self, entries: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        self.record_many(OperationKind::Merge, entries)
    }

    pub fn extend_many<I, K, V>(&mut self, entries: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        self.record_many(OperationKind::Extend, entries)
    }

    pub fn delete_many<I, K, V>(&mut self, entries: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        self.record_many(OperationKind::Delete, entries)
    }

    /// Record `kind` for each `(marker, operand)` pair. Pairs whose key is not
    /// a marker are skipped; the active target is left as it was.
    pub fn record_many<I, K, V>(&mut self, kind: OperationKind, entries: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        let sentinel = self.selector.sentinel();
        for (marker, value) in entries {
            if let Some(target) = Target::parse(marker.as_ref(), sentinel) {
                self.pending
                    .insert(target, PendingOperation::new(kind, value.into()));
            }
        }
        self
    }

    /// Produce the transformed document. The root is never modified.
    ///
    /// # Errors
    ///
    /// [`ReduceError::NoOperationRecorded`] when a marker is reached and no
    /// operation was ever recorded.
    pub fn apply(&self) -> Result<Value, ReduceError> {
        tracing::trace!(
            pending = self.pending.len(),
            markers = self.selector.markers().len(),
            "applying reducer"
        );
        for target in self.pending.keys() {
            if !self.selector.contains(target) {
                tracing::debug!(?target, "no marker in selector for target");
            }
        }
        let transform = Transform {
            selector: self.selector,
            pending: &self.pending,
        };
        Ok(transform.run(self.root)?.into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn selector() -> Selector {
        Selector::new(json!({"a": "#", "b": "#1"})).unwrap()
    }

    #[test]
    fn test_operations_default_to_default_target() {
        let sel = selector();
        let root = json!({});
        let mut builder = Builder::new(&sel, &root);
        assert!(std::ptr::eq(builder.root(), &root));
        builder.set(1);
        assert_eq!(builder.active_target(), &Target::Default);
        assert!(builder.pending().contains_key(&Target::Default));
    }

    #[test]
    fn test_last_write_wins_per_target() {
        let sel = selector();
        let root = json!({});
        let mut builder = Builder::new(&sel, &root);
        builder.set(1).append(2).merge(json!({"k": 3}));
        assert_eq!(builder.pending().len(), 1);
        assert_eq!(
            builder.pending()[&Target::Default],
            PendingOperation::new(OperationKind::Merge, json!({"k": 3}))
        );
    }

    #[test]
    fn test_of_ignores_non_markers() {
        let sel = selector();
        let root = json!({});
        let mut builder = Builder::new(&sel, &root);
        builder.of("#1").of("nope").of("");
        assert_eq!(builder.active_target(), &Target::Named("#1".to_string()));
        builder.of("#");
        assert_eq!(builder.active_target(), &Target::Default);
    }

    #[test]
    fn test_of_unknown_target_is_recorded_but_inert() {
        let sel = selector();
        let root = json!({"a": 1, "b": 2});
        let out = Builder::new(&sel, &root).of("#9").set(5).apply().unwrap();
        assert_eq!(out, root);
    }

    #[test]
    fn test_record_many() {
        let sel = selector();
        let root = json!({"a": 1, "b": 2});
        let mut builder = Builder::new(&sel, &root);
        builder.of("#1").set_many([("#", json!(10)), ("#1", json!(20)), ("x", json!(30))]);
        assert_eq!(builder.pending().len(), 2);
        assert_eq!(builder.active_target(), &Target::Named("#1".to_string()));
        assert_eq!(builder.apply().unwrap(), json!({"a": 10, "b": 20}));
    }

    #[test]
    fn test_apply_is_repeatable() {
        let sel = selector();
        let root = json!({"a": [1], "b": 2});
        let mut builder = Builder::new(&sel, &root);
        builder.append(2);
        let first = builder.apply().unwrap();
        let second = builder.apply().unwrap();
        assert_eq!(first, json!({"a": [1, 2], "b": 2}));
        assert_eq!(first, second);
    }
}
