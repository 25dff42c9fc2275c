//! Dual traversal of a document and a selector.
//!
//! The walk descends the document and the selector in lockstep. Object keys in
//! the selector pick children in the document; a marker leaf is where the
//! pending operation for that target is applied. Branches that end up
//! unchanged stay borrowed from the input, and a parent is only copied once
//! one of its children was actually rebuilt.

use std::borrow::Cow;
use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::ReduceError;
use crate::selector::Selector;
use crate::types::{PendingOperation, Target};

pub(crate) struct Transform<'s> {
    pub selector: &'s Selector,
    pub pending: &'s BTreeMap<Target, PendingOperation>,
}

impl<'s> Transform<'s> {
    pub fn run<'a>(&self, root: &'a Value) -> Result<Cow<'a, Value>, ReduceError> {
        self.select(root, self.selector.tree())
    }

    fn select<'a>(&self, current: &'a Value, selector: &Value) -> Result<Cow<'a, Value>, ReduceError> {
        if let Some(target) = self.selector.is_marker(selector) {
            return self.apply_at(current, &target);
        }

        let keys = match selector {
            Value::Object(keys) => keys,
            // Plain strings, numbers and the like select nothing.
            _ => return Ok(Cow::Borrowed(current)),
        };
        let map = match current {
            Value::Object(map) => map,
            _ => return Ok(Cow::Borrowed(current)),
        };

        let mut copy = None;
        for (key, child_selector) in keys {
            let child = match map.get(key) {
                Some(child) => child,
                None => {
                    // The whole branch is abandoned, not just this key.
                    tracing::debug!(key = %key, "selector key missing, branch left unchanged");
                    return Ok(Cow::Borrowed(current));
                }
            };
            if let Cow::Owned(next) = self.select(child, child_selector)? {
                copy.get_or_insert_with(|| map.clone())
                    .insert(key.clone(), next);
            }
        }

        Ok(match copy {
            Some(copy) => Cow::Owned(Value::Object(copy)),
            None => Cow::Borrowed(current),
        })
    }

    fn apply_at<'a>(&self, current: &'a Value, target: &Target) -> Result<Cow<'a, Value>, ReduceError> {
        if self.pending.is_empty() {
            return Err(ReduceError::NoOperationRecorded);
        }
        match self.pending.get(target) {
            Some(op) => Ok(op.kind.apply(current, &op.value)),
            None => Ok(Cow::Borrowed(current)),
        }
    }
}
