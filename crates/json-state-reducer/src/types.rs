//! Core types shared by the selector compiler, the builder and the engine.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::operation::OperationKind;

/// Character every marker string starts with, unless overridden.
pub const DEFAULT_SENTINEL: char = '#';

// ── Options ───────────────────────────────────────────────────────────────

/// Options for building a [`Reducer`](crate::Reducer).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReducerOptions {
    /// Leading character that turns a selector string into a marker.
    pub sentinel: char,
}

impl Default for ReducerOptions {
    fn default() -> Self {
        Self {
            sentinel: DEFAULT_SENTINEL,
        }
    }
}

// ── Target ────────────────────────────────────────────────────────────────

/// An edit target: the slot a pending operation is recorded under.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Target {
    /// The bare sentinel marker (`#`).
    Default,
    /// Any other marker, keyed by its full text (`#1`, `#age`, ...).
    Named(String),
}

impl Target {
    /// Interpret `text` as a marker. Returns `None` when it does not start
    /// with `sentinel`.
    pub fn parse(text: &str, sentinel: char) -> Option<Target> {
        let rest = text.strip_prefix(sentinel)?;
        if rest.is_empty() {
            Some(Target::Default)
        } else {
            Some(Target::Named(text.to_string()))
        }
    }

    pub fn is_default(&self) -> bool {
        matches!(self, Target::Default)
    }

    /// The marker text this target is written as inside a selector.
    pub fn marker(&self, sentinel: char) -> String {
        match self {
            Target::Default => sentinel.to_string(),
            Target::Named(name) => name.clone(),
        }
    }
}

// ── Pending operation ─────────────────────────────────────────────────────

/// One recorded `{operation, value}` pair awaiting `apply`.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingOperation {
    pub kind: OperationKind,
    pub value: Value,
}

impl PendingOperation {
    pub fn new(kind: OperationKind, value: Value) -> Self {
        Self { kind, value }
    }
}
