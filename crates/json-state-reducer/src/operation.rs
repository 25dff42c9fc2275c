//! Pure operation functions applied at a matched target.
//!
//! Each function takes the value currently at the target and an operand and
//! returns the new value. Operands that do not fit the target (wrong type,
//! `null`, empty) return the current value unchanged, as `Cow::Borrowed`.

use std::borrow::Cow;
use std::fmt;

use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Set,
    Append,
    Merge,
    Extend,
    Delete,
}

impl OperationKind {
    pub const ALL: [OperationKind; 5] = [
        OperationKind::Set,
        OperationKind::Append,
        OperationKind::Merge,
        OperationKind::Extend,
        OperationKind::Delete,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Set => "set",
            OperationKind::Append => "append",
            OperationKind::Merge => "merge",
            OperationKind::Extend => "extend",
            OperationKind::Delete => "delete",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "set" => Some(OperationKind::Set),
            "append" => Some(OperationKind::Append),
            "merge" => Some(OperationKind::Merge),
            "extend" => Some(OperationKind::Extend),
            "delete" => Some(OperationKind::Delete),
            _ => None,
        }
    }

    /// Run this operation against `current`.
    pub fn apply<'a>(&self, current: &'a Value, operand: &Value) -> Cow<'a, Value> {
        match self {
            OperationKind::Set => set(current, operand),
            OperationKind::Append => append(current, operand),
            OperationKind::Merge => merge(current, operand),
            OperationKind::Extend => extend(current, operand),
            OperationKind::Delete => delete(current, operand),
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Operations ────────────────────────────────────────────────────────────

/// Replace the target with `value`; `null` keeps the old value.
pub fn set<'a>(old: &'a Value, value: &Value) -> Cow<'a, Value> {
    if value.is_null() {
        return Cow::Borrowed(old);
    }
    Cow::Owned(value.clone())
}

/// Push `value` onto the end of a sequence.
pub fn append<'a>(old: &'a Value, value: &Value) -> Cow<'a, Value> {
    match old {
        Value::Array(items) if !value.is_null() => {
            let mut out = Vec::with_capacity(items.len() + 1);
            out.extend(items.iter().cloned());
            out.push(value.clone());
            Cow::Owned(Value::Array(out))
        }
        _ => Cow::Borrowed(old),
    }
}

/// Concatenate two sequences.
pub fn extend<'a>(old: &'a Value, value: &Value) -> Cow<'a, Value> {
    match (old, value) {
        (Value::Array(items), Value::Array(more)) if !more.is_empty() => {
            let mut out = Vec::with_capacity(items.len() + more.len());
            out.extend(items.iter().cloned());
            out.extend(more.iter().cloned());
            Cow::Owned(Value::Array(out))
        }
        _ => Cow::Borrowed(old),
    }
}

/// Shallow union of two mappings; keys in `value` win.
///
/// A target that is not a mapping contributes no keys.
pub fn merge<'a>(old: &'a Value, value: &Value) -> Cow<'a, Value> {
    match value {
        Value::Object(extra) if !extra.is_empty() => {
            let mut out: Map<String, Value> = match old {
                Value::Object(base) => base.clone(),
                _ => Map::new(),
            };
            for (key, val) in extra {
                out.insert(key.clone(), val.clone());
            }
            Cow::Owned(Value::Object(out))
        }
        _ => Cow::Borrowed(old),
    }
}

/// Read a sequence index from a number. Integral floats count.
fn as_index(n: &serde_json::Number) -> Option<u64> {
    n.as_u64().or_else(|| {
        n.as_f64()
            .filter(|f| *f >= 0.0 && f.fract() == 0.0 && *f <= u64::MAX as f64)
            .map(|f| f as u64)
    })
}

/// Remove an index from a sequence or a key from a mapping.
///
/// Sequences take a non-negative integral number (`1` or `1.0`), mappings take
/// a string. Any other
/// pairing, or an index out of range, leaves the target alone.
pub fn delete<'a>(old: &'a Value, key: &Value) -> Cow<'a, Value> {
    match (old, key) {
        (Value::Array(items), Value::Number(n)) => match as_index(n)
            .and_then(|idx| usize::try_from(idx).ok())
            .filter(|idx| *idx < items.len())
        {
            Some(idx) => {
                let out = items
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| *i != idx)
                    .map(|(_, v)| v.clone())
                    .collect();
                Cow::Owned(Value::Array(out))
            }
            _ => Cow::Borrowed(old),
        },
        (Value::Object(map), Value::String(k)) if map.contains_key(k) => {
            let out = map
                .iter()
                .filter(|(key, _)| *key != k)
                .map(|(key, v)| (key.clone(), v.clone()))
                .collect();
            Cow::Owned(Value::Object(out))
        }
        _ => Cow::Borrowed(old),
    }
}
