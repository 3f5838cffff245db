//! # Wire Payload and Merge Strategies
//!
//! A [`Payload`] is the exact JSON object the platform expects for one
//! document type. Builders produce it; the raw escape hatch merges
//! caller-supplied JSON into it, either shallowly or deeply.
//!
//! ## Merge laws
//!
//! - **Shallow**: every top-level key of the override replaces the
//!   generated key wholesale.
//! - **Deep**: when both sides hold an object under the same key the two
//!   objects merge key by key, recursively; at every other position
//!   (scalars, arrays, type mismatches) the override wins.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// How raw overrides combine with a generated payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeStrategy {
    /// Top-level key replacement.
    Shallow,
    /// Recursive object merge; override wins per leaf.
    Deep,
}

/// A document payload in wire form: a JSON object keyed by the platform's
/// PascalCase field names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Payload(Map<String, Value>);

static NULL: Value = Value::Null;

impl Payload {
    /// An empty payload.
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Interpret a JSON value as a payload. Non-object values yield `None`.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    /// Field lookup by top-level key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Nested lookup by JSON pointer, e.g. `/ProductList/Products/0/VatSum`.
    ///
    /// `~1` and `~0` escape `/` and `~` in every segment (RFC 6901).
    pub fn pointer(&self, pointer: &str) -> Option<&Value> {
        let tail = pointer.strip_prefix('/')?;
        let (first, rest) = match tail.find('/') {
            Some(pos) => tail.split_at(pos),
            None => (tail, ""),
        };
        let value = self.0.get(&first.replace("~1", "/").replace("~0", "~"))?;
        if rest.is_empty() {
            Some(value)
        } else {
            value.pointer(rest)
        }
    }

    /// Set a top-level field, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    /// Whether the payload has a top-level key.
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Number of top-level fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when there are no fields.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow the underlying JSON object.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Take the underlying JSON object.
    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    /// Convert into a `serde_json::Value::Object`.
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    /// Merge `overrides` into this payload using `strategy`.
    pub fn merge(&mut self, overrides: &Payload, strategy: MergeStrategy) {
        match strategy {
            MergeStrategy::Shallow => shallow_merge(&mut self.0, &overrides.0),
            MergeStrategy::Deep => deep_merge(&mut self.0, &overrides.0),
        }
    }
}

impl From<Map<String, Value>> for Payload {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl From<Payload> for Value {
    fn from(payload: Payload) -> Self {
        payload.into_value()
    }
}

impl std::ops::Index<&str> for Payload {
    type Output = Value;

    /// Missing keys index to `null`, like `serde_json::Value`.
    fn index(&self, key: &str) -> &Value {
        self.0.get(key).unwrap_or(&NULL)
    }
}

/// Replace each top-level key of `base` present in `overrides`.
pub fn shallow_merge(base: &mut Map<String, Value>, overrides: &Map<String, Value>) {
    for (key, value) in overrides {
        base.insert(key.clone(), value.clone());
    }
}

/// Merge `overrides` into `base` recursively. Objects merge key by key;
/// arrays and scalars from `overrides` replace what `base` holds.
pub fn deep_merge(base: &mut Map<String, Value>, overrides: &Map<String, Value>) {
    for (key, value) in overrides {
        if let (Some(Value::Object(existing)), Value::Object(incoming)) = (base.get_mut(key), value) {
            deep_merge(existing, incoming);
            continue;
        }
        base.insert(key.clone(), value.clone());
    }
}
