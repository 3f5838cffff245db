//! # Base Builder
//!
//! [`PayloadAccumulator`] is the state every concrete builder composes: a
//! partial wire payload seeded from the factory's initial value and grown by
//! the raw escape hatch. [`DocumentBuilder`] is the one-level interface all
//! builders implement.
//!
//! Concrete builders keep their draft separate from the accumulator and only
//! project it into wire form inside `build()`. The accumulated payload is
//! then laid over the generated one with the builder's [`MergeStrategy`].

use didox_core::DocumentType;
use serde::Serialize;
use serde_json::Value;

use crate::error::BuildError;
use crate::payload::{shallow_merge, MergeStrategy, Payload};

/// Interface shared by every document builder.
///
/// Chaining setters are inherent, consuming methods on each builder; this
/// trait carries what the registry and the HTTP client need to drive a
/// builder without knowing its concrete type.
pub trait DocumentBuilder: Send + Sync {
    /// Type code the built payload is submitted under.
    fn document_type(&self) -> DocumentType;

    /// Shallow-merge unchecked raw data into the accumulated overrides.
    ///
    /// Non-object values are ignored. Nothing is validated: whatever lands
    /// here reaches the outgoing payload verbatim.
    fn merge_raw(&mut self, data: Value);

    /// Validate the draft and produce a fresh payload snapshot.
    ///
    /// Calling `build` repeatedly without intermediate changes yields equal
    /// payloads; the returned value shares nothing with the builder.
    fn build(&self) -> Result<Payload, BuildError>;
}

/// Accumulated partial payload behind every builder.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PayloadAccumulator {
    payload: Payload,
}

impl PayloadAccumulator {
    /// Seed with a copy of `initial`, or start empty.
    pub fn new(initial: Option<Payload>) -> Self {
        Self {
            payload: initial.unwrap_or_default(),
        }
    }

    /// Shallow-merge `data` into the accumulated payload. Top-level keys are
    /// overwritten; non-object values are dropped.
    pub fn raw(&mut self, data: Value) {
        match data {
            Value::Object(map) => {
                let mut current = std::mem::take(&mut self.payload).into_map();
                shallow_merge(&mut current, &map);
                self.payload = Payload::from(current);
            }
            other => {
                tracing::warn!(kind = value_kind(&other), "ignoring non-object raw payload data");
            }
        }
    }

    /// Copy of the accumulated payload.
    pub fn build(&self) -> Payload {
        self.payload.clone()
    }

    /// Lay the accumulated payload over `generated`.
    pub fn overlay(&self, mut generated: Payload, strategy: MergeStrategy) -> Payload {
        generated.merge(&self.payload, strategy);
        generated
    }

    /// Whether any override has been accumulated.
    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Encode a generated wire struct, lay the accumulated overrides over it,
/// and log the result.
pub(crate) fn finish<T: Serialize>(
    document: DocumentType,
    wire: &T,
    base: &PayloadAccumulator,
    strategy: MergeStrategy,
) -> Result<Payload, BuildError> {
    let value = serde_json::to_value(wire).map_err(|e| BuildError::Encoding {
        document,
        reason: e.to_string(),
    })?;
    let generated = Payload::from_value(value).ok_or_else(|| BuildError::Encoding {
        document,
        reason: "generated payload is not a JSON object".into(),
    })?;

    let payload = base.overlay(generated, strategy);
    tracing::debug!(
        document = %document,
        code = document.code(),
        fields = payload.len(),
        overridden = !base.is_empty(),
        "built document payload"
    );
    Ok(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn seeds_from_initial_partial() {
        let initial = Payload::from_value(json!({"A": 1})).unwrap();
        let acc = PayloadAccumulator::new(Some(initial));
        assert_eq!(acc.build()["A"], json!(1));
    }

    #[test]
    fn raw_is_shallow_and_last_writer_wins() {
        let mut acc = PayloadAccumulator::new(None);
        acc.raw(json!({"A": {"x": 1}, "B": 2}));
        acc.raw(json!({"A": {"y": 2}}));
        let built = acc.build();
        assert_eq!(built["A"], json!({"y": 2}));
        assert_eq!(built["B"], json!(2));
    }

    #[test]
    fn raw_ignores_non_objects() {
        let mut acc = PayloadAccumulator::new(None);
        acc.raw(json!("garbage"));
        acc.raw(json!([1, 2]));
        assert!(acc.is_empty());
    }

    #[test]
    fn build_returns_detached_copy() {
        let mut acc = PayloadAccumulator::new(None);
        acc.raw(json!({"A": 1}));
        let mut first = acc.build();
        first.insert("A", json!(99));
        assert_eq!(acc.build()["A"], json!(1));
    }

    #[test]
    fn overlay_respects_strategy() {
        let mut acc = PayloadAccumulator::new(None);
        acc.raw(json!({"Seller": {"Director": "X"}}));
        let generated = Payload::from_value(json!({"Seller": {"Name": "N", "Director": "D"}})).unwrap();

        let deep = acc.overlay(generated.clone(), MergeStrategy::Deep);
        assert_eq!(deep["Seller"], json!({"Name": "N", "Director": "X"}));

        let shallow = acc.overlay(generated, MergeStrategy::Shallow);
        assert_eq!(shallow["Seller"], json!({"Director": "X"}));
    }

    #[test]
    fn finish_rejects_non_object_wire() {
        let acc = PayloadAccumulator::new(None);
        let err = finish(DocumentType::Act, &vec![1, 2], &acc, MergeStrategy::Shallow).unwrap_err();
        assert!(matches!(err, BuildError::Encoding { document: DocumentType::Act, .. }));
    }
}
