//! # Pass-through builder
//!
//! Document types with no draft model (hybrid invoice, pharmacy invoice,
//! contract, verification act, acceptance-transfer act) are assembled
//! entirely from the initial partial and [`raw`](PassthroughBuilder::raw).

use didox_core::DocumentType;
use serde_json::Value;

use crate::builder::{DocumentBuilder, PayloadAccumulator};
use crate::error::BuildError;
use crate::payload::Payload;

/// Builder that submits whatever payload it accumulated.
#[derive(Debug, Clone)]
pub struct PassthroughBuilder {
    document: DocumentType,
    base: PayloadAccumulator,
}

impl PassthroughBuilder {
    /// Start a pass-through builder for `document`.
    pub fn new(document: DocumentType, initial: Option<Payload>) -> Self {
        Self {
            document,
            base: PayloadAccumulator::new(initial),
        }
    }

    /// Unchecked data, merged shallowly into the payload.
    pub fn raw(mut self, data: Value) -> Self {
        self.base.raw(data);
        self
    }
}

impl DocumentBuilder for PassthroughBuilder {
    fn document_type(&self) -> DocumentType {
        self.document
    }

    fn merge_raw(&mut self, data: Value) {
        self.base.raw(data);
    }

    fn build(&self) -> Result<Payload, BuildError> {
        let payload = self.base.build();
        tracing::debug!(
            document = %self.document,
            code = self.document.code(),
            fields = payload.len(),
            "built pass-through payload"
        );
        Ok(payload)
    }
}
