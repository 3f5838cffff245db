//! Typed client for Didox document creation.
//!
//! Submits wire payloads produced by `didox-documents` builders to
//! `POST {base_url}/v1/documents/{code}/create`.

use didox_core::DocumentType;
use didox_documents::{DocumentBuilder, Payload};
use serde::Deserialize;

use crate::auth::AuthToken;
use crate::config::DidoxConfig;
use crate::error::DidoxApiError;
use crate::retry::{retry_send, RetryPolicy};

// -- Types matching Didox API schemas -----------------------------------------

/// Summary of a freshly created document.
///
/// Only the identifier is guaranteed; the rest varies between document
/// types and API versions.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreatedDocument {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub doctype: Option<String>,
    #[serde(default)]
    pub status: Option<i64>,
}

// -- Client -------------------------------------------------------------------

/// Client for the Didox document endpoints.
#[derive(Debug, Clone)]
pub struct DocumentsClient {
    http: reqwest::Client,
    config: DidoxConfig,
}

impl DocumentsClient {
    pub(crate) fn new(http: reqwest::Client, config: DidoxConfig) -> Self {
        Self { http, config }
    }

    /// Create a document of type `document` from a prepared payload.
    ///
    /// Calls `POST {base_url}/v1/documents/{code}/create` with the user token
    /// in the `user-key` header. Only connection failures are retried; a
    /// timed-out request is reported, since the server may have stored the
    /// document.
    pub async fn create(
        &self,
        token: &AuthToken,
        document: DocumentType,
        payload: &Payload,
    ) -> Result<CreatedDocument, DidoxApiError> {
        let endpoint = format!("POST /v1/documents/{}/create", document.code());
        let url = self.config.endpoint(&format!("v1/documents/{}/create", document.code()));

        tracing::debug!(
            endpoint = %endpoint,
            document = %document,
            fields = payload.len(),
            "submitting document"
        );
        let resp = retry_send(&endpoint, RetryPolicy::ConnectOnly, || {
            self.http
                .post(&url)
                .header("user-key", token.as_str())
                .json(payload)
                .send()
        })
        .await
        .map_err(|e| DidoxApiError::Http {
            endpoint: endpoint.clone(),
            source: e,
        })?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(endpoint = %endpoint, status, "Didox rejected document");
            return Err(DidoxApiError::ApiError { endpoint, status, body });
        }

        let created: CreatedDocument = resp
            .json()
            .await
            .map_err(|e| DidoxApiError::Deserialization {
                endpoint: endpoint.clone(),
                source: e,
            })?;
        tracing::debug!(endpoint = %endpoint, id = %created.id, "document created");
        Ok(created)
    }

    /// Create a document whose type is given as a registry name (`"act"`)
    /// or a wire code (`"005"`).
    pub async fn create_by_code(
        &self,
        token: &AuthToken,
        code: &str,
        payload: &Payload,
    ) -> Result<CreatedDocument, DidoxApiError> {
        let document: DocumentType = code.parse()?;
        self.create(token, document, payload).await
    }

    /// Build `builder` and submit the result under the builder's type code.
    ///
    /// Build failures are returned as [`DidoxApiError::Build`] without any
    /// request being sent.
    pub async fn create_from(
        &self,
        token: &AuthToken,
        builder: &dyn DocumentBuilder,
    ) -> Result<CreatedDocument, DidoxApiError> {
        let payload = builder.build()?;
        self.create(token, builder.document_type(), &payload).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn created_document_tolerates_missing_fields() {
        let doc: CreatedDocument = serde_json::from_value(serde_json::json!({"_id": "abc"})).unwrap();
        assert_eq!(doc.id, "abc");
        assert_eq!(doc.doctype, None);
        assert_eq!(doc.status, None);
    }

    #[test]
    fn created_document_reads_known_fields() {
        let doc: CreatedDocument = serde_json::from_value(serde_json::json!({
            "_id": "6543",
            "doctype": "005",
            "status": 0,
            "extra": {"ignored": true}
        }))
        .unwrap();
        assert_eq!(doc.doctype.as_deref(), Some("005"));
        assert_eq!(doc.status, Some(0));
    }
}
