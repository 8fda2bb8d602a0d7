//! Request and response types for the protection endpoint.
//!
//! These shapes are part of the public API contract and mirror what existing
//! callers already parse; field casing (`updatedFields`, `authTag`) must not
//! change.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::envelope::Envelope;

// ---------------------------------------------------------------------------
// Encrypt endpoint
// ---------------------------------------------------------------------------

/// Request body for `POST /encrypt`.
///
/// Every field is an optional plaintext override. Absent fields fall back to
/// the plaintext already stored on the caller's record, so an empty body (or
/// no body at all) is a perfectly valid request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProtectRequest {
    pub account_number: Option<String>,
    pub bank_code: Option<String>,
    pub bank_name: Option<String>,
    pub business_name: Option<String>,
    pub email: Option<String>,
}

/// Successful response body for `POST /encrypt`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProtectResponse {
    /// Always `true` for this shape; failures use [`ErrorResponse`].
    pub success: bool,

    /// Names of the attributes encrypted by this call.
    #[serde(rename = "updatedFields")]
    pub updated_fields: Vec<String>,

    /// Envelopes produced by this call, keyed by attribute name. Attributes
    /// that were already protected, or had no plaintext source, do not appear.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub data: BTreeMap<String, Envelope>,

    /// Explanatory note when nothing needed encryption.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

// ---------------------------------------------------------------------------
// Error response
// ---------------------------------------------------------------------------

/// Standard error response body returned on any non-2xx status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Always `false`.
    pub success: bool,
    /// Short machine-readable error code (e.g. `"record_not_found"`).
    pub code: String,
    /// Human-readable description safe to expose to callers.
    pub error: String,
}

impl ErrorResponse {
    /// Construct an [`ErrorResponse`] from a code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            code: code.into(),
            error: message.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

/// Response body for `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall service status: `"ok"` or `"degraded"`.
    pub status: String,
    /// Number of encryption key versions currently configured.
    pub key_versions: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn protect_request_tolerates_partial_body() {
        let req: ProtectRequest =
            serde_json::from_str(r#"{"bank_code":"058"}"#).unwrap();
        assert_eq!(req.bank_code.as_deref(), Some("058"));
        assert!(req.account_number.is_none());
    }

    #[test]
    fn protect_request_default_is_all_absent() {
        let req = ProtectRequest::default();
        assert!(req.account_number.is_none());
        assert!(req.email.is_none());
    }

    #[test]
    fn protect_response_uses_camel_case_updated_fields() {
        let resp = ProtectResponse {
            success: true,
            updated_fields: vec!["bank_code".into()],
            data: BTreeMap::new(),
            message: None,
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert!(json.get("updatedFields").is_some());
        assert!(json.get("updated_fields").is_none());
        // Empty data and absent message are omitted entirely.
        assert!(json.get("data").is_none());
        assert!(json.get("message").is_none());
    }

    #[test]
    fn error_response_new() {
        let e = ErrorResponse::new("record_not_found", "no banking record found for user");
        assert!(!e.success);
        assert_eq!(e.code, "record_not_found");
        assert!(e.error.contains("no banking record"));
    }

    #[test]
    fn health_response_serde() {
        let h = HealthResponse {
            status: "ok".into(),
            key_versions: 2,
        };
        let json = serde_json::to_string(&h).unwrap();
        let decoded: HealthResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded.key_versions, 2);
    }
}
