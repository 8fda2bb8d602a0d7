//! Common error types shared across crates.

use thiserror::Error;

/// Top-level service error type.
///
/// Variants map to HTTP status codes returned to callers:
/// - [`ServiceError::Unauthenticated`] → 401
/// - [`ServiceError::RecordNotFound`] → 404
/// - everything else → 500
///
/// Messages must stay safe to expose: no key material, no plaintext field
/// values, no stack traces.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The caller presented no credential, or one the identity service rejected.
    #[error("unauthorized: {0}")]
    Unauthenticated(String),

    /// No active banking record exists for the caller.
    #[error("no banking record found: {0}")]
    RecordNotFound(String),

    /// No secret is registered for the requested key version or as fallback.
    #[error("encryption key not configured: {0}")]
    KeyNotConfigured(String),

    /// The configured key material does not import as a 32-byte key.
    #[error("invalid encryption key: {0}")]
    InvalidKeyLength(String),

    /// AES-GCM encryption failed.
    #[error("failed to encrypt banking details: {0}")]
    EncryptionFailed(String),

    /// The envelopes were computed but the record store rejected the update.
    #[error("failed to save encrypted data: {0}")]
    StoreWriteFailed(String),

    /// An unexpected internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    /// Returns the HTTP status code that should be sent for this error.
    pub fn http_status(&self) -> u16 {
        match self {
            ServiceError::Unauthenticated(_) => 401,
            ServiceError::RecordNotFound(_) => 404,
            ServiceError::KeyNotConfigured(_)
            | ServiceError::InvalidKeyLength(_)
            | ServiceError::EncryptionFailed(_)
            | ServiceError::StoreWriteFailed(_)
            | ServiceError::Internal(_) => 500,
        }
    }

    /// Stable machine-readable code for this error category.
    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::Unauthenticated(_) => "unauthenticated",
            ServiceError::RecordNotFound(_) => "record_not_found",
            ServiceError::KeyNotConfigured(_) => "key_not_configured",
            ServiceError::InvalidKeyLength(_) => "invalid_key_length",
            ServiceError::EncryptionFailed(_) => "encryption_failed",
            ServiceError::StoreWriteFailed(_) => "store_write_failed",
            ServiceError::Internal(_) => "internal_error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_status_codes() {
        assert_eq!(ServiceError::Unauthenticated("x".into()).http_status(), 401);
        assert_eq!(ServiceError::RecordNotFound("x".into()).http_status(), 404);
        assert_eq!(ServiceError::KeyNotConfigured("x".into()).http_status(), 500);
        assert_eq!(ServiceError::InvalidKeyLength("x".into()).http_status(), 500);
        assert_eq!(ServiceError::EncryptionFailed("x".into()).http_status(), 500);
        assert_eq!(ServiceError::StoreWriteFailed("x".into()).http_status(), 500);
        assert_eq!(ServiceError::Internal("x".into()).http_status(), 500);
    }

    #[test]
    fn codes_are_stable() {
        assert_eq!(ServiceError::Unauthenticated("x".into()).code(), "unauthenticated");
        assert_eq!(ServiceError::RecordNotFound("x".into()).code(), "record_not_found");
        assert_eq!(ServiceError::KeyNotConfigured("x".into()).code(), "key_not_configured");
        assert_eq!(ServiceError::StoreWriteFailed("x".into()).code(), "store_write_failed");
    }

    #[test]
    fn display_includes_message() {
        let e = ServiceError::RecordNotFound("no active record for user".into());
        assert!(e.to_string().contains("no active record for user"));
    }
}
