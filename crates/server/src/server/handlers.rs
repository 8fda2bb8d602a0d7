//! Axum request handlers for all service endpoints.

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use common::protocol::{ErrorResponse, HealthResponse, ProtectRequest, ProtectResponse};
use common::ServiceError;
use tracing::warn;

use super::state::AppState;
use crate::auth::authenticate;
use crate::crypto::CipherError;
use crate::workflow::{protect_record, ProtectError};

/// `POST /encrypt` — encrypt the caller's still-unprotected banking fields.
///
/// The body may carry plaintext overrides for any of the sensitive
/// attributes; an absent or unparseable body means "use the stored
/// plaintext". The caller is resolved from the `Authorization` bearer header
/// and can only ever touch their own record.
pub async fn encrypt(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let identity = match authenticate(state.verifier.as_ref(), &headers).await {
        Ok(identity) => identity,
        Err(e) => {
            warn!(error = %e, "authentication failed");
            return error_response(&ServiceError::Unauthenticated(
                "please login first".into(),
            ));
        }
    };

    // Overrides are optional; a malformed body falls back to stored values.
    let overrides: ProtectRequest = serde_json::from_slice(&body).unwrap_or_default();

    match protect_record(
        state.store.as_ref(),
        &state.keys,
        identity.user_id,
        &overrides,
    )
    .await
    {
        Ok(outcome) => {
            let updated_fields: Vec<String> = outcome
                .updated_fields
                .iter()
                .map(|name| (*name).to_owned())
                .collect();
            let message = updated_fields
                .is_empty()
                .then(|| "Nothing to encrypt".to_owned());
            let data = outcome
                .envelopes
                .into_iter()
                .map(|(name, envelope)| (name.to_owned(), envelope))
                .collect();

            let body = ProtectResponse {
                success: true,
                updated_fields,
                data,
                message,
            };
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => {
            warn!(error = %e, "protection failed");
            error_response(&service_error(e))
        }
    }
}

/// `GET /health` — liveness and readiness check.
///
/// Returns `200 OK` once at least one encryption key is configured and
/// `503 Service Unavailable` until then.
pub async fn health(State(state): State<AppState>) -> Response {
    let key_versions = state.keys.len();
    let (status_code, status_str) = if key_versions > 0 {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    let body = HealthResponse {
        status: status_str.into(),
        key_versions,
    };
    (status_code, Json(body)).into_response()
}

/// Catch-all 404 handler.
pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::new(
            "not_found",
            "the requested resource does not exist",
        )),
    )
}

fn service_error(err: ProtectError) -> ServiceError {
    match err {
        ProtectError::RecordNotFound => {
            ServiceError::RecordNotFound("no banking record found for user".into())
        }
        ProtectError::KeyNotConfigured => {
            ServiceError::KeyNotConfigured("encryption key not configured".into())
        }
        ProtectError::Encryption(CipherError::InvalidKeyLength) => {
            ServiceError::InvalidKeyLength("configured key must be exactly 32 bytes".into())
        }
        ProtectError::Encryption(e) => ServiceError::EncryptionFailed(e.to_string()),
        ProtectError::StoreWrite(e) => ServiceError::StoreWriteFailed(e.to_string()),
    }
}

fn error_response(err: &ServiceError) -> Response {
    let status =
        StatusCode::from_u16(err.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(ErrorResponse::new(err.code(), err.to_string()))).into_response()
}
