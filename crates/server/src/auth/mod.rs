//! Caller identity resolution.
//!
//! Every request must carry a bearer credential. Requests without one are
//! rejected before any backing service is contacted, and every validation
//! failure, whatever its cause, normalises to the same unauthenticated
//! outcome so callers learn nothing about why a credential was rejected.

use async_trait::async_trait;
use axum::http::{header, HeaderMap};
use thiserror::Error;
use uuid::Uuid;

/// The authenticated caller.
///
/// Carries exactly the owner id used to scope record access: a caller can
/// only ever protect their own record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub user_id: Uuid,
}

/// Why a caller could not be authenticated.
///
/// The message is for logs only; callers always see the same 401.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The request carried no `Authorization` header.
    #[error("no bearer credential supplied")]
    MissingCredential,

    /// The identity service rejected the credential, or could not be asked.
    #[error("credential rejected: {0}")]
    Rejected(String),
}

/// Validates bearer credentials against the external identity service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    /// Resolve the identity behind `bearer_token`.
    async fn verify(&self, bearer_token: &str) -> Result<Identity, AuthError>;
}

/// Resolve the caller's identity from the request headers.
///
/// A missing `Authorization` header fails immediately without contacting the
/// identity service. The `Bearer ` prefix is stripped if present; a header
/// without it is passed through as the token itself.
pub async fn authenticate(
    verifier: &dyn IdentityVerifier,
    headers: &HeaderMap,
) -> Result<Identity, AuthError> {
    let header = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::MissingCredential)?;

    let token = header.strip_prefix("Bearer ").unwrap_or(header);
    verifier.verify(token).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn identity() -> Identity {
        Identity {
            user_id: Uuid::new_v4(),
        }
    }

    #[tokio::test]
    async fn missing_header_fails_without_contacting_the_verifier() {
        // No expectation set: any call to the mock would panic.
        let verifier = MockIdentityVerifier::new();
        let headers = HeaderMap::new();

        let result = authenticate(&verifier, &headers).await;
        assert!(matches!(result, Err(AuthError::MissingCredential)));
    }

    #[tokio::test]
    async fn bearer_prefix_is_stripped_before_verification() {
        let expected = identity();
        let mut verifier = MockIdentityVerifier::new();
        verifier
            .expect_verify()
            .withf(|token| token == "tok-123")
            .times(1)
            .returning(move |_| Ok(expected));

        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer tok-123"),
        );

        let resolved = authenticate(&verifier, &headers).await.unwrap();
        assert_eq!(resolved, expected);
    }

    #[tokio::test]
    async fn header_without_prefix_is_passed_through() {
        let expected = identity();
        let mut verifier = MockIdentityVerifier::new();
        verifier
            .expect_verify()
            .withf(|token| token == "raw-token")
            .returning(move |_| Ok(expected));

        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("raw-token"));

        assert!(authenticate(&verifier, &headers).await.is_ok());
    }

    #[tokio::test]
    async fn verifier_rejection_propagates() {
        let mut verifier = MockIdentityVerifier::new();
        verifier
            .expect_verify()
            .returning(|_| Err(AuthError::Rejected("expired".into())));

        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer x"));

        let result = authenticate(&verifier, &headers).await;
        assert!(matches!(result, Err(AuthError::Rejected(_))));
    }
}
