//! HTTP client for the external identity service.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::{AuthError, Identity, IdentityVerifier};

/// Identity service client that resolves the user behind a bearer token.
///
/// The service is asked to describe the token's user; any failure at all,
/// transport, status, or body shape, normalises to a rejection. The caller's
/// token is forwarded as-is and the service api key authenticates this
/// service itself.
#[derive(Clone)]
pub struct HttpIdentityVerifier {
    http: Client,
    base_url: String,
    api_key: String,
}

/// The subset of the identity service's user body this service reads.
#[derive(Debug, Deserialize)]
struct UserBody {
    id: Uuid,
}

impl HttpIdentityVerifier {
    pub fn new(http: Client, base_url: &str, api_key: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_owned(),
            api_key: api_key.to_owned(),
        }
    }

    fn user_url(&self) -> String {
        format!("{}/user", self.base_url)
    }
}

#[async_trait]
impl IdentityVerifier for HttpIdentityVerifier {
    async fn verify(&self, bearer_token: &str) -> Result<Identity, AuthError> {
        let response = self
            .http
            .get(self.user_url())
            .header("apikey", &self.api_key)
            .bearer_auth(bearer_token)
            .send()
            .await
            .map_err(|e| AuthError::Rejected(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AuthError::Rejected(format!(
                "identity service returned {}",
                response.status()
            )));
        }

        let user: UserBody = response
            .json()
            .await
            .map_err(|e| AuthError::Rejected(e.to_string()))?;

        Ok(Identity { user_id: user.id })
    }
}
