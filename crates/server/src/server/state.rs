//! Shared application state injected into every Axum handler.

use std::sync::Arc;

use crate::auth::IdentityVerifier;
use crate::keys::KeyRing;
use crate::record::RecordStore;

/// Application state shared across all request handlers.
///
/// Collaborators live behind trait objects so handlers stay testable with
/// doubles; everything is `Arc`-wrapped so Axum can clone the state per
/// request without copying anything expensive.
#[derive(Clone)]
pub struct AppState {
    /// Validates bearer credentials against the identity service.
    pub verifier: Arc<dyn IdentityVerifier>,
    /// Reads and updates banking records.
    pub store: Arc<dyn RecordStore>,
    /// Read-only registry of encryption secrets, built at startup.
    pub keys: Arc<KeyRing>,
}

impl AppState {
    /// Create a new [`AppState`] from the collaborators and key ring.
    pub fn new(
        verifier: Arc<dyn IdentityVerifier>,
        store: Arc<dyn RecordStore>,
        keys: Arc<KeyRing>,
    ) -> Self {
        Self {
            verifier,
            store,
            keys,
        }
    }
}
