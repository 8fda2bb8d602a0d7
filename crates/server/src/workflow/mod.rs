//! Idempotent protection of a banking record's sensitive attributes.
//!
//! Each invocation inspects one owner's active record, encrypts exactly the
//! attributes that still lack an envelope but have a plaintext source, and
//! persists the new envelopes in a single update. Attributes that already
//! carry an envelope are never touched again, so re-running the workflow
//! with the same or no input changes nothing and raises no error.
//!
//! Two concurrent invocations racing on the same never-encrypted attribute
//! may both compute an envelope; the storage layer decides which write wins.
//! Either result is valid ciphertext, so no locking is done here.

use std::collections::BTreeMap;

use common::protocol::ProtectRequest;
use common::Envelope;
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::crypto::{encrypt_field, CipherError};
use crate::keys::KeyRing;
use crate::record::{RecordStore, StoreError, SENSITIVE_FIELDS};

/// Key version stamped onto envelopes produced by this service.
pub const DEFAULT_KEY_VERSION: u32 = 1;

/// Result of one protection run.
#[derive(Debug, Default)]
pub struct ProtectOutcome {
    /// Names of the attributes encrypted by this invocation.
    pub updated_fields: Vec<&'static str>,
    /// The envelopes produced, keyed by attribute name.
    pub envelopes: BTreeMap<&'static str, Envelope>,
}

/// Errors terminating a protection run.
///
/// A failed run persists nothing; different invocations may still progress
/// different attributes over time.
#[derive(Debug, Error)]
pub enum ProtectError {
    /// The owner has no active banking record, or the record could not be read.
    #[error("no active banking record found")]
    RecordNotFound,

    /// No secret is registered for the requested key version or as fallback.
    #[error("encryption key not configured")]
    KeyNotConfigured,

    /// Encrypting one of the attributes failed.
    #[error(transparent)]
    Encryption(#[from] CipherError),

    /// The envelopes were computed but could not be persisted.
    #[error("failed to save encrypted data: {0}")]
    StoreWrite(#[source] StoreError),
}

/// Encrypt every sensitive attribute of `owner_id`'s active record that has
/// a plaintext source but no envelope yet, and persist the result.
///
/// Caller-supplied overrides take precedence over stored plaintext; empty
/// strings count as absent. Key material is resolved once per request and
/// shared across attributes, and a configuration failure aborts before any
/// attribute is processed. A run in which no attribute needs encryption is
/// a success with an empty outcome and no store write.
///
/// # Errors
///
/// Returns [`ProtectError::RecordNotFound`] when the owner has no active
/// record, [`ProtectError::KeyNotConfigured`] when no secret resolves,
/// [`ProtectError::Encryption`] on any cipher failure, and
/// [`ProtectError::StoreWrite`] when the computed envelopes cannot be saved.
pub async fn protect_record(
    store: &dyn RecordStore,
    keys: &KeyRing,
    owner_id: Uuid,
    overrides: &ProtectRequest,
) -> Result<ProtectOutcome, ProtectError> {
    let record = match store.find_active_by_owner(owner_id).await {
        Ok(Some(record)) => record,
        Ok(None) => return Err(ProtectError::RecordNotFound),
        Err(e) => {
            // Callers see the same outcome for a missing row and an
            // unreadable one; the distinction only matters in logs.
            warn!(error = %e, "record lookup failed");
            return Err(ProtectError::RecordNotFound);
        }
    };

    let key = keys
        .resolve(DEFAULT_KEY_VERSION)
        .ok_or(ProtectError::KeyNotConfigured)?;

    let mut outcome = ProtectOutcome::default();
    for field in &SENSITIVE_FIELDS {
        // An existing envelope is final, whatever the request says.
        if (field.envelope)(&record).is_some() {
            continue;
        }

        let source = (field.override_value)(overrides)
            .or_else(|| (field.plaintext)(&record))
            .filter(|value| !value.is_empty());
        let Some(plaintext) = source else { continue };

        debug!(field = field.name, "encrypting attribute");
        let envelope = encrypt_field(plaintext, key, DEFAULT_KEY_VERSION)?;
        outcome.updated_fields.push(field.name);
        outcome.envelopes.insert(field.name, envelope);
    }

    if outcome.updated_fields.is_empty() {
        info!(owner = %owner_id, "nothing to encrypt");
        return Ok(outcome);
    }

    store
        .update_envelopes(record.id, &outcome.envelopes)
        .await
        .map_err(ProtectError::StoreWrite)?;

    info!(owner = %owner_id, fields = ?outcome.updated_fields, "attributes encrypted");
    Ok(outcome)
}
