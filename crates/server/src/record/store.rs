//! Record store access trait.

use std::collections::BTreeMap;

use async_trait::async_trait;
use common::Envelope;
use thiserror::Error;
use uuid::Uuid;

use super::BankingRecord;

/// Errors surfaced by record store implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store could not be reached or returned a non-success status.
    #[error("record store request failed: {0}")]
    Request(String),

    /// The store responded with a body this service could not decode.
    #[error("record store returned malformed data: {0}")]
    Malformed(String),
}

/// Read and update operations the service needs from the record store.
///
/// One active record per owner is assumed; enforcing that multiplicity is
/// the store's concern. Updates touch envelope columns only, so concurrent
/// invocations cannot clobber plaintext or each other's unrelated fields.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Fetch the single active record owned by `owner_id`, if any.
    async fn find_active_by_owner(
        &self,
        owner_id: Uuid,
    ) -> Result<Option<BankingRecord>, StoreError>;

    /// Persist freshly produced envelopes into the record's envelope slots
    /// in a single update keyed by record id.
    ///
    /// `envelopes` is keyed by attribute name (for example `"bank_code"`);
    /// implementations map each name onto its encrypted column counterpart.
    async fn update_envelopes(
        &self,
        record_id: Uuid,
        envelopes: &BTreeMap<&'static str, Envelope>,
    ) -> Result<(), StoreError>;
}
