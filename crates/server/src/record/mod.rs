//! The banking record and its sensitive attribute table.
//!
//! # Module invariants
//!
//! - A populated envelope slot is never overwritten; the only transition a
//!   slot makes is empty to populated.
//! - Rows are created and deleted by the order flow that owns them; this
//!   service only fills envelope slots.

pub mod store;

pub use store::{RecordStore, StoreError};

use common::protocol::ProtectRequest;
use common::Envelope;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One user's banking record as held by the record store.
///
/// Every sensitive attribute has two independent slots: the legacy plaintext
/// column and the encrypted envelope column. Both are nullable; a record may
/// carry any mix of the two while migration is in flight.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BankingRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub status: String,

    pub account_number: Option<String>,
    pub bank_code: Option<String>,
    pub bank_name: Option<String>,
    pub business_name: Option<String>,
    pub email: Option<String>,

    pub encrypted_account_number: Option<Envelope>,
    pub encrypted_bank_code: Option<Envelope>,
    pub encrypted_bank_name: Option<Envelope>,
    pub encrypted_business_name: Option<Envelope>,
    pub encrypted_email: Option<Envelope>,
}

/// Descriptor for one sensitive attribute: where its plaintext lives, where
/// its envelope lives, and which request field overrides it.
///
/// The workflow iterates [`SENSITIVE_FIELDS`] instead of hand-writing one
/// branch per attribute, so adding a sensitive field is one new row here
/// plus its columns on [`BankingRecord`].
pub struct SensitiveField {
    /// Attribute name as it appears in request and response bodies.
    pub name: &'static str,
    /// Reads the stored plaintext slot.
    pub plaintext: fn(&BankingRecord) -> Option<&String>,
    /// Reads the stored envelope slot.
    pub envelope: fn(&BankingRecord) -> Option<&Envelope>,
    /// Reads the caller-supplied override for this attribute.
    pub override_value: fn(&ProtectRequest) -> Option<&String>,
}

/// The five protected attributes of a banking record.
pub const SENSITIVE_FIELDS: [SensitiveField; 5] = [
    SensitiveField {
        name: "account_number",
        plaintext: |r| r.account_number.as_ref(),
        envelope: |r| r.encrypted_account_number.as_ref(),
        override_value: |o| o.account_number.as_ref(),
    },
    SensitiveField {
        name: "bank_code",
        plaintext: |r| r.bank_code.as_ref(),
        envelope: |r| r.encrypted_bank_code.as_ref(),
        override_value: |o| o.bank_code.as_ref(),
    },
    SensitiveField {
        name: "bank_name",
        plaintext: |r| r.bank_name.as_ref(),
        envelope: |r| r.encrypted_bank_name.as_ref(),
        override_value: |o| o.bank_name.as_ref(),
    },
    SensitiveField {
        name: "business_name",
        plaintext: |r| r.business_name.as_ref(),
        envelope: |r| r.encrypted_business_name.as_ref(),
        override_value: |o| o.business_name.as_ref(),
    },
    SensitiveField {
        name: "email",
        plaintext: |r| r.email.as_ref(),
        envelope: |r| r.encrypted_email.as_ref(),
        override_value: |o| o.email.as_ref(),
    },
];
