//! PostgREST-dialect record store client.

use std::collections::BTreeMap;

use async_trait::async_trait;
use common::Envelope;
use reqwest::Client;
use uuid::Uuid;

use crate::record::{BankingRecord, RecordStore, StoreError};

/// Table holding one banking row per user.
const TABLE: &str = "banking_subaccounts";

/// Record store client speaking the PostgREST filter dialect.
///
/// Reads select the single active row for an owner; writes patch only the
/// `encrypted_*` columns of one row by id, which is what keeps plaintext
/// columns and concurrent writers out of each other's way.
#[derive(Clone)]
pub struct PostgrestRecordStore {
    http: Client,
    base_url: String,
    service_key: String,
}

impl PostgrestRecordStore {
    pub fn new(http: Client, base_url: &str, service_key: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_owned(),
            service_key: service_key.to_owned(),
        }
    }

    fn table_url(&self) -> String {
        format!("{}/{}", self.base_url, TABLE)
    }
}

/// Map attribute names onto their encrypted column counterparts.
fn update_body(envelopes: &BTreeMap<&'static str, Envelope>) -> serde_json::Value {
    let mut body = serde_json::Map::new();
    for (name, envelope) in envelopes {
        // Envelope serialisation is infallible: plain strings and an integer.
        let value = serde_json::to_value(envelope).unwrap_or_default();
        body.insert(format!("encrypted_{name}"), value);
    }
    serde_json::Value::Object(body)
}

#[async_trait]
impl RecordStore for PostgrestRecordStore {
    async fn find_active_by_owner(
        &self,
        owner_id: Uuid,
    ) -> Result<Option<BankingRecord>, StoreError> {
        let response = self
            .http
            .get(self.table_url())
            .query(&[
                ("user_id", format!("eq.{owner_id}")),
                ("status", "eq.active".to_owned()),
                ("limit", "1".to_owned()),
            ])
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
            .send()
            .await
            .map_err(|e| StoreError::Request(e.to_string()))?;

        if !response.status().is_success() {
            return Err(StoreError::Request(format!(
                "select returned {}",
                response.status()
            )));
        }

        let mut rows: Vec<BankingRecord> = response
            .json()
            .await
            .map_err(|e| StoreError::Malformed(e.to_string()))?;

        Ok(if rows.is_empty() {
            None
        } else {
            Some(rows.remove(0))
        })
    }

    async fn update_envelopes(
        &self,
        record_id: Uuid,
        envelopes: &BTreeMap<&'static str, Envelope>,
    ) -> Result<(), StoreError> {
        let response = self
            .http
            .patch(self.table_url())
            .query(&[("id", format!("eq.{record_id}"))])
            .header("apikey", &self.service_key)
            .header("Prefer", "return=minimal")
            .bearer_auth(&self.service_key)
            .json(&update_body(envelopes))
            .send()
            .await
            .map_err(|e| StoreError::Request(e.to_string()))?;

        if !response.status().is_success() {
            return Err(StoreError::Request(format!(
                "update returned {}",
                response.status()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_url_joins_without_duplicate_slash() {
        let store =
            PostgrestRecordStore::new(Client::new(), "https://db.example.com/rest/v1/", "key");
        assert_eq!(
            store.table_url(),
            "https://db.example.com/rest/v1/banking_subaccounts"
        );
    }

    #[test]
    fn update_body_targets_encrypted_columns_only() {
        let envelope = Envelope {
            ciphertext: "YWJj".into(),
            iv: "aXZpdml2aXZpdg==".into(),
            auth_tag: "dGFn".into(),
            version: 1,
        };
        let mut envelopes = BTreeMap::new();
        envelopes.insert("bank_code", envelope.clone());
        envelopes.insert("email", envelope);

        let body = update_body(&envelopes);
        let object = body.as_object().unwrap();
        assert_eq!(object.len(), 2);
        assert!(object.contains_key("encrypted_bank_code"));
        assert!(object.contains_key("encrypted_email"));
        assert_eq!(object["encrypted_email"]["authTag"], "dGFn");
    }
}
