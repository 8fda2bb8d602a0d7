//! The versioned ciphertext envelope stored per protected field.

use serde::{Deserialize, Serialize};

/// Self-describing encrypted representation of one field value.
///
/// The JSON shape is persisted in the record store and must stay stable so
/// that previously written envelopes remain decryptable:
///
/// ```json
/// { "ciphertext": "<base64>", "iv": "<base64>", "authTag": "<base64>", "version": 1 }
/// ```
///
/// All three binary quantities use the standard base64 alphabet with padding.
/// `version` names the secret (`ENCRYPTION_KEY_V<version>`) whose key material
/// produced the ciphertext, which is what makes future key rotation possible
/// without breaking old data.
///
/// Envelopes are immutable once constructed; they are only ever replaced as a
/// unit, never edited field by field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    /// Base64 of the AES-GCM ciphertext, authentication tag excluded.
    pub ciphertext: String,
    /// Base64 of the 12-byte initialisation vector.
    pub iv: String,
    /// Base64 of the 16-byte authentication tag.
    #[serde(rename = "authTag")]
    pub auth_tag: String,
    /// Version of the key that encrypted this value.
    pub version: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Envelope {
        Envelope {
            ciphertext: "Y2lwaGVy".into(),
            iv: "AAAAAAAAAAAAAAAA".into(),
            auth_tag: "dGFnX2J5dGVzX2hlcmVfXw==".into(),
            version: 1,
        }
    }

    #[test]
    fn serialises_with_camel_case_auth_tag() {
        let json = serde_json::to_value(sample()).unwrap();
        assert!(json.get("authTag").is_some());
        assert!(json.get("auth_tag").is_none());
        assert_eq!(json["version"], 1);
    }

    #[test]
    fn round_trips_through_json() {
        let envelope = sample();
        let json = serde_json::to_string(&envelope).unwrap();
        let decoded: Envelope = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, envelope);
    }

    #[test]
    fn deserialises_persisted_shape() {
        let json = r#"{"ciphertext":"YWJj","iv":"aXZpdml2aXZpdg==","authTag":"dA==","version":2}"#;
        let envelope: Envelope = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.version, 2);
        assert_eq!(envelope.ciphertext, "YWJj");
    }
}
