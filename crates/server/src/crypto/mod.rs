//! AES-256-GCM field encryption primitives.
//!
//! This module is intentionally free of HTTP and store dependencies. It
//! provides the single low-level operation the workflow needs: turning one
//! plaintext field value into a versioned ciphertext envelope.
//!
//! # Envelope format
//!
//! ```json
//! { "ciphertext": "<base64>", "iv": "<base64>", "authTag": "<base64>", "version": 1 }
//! ```
//!
//! Standard base64 alphabet with padding throughout. The integer version
//! names the key that produced the ciphertext, which enables future key
//! rotation without breaking existing data.

pub mod cipher;

pub use cipher::{encrypt_field, CipherError};
