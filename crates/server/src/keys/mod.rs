//! Encryption key resolution.
//!
//! # Lifecycle
//!
//! 1. At startup [`KeyRing::from_env`] snapshots every `ENCRYPTION_KEY_V<n>`
//!    environment variable plus the unversioned `ENCRYPTION_KEY` fallback.
//! 2. The ring is immutable afterwards and shared read-only across requests.
//! 3. The workflow resolves one secret per request and hands it to the
//!    cipher layer, which owns length and encoding validation.
//!
//! # Security invariants
//!
//! - Key material never appears in logs, traces, or `Debug` output.
//! - The naming convention `ENCRYPTION_KEY_V<version>` is what ties stored
//!   envelopes back to the secret that produced them; it must not change.

pub mod ring;

pub use ring::KeyRing;
