//! Structured logging setup.
//!
//! # Telemetry invariants
//!
//! - **No plaintext field values and no key material** must appear in any
//!   span attribute or log field. Field names and counts are fine.
//! - Log level is configurable via `RUST_LOG` or the `LOG_LEVEL` setting
//!   (default: `info`).

pub mod init;

pub use init::init_telemetry;
