//! HTTP clients for the external collaborators.
//!
//! The identity service and the record store are both reached over HTTP with
//! a shared `reqwest` client. The rest of the service consumes them through
//! the [`crate::auth::IdentityVerifier`] and [`crate::record::RecordStore`]
//! traits, so these implementations stay thin and replaceable.

pub mod identity;
pub mod store;

pub use identity::HttpIdentityVerifier;
pub use store::PostgrestRecordStore;
