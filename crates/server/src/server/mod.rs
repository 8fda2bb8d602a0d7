//! Axum HTTP server, routing, and middleware.
//!
//! # Responsibilities
//! - Define the Axum router with all routes and shared middleware.
//! - Resolve the caller's identity before any record is touched.
//! - Map workflow errors onto the stable error codes and status codes
//!   callers depend on.

pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;
