//! Refund desk HTTP API.
//!
//! JSON endpoints over the refund desk services. The `refund-desk` binary
//! wires configuration, logging and adapters; this library exposes the route
//! table so it can be mounted in tests.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;

pub use handlers::configure;
