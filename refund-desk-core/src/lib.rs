//! Refund Desk Core Library
//!
//! Business logic of the refund desk:
//! - cached, fail-safe IBAN validation (`IbanValidator`)
//! - refund submission with a three-way outcome (`RefundService`)
//! - staff review and status change notifications (`RefundReviewService`)
//!
//! Storage, cache, notification delivery and the external lookup client are
//! injected through the traits in [`traits`], so the same services run
//! against in-memory stores in tests and real adapters in the web binary.

pub mod error;
pub mod services;
pub mod traits;
pub mod types;
pub mod utils;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use error::{CoreError, CoreResult};
pub use services::ServiceContext;
pub use traits::{
    IbanLookupClient, RefundRepository, StatusChangeNotifier, UserDirectory, ValidationCache,
};
