//! Storage layer abstraction trait definition

mod refund_repository;
mod status_notifier;
mod user_directory;
mod validation_cache;

pub use refund_repository::RefundRepository;
pub use status_notifier::StatusChangeNotifier;
pub use user_directory::UserDirectory;
pub use validation_cache::{MemoryValidationCache, ValidationCache};

// Lookup client seam lives in refund-desk-client
pub use refund_desk_client::IbanLookupClient;
