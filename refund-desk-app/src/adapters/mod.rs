//! Storage and delivery adapters for the core service seams.

mod memory_refund_repository;
mod memory_user_directory;
mod notifier;

pub use memory_refund_repository::MemoryRefundRepository;
pub use memory_user_directory::MemoryUserDirectory;
pub use notifier::{LogNotifier, NoopNotifier};

#[cfg(feature = "file-cache")]
mod file_validation_cache;

#[cfg(feature = "file-cache")]
pub use file_validation_cache::FileValidationCache;

// In-memory cache lives next to its trait in core
pub use refund_desk_core::traits::MemoryValidationCache;
