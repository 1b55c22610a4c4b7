//! User lookup abstract Trait

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::types::User;

/// Read access to the users known to the authentication layer
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Get user by ID
    async fn find_by_id(&self, id: u64) -> CoreResult<Option<User>>;
}
