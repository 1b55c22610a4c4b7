//! In-memory `UserDirectory`.

use std::collections::HashMap;

use async_trait::async_trait;

use refund_desk_core::error::CoreResult;
use refund_desk_core::traits::UserDirectory;
use refund_desk_core::types::User;

/// Fixed set of users, typically loaded from configuration.
#[derive(Debug, Clone, Default)]
pub struct MemoryUserDirectory {
    users: HashMap<u64, User>,
}

impl MemoryUserDirectory {
    /// Directory holding `users`; a later entry wins on duplicate ids.
    #[must_use]
    pub fn new(users: impl IntoIterator<Item = User>) -> Self {
        Self {
            users: users.into_iter().map(|u| (u.id, u)).collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.users.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[async_trait]
impl UserDirectory for MemoryUserDirectory {
    async fn find_by_id(&self, id: u64) -> CoreResult<Option<User>> {
        Ok(self.users.get(&id).cloned())
    }
}
