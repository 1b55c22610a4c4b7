//! User view used by the refund flows

use serde::{Deserialize, Serialize};

/// Authenticated user as provided by the user directory
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: u64,
    pub username: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    /// Profile phone number
    #[serde(default)]
    pub phone_number: Option<String>,
    /// Staff may review every refund request
    #[serde(default)]
    pub is_staff: bool,
}

impl User {
    /// Whether the user may read the given owner's requests.
    #[must_use]
    pub fn can_access(&self, owner_id: u64) -> bool {
        self.is_staff || self.id == owner_id
    }
}
