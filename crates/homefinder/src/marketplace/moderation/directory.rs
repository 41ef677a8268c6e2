use serde::{Deserialize, Serialize};

use crate::marketplace::listings::{StoreError, UserId};

/// Identity-verification state of a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    Unverified,
    Pending,
    Verified,
    Rejected,
}

/// The slice of the user account the moderation queue needs. Account
/// management itself lives outside this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub avatar_url: Option<String>,
    pub is_seller: bool,
    pub seller_requested: bool,
    pub verification: VerificationStatus,
}

impl UserProfile {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// Read-side view over user accounts, so the queue can be exercised without
/// the identity subsystem.
pub trait UserDirectory: Send + Sync {
    /// Users who asked for seller status, whether or not it was granted yet.
    fn seller_applicants(&self) -> Result<Vec<UserProfile>, StoreError>;
    /// Users whose identity verification is awaiting a decision.
    fn pending_verification(&self) -> Result<Vec<UserProfile>, StoreError>;
    fn fetch(&self, id: &UserId) -> Result<Option<UserProfile>, StoreError>;
}
