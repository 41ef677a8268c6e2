use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::marketplace::listings::{ListingId, UserId};

/// A saved-for-later membership. At most one entry exists per
/// (listing, user) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WishlistEntry {
    pub id: String,
    pub listing_id: ListingId,
    pub user_id: UserId,
    pub added_at: DateTime<Utc>,
}

/// A like membership, same uniqueness rule as the wishlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikeEntry {
    pub id: String,
    pub listing_id: ListingId,
    pub user_id: UserId,
    pub liked_at: DateTime<Utc>,
}
