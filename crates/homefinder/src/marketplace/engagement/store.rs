use super::domain::{LikeEntry, WishlistEntry};
use crate::marketplace::listings::{ListingId, StoreError, UserId};

/// Wishlist membership table. Implementations must enforce the
/// one-entry-per-pair invariant and answer `Conflict` on a duplicate insert
/// rather than trusting callers' existence checks.
pub trait WishlistStore: Send + Sync {
    fn insert(&self, entry: WishlistEntry) -> Result<(), StoreError>;
    fn remove(&self, listing_id: &ListingId, user_id: &UserId) -> Result<(), StoreError>;
    fn contains(&self, listing_id: &ListingId, user_id: &UserId) -> Result<bool, StoreError>;
    fn for_user(&self, user_id: &UserId) -> Result<Vec<WishlistEntry>, StoreError>;
}

/// Like membership table, same uniqueness contract as the wishlist.
pub trait LikeStore: Send + Sync {
    fn insert(&self, entry: LikeEntry) -> Result<(), StoreError>;
    fn remove(&self, listing_id: &ListingId, user_id: &UserId) -> Result<(), StoreError>;
    fn contains(&self, listing_id: &ListingId, user_id: &UserId) -> Result<bool, StoreError>;
    fn count_for(&self, listing_id: &ListingId) -> Result<usize, StoreError>;
}
