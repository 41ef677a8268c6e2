use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::domain::{LikeEntry, WishlistEntry};
use super::store::{LikeStore, WishlistStore};
use crate::marketplace::listings::{Listing, ListingId, ListingStore, StoreError, UserId};

static WISHLIST_SEQUENCE: AtomicU64 = AtomicU64::new(1);
static LIKE_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_wishlist_id() -> String {
    let id = WISHLIST_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("wish-{id:06}")
}

fn next_like_id() -> String {
    let id = LIKE_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("like-{id:06}")
}

/// Wishlist and like operations. Membership is checked before inserting, and
/// the store's own uniqueness constraint backs the check up, so a racing
/// duplicate surfaces as the same conflict answer.
pub struct EngagementService<W, K, L> {
    wishlist: Arc<W>,
    likes: Arc<K>,
    listings: Arc<L>,
}

impl<W, K, L> EngagementService<W, K, L>
where
    W: WishlistStore + 'static,
    K: LikeStore + 'static,
    L: ListingStore + 'static,
{
    pub fn new(wishlist: Arc<W>, likes: Arc<K>, listings: Arc<L>) -> Self {
        Self {
            wishlist,
            likes,
            listings,
        }
    }

    pub fn add_to_wishlist(
        &self,
        listing_id: &ListingId,
        user_id: &UserId,
        now: DateTime<Utc>,
    ) -> Result<(), EngagementError> {
        if self.wishlist.contains(listing_id, user_id)? {
            return Err(EngagementError::AlreadySaved);
        }
        self.listings
            .fetch(listing_id)?
            .ok_or(EngagementError::ListingNotFound)?;

        self.wishlist
            .insert(WishlistEntry {
                id: next_wishlist_id(),
                listing_id: listing_id.clone(),
                user_id: user_id.clone(),
                added_at: now,
            })
            .map_err(|error| match error {
                StoreError::Conflict => EngagementError::AlreadySaved,
                other => EngagementError::Store(other),
            })
    }

    pub fn remove_from_wishlist(
        &self,
        listing_id: &ListingId,
        user_id: &UserId,
    ) -> Result<(), EngagementError> {
        self.wishlist
            .remove(listing_id, user_id)
            .map_err(|error| match error {
                StoreError::NotFound => EngagementError::NotSaved,
                other => EngagementError::Store(other),
            })
    }

    pub fn is_saved(
        &self,
        listing_id: &ListingId,
        user_id: &UserId,
    ) -> Result<bool, EngagementError> {
        Ok(self.wishlist.contains(listing_id, user_id)?)
    }

    /// Every listing the user has saved, hydrated from the listing store.
    /// Entries whose listing row has vanished are skipped.
    pub fn saved_listings(&self, user_id: &UserId) -> Result<Vec<Listing>, EngagementError> {
        let mut listings = Vec::new();
        for entry in self.wishlist.for_user(user_id)? {
            if let Some(listing) = self.listings.fetch(&entry.listing_id)? {
                listings.push(listing);
            }
        }
        Ok(listings)
    }

    pub fn like(
        &self,
        listing_id: &ListingId,
        user_id: &UserId,
        now: DateTime<Utc>,
    ) -> Result<(), EngagementError> {
        if self.likes.contains(listing_id, user_id)? {
            return Err(EngagementError::AlreadyLiked);
        }
        self.listings
            .fetch(listing_id)?
            .ok_or(EngagementError::ListingNotFound)?;

        self.likes
            .insert(LikeEntry {
                id: next_like_id(),
                listing_id: listing_id.clone(),
                user_id: user_id.clone(),
                liked_at: now,
            })
            .map_err(|error| match error {
                StoreError::Conflict => EngagementError::AlreadyLiked,
                other => EngagementError::Store(other),
            })
    }

    pub fn unlike(
        &self,
        listing_id: &ListingId,
        user_id: &UserId,
    ) -> Result<(), EngagementError> {
        self.likes
            .remove(listing_id, user_id)
            .map_err(|error| match error {
                StoreError::NotFound => EngagementError::NotLiked,
                other => EngagementError::Store(other),
            })
    }

    pub fn has_liked(
        &self,
        listing_id: &ListingId,
        user_id: &UserId,
    ) -> Result<bool, EngagementError> {
        Ok(self.likes.contains(listing_id, user_id)?)
    }

    pub fn like_count(&self, listing_id: &ListingId) -> Result<usize, EngagementError> {
        Ok(self.likes.count_for(listing_id)?)
    }

    /// Detail view for the storefront: the full listing row with its like
    /// count alongside.
    pub fn listing_detail(
        &self,
        listing_id: &ListingId,
    ) -> Result<Option<(Listing, usize)>, EngagementError> {
        let Some(listing) = self.listings.fetch(listing_id)? else {
            return Ok(None);
        };
        let likes = self.likes.count_for(listing_id)?;
        Ok(Some((listing, likes)))
    }
}

/// Error raised by the engagement tracker, with display text fit for the
/// requester.
#[derive(Debug, thiserror::Error)]
pub enum EngagementError {
    #[error("property not found")]
    ListingNotFound,
    #[error("this property is already in your wishlist")]
    AlreadySaved,
    #[error("this property is not in your wishlist")]
    NotSaved,
    #[error("you already liked this property")]
    AlreadyLiked,
    #[error("you have not liked this property")]
    NotLiked,
    #[error(transparent)]
    Store(#[from] StoreError),
}
