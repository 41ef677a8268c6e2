//! In-memory store implementations backing the workflow tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use homefinder::marketplace::engagement::{LikeEntry, LikeStore, WishlistEntry, WishlistStore};
use homefinder::marketplace::listings::{
    EditDraftStore, ImageUpload, Listing, ListingId, ListingStatus, ListingStore, MediaStore,
    StagedEdit, StoreError, UserId,
};
use homefinder::marketplace::moderation::{UserDirectory, UserProfile, VerificationStatus};

#[derive(Default)]
pub struct MemoryListingStore {
    rows: Mutex<HashMap<ListingId, Listing>>,
}

impl ListingStore for MemoryListingStore {
    fn insert(&self, listing: Listing) -> Result<Listing, StoreError> {
        let mut guard = self.rows.lock().expect("listing mutex poisoned");
        if guard.contains_key(&listing.id) {
            return Err(StoreError::Conflict);
        }
        guard.insert(listing.id.clone(), listing.clone());
        Ok(listing)
    }

    fn update(&self, listing: Listing) -> Result<(), StoreError> {
        let mut guard = self.rows.lock().expect("listing mutex poisoned");
        if !guard.contains_key(&listing.id) {
            return Err(StoreError::NotFound);
        }
        guard.insert(listing.id.clone(), listing);
        Ok(())
    }

    fn fetch(&self, id: &ListingId) -> Result<Option<Listing>, StoreError> {
        let guard = self.rows.lock().expect("listing mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn all(&self) -> Result<Vec<Listing>, StoreError> {
        let guard = self.rows.lock().expect("listing mutex poisoned");
        Ok(guard.values().cloned().collect())
    }

    fn by_owner(&self, owner: &UserId) -> Result<Vec<Listing>, StoreError> {
        let guard = self.rows.lock().expect("listing mutex poisoned");
        Ok(guard
            .values()
            .filter(|listing| listing.owner.as_ref() == Some(owner))
            .cloned()
            .collect())
    }

    fn by_status(&self, statuses: &[ListingStatus]) -> Result<Vec<Listing>, StoreError> {
        let guard = self.rows.lock().expect("listing mutex poisoned");
        Ok(guard
            .values()
            .filter(|listing| statuses.contains(&listing.status))
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub struct MemoryDraftStore {
    drafts: Mutex<HashMap<ListingId, StagedEdit>>,
}

impl EditDraftStore for MemoryDraftStore {
    fn put(&self, draft: StagedEdit) -> Result<(), StoreError> {
        let mut guard = self.drafts.lock().expect("draft mutex poisoned");
        guard.insert(draft.listing_id.clone(), draft);
        Ok(())
    }

    fn fetch(&self, id: &ListingId) -> Result<Option<StagedEdit>, StoreError> {
        let guard = self.drafts.lock().expect("draft mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn remove(&self, id: &ListingId) -> Result<(), StoreError> {
        let mut guard = self.drafts.lock().expect("draft mutex poisoned");
        guard.remove(id).map(|_| ()).ok_or(StoreError::NotFound)
    }

    fn pending_ids(&self) -> Result<Vec<ListingId>, StoreError> {
        let guard = self.drafts.lock().expect("draft mutex poisoned");
        Ok(guard.keys().cloned().collect())
    }
}

#[derive(Default)]
pub struct MemoryMediaStore {
    sequence: AtomicU64,
}

impl MediaStore for MemoryMediaStore {
    fn save(&self, upload: &ImageUpload) -> Result<String, StoreError> {
        let n = self.sequence.fetch_add(1, Ordering::Relaxed);
        Ok(format!("/uploads/properties/{n}-{}", upload.file_name))
    }
}

#[derive(Default)]
pub struct MemoryWishlistStore {
    entries: Mutex<Vec<WishlistEntry>>,
}

impl WishlistStore for MemoryWishlistStore {
    fn insert(&self, entry: WishlistEntry) -> Result<(), StoreError> {
        let mut guard = self.entries.lock().expect("wishlist mutex poisoned");
        if guard
            .iter()
            .any(|row| row.listing_id == entry.listing_id && row.user_id == entry.user_id)
        {
            return Err(StoreError::Conflict);
        }
        guard.push(entry);
        Ok(())
    }

    fn remove(&self, listing_id: &ListingId, user_id: &UserId) -> Result<(), StoreError> {
        let mut guard = self.entries.lock().expect("wishlist mutex poisoned");
        let before = guard.len();
        guard.retain(|row| !(row.listing_id == *listing_id && row.user_id == *user_id));
        if guard.len() == before {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    fn contains(&self, listing_id: &ListingId, user_id: &UserId) -> Result<bool, StoreError> {
        let guard = self.entries.lock().expect("wishlist mutex poisoned");
        Ok(guard
            .iter()
            .any(|row| row.listing_id == *listing_id && row.user_id == *user_id))
    }

    fn for_user(&self, user_id: &UserId) -> Result<Vec<WishlistEntry>, StoreError> {
        let guard = self.entries.lock().expect("wishlist mutex poisoned");
        Ok(guard
            .iter()
            .filter(|row| row.user_id == *user_id)
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub struct MemoryLikeStore {
    entries: Mutex<Vec<LikeEntry>>,
}

impl LikeStore for MemoryLikeStore {
    fn insert(&self, entry: LikeEntry) -> Result<(), StoreError> {
        let mut guard = self.entries.lock().expect("like mutex poisoned");
        if guard
            .iter()
            .any(|row| row.listing_id == entry.listing_id && row.user_id == entry.user_id)
        {
            return Err(StoreError::Conflict);
        }
        guard.push(entry);
        Ok(())
    }

    fn remove(&self, listing_id: &ListingId, user_id: &UserId) -> Result<(), StoreError> {
        let mut guard = self.entries.lock().expect("like mutex poisoned");
        let before = guard.len();
        guard.retain(|row| !(row.listing_id == *listing_id && row.user_id == *user_id));
        if guard.len() == before {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    fn contains(&self, listing_id: &ListingId, user_id: &UserId) -> Result<bool, StoreError> {
        let guard = self.entries.lock().expect("like mutex poisoned");
        Ok(guard
            .iter()
            .any(|row| row.listing_id == *listing_id && row.user_id == *user_id))
    }

    fn count_for(&self, listing_id: &ListingId) -> Result<usize, StoreError> {
        let guard = self.entries.lock().expect("like mutex poisoned");
        Ok(guard
            .iter()
            .filter(|row| row.listing_id == *listing_id)
            .count())
    }
}

#[derive(Default)]
pub struct MemoryDirectory {
    profiles: Mutex<Vec<UserProfile>>,
}

impl MemoryDirectory {
    pub fn add_profile(
        &self,
        id: &str,
        first_name: &str,
        last_name: &str,
        seller_requested: bool,
        verification: VerificationStatus,
    ) {
        self.profiles
            .lock()
            .expect("directory mutex poisoned")
            .push(UserProfile {
                id: UserId(id.to_string()),
                first_name: first_name.to_string(),
                last_name: last_name.to_string(),
                email: format!("{id}@example.com"),
                avatar_url: None,
                is_seller: false,
                seller_requested,
                verification,
            });
    }
}

impl UserDirectory for MemoryDirectory {
    fn seller_applicants(&self) -> Result<Vec<UserProfile>, StoreError> {
        let guard = self.profiles.lock().expect("directory mutex poisoned");
        Ok(guard
            .iter()
            .filter(|profile| profile.seller_requested)
            .cloned()
            .collect())
    }

    fn pending_verification(&self) -> Result<Vec<UserProfile>, StoreError> {
        let guard = self.profiles.lock().expect("directory mutex poisoned");
        Ok(guard
            .iter()
            .filter(|profile| profile.verification == VerificationStatus::Pending)
            .cloned()
            .collect())
    }

    fn fetch(&self, id: &UserId) -> Result<Option<UserProfile>, StoreError> {
        let guard = self.profiles.lock().expect("directory mutex poisoned");
        Ok(guard.iter().find(|profile| profile.id == *id).cloned())
    }
}
