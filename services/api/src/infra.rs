use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use homefinder::marketplace::craftsmen::{Craftsman, CraftsmanId, CraftsmanStore};
use homefinder::marketplace::engagement::{LikeEntry, LikeStore, WishlistEntry, WishlistStore};
use homefinder::marketplace::listings::{
    EditDraftStore, ImageUpload, Listing, ListingId, ListingStatus, ListingStore, MediaStore,
    StagedEdit, StoreError, UserId,
};
use homefinder::marketplace::moderation::{UserDirectory, UserProfile};
use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Listing rows keyed by id. Stands in for the marketplace database until a
/// durable backend is wired up; deletion stays a status flip, never a remove.
#[derive(Default)]
pub(crate) struct InMemoryListingStore {
    rows: Mutex<HashMap<ListingId, Listing>>,
}

impl ListingStore for InMemoryListingStore {
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
pub(crate) struct InMemoryDraftStore {
    drafts: Mutex<HashMap<ListingId, StagedEdit>>,
}

impl EditDraftStore for InMemoryDraftStore {
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

/// Byte sink that hands back deterministic stored urls. Uploads are not
/// persisted anywhere; swap this for an object-store client in production.
#[derive(Default)]
pub(crate) struct InMemoryMediaStore {
    sequence: AtomicU64,
}

impl MediaStore for InMemoryMediaStore {
    fn save(&self, upload: &ImageUpload) -> Result<String, StoreError> {
        let n = self.sequence.fetch_add(1, Ordering::Relaxed);
        Ok(format!("/uploads/properties/{n}-{}", upload.file_name))
    }
}

#[derive(Default)]
pub(crate) struct InMemoryWishlistStore {
    entries: Mutex<Vec<WishlistEntry>>,
}

impl WishlistStore for InMemoryWishlistStore {
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
pub(crate) struct InMemoryLikeStore {
    entries: Mutex<Vec<LikeEntry>>,
}

impl LikeStore for InMemoryLikeStore {
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
pub(crate) struct InMemoryCraftsmanStore {
    rows: Mutex<HashMap<CraftsmanId, Craftsman>>,
}

impl CraftsmanStore for InMemoryCraftsmanStore {
    fn insert(&self, craftsman: Craftsman) -> Result<Craftsman, StoreError> {
        let mut guard = self.rows.lock().expect("craftsman mutex poisoned");
        if guard.contains_key(&craftsman.id) {
            return Err(StoreError::Conflict);
        }
        guard.insert(craftsman.id.clone(), craftsman.clone());
        Ok(craftsman)
    }

    fn all(&self) -> Result<Vec<Craftsman>, StoreError> {
        let guard = self.rows.lock().expect("craftsman mutex poisoned");
        Ok(guard.values().cloned().collect())
    }
}

/// User accounts visible to the moderation queue. Identity itself lives in a
/// separate system; this mirror carries the slice the queue needs.
#[derive(Default)]
pub(crate) struct InMemoryUserDirectory {
    profiles: Mutex<HashMap<UserId, UserProfile>>,
}

impl InMemoryUserDirectory {
    pub(crate) fn upsert(&self, profile: UserProfile) {
        self.profiles
            .lock()
            .expect("directory mutex poisoned")
            .insert(profile.id.clone(), profile);
    }
}

impl UserDirectory for InMemoryUserDirectory {
    fn seller_applicants(&self) -> Result<Vec<UserProfile>, StoreError> {
        let guard = self.profiles.lock().expect("directory mutex poisoned");
        let mut applicants: Vec<UserProfile> = guard
            .values()
            .filter(|profile| profile.seller_requested)
            .cloned()
            .collect();
        applicants.sort_by(|a, b| a.id.0.cmp(&b.id.0));
        Ok(applicants)
    }

    fn pending_verification(&self) -> Result<Vec<UserProfile>, StoreError> {
        let guard = self.profiles.lock().expect("directory mutex poisoned");
        let mut pending: Vec<UserProfile> = guard
            .values()
            .filter(|profile| {
                profile.verification
                    == homefinder::marketplace::moderation::VerificationStatus::Pending
            })
            .cloned()
            .collect();
        pending.sort_by(|a, b| a.id.0.cmp(&b.id.0));
        Ok(pending)
    }

    fn fetch(&self, id: &UserId) -> Result<Option<UserProfile>, StoreError> {
        let guard = self.profiles.lock().expect("directory mutex poisoned");
        Ok(guard.get(id).cloned())
    }
}
