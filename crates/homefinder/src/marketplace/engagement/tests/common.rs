use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::marketplace::engagement::domain::{LikeEntry, WishlistEntry};
use crate::marketplace::engagement::service::EngagementService;
use crate::marketplace::engagement::store::{LikeStore, WishlistStore};
use crate::marketplace::listings::{
    ApartmentType, Listing, ListingId, ListingStatus, ListingStore, StoreError, UnitType, UserId,
};

pub(super) fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn buyer() -> UserId {
    UserId("user-nadia".to_string())
}

pub(super) fn listing(id: &str) -> Listing {
    Listing {
        id: ListingId(id.to_string()),
        title: format!("Apartment {id}"),
        description: None,
        address: "14 Corniche El Nil".to_string(),
        city: "Cairo".to_string(),
        neighborhood: "Maadi".to_string(),
        price: 1_800_000.0,
        area: 120.0,
        apartment_type: ApartmentType::ForSale,
        unit_type: UnitType::Residential,
        rooms: 3,
        bathrooms: 2,
        can_be_furnished: false,
        whatsapp_number: "+20-100-555-0199".to_string(),
        images: Vec::new(),
        furniture: Vec::new(),
        status: ListingStatus::Active,
        created_at: now(),
        updated_at: None,
        expiration_date: now() + Duration::days(60),
        deleted_at: None,
        owner: Some(UserId("user-omar".to_string())),
    }
}

pub(super) type TestService =
    EngagementService<MemoryWishlistStore, MemoryLikeStore, MemoryListingStore>;

pub(super) fn build_service() -> (Arc<TestService>, Arc<MemoryListingStore>) {
    let wishlist = Arc::new(MemoryWishlistStore::default());
    let likes = Arc::new(MemoryLikeStore::default());
    let listings = Arc::new(MemoryListingStore::default());
    let service = Arc::new(EngagementService::new(wishlist, likes, listings.clone()));
    (service, listings)
}

/// Seed a listing row the tracker can resolve against.
pub(super) fn seed(listings: &MemoryListingStore, id: &str) -> ListingId {
    let row = listing(id);
    let listing_id = row.id.clone();
    listings.insert(row).expect("seeded");
    listing_id
}

#[derive(Default)]
pub(super) struct MemoryListingStore {
    rows: Mutex<HashMap<ListingId, Listing>>,
}

impl MemoryListingStore {
    pub(super) fn forget(&self, id: &ListingId) {
        self.rows.lock().expect("listing mutex poisoned").remove(id);
    }
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
pub(super) struct MemoryWishlistStore {
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
pub(super) struct MemoryLikeStore {
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
