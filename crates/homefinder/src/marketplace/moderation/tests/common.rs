use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::marketplace::listings::{
    ApartmentType, EditDraftStore, Listing, ListingId, ListingStatus, ListingStore, StagedEdit,
    StoreError, UnitType, UserId,
};
use crate::marketplace::moderation::directory::{UserDirectory, UserProfile, VerificationStatus};
use crate::marketplace::moderation::queue::ModerationQueue;

pub(super) fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn profile(id: &str, first_name: &str) -> UserProfile {
    UserProfile {
        id: UserId(id.to_string()),
        first_name: first_name.to_string(),
        last_name: "Hassan".to_string(),
        email: format!("{id}@example.com"),
        avatar_url: None,
        is_seller: false,
        seller_requested: false,
        verification: VerificationStatus::Unverified,
    }
}

pub(super) fn listing(id: &str, owner: Option<&str>, status: ListingStatus) -> Listing {
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
        status,
        created_at: now(),
        updated_at: None,
        expiration_date: now() + Duration::days(60),
        deleted_at: None,
        owner: owner.map(|id| UserId(id.to_string())),
    }
}

pub(super) fn draft_for(listing: &Listing, requester: &str) -> StagedEdit {
    StagedEdit {
        listing_id: listing.id.clone(),
        title: format!("{} (revised)", listing.title),
        description: listing.description.clone(),
        address: listing.address.clone(),
        city: listing.city.clone(),
        neighborhood: listing.neighborhood.clone(),
        price: listing.price,
        area: listing.area,
        apartment_type: listing.apartment_type,
        unit_type: listing.unit_type,
        rooms: listing.rooms,
        bathrooms: listing.bathrooms,
        can_be_furnished: listing.can_be_furnished,
        whatsapp_number: listing.whatsapp_number.clone(),
        image_urls: Vec::new(),
        furniture: Vec::new(),
        submitted_by: UserId(requester.to_string()),
        submitted_at: now(),
    }
}

pub(super) type TestQueue = ModerationQueue<MemoryDirectory, MemoryListingStore, MemoryDraftStore>;

pub(super) fn build_queue() -> (
    TestQueue,
    Arc<MemoryDirectory>,
    Arc<MemoryListingStore>,
    Arc<MemoryDraftStore>,
) {
    let users = Arc::new(MemoryDirectory::default());
    let listings = Arc::new(MemoryListingStore::default());
    let drafts = Arc::new(MemoryDraftStore::default());
    let queue = ModerationQueue::new(users.clone(), listings.clone(), drafts.clone());
    (queue, users, listings, drafts)
}

#[derive(Default)]
pub(super) struct MemoryDirectory {
    profiles: Mutex<Vec<UserProfile>>,
}

impl MemoryDirectory {
    pub(super) fn add(&self, profile: UserProfile) {
        self.profiles
            .lock()
            .expect("directory mutex poisoned")
            .push(profile);
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

#[derive(Default)]
pub(super) struct MemoryListingStore {
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
        let mut rows: Vec<Listing> = guard
            .values()
            .filter(|listing| statuses.contains(&listing.status))
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.id.0.cmp(&b.id.0));
        Ok(rows)
    }
}

#[derive(Default)]
pub(super) struct MemoryDraftStore {
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
        let mut ids: Vec<ListingId> = guard.keys().cloned().collect();
        ids.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(ids)
    }
}
