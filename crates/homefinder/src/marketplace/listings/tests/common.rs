use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, TimeZone, Utc};

use crate::marketplace::listings::domain::{
    ApartmentType, FurnitureSubmission, ImageUpload, Listing, ListingId, ListingStatus,
    ListingSubmission, StagedEdit, UnitType, UserId,
};
use crate::marketplace::listings::service::{ListingPolicy, ListingService};
use crate::marketplace::listings::store::{
    EditDraftStore, ListingStore, MediaStore, StoreError,
};

pub(super) fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn owner() -> UserId {
    UserId("user-omar".to_string())
}

pub(super) fn upload(file_name: &str) -> ImageUpload {
    ImageUpload {
        file_name: file_name.to_string(),
        bytes: vec![0xAB, 0xCD, 0xEF],
    }
}

pub(super) fn submission() -> ListingSubmission {
    ListingSubmission {
        title: "Sunny three-bedroom near the Nile".to_string(),
        description: Some("Renovated kitchen, balcony with river view".to_string()),
        address: "14 Corniche El Nil".to_string(),
        city: "Cairo".to_string(),
        neighborhood: "Maadi".to_string(),
        price: 2_500_000.0,
        area: 140.0,
        apartment_type: ApartmentType::ForSale,
        unit_type: UnitType::Residential,
        rooms: 3,
        bathrooms: 2,
        can_be_furnished: true,
        whatsapp_number: "+20-100-555-0199".to_string(),
        images: vec![upload("front.jpg"), upload("balcony.jpg")],
        furniture: vec![FurnitureSubmission {
            name: "Dining table".to_string(),
            price: Some(12_000.0),
            image: Some(upload("table.jpg")),
        }],
    }
}

pub(super) type TestService = ListingService<MemoryListingStore, MemoryDraftStore, MemoryMediaStore>;

pub(super) fn build_service() -> (
    Arc<TestService>,
    Arc<MemoryListingStore>,
    Arc<MemoryDraftStore>,
) {
    let listings = Arc::new(MemoryListingStore::default());
    let drafts = Arc::new(MemoryDraftStore::default());
    let media = Arc::new(MemoryMediaStore::default());
    let service = Arc::new(ListingService::new(
        listings.clone(),
        drafts.clone(),
        media,
        ListingPolicy::default(),
    ));
    (service, listings, drafts)
}

#[derive(Default)]
pub(super) struct MemoryListingStore {
    pub(super) rows: Mutex<HashMap<ListingId, Listing>>,
}

impl MemoryListingStore {
    pub(super) fn len(&self) -> usize {
        self.rows.lock().expect("listing mutex poisoned").len()
    }

    /// Test-only backdoor to rewrite a row without going through the engine.
    pub(super) fn overwrite(&self, listing: Listing) {
        self.rows
            .lock()
            .expect("listing mutex poisoned")
            .insert(listing.id.clone(), listing);
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
pub(super) struct MemoryDraftStore {
    pub(super) drafts: Mutex<HashMap<ListingId, StagedEdit>>,
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
pub(super) struct MemoryMediaStore {
    sequence: AtomicU64,
}

impl MediaStore for MemoryMediaStore {
    fn save(&self, upload: &ImageUpload) -> Result<String, StoreError> {
        let n = self.sequence.fetch_add(1, Ordering::Relaxed);
        Ok(format!("/uploads/properties/{n}-{}", upload.file_name))
    }
}

/// Media sink that always fails, for exercising the storage-failure path.
pub(super) struct UnavailableMediaStore;

impl MediaStore for UnavailableMediaStore {
    fn save(&self, _upload: &ImageUpload) -> Result<String, StoreError> {
        Err(StoreError::Unavailable("blob store offline".to_string()))
    }
}
