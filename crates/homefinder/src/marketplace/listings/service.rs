use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use super::domain::{
    AuthContext, FurnitureItem, FurnitureSubmission, ImageUpload, Listing, ListingId,
    ListingImage, ListingStatus, ListingSubmission, LocationKind, LocationSuggestion, Page,
    SearchFilters, StagedEdit, UserId,
};
use super::store::{EditDraftStore, ListingStore, MediaStore, StoreError};

/// How many type-ahead suggestions the location endpoint returns at most.
const LOCATION_SUGGESTION_CAP: usize = 10;

/// Lifecycle knobs. The expiration horizon is applied at creation time; the
/// sweep later retires anything past it.
#[derive(Debug, Clone, Copy)]
pub struct ListingPolicy {
    pub expiration_days: i64,
}

impl Default for ListingPolicy {
    fn default() -> Self {
        Self {
            expiration_days: 60,
        }
    }
}

/// The listing lifecycle engine: owns the status state machine, the staged
/// edit protocol, and every read path over the advertisement inventory.
pub struct ListingService<L, D, M> {
    listings: Arc<L>,
    drafts: Arc<D>,
    media: Arc<M>,
    policy: ListingPolicy,
}

static LISTING_SEQUENCE: AtomicU64 = AtomicU64::new(1);
static IMAGE_SEQUENCE: AtomicU64 = AtomicU64::new(1);
static FURNITURE_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_listing_id() -> ListingId {
    let id = LISTING_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ListingId(format!("prop-{id:06}"))
}

fn next_image_id() -> String {
    let id = IMAGE_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("img-{id:06}")
}

fn next_furniture_id() -> String {
    let id = FURNITURE_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("furn-{id:06}")
}

impl<L, D, M> ListingService<L, D, M>
where
    L: ListingStore + 'static,
    D: EditDraftStore + 'static,
    M: MediaStore + 'static,
{
    pub fn new(listings: Arc<L>, drafts: Arc<D>, media: Arc<M>, policy: ListingPolicy) -> Self {
        Self {
            listings,
            drafts,
            media,
            policy,
        }
    }

    /// Validate and persist a new advertisement. The listing goes live
    /// immediately with an expiration date one policy horizon out.
    pub fn create(
        &self,
        submission: ListingSubmission,
        owner: &UserId,
        now: DateTime<Utc>,
    ) -> Result<Listing, ListingServiceError> {
        validate_submission(&submission, true)?;

        let images = self.store_images(&submission.images, now)?;
        let furniture =
            self.store_furniture(&submission.furniture, submission.can_be_furnished)?;

        let listing = Listing {
            id: next_listing_id(),
            title: submission.title,
            description: submission.description,
            address: submission.address,
            city: submission.city,
            neighborhood: submission.neighborhood,
            price: submission.price,
            area: submission.area,
            apartment_type: submission.apartment_type,
            unit_type: submission.unit_type,
            rooms: submission.rooms,
            bathrooms: submission.bathrooms,
            can_be_furnished: submission.can_be_furnished,
            whatsapp_number: submission.whatsapp_number,
            images,
            furniture,
            status: ListingStatus::Active,
            created_at: now,
            updated_at: None,
            expiration_date: now + Duration::days(self.policy.expiration_days),
            deleted_at: None,
            owner: Some(owner.clone()),
        };

        let stored = self.listings.insert(listing)?;
        Ok(stored)
    }

    pub fn get_by_id(&self, id: &ListingId) -> Result<Option<Listing>, ListingServiceError> {
        Ok(self.listings.fetch(id)?)
    }

    /// Live inventory, newest first.
    pub fn get_all(
        &self,
        page: usize,
        page_size: usize,
        now: DateTime<Utc>,
    ) -> Result<Page<Listing>, ListingServiceError> {
        let mut live: Vec<Listing> = self
            .listings
            .all()?
            .into_iter()
            .filter(|listing| listing.is_live(now))
            .collect();
        sort_newest_first(&mut live);
        Ok(paginate(live, page, page_size))
    }

    /// Everything the owner has listed, regardless of status, so pending and
    /// rejected work stays visible to them.
    pub fn get_by_user(&self, owner: &UserId) -> Result<Vec<Listing>, ListingServiceError> {
        let mut listings = self.listings.by_owner(owner)?;
        sort_newest_first(&mut listings);
        Ok(listings)
    }

    /// Listings awaiting a moderation decision, newest request first.
    pub fn get_pending(&self) -> Result<Vec<Listing>, ListingServiceError> {
        let mut pending = self.listings.by_status(&[
            ListingStatus::PendingApproval,
            ListingStatus::PendingDeletion,
        ])?;
        pending.sort_by(|a, b| b.request_date().cmp(&a.request_date()));
        Ok(pending)
    }

    pub fn search(
        &self,
        filters: &SearchFilters,
        page: usize,
        page_size: usize,
        now: DateTime<Utc>,
    ) -> Result<Page<Listing>, ListingServiceError> {
        let mut matches: Vec<Listing> = self
            .listings
            .all()?
            .into_iter()
            .filter(|listing| listing.is_live(now) && filters.matches(listing))
            .collect();
        sort_newest_first(&mut matches);
        Ok(paginate(matches, page, page_size))
    }

    /// Distinct cities and neighborhoods of the live inventory matching the
    /// partial term, busiest first, capped at ten. A blank term yields
    /// nothing.
    pub fn location_suggestions(
        &self,
        term: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<LocationSuggestion>, ListingServiceError> {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return Ok(Vec::new());
        }

        let live: Vec<Listing> = self
            .listings
            .all()?
            .into_iter()
            .filter(|listing| listing.is_live(now))
            .collect();

        let mut suggestions = group_locations(&live, &term, LocationKind::City);
        suggestions.extend(group_locations(&live, &term, LocationKind::Neighborhood));
        suggestions.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
        suggestions.truncate(LOCATION_SUGGESTION_CAP);
        Ok(suggestions)
    }

    /// Stage a replacement payload for a live listing. The draft is held
    /// out-of-band until an admin decides; only the listing's updated_at is
    /// refreshed. A second request before approval overwrites the first.
    pub fn request_edit(
        &self,
        id: &ListingId,
        submission: ListingSubmission,
        ctx: &AuthContext,
        now: DateTime<Utc>,
    ) -> Result<(), ListingServiceError> {
        let mut listing = self
            .listings
            .fetch(id)?
            .ok_or(ListingServiceError::NotFound)?;

        if !ctx.can_modify(listing.owner.as_ref()) {
            return Err(ListingServiceError::NotOwner);
        }

        // Images are optional on an edit: an empty set keeps the current ones.
        validate_submission(&submission, false)?;

        let image_urls = self
            .store_images(&submission.images, now)?
            .into_iter()
            .map(|image| image.url)
            .collect();
        let furniture =
            self.store_furniture(&submission.furniture, submission.can_be_furnished)?;

        self.drafts.put(StagedEdit {
            listing_id: id.clone(),
            title: submission.title,
            description: submission.description,
            address: submission.address,
            city: submission.city,
            neighborhood: submission.neighborhood,
            price: submission.price,
            area: submission.area,
            apartment_type: submission.apartment_type,
            unit_type: submission.unit_type,
            rooms: submission.rooms,
            bathrooms: submission.bathrooms,
            can_be_furnished: submission.can_be_furnished,
            whatsapp_number: submission.whatsapp_number,
            image_urls,
            furniture,
            submitted_by: ctx.user_id.clone(),
            submitted_at: now,
        })?;

        listing.updated_at = Some(now);
        self.listings.update(listing)?;
        Ok(())
    }

    /// Flag a listing for deletion. The row stays put with deleted_at unset
    /// until an admin approves.
    pub fn request_deletion(
        &self,
        id: &ListingId,
        ctx: &AuthContext,
        now: DateTime<Utc>,
    ) -> Result<(), ListingServiceError> {
        let mut listing = self
            .listings
            .fetch(id)?
            .ok_or(ListingServiceError::NotFound)?;

        if !ctx.can_modify(listing.owner.as_ref()) {
            return Err(ListingServiceError::NotOwner);
        }

        listing.status = ListingStatus::PendingDeletion;
        listing.updated_at = Some(now);
        self.listings.update(listing)?;
        Ok(())
    }

    /// Apply the staged edit onto the live listing and consume the draft.
    /// Image and furniture sets are replaced wholesale only when the draft
    /// carries replacements.
    pub fn approve_edit(
        &self,
        id: &ListingId,
        now: DateTime<Utc>,
    ) -> Result<Listing, ListingServiceError> {
        let draft = self
            .drafts
            .fetch(id)?
            .ok_or(ListingServiceError::DraftNotFound)?;
        let mut listing = self
            .listings
            .fetch(id)?
            .ok_or(ListingServiceError::NotFound)?;

        listing.title = draft.title;
        listing.description = draft.description;
        listing.address = draft.address;
        listing.city = draft.city;
        listing.neighborhood = draft.neighborhood;
        listing.price = draft.price;
        listing.area = draft.area;
        listing.apartment_type = draft.apartment_type;
        listing.unit_type = draft.unit_type;
        listing.rooms = draft.rooms;
        listing.bathrooms = draft.bathrooms;
        listing.can_be_furnished = draft.can_be_furnished;
        listing.whatsapp_number = draft.whatsapp_number;

        if !draft.image_urls.is_empty() {
            listing.images = draft
                .image_urls
                .into_iter()
                .map(|url| ListingImage {
                    id: next_image_id(),
                    url,
                    uploaded_at: now,
                })
                .collect();
        }
        if !draft.furniture.is_empty() {
            listing.furniture = draft.furniture;
        }

        listing.status = ListingStatus::Active;
        listing.updated_at = Some(now);
        listing.deleted_at = None;

        self.listings.update(listing.clone())?;
        self.drafts.remove(id)?;
        Ok(listing)
    }

    /// Discard the staged edit without touching the live listing.
    pub fn reject_edit(&self, id: &ListingId) -> Result<(), ListingServiceError> {
        self.drafts
            .fetch(id)?
            .ok_or(ListingServiceError::DraftNotFound)?;
        self.drafts.remove(id)?;
        Ok(())
    }

    /// The generic admin lever for approving and rejecting new-listing and
    /// deletion requests. deleted_at is stamped iff the new status is
    /// Deleted.
    pub fn set_status(
        &self,
        id: &ListingId,
        status: ListingStatus,
        now: DateTime<Utc>,
    ) -> Result<Listing, ListingServiceError> {
        let mut listing = self
            .listings
            .fetch(id)?
            .ok_or(ListingServiceError::NotFound)?;

        listing.status = status;
        listing.deleted_at = (status == ListingStatus::Deleted).then_some(now);
        listing.updated_at = Some(now);

        self.listings.update(listing.clone())?;
        Ok(listing)
    }

    /// Retire every Active listing at or past its expiration date. Returns the
    /// number of rows transitioned; a rerun finds nothing.
    pub fn expire_sweep(&self, now: DateTime<Utc>) -> Result<usize, ListingServiceError> {
        let expired: Vec<Listing> = self
            .listings
            .by_status(&[ListingStatus::Active])?
            .into_iter()
            .filter(|listing| listing.expiration_date <= now)
            .collect();

        let count = expired.len();
        for mut listing in expired {
            listing.status = ListingStatus::Expired;
            listing.updated_at = Some(now);
            self.listings.update(listing)?;
        }
        Ok(count)
    }

    /// Whether a staged edit is outstanding for the listing. Used by the
    /// moderation queue to surface drafts on otherwise-Active rows.
    pub fn has_pending_edit(&self, id: &ListingId) -> Result<bool, ListingServiceError> {
        Ok(self.drafts.fetch(id)?.is_some())
    }

    pub fn get_edit_request(
        &self,
        id: &ListingId,
    ) -> Result<Option<StagedEdit>, ListingServiceError> {
        Ok(self.drafts.fetch(id)?)
    }

    fn store_images(
        &self,
        uploads: &[ImageUpload],
        now: DateTime<Utc>,
    ) -> Result<Vec<ListingImage>, ListingServiceError> {
        let mut images = Vec::with_capacity(uploads.len());
        for upload in uploads {
            if upload.bytes.is_empty() {
                continue;
            }
            let url = self.media.save(upload)?;
            images.push(ListingImage {
                id: next_image_id(),
                url,
                uploaded_at: now,
            });
        }
        Ok(images)
    }

    /// Furniture only sticks on furnishable listings, and only items with a
    /// name and a positive price; the rest are silently dropped.
    fn store_furniture(
        &self,
        items: &[FurnitureSubmission],
        can_be_furnished: bool,
    ) -> Result<Vec<FurnitureItem>, ListingServiceError> {
        if !can_be_furnished {
            return Ok(Vec::new());
        }

        let mut furniture = Vec::new();
        for item in items {
            let price = match item.price {
                Some(price) if price > 0.0 => price,
                _ => continue,
            };
            if item.name.trim().is_empty() {
                continue;
            }

            let image_url = match &item.image {
                Some(upload) if !upload.bytes.is_empty() => Some(self.media.save(upload)?),
                _ => None,
            };

            furniture.push(FurnitureItem {
                id: next_furniture_id(),
                name: item.name.clone(),
                price,
                image_url,
            });
        }
        Ok(furniture)
    }
}

fn validate_submission(
    submission: &ListingSubmission,
    require_images: bool,
) -> Result<(), ListingServiceError> {
    let fail = |message: &str| Err(ListingServiceError::Validation(message.to_string()));

    if submission.title.trim().is_empty() {
        return fail("a listing title is required");
    }
    if submission.price <= 0.0 {
        return fail("the price must be greater than zero");
    }
    if submission.city.trim().is_empty() {
        return fail("the city is required");
    }
    if submission.address.trim().is_empty() {
        return fail("the street address is required");
    }
    if submission.area <= 0.0 {
        return fail("the area must be greater than zero");
    }
    if submission.rooms == 0 {
        return fail("at least one room is required");
    }
    if submission.bathrooms == 0 {
        return fail("at least one bathroom is required");
    }
    if submission.whatsapp_number.trim().is_empty() {
        return fail("a WhatsApp contact number is required");
    }
    if require_images && submission.images.iter().all(|image| image.bytes.is_empty()) {
        return fail("at least one photo must be uploaded");
    }

    Ok(())
}

fn sort_newest_first(listings: &mut [Listing]) {
    listings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

fn paginate(items: Vec<Listing>, page: usize, page_size: usize) -> Page<Listing> {
    let page = page.max(1);
    let page_size = page_size.max(1);
    let total = items.len();
    let start = (page - 1).saturating_mul(page_size);
    let items = items.into_iter().skip(start).take(page_size).collect();

    Page {
        items,
        total,
        page,
        page_size,
    }
}

fn group_locations(live: &[Listing], term: &str, kind: LocationKind) -> Vec<LocationSuggestion> {
    use std::collections::BTreeMap;

    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for listing in live {
        let value = match kind {
            LocationKind::City => &listing.city,
            LocationKind::Neighborhood => &listing.neighborhood,
        };
        if value.to_lowercase().contains(term) {
            *counts.entry(value.clone()).or_default() += 1;
        }
    }

    counts
        .into_iter()
        .map(|(name, count)| LocationSuggestion { kind, name, count })
        .collect()
}

/// Error raised by the lifecycle engine. Every variant's message is written
/// for direct display to the requester.
#[derive(Debug, thiserror::Error)]
pub enum ListingServiceError {
    #[error("{0}")]
    Validation(String),
    #[error("property not found")]
    NotFound,
    #[error("no pending edit request for this property")]
    DraftNotFound,
    #[error("only the owner can modify this property")]
    NotOwner,
    #[error(transparent)]
    Store(#[from] StoreError),
}
