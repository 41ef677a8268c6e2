use super::domain::{ImageUpload, Listing, ListingId, ListingStatus, StagedEdit, UserId};

/// Error enumeration for store failures. `Unavailable` covers unexpected I/O
/// and maps to a generic failure at the boundary; the rest are expected
/// outcomes the services branch on.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Persistent record set of property advertisements. Rows are never removed;
/// deletion is a status transition.
pub trait ListingStore: Send + Sync {
    fn insert(&self, listing: Listing) -> Result<Listing, StoreError>;
    fn update(&self, listing: Listing) -> Result<(), StoreError>;
    fn fetch(&self, id: &ListingId) -> Result<Option<Listing>, StoreError>;
    fn all(&self) -> Result<Vec<Listing>, StoreError>;
    fn by_owner(&self, owner: &UserId) -> Result<Vec<Listing>, StoreError>;
    fn by_status(&self, statuses: &[ListingStatus]) -> Result<Vec<Listing>, StoreError>;
}

/// Durable key-value store holding at most one staged edit per listing.
/// `put` replaces silently: the last staged edit wins.
pub trait EditDraftStore: Send + Sync {
    fn put(&self, draft: StagedEdit) -> Result<(), StoreError>;
    fn fetch(&self, id: &ListingId) -> Result<Option<StagedEdit>, StoreError>;
    fn remove(&self, id: &ListingId) -> Result<(), StoreError>;
    fn pending_ids(&self) -> Result<Vec<ListingId>, StoreError>;
}

/// Blob sink for uploaded photos. Implementations generate a unique stored
/// name per upload, so concurrent saves never collide.
pub trait MediaStore: Send + Sync {
    fn save(&self, upload: &ImageUpload) -> Result<String, StoreError>;
}
