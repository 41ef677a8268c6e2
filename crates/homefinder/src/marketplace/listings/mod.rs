//! Property listing lifecycle: creation, staged edits, moderation decisions,
//! search, and expiration.

pub mod domain;
pub mod router;
pub mod service;
pub mod store;

#[cfg(test)]
mod tests;

pub use domain::{
    ApartmentType, AuthContext, FurnitureItem, FurnitureSubmission, ImageUpload, Listing,
    ListingId, ListingImage, ListingStatus, ListingSubmission, LocationKind, LocationSuggestion,
    Page, SearchFilters, StagedEdit, UnitType, UserId,
};
pub use router::listing_router;
pub use service::{ListingPolicy, ListingService, ListingServiceError};
pub use store::{EditDraftStore, ListingStore, MediaStore, StoreError};
