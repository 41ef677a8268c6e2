use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for property listings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListingId(pub String);

/// Identifier wrapper for marketplace users.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

/// Lifecycle state of an advertisement. There is no implicit default; legacy
/// rows are migrated to `Active` before they enter the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingStatus {
    Active,
    PendingApproval,
    PendingDeletion,
    Deleted,
    Rejected,
    Expired,
}

impl ListingStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::PendingApproval => "Pending Approval",
            Self::PendingDeletion => "Pending Deletion",
            Self::Deleted => "Deleted",
            Self::Rejected => "Rejected",
            Self::Expired => "Expired",
        }
    }
}

/// Whether the advertisement offers the unit for sale or for rent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApartmentType {
    ForSale,
    ForRent,
}

impl ApartmentType {
    pub const fn label(self) -> &'static str {
        match self {
            Self::ForSale => "For Sale",
            Self::ForRent => "For Rent",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitType {
    Residential,
    Commercial,
}

impl UnitType {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Residential => "Residential",
            Self::Commercial => "Commercial",
        }
    }
}

/// Stored photo of a listing. The set is replaced wholesale when an approved
/// edit carries new uploads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingImage {
    pub id: String,
    pub url: String,
    pub uploaded_at: DateTime<Utc>,
}

/// Furniture line item attached to a furnishable listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FurnitureItem {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub image_url: Option<String>,
}

/// A property advertisement as persisted in the listing store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: ListingId,
    pub title: String,
    pub description: Option<String>,
    pub address: String,
    pub city: String,
    pub neighborhood: String,
    pub price: f64,
    pub area: f64,
    pub apartment_type: ApartmentType,
    pub unit_type: UnitType,
    pub rooms: u32,
    pub bathrooms: u32,
    pub can_be_furnished: bool,
    pub whatsapp_number: String,
    pub images: Vec<ListingImage>,
    pub furniture: Vec<FurnitureItem>,
    pub status: ListingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub expiration_date: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub owner: Option<UserId>,
}

impl Listing {
    /// Active and not yet past its expiration date, i.e. visible to buyers.
    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        self.status == ListingStatus::Active && self.expiration_date > now
    }

    /// The moment a moderation queue row for this listing is dated with.
    pub fn request_date(&self) -> DateTime<Utc> {
        self.updated_at.unwrap_or(self.created_at)
    }
}

/// Raw file upload handed to the media store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Furniture line item as submitted by the seller. Items without a name or a
/// positive price are skipped during intake rather than rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FurnitureSubmission {
    pub name: String,
    pub price: Option<f64>,
    pub image: Option<ImageUpload>,
}

/// Seller-provided payload for creating a listing or staging an edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingSubmission {
    pub title: String,
    pub description: Option<String>,
    pub address: String,
    pub city: String,
    pub neighborhood: String,
    pub price: f64,
    pub area: f64,
    pub apartment_type: ApartmentType,
    pub unit_type: UnitType,
    pub rooms: u32,
    pub bathrooms: u32,
    pub can_be_furnished: bool,
    pub whatsapp_number: String,
    #[serde(default)]
    pub images: Vec<ImageUpload>,
    #[serde(default)]
    pub furniture: Vec<FurnitureSubmission>,
}

/// A staged replacement payload for exactly one listing, held out-of-band
/// until an admin approves or rejects it. Image uploads are written to the
/// media store when the edit is requested, so the draft round-trips stored
/// urls only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StagedEdit {
    pub listing_id: ListingId,
    pub title: String,
    pub description: Option<String>,
    pub address: String,
    pub city: String,
    pub neighborhood: String,
    pub price: f64,
    pub area: f64,
    pub apartment_type: ApartmentType,
    pub unit_type: UnitType,
    pub rooms: u32,
    pub bathrooms: u32,
    pub can_be_furnished: bool,
    pub whatsapp_number: String,
    /// Empty means "keep the current image set".
    pub image_urls: Vec<String>,
    /// Empty means "keep the current furniture set".
    pub furniture: Vec<FurnitureItem>,
    pub submitted_by: UserId,
    pub submitted_at: DateTime<Utc>,
}

/// Requester identity handed into the engine by the boundary layer. Ownership
/// is decided here, never by inspecting identifier strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    pub user_id: UserId,
    pub is_admin: bool,
}

impl AuthContext {
    pub fn user(user_id: UserId) -> Self {
        Self {
            user_id,
            is_admin: false,
        }
    }

    pub fn admin(user_id: UserId) -> Self {
        Self {
            user_id,
            is_admin: true,
        }
    }

    /// Admins may modify anything; everyone else only their own listings.
    /// Unowned legacy rows are admin-only.
    pub fn can_modify(&self, owner: Option<&UserId>) -> bool {
        self.is_admin || owner == Some(&self.user_id)
    }
}

/// One page of query results plus the total match count for pagination.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
}

/// Buyer-facing search filters. Every field is optional; an empty filter set
/// matches the whole live inventory.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchFilters {
    pub query: Option<String>,
    pub price_from: Option<f64>,
    pub price_to: Option<f64>,
    pub area_from: Option<f64>,
    pub area_to: Option<f64>,
    pub rooms: Option<u32>,
    pub bathrooms: Option<u32>,
    pub city: Option<String>,
    pub neighborhood: Option<String>,
    pub unit_type: Option<UnitType>,
    pub furnished: Option<bool>,
}

impl SearchFilters {
    /// Whether a listing satisfies every present filter. Text filters are
    /// case-insensitive substring matches; rooms and bathrooms are exact;
    /// the furnished flag matches `can_be_furnished`.
    pub fn matches(&self, listing: &Listing) -> bool {
        if let Some(query) = non_blank(&self.query) {
            let needle = query.to_lowercase();
            let in_title = listing.title.to_lowercase().contains(&needle);
            let in_description = listing
                .description
                .as_deref()
                .is_some_and(|text| text.to_lowercase().contains(&needle));
            let in_address = listing.address.to_lowercase().contains(&needle);
            if !(in_title || in_description || in_address) {
                return false;
            }
        }

        if let Some(min) = self.price_from {
            if listing.price < min {
                return false;
            }
        }
        if let Some(max) = self.price_to {
            if listing.price > max {
                return false;
            }
        }
        if let Some(min) = self.area_from {
            if listing.area < min {
                return false;
            }
        }
        if let Some(max) = self.area_to {
            if listing.area > max {
                return false;
            }
        }

        if let Some(rooms) = self.rooms {
            if listing.rooms != rooms {
                return false;
            }
        }
        if let Some(bathrooms) = self.bathrooms {
            if listing.bathrooms != bathrooms {
                return false;
            }
        }

        if let Some(city) = non_blank(&self.city) {
            if !listing
                .city
                .to_lowercase()
                .contains(&city.to_lowercase())
            {
                return false;
            }
        }
        if let Some(neighborhood) = non_blank(&self.neighborhood) {
            if !listing
                .neighborhood
                .to_lowercase()
                .contains(&neighborhood.to_lowercase())
            {
                return false;
            }
        }

        if let Some(unit_type) = self.unit_type {
            if listing.unit_type != unit_type {
                return false;
            }
        }
        if let Some(furnished) = self.furnished {
            if listing.can_be_furnished != furnished {
                return false;
            }
        }

        true
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|text| !text.is_empty())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationKind {
    City,
    Neighborhood,
}

/// Type-ahead suggestion for the location search box: a distinct city or
/// neighborhood plus the number of live listings carrying it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocationSuggestion {
    pub kind: LocationKind,
    pub name: String,
    pub count: usize,
}
