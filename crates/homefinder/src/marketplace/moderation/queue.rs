use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::directory::UserDirectory;
use crate::marketplace::listings::{
    EditDraftStore, Listing, ListingId, ListingStatus, ListingStore, StoreError, UserId,
};

/// What kind of admin action a worklist row asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestKind {
    SellerRegistration,
    Verification,
    PropertyEdit,
    PropertyDeletion,
}

impl RequestKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::SellerRegistration => "Seller Registration",
            Self::Verification => "Identity Verification",
            Self::PropertyEdit => "Property Edit",
            Self::PropertyDeletion => "Property Deletion",
        }
    }
}

/// One actionable row of the admin worklist. Built fresh on every query,
/// never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModerationRequest {
    pub kind: RequestKind,
    pub user_id: UserId,
    pub full_name: String,
    pub email: String,
    pub avatar_url: Option<String>,
    pub listing_id: Option<ListingId>,
    pub listing_title: Option<String>,
    pub requested_at: Option<DateTime<Utc>>,
}

/// Aggregates pending seller, verification, and property requests into one
/// ordered worklist for admins.
pub struct ModerationQueue<U, L, D> {
    users: Arc<U>,
    listings: Arc<L>,
    drafts: Arc<D>,
}

impl<U, L, D> ModerationQueue<U, L, D>
where
    U: UserDirectory + 'static,
    L: ListingStore + 'static,
    D: EditDraftStore + 'static,
{
    pub fn new(users: Arc<U>, listings: Arc<L>, drafts: Arc<D>) -> Self {
        Self {
            users,
            listings,
            drafts,
        }
    }

    /// Assemble the worklist: seller registrations, then verifications, then
    /// explicitly pending properties, then Active listings holding a staged
    /// draft. A user pending both seller status and verification gets one
    /// merged SellerRegistration row, since approving it grants both.
    pub fn build(&self) -> Result<Vec<ModerationRequest>, StoreError> {
        let mut requests = Vec::new();

        for user in self.users.seller_applicants()? {
            if user.is_seller {
                continue;
            }
            requests.push(ModerationRequest {
                kind: RequestKind::SellerRegistration,
                user_id: user.id.clone(),
                full_name: user.full_name(),
                email: user.email,
                avatar_url: user.avatar_url,
                listing_id: None,
                listing_title: None,
                requested_at: None,
            });
        }

        for user in self.users.pending_verification()? {
            let already_queued = requests.iter().any(|request| {
                request.user_id == user.id && request.kind == RequestKind::SellerRegistration
            });
            if already_queued {
                continue;
            }
            requests.push(ModerationRequest {
                kind: RequestKind::Verification,
                user_id: user.id.clone(),
                full_name: user.full_name(),
                email: user.email,
                avatar_url: user.avatar_url,
                listing_id: None,
                listing_title: None,
                requested_at: None,
            });
        }

        let pending = self.listings.by_status(&[
            ListingStatus::PendingApproval,
            ListingStatus::PendingDeletion,
        ])?;
        for listing in &pending {
            let kind = if listing.status == ListingStatus::PendingDeletion {
                RequestKind::PropertyDeletion
            } else {
                RequestKind::PropertyEdit
            };
            requests.push(self.property_request(kind, listing)?);
        }

        // Staged drafts sit beside Active rows; surface those too, unless the
        // listing is already queued above.
        for draft_id in self.drafts.pending_ids()? {
            let already_queued = requests.iter().any(|request| {
                request.listing_id.as_ref() == Some(&draft_id)
                    && request.kind == RequestKind::PropertyEdit
            });
            if already_queued {
                continue;
            }
            let Some(listing) = self.listings.fetch(&draft_id)? else {
                continue;
            };
            if listing.status != ListingStatus::Active {
                continue;
            }
            requests.push(self.property_request(RequestKind::PropertyEdit, &listing)?);
        }

        Ok(requests)
    }

    fn property_request(
        &self,
        kind: RequestKind,
        listing: &Listing,
    ) -> Result<ModerationRequest, StoreError> {
        let owner = match &listing.owner {
            Some(owner_id) => self.users.fetch(owner_id)?,
            None => None,
        };

        let (user_id, full_name, email, avatar_url) = match owner {
            Some(profile) => (
                profile.id.clone(),
                profile.full_name(),
                profile.email,
                profile.avatar_url,
            ),
            None => (
                listing.owner.clone().unwrap_or(UserId(String::new())),
                String::new(),
                String::new(),
                None,
            ),
        };

        Ok(ModerationRequest {
            kind,
            user_id,
            full_name,
            email,
            avatar_url,
            listing_id: Some(listing.id.clone()),
            listing_title: Some(listing.title.clone()),
            requested_at: Some(listing.request_date()),
        })
    }
}
