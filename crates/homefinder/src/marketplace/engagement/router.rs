use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

use super::service::{EngagementError, EngagementService};
use super::store::{LikeStore, WishlistStore};
use crate::marketplace::listings::{ListingId, ListingStore, StoreError, UserId};

pub fn engagement_router<W, K, L>(service: Arc<EngagementService<W, K, L>>) -> Router
where
    W: WishlistStore + 'static,
    K: LikeStore + 'static,
    L: ListingStore + 'static,
{
    Router::new()
        .route("/api/v1/listings/:id", get(detail_handler::<W, K, L>))
        .route(
            "/api/v1/listings/:id/wishlist",
            post(add_wishlist_handler::<W, K, L>).delete(remove_wishlist_handler::<W, K, L>),
        )
        .route(
            "/api/v1/listings/:id/like",
            post(like_handler::<W, K, L>).delete(unlike_handler::<W, K, L>),
        )
        .route(
            "/api/v1/listings/:id/engagement",
            get(engagement_handler::<W, K, L>),
        )
        .route(
            "/api/v1/users/:user_id/wishlist",
            get(wishlist_handler::<W, K, L>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct MembershipRequest {
    pub user_id: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct EngagementQuery {
    pub user_id: Option<String>,
}

pub(crate) async fn add_wishlist_handler<W, K, L>(
    State(service): State<Arc<EngagementService<W, K, L>>>,
    Path(id): Path<String>,
    axum::Json(request): axum::Json<MembershipRequest>,
) -> Response
where
    W: WishlistStore + 'static,
    K: LikeStore + 'static,
    L: ListingStore + 'static,
{
    let result = service.add_to_wishlist(&ListingId(id), &UserId(request.user_id), Utc::now());
    membership_response(result, "added to your wishlist")
}

pub(crate) async fn remove_wishlist_handler<W, K, L>(
    State(service): State<Arc<EngagementService<W, K, L>>>,
    Path(id): Path<String>,
    axum::Json(request): axum::Json<MembershipRequest>,
) -> Response
where
    W: WishlistStore + 'static,
    K: LikeStore + 'static,
    L: ListingStore + 'static,
{
    let result = service.remove_from_wishlist(&ListingId(id), &UserId(request.user_id));
    membership_response(result, "removed from your wishlist")
}

pub(crate) async fn like_handler<W, K, L>(
    State(service): State<Arc<EngagementService<W, K, L>>>,
    Path(id): Path<String>,
    axum::Json(request): axum::Json<MembershipRequest>,
) -> Response
where
    W: WishlistStore + 'static,
    K: LikeStore + 'static,
    L: ListingStore + 'static,
{
    let result = service.like(&ListingId(id), &UserId(request.user_id), Utc::now());
    membership_response(result, "property liked")
}

pub(crate) async fn unlike_handler<W, K, L>(
    State(service): State<Arc<EngagementService<W, K, L>>>,
    Path(id): Path<String>,
    axum::Json(request): axum::Json<MembershipRequest>,
) -> Response
where
    W: WishlistStore + 'static,
    K: LikeStore + 'static,
    L: ListingStore + 'static,
{
    let result = service.unlike(&ListingId(id), &UserId(request.user_id));
    membership_response(result, "like removed")
}

/// Detail payload for the storefront. The listing serializes as an object,
/// so the like count is folded into the same body.
pub(crate) async fn detail_handler<W, K, L>(
    State(service): State<Arc<EngagementService<W, K, L>>>,
    Path(id): Path<String>,
) -> Response
where
    W: WishlistStore + 'static,
    K: LikeStore + 'static,
    L: ListingStore + 'static,
{
    match service.listing_detail(&ListingId(id)) {
        Ok(Some((listing, like_count))) => match serde_json::to_value(&listing) {
            Ok(serde_json::Value::Object(mut body)) => {
                body.insert("like_count".to_string(), json!(like_count));
                (StatusCode::OK, axum::Json(serde_json::Value::Object(body))).into_response()
            }
            _ => failure_response(EngagementError::Store(StoreError::Unavailable(
                "listing did not serialize as an object".to_string(),
            ))),
        },
        Ok(None) => failure_response(EngagementError::ListingNotFound),
        Err(error) => failure_response(error),
    }
}

/// Per-listing engagement flags for the detail page: like count plus the
/// requester's own membership when a user id is supplied.
pub(crate) async fn engagement_handler<W, K, L>(
    State(service): State<Arc<EngagementService<W, K, L>>>,
    Path(id): Path<String>,
    Query(query): Query<EngagementQuery>,
) -> Response
where
    W: WishlistStore + 'static,
    K: LikeStore + 'static,
    L: ListingStore + 'static,
{
    let listing_id = ListingId(id);
    let flags = query.user_id.map(UserId).map(|user_id| {
        let liked = service.has_liked(&listing_id, &user_id);
        let saved = service.is_saved(&listing_id, &user_id);
        (liked, saved)
    });

    let (liked, saved) = match flags {
        Some((Ok(liked), Ok(saved))) => (Some(liked), Some(saved)),
        Some((Err(error), _)) | Some((_, Err(error))) => return failure_response(error),
        None => (None, None),
    };

    match service.like_count(&listing_id) {
        Ok(count) => (
            StatusCode::OK,
            axum::Json(json!({
                "like_count": count,
                "liked": liked,
                "in_wishlist": saved,
            })),
        )
            .into_response(),
        Err(error) => failure_response(error),
    }
}

pub(crate) async fn wishlist_handler<W, K, L>(
    State(service): State<Arc<EngagementService<W, K, L>>>,
    Path(user_id): Path<String>,
) -> Response
where
    W: WishlistStore + 'static,
    K: LikeStore + 'static,
    L: ListingStore + 'static,
{
    match service.saved_listings(&UserId(user_id)) {
        Ok(listings) => (StatusCode::OK, axum::Json(listings)).into_response(),
        Err(error) => failure_response(error),
    }
}

fn membership_response(result: Result<(), EngagementError>, message: &str) -> Response {
    match result {
        Ok(()) => (
            StatusCode::OK,
            axum::Json(json!({ "isSuccess": true, "message": message })),
        )
            .into_response(),
        Err(error) => failure_response(error),
    }
}

fn failure_response(error: EngagementError) -> Response {
    let status = match &error {
        EngagementError::AlreadySaved | EngagementError::AlreadyLiked => StatusCode::CONFLICT,
        EngagementError::NotSaved
        | EngagementError::NotLiked
        | EngagementError::ListingNotFound => StatusCode::NOT_FOUND,
        EngagementError::Store(StoreError::Conflict) => StatusCode::CONFLICT,
        EngagementError::Store(StoreError::NotFound) => StatusCode::NOT_FOUND,
        EngagementError::Store(StoreError::Unavailable(_)) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
        tracing::error!(%error, "engagement store failure");
        "something went wrong, please try again".to_string()
    } else {
        error.to_string()
    };

    (
        status,
        axum::Json(json!({ "isSuccess": false, "message": message })),
    )
        .into_response()
}
