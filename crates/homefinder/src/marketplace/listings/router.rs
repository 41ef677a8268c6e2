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

use super::domain::{
    AuthContext, ListingId, ListingStatus, ListingSubmission, SearchFilters, UnitType, UserId,
};
use super::service::{ListingService, ListingServiceError};
use super::store::{EditDraftStore, ListingStore, MediaStore, StoreError};

/// Router builder exposing the lifecycle engine over HTTP. Authentication is
/// resolved upstream; requests carry the already-authenticated requester.
/// The listing detail endpoint is served by the engagement router, which
/// composes the like count into the payload.
pub fn listing_router<L, D, M>(service: Arc<ListingService<L, D, M>>) -> Router
where
    L: ListingStore + 'static,
    D: EditDraftStore + 'static,
    M: MediaStore + 'static,
{
    Router::new()
        .route(
            "/api/v1/listings",
            get(list_handler::<L, D, M>).post(create_handler::<L, D, M>),
        )
        .route("/api/v1/listings/search", get(search_handler::<L, D, M>))
        .route(
            "/api/v1/listings/locations",
            get(locations_handler::<L, D, M>),
        )
        .route(
            "/api/v1/listings/:id/edit-request",
            post(request_edit_handler::<L, D, M>),
        )
        .route(
            "/api/v1/listings/:id/deletion-request",
            post(request_deletion_handler::<L, D, M>),
        )
        .route(
            "/api/v1/users/:user_id/listings",
            get(by_user_handler::<L, D, M>),
        )
        .route(
            "/api/v1/admin/listings/pending",
            get(pending_handler::<L, D, M>),
        )
        .route(
            "/api/v1/admin/listings/:id/approve-edit",
            post(approve_edit_handler::<L, D, M>),
        )
        .route(
            "/api/v1/admin/listings/:id/reject-edit",
            post(reject_edit_handler::<L, D, M>),
        )
        .route(
            "/api/v1/admin/listings/:id/status",
            post(set_status_handler::<L, D, M>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreateListingRequest {
    pub owner_id: String,
    #[serde(flatten)]
    pub submission: ListingSubmission,
}

#[derive(Debug, Deserialize)]
pub(crate) struct EditListingRequest {
    pub requester_id: String,
    #[serde(default)]
    pub as_admin: bool,
    #[serde(flatten)]
    pub submission: ListingSubmission,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DeletionRequest {
    pub requester_id: String,
    #[serde(default)]
    pub as_admin: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StatusRequest {
    pub status: ListingStatus,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PageQuery {
    #[serde(default = "default_page")]
    pub page: usize,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

fn default_page() -> usize {
    1
}

fn default_page_size() -> usize {
    12
}

/// Flat query mirror of [`SearchFilters`]; query-string deserialization does
/// not cope with flattened numeric fields.
#[derive(Debug, Deserialize)]
pub(crate) struct SearchQuery {
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
    #[serde(default = "default_page")]
    pub page: usize,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

impl SearchQuery {
    fn filters(&self) -> SearchFilters {
        SearchFilters {
            query: self.query.clone(),
            price_from: self.price_from,
            price_to: self.price_to,
            area_from: self.area_from,
            area_to: self.area_to,
            rooms: self.rooms,
            bathrooms: self.bathrooms,
            city: self.city.clone(),
            neighborhood: self.neighborhood.clone(),
            unit_type: self.unit_type,
            furnished: self.furnished,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct LocationQuery {
    #[serde(default)]
    pub term: String,
}

pub(crate) async fn create_handler<L, D, M>(
    State(service): State<Arc<ListingService<L, D, M>>>,
    axum::Json(request): axum::Json<CreateListingRequest>,
) -> Response
where
    L: ListingStore + 'static,
    D: EditDraftStore + 'static,
    M: MediaStore + 'static,
{
    let owner = UserId(request.owner_id);
    match service.create(request.submission, &owner, Utc::now()) {
        Ok(listing) => (
            StatusCode::CREATED,
            axum::Json(json!({
                "isSuccess": true,
                "message": "listing saved successfully",
                "listing_id": listing.id,
            })),
        )
            .into_response(),
        Err(error) => failure_response(error),
    }
}

pub(crate) async fn list_handler<L, D, M>(
    State(service): State<Arc<ListingService<L, D, M>>>,
    Query(query): Query<PageQuery>,
) -> Response
where
    L: ListingStore + 'static,
    D: EditDraftStore + 'static,
    M: MediaStore + 'static,
{
    match service.get_all(query.page, query.page_size, Utc::now()) {
        Ok(page) => (StatusCode::OK, axum::Json(page)).into_response(),
        Err(error) => failure_response(error),
    }
}

pub(crate) async fn search_handler<L, D, M>(
    State(service): State<Arc<ListingService<L, D, M>>>,
    Query(query): Query<SearchQuery>,
) -> Response
where
    L: ListingStore + 'static,
    D: EditDraftStore + 'static,
    M: MediaStore + 'static,
{
    match service.search(&query.filters(), query.page, query.page_size, Utc::now()) {
        Ok(page) => (StatusCode::OK, axum::Json(page)).into_response(),
        Err(error) => failure_response(error),
    }
}

pub(crate) async fn locations_handler<L, D, M>(
    State(service): State<Arc<ListingService<L, D, M>>>,
    Query(query): Query<LocationQuery>,
) -> Response
where
    L: ListingStore + 'static,
    D: EditDraftStore + 'static,
    M: MediaStore + 'static,
{
    match service.location_suggestions(&query.term, Utc::now()) {
        Ok(suggestions) => (StatusCode::OK, axum::Json(suggestions)).into_response(),
        Err(error) => failure_response(error),
    }
}

pub(crate) async fn by_user_handler<L, D, M>(
    State(service): State<Arc<ListingService<L, D, M>>>,
    Path(user_id): Path<String>,
) -> Response
where
    L: ListingStore + 'static,
    D: EditDraftStore + 'static,
    M: MediaStore + 'static,
{
    match service.get_by_user(&UserId(user_id)) {
        Ok(listings) => (StatusCode::OK, axum::Json(listings)).into_response(),
        Err(error) => failure_response(error),
    }
}

pub(crate) async fn pending_handler<L, D, M>(
    State(service): State<Arc<ListingService<L, D, M>>>,
) -> Response
where
    L: ListingStore + 'static,
    D: EditDraftStore + 'static,
    M: MediaStore + 'static,
{
    match service.get_pending() {
        Ok(listings) => (StatusCode::OK, axum::Json(listings)).into_response(),
        Err(error) => failure_response(error),
    }
}

pub(crate) async fn request_edit_handler<L, D, M>(
    State(service): State<Arc<ListingService<L, D, M>>>,
    Path(id): Path<String>,
    axum::Json(request): axum::Json<EditListingRequest>,
) -> Response
where
    L: ListingStore + 'static,
    D: EditDraftStore + 'static,
    M: MediaStore + 'static,
{
    let ctx = auth_context(request.requester_id, request.as_admin);
    match service.request_edit(&ListingId(id), request.submission, &ctx, Utc::now()) {
        Ok(()) => success_response("edit request submitted for review"),
        Err(error) => failure_response(error),
    }
}

pub(crate) async fn request_deletion_handler<L, D, M>(
    State(service): State<Arc<ListingService<L, D, M>>>,
    Path(id): Path<String>,
    axum::Json(request): axum::Json<DeletionRequest>,
) -> Response
where
    L: ListingStore + 'static,
    D: EditDraftStore + 'static,
    M: MediaStore + 'static,
{
    let ctx = auth_context(request.requester_id, request.as_admin);
    match service.request_deletion(&ListingId(id), &ctx, Utc::now()) {
        Ok(()) => success_response("deletion request submitted for review"),
        Err(error) => failure_response(error),
    }
}

pub(crate) async fn approve_edit_handler<L, D, M>(
    State(service): State<Arc<ListingService<L, D, M>>>,
    Path(id): Path<String>,
) -> Response
where
    L: ListingStore + 'static,
    D: EditDraftStore + 'static,
    M: MediaStore + 'static,
{
    match service.approve_edit(&ListingId(id), Utc::now()) {
        Ok(_listing) => success_response("edit request approved"),
        Err(error) => failure_response(error),
    }
}

pub(crate) async fn reject_edit_handler<L, D, M>(
    State(service): State<Arc<ListingService<L, D, M>>>,
    Path(id): Path<String>,
) -> Response
where
    L: ListingStore + 'static,
    D: EditDraftStore + 'static,
    M: MediaStore + 'static,
{
    match service.reject_edit(&ListingId(id)) {
        Ok(()) => success_response("edit request rejected"),
        Err(error) => failure_response(error),
    }
}

pub(crate) async fn set_status_handler<L, D, M>(
    State(service): State<Arc<ListingService<L, D, M>>>,
    Path(id): Path<String>,
    axum::Json(request): axum::Json<StatusRequest>,
) -> Response
where
    L: ListingStore + 'static,
    D: EditDraftStore + 'static,
    M: MediaStore + 'static,
{
    match service.set_status(&ListingId(id), request.status, Utc::now()) {
        Ok(listing) => (
            StatusCode::OK,
            axum::Json(json!({
                "isSuccess": true,
                "message": "listing status updated",
                "status": listing.status,
            })),
        )
            .into_response(),
        Err(error) => failure_response(error),
    }
}

fn auth_context(requester_id: String, as_admin: bool) -> AuthContext {
    if as_admin {
        AuthContext::admin(UserId(requester_id))
    } else {
        AuthContext::user(UserId(requester_id))
    }
}

fn success_response(message: &str) -> Response {
    (
        StatusCode::OK,
        axum::Json(json!({ "isSuccess": true, "message": message })),
    )
        .into_response()
}

/// Expected failures map to their status with the service message; store
/// internals are logged and hidden behind a generic line.
pub(crate) fn failure_response(error: ListingServiceError) -> Response {
    let status = match &error {
        ListingServiceError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ListingServiceError::NotFound | ListingServiceError::DraftNotFound => {
            StatusCode::NOT_FOUND
        }
        ListingServiceError::NotOwner => StatusCode::FORBIDDEN,
        ListingServiceError::Store(StoreError::Conflict) => StatusCode::CONFLICT,
        ListingServiceError::Store(StoreError::NotFound) => StatusCode::NOT_FOUND,
        ListingServiceError::Store(StoreError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
        tracing::error!(%error, "listing store failure");
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
