use crate::infra::AppState;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Extension;
use axum::Json;
use homefinder::marketplace::craftsmen::{craftsman_router, CraftsmanService, CraftsmanStore};
use homefinder::marketplace::engagement::{
    engagement_router, EngagementService, LikeStore, WishlistStore,
};
use homefinder::marketplace::listings::{
    listing_router, EditDraftStore, ListingService, ListingStore, MediaStore,
};
use homefinder::marketplace::moderation::{ModerationQueue, UserDirectory};
use serde_json::json;
use std::sync::Arc;

/// Marketplace routers plus the operational endpoints. Each domain router
/// carries its own service state; the admin worklist gets a state of its own
/// here.
pub(crate) fn with_marketplace_routes<L, D, M, W, K, C, U>(
    listings: Arc<ListingService<L, D, M>>,
    engagement: Arc<EngagementService<W, K, L>>,
    craftsmen: Arc<CraftsmanService<C>>,
    moderation: Arc<ModerationQueue<U, L, D>>,
) -> axum::Router
where
    L: ListingStore + 'static,
    D: EditDraftStore + 'static,
    M: MediaStore + 'static,
    W: WishlistStore + 'static,
    K: LikeStore + 'static,
    C: CraftsmanStore + 'static,
    U: UserDirectory + 'static,
{
    listing_router(listings)
        .merge(engagement_router(engagement))
        .merge(craftsman_router(craftsmen))
        .merge(
            axum::Router::new()
                .route(
                    "/api/v1/admin/moderation-queue",
                    axum::routing::get(moderation_queue_endpoint::<U, L, D>),
                )
                .with_state(moderation),
        )
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// The whole admin worklist, rebuilt per request from the live stores.
pub(crate) async fn moderation_queue_endpoint<U, L, D>(
    State(queue): State<Arc<ModerationQueue<U, L, D>>>,
) -> Response
where
    U: UserDirectory + 'static,
    L: ListingStore + 'static,
    D: EditDraftStore + 'static,
{
    match queue.build() {
        Ok(requests) => (StatusCode::OK, Json(requests)).into_response(),
        Err(err) => {
            tracing::error!(%err, "moderation queue assembly failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "isSuccess": false,
                    "message": "something went wrong, please try again",
                })),
            )
                .into_response()
        }
    }
}
