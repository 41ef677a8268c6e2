use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use chrono::Utc;
use serde_json::json;

use super::domain::CraftsmanSubmission;
use super::service::{CraftsmanError, CraftsmanService};
use super::store::CraftsmanStore;
use crate::marketplace::listings::StoreError;

pub fn craftsman_router<C>(service: Arc<CraftsmanService<C>>) -> Router
where
    C: CraftsmanStore + 'static,
{
    Router::new()
        .route(
            "/api/v1/craftsmen",
            get(list_handler::<C>).post(register_handler::<C>),
        )
        .with_state(service)
}

pub(crate) async fn list_handler<C>(
    State(service): State<Arc<CraftsmanService<C>>>,
) -> Response
where
    C: CraftsmanStore + 'static,
{
    match service.all() {
        Ok(craftsmen) => (StatusCode::OK, axum::Json(craftsmen)).into_response(),
        Err(error) => failure_response(error),
    }
}

pub(crate) async fn register_handler<C>(
    State(service): State<Arc<CraftsmanService<C>>>,
    axum::Json(submission): axum::Json<CraftsmanSubmission>,
) -> Response
where
    C: CraftsmanStore + 'static,
{
    match service.add(submission, Utc::now()) {
        Ok(craftsman) => (
            StatusCode::CREATED,
            axum::Json(json!({
                "isSuccess": true,
                "message": "craftsman registered successfully",
                "craftsman_id": craftsman.id,
            })),
        )
            .into_response(),
        Err(error) => failure_response(error),
    }
}

fn failure_response(error: CraftsmanError) -> Response {
    let status = match &error {
        CraftsmanError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        CraftsmanError::Store(StoreError::Conflict) => StatusCode::CONFLICT,
        CraftsmanError::Store(StoreError::NotFound) => StatusCode::NOT_FOUND,
        CraftsmanError::Store(StoreError::Unavailable(_)) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
        tracing::error!(%error, "craftsman store failure");
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
