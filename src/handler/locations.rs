// handler/locations.rs
use std::sync::Arc;

use axum::{
    extract::Path,
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
    Extension, Json, Router,
};
use validator::Validate;

use crate::{
    db::{locationdb::LocationPoolExt, productdb::ProductExt},
    dtos::locationdtos::*,
    error::HttpError,
    AppState,
};

pub fn locations_handler() -> Router {
    Router::new()
        .route("/", post(add_location).get(list_locations))
        .route("/allocate", post(allocate_location))
        .route("/count/:product_id", get(location_count))
        .route("/:location_id", delete(delete_location))
}

pub async fn add_location(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<AddLocationDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    app_state
        .db_client
        .get_product(body.product_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Product not found"))?;

    let location = app_state
        .db_client
        .add_location(body.product_id, &body.image_path)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok((StatusCode::CREATED, Json(location)))
}

/// Destructive allocation: on success the row is gone and the path is handed
/// to the caller. A `null` path means the product's pool is empty.
pub async fn allocate_location(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<AllocateLocationDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let path = app_state
        .db_client
        .allocate_location(body.product_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({ "path": path })))
}

pub async fn location_count(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(product_id): Path<i64>,
) -> Result<impl IntoResponse, HttpError> {
    let available = app_state
        .db_client
        .available_location_count(product_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({ "available": available })))
}

pub async fn delete_location(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(location_id): Path<i64>,
) -> Result<impl IntoResponse, HttpError> {
    let image_path = app_state
        .db_client
        .delete_location(location_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Location not found"))?;

    if let Err(e) = tokio::fs::remove_file(&image_path).await {
        tracing::warn!("could not delete location file {}: {}", image_path, e);
    }

    Ok(Json(serde_json::json!({ "deleted": true })))
}

pub async fn list_locations(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let locations = app_state
        .db_client
        .list_locations()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(locations))
}
