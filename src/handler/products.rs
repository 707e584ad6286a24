// handler/products.rs
use std::sync::Arc;

use axum::{
    extract::Path,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};
use validator::Validate;

use crate::{
    db::productdb::ProductExt,
    dtos::productdtos::*,
    error::HttpError,
    AppState,
};

pub fn products_handler() -> Router {
    Router::new()
        .route("/", get(get_products).post(create_product))
        .route(
            "/:product_id",
            get(get_product).patch(update_product).delete(delete_product),
        )
}

pub async fn get_products(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let products = app_state
        .db_client
        .get_products()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(products))
}

pub async fn get_product(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(product_id): Path<i64>,
) -> Result<impl IntoResponse, HttpError> {
    let product = app_state
        .db_client
        .get_product(product_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Product not found"))?;

    Ok(Json(product))
}

pub async fn create_product(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<CreateProductDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let product = app_state
        .db_client
        .add_product(
            &body.name,
            body.description.as_deref(),
            body.price,
            body.image_path.as_deref(),
            body.stock,
        )
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn update_product(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(product_id): Path<i64>,
    Json(body): Json<UpdateProductDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let product = app_state
        .db_client
        .update_product(product_id, &body)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Product not found"))?;

    Ok(Json(product))
}

pub async fn delete_product(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(product_id): Path<i64>,
) -> Result<impl IntoResponse, HttpError> {
    let deleted = app_state
        .db_client
        .delete_product(product_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if !deleted {
        return Err(HttpError::not_found("Product not found"));
    }

    Ok(Json(serde_json::json!({ "deleted": true })))
}
