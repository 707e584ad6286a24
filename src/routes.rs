// routes.rs
use std::sync::Arc;

use axum::{middleware, routing::get, Extension, Json, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::{
    handler::{
        cart::cart_handler, coupons::coupons_handler, locations::locations_handler,
        orders::orders_handler, products::products_handler, users::users_handler,
        wallets::wallets_handler,
    },
    middleware::auth,
    AppState,
};

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "message": "Server is running"
    }))
}

pub fn create_router(app_state: Arc<AppState>) -> Router {
    // Every /api route is service-to-service: the bot transport and admin
    // tooling authenticate with the shared token.
    let api_route = Router::new()
        .nest("/users", users_handler())
        .nest("/products", products_handler())
        .nest("/cart", cart_handler())
        .nest("/orders", orders_handler())
        .nest("/wallets", wallets_handler())
        .nest("/locations", locations_handler())
        .nest("/coupons", coupons_handler())
        .layer(middleware::from_fn(auth))
        .layer(TraceLayer::new_for_http())
        .layer(Extension(app_state));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_route)
}
