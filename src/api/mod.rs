//! HTTP surface

mod handlers;
mod live;

use std::sync::Arc;

use axum::routing::get;
use axum::{Json, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::feed::OrderFeed;
use crate::intake::OrderIntake;
use crate::store::MarketStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn MarketStore>,
    pub feed: OrderFeed,
    pub intake: Arc<OrderIntake>,
}

impl AppState {
    pub fn new(store: Arc<dyn MarketStore>, feed: OrderFeed) -> Self {
        let intake = Arc::new(OrderIntake::new(Arc::clone(&store), feed.clone()));
        Self { store, feed, intake }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/health",
            get(|| async {
                Json(serde_json::json!({"status": "healthy", "service": "hyperlocal-market"}))
            }),
        )
        .route("/api/v1/sellers", get(handlers::list_sellers).post(handlers::register_seller))
        .route("/api/v1/products", get(handlers::products_by_pincode).post(handlers::add_product))
        .route("/api/v1/orders", get(handlers::orders_by_pincode).post(handlers::place_order))
        .route("/api/v1/orders/:id", get(handlers::get_order))
        .route("/api/v1/orders/feed/:pincode", get(live::order_feed))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
