//! REST handlers: thin glue over the store and the intake adapter

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::domain::{Order, Pincode, Product, Seller};
use crate::error::MarketError;
use crate::intake::NewOrder;

use super::AppState;

#[derive(Debug, Deserialize)]
pub struct PincodeQuery {
    pub pincode: String,
}

pub async fn list_sellers(State(state): State<AppState>) -> Result<Json<Vec<Seller>>, MarketError> {
    Ok(Json(state.store.list_sellers().await?))
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterSeller {
    #[validate(custom = "crate::intake::not_blank")]
    pub name: String,
    #[validate(custom = "crate::intake::not_blank")]
    pub pincode: String,
    #[validate(custom = "crate::intake::not_blank")]
    pub category: String,
}

pub async fn register_seller(
    State(state): State<AppState>,
    Json(req): Json<RegisterSeller>,
) -> Result<(StatusCode, Json<Seller>), MarketError> {
    req.validate()?;
    let pincode = Pincode::parse(&req.pincode)?;
    let seller = Seller::register(req.name, pincode, req.category);
    state.store.save_seller(&seller).await?;
    tracing::info!(seller = %seller.id, pincode = %seller.pincode, "seller registered");
    Ok((StatusCode::CREATED, Json(seller)))
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddProduct {
    #[validate(custom = "crate::intake::not_blank")]
    pub name: String,
    #[validate(range(min = 0))]
    pub price: i64,
    pub seller_id: Uuid,
}

pub async fn add_product(
    State(state): State<AppState>,
    Json(req): Json<AddProduct>,
) -> Result<(StatusCode, Json<Product>), MarketError> {
    req.validate()?;
    let seller = state
        .store
        .find_seller(req.seller_id)
        .await?
        .ok_or(MarketError::SellerNotFound(req.seller_id))?;
    let product = Product::list(req.name, req.price, seller.id);
    state.store.save_product(&product).await?;
    tracing::info!(product = %product.id, seller = %seller.id, "product listed");
    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn products_by_pincode(
    State(state): State<AppState>,
    Query(query): Query<PincodeQuery>,
) -> Result<Json<Vec<Product>>, MarketError> {
    let pincode = Pincode::parse(&query.pincode)?;
    let sellers = state.store.find_sellers_by_pincode(&pincode).await?;
    if sellers.is_empty() {
        return Ok(Json(Vec::new()));
    }
    let seller_ids: Vec<Uuid> = sellers.iter().map(|s| s.id).collect();
    Ok(Json(state.store.find_products_by_seller_ids(&seller_ids).await?))
}

pub async fn orders_by_pincode(
    State(state): State<AppState>,
    Query(query): Query<PincodeQuery>,
) -> Result<Json<Vec<Order>>, MarketError> {
    let pincode = Pincode::parse(&query.pincode)?;
    Ok(Json(state.store.find_orders_by_pincode(&pincode).await?))
}

pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Order>, MarketError> {
    state
        .store
        .find_order(id)
        .await?
        .map(Json)
        .ok_or(MarketError::OrderNotFound(id))
}

pub async fn place_order(
    State(state): State<AppState>,
    Json(req): Json<NewOrder>,
) -> Result<(StatusCode, Json<Order>), MarketError> {
    let order = state.intake.place_order(req).await?;
    Ok((StatusCode::CREATED, Json(order)))
}
