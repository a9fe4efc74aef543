//! Products and feature banners.
use super::error::ApiError;
use super::extract::{ApiJson, ApiPath, ApiQuery, Caller};
use super::AppState;
use crate::model::{FeatureCreate, FeatureId, ProductCreate, ProductId, ProductQuery, ProductUpdate};
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use entity_actor::ActorClient;
use serde_json::{json, Value};
use tracing::info;

pub async fn list_products(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ProductQuery>,
) -> Result<Json<Value>, ApiError> {
    let products = state.products.list_products(query).await?;
    Ok(Json(json!({"success": true, "products": products})))
}

/// A product with its rating summary.
pub async fn product_details(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<ProductId>,
) -> Result<Json<Value>, ApiError> {
    let product = state.products.fetch_product(id).await?;
    let rating = state.reviews.rating_summary(id).await?;
    Ok(Json(json!({"success": true, "product": product, "rating": rating})))
}

pub async fn create_product(
    State(state): State<AppState>,
    caller: Caller,
    ApiJson(params): ApiJson<ProductCreate>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    caller.require_admin()?;
    let product = state.products.create_product(params).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({"success": true, "message": "Product added", "product": product})),
    ))
}

pub async fn update_product(
    State(state): State<AppState>,
    caller: Caller,
    ApiPath(id): ApiPath<ProductId>,
    ApiJson(update): ApiJson<ProductUpdate>,
) -> Result<Json<Value>, ApiError> {
    caller.require_admin()?;
    let product = state.products.update_product(id, update).await?;
    info!(product_id = %id, "Product updated");
    Ok(Json(json!({"success": true, "message": "Product updated", "product": product})))
}

pub async fn delete_product(
    State(state): State<AppState>,
    caller: Caller,
    ApiPath(id): ApiPath<ProductId>,
) -> Result<Json<Value>, ApiError> {
    caller.require_admin()?;
    state.products.delete_product(id, &state.orders).await?;
    Ok(Json(json!({"success": true, "message": "Product deleted"})))
}

pub async fn list_features(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let features = state.features.list_features().await?;
    Ok(Json(json!({"success": true, "features": features})))
}

pub async fn add_feature(
    State(state): State<AppState>,
    caller: Caller,
    ApiJson(params): ApiJson<FeatureCreate>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    caller.require_admin()?;
    let feature = state.features.add_feature(params).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({"success": true, "message": "Feature image added", "feature": feature})),
    ))
}

pub async fn delete_feature(
    State(state): State<AppState>,
    caller: Caller,
    ApiPath(id): ApiPath<FeatureId>,
) -> Result<Json<Value>, ApiError> {
    caller.require_admin()?;
    state.features.delete(id).await?;
    Ok(Json(json!({"success": true, "message": "Feature image deleted"})))
}
