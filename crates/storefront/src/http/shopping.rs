//! Cart, wishlist and address book. Every route names the owner, and the
//! caller must be that owner or an admin.
use super::error::ApiError;
use super::extract::{ApiJson, ApiPath, Caller};
use super::AppState;
use crate::model::{AddressFields, AddressId, ProductId, UserId};
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCart {
    pub user_id: UserId,
    pub product_id: ProductId,
    #[serde(default = "one")]
    pub quantity: u32,
}

fn one() -> u32 {
    1
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCartLine {
    pub user_id: UserId,
    pub product_id: ProductId,
    pub quantity: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistEntry {
    pub user_id: UserId,
    pub product_id: ProductId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAddress {
    pub user_id: UserId,
    #[serde(flatten)]
    pub fields: AddressFields,
}

async fn cart_response(state: &AppState, user_id: UserId) -> Result<Json<Value>, ApiError> {
    let cart = state.carts.summary(user_id, &state.products).await?;
    Ok(Json(json!({"success": true, "cart": cart})))
}

pub async fn add_to_cart(
    State(state): State<AppState>,
    caller: Caller,
    ApiJson(body): ApiJson<AddToCart>,
) -> Result<Json<Value>, ApiError> {
    caller.require_owner(body.user_id)?;
    state
        .carts
        .add_to_cart(body.user_id, body.product_id, body.quantity)
        .await?;
    cart_response(&state, body.user_id).await
}

pub async fn update_cart(
    State(state): State<AppState>,
    caller: Caller,
    ApiJson(body): ApiJson<UpdateCartLine>,
) -> Result<Json<Value>, ApiError> {
    caller.require_owner(body.user_id)?;
    state
        .carts
        .update_quantity(body.user_id, body.product_id, body.quantity)
        .await?;
    cart_response(&state, body.user_id).await
}

pub async fn get_cart(
    State(state): State<AppState>,
    caller: Caller,
    ApiPath(user_id): ApiPath<UserId>,
) -> Result<Json<Value>, ApiError> {
    caller.require_owner(user_id)?;
    cart_response(&state, user_id).await
}

pub async fn remove_from_cart(
    State(state): State<AppState>,
    caller: Caller,
    ApiPath((user_id, product_id)): ApiPath<(UserId, ProductId)>,
) -> Result<Json<Value>, ApiError> {
    caller.require_owner(user_id)?;
    state.carts.remove_from_cart(user_id, product_id).await?;
    cart_response(&state, user_id).await
}

pub async fn get_wishlist(
    State(state): State<AppState>,
    caller: Caller,
    ApiPath(user_id): ApiPath<UserId>,
) -> Result<Json<Value>, ApiError> {
    caller.require_owner(user_id)?;
    let wishlist = state.wishlists.wishlist(user_id).await?;
    Ok(Json(json!({"success": true, "wishlist": wishlist})))
}

pub async fn add_to_wishlist(
    State(state): State<AppState>,
    caller: Caller,
    ApiJson(body): ApiJson<WishlistEntry>,
) -> Result<Json<Value>, ApiError> {
    caller.require_owner(body.user_id)?;
    let wishlist = state.wishlists.add(body.user_id, body.product_id).await?;
    Ok(Json(json!({"success": true, "wishlist": wishlist})))
}

pub async fn remove_from_wishlist(
    State(state): State<AppState>,
    caller: Caller,
    ApiPath((user_id, product_id)): ApiPath<(UserId, ProductId)>,
) -> Result<Json<Value>, ApiError> {
    caller.require_owner(user_id)?;
    let wishlist = state.wishlists.remove(user_id, product_id).await?;
    Ok(Json(json!({"success": true, "wishlist": wishlist})))
}

pub async fn list_addresses(
    State(state): State<AppState>,
    caller: Caller,
    ApiPath(user_id): ApiPath<UserId>,
) -> Result<Json<Value>, ApiError> {
    caller.require_owner(user_id)?;
    let addresses = state.addresses.list_addresses(user_id).await?;
    Ok(Json(json!({"success": true, "addresses": addresses})))
}

pub async fn add_address(
    State(state): State<AppState>,
    caller: Caller,
    ApiJson(body): ApiJson<NewAddress>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    caller.require_owner(body.user_id)?;
    let address = state.addresses.add_address(body.user_id, body.fields).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({"success": true, "message": "Address added", "address": address})),
    ))
}

pub async fn edit_address(
    State(state): State<AppState>,
    caller: Caller,
    ApiPath((user_id, address_id)): ApiPath<(UserId, AddressId)>,
    ApiJson(fields): ApiJson<AddressFields>,
) -> Result<Json<Value>, ApiError> {
    caller.require_owner(user_id)?;
    let address = state
        .addresses
        .edit_address(user_id, address_id, fields)
        .await?;
    Ok(Json(json!({"success": true, "message": "Address updated", "address": address})))
}

pub async fn remove_address(
    State(state): State<AppState>,
    caller: Caller,
    ApiPath((user_id, address_id)): ApiPath<(UserId, AddressId)>,
) -> Result<Json<Value>, ApiError> {
    caller.require_owner(user_id)?;
    state.addresses.remove_address(user_id, address_id).await?;
    Ok(Json(json!({"success": true, "message": "Address deleted"})))
}
