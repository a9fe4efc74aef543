//! Checkout and order management.
use super::error::ApiError;
use super::extract::{ApiJson, ApiPath, ApiQuery, Caller};
use super::AppState;
use crate::model::{
    AddressFields, AddressId, AddressInfo, CheckoutSource, Money, OrderCreate, OrderId,
    OrderStatus, OrderView, PaymentMethod, UserId,
};
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrder {
    pub user_id: UserId,
    /// Defaults to the persisted cart.
    #[serde(default)]
    pub source: Option<CheckoutSource>,
    /// A saved address of the user. Takes precedence over `address_info`.
    #[serde(default)]
    pub address_id: Option<AddressId>,
    #[serde(default)]
    pub address_info: Option<AddressFields>,
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub expected_total: Option<Money>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrdersQuery {
    pub user_id: Option<UserId>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusChange {
    pub order_status: OrderStatus,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentConfirmation {
    pub payment_id: String,
}

fn views(orders: Vec<crate::model::Order>) -> Vec<OrderView> {
    orders.into_iter().map(OrderView::from).collect()
}

pub async fn create_order(
    State(state): State<AppState>,
    caller: Caller,
    ApiJson(body): ApiJson<PlaceOrder>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    caller.require_owner(body.user_id)?;

    let address = match (body.address_id, body.address_info) {
        (Some(id), _) => AddressInfo::from(&state.addresses.find_address(body.user_id, id).await?),
        (None, Some(fields)) => AddressInfo {
            address_id: None,
            fields,
        },
        (None, None) => return Err(ApiError::bad_request("A shipping address is required")),
    };

    let order = state
        .orders
        .create_order(OrderCreate {
            user_id: body.user_id,
            source: body.source.unwrap_or(CheckoutSource::Cart),
            address,
            payment_method: body.payment_method,
            expected_total: body.expected_total,
        })
        .await?;

    let message = match order.order_status {
        OrderStatus::Pending => "Order placed, awaiting payment",
        _ => "Order confirmed successfully",
    };
    info!(order_id = %order.id, "Checkout handled");
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "orderId": order.id,
            "message": message,
            "order": OrderView::from(order),
        })),
    ))
}

/// The caller's orders, or another user's for admins. An empty list is a
/// success.
pub async fn list_orders(
    State(state): State<AppState>,
    caller: Caller,
    ApiQuery(query): ApiQuery<OrdersQuery>,
) -> Result<Json<Value>, ApiError> {
    let user_id = query.user_id.unwrap_or(caller.0.user_id);
    let orders = state.orders.list_for_user(user_id, caller.0).await?;
    Ok(Json(json!({"success": true, "orders": views(orders)})))
}

pub async fn order_details(
    State(state): State<AppState>,
    caller: Caller,
    ApiPath(id): ApiPath<OrderId>,
) -> Result<Json<Value>, ApiError> {
    let order = state.orders.order_details(id, caller.0).await?;
    Ok(Json(json!({"success": true, "order": OrderView::from(order)})))
}

pub async fn update_status(
    State(state): State<AppState>,
    caller: Caller,
    ApiPath(id): ApiPath<OrderId>,
    ApiJson(body): ApiJson<StatusChange>,
) -> Result<Json<Value>, ApiError> {
    let order = state
        .orders
        .update_status(id, body.order_status, caller.0)
        .await?;
    Ok(Json(json!({
        "success": true,
        "message": "Order status updated successfully!",
        "order": OrderView::from(order),
    })))
}

pub async fn confirm_payment(
    State(state): State<AppState>,
    caller: Caller,
    ApiPath(id): ApiPath<OrderId>,
    ApiJson(body): ApiJson<PaymentConfirmation>,
) -> Result<Json<Value>, ApiError> {
    let order = state
        .orders
        .confirm_payment(id, body.payment_id, caller.0)
        .await?;
    Ok(Json(json!({
        "success": true,
        "message": "Payment confirmed",
        "order": OrderView::from(order),
    })))
}

pub async fn list_all_orders(
    State(state): State<AppState>,
    caller: Caller,
) -> Result<Json<Value>, ApiError> {
    let orders = state.orders.list_all(caller.0).await?;
    Ok(Json(json!({"success": true, "orders": views(orders)})))
}
