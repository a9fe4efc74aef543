use super::error::ApiError;
use super::extract::{ApiJson, Caller};
use super::AppState;
use crate::model::{Role, UserCreate};
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};
use tracing::info;

/// Self-registration always creates a customer; admins come from
/// configuration.
pub async fn register(
    State(state): State<AppState>,
    ApiJson(mut params): ApiJson<UserCreate>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    params.role = Role::Customer;
    let user = state.users.register(params).await?;
    info!(user_id = %user.id, "Registration handled");
    Ok((
        StatusCode::CREATED,
        Json(json!({"success": true, "message": "Registration successful", "user": user})),
    ))
}

pub async fn list_users(
    State(state): State<AppState>,
    caller: Caller,
) -> Result<Json<Value>, ApiError> {
    caller.require_admin()?;
    let users = state.users.list_users().await?;
    Ok(Json(json!({"success": true, "users": users})))
}
