use super::error::ApiError;
use super::extract::{ApiJson, ApiPath, Caller};
use super::AppState;
use crate::model::{NewReview, ProductId};
use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRequest {
    pub product_id: ProductId,
    #[serde(default)]
    pub review_message: String,
    pub review_value: u8,
}

/// Reviews are written as the caller; the display name is taken from their
/// account.
pub async fn add_review(
    State(state): State<AppState>,
    caller: Caller,
    ApiJson(body): ApiJson<ReviewRequest>,
) -> Result<Json<Value>, ApiError> {
    let author = state.users.fetch_user(caller.0.user_id).await?;
    let review = state
        .reviews
        .add_review(
            body.product_id,
            NewReview {
                user_id: author.id,
                user_name: author.user_name,
                review_message: body.review_message,
                review_value: body.review_value,
            },
        )
        .await?;
    let rating = state.reviews.rating_summary(body.product_id).await?;
    Ok(Json(json!({"success": true, "review": review, "rating": rating})))
}

pub async fn list_reviews(
    State(state): State<AppState>,
    ApiPath(product_id): ApiPath<ProductId>,
) -> Result<Json<Value>, ApiError> {
    let reviews = state.reviews.reviews(product_id).await?;
    let rating = state.reviews.rating_summary(product_id).await?;
    Ok(Json(json!({"success": true, "reviews": reviews, "rating": rating})))
}
