//! Extractors whose rejections use the error envelope, and the principal
//! extractor.
use super::error::ApiError;
use super::AppState;
use crate::model::{Principal, UserId};
use crate::user_actor::UserError;
use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;

/// Header carrying the caller's user id.
pub const USER_HEADER: &str = "x-user-id";

/// JSON body; a malformed body is a 400 with the envelope.
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;
        Ok(ApiJson(value))
    }
}

pub struct ApiPath<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;
        Ok(ApiPath(value))
    }
}

pub struct ApiQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;
        Ok(ApiQuery(value))
    }
}

/// Accepts `7` or `user_7`.
fn parse_user_id(raw: &str) -> Option<UserId> {
    let raw = raw.trim();
    let digits = raw.strip_prefix("user_").unwrap_or(raw);
    digits.parse::<u32>().ok().map(UserId)
}

/// The authenticated caller, resolved from [`USER_HEADER`] against the user
/// actor so the role is always the stored one.
pub struct Caller(pub Principal);

impl Caller {
    pub fn require_admin(&self) -> Result<(), ApiError> {
        if self.0.is_admin() {
            Ok(())
        } else {
            Err(ApiError::forbidden("Only administrators can do that"))
        }
    }

    pub fn require_owner(&self, owner: UserId) -> Result<(), ApiError> {
        if self.0.may_act_for(owner) {
            Ok(())
        } else {
            Err(ApiError::forbidden("You can only manage your own data"))
        }
    }
}

impl FromRequestParts<AppState> for Caller {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(USER_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(parse_user_id)
            .ok_or_else(ApiError::unauthenticated)?;

        match state.users.resolve_principal(user_id).await {
            Ok(principal) => Ok(Caller(principal)),
            Err(UserError::NotFound(_)) => Err(ApiError::unauthenticated()),
            Err(other) => Err(other.into()),
        }
    }
}
