//! # HTTP Surface
//!
//! An axum router over the actor clients. Handlers parse the request,
//! resolve the caller, call one or two clients, and wrap the result in the
//! `{success, ...}` envelope. No domain rule lives here apart from "may this
//! caller touch this owner's data".
//!
//! The caller is identified by the `x-user-id` header (see
//! [`extract::Caller`]). Routes under `/api/admin` require the admin role.

mod catalog;
pub mod error;
pub mod extract;
mod orders;
mod reviews;
mod shopping;
mod users;

pub use error::ApiError;
pub use extract::{Caller, USER_HEADER};

use crate::clients::{
    AddressClient, CartClient, FeatureClient, OrderClient, ProductClient, ReviewClient,
    UserClient, WishlistClient,
};
use crate::lifecycle::StorefrontSystem;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::{json, Value};

/// Clients shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub users: UserClient,
    pub products: ProductClient,
    pub carts: CartClient,
    pub wishlists: WishlistClient,
    pub addresses: AddressClient,
    pub orders: OrderClient,
    pub reviews: ReviewClient,
    pub features: FeatureClient,
}

impl AppState {
    pub fn from_system(system: &StorefrontSystem) -> Self {
        Self {
            users: system.users.clone(),
            products: system.products.clone(),
            carts: system.carts.clone(),
            wishlists: system.wishlists.clone(),
            addresses: system.addresses.clone(),
            orders: system.orders.clone(),
            reviews: system.reviews.clone(),
            features: system.features.clone(),
        }
    }
}

async fn healthz() -> Json<Value> {
    Json(json!({"success": true, "status": "ok"}))
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        // users
        .route("/api/users", post(users::register))
        .route("/api/admin/users", get(users::list_users))
        // catalog
        .route("/api/products", get(catalog::list_products))
        .route("/api/products/{id}", get(catalog::product_details))
        .route("/api/admin/products", post(catalog::create_product))
        .route(
            "/api/admin/products/{id}",
            put(catalog::update_product).delete(catalog::delete_product),
        )
        .route("/api/features", get(catalog::list_features))
        .route("/api/admin/features", post(catalog::add_feature))
        .route(
            "/api/admin/features/{id}",
            axum::routing::delete(catalog::delete_feature),
        )
        // cart, wishlist, addresses
        .route(
            "/api/cart",
            post(shopping::add_to_cart).put(shopping::update_cart),
        )
        .route("/api/cart/{user_id}", get(shopping::get_cart))
        .route(
            "/api/cart/{user_id}/{product_id}",
            axum::routing::delete(shopping::remove_from_cart),
        )
        .route("/api/wishlist", post(shopping::add_to_wishlist))
        .route("/api/wishlist/{user_id}", get(shopping::get_wishlist))
        .route(
            "/api/wishlist/{user_id}/{product_id}",
            axum::routing::delete(shopping::remove_from_wishlist),
        )
        .route("/api/addresses", post(shopping::add_address))
        .route("/api/addresses/{user_id}", get(shopping::list_addresses))
        .route(
            "/api/addresses/{user_id}/{address_id}",
            put(shopping::edit_address).delete(shopping::remove_address),
        )
        // orders
        .route(
            "/api/orders",
            post(orders::create_order).get(orders::list_orders),
        )
        .route("/api/orders/{id}", get(orders::order_details))
        .route("/api/orders/{id}/status", put(orders::update_status))
        .route("/api/orders/{id}/payment", post(orders::confirm_payment))
        .route("/api/admin/orders", get(orders::list_all_orders))
        // reviews
        .route("/api/reviews", post(reviews::add_review))
        .route("/api/reviews/{product_id}", get(reviews::list_reviews))
        .with_state(state)
}
