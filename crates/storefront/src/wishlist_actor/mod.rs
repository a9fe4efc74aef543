//! # Wishlist Actor
//!
//! Saved products per user, keyed by [`UserId`](crate::model::UserId).

pub mod entity;
pub mod error;

pub use entity::WishlistAction;
pub use error::*;

use crate::clients::{ProductClient, WishlistClient};
use crate::model::Wishlist;
use entity_actor::ResourceActor;

#[derive(Clone)]
pub struct WishlistContext {
    pub products: ProductClient,
}

/// Creates a new Wishlist actor and its client.
pub fn new(buffer: usize) -> (ResourceActor<Wishlist>, WishlistClient) {
    let (actor, generic_client) = ResourceActor::new(buffer);
    (actor, WishlistClient::new(generic_client))
}
