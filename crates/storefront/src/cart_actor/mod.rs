//! # Cart Actor
//!
//! One cart per user, keyed by the owner's [`UserId`](crate::model::UserId)
//! and created on first use through
//! [`Ensure`](entity_actor::ResourceRequest::Ensure). Adding checks only that
//! the product exists; stock is enforced at checkout.

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::{CartClient, ProductClient};
use crate::model::Cart;
use entity_actor::ResourceActor;

/// Dependencies of the Cart actor.
#[derive(Clone)]
pub struct CartContext {
    pub products: ProductClient,
}

/// Creates a new Cart actor and its client.
pub fn new(buffer: usize) -> (ResourceActor<Cart>, CartClient) {
    let (actor, generic_client) = ResourceActor::new(buffer);
    (actor, CartClient::new(generic_client))
}
