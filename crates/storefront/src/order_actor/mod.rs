//! # Order Actor
//!
//! Turns a checkout into an immutable order and then drives its status.
//!
//! ## Checkout
//!
//! All of checkout happens in `Order::on_create`, inside the order actor:
//!
//! 1. Validate the address copy (`from_create_params`).
//! 2. Read the lines: the user's cart, or the buy-now list.
//! 3. Reserve every line in one product transaction. The products come back
//!    frozen as line items priced at the effective price of that instant.
//! 4. Sum the total once from those frozen lines.
//! 5. Take the ordered quantities out of the cart (cart checkouts only).
//!
//! A failure after step 3 releases the reservation before the error is
//! returned, and a failed `on_create` stores nothing. Either the order exists
//! with stock decremented and cart emptied, or none of it happened.
//!
//! ## Status
//!
//! See [`StatusFlow`](crate::model::StatusFlow). Admins move orders forward one
//! stage at a time or abandon them; owners may only cancel, and only before
//! shipping.

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::{CartClient, OrderClient, ProductClient};
use crate::config::OrderPolicy;
use crate::model::Order;
use entity_actor::ResourceActor;

/// Dependencies of the Order actor.
#[derive(Clone)]
pub struct OrderContext {
    pub products: ProductClient,
    pub carts: CartClient,
    pub policy: OrderPolicy,
}

/// Creates a new Order actor and its client.
pub fn new(buffer: usize) -> (ResourceActor<Order>, OrderClient) {
    let (actor, generic_client) = ResourceActor::new(buffer);
    (actor, OrderClient::new(generic_client))
}
