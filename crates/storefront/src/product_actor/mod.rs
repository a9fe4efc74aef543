//! # Product Actor
//!
//! The catalog, and the only writer of `total_stock`. Admin edits and order
//! reservations are both requests to this one actor, so they are serialized.
//!
//! - [`entity`]: [`ActorEntity`](entity_actor::ActorEntity) impl for [`Product`]
//! - [`error`]: [`ProductError`]
//! - [`actions`]: stock and pricing actions
//!
//! Multi-product reservations go through a single
//! [`Transaction`](entity_actor::ResourceRequest::Transaction): every line is
//! checked and decremented, or nothing is.
//!
//! ```rust,ignore
//! let items = products.reserve_all(&lines).await?;   // frozen LineItems
//! products.release_all(&items).await?;               // give the units back
//! ```
//!
//! Deleting is two-phase: `Retire` makes `Reserve` refuse the product, the
//! caller checks for orders, then either deletes or sends `Reinstate`.

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::ProductClient;
use crate::model::Product;
use entity_actor::ResourceActor;

/// Creates a new Product actor and its client.
pub fn new(buffer: usize) -> (ResourceActor<Product>, ProductClient) {
    let (actor, generic_client) = ResourceActor::new(buffer);
    (actor, ProductClient::new(generic_client))
}
