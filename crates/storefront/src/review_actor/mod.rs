//! # Review Actor
//!
//! One review book per product, keyed by
//! [`ProductId`](crate::model::ProductId). Duplicate checks and the rating
//! average see the whole book at once, so concurrent reviews cannot slip a
//! duplicate past the policy.

pub mod entity;
pub mod error;

pub use entity::ReviewAction;
pub use error::*;

use crate::clients::{ProductClient, ReviewClient};
use crate::config::ReviewPolicy;
use crate::model::ReviewBook;
use entity_actor::ResourceActor;

#[derive(Clone)]
pub struct ReviewContext {
    pub products: ProductClient,
    pub policy: ReviewPolicy,
}

/// Creates a new Review actor and its client.
pub fn new(buffer: usize) -> (ResourceActor<ReviewBook>, ReviewClient) {
    let (actor, generic_client) = ResourceActor::new(buffer);
    (actor, ReviewClient::new(generic_client))
}
