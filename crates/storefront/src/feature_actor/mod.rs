//! # Feature Actor
//!
//! Promotional banner images managed by admins.

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::FeatureClient;
use crate::model::FeatureImage;
use entity_actor::ResourceActor;

/// Creates a new Feature actor and its client.
pub fn new(buffer: usize) -> (ResourceActor<FeatureImage>, FeatureClient) {
    let (actor, generic_client) = ResourceActor::new(buffer);
    (actor, FeatureClient::new(generic_client))
}
