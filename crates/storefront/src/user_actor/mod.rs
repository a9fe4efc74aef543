//! # User Actor
//!
//! Accounts and roles. Other actors never call it; the HTTP layer resolves a
//! request's [`Principal`](crate::model::Principal) through it.
//!
//! - [`entity`]: [`ActorEntity`](entity_actor::ActorEntity) impl for [`User`]
//! - [`error`]: [`UserError`]

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::UserClient;
use crate::model::User;
use entity_actor::ResourceActor;

/// Creates a new User actor and its client.
pub fn new(buffer: usize) -> (ResourceActor<User>, UserClient) {
    let (actor, generic_client) = ResourceActor::new(buffer);
    (actor, UserClient::new(generic_client))
}
