//! # Address Actor
//!
//! One address book per user. Entries are reachable only through the owner's
//! book, so one user can never address another's entries.

pub mod entity;
pub mod error;

pub use entity::{AddressAction, AddressActionResult};
pub use error::*;

use crate::clients::AddressClient;
use crate::model::AddressBook;
use entity_actor::ResourceActor;

/// Creates a new Address actor and its client.
pub fn new(buffer: usize) -> (ResourceActor<AddressBook>, AddressClient) {
    let (actor, generic_client) = ResourceActor::new(buffer);
    (actor, AddressClient::new(generic_client))
}
