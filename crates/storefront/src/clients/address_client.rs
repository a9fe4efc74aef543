//! # Address Client
//!
//! Every call names the owner; entries are only reachable through their
//! owner's book.
use crate::address_actor::{AddressAction, AddressActionResult, AddressError};
use crate::model::{Address, AddressBook, AddressFields, AddressId, UserId};
use entity_actor::{impl_resource_client, ActorClient, ResourceClient};
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct AddressClient {
    inner: ResourceClient<AddressBook>,
}

impl_resource_client!(AddressClient, AddressBook, AddressError, address_book);

fn unexpected(result: AddressActionResult) -> AddressError {
    AddressError::ActorCommunication(format!("unexpected address reply: {result:?}"))
}

impl AddressClient {
    async fn apply(
        &self,
        user_id: UserId,
        action: AddressAction,
    ) -> Result<AddressActionResult, AddressError> {
        debug!("Sending request");
        Ok(self.inner.ensure_and_perform(user_id, (), action).await?)
    }

    #[instrument(skip(self, fields))]
    pub async fn add_address(
        &self,
        user_id: UserId,
        fields: AddressFields,
    ) -> Result<Address, AddressError> {
        match self.apply(user_id, AddressAction::Add(fields)).await? {
            AddressActionResult::Saved(address) => Ok(address),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self, fields))]
    pub async fn edit_address(
        &self,
        user_id: UserId,
        id: AddressId,
        fields: AddressFields,
    ) -> Result<Address, AddressError> {
        match self.apply(user_id, AddressAction::Edit { id, fields }).await? {
            AddressActionResult::Saved(address) => Ok(address),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn remove_address(
        &self,
        user_id: UserId,
        id: AddressId,
    ) -> Result<AddressId, AddressError> {
        match self.apply(user_id, AddressAction::Remove(id)).await? {
            AddressActionResult::Removed(id) => Ok(id),
            other => Err(unexpected(other)),
        }
    }

    /// The user's saved addresses; empty if they never saved one.
    #[instrument(skip(self))]
    pub async fn list_addresses(&self, user_id: UserId) -> Result<Vec<Address>, AddressError> {
        Ok(self
            .get(user_id)
            .await?
            .map(|book| book.entries)
            .unwrap_or_default())
    }

    #[instrument(skip(self))]
    pub async fn find_address(&self, user_id: UserId, id: AddressId) -> Result<Address, AddressError> {
        self.get(user_id)
            .await?
            .and_then(|book| book.find(id).cloned())
            .ok_or(AddressError::EntryNotFound(id))
    }
}
