use super::error::AddressError;
use crate::model::{Address, AddressBook, AddressFields, AddressId, UserId};
use async_trait::async_trait;
use entity_actor::ActorEntity;

#[derive(Debug, Clone)]
pub enum AddressAction {
    Add(AddressFields),
    Edit { id: AddressId, fields: AddressFields },
    Remove(AddressId),
}

#[derive(Debug, Clone)]
pub enum AddressActionResult {
    Saved(Address),
    Removed(AddressId),
}

fn complete(fields: AddressFields) -> Result<AddressFields, AddressError> {
    let missing = fields.missing_fields();
    if missing.is_empty() {
        Ok(fields)
    } else {
        Err(AddressError::Incomplete(missing))
    }
}

#[async_trait]
impl ActorEntity for AddressBook {
    type Id = UserId;
    type Create = ();
    type Update = ();
    type Action = AddressAction;
    type ActionResult = AddressActionResult;
    type Context = ();
    type Error = AddressError;

    fn from_create_params(id: UserId, _params: ()) -> Result<Self, Self::Error> {
        Ok(AddressBook::empty(id))
    }

    async fn on_update(&mut self, _update: (), _ctx: &()) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: AddressAction,
        _ctx: &(),
    ) -> Result<AddressActionResult, Self::Error> {
        match action {
            AddressAction::Add(fields) => {
                Ok(AddressActionResult::Saved(self.insert(complete(fields)?)))
            }
            AddressAction::Edit { id, fields } => self
                .replace(id, complete(fields)?)
                .map(AddressActionResult::Saved)
                .ok_or(AddressError::EntryNotFound(id)),
            AddressAction::Remove(id) => {
                if self.remove(id) {
                    Ok(AddressActionResult::Removed(id))
                } else {
                    Err(AddressError::EntryNotFound(id))
                }
            }
        }
    }
}
