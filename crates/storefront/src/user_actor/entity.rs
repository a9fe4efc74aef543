use super::error::UserError;
use crate::model::timestamp;
use crate::model::{User, UserCreate, UserId, UserUpdate};
use async_trait::async_trait;
use entity_actor::ActorEntity;

fn validate_name(name: &str) -> Result<String, UserError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(UserError::Validation("User name is required".into()));
    }
    Ok(name.to_string())
}

fn validate_email(email: &str) -> Result<String, UserError> {
    let email = email.trim().to_ascii_lowercase();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(email),
        _ => Err(UserError::Validation(format!(
            "\"{email}\" is not a valid email address"
        ))),
    }
}

#[async_trait]
impl ActorEntity for User {
    type Id = UserId;
    type Create = UserCreate;
    type Update = UserUpdate;
    type Action = ();
    type ActionResult = ();
    type Context = ();
    type Error = UserError;

    fn from_create_params(id: UserId, params: UserCreate) -> Result<Self, Self::Error> {
        Ok(Self {
            id,
            user_name: validate_name(&params.user_name)?,
            email: validate_email(&params.email)?,
            role: params.role,
            created_at: timestamp::now(),
        })
    }

    async fn on_update(&mut self, update: UserUpdate, _ctx: &()) -> Result<(), Self::Error> {
        if let Some(name) = update.user_name {
            self.user_name = validate_name(&name)?;
        }
        if let Some(role) = update.role {
            self.role = role;
        }
        Ok(())
    }

    async fn handle_action(&mut self, _action: (), _ctx: &()) -> Result<(), Self::Error> {
        Ok(())
    }
}
