//! # User Client
//!
//! Registration, lookup, and principal resolution for the HTTP layer.
use crate::model::{Principal, User, UserCreate, UserId, UserUpdate};
use crate::user_actor::UserError;
use entity_actor::{impl_resource_client, ActorClient, Filter, ResourceClient};
use tracing::{debug, info, instrument};

#[derive(Clone)]
pub struct UserClient {
    inner: ResourceClient<User>,
}

impl_resource_client!(UserClient, User, UserError, user);

impl UserClient {
    /// Creates an account. Emails are unique, compared case-insensitively.
    ///
    /// The uniqueness check and the insert are two requests, so two
    /// registrations racing on one address can both pass the check.
    #[instrument(skip(self, params), fields(email = %params.email))]
    pub async fn register(&self, params: UserCreate) -> Result<User, UserError> {
        let email = params.email.trim().to_ascii_lowercase();
        let wanted = email.clone();
        let taken = self
            .list(Filter::new(move |u: &User| u.email == wanted))
            .await?;
        if !taken.is_empty() {
            return Err(UserError::EmailTaken(email));
        }

        debug!("Sending request");
        let id = self.inner.create(params).await?;
        let user = self.fetch_user(id).await?;
        info!(user_id = %user.id, role = ?user.role, "User registered");
        Ok(user)
    }

    #[instrument(skip(self))]
    pub async fn list_users(&self) -> Result<Vec<User>, UserError> {
        self.list(Filter::all()).await
    }

    #[instrument(skip(self))]
    pub async fn update_user(&self, id: UserId, update: UserUpdate) -> Result<User, UserError> {
        debug!("Sending request");
        Ok(self.inner.update(id, update).await?)
    }

    /// The caller behind a user id, with the role as currently stored.
    #[instrument(skip(self))]
    pub async fn resolve_principal(&self, id: UserId) -> Result<Principal, UserError> {
        Ok(self.fetch_user(id).await?.principal())
    }

    /// Finds an account by email.
    #[instrument(skip(self))]
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        let wanted = email.trim().to_ascii_lowercase();
        let mut found = self
            .list(Filter::new(move |u: &User| u.email == wanted))
            .await?;
        Ok(found.pop())
    }
}
