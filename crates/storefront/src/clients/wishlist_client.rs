use crate::model::{ProductId, UserId, Wishlist};
use crate::wishlist_actor::{WishlistAction, WishlistError};
use entity_actor::{impl_resource_client, ActorClient, ResourceClient};
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct WishlistClient {
    inner: ResourceClient<Wishlist>,
}

impl_resource_client!(WishlistClient, Wishlist, WishlistError, wishlist);

impl WishlistClient {
    async fn apply(&self, user_id: UserId, action: WishlistAction) -> Result<Wishlist, WishlistError> {
        debug!("Sending request");
        Ok(self.inner.ensure_and_perform(user_id, (), action).await?)
    }

    /// Saves a product. Saving it again changes nothing.
    #[instrument(skip(self))]
    pub async fn add(&self, user_id: UserId, product_id: ProductId) -> Result<Wishlist, WishlistError> {
        self.apply(user_id, WishlistAction::Add(product_id)).await
    }

    #[instrument(skip(self))]
    pub async fn remove(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> Result<Wishlist, WishlistError> {
        self.apply(user_id, WishlistAction::Remove(product_id)).await
    }

    #[instrument(skip(self))]
    pub async fn clear(&self, user_id: UserId) -> Result<Wishlist, WishlistError> {
        self.apply(user_id, WishlistAction::Clear).await
    }

    /// The user's wishlist; empty if they never saved anything.
    #[instrument(skip(self))]
    pub async fn wishlist(&self, user_id: UserId) -> Result<Wishlist, WishlistError> {
        Ok(self
            .get(user_id)
            .await?
            .unwrap_or_else(|| Wishlist::empty(user_id)))
    }

    #[instrument(skip(self))]
    pub async fn contains(&self, user_id: UserId, product_id: ProductId) -> Result<bool, WishlistError> {
        Ok(self.wishlist(user_id).await?.contains(product_id))
    }
}
