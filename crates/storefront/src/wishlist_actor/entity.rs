use super::error::WishlistError;
use super::WishlistContext;
use crate::model::{ProductId, UserId, Wishlist};
use crate::product_actor::ProductError;
use async_trait::async_trait;
use entity_actor::ActorEntity;

#[derive(Debug, Clone)]
pub enum WishlistAction {
    Add(ProductId),
    Remove(ProductId),
    Clear,
}

#[async_trait]
impl ActorEntity for Wishlist {
    type Id = UserId;
    type Create = ();
    type Update = ();
    type Action = WishlistAction;
    type ActionResult = Wishlist;
    type Context = WishlistContext;
    type Error = WishlistError;

    fn from_create_params(id: UserId, _params: ()) -> Result<Self, Self::Error> {
        Ok(Wishlist::empty(id))
    }

    async fn on_update(&mut self, _update: (), _ctx: &WishlistContext) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: WishlistAction,
        ctx: &WishlistContext,
    ) -> Result<Wishlist, Self::Error> {
        match action {
            WishlistAction::Add(product_id) => {
                if !self.contains(product_id) {
                    match ctx.products.fetch_product(product_id).await {
                        Ok(_) => {}
                        Err(ProductError::NotFound(_)) => {
                            return Err(WishlistError::UnknownProduct(product_id))
                        }
                        Err(other) => return Err(WishlistError::Product(other)),
                    }
                    self.add(product_id);
                }
            }
            WishlistAction::Remove(product_id) => {
                self.remove(product_id);
            }
            WishlistAction::Clear => self.clear(),
        }
        Ok(self.clone())
    }
}
