use super::actions::CartAction;
use super::error::CartError;
use super::CartContext;
use crate::model::{Cart, UserId};
use crate::product_actor::ProductError;
use async_trait::async_trait;
use entity_actor::ActorEntity;

#[async_trait]
impl ActorEntity for Cart {
    type Id = UserId;
    type Create = ();
    type Update = ();
    type Action = CartAction;
    type ActionResult = Cart;
    type Context = CartContext;
    type Error = CartError;

    fn from_create_params(id: UserId, _params: ()) -> Result<Self, Self::Error> {
        Ok(Cart::empty(id))
    }

    async fn on_update(&mut self, _update: (), _ctx: &CartContext) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: CartAction,
        ctx: &CartContext,
    ) -> Result<Cart, Self::Error> {
        match action {
            CartAction::Add {
                product_id,
                quantity,
            } => {
                if quantity == 0 {
                    return Err(CartError::InvalidQuantity);
                }
                match ctx.products.fetch_product(product_id).await {
                    Ok(_) => {}
                    Err(ProductError::NotFound(_)) => {
                        return Err(CartError::UnknownProduct(product_id))
                    }
                    Err(other) => return Err(CartError::Product(other)),
                }
                self.add(product_id, quantity);
            }
            CartAction::SetQuantity {
                product_id,
                quantity,
            } => {
                if !self.set_quantity(product_id, quantity) && quantity > 0 {
                    return Err(CartError::ItemNotInCart(product_id));
                }
            }
            CartAction::Remove { product_id } => {
                self.remove(product_id);
            }
            CartAction::Deduct(lines) => self.deduct(&lines),
        }
        Ok(self.clone())
    }
}
