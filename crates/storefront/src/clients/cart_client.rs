//! # Cart Client
//!
//! Carts are created lazily: every write goes through
//! [`Ensure`](entity_actor::ResourceRequest::Ensure), and reading a cart that
//! does not exist yet yields an empty one.
use crate::cart_actor::{CartAction, CartError};
use crate::clients::ProductClient;
use crate::model::{Cart, CartLine, CartSummary, ProductId, UserId};
use entity_actor::{impl_resource_client, ActorClient, ResourceClient};
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct CartClient {
    inner: ResourceClient<Cart>,
}

impl_resource_client!(CartClient, Cart, CartError, cart);

impl CartClient {
    async fn apply(&self, user_id: UserId, action: CartAction) -> Result<Cart, CartError> {
        debug!("Sending request");
        Ok(self.inner.ensure_and_perform(user_id, (), action).await?)
    }

    /// Adds units of a product, merging with an existing line.
    #[instrument(skip(self))]
    pub async fn add_to_cart(
        &self,
        user_id: UserId,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<Cart, CartError> {
        self.apply(
            user_id,
            CartAction::Add {
                product_id,
                quantity,
            },
        )
        .await
    }

    /// Sets a line's quantity. Zero or less removes the line.
    #[instrument(skip(self))]
    pub async fn update_quantity(
        &self,
        user_id: UserId,
        product_id: ProductId,
        quantity: i64,
    ) -> Result<Cart, CartError> {
        self.apply(
            user_id,
            CartAction::SetQuantity {
                product_id,
                quantity,
            },
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn remove_from_cart(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> Result<Cart, CartError> {
        self.apply(user_id, CartAction::Remove { product_id }).await
    }

    /// Takes the quantities of a placed order out of the cart.
    #[instrument(skip(self, lines), fields(lines = lines.len()))]
    pub async fn deduct(&self, user_id: UserId, lines: Vec<CartLine>) -> Result<Cart, CartError> {
        self.apply(user_id, CartAction::Deduct(lines)).await
    }

    #[instrument(skip(self))]
    pub async fn get_cart(&self, user_id: UserId) -> Result<Cart, CartError> {
        Ok(self
            .get(user_id)
            .await?
            .unwrap_or_else(|| Cart::empty(user_id)))
    }

    /// The cart priced at current catalog prices.
    #[instrument(skip(self, products))]
    pub async fn summary(
        &self,
        user_id: UserId,
        products: &ProductClient,
    ) -> Result<CartSummary, CartError> {
        let cart = self.get_cart(user_id).await?;
        let catalog = products
            .catalog_for(&cart.items)
            .await
            .map_err(CartError::Product)?;
        CartSummary::price(&cart.items, &catalog).ok_or(CartError::TotalTooLarge)
    }
}
