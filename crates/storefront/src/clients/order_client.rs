//! # Order Client
//!
//! Placing an order is a single create request; reservation, pricing and
//! the cart update all happen in the Order actor's `on_create` hook. Reads
//! are scoped to the caller here, since the actor itself only knows orders.
use crate::model::{Order, OrderCreate, OrderId, OrderStatus, Principal, ProductId, UserId};
use crate::order_actor::{OrderAction, OrderError};
use entity_actor::{impl_resource_client, ActorClient, Filter, ResourceClient};
use tracing::{debug, info, instrument};

#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

impl_resource_client!(OrderClient, Order, OrderError, order);

fn forbidden(message: &str) -> OrderError {
    OrderError::Unauthorized(message.to_string())
}

impl OrderClient {
    /// Places an order and returns it as stored.
    #[instrument(skip(self, params), fields(user_id = %params.user_id))]
    pub async fn create_order(&self, params: OrderCreate) -> Result<Order, OrderError> {
        debug!("Sending request");
        let id = self.inner.create(params).await?;
        let order = self.fetch_order(id).await?;
        info!(order_id = %order.id, total = %order.total_amount, "Order created");
        Ok(order)
    }

    /// One order, visible to its owner and to admins.
    #[instrument(skip(self))]
    pub async fn order_details(&self, id: OrderId, by: Principal) -> Result<Order, OrderError> {
        let order = self.fetch_order(id).await?;
        if !by.may_act_for(order.user_id) {
            return Err(forbidden("You can only view your own orders"));
        }
        Ok(order)
    }

    /// A user's orders, most recent first. Empty when they have none.
    #[instrument(skip(self))]
    pub async fn list_for_user(&self, user_id: UserId, by: Principal) -> Result<Vec<Order>, OrderError> {
        if !by.may_act_for(user_id) {
            return Err(forbidden("You can only view your own orders"));
        }
        let mut orders = self
            .list(Filter::new(move |o: &Order| o.user_id == user_id))
            .await?;
        Order::sort_recent_first(&mut orders);
        Ok(orders)
    }

    /// Every order, most recent first. Admin only.
    #[instrument(skip(self))]
    pub async fn list_all(&self, by: Principal) -> Result<Vec<Order>, OrderError> {
        if !by.is_admin() {
            return Err(forbidden("Only an administrator can list all orders"));
        }
        let mut orders = self.list(Filter::all()).await?;
        Order::sort_recent_first(&mut orders);
        Ok(orders)
    }

    #[instrument(skip(self))]
    pub async fn update_status(
        &self,
        id: OrderId,
        to: OrderStatus,
        by: Principal,
    ) -> Result<Order, OrderError> {
        debug!("Sending request");
        Ok(self
            .inner
            .perform_action(id, OrderAction::ChangeStatus { to, by })
            .await?)
    }

    /// Marks an externally paid order as settled.
    #[instrument(skip(self, payment_id))]
    pub async fn confirm_payment(
        &self,
        id: OrderId,
        payment_id: String,
        by: Principal,
    ) -> Result<Order, OrderError> {
        debug!("Sending request");
        Ok(self
            .inner
            .perform_action(id, OrderAction::ConfirmPayment { payment_id, by })
            .await?)
    }

    /// Whether any order, in any status, sold this product.
    #[instrument(skip(self))]
    pub async fn references_product(&self, product_id: ProductId) -> Result<bool, OrderError> {
        let orders = self
            .list(Filter::new(move |o: &Order| o.contains_product(product_id)))
            .await?;
        Ok(!orders.is_empty())
    }
}
