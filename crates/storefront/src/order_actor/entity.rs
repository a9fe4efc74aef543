use super::actions::OrderAction;
use super::error::OrderError;
use super::OrderContext;
use crate::model::timestamp;
use crate::model::{
    merge_lines, CartLine, CheckoutSource, LineItem, Money, Order, OrderCreate, OrderId,
    OrderOrigin, OrderStatus, PaymentMethod, PaymentStatus, PendingCheckout, Principal,
};
use crate::product_actor::ProductError;
use async_trait::async_trait;
use entity_actor::ActorEntity;
use tracing::{error, info, warn};

/// Returns reserved units after a later checkout step failed. A failure here
/// is logged; the caller's error is the one reported.
async fn give_back(ctx: &OrderContext, items: &[LineItem]) {
    if let Err(e) = ctx.products.release_all(items).await {
        error!(error = %e, "Failed to release reserved stock after aborted checkout");
    }
}

/// Returns the units of an abandoned order to stock. Lines whose product
/// has left the catalog are skipped.
async fn restock(ctx: &OrderContext, items: &[LineItem]) -> Result<(), OrderError> {
    match ctx.products.release_all(items).await {
        Err(ProductError::NotFound(missing)) => {
            let lines: Vec<CartLine> = items
                .iter()
                .map(|i| CartLine {
                    product_id: i.product_id,
                    quantity: i.quantity,
                })
                .collect();
            let present = ctx.products.catalog_for(&lines).await?;
            let remaining: Vec<LineItem> = items
                .iter()
                .filter(|i| present.iter().any(|p| p.id == i.product_id))
                .cloned()
                .collect();
            warn!(%missing, skipped = items.len() - remaining.len(), "Restocking without removed products");
            ctx.products.release_all(&remaining).await?;
            Ok(())
        }
        other => Ok(other?),
    }
}

impl Order {
    fn change_status(
        &mut self,
        to: OrderStatus,
        by: &Principal,
        ctx: &OrderContext,
    ) -> Result<(), OrderError> {
        if !by.may_act_for(self.user_id) {
            return Err(OrderError::Unauthorized(
                "You can only manage your own orders".to_string(),
            ));
        }
        if !by.is_admin() && to != OrderStatus::Cancelled {
            return Err(OrderError::Unauthorized(format!(
                "Only an administrator can mark an order as {to}"
            )));
        }

        let from = self.order_status;
        let permitted = ctx.policy.flow().allows(from, to)
            && (by.is_admin() || from.customer_may_cancel());
        if !permitted {
            return Err(OrderError::InvalidTransition { from, to });
        }

        if to.is_abandoned() {
            self.payment_status = match self.payment_status {
                PaymentStatus::Paid => PaymentStatus::Refunded,
                PaymentStatus::Pending => PaymentStatus::Voided,
                settled => settled,
            };
        }
        self.order_status = to;
        self.order_update_date = timestamp::now();
        Ok(())
    }

    /// Settlement is reported by the provider side, never by the buyer.
    fn confirm_payment(&mut self, payment_id: String, by: &Principal) -> Result<(), OrderError> {
        if !by.is_admin() {
            return Err(OrderError::Unauthorized(
                "Only an administrator can confirm a payment".to_string(),
            ));
        }
        let payment_id = payment_id.trim();
        if payment_id.is_empty() {
            return Err(OrderError::Validation("Payment id is required".to_string()));
        }
        if self.order_status != OrderStatus::Pending
            || self.payment_status != PaymentStatus::Pending
        {
            return Err(OrderError::InvalidTransition {
                from: self.order_status,
                to: OrderStatus::Confirmed,
            });
        }
        self.order_status = OrderStatus::Confirmed;
        self.payment_status = PaymentStatus::Paid;
        self.payment_id = Some(payment_id.to_string());
        self.order_update_date = timestamp::now();
        Ok(())
    }
}

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    type Update = ();
    type Action = OrderAction;
    type ActionResult = Order;
    type Context = OrderContext;
    type Error = OrderError;

    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, Self::Error> {
        let missing = params.address.fields.missing_fields();
        if !missing.is_empty() {
            return Err(OrderError::InvalidAddress(missing));
        }

        let (order_status, payment_status) = match params.payment_method {
            PaymentMethod::Direct => (OrderStatus::Confirmed, PaymentStatus::Paid),
            PaymentMethod::External => (OrderStatus::Pending, PaymentStatus::Pending),
        };
        let origin = match params.source {
            CheckoutSource::Cart => OrderOrigin::Cart,
            CheckoutSource::BuyNow { .. } => OrderOrigin::BuyNow,
        };
        let now = timestamp::now();

        Ok(Self {
            id,
            user_id: params.user_id,
            line_items: Vec::new(),
            address_info: params.address,
            order_status,
            payment_method: params.payment_method,
            payment_status,
            payment_id: None,
            total_amount: Money::ZERO,
            origin,
            order_date: now,
            order_update_date: now,
            checkout: Some(PendingCheckout {
                source: params.source,
                expected_total: params.expected_total,
            }),
        })
    }

    /// Reserves stock, freezes prices and drains the cart.
    ///
    /// Stock is taken in a single product transaction, so either every line
    /// is reserved or none is. Steps after the reservation release it again
    /// before failing.
    async fn on_create(&mut self, ctx: &OrderContext) -> Result<(), Self::Error> {
        let checkout = self.checkout.take().ok_or(OrderError::EmptyCart)?;

        let requested = match &checkout.source {
            CheckoutSource::Cart => ctx.carts.get_cart(self.user_id).await?.items,
            CheckoutSource::BuyNow { items } => items.clone(),
        };
        let lines = merge_lines(&requested).map_err(OrderError::InvalidQuantity)?;
        if lines.is_empty() {
            return Err(OrderError::EmptyCart);
        }

        let items = ctx.products.reserve_all(&lines).await?;
        let Some(total) = LineItem::total_of(&items) else {
            warn!(order_id = %self.id, "Checkout total does not fit");
            give_back(ctx, &items).await;
            return Err(OrderError::TotalTooLarge);
        };

        if let Some(expected) = checkout.expected_total {
            if expected != total {
                warn!(order_id = %self.id, %expected, actual = %total, "Checkout total changed");
                give_back(ctx, &items).await;
                return Err(OrderError::PriceChanged {
                    expected,
                    actual: total,
                });
            }
        }

        if checkout.source == CheckoutSource::Cart {
            if let Err(e) = ctx.carts.deduct(self.user_id, lines).await {
                give_back(ctx, &items).await;
                return Err(e.into());
            }
        }

        info!(order_id = %self.id, user_id = %self.user_id, total = %total, lines = items.len(), "Order placed");
        self.line_items = items;
        self.total_amount = total;
        Ok(())
    }

    /// Orders are immutable apart from status and payment, which go through
    /// actions.
    async fn on_update(&mut self, _update: (), _ctx: &OrderContext) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: OrderAction,
        ctx: &OrderContext,
    ) -> Result<Order, Self::Error> {
        match action {
            OrderAction::ChangeStatus { to, by } => {
                let from = self.order_status;
                self.change_status(to, &by, ctx)?;
                if to.is_abandoned() && ctx.policy.restock_on_cancel {
                    restock(ctx, &self.line_items).await?;
                }
                info!(order_id = %self.id, %from, %to, "Order status changed");
            }
            OrderAction::ConfirmPayment { payment_id, by } => {
                self.confirm_payment(payment_id, &by)?;
                info!(order_id = %self.id, "Payment confirmed");
            }
        }
        Ok(self.clone())
    }
}
