//! Orders: immutable snapshots of a checkout plus a mutable status.
use super::address::AddressInfo;
use super::cart::CartLine;
use super::money::Money;
use super::order_status::{OrderStatus, StatusTone};
use super::product::ProductId;
use super::timestamp::{self, Timestamp};
use super::user::UserId;
use serde::{Deserialize, Serialize};

entity_id!(
    /// Type-safe identifier for Orders.
    OrderId,
    "order"
);

/// A product as it was sold: title, image and unit price frozen at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub product_id: ProductId,
    pub title: String,
    pub image: Option<String>,
    pub unit_price: Money,
    pub quantity: u32,
}

impl LineItem {
    /// `None` when the amount does not fit in [`Money`].
    pub fn line_total(&self) -> Option<Money> {
        self.unit_price.checked_times(self.quantity)
    }

    /// Exact total of `items`, or `None` on overflow.
    pub fn total_of(items: &[LineItem]) -> Option<Money> {
        items.iter().try_fold(Money::ZERO, |total, item| {
            total.checked_add(item.line_total()?)
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Settled at checkout; the order starts confirmed.
    Direct,
    /// Settled later by an outside provider; the order starts pending.
    External,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Refunded,
    Voided,
}

/// Where the order lines come from.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum CheckoutSource {
    /// The user's persisted cart, read at order time.
    Cart,
    /// An ephemeral line list. The persisted cart is not touched.
    BuyNow { items: Vec<CartLine> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderOrigin {
    Cart,
    BuyNow,
}

#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub user_id: UserId,
    pub source: CheckoutSource,
    pub address: AddressInfo,
    pub payment_method: PaymentMethod,
    /// Total the customer was shown. A mismatch aborts the order.
    pub expected_total: Option<Money>,
}

/// Checkout inputs consumed by `on_create`.
#[derive(Debug, Clone)]
pub struct PendingCheckout {
    pub source: CheckoutSource,
    pub expected_total: Option<Money>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub line_items: Vec<LineItem>,
    pub address_info: AddressInfo,
    pub order_status: OrderStatus,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub payment_id: Option<String>,
    pub total_amount: Money,
    pub origin: OrderOrigin,
    #[serde(with = "timestamp")]
    pub order_date: Timestamp,
    #[serde(with = "timestamp")]
    pub order_update_date: Timestamp,
    #[serde(skip)]
    pub(crate) checkout: Option<PendingCheckout>,
}

impl Order {
    pub fn contains_product(&self, product_id: ProductId) -> bool {
        self.line_items.iter().any(|l| l.product_id == product_id)
    }

    /// Sum of the frozen line totals.
    pub fn computed_total(&self) -> Option<Money> {
        LineItem::total_of(&self.line_items)
    }

    /// Newest first, ties broken by id.
    pub fn sort_recent_first(orders: &mut [Order]) {
        orders.sort_by(|a, b| b.order_date.cmp(&a.order_date).then(b.id.cmp(&a.id)));
    }
}

/// Order as returned to clients, with the display mapping attached.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderView {
    #[serde(flatten)]
    pub order: Order,
    pub status_label: &'static str,
    pub status_tone: StatusTone,
}

impl From<Order> for OrderView {
    fn from(order: Order) -> Self {
        Self {
            status_label: order.order_status.label(),
            status_tone: order.order_status.tone(),
            order,
        }
    }
}
