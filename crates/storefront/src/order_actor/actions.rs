use crate::model::{OrderStatus, Principal};

#[derive(Debug, Clone)]
pub enum OrderAction {
    /// Move the order to `to` on behalf of `by`.
    ChangeStatus { to: OrderStatus, by: Principal },
    /// Record settlement by an outside payment provider.
    ConfirmPayment { payment_id: String, by: Principal },
}
