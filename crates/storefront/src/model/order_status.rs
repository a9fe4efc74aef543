//! Order status machine and its one presentation mapping.
//!
//! ```text
//! pending → confirmed → processing → shipped → [on-the-way] → delivered
//!     └──────────┴────────────┴───────────┴──────────┴──→ cancelled | rejected
//! ```
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Processing,
    Shipped,
    OnTheWay,
    Delivered,
    Cancelled,
    Rejected,
}

/// Visual emphasis for a status, independent of any particular UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusTone {
    Neutral,
    Info,
    Progress,
    Accent,
    Success,
    Danger,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 8] = [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Processing,
        OrderStatus::Shipped,
        OrderStatus::OnTheWay,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
        OrderStatus::Rejected,
    ];

    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            OrderStatus::Delivered | OrderStatus::Cancelled | OrderStatus::Rejected
        )
    }

    /// Cancelled and rejected end an order without fulfilment.
    pub fn is_abandoned(self) -> bool {
        matches!(self, OrderStatus::Cancelled | OrderStatus::Rejected)
    }

    /// Statuses from which the owning customer may still cancel.
    pub fn customer_may_cancel(self) -> bool {
        matches!(
            self,
            OrderStatus::Pending | OrderStatus::Confirmed | OrderStatus::Processing
        )
    }

    pub fn label(self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Confirmed => "Confirmed",
            OrderStatus::Processing => "Processing",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::OnTheWay => "On the way",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
            OrderStatus::Rejected => "Rejected",
        }
    }

    pub fn tone(self) -> StatusTone {
        match self {
            OrderStatus::Pending => StatusTone::Neutral,
            OrderStatus::Confirmed => StatusTone::Info,
            OrderStatus::Processing | OrderStatus::Shipped => StatusTone::Progress,
            OrderStatus::OnTheWay => StatusTone::Accent,
            OrderStatus::Delivered => StatusTone::Success,
            OrderStatus::Cancelled | OrderStatus::Rejected => StatusTone::Danger,
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The forward stages in effect. `on-the-way` is optional.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusFlow {
    pub on_the_way: bool,
}

impl Default for StatusFlow {
    fn default() -> Self {
        Self { on_the_way: true }
    }
}

impl StatusFlow {
    /// The single stage after `status`, if any.
    pub fn next_stage(self, status: OrderStatus) -> Option<OrderStatus> {
        match status {
            OrderStatus::Pending => Some(OrderStatus::Confirmed),
            OrderStatus::Confirmed => Some(OrderStatus::Processing),
            OrderStatus::Processing => Some(OrderStatus::Shipped),
            OrderStatus::Shipped if self.on_the_way => Some(OrderStatus::OnTheWay),
            OrderStatus::Shipped => Some(OrderStatus::Delivered),
            OrderStatus::OnTheWay if self.on_the_way => Some(OrderStatus::Delivered),
            _ => None,
        }
    }

    /// Whether `from → to` is a legal move (ignoring who asks).
    pub fn allows(self, from: OrderStatus, to: OrderStatus) -> bool {
        if from.is_terminal() {
            return false;
        }
        if !self.on_the_way && from == OrderStatus::OnTheWay {
            return false;
        }
        to.is_abandoned() || self.next_stage(from) == Some(to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn forward_path_with_on_the_way() {
        let flow = StatusFlow { on_the_way: true };
        let mut status = OrderStatus::Pending;
        let mut path = vec![status];
        while let Some(next) = flow.next_stage(status) {
            assert!(flow.allows(status, next));
            status = next;
            path.push(status);
        }
        assert_eq!(
            path,
            vec![
                OrderStatus::Pending,
                OrderStatus::Confirmed,
                OrderStatus::Processing,
                OrderStatus::Shipped,
                OrderStatus::OnTheWay,
                OrderStatus::Delivered,
            ]
        );
    }

    #[test]
    fn on_the_way_can_be_disabled() {
        let flow = StatusFlow { on_the_way: false };
        assert!(flow.allows(OrderStatus::Shipped, OrderStatus::Delivered));
        assert!(!flow.allows(OrderStatus::Shipped, OrderStatus::OnTheWay));
    }

    #[test]
    fn no_skipping_or_going_back() {
        let flow = StatusFlow::default();
        assert!(!flow.allows(OrderStatus::Confirmed, OrderStatus::Shipped));
        assert!(!flow.allows(OrderStatus::Shipped, OrderStatus::Processing));
        assert!(!flow.allows(OrderStatus::Confirmed, OrderStatus::Confirmed));
        assert!(flow.allows(OrderStatus::OnTheWay, OrderStatus::Cancelled));
    }

    #[test]
    fn presentation_is_total() {
        assert_eq!(OrderStatus::OnTheWay.label(), "On the way");
        assert_eq!(
            serde_json::to_string(&OrderStatus::OnTheWay).unwrap(),
            "\"on-the-way\""
        );
        for status in OrderStatus::ALL {
            assert!(!status.label().is_empty());
        }
    }

    fn any_status() -> impl Strategy<Value = OrderStatus> {
        prop::sample::select(OrderStatus::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn terminal_states_admit_nothing(to in any_status(), on_the_way in any::<bool>()) {
            let flow = StatusFlow { on_the_way };
            for from in [OrderStatus::Delivered, OrderStatus::Cancelled, OrderStatus::Rejected] {
                prop_assert!(!flow.allows(from, to));
            }
        }

        #[test]
        fn legal_moves_are_next_stage_or_abandon(
            from in any_status(),
            to in any_status(),
            on_the_way in any::<bool>(),
        ) {
            let flow = StatusFlow { on_the_way };
            if flow.allows(from, to) {
                prop_assert!(!from.is_terminal());
                prop_assert!(to.is_abandoned() || flow.next_stage(from) == Some(to));
            }
        }
    }
}
