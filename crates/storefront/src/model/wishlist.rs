use super::product::ProductId;
use super::timestamp::{self, Timestamp};
use super::user::UserId;
use serde::Serialize;
use std::collections::BTreeSet;

/// Saved products of one user. Set semantics: adding twice is a no-op.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Wishlist {
    pub user_id: UserId,
    pub product_ids: BTreeSet<ProductId>,
    #[serde(with = "timestamp")]
    pub updated_at: Timestamp,
}

impl Wishlist {
    pub fn empty(user_id: UserId) -> Self {
        Self {
            user_id,
            product_ids: BTreeSet::new(),
            updated_at: timestamp::now(),
        }
    }

    pub fn contains(&self, product_id: ProductId) -> bool {
        self.product_ids.contains(&product_id)
    }

    pub fn add(&mut self, product_id: ProductId) -> bool {
        let inserted = self.product_ids.insert(product_id);
        if inserted {
            self.updated_at = timestamp::now();
        }
        inserted
    }

    pub fn remove(&mut self, product_id: ProductId) -> bool {
        let removed = self.product_ids.remove(&product_id);
        if removed {
            self.updated_at = timestamp::now();
        }
        removed
    }

    pub fn clear(&mut self) {
        self.product_ids.clear();
        self.updated_at = timestamp::now();
    }
}
