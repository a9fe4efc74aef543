//! Shopping carts: one per user, keyed by the owner's [`UserId`].
use super::money::Money;
use super::product::{Product, ProductId};
use super::timestamp::{self, Timestamp};
use super::user::UserId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product_id: ProductId,
    pub quantity: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub user_id: UserId,
    pub items: Vec<CartLine>,
    #[serde(with = "timestamp")]
    pub updated_at: Timestamp,
}

impl Cart {
    pub fn empty(user_id: UserId) -> Self {
        Self {
            user_id,
            items: Vec::new(),
            updated_at: timestamp::now(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn quantity_of(&self, product_id: ProductId) -> u32 {
        self.items
            .iter()
            .find(|line| line.product_id == product_id)
            .map_or(0, |line| line.quantity)
    }

    /// Adds `quantity` units, merging into an existing line for the product.
    pub fn add(&mut self, product_id: ProductId, quantity: u32) {
        match self.items.iter_mut().find(|l| l.product_id == product_id) {
            Some(line) => line.quantity = line.quantity.saturating_add(quantity),
            None => self.items.push(CartLine {
                product_id,
                quantity,
            }),
        }
        self.touch();
    }

    /// Sets the quantity of an existing line; zero or less removes it.
    /// Returns false when the product is not in the cart.
    pub fn set_quantity(&mut self, product_id: ProductId, quantity: i64) -> bool {
        let Some(pos) = self.items.iter().position(|l| l.product_id == product_id) else {
            return false;
        };
        if quantity <= 0 {
            self.items.remove(pos);
        } else {
            self.items[pos].quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        }
        self.touch();
        true
    }

    pub fn remove(&mut self, product_id: ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|l| l.product_id != product_id);
        let removed = self.items.len() != before;
        if removed {
            self.touch();
        }
        removed
    }

    /// Takes ordered quantities out of the cart. Lines that reach zero are
    /// dropped; units added after the order snapshot stay.
    pub fn deduct(&mut self, ordered: &[CartLine]) {
        for taken in ordered {
            if let Some(pos) = self.items.iter().position(|l| l.product_id == taken.product_id) {
                let left = self.items[pos].quantity.saturating_sub(taken.quantity);
                if left == 0 {
                    self.items.remove(pos);
                } else {
                    self.items[pos].quantity = left;
                }
            }
        }
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = timestamp::now();
    }
}

/// Folds duplicate products into one line each, keeping first-seen order.
/// Fails on a zero quantity.
pub fn merge_lines(lines: &[CartLine]) -> Result<Vec<CartLine>, ProductId> {
    let mut merged: Vec<CartLine> = Vec::with_capacity(lines.len());
    for line in lines {
        if line.quantity == 0 {
            return Err(line.product_id);
        }
        match merged.iter_mut().find(|m| m.product_id == line.product_id) {
            Some(existing) => existing.quantity = existing.quantity.saturating_add(line.quantity),
            None => merged.push(*line),
        }
    }
    Ok(merged)
}

/// A cart line priced at the current catalog state.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricedLine {
    pub product_id: ProductId,
    pub title: Option<String>,
    pub image: Option<String>,
    pub quantity: u32,
    pub unit_price: Money,
    pub line_total: Money,
    /// Units currently in stock; 0 for products no longer in the catalog.
    pub in_stock: u32,
    pub available: bool,
}

/// Cart contents with totals recomputed from live prices.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
    pub lines: Vec<PricedLine>,
    pub total: Money,
}

impl CartSummary {
    /// Prices `lines` against `catalog`. Lines whose product is gone are kept
    /// (marked unavailable) but excluded from the total. `None` when a line or
    /// the total does not fit in [`Money`].
    pub fn price(lines: &[CartLine], catalog: &[Product]) -> Option<Self> {
        let by_id: BTreeMap<ProductId, &Product> = catalog.iter().map(|p| (p.id, p)).collect();
        let lines = lines
            .iter()
            .map(|line| match by_id.get(&line.product_id) {
                Some(product) => {
                    let unit_price = product.effective_price();
                    Some(PricedLine {
                        product_id: line.product_id,
                        title: Some(product.title.clone()),
                        image: product.image.clone(),
                        quantity: line.quantity,
                        unit_price,
                        line_total: unit_price.checked_times(line.quantity)?,
                        in_stock: product.total_stock,
                        available: true,
                    })
                }
                None => Some(PricedLine {
                    product_id: line.product_id,
                    title: None,
                    image: None,
                    quantity: line.quantity,
                    unit_price: Money::ZERO,
                    line_total: Money::ZERO,
                    in_stock: 0,
                    available: false,
                }),
            })
            .collect::<Option<Vec<PricedLine>>>()?;
        let total = Money::checked_sum(lines.iter().map(|l| l.line_total))?;
        Some(Self { lines, total })
    }
}
