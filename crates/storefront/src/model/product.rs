//! Catalog products.
//!
//! [`Product`] implements [`ActorEntity`](entity_actor::ActorEntity) in
//! [`crate::product_actor`]; all stock changes go through that one actor.
use super::money::Money;
use super::order::LineItem;
use super::timestamp::{self, Timestamp};
use serde::{Deserialize, Serialize};

entity_id!(
    /// Type-safe identifier for Products.
    ProductId,
    "product"
);

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub description: String,
    pub category: String,
    pub brand: String,
    pub sku: String,
    pub image: Option<String>,
    pub price: Money,
    pub sale_price: Option<Money>,
    pub total_stock: u32,
    #[serde(with = "timestamp")]
    pub created_at: Timestamp,
    #[serde(with = "timestamp")]
    pub updated_at: Timestamp,
    /// Set while a delete is pending; reservations refuse the product.
    #[serde(skip)]
    pub retired: bool,
}

impl Product {
    /// Sale price when one is set, list price otherwise. Cart totals, checkout
    /// summaries and orders all price through here.
    pub fn effective_price(&self) -> Money {
        match self.sale_price {
            Some(sale) if !sale.is_zero() => sale,
            _ => self.price,
        }
    }

    /// Frozen copy of this product as an order line.
    pub fn line_item(&self, quantity: u32) -> LineItem {
        LineItem {
            product_id: self.id,
            title: self.title.clone(),
            image: self.image.clone(),
            unit_price: self.effective_price(),
            quantity,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCreate {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub category: String,
    pub brand: String,
    #[serde(default)]
    pub sku: String,
    #[serde(default)]
    pub image: Option<String>,
    pub price: Money,
    #[serde(default)]
    pub sale_price: Option<Money>,
    pub total_stock: u32,
}

/// Partial update. A `salePrice` of 0 removes the sale.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub sku: Option<String>,
    pub image: Option<String>,
    pub price: Option<Money>,
    pub sale_price: Option<Money>,
    pub total_stock: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum ProductSort {
    #[serde(rename = "price-lowtohigh")]
    PriceLowToHigh,
    #[serde(rename = "price-hightolow")]
    PriceHighToLow,
    #[serde(rename = "title-atoz")]
    TitleAToZ,
    #[serde(rename = "title-ztoa")]
    TitleZToA,
}

/// Catalog listing filters. `category` and `brand` take comma-separated
/// values; an absent filter matches everything.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductQuery {
    pub category: Option<String>,
    pub brand: Option<String>,
    pub keyword: Option<String>,
    pub sort: Option<ProductSort>,
}

fn in_list(wanted: Option<&str>, value: &str) -> bool {
    match wanted {
        None => true,
        Some(list) => {
            let mut options = list.split(',').map(str::trim).filter(|w| !w.is_empty()).peekable();
            options.peek().is_none() || options.any(|w| w.eq_ignore_ascii_case(value))
        }
    }
}

impl ProductQuery {
    pub fn matches(&self, product: &Product) -> bool {
        if !in_list(self.category.as_deref(), &product.category)
            || !in_list(self.brand.as_deref(), &product.brand)
        {
            return false;
        }
        match self.keyword.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(keyword) => {
                let needle = keyword.to_lowercase();
                [
                    &product.title,
                    &product.description,
                    &product.category,
                    &product.brand,
                ]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
            }
        }
    }

    pub fn sort(&self, products: &mut [Product]) {
        match self.sort {
            Some(ProductSort::PriceLowToHigh) => products.sort_by_key(Product::effective_price),
            Some(ProductSort::PriceHighToLow) => {
                products.sort_by_key(|p| std::cmp::Reverse(p.effective_price()))
            }
            Some(ProductSort::TitleAToZ) => {
                products.sort_by_key(|p| p.title.to_lowercase())
            }
            Some(ProductSort::TitleZToA) => {
                products.sort_by_key(|p| std::cmp::Reverse(p.title.to_lowercase()))
            }
            None => {}
        }
    }
}
