use super::actions::{ProductAction, ProductActionResult};
use super::error::ProductError;
use crate::model::timestamp;
use crate::model::{Money, Product, ProductCreate, ProductId, ProductUpdate};
use async_trait::async_trait;
use entity_actor::ActorEntity;

fn required(field: &str, value: String) -> Result<String, ProductError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ProductError::Validation(format!("Product {field} is required")));
    }
    Ok(trimmed.to_string())
}

/// Checks the price pair and drops a zero sale price.
fn normalize_pricing(price: Money, sale_price: Option<Money>) -> Result<Option<Money>, ProductError> {
    if price.is_zero() {
        return Err(ProductError::Validation(
            "Price must be greater than zero".to_string(),
        ));
    }
    match sale_price {
        Some(sale) if sale.is_zero() => Ok(None),
        Some(sale) if sale >= price => Err(ProductError::Validation(format!(
            "Sale price {sale} must be below the regular price {price}"
        ))),
        other => Ok(other),
    }
}

#[async_trait]
impl ActorEntity for Product {
    type Id = ProductId;
    type Create = ProductCreate;
    type Update = ProductUpdate;
    type Action = ProductAction;
    type ActionResult = ProductActionResult;
    type Context = ();
    type Error = ProductError;

    fn from_create_params(id: ProductId, params: ProductCreate) -> Result<Self, Self::Error> {
        let sale_price = normalize_pricing(params.price, params.sale_price)?;
        let now = timestamp::now();
        Ok(Self {
            id,
            title: required("title", params.title)?,
            description: params.description,
            category: required("category", params.category)?,
            brand: required("brand", params.brand)?,
            sku: params.sku,
            image: params.image,
            price: params.price,
            sale_price,
            total_stock: params.total_stock,
            created_at: now,
            updated_at: now,
            retired: false,
        })
    }

    /// Applies a partial update. Price and sale price are validated as a pair
    /// after merging, so lowering the price below an existing sale fails.
    async fn on_update(&mut self, update: ProductUpdate, _ctx: &()) -> Result<(), Self::Error> {
        let price = update.price.unwrap_or(self.price);
        let sale_price = update.sale_price.or(self.sale_price);
        self.sale_price = normalize_pricing(price, sale_price)?;
        self.price = price;

        if let Some(title) = update.title {
            self.title = required("title", title)?;
        }
        if let Some(category) = update.category {
            self.category = required("category", category)?;
        }
        if let Some(brand) = update.brand {
            self.brand = required("brand", brand)?;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(sku) = update.sku {
            self.sku = sku;
        }
        if let Some(image) = update.image {
            self.image = Some(image).filter(|i| !i.is_empty());
        }
        if let Some(stock) = update.total_stock {
            self.total_stock = stock;
        }
        self.updated_at = timestamp::now();
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: ProductAction,
        _ctx: &(),
    ) -> Result<ProductActionResult, Self::Error> {
        match action {
            ProductAction::CheckStock => Ok(ProductActionResult::Stock(self.total_stock)),
            ProductAction::Reserve(0) | ProductAction::Release(0) => {
                Err(ProductError::InvalidQuantity)
            }
            ProductAction::Reserve(_) if self.retired => {
                Err(ProductError::NotFound(self.id.to_string()))
            }
            ProductAction::Reserve(quantity) => {
                if quantity > self.total_stock {
                    return Err(ProductError::InsufficientStock {
                        product_id: self.id,
                        title: self.title.clone(),
                        requested: quantity,
                        available: self.total_stock,
                    });
                }
                self.total_stock -= quantity;
                Ok(ProductActionResult::Reserved(self.line_item(quantity)))
            }
            ProductAction::Release(quantity) => {
                self.total_stock = self.total_stock.saturating_add(quantity);
                Ok(ProductActionResult::Released(self.total_stock))
            }
            ProductAction::Retire => {
                self.retired = true;
                Ok(ProductActionResult::Retired {
                    title: self.title.clone(),
                })
            }
            ProductAction::Reinstate => {
                self.retired = false;
                Ok(ProductActionResult::Reinstated)
            }
        }
    }
}
