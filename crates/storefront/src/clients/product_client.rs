//! # Product Client
//!
//! Catalog management plus the two stock operations checkout relies on.
//! Both are single [`Transaction`](entity_actor::ResourceRequest::Transaction)
//! requests, so a multi-line order reserves every line or none.
use crate::clients::OrderClient;
use crate::model::{
    CartLine, LineItem, Product, ProductCreate, ProductId, ProductQuery, ProductUpdate,
};
use crate::product_actor::{ProductAction, ProductActionResult, ProductError};
use entity_actor::{impl_resource_client, ActorClient, Filter, ResourceClient};
use std::collections::BTreeSet;
use tracing::{debug, info, instrument, warn};

#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
}

impl_resource_client!(ProductClient, Product, ProductError, product);

fn unexpected(result: ProductActionResult) -> ProductError {
    ProductError::ActorCommunication(format!("unexpected product reply: {result:?}"))
}

impl ProductClient {
    #[instrument(skip(self, params), fields(title = %params.title))]
    pub async fn create_product(&self, params: ProductCreate) -> Result<Product, ProductError> {
        debug!("Sending request");
        let id = self.inner.create(params).await?;
        let product = self.fetch_product(id).await?;
        info!(product_id = %product.id, stock = product.total_stock, "Product created");
        Ok(product)
    }

    /// Partial update. Stock edits share the actor's single write path with
    /// checkout reservations.
    #[instrument(skip(self, update))]
    pub async fn update_product(
        &self,
        id: ProductId,
        update: ProductUpdate,
    ) -> Result<Product, ProductError> {
        debug!("Sending request");
        Ok(self.inner.update(id, update).await?)
    }

    /// Filtered, searched and sorted catalog. Without a sort the listing is
    /// in id order.
    #[instrument(skip(self))]
    pub async fn list_products(&self, query: ProductQuery) -> Result<Vec<Product>, ProductError> {
        let filter_query = query.clone();
        let mut products = self
            .list(Filter::new(move |p: &Product| filter_query.matches(p)))
            .await?;
        query.sort(&mut products);
        Ok(products)
    }

    /// Current products for the given cart lines. Lines whose product is gone
    /// are simply absent from the result.
    #[instrument(skip(self, lines), fields(lines = lines.len()))]
    pub async fn catalog_for(&self, lines: &[CartLine]) -> Result<Vec<Product>, ProductError> {
        let wanted: BTreeSet<ProductId> = lines.iter().map(|l| l.product_id).collect();
        self.list(Filter::new(move |p: &Product| wanted.contains(&p.id)))
            .await
    }

    #[instrument(skip(self))]
    pub async fn check_stock(&self, id: ProductId) -> Result<u32, ProductError> {
        debug!("Sending request");
        match self.inner.perform_action(id, ProductAction::CheckStock).await? {
            ProductActionResult::Stock(level) => Ok(level),
            other => Err(unexpected(other)),
        }
    }

    /// Decrements stock for every line or for none, returning each product
    /// frozen as an order line in the same order as `lines`.
    #[instrument(skip(self, lines), fields(lines = lines.len()))]
    pub async fn reserve_all(&self, lines: &[CartLine]) -> Result<Vec<LineItem>, ProductError> {
        debug!("Sending request");
        let ops = lines
            .iter()
            .map(|l| (l.product_id, ProductAction::Reserve(l.quantity)))
            .collect();
        self.inner
            .transaction(ops)
            .await?
            .into_iter()
            .map(|result| match result {
                ProductActionResult::Reserved(item) => Ok(item),
                other => Err(unexpected(other)),
            })
            .collect()
    }

    /// Returns the units of previously reserved lines to stock.
    #[instrument(skip(self, items), fields(lines = items.len()))]
    pub async fn release_all(&self, items: &[LineItem]) -> Result<(), ProductError> {
        if items.is_empty() {
            return Ok(());
        }
        debug!("Sending request");
        let ops = items
            .iter()
            .map(|i| (i.product_id, ProductAction::Release(i.quantity)))
            .collect();
        self.inner.transaction(ops).await?;
        Ok(())
    }

    /// Deletes a product that no order refers to. Products that were sold
    /// stay in the catalog so order history and restocking keep working.
    ///
    /// The product is retired before the order check, so no checkout can
    /// reserve it in between; a refused delete reinstates it.
    #[instrument(skip(self, orders))]
    pub async fn delete_product(&self, id: ProductId, orders: &OrderClient) -> Result<(), ProductError> {
        let title = match self.inner.perform_action(id, ProductAction::Retire).await? {
            ProductActionResult::Retired { title } => title,
            other => return Err(unexpected(other)),
        };
        let referenced = orders
            .references_product(id)
            .await
            .map_err(|e| ProductError::ActorCommunication(e.to_string()));
        match referenced {
            Ok(false) => {
                self.delete(id).await?;
                info!(product_id = %id, "Product deleted");
                Ok(())
            }
            Ok(true) => {
                warn!(product_id = %id, "Refusing to delete a product with orders");
                self.reinstate(id).await?;
                Err(ProductError::ReferencedByOrders(title))
            }
            Err(e) => {
                self.reinstate(id).await?;
                Err(e)
            }
        }
    }

    async fn reinstate(&self, id: ProductId) -> Result<(), ProductError> {
        match self.inner.perform_action(id, ProductAction::Reinstate).await? {
            ProductActionResult::Reinstated => Ok(()),
            other => Err(unexpected(other)),
        }
    }
}
