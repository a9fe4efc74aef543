use crate::model::{NewReview, ProductId, RatingSummary, Review, ReviewBook};
use crate::review_actor::{ReviewAction, ReviewError};
use entity_actor::{impl_resource_client, ActorClient, ResourceClient};
use tracing::{debug, info, instrument};

#[derive(Clone)]
pub struct ReviewClient {
    inner: ResourceClient<ReviewBook>,
}

impl_resource_client!(ReviewClient, ReviewBook, ReviewError, review_book);

impl ReviewClient {
    /// Adds a review to the product's book, opening the book on first use.
    #[instrument(skip(self, review), fields(user_id = %review.user_id))]
    pub async fn add_review(
        &self,
        product_id: ProductId,
        review: NewReview,
    ) -> Result<Review, ReviewError> {
        debug!("Sending request");
        let review = self
            .inner
            .ensure_and_perform(product_id, (), ReviewAction::Add(review))
            .await?;
        info!(review_id = %review.id, rating = review.review_value, "Review added");
        Ok(review)
    }

    /// Oldest first; empty for a product nobody reviewed.
    #[instrument(skip(self))]
    pub async fn reviews(&self, product_id: ProductId) -> Result<Vec<Review>, ReviewError> {
        Ok(self
            .get(product_id)
            .await?
            .map(|book| book.reviews)
            .unwrap_or_default())
    }

    #[instrument(skip(self))]
    pub async fn rating_summary(&self, product_id: ProductId) -> Result<RatingSummary, ReviewError> {
        Ok(self
            .get(product_id)
            .await?
            .map(|book| book.summary())
            .unwrap_or(RatingSummary::NONE))
    }
}
