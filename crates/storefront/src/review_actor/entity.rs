use super::error::ReviewError;
use super::ReviewContext;
use crate::model::{NewReview, ProductId, Review, ReviewBook, MAX_RATING, MIN_RATING};
use crate::product_actor::ProductError;
use async_trait::async_trait;
use entity_actor::ActorEntity;

#[derive(Debug, Clone)]
pub enum ReviewAction {
    Add(NewReview),
}

#[async_trait]
impl ActorEntity for ReviewBook {
    type Id = ProductId;
    type Create = ();
    type Update = ();
    type Action = ReviewAction;
    type ActionResult = Review;
    type Context = ReviewContext;
    type Error = ReviewError;

    fn from_create_params(id: ProductId, _params: ()) -> Result<Self, Self::Error> {
        Ok(ReviewBook::empty(id))
    }

    async fn on_update(&mut self, _update: (), _ctx: &ReviewContext) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: ReviewAction,
        ctx: &ReviewContext,
    ) -> Result<Review, Self::Error> {
        match action {
            ReviewAction::Add(review) => {
                if !(MIN_RATING..=MAX_RATING).contains(&review.review_value) {
                    return Err(ReviewError::InvalidRating(review.review_value));
                }
                if ctx.policy.one_review_per_user && self.has_review_by(review.user_id) {
                    return Err(ReviewError::AlreadyReviewed);
                }
                match ctx.products.fetch_product(self.product_id).await {
                    Ok(_) => {}
                    Err(ProductError::NotFound(_)) => {
                        return Err(ReviewError::UnknownProduct(self.product_id))
                    }
                    Err(other) => return Err(ReviewError::Product(other)),
                }
                Ok(self.push(review))
            }
        }
    }
}
