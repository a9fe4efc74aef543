//! Product reviews, kept in one book per product.
use super::product::ProductId;
use super::timestamp::{self, Timestamp};
use super::user::UserId;
use serde::{Deserialize, Serialize};

entity_id!(
    /// Identifies a review within its product's book.
    ReviewId,
    "review"
);

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: ReviewId,
    pub product_id: ProductId,
    pub user_id: UserId,
    pub user_name: String,
    pub review_message: String,
    pub review_value: u8,
    #[serde(with = "timestamp")]
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReview {
    pub user_id: UserId,
    pub user_name: String,
    #[serde(default)]
    pub review_message: String,
    pub review_value: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingSummary {
    pub average_rating: f64,
    pub review_count: usize,
}

impl RatingSummary {
    pub const NONE: RatingSummary = RatingSummary {
        average_rating: 0.0,
        review_count: 0,
    };
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewBook {
    pub product_id: ProductId,
    pub reviews: Vec<Review>,
    #[serde(skip)]
    next_id: u32,
}

impl ReviewBook {
    pub fn empty(product_id: ProductId) -> Self {
        Self {
            product_id,
            reviews: Vec::new(),
            next_id: 1,
        }
    }

    pub fn has_review_by(&self, user_id: UserId) -> bool {
        self.reviews.iter().any(|r| r.user_id == user_id)
    }

    /// Appends a review. Callers validate the rating first.
    pub fn push(&mut self, review: NewReview) -> Review {
        let stored = Review {
            id: ReviewId(self.next_id),
            product_id: self.product_id,
            user_id: review.user_id,
            user_name: review.user_name,
            review_message: review.review_message,
            review_value: review.review_value,
            created_at: timestamp::now(),
        };
        self.next_id += 1;
        self.reviews.push(stored.clone());
        stored
    }

    /// Arithmetic mean of all ratings; 0.0 with no reviews.
    pub fn summary(&self) -> RatingSummary {
        if self.reviews.is_empty() {
            return RatingSummary::NONE;
        }
        let sum: u32 = self.reviews.iter().map(|r| u32::from(r.review_value)).sum();
        RatingSummary {
            average_rating: f64::from(sum) / self.reviews.len() as f64,
            review_count: self.reviews.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn by(user: u32, value: u8) -> NewReview {
        NewReview {
            user_id: UserId(user),
            user_name: format!("user {user}"),
            review_message: String::new(),
            review_value: value,
        }
    }

    #[test]
    fn average_of_five_and_one_is_three() {
        let mut book = ReviewBook::empty(ProductId(1));
        book.push(by(1, 5));
        book.push(by(2, 1));
        assert_eq!(book.summary().average_rating, 3.0);
        assert_eq!(book.summary().review_count, 2);
    }

    #[test]
    fn empty_book_averages_zero() {
        assert_eq!(ReviewBook::empty(ProductId(1)).summary(), RatingSummary::NONE);
    }
}
