//! Review rating aggregation.

use serde::{Deserialize, Serialize};

use crate::types::Review;

/// Aggregate figures over a recipe's approved reviews.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReviewStats {
    pub average_rating: f64,
    pub review_count: usize,
    /// Share of reviews per star, index 0 = 1 star .. index 4 = 5 stars,
    /// in percent. All zeros when there are no reviews.
    pub star_percentages: [f64; 5],
}

impl ReviewStats {
    pub fn compute<'a>(reviews: impl Iterator<Item = &'a Review>) -> Self {
        let mut counts = [0usize; 5];
        let mut total = 0usize;
        let mut rating_sum = 0u32;

        for review in reviews {
            // Ratings outside 1..=5 cannot be stored; skip anything else
            let Some(slot) = (review.rating as usize).checked_sub(1) else {
                continue;
            };
            if slot >= counts.len() {
                continue;
            }
            counts[slot] += 1;
            total += 1;
            rating_sum += u32::from(review.rating);
        }

        if total == 0 {
            return Self::default();
        }

        let mut star_percentages = [0.0; 5];
        for (slot, count) in counts.iter().enumerate() {
            star_percentages[slot] = *count as f64 / total as f64 * 100.0;
        }

        Self {
            average_rating: f64::from(rating_sum) / total as f64,
            review_count: total,
            star_percentages,
        }
    }

    /// Percentage of reviews with the given star rating (1-5).
    pub fn star_percentage(&self, star: u8) -> f64 {
        match (star as usize).checked_sub(1) {
            Some(slot) if slot < self.star_percentages.len() => self.star_percentages[slot],
            _ => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{RecipeId, Review, ReviewId, Reviewer};
    use chrono::Utc;

    fn review(rating: u8) -> Review {
        Review {
            id: ReviewId(0),
            recipe: RecipeId(0),
            reviewer: Reviewer::User {
                username: "ada".to_string(),
            },
            rating,
            text: String::new(),
            is_approved: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_empty_stats_are_zero() {
        let stats = ReviewStats::compute(std::iter::empty());
        assert_eq!(stats.review_count, 0);
        assert_eq!(stats.average_rating, 0.0);
        assert_eq!(stats.star_percentage(5), 0.0);
    }

    #[test]
    fn test_average_and_histogram() {
        let reviews = vec![review(5), review(5), review(4), review(2)];
        let stats = ReviewStats::compute(reviews.iter());

        assert_eq!(stats.review_count, 4);
        assert_eq!(stats.average_rating, 4.0);
        assert_eq!(stats.star_percentage(5), 50.0);
        assert_eq!(stats.star_percentage(4), 25.0);
        assert_eq!(stats.star_percentage(2), 25.0);
        assert_eq!(stats.star_percentage(3), 0.0);
    }

    #[test]
    fn test_out_of_range_star_queries() {
        let stats = ReviewStats::compute(vec![review(5)].iter());
        assert_eq!(stats.star_percentage(0), 0.0);
        assert_eq!(stats.star_percentage(6), 0.0);
    }
}
