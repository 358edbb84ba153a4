use thiserror::Error;

use crate::types::{NutrientId, RecipeId, ReviewId, TermId};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Duplicate slug: {0}")]
    DuplicateSlug(String),

    #[error("Duplicate nutrient name: {0}")]
    DuplicateNutrientName(String),

    #[error("Unknown glossary term id: {0:?}")]
    UnknownTerm(TermId),

    #[error("Unknown recipe id: {0:?}")]
    UnknownRecipe(RecipeId),

    #[error("Unknown nutrient id: {0:?}")]
    UnknownNutrient(NutrientId),

    #[error("Unknown review id: {0:?}")]
    UnknownReview(ReviewId),

    #[error("Servings must be greater than zero")]
    InvalidServings,

    #[error("Rating must be between 1 and 5, got {0}")]
    InvalidRating(u8),

    #[error("Guest reviews require a name and email")]
    MissingGuestIdentity,
}
