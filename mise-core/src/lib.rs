pub mod error;
pub mod ingredient_parser;
pub mod linker;
pub mod nutrition;
pub mod pluralize;
pub mod reviews;
pub mod slug;
pub mod store;
pub mod term_index;
pub mod types;

pub use error::StoreError;
pub use ingredient_parser::{
    parse_line, parse_sections, IngredientChoice, IngredientLine, IngredientToken, Section,
};
pub use linker::{render_ingredients, render_line, render_link};
pub use nutrition::{
    aggregate_totals, daily_value, daily_value_percentages, per_serving, recipe_nutrition,
    NutrientTotals, NutritionSummary,
};
pub use pluralize::pluralize;
pub use reviews::ReviewStats;
pub use slug::slugify;
pub use store::{NewRecipe, NewReview, NewTerm, Store};
pub use term_index::{LinkTarget, TargetKind, TermIndex};
pub use types::{
    GlossaryTerm, Nutrient, NutrientId, NutrientKind, NutrientValue, Recipe, RecipeId, ReplyId,
    Review, ReviewId, ReviewReply, Reviewer, TermId,
};
