//! In-memory entity store.
//!
//! Arena-style storage: each entity kind lives in a `Vec` and its id is
//! the index into that vec. The glossary tree is expressed purely with
//! parent pointers; since a term's parent must already exist when the
//! term is inserted and parents are never reassigned, cycles cannot be
//! constructed.
//!
//! The whole store is serde-serializable so callers can snapshot it to
//! a JSON file and reload it.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::reviews::ReviewStats;
use crate::slug::slugify;
use crate::types::{
    GlossaryTerm, Nutrient, NutrientId, NutrientKind, NutrientValue, Recipe, RecipeId, ReplyId,
    Review, ReviewId, ReviewReply, Reviewer, TermId,
};

/// Input for creating a glossary term.
#[derive(Debug, Clone, Default)]
pub struct NewTerm {
    pub name: String,
    /// Defaults to `name` when empty.
    pub singular_name: String,
    /// Defaults to `name` + "s" when empty.
    pub plural_name: String,
    /// Defaults to `slugify(name)` when empty.
    pub slug: String,
    pub description: String,
    pub parent: Option<TermId>,
    pub category: Option<String>,
}

/// Input for creating a recipe.
#[derive(Debug, Clone, Default)]
pub struct NewRecipe {
    pub name: String,
    /// Defaults to `slugify(name)` when empty.
    pub slug: String,
    pub description: String,
    pub ingredients_text: String,
    pub instructions: String,
    pub servings: u32,
    pub related_terms: Vec<TermId>,
    pub related_recipes: Vec<RecipeId>,
}

/// Input for submitting a review.
#[derive(Debug, Clone)]
pub struct NewReview {
    pub recipe: RecipeId,
    pub reviewer: Reviewer,
    pub rating: u8,
    pub text: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Store {
    terms: Vec<GlossaryTerm>,
    recipes: Vec<Recipe>,
    nutrients: Vec<Nutrient>,
    nutrient_values: Vec<NutrientValue>,
    reviews: Vec<Review>,
    replies: Vec<ReviewReply>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    // -------------------------------------------------------------------------
    // Nutrients
    // -------------------------------------------------------------------------

    /// Register a nutrient. Names are unique, compared case-insensitively
    /// since aggregation keys nutrients by lower-cased name.
    pub fn add_nutrient(
        &mut self,
        name: &str,
        unit: &str,
        kind: NutrientKind,
    ) -> Result<NutrientId, StoreError> {
        if self
            .nutrients
            .iter()
            .any(|n| n.name.eq_ignore_ascii_case(name))
        {
            return Err(StoreError::DuplicateNutrientName(name.to_string()));
        }

        let id = NutrientId(self.nutrients.len() as u32);
        self.nutrients.push(Nutrient {
            id,
            name: name.to_string(),
            unit: unit.to_string(),
            kind,
        });
        Ok(id)
    }

    pub fn nutrient(&self, id: NutrientId) -> Option<&Nutrient> {
        self.nutrients.get(id.0 as usize)
    }

    pub fn nutrients(&self) -> &[Nutrient] {
        &self.nutrients
    }

    /// Record a per-100-unit nutrient value for a term, replacing any
    /// previous value for the same (term, nutrient) pair.
    pub fn set_nutrient_value(
        &mut self,
        term: TermId,
        nutrient: NutrientId,
        value: f64,
    ) -> Result<(), StoreError> {
        if self.term(term).is_none() {
            return Err(StoreError::UnknownTerm(term));
        }
        if self.nutrient(nutrient).is_none() {
            return Err(StoreError::UnknownNutrient(nutrient));
        }

        if let Some(existing) = self
            .nutrient_values
            .iter_mut()
            .find(|v| v.term == term && v.nutrient == nutrient)
        {
            existing.value = value;
        } else {
            self.nutrient_values.push(NutrientValue {
                term,
                nutrient,
                value,
            });
        }
        Ok(())
    }

    /// All recorded (nutrient, value-per-100) pairs for a term.
    pub fn nutrient_values_for(
        &self,
        term: TermId,
    ) -> impl Iterator<Item = (&Nutrient, f64)> + '_ {
        self.nutrient_values
            .iter()
            .filter(move |v| v.term == term)
            .filter_map(|v| self.nutrient(v.nutrient).map(|n| (n, v.value)))
    }

    // -------------------------------------------------------------------------
    // Glossary terms
    // -------------------------------------------------------------------------

    pub fn add_term(&mut self, new: NewTerm) -> Result<TermId, StoreError> {
        if let Some(parent) = new.parent {
            if self.term(parent).is_none() {
                return Err(StoreError::UnknownTerm(parent));
            }
        }

        let slug = if new.slug.is_empty() {
            slugify(&new.name)
        } else {
            new.slug
        };
        if self.terms.iter().any(|t| t.slug == slug) {
            return Err(StoreError::DuplicateSlug(slug));
        }

        let singular_name = if new.singular_name.is_empty() {
            new.name.clone()
        } else {
            new.singular_name
        };
        let plural_name = if new.plural_name.is_empty() {
            format!("{}s", new.name)
        } else {
            new.plural_name
        };

        let now = Utc::now();
        let id = TermId(self.terms.len() as u32);
        self.terms.push(GlossaryTerm {
            id,
            name: new.name,
            singular_name,
            plural_name,
            slug,
            description: new.description,
            parent: new.parent,
            category: new.category,
            created_at: now,
            updated_at: now,
        });
        Ok(id)
    }

    pub fn term(&self, id: TermId) -> Option<&GlossaryTerm> {
        self.terms.get(id.0 as usize)
    }

    pub fn terms(&self) -> &[GlossaryTerm] {
        &self.terms
    }

    /// Exact case-insensitive lookup by canonical name.
    pub fn term_by_name(&self, name: &str) -> Option<&GlossaryTerm> {
        let needle = name.trim().to_lowercase();
        self.terms.iter().find(|t| t.name.to_lowercase() == needle)
    }

    pub fn term_by_slug(&self, slug: &str) -> Option<&GlossaryTerm> {
        self.terms.iter().find(|t| t.slug == slug)
    }

    /// Direct children of a term, in insertion order.
    pub fn children(&self, id: TermId) -> Vec<&GlossaryTerm> {
        self.terms
            .iter()
            .filter(|t| t.parent == Some(id))
            .collect()
    }

    /// Terms with no parent, in insertion order.
    pub fn root_terms(&self) -> Vec<&GlossaryTerm> {
        self.terms.iter().filter(|t| t.parent.is_none()).collect()
    }

    /// Walk parent pointers from a term up to its root, nearest first.
    pub fn ancestors(&self, id: TermId) -> Vec<&GlossaryTerm> {
        let mut out = Vec::new();
        let mut cursor = self.term(id).and_then(|t| t.parent);
        while let Some(parent_id) = cursor {
            match self.term(parent_id) {
                Some(parent) => {
                    out.push(parent);
                    cursor = parent.parent;
                }
                None => break,
            }
        }
        out
    }

    /// The term's detail URL, anchored into its parent's page when it
    /// has one.
    pub fn term_url(&self, term: &GlossaryTerm) -> String {
        let parent_slug = term
            .parent
            .and_then(|p| self.term(p))
            .map(|p| p.slug.as_str());
        term.parent_url_with_anchor(parent_slug)
    }

    // -------------------------------------------------------------------------
    // Recipes
    // -------------------------------------------------------------------------

    pub fn add_recipe(&mut self, new: NewRecipe) -> Result<RecipeId, StoreError> {
        if new.servings == 0 {
            return Err(StoreError::InvalidServings);
        }
        for term in &new.related_terms {
            if self.term(*term).is_none() {
                return Err(StoreError::UnknownTerm(*term));
            }
        }
        for recipe in &new.related_recipes {
            if self.recipe(*recipe).is_none() {
                return Err(StoreError::UnknownRecipe(*recipe));
            }
        }

        let slug = if new.slug.is_empty() {
            slugify(&new.name)
        } else {
            new.slug
        };
        if self.recipes.iter().any(|r| r.slug == slug) {
            return Err(StoreError::DuplicateSlug(slug));
        }

        let now = Utc::now();
        let id = RecipeId(self.recipes.len() as u32);
        self.recipes.push(Recipe {
            id,
            name: new.name,
            slug,
            description: new.description,
            ingredients_text: new.ingredients_text,
            instructions: new.instructions,
            servings: new.servings,
            related_terms: new.related_terms,
            related_recipes: new.related_recipes,
            created_at: now,
            updated_at: now,
        });
        Ok(id)
    }

    pub fn recipe(&self, id: RecipeId) -> Option<&Recipe> {
        self.recipes.get(id.0 as usize)
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn recipe_by_slug(&self, slug: &str) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.slug == slug)
    }

    /// Recipes whose ingredients reference the term in brackets, or
    /// whose description mentions either of its display forms.
    /// Substring match, case-insensitive.
    pub fn recipes_mentioning(&self, id: TermId) -> Vec<&Recipe> {
        let Some(term) = self.term(id) else {
            return Vec::new();
        };

        let singular_ref = format!("[{}]", term.singular_name).to_lowercase();
        let plural_ref = format!("[{}]", term.plural_name).to_lowercase();
        let singular = term.singular_name.to_lowercase();
        let plural = term.plural_name.to_lowercase();

        self.recipes
            .iter()
            .filter(|r| {
                let ingredients = r.ingredients_text.to_lowercase();
                let description = r.description.to_lowercase();
                ingredients.contains(&singular_ref)
                    || ingredients.contains(&plural_ref)
                    || description.contains(&singular)
                    || description.contains(&plural)
            })
            .collect()
    }

    // -------------------------------------------------------------------------
    // Reviews
    // -------------------------------------------------------------------------

    /// Submit a review. One review per (recipe, user) and per
    /// (recipe, guest email): a repeat submission updates the existing
    /// review in place and resets its approval flag.
    pub fn submit_review(&mut self, new: NewReview) -> Result<ReviewId, StoreError> {
        if self.recipe(new.recipe).is_none() {
            return Err(StoreError::UnknownRecipe(new.recipe));
        }
        if !(1..=5).contains(&new.rating) {
            return Err(StoreError::InvalidRating(new.rating));
        }
        if let Reviewer::Guest { name, email } = &new.reviewer {
            if name.is_empty() || email.is_empty() {
                return Err(StoreError::MissingGuestIdentity);
            }
        }

        let existing = self.reviews.iter_mut().find(|r| {
            r.recipe == new.recipe && same_reviewer(&r.reviewer, &new.reviewer)
        });

        if let Some(review) = existing {
            review.rating = new.rating;
            review.text = new.text;
            review.reviewer = new.reviewer;
            review.is_approved = false;
            review.updated_at = Utc::now();
            return Ok(review.id);
        }

        let now = Utc::now();
        let id = ReviewId(self.reviews.len() as u32);
        self.reviews.push(Review {
            id,
            recipe: new.recipe,
            reviewer: new.reviewer,
            rating: new.rating,
            text: new.text,
            is_approved: false,
            created_at: now,
            updated_at: now,
        });
        Ok(id)
    }

    pub fn review(&self, id: ReviewId) -> Option<&Review> {
        self.reviews.get(id.0 as usize)
    }

    pub fn approve_review(&mut self, id: ReviewId) -> bool {
        match self.reviews.get_mut(id.0 as usize) {
            Some(review) => {
                review.is_approved = true;
                review.updated_at = Utc::now();
                true
            }
            None => false,
        }
    }

    /// Approved reviews for a recipe, newest first.
    pub fn approved_reviews(&self, recipe: RecipeId) -> Vec<&Review> {
        let mut reviews: Vec<&Review> = self
            .reviews
            .iter()
            .filter(|r| r.recipe == recipe && r.is_approved)
            .collect();
        reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        reviews
    }

    /// Average/count/star-histogram over approved reviews.
    pub fn review_stats(&self, recipe: RecipeId) -> ReviewStats {
        ReviewStats::compute(
            self.reviews
                .iter()
                .filter(|r| r.recipe == recipe && r.is_approved),
        )
    }

    /// Post a reply under a review. Replies start unapproved, like
    /// reviews.
    pub fn add_reply(
        &mut self,
        review: ReviewId,
        username: &str,
        text: &str,
    ) -> Result<ReplyId, StoreError> {
        if self.review(review).is_none() {
            return Err(StoreError::UnknownReview(review));
        }
        let id = ReplyId(self.replies.len() as u32);
        self.replies.push(ReviewReply {
            id,
            review,
            username: username.to_string(),
            text: text.to_string(),
            is_approved: false,
            created_at: Utc::now(),
        });
        Ok(id)
    }

    pub fn reply(&self, id: ReplyId) -> Option<&ReviewReply> {
        self.replies.get(id.0 as usize)
    }

    pub fn approve_reply(&mut self, id: ReplyId) -> bool {
        match self.replies.get_mut(id.0 as usize) {
            Some(reply) => {
                reply.is_approved = true;
                true
            }
            None => false,
        }
    }

    /// Approved replies under a review, oldest first.
    pub fn approved_replies(&self, review: ReviewId) -> Vec<&ReviewReply> {
        let mut replies: Vec<&ReviewReply> = self
            .replies
            .iter()
            .filter(|r| r.review == review && r.is_approved)
            .collect();
        replies.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        replies
    }
}

/// Two reviews belong to the same reviewer when they share a username,
/// or (for guests) the same email regardless of display name.
fn same_reviewer(a: &Reviewer, b: &Reviewer) -> bool {
    match (a, b) {
        (Reviewer::User { username: ua }, Reviewer::User { username: ub }) => ua == ub,
        (Reviewer::Guest { email: ea, .. }, Reviewer::Guest { email: eb, .. }) => ea == eb,
        _ => false,
    }
}
