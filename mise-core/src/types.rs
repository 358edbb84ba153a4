use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Arena index of a glossary term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TermId(pub u32);

/// Arena index of a recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecipeId(pub u32);

/// Arena index of a nutrient definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NutrientId(pub u32);

/// Arena index of a review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReviewId(pub u32);

/// Arena index of a review reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReplyId(pub u32);

/// Broad classification of a nutrient
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NutrientKind {
    Macro,
    Micro,
    Vitamin,
    Mineral,
    Other,
}

impl NutrientKind {
    pub const ALL: &'static [NutrientKind] = &[
        NutrientKind::Macro,
        NutrientKind::Micro,
        NutrientKind::Vitamin,
        NutrientKind::Mineral,
        NutrientKind::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NutrientKind::Macro => "macro",
            NutrientKind::Micro => "micro",
            NutrientKind::Vitamin => "vitamin",
            NutrientKind::Mineral => "mineral",
            NutrientKind::Other => "other",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "macro" => Some(NutrientKind::Macro),
            "micro" => Some(NutrientKind::Micro),
            "vitamin" => Some(NutrientKind::Vitamin),
            "mineral" => Some(NutrientKind::Mineral),
            "other" => Some(NutrientKind::Other),
            _ => None,
        }
    }
}

/// A nutrient definition (e.g. "Calories" measured in kcal).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Nutrient {
    pub id: NutrientId,
    /// Unique across the store.
    pub name: String,
    /// Unit of measurement (kcal, g, mg, mcg).
    pub unit: String,
    pub kind: NutrientKind,
}

/// A glossary term: a definable ingredient or equipment concept.
///
/// Terms form a tree via `parent`. The tree is an arena of nodes indexed
/// by [`TermId`] with parent pointers; nodes never own their children,
/// and parent ids are validated at insert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlossaryTerm {
    pub id: TermId,
    pub name: String,
    /// Singular display form. Defaults to `name` when left blank.
    pub singular_name: String,
    /// Plural display form. Defaults to `name` + "s" when left blank.
    pub plural_name: String,
    /// Unique across the store.
    pub slug: String,
    pub description: String,
    pub parent: Option<TermId>,
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl GlossaryTerm {
    /// Detail URL for this term.
    pub fn url(&self) -> String {
        format!("/glossary/{}/", self.slug)
    }

    /// URL of the parent term's detail page anchored at this term, or
    /// this term's own detail URL when it has no parent.
    pub fn parent_url_with_anchor(&self, parent_slug: Option<&str>) -> String {
        match parent_slug {
            Some(slug) => format!("/glossary/{}/#ing_{}", slug, self.id.0),
            None => self.url(),
        }
    }
}

/// A recorded nutrient value for a glossary term, per 100 reference
/// units. Unique per (term, nutrient).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NutrientValue {
    pub term: TermId,
    pub nutrient: NutrientId,
    pub value: f64,
}

/// A recipe with free-form sectioned ingredients text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    pub id: RecipeId,
    pub name: String,
    /// Unique across the store.
    pub slug: String,
    pub description: String,
    /// Lines of ingredients; `# Heading` opens a section, `[term]`
    /// marks a glossary/recipe reference.
    pub ingredients_text: String,
    pub instructions: String,
    /// Always > 0, enforced at insert.
    pub servings: u32,
    pub related_terms: Vec<TermId>,
    /// Asymmetric: A listing B does not imply B listing A.
    pub related_recipes: Vec<RecipeId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Recipe {
    pub fn url(&self) -> String {
        format!("/recipes/{}/", self.slug)
    }
}

/// Who wrote a review: a registered user or a guest leaving name+email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reviewer {
    User { username: String },
    Guest { name: String, email: String },
}

/// A rating+text review of a recipe. Hidden until approved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub id: ReviewId,
    pub recipe: RecipeId,
    pub reviewer: Reviewer,
    /// 1 through 5, enforced at insert.
    pub rating: u8,
    pub text: String,
    pub is_approved: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Review {
    /// Display name for the reviewer.
    pub fn reviewer_name(&self) -> &str {
        match &self.reviewer {
            Reviewer::User { username } => username,
            Reviewer::Guest { name, .. } => {
                if name.is_empty() {
                    "Anonymous"
                } else {
                    name
                }
            }
        }
    }
}

/// A reply posted under a review. Hidden until approved, like the
/// review it belongs to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewReply {
    pub id: ReplyId,
    pub review: ReviewId,
    pub username: String,
    pub text: String,
    pub is_approved: bool,
    pub created_at: DateTime<Utc>,
}
