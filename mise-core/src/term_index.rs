//! Name index for resolving bracketed references.
//!
//! Glossary terms and recipe titles share one flat namespace keyed by
//! trimmed, lower-cased name. Glossary entries are inserted first and
//! recipe entries second, so a recipe whose title collides with a term
//! name shadows the term. That precedence is load-bearing and must not
//! be reordered; see DESIGN.md.

use std::collections::HashMap;

use tracing::debug;

use crate::store::Store;
use crate::types::RecipeId;

/// What a resolved name points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    GlossaryTerm,
    Recipe,
}

/// A resolved link target.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkTarget {
    /// Canonical display name (the term or recipe name as stored).
    pub display: String,
    /// Singular form; same as `display` for recipes.
    pub singular: String,
    /// Declared plural form, when the target is a glossary term and
    /// one exists.
    pub plural: Option<String>,
    /// Detail URL (parent-anchored for child glossary terms).
    pub url: String,
    pub kind: TargetKind,
}

/// Case-insensitive name -> target mapping over a store snapshot.
#[derive(Debug, Clone, Default)]
pub struct TermIndex {
    entries: HashMap<String, LinkTarget>,
}

impl TermIndex {
    /// Build the index from every glossary term plus every recipe other
    /// than `current` (a recipe never links to itself).
    pub fn build(store: &Store, current: Option<RecipeId>) -> Self {
        let mut entries = HashMap::new();

        for term in store.terms() {
            entries.insert(
                term.name.trim().to_lowercase(),
                LinkTarget {
                    display: term.name.clone(),
                    singular: term.singular_name.clone(),
                    plural: if term.plural_name.is_empty() {
                        None
                    } else {
                        Some(term.plural_name.clone())
                    },
                    url: store.term_url(term),
                    kind: TargetKind::GlossaryTerm,
                },
            );
        }

        // Recipe titles go in last and win name collisions
        for recipe in store.recipes() {
            if Some(recipe.id) == current {
                continue;
            }
            entries.insert(
                recipe.name.trim().to_lowercase(),
                LinkTarget {
                    display: recipe.name.clone(),
                    singular: recipe.name.clone(),
                    plural: None,
                    url: recipe.url(),
                    kind: TargetKind::Recipe,
                },
            );
        }

        Self { entries }
    }

    /// Exact match on trimmed, lower-cased text. No fuzzy matching.
    pub fn resolve(&self, name: &str) -> Option<&LinkTarget> {
        let key = name.trim().to_lowercase();
        let target = self.entries.get(&key);
        debug!(term = %key, resolved = target.is_some(), "resolving bracketed term");
        target
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{NewRecipe, NewTerm};

    fn sample_store() -> Store {
        let mut store = Store::new();
        store
            .add_term(NewTerm {
                name: "Egg".to_string(),
                ..Default::default()
            })
            .unwrap();
        store
            .add_recipe(NewRecipe {
                name: "Tomato Sauce".to_string(),
                servings: 4,
                ..Default::default()
            })
            .unwrap();
        store
    }

    #[test]
    fn test_resolves_terms_and_recipes() {
        let store = sample_store();
        let index = TermIndex::build(&store, None);

        let egg = index.resolve("egg").unwrap();
        assert_eq!(egg.kind, TargetKind::GlossaryTerm);
        assert_eq!(egg.display, "Egg");
        assert_eq!(egg.url, "/glossary/egg/");

        let sauce = index.resolve("  tomato sauce ").unwrap();
        assert_eq!(sauce.kind, TargetKind::Recipe);
        assert_eq!(sauce.url, "/recipes/tomato-sauce/");
    }

    #[test]
    fn test_no_fuzzy_matching() {
        let store = sample_store();
        let index = TermIndex::build(&store, None);
        assert!(index.resolve("eggs").is_none());
        assert!(index.resolve("tomato").is_none());
    }

    #[test]
    fn test_current_recipe_excluded() {
        let store = sample_store();
        let sauce = store.recipe_by_slug("tomato-sauce").unwrap().id;
        let index = TermIndex::build(&store, Some(sauce));
        assert!(index.resolve("tomato sauce").is_none());
        assert!(index.resolve("egg").is_some());
    }

    #[test]
    fn test_recipe_shadows_term_on_collision() {
        let mut store = Store::new();
        store
            .add_term(NewTerm {
                name: "Pesto".to_string(),
                ..Default::default()
            })
            .unwrap();
        store
            .add_recipe(NewRecipe {
                name: "pesto".to_string(),
                slug: "pesto-recipe".to_string(),
                servings: 2,
                ..Default::default()
            })
            .unwrap();

        let index = TermIndex::build(&store, None);
        let target = index.resolve("pesto").unwrap();
        assert_eq!(target.kind, TargetKind::Recipe);
        assert_eq!(target.url, "/recipes/pesto-recipe/");
    }

    #[test]
    fn test_child_term_urls_are_parent_anchored() {
        let mut store = Store::new();
        let egg = store
            .add_term(NewTerm {
                name: "egg".to_string(),
                ..Default::default()
            })
            .unwrap();
        let yolk = store
            .add_term(NewTerm {
                name: "yolk".to_string(),
                parent: Some(egg),
                ..Default::default()
            })
            .unwrap();

        let index = TermIndex::build(&store, None);
        assert_eq!(
            index.resolve("yolk").unwrap().url,
            format!("/glossary/egg/#ing_{}", yolk.0)
        );
    }
}
