//! Demo data for the `mise seed` command: the standard nutrient panel,
//! a small glossary tree with per-100g values, a few recipes and
//! approved reviews.

use anyhow::{Context, Result};
use mise_core::store::{NewRecipe, NewReview, NewTerm, Store};
use mise_core::types::{NutrientKind, Reviewer};
use tracing::info;

/// The nutrient panel: name, unit, kind.
const NUTRIENTS: &[(&str, &str, NutrientKind)] = &[
    ("Calories", "kcal", NutrientKind::Macro),
    ("Protein", "g", NutrientKind::Macro),
    ("Carbohydrates", "g", NutrientKind::Macro),
    ("Fat", "g", NutrientKind::Macro),
    ("Saturates", "g", NutrientKind::Macro),
    ("Sugars", "g", NutrientKind::Macro),
    ("Fiber", "g", NutrientKind::Macro),
    ("Salt", "g", NutrientKind::Macro),
    ("Vitamin A", "mcg", NutrientKind::Vitamin),
    ("Vitamin C", "mg", NutrientKind::Vitamin),
    ("Vitamin D", "mcg", NutrientKind::Vitamin),
    ("Vitamin E", "mg", NutrientKind::Vitamin),
    ("Vitamin K", "mcg", NutrientKind::Vitamin),
    ("Vitamin B6", "mg", NutrientKind::Vitamin),
    ("Vitamin B12", "mcg", NutrientKind::Vitamin),
    ("Calcium", "mg", NutrientKind::Mineral),
    ("Iron", "mg", NutrientKind::Mineral),
    ("Magnesium", "mg", NutrientKind::Mineral),
    ("Phosphorus", "mg", NutrientKind::Mineral),
    ("Potassium", "mg", NutrientKind::Mineral),
    ("Sodium", "mg", NutrientKind::Mineral),
    ("Zinc", "mg", NutrientKind::Mineral),
    ("Cholesterol", "mg", NutrientKind::Other),
];

/// Per-100g nutrient values for the demo glossary terms.
const TERM_NUTRITION: &[(&str, &[(&str, f64)])] = &[
    (
        "egg",
        &[
            ("calories", 155.0),
            ("protein", 13.0),
            ("fat", 11.0),
            ("saturates", 3.3),
            ("carbohydrates", 1.1),
            ("vitamin a", 270.0),
            ("vitamin d", 2.0),
            ("vitamin b12", 0.6),
            ("vitamin b6", 0.1),
            ("calcium", 56.0),
            ("iron", 1.8),
            ("magnesium", 12.0),
            ("potassium", 138.0),
            ("sodium", 124.0),
            ("zinc", 1.3),
            ("cholesterol", 372.0),
        ],
    ),
    (
        "milk",
        &[
            ("calories", 42.0),
            ("protein", 3.4),
            ("fat", 1.0),
            ("saturates", 0.6),
            ("carbohydrates", 4.8),
            ("vitamin a", 28.0),
            ("vitamin d", 1.2),
            ("vitamin b12", 0.4),
            ("calcium", 122.0),
            ("phosphorus", 95.0),
            ("potassium", 150.0),
            ("sodium", 44.0),
        ],
    ),
    (
        "rice",
        &[
            ("calories", 130.0),
            ("protein", 2.7),
            ("fat", 0.3),
            ("carbohydrates", 28.0),
            ("fiber", 0.4),
            ("vitamin b6", 0.2),
            ("magnesium", 12.0),
            ("phosphorus", 43.0),
            ("potassium", 35.0),
        ],
    ),
    (
        "chicken",
        &[
            ("calories", 165.0),
            ("protein", 31.0),
            ("fat", 3.6),
            ("saturates", 1.0),
            ("vitamin b6", 0.5),
            ("vitamin b12", 0.3),
            ("zinc", 1.5),
            ("phosphorus", 229.0),
            ("potassium", 256.0),
            ("sodium", 74.0),
        ],
    ),
];

pub fn build_demo_store() -> Result<Store> {
    let mut store = Store::new();

    for (name, unit, kind) in NUTRIENTS {
        store.add_nutrient(name, unit, *kind)?;
    }

    let egg = store.add_term(NewTerm {
        name: "egg".to_string(),
        description: "A chicken egg, the workhorse of the kitchen.".to_string(),
        category: Some("Dairy & Eggs".to_string()),
        ..Default::default()
    })?;
    store.add_term(NewTerm {
        name: "yolk".to_string(),
        description: "The yellow center of an egg.".to_string(),
        parent: Some(egg),
        category: Some("Dairy & Eggs".to_string()),
        ..Default::default()
    })?;
    store.add_term(NewTerm {
        name: "milk".to_string(),
        description: "Whole cow's milk.".to_string(),
        category: Some("Dairy & Eggs".to_string()),
        plural_name: "milk".to_string(),
        ..Default::default()
    })?;
    store.add_term(NewTerm {
        name: "rice".to_string(),
        description: "Cooked white rice.".to_string(),
        category: Some("Grains".to_string()),
        plural_name: "rice".to_string(),
        ..Default::default()
    })?;
    store.add_term(NewTerm {
        name: "chicken".to_string(),
        description: "Skinless chicken breast.".to_string(),
        category: Some("Meat".to_string()),
        ..Default::default()
    })?;
    store.add_term(NewTerm {
        name: "berry".to_string(),
        plural_name: "berries".to_string(),
        description: "Any small soft fruit.".to_string(),
        category: Some("Fruit".to_string()),
        ..Default::default()
    })?;

    for (term_name, values) in TERM_NUTRITION {
        let id = store
            .term_by_name(term_name)
            .map(|t| t.id)
            .with_context(|| format!("demo glossary term {term_name:?} was not seeded"))?;
        for (nutrient_name, value) in *values {
            let nutrient = store
                .nutrients()
                .iter()
                .find(|n| n.name.eq_ignore_ascii_case(nutrient_name))
                .map(|n| n.id)
                .with_context(|| format!("demo nutrient {nutrient_name:?} was not seeded"))?;
            store.set_nutrient_value(id, nutrient, *value)?;
        }
    }

    let fried_rice = store.add_recipe(NewRecipe {
        name: "Egg Fried Rice".to_string(),
        description: "Weeknight fried rice with eggs and leftover rice.".to_string(),
        ingredients_text: "300 [rice]\n2 [egg]\n100 [chicken]".to_string(),
        instructions: "Fry the rice, push aside, scramble the eggs, combine.".to_string(),
        servings: 2,
        ..Default::default()
    })?;
    store.add_recipe(NewRecipe {
        name: "Rice Pudding".to_string(),
        description: "Slow-baked pudding of rice and milk.".to_string(),
        ingredients_text: "# Pudding\n100 [rice]\n500 [milk]\n1 [egg]\n# Topping\n50 [berry]"
            .to_string(),
        instructions: "Bake low and slow, top with berries.".to_string(),
        servings: 4,
        related_recipes: vec![fried_rice],
        ..Default::default()
    })?;

    let review = store.submit_review(NewReview {
        recipe: fried_rice,
        reviewer: Reviewer::Guest {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
        },
        rating: 5,
        text: "Dinner in ten minutes.".to_string(),
    })?;
    store.approve_review(review);
    let review = store.submit_review(NewReview {
        recipe: fried_rice,
        reviewer: Reviewer::User {
            username: "grace".to_string(),
        },
        rating: 4,
        text: "Needed more soy sauce.".to_string(),
    })?;
    store.approve_review(review);
    let reply = store.add_reply(review, "ada", "A splash of sesame oil helps too.")?;
    store.approve_reply(reply);

    info!(
        terms = store.terms().len(),
        nutrients = store.nutrients().len(),
        recipes = store.recipes().len(),
        "built demo store"
    );

    Ok(store)
}
