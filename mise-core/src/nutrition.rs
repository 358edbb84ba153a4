//! Nutrition aggregation over an ingredient list.
//!
//! A pure fold: each ingredient part contributes `value/100 * quantity`
//! for every nutrient value recorded on its glossary term. Names that
//! don't resolve to a glossary term contribute nothing; there is no
//! error path. Reference daily values (per adult per day) are embedded
//! from `data/daily_values.json`.

use std::collections::{BTreeMap, HashMap};
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ingredient_parser::extract_quantity;
use crate::store::Store;
use crate::types::Recipe;

/// Embedded reference daily-value table.
static DAILY_VALUES_JSON: &str = include_str!("data/daily_values.json");

#[derive(Deserialize)]
struct DailyValueFile {
    daily_values: HashMap<String, f64>,
}

static DAILY_VALUES: LazyLock<HashMap<String, f64>> = LazyLock::new(|| {
    let file: DailyValueFile =
        serde_json::from_str(DAILY_VALUES_JSON).expect("daily_values.json should be valid JSON");
    file.daily_values
});

/// Reference daily intake for a nutrient, if it is in the table.
/// Keys are lower-cased nutrient names.
pub fn daily_value(nutrient: &str) -> Option<f64> {
    DAILY_VALUES.get(nutrient).copied()
}

/// Nutrient totals keyed by lower-cased nutrient name. Every nutrient
/// known to the store appears, zero-valued when nothing contributed.
pub type NutrientTotals = BTreeMap<String, f64>;

/// Full nutrition breakdown for a recipe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NutritionSummary {
    /// Whole-recipe totals.
    pub totals: NutrientTotals,
    /// Totals divided by the recipe's serving count.
    pub per_serving: NutrientTotals,
    /// Each total as a percentage of its reference daily value; 0 for
    /// nutrients missing from the reference table.
    pub daily_value_percentages: NutrientTotals,
}

/// Sum nutrient contributions across an ingredients text.
///
/// Per part (after `" or "` splitting): the leading quantity defaults
/// to 1, the remainder is stripped of brackets and spaces and matched
/// case-insensitively against glossary term names. Recipes never carry
/// nutrient values, so recipe references are skipped along with
/// everything else that doesn't match.
pub fn aggregate_totals(store: &Store, ingredients_text: &str) -> NutrientTotals {
    let mut totals: NutrientTotals = store
        .nutrients()
        .iter()
        .map(|n| (n.name.to_lowercase(), 0.0))
        .collect();

    for line in ingredients_text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        for part in line.split(" or ") {
            let (quantity_raw, rest) = extract_quantity(part.trim());
            let quantity = quantity_raw
                .as_deref()
                .and_then(|q| q.parse::<f64>().ok())
                .unwrap_or(1.0);

            let name = rest
                .trim_matches(|c| c == '[' || c == ']' || c == ' ')
                .to_lowercase();
            if name.is_empty() {
                continue;
            }

            let Some(term) = store.term_by_name(&name) else {
                debug!(ingredient = %name, "no glossary match, skipping");
                continue;
            };

            for (nutrient, value) in store.nutrient_values_for(term.id) {
                *totals.entry(nutrient.name.to_lowercase()).or_insert(0.0) +=
                    value / 100.0 * quantity;
            }
        }
    }

    totals
}

/// Divide totals by the serving count. Servings are validated to be
/// non-zero when the recipe is stored.
pub fn per_serving(totals: &NutrientTotals, servings: u32) -> NutrientTotals {
    totals
        .iter()
        .map(|(name, value)| (name.clone(), value / f64::from(servings)))
        .collect()
}

/// Express each total as a percentage of its reference daily value.
pub fn daily_value_percentages(totals: &NutrientTotals) -> NutrientTotals {
    totals
        .iter()
        .map(|(name, value)| {
            let percent = match daily_value(name) {
                Some(dv) => value / dv * 100.0,
                None => 0.0,
            };
            (name.clone(), percent)
        })
        .collect()
}

/// Compute the full breakdown for a stored recipe.
pub fn recipe_nutrition(store: &Store, recipe: &Recipe) -> NutritionSummary {
    let totals = aggregate_totals(store, &recipe.ingredients_text);
    NutritionSummary {
        per_serving: per_serving(&totals, recipe.servings),
        daily_value_percentages: daily_value_percentages(&totals),
        totals,
    }
}
