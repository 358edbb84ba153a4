//! Rendering of ingredient text into linked markup.
//!
//! Takes the lexical output of `ingredient_parser`, resolves bracketed
//! references through a [`TermIndex`], pluralizes glossary terms by
//! quantity and emits HTML fragments. Everything here is presentation
//! formatting; the parser, resolver and pluralizer stay markup-free.

use crate::ingredient_parser::{parse_line, parse_sections, IngredientChoice, IngredientToken};
use crate::pluralize::pluralize;
use crate::term_index::{LinkTarget, TargetKind, TermIndex};
use crate::types::Recipe;

/// Escape text for interpolation into an HTML fragment.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render a resolved target as an anchor fragment. Glossary terms and
/// recipes get distinct CSS classes and tooltip hints.
pub fn render_link(target: &LinkTarget, text: &str) -> String {
    let (class, title) = match target.kind {
        TargetKind::GlossaryTerm => ("glossary-link", "Click to view definition"),
        TargetKind::Recipe => ("recipe-link", "View recipe"),
    };
    format!(
        "<a href=\"{}\" class=\"{}\" data-bs-toggle=\"tooltip\" title=\"{}\">{}</a>",
        escape_html(&target.url),
        class,
        title,
        escape_html(text)
    )
}

/// Render one choice: quantity (default "1"), then each token, with
/// resolved bracketed terms becoming links. Unresolved terms keep their
/// brackets as plain text.
fn render_choice(choice: &IngredientChoice, index: &TermIndex) -> String {
    let quantity = choice.quantity_or_default();
    let mut parts: Vec<String> = vec![choice
        .quantity_raw
        .clone()
        .unwrap_or_else(|| "1".to_string())];

    for token in &choice.tokens {
        match token {
            IngredientToken::Literal(text) => {
                let text = text.trim();
                if !text.is_empty() {
                    parts.push(escape_html(text));
                }
            }
            IngredientToken::Bracketed(inner) => match index.resolve(inner) {
                Some(target) => {
                    let text = match target.kind {
                        TargetKind::Recipe => target.display.clone(),
                        TargetKind::GlossaryTerm => {
                            pluralize(&target.singular, target.plural.as_deref(), quantity)
                        }
                    };
                    parts.push(render_link(target, &text));
                }
                // The bracketed run stays byte-for-byte as written
                None => parts.push(escape_html(&format!("[{inner}]"))),
            },
        }
    }

    parts.join(" ")
}

/// Render one raw ingredient line as a list item.
pub fn render_line(raw: &str, index: &TermIndex) -> String {
    let line = parse_line(raw);
    let rendered: Vec<String> = line
        .choices
        .iter()
        .map(|choice| render_choice(choice, index))
        .collect();
    format!(
        "<li class=\"list-group-item\">{}</li>",
        rendered.join(" or ")
    )
}

/// Render a recipe's full ingredients text: sectioned, linked and
/// pluralized.
pub fn render_ingredients(recipe: &Recipe, index: &TermIndex) -> String {
    let mut html = String::new();

    for section in parse_sections(&recipe.ingredients_text) {
        let mut list = String::from("<ul class=\"list-group ingredients-list\">");
        for line in &section.lines {
            list.push_str(&render_line(line, index));
        }
        list.push_str("</ul>");

        match &section.name {
            Some(name) => {
                html.push_str("<div class=\"ingredient-section\">");
                html.push_str(&format!(
                    "<h5 class=\"ingredient-section-heading\">{}</h5>",
                    escape_html(name)
                ));
                html.push_str(&list);
                html.push_str("</div>");
            }
            None => html.push_str(&list),
        }
    }

    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{NewRecipe, NewTerm, Store};

    fn sample_store() -> Store {
        let mut store = Store::new();
        store
            .add_term(NewTerm {
                name: "egg".to_string(),
                ..Default::default()
            })
            .unwrap();
        store
            .add_term(NewTerm {
                name: "berry".to_string(),
                plural_name: "berries".to_string(),
                ..Default::default()
            })
            .unwrap();
        store
            .add_term(NewTerm {
                name: "flour".to_string(),
                plural_name: "flour".to_string(),
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

    fn index(store: &Store) -> TermIndex {
        TermIndex::build(store, None)
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html("a<b> & \"c\"'"),
            "a&lt;b&gt; &amp; &quot;c&quot;&#x27;"
        );
    }

    #[test]
    fn test_glossary_link_markup() {
        let store = sample_store();
        let html = render_line("1 [egg]", &index(&store));
        assert_eq!(
            html,
            "<li class=\"list-group-item\">1 <a href=\"/glossary/egg/\" \
             class=\"glossary-link\" data-bs-toggle=\"tooltip\" \
             title=\"Click to view definition\">egg</a></li>"
        );
    }

    #[test]
    fn test_recipe_link_markup() {
        let store = sample_store();
        let html = render_line("2 cups [tomato sauce]", &index(&store));
        assert!(html.contains("class=\"recipe-link\""));
        assert!(html.contains("title=\"View recipe\""));
        // Recipe names are never pluralized
        assert!(html.contains(">Tomato Sauce</a>"));
    }

    #[test]
    fn test_quantity_pluralizes_term() {
        let store = sample_store();
        let idx = index(&store);
        assert!(render_line("2 [egg]", &idx).contains(">eggs</a>"));
        assert!(render_line("1 [egg]", &idx).contains(">egg</a>"));
        assert!(render_line("3 [berry]", &idx).contains(">berries</a>"));
    }

    #[test]
    fn test_missing_quantity_renders_one() {
        let store = sample_store();
        let html = render_line("[egg]", &index(&store));
        assert!(html.starts_with("<li class=\"list-group-item\">1 <a"));
    }

    #[test]
    fn test_unresolved_term_stays_bracketed() {
        let store = sample_store();
        let html = render_line("2 [unicorn tears]", &index(&store));
        assert!(html.contains("[unicorn tears]"));
        assert!(!html.contains("<a"));
    }

    #[test]
    fn test_unresolved_term_keeps_inner_padding() {
        let store = sample_store();
        let html = render_line("2 [ dragonfruit ]", &index(&store));
        assert!(html.contains("[ dragonfruit ]"));

        // Padding only affects the fallback text, not resolution
        let html = render_line("2 [ egg ]", &index(&store));
        assert!(html.contains(">eggs</a>"));
    }

    #[test]
    fn test_or_choices_rendered_independently() {
        let store = sample_store();
        let html = render_line("2 [egg] or 1 [egg]", &index(&store));
        assert!(html.contains(">eggs</a> or 1 <a"));
        assert!(html.ends_with(">egg</a></li>"));
    }

    #[test]
    fn test_sectioned_rendering() {
        let mut store = sample_store();
        store
            .add_recipe(NewRecipe {
                name: "Pancakes".to_string(),
                ingredients_text: "# Batter\n2 cups [flour]\n3 [egg]\n# Topping\n1 [berry]"
                    .to_string(),
                servings: 4,
                ..Default::default()
            })
            .unwrap();
        let recipe = store.recipe_by_slug("pancakes").unwrap().clone();
        let idx = TermIndex::build(&store, Some(recipe.id));

        let html = render_ingredients(&recipe, &idx);
        assert_eq!(html.matches("<div class=\"ingredient-section\">").count(), 2);
        assert!(html.contains("<h5 class=\"ingredient-section-heading\">Batter</h5>"));
        assert!(html.contains("<h5 class=\"ingredient-section-heading\">Topping</h5>"));
        assert_eq!(html.matches("<li class=\"list-group-item\">").count(), 3);
        // Explicit plural "flour" suppresses the suffix rule
        assert!(html.contains(">flour</a>"));
    }

    #[test]
    fn test_unnamed_section_has_no_wrapper() {
        let mut store = sample_store();
        store
            .add_recipe(NewRecipe {
                name: "Boiled Egg".to_string(),
                ingredients_text: "1 [egg]".to_string(),
                servings: 1,
                ..Default::default()
            })
            .unwrap();
        let recipe = store.recipe_by_slug("boiled-egg").unwrap().clone();
        let idx = TermIndex::build(&store, Some(recipe.id));

        let html = render_ingredients(&recipe, &idx);
        assert!(html.starts_with("<ul class=\"list-group ingredients-list\">"));
        assert!(!html.contains("ingredient-section"));
    }

    #[test]
    fn test_literal_text_is_escaped() {
        let store = sample_store();
        let html = render_line("2 <b>cups</b> [egg]", &index(&store));
        assert!(html.contains("&lt;b&gt;cups&lt;/b&gt;"));
    }
}
