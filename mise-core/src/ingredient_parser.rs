//! Ingredient text parsing.
//!
//! Parses free-form ingredients text (e.g. "2 cups [flour]") into
//! sections, alternative choices, quantities, and bracketed glossary
//! references. Resolution of the references happens in `term_index`;
//! this module is purely lexical.

use serde::{Deserialize, Serialize};

/// A named (or implicit unnamed) group of ingredient lines.
///
/// A line starting with `#` opens a section whose name is the rest of
/// the line. Lines before the first header land in an unnamed section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub name: Option<String>,
    pub lines: Vec<String>,
}

/// One lexical token of an ingredient choice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IngredientToken {
    /// Literal text, including any unmatched bracket characters.
    Literal(String),
    /// The inner text of a matched `[term]` reference, brackets stripped.
    Bracketed(String),
}

/// One alternative within an ingredient line ("2 [egg] or 1 [duck egg]"
/// has two choices).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientChoice {
    /// Parsed leading quantity, if the choice started with one.
    pub quantity: Option<f64>,
    /// The quantity exactly as typed ("2", "0.5").
    pub quantity_raw: Option<String>,
    pub tokens: Vec<IngredientToken>,
}

impl IngredientChoice {
    /// Quantity with the default applied: a missing or malformed
    /// leading number counts as 1.
    pub fn quantity_or_default(&self) -> f64 {
        self.quantity.unwrap_or(1.0)
    }
}

/// A fully decomposed ingredient line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientLine {
    pub raw: String,
    pub choices: Vec<IngredientChoice>,
}

/// Exact separator between alternative choices. Lowercase, spaces on
/// both sides; "OR" or "...or," do not split.
const CHOICE_SEPARATOR: &str = " or ";

/// Split ingredients text into sections.
///
/// Blank lines are ignored. A section (named or unnamed) is only
/// emitted if it collected at least one ingredient line, so a header
/// directly followed by another header produces nothing.
pub fn parse_sections(text: &str) -> Vec<Section> {
    let mut sections = Vec::new();
    let mut current = Section {
        name: None,
        lines: Vec::new(),
    };

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(rest) = line.strip_prefix('#') {
            let name = rest.trim();
            if name.is_empty() {
                // A bare "#" is not a header, keep it as an ingredient line
                current.lines.push(line.to_string());
                continue;
            }
            if !current.lines.is_empty() {
                sections.push(current);
            }
            current = Section {
                name: Some(name.to_string()),
                lines: Vec::new(),
            };
        } else {
            current.lines.push(line.to_string());
        }
    }

    if !current.lines.is_empty() {
        sections.push(current);
    }

    sections
}

/// Parse a single ingredient line into its alternative choices.
pub fn parse_line(raw: &str) -> IngredientLine {
    let choices = raw
        .split(CHOICE_SEPARATOR)
        .map(|part| parse_choice(part.trim()))
        .collect();

    IngredientLine {
        raw: raw.to_string(),
        choices,
    }
}

/// Parse one choice: an optional leading quantity, then tokens.
pub fn parse_choice(part: &str) -> IngredientChoice {
    let part = part.trim();
    let (quantity_raw, rest) = extract_quantity(part);
    let quantity = quantity_raw.as_deref().and_then(|q| q.parse::<f64>().ok());

    IngredientChoice {
        quantity,
        quantity_raw,
        tokens: tokenize(rest.trim_start()),
    }
}

/// Extract a leading quantity (`\d+(\.\d+)?`) from a choice.
/// Returns (quantity string, remaining text). Anything that is not a
/// plain integer or decimal at the very start is left alone.
pub(crate) fn extract_quantity(s: &str) -> (Option<String>, &str) {
    let bytes = s.as_bytes();
    let mut end = 0;

    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end == 0 {
        return (None, s);
    }

    // Optional fractional part; a trailing dot without digits stays in
    // the remainder ("2." parses as quantity 2, remainder ".").
    if end < bytes.len() && bytes[end] == b'.' {
        let mut frac_end = end + 1;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if frac_end > end + 1 {
            end = frac_end;
        }
    }

    (Some(s[..end].to_string()), &s[end..])
}

/// Split choice text into literal runs and `[bracketed]` references.
///
/// A `[` with no closing `]` is kept verbatim in the literal run.
pub fn tokenize(text: &str) -> Vec<IngredientToken> {
    let mut tokens = Vec::new();
    let mut literal = String::new();
    let mut rest = text;

    while let Some(open) = rest.find('[') {
        match rest[open..].find(']') {
            Some(close) => {
                literal.push_str(&rest[..open]);
                if !literal.is_empty() {
                    tokens.push(IngredientToken::Literal(std::mem::take(&mut literal)));
                }
                tokens.push(IngredientToken::Bracketed(
                    rest[open + 1..open + close].to_string(),
                ));
                rest = &rest[open + close + 1..];
            }
            None => {
                // Unmatched bracket: swallow it into the literal run
                literal.push_str(&rest[..=open]);
                rest = &rest[open + 1..];
            }
        }
    }

    literal.push_str(rest);
    if !literal.is_empty() {
        tokens.push(IngredientToken::Literal(literal));
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bracketed(s: &str) -> IngredientToken {
        IngredientToken::Bracketed(s.to_string())
    }

    fn literal(s: &str) -> IngredientToken {
        IngredientToken::Literal(s.to_string())
    }

    #[test]
    fn test_sections_with_headers() {
        let text = "# Dough\n2 cups [flour]\n1 [egg]\n\n# Topping\n1 [tomato]";
        let sections = parse_sections(text);
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].name.as_deref(), Some("Dough"));
        assert_eq!(sections[0].lines, vec!["2 cups [flour]", "1 [egg]"]);
        assert_eq!(sections[1].name.as_deref(), Some("Topping"));
        assert_eq!(sections[1].lines, vec!["1 [tomato]"]);
    }

    #[test]
    fn test_implicit_unnamed_section() {
        let sections = parse_sections("1 [egg]\n# Sauce\n2 [tomato]");
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].name, None);
        assert_eq!(sections[0].lines, vec!["1 [egg]"]);
        assert_eq!(sections[1].name.as_deref(), Some("Sauce"));
    }

    #[test]
    fn test_empty_sections_not_emitted() {
        // Header with no ingredients under it disappears
        let sections = parse_sections("# Dough\n# Filling\n1 [apple]");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].name.as_deref(), Some("Filling"));

        assert!(parse_sections("").is_empty());
        assert!(parse_sections("\n\n# Only A Header\n\n").is_empty());
    }

    #[test]
    fn test_blank_lines_ignored() {
        let sections = parse_sections("\n1 [egg]\n\n\n2 [tomato]\n");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].lines.len(), 2);
    }

    #[test]
    fn test_parse_line_quantity_and_tokens() {
        let line = parse_line("2 cups [flour]");
        assert_eq!(line.choices.len(), 1);
        let choice = &line.choices[0];
        assert_eq!(choice.quantity, Some(2.0));
        assert_eq!(choice.quantity_raw.as_deref(), Some("2"));
        assert_eq!(choice.tokens, vec![literal("cups "), bracketed("flour")]);
    }

    #[test]
    fn test_parse_line_decimal_quantity() {
        let line = parse_line("0.5 cup [milk]");
        assert_eq!(line.choices[0].quantity, Some(0.5));
        assert_eq!(line.choices[0].quantity_raw.as_deref(), Some("0.5"));
    }

    #[test]
    fn test_parse_line_no_quantity_defaults_to_one() {
        let line = parse_line("[salt] to taste");
        let choice = &line.choices[0];
        assert_eq!(choice.quantity, None);
        assert_eq!(choice.quantity_or_default(), 1.0);
        assert_eq!(choice.tokens, vec![bracketed("salt"), literal(" to taste")]);
    }

    #[test]
    fn test_parse_line_malformed_quantity_treated_as_text() {
        let line = parse_line("a few [olive]s");
        assert_eq!(line.choices[0].quantity, None);
        assert_eq!(
            line.choices[0].tokens,
            vec![literal("a few "), bracketed("olive"), literal("s")]
        );
    }

    #[test]
    fn test_or_splits_choices() {
        let line = parse_line("2 [egg] or 1 [duck egg]");
        assert_eq!(line.choices.len(), 2);
        assert_eq!(line.choices[0].quantity, Some(2.0));
        assert_eq!(line.choices[0].tokens, vec![bracketed("egg")]);
        assert_eq!(line.choices[1].quantity, Some(1.0));
        assert_eq!(line.choices[1].tokens, vec![bracketed("duck egg")]);
    }

    #[test]
    fn test_or_requires_surrounding_spaces() {
        let line = parse_line("1 [coriander]");
        assert_eq!(line.choices.len(), 1);

        // "orange" contains "or" but must not split
        let line = parse_line("1 [orange]");
        assert_eq!(line.choices.len(), 1);
        assert_eq!(line.choices[0].tokens, vec![bracketed("orange")]);
    }

    #[test]
    fn test_unmatched_bracket_stays_literal() {
        assert_eq!(tokenize("2 cups [flour"), vec![literal("2 cups [flour")]);
        assert_eq!(
            tokenize("odd ] text [milk]"),
            vec![literal("odd ] text "), bracketed("milk")]
        );
    }

    #[test]
    fn test_tokenize_multiple_brackets() {
        assert_eq!(
            tokenize("[flour] and [egg]"),
            vec![
                bracketed("flour"),
                literal(" and "),
                bracketed("egg"),
            ]
        );
    }

    #[test]
    fn test_round_trip_two_lines() {
        let sections = parse_sections("2 cups [flour]\n1 [egg]");
        assert_eq!(sections.len(), 1);
        let lines: Vec<IngredientLine> =
            sections[0].lines.iter().map(|l| parse_line(l)).collect();
        assert_eq!(lines[0].choices[0].quantity, Some(2.0));
        assert_eq!(lines[1].choices[0].quantity, Some(1.0));
        assert_eq!(
            lines[0].choices[0].tokens.last(),
            Some(&bracketed("flour"))
        );
        assert_eq!(lines[1].choices[0].tokens, vec![bracketed("egg")]);
    }
}
