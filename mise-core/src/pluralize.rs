//! Quantity-aware singular/plural selection for glossary terms.

/// Pick the display form for a term given its quantity.
///
/// Quantities of 1 or less (including fractional amounts like 0.5)
/// always use the singular. Above 1, an explicitly declared plural wins;
/// otherwise suffix rules apply: "berry" -> "berries", "glass" ->
/// "glasses", "egg" -> "eggs".
pub fn pluralize<'a>(singular: &'a str, plural: Option<&'a str>, quantity: f64) -> String {
    if quantity <= 1.0 {
        return singular.to_string();
    }

    match plural {
        Some(p) if !p.is_empty() => p.to_string(),
        _ => fallback_plural(singular),
    }
}

/// Suffix-rule pluralization for terms without a declared plural form.
fn fallback_plural(singular: &str) -> String {
    if let Some(stem) = singular.strip_suffix('y') {
        format!("{stem}ies")
    } else if singular.ends_with('s') {
        format!("{singular}es")
    } else {
        format!("{singular}s")
    }
}
