//! Label-text helpers: stripping side prefixes for aggregation and a small
//! pluralizer for the "How many {label}s?" bonus flashcards.

/// Strip a leading "paternal "/"maternal " side prefix and a trailing
/// "(by marriage)" qualifier, so "paternal grandparent" and "maternal
/// grandparent" aggregate under the same base label.
pub fn base_label(label: &str) -> String {
    let mut s = label;
    for side in ["paternal ", "maternal "] {
        if let Some(stripped) = s.strip_prefix(side) {
            s = stripped;
            break;
        }
    }
    if let Some(stripped) = s.strip_suffix(" (by marriage)") {
        s = stripped;
    }
    s.to_string()
}

/// Pluralize a base relationship label for aggregate question text.
pub fn pluralize(label: &str) -> String {
    match label {
        "parent" => "parents".to_string(),
        "sibling" => "siblings".to_string(),
        "grandparent" => "grandparents".to_string(),
        "great-grandparent" => "great-grandparents".to_string(),
        "aunt/uncle" => "aunts/uncles".to_string(),
        "great-aunt/uncle" => "great-aunts/uncles".to_string(),
        "cousin" => "cousins".to_string(),
        "spouse" => "spouses".to_string(),
        other if other.ends_with('y') => format!("{}ies", &other[..other.len() - 1]),
        other => format!("{other}s"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_side_prefix() {
        assert_eq!(base_label("paternal grandparent"), "grandparent");
        assert_eq!(base_label("maternal great-grandparent"), "great-grandparent");
    }

    #[test]
    fn strips_marriage_suffix() {
        assert_eq!(base_label("aunt/uncle (by marriage)"), "aunt/uncle");
    }

    #[test]
    fn leaves_unprefixed_label_alone() {
        assert_eq!(base_label("sibling"), "sibling");
    }

    #[test]
    fn pluralizes_known_and_fallback_labels() {
        assert_eq!(pluralize("cousin"), "cousins");
        assert_eq!(pluralize("aunt/uncle"), "aunts/uncles");
        assert_eq!(pluralize("guardian"), "guardians");
    }
}
