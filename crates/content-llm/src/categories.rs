//! Canonical trivia category list, alias normalisation, and icon hints.
//!
//! The daemon samples from [`CANONICAL_CATEGORIES`] without replacement each
//! cycle; the studio adapter (out of scope here) uses [`symbol_for`] to give
//! decks an icon hint.

/// 40-entry alias → canonical category name map.
const ALIAS_TO_CANONICAL: &[(&str, &str)] = &[
    ("science", "Science & Nature"),
    ("science & nature", "Science & Nature"),
    ("nature", "Science & Nature"),
    ("animals", "Science & Nature"),
    ("science - computers", "Technology"),
    ("science - gadgets", "Technology"),
    ("technology", "Technology"),
    ("mathematics", "Mathematics"),
    ("science - mathematics", "Mathematics"),
    ("history", "History"),
    ("geography", "Geography"),
    ("politics", "Politics"),
    ("sports", "Sports"),
    ("sport_and_leisure", "Sports"),
    ("music", "Music"),
    ("musicals & theatres", "Music"),
    ("literature", "Literature"),
    ("books", "Literature"),
    ("arts_and_literature", "Arts & Literature"),
    ("arts and literature", "Arts & Literature"),
    ("art", "Arts & Literature"),
    ("movies", "Film & TV"),
    ("film", "Film & TV"),
    ("film_and_tv", "Film & TV"),
    ("television", "Film & TV"),
    ("cartoon & animations", "Film & TV"),
    ("japanese anime & manga", "Film & TV"),
    ("video games", "Video Games"),
    ("board games", "Board Games"),
    ("comics", "Comics"),
    ("food & drink", "Food & Drink"),
    ("food_and_drink", "Food & Drink"),
    ("pop culture", "Pop Culture"),
    ("celebrities", "Pop Culture"),
    ("mythology", "Mythology"),
    ("society_and_culture", "Society & Culture"),
    ("society and culture", "Society & Culture"),
    ("general_knowledge", "General Knowledge"),
    ("general knowledge", "General Knowledge"),
    ("vehicles", "Vehicles"),
];

/// Canonical category name → icon hint, an SF-Symbol-style name used as
/// an optional icon hint on trivia decks.
const CANONICAL_TO_ICON: &[(&str, &str)] = &[
    ("Science & Nature", "atom"),
    ("Technology", "desktopcomputer"),
    ("Mathematics", "number"),
    ("History", "clock"),
    ("Geography", "globe.americas"),
    ("Politics", "building.columns"),
    ("Sports", "sportscourt"),
    ("Music", "music.note"),
    ("Literature", "book"),
    ("Arts & Literature", "paintbrush"),
    ("Film & TV", "film"),
    ("Video Games", "gamecontroller"),
    ("Board Games", "gamecontroller"),
    ("Comics", "text.bubble"),
    ("Food & Drink", "fork.knife"),
    ("Pop Culture", "star"),
    ("Mythology", "sparkles"),
    ("Society & Culture", "person.3"),
    ("General Knowledge", "questionmark.circle"),
    ("Vehicles", "car"),
];

/// Canonical category names in stable order, for sampling without replacement.
pub fn canonical_categories() -> Vec<&'static str> {
    CANONICAL_TO_ICON.iter().map(|(name, _)| *name).collect()
}

/// Map a raw category string to its canonical name, falling back to the
/// input unchanged when no alias matches.
pub fn normalize(raw: &str) -> String {
    let key = raw.to_lowercase();
    let key = key.trim();
    ALIAS_TO_CANONICAL
        .iter()
        .find(|(alias, _)| *alias == key)
        .map(|(_, canonical)| canonical.to_string())
        .unwrap_or_else(|| raw.to_string())
}

/// Icon hint for a category (canonical or alias), falling back to a generic mark.
pub fn symbol_for(category: &str) -> &'static str {
    let canonical = normalize(category);
    CANONICAL_TO_ICON
        .iter()
        .find(|(name, _)| *name == canonical)
        .map(|(_, icon)| *icon)
        .unwrap_or("questionmark.circle")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_list_has_twenty_entries() {
        assert_eq!(canonical_categories().len(), 20);
    }

    #[test]
    fn alias_normalizes_case_insensitively() {
        assert_eq!(normalize("SCIENCE"), "Science & Nature");
        assert_eq!(normalize("  Movies "), "Film & TV");
    }

    #[test]
    fn unknown_category_falls_back_to_generic_icon() {
        assert_eq!(symbol_for("made up category"), "questionmark.circle");
    }

    #[test]
    fn known_alias_resolves_icon() {
        assert_eq!(symbol_for("animals"), "atom");
    }
}
