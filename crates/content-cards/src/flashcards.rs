use content_kinship::NamedRelation;
use rand::seq::SliceRandom;
use serde_json::{json, Value};

use crate::labels::base_label;

/// One generated flashcard: front prompt, back answer, and a free-form
/// property bag the store persists as-is.
#[derive(Debug, Clone)]
pub struct GeneratedCard {
    pub front: String,
    pub back: String,
    pub difficulty: &'static str,
    pub properties: Value,
}

/// Build the flashcard set for a single relation, applying the two
/// ambiguity rules:
///   - "Who is your {label}?" is only safe when `label` is unique among
///     `all_relations` (otherwise the question has more than one right
///     answer), so it is skipped when `label_is_ambiguous` is true.
///   - "How is {name} related to you?" is always safe since the person's
///     name pins down a single answer regardless of label collisions.
pub fn build_for_relation(
    relation: &NamedRelation,
    label_is_ambiguous: bool,
    base_difficulty: u8,
) -> Vec<GeneratedCard> {
    let mut cards = Vec::new();
    let person = &relation.person;
    let difficulty_str = tier_label(base_difficulty);

    cards.push(GeneratedCard {
        front: format!("How is {} related to you?", person.name),
        back: capitalize(&relation.label),
        difficulty: difficulty_str,
        properties: relation_properties(relation),
    });

    if !label_is_ambiguous {
        cards.push(GeneratedCard {
            front: format!("Who is your {}?", relation.label),
            back: person.name.clone(),
            difficulty: difficulty_str,
            properties: relation_properties(relation),
        });
    }

    if let Some(nick) = &person.nickname {
        cards.push(GeneratedCard {
            front: format!("What is {}'s nickname?", person.name),
            back: nick.clone(),
            difficulty: tier_label(base_difficulty.saturating_sub(1).max(1)),
            properties: relation_properties(relation),
        });
    }

    if let Some(maiden) = &person.maiden_name {
        cards.push(GeneratedCard {
            front: format!("What was {}'s maiden name?", person.name),
            back: maiden.clone(),
            difficulty: tier_label(base_difficulty + 1),
            properties: relation_properties(relation),
        });
    }

    if let Some(born) = person.born {
        cards.push(GeneratedCard {
            front: format!("What year was {} born?", person.name),
            back: born.to_string(),
            difficulty: tier_label(base_difficulty + 1),
            properties: relation_properties(relation),
        });
    }

    cards
}

/// Whether `label` names more than one living relation in `all`, which
/// makes a "Who is your {label}?" question ambiguous.
pub fn is_label_ambiguous(label: &str, all: &[NamedRelation]) -> bool {
    all.iter().filter(|r| r.label == label).count() > 1
}

fn relation_properties(relation: &NamedRelation) -> Value {
    json!({
        "label": relation.label,
        "base_label": base_label(&relation.label),
        "generation": relation.generation,
        "person_id": relation.person.id,
    })
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

fn tier_label(tier: u8) -> &'static str {
    crate::difficulty::tier_to_store_difficulty(tier as i32)
}

/// Pick a bounded sample of distinct display names from `relations`,
/// excluding `exclude_id`, for use as a name-pool distractor source.
pub fn name_pool(relations: &[NamedRelation], exclude_id: uuid::Uuid) -> Vec<String> {
    let mut names: Vec<String> = relations
        .iter()
        .filter(|r| r.person.id != exclude_id)
        .map(|r| r.person.name.clone())
        .collect();
    names.shuffle(&mut rand::thread_rng());
    names
}

/// Distinct relation labels present in `relations`, for use as a
/// label-pool distractor source.
pub fn label_pool(relations: &[NamedRelation]) -> Vec<String> {
    let mut labels: Vec<String> = relations.iter().map(|r| r.label.clone()).collect();
    labels.sort();
    labels.dedup();
    labels
}

/// Distinct maiden names present in `relations`, for use as a
/// maiden-name-pool distractor source.
pub fn maiden_pool(relations: &[NamedRelation]) -> Vec<String> {
    relations.iter().filter_map(|r| r.person.maiden_name.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use content_kinship::{Person, PersonStatus};
    use uuid::Uuid;

    fn relation(label: &str) -> NamedRelation {
        NamedRelation {
            person: Person {
                id: Uuid::new_v4(),
                name: "Pat".to_string(),
                nickname: Some("Patty".to_string()),
                maiden_name: Some("Smith".to_string()),
                born: Some(1950),
                status: PersonStatus::Living,
                player: false,
                placeholder: false,
            },
            label: label.to_string(),
            generation: 1,
            difficulty: 1,
        }
    }

    #[test]
    fn unambiguous_relation_gets_both_direction_questions() {
        let rel = relation("parent");
        let cards = build_for_relation(&rel, false, 1);
        assert!(cards.iter().any(|c| c.front.contains("How is Pat related")));
        assert!(cards.iter().any(|c| c.front == "Who is your parent?"));
    }

    #[test]
    fn ambiguous_label_skips_the_who_is_your_question() {
        let rel = relation("cousin");
        let cards = build_for_relation(&rel, true, 3);
        assert!(cards.iter().any(|c| c.front.contains("How is Pat related")));
        assert!(!cards.iter().any(|c| c.front.starts_with("Who is your")));
    }

    #[test]
    fn nickname_and_maiden_name_cards_are_included() {
        let rel = relation("grandparent");
        let cards = build_for_relation(&rel, false, 2);
        assert!(cards.iter().any(|c| c.front.contains("nickname")));
        assert!(cards.iter().any(|c| c.front.contains("maiden name")));
    }

    #[test]
    fn label_ambiguity_detects_duplicate_labels() {
        let relations = vec![relation("cousin"), relation("cousin")];
        assert!(is_label_ambiguous("cousin", &relations));
        assert!(!is_label_ambiguous("parent", &relations));
    }
}
