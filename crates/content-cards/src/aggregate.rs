use std::collections::HashMap;

use content_kinship::NamedRelation;
use serde_json::json;

use crate::flashcards::GeneratedCard;
use crate::labels::{base_label, pluralize};

/// Bonus flashcards computed over the whole relation set rather than a
/// single person: counts, roll calls, twins, and age-ordered superlatives.
pub fn build(relations: &[NamedRelation], player_name: &str) -> Vec<GeneratedCard> {
    let mut cards = Vec::new();
    let mut by_base: HashMap<String, Vec<&NamedRelation>> = HashMap::new();
    for r in relations {
        by_base.entry(base_label(&r.label)).or_default().push(r);
    }

    for (base, group) in &by_base {
        if group.len() < 2 {
            continue;
        }
        cards.push(how_many_card(player_name, base, group.len()));
        if group.len() <= 5 {
            cards.push(name_all_card(player_name, base, group));
        }
    }

    if let Some(card) = twins_card(&by_base, "sibling") {
        cards.push(card);
    }
    if let Some(card) = twins_card(&by_base, "cousin") {
        cards.push(card);
    }

    if let Some(card) = superlative_card(&by_base, "sibling", true) {
        cards.push(card);
    }
    if let Some(card) = superlative_card(&by_base, "sibling", false) {
        cards.push(card);
    }
    if let Some(card) = superlative_card(&by_base, "cousin", true) {
        cards.push(card);
    }
    if let Some(card) = superlative_card(&by_base, "cousin", false) {
        cards.push(card);
    }

    if let Some(card) = nickname_count_card(player_name, relations) {
        cards.push(card);
    }
    cards.push(total_relatives_card(player_name, relations.len()));

    cards
}

fn how_many_card(player_name: &str, base: &str, count: usize) -> GeneratedCard {
    GeneratedCard {
        front: format!("How many {} does {} have?", pluralize(base), player_name),
        back: count.to_string(),
        difficulty: "easy",
        properties: json!({"kind": "aggregate_count", "base_label": base}),
    }
}

fn name_all_card(player_name: &str, base: &str, group: &[&NamedRelation]) -> GeneratedCard {
    let mut names: Vec<&str> = group.iter().map(|r| r.person.name.as_str()).collect();
    names.sort();
    GeneratedCard {
        front: format!("Name all of {}'s {}.", player_name, pluralize(base)),
        back: names.join(", "),
        difficulty: "medium",
        properties: json!({"kind": "aggregate_roll_call", "base_label": base}),
    }
}

/// Two relations in the same base-label group sharing a birth year.
fn twins_card(by_base: &HashMap<String, Vec<&NamedRelation>>, base: &str) -> Option<GeneratedCard> {
    let group = by_base.get(base)?;
    let mut by_year: HashMap<i32, Vec<&str>> = HashMap::new();
    for r in group {
        if let Some(year) = r.person.born {
            by_year.entry(year).or_default().push(&r.person.name);
        }
    }
    let (year, names) = by_year.into_iter().find(|(_, names)| names.len() >= 2)?;
    let mut names = names;
    names.sort();
    Some(GeneratedCard {
        front: format!("Which {} were both born in {}?", base, year),
        back: names.join(" and "),
        difficulty: "hard",
        properties: json!({"kind": "aggregate_twins", "base_label": base, "year": year}),
    })
}

fn superlative_card(by_base: &HashMap<String, Vec<&NamedRelation>>, base: &str, oldest: bool) -> Option<GeneratedCard> {
    let group = by_base.get(base)?;
    let with_birth_year: Vec<_> = group.iter().filter(|r| r.person.born.is_some()).collect();
    if with_birth_year.len() < 2 {
        return None;
    }
    let pick = with_birth_year
        .into_iter()
        .min_by_key(|r| if oldest { r.person.born.unwrap() } else { -r.person.born.unwrap() })?;
    let word = if oldest { "oldest" } else { "youngest" };
    Some(GeneratedCard {
        front: format!("Who is the {word} {base} of {}?", "the family"),
        back: pick.person.name.clone(),
        difficulty: "medium",
        properties: json!({"kind": "aggregate_superlative", "base_label": base, "oldest": oldest}),
    })
}

fn nickname_count_card(player_name: &str, relations: &[NamedRelation]) -> Option<GeneratedCard> {
    let count = relations.iter().filter(|r| r.person.nickname.is_some()).count();
    if count < 2 {
        return None;
    }
    Some(GeneratedCard {
        front: format!("How many of {}'s relatives have a nickname on file?", player_name),
        back: count.to_string(),
        difficulty: "medium",
        properties: json!({"kind": "aggregate_nickname_count"}),
    })
}

fn total_relatives_card(player_name: &str, total: usize) -> GeneratedCard {
    GeneratedCard {
        front: format!("How many relatives does {player_name} have on record?"),
        back: total.to_string(),
        difficulty: "easy",
        properties: json!({"kind": "aggregate_total"}),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use content_kinship::{Person, PersonStatus};
    use uuid::Uuid;

    fn relation(label: &str, name: &str, born: Option<i32>) -> NamedRelation {
        NamedRelation {
            person: Person {
                id: Uuid::new_v4(),
                name: name.to_string(),
                nickname: None,
                maiden_name: None,
                born,
                status: PersonStatus::Living,
                player: false,
                placeholder: false,
            },
            label: label.to_string(),
            generation: 0,
            difficulty: 1,
        }
    }

    #[test]
    fn counts_group_by_base_label() {
        let relations = vec![
            relation("paternal grandparent", "Dan", Some(1940)),
            relation("maternal grandparent", "Eve", Some(1942)),
        ];
        let cards = build(&relations, "Alice");
        let count_card = cards.iter().find(|c| c.properties["kind"] == "aggregate_count" && c.properties["base_label"] == "grandparent").unwrap();
        assert_eq!(count_card.back, "2");
    }

    #[test]
    fn detects_twins_sharing_a_birth_year() {
        let relations = vec![
            relation("sibling", "Zoe", Some(2000)),
            relation("sibling", "Max", Some(2000)),
        ];
        let cards = build(&relations, "Alice");
        assert!(cards.iter().any(|c| c.properties["kind"] == "aggregate_twins"));
    }

    #[test]
    fn name_all_card_skipped_when_group_too_large() {
        let relations: Vec<NamedRelation> = (0..6).map(|i| relation("cousin", &format!("Cousin{i}"), None)).collect();
        let cards = build(&relations, "Alice");
        assert!(!cards.iter().any(|c| c.properties["kind"] == "aggregate_roll_call" && c.properties["base_label"] == "cousin"));
    }

    #[test]
    fn singleton_group_gets_no_count_or_roll_call_card() {
        let relations = vec![relation("paternal grandparent", "Dan", Some(1940))];
        let cards = build(&relations, "Alice");
        assert!(!cards.iter().any(|c| c.properties["kind"] == "aggregate_count"));
        assert!(!cards.iter().any(|c| c.properties["kind"] == "aggregate_roll_call"));
    }

    #[test]
    fn superlative_skipped_with_fewer_than_two_birth_years() {
        let relations = vec![
            relation("sibling", "Zoe", Some(2000)),
            relation("sibling", "Max", None),
        ];
        let cards = build(&relations, "Alice");
        assert!(!cards.iter().any(|c| c.properties["kind"] == "aggregate_superlative"));
    }

    #[test]
    fn nickname_count_skipped_with_fewer_than_two_nicknames() {
        let mut only_one = relation("sibling", "Zoe", Some(2000));
        only_one.person.nickname = Some("Zee".to_string());
        let relations = vec![only_one, relation("sibling", "Max", Some(2001))];
        let cards = build(&relations, "Alice");
        assert!(!cards.iter().any(|c| c.properties["kind"] == "aggregate_nickname_count"));
    }
}
