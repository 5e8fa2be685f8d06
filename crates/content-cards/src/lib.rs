//! Turns a computed family tree into persistable flashcard and trivia
//! decks: filters out deceased relations, applies the flashcard ambiguity
//! rules, builds multiple-choice trivia with pooled distractors, and adds
//! a handful of aggregate bonus cards computed over the whole tree.

mod aggregate;
mod difficulty;
mod flashcards;
mod labels;
mod relation_trivia;
mod trivia;

pub use flashcards::GeneratedCard;

use content_kinship::NamedRelation;
use serde_json::json;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeckKind {
    Flashcard,
    Trivia,
}

/// A generated deck ready for the store: title, free-form property bag,
/// and its cards in dense zero-based display order.
#[derive(Debug, Clone)]
pub struct GeneratedDeck {
    pub kind: DeckKind,
    pub title: String,
    pub properties: serde_json::Value,
    pub cards: Vec<GeneratedCard>,
}

/// Generate the requested deck kinds for one player's family tree.
///
/// Deceased relations are dropped before any card is built: a deceased
/// relative cannot be the subject of a "who is" recall question in a
/// living player's deck. Relations with no parents in the graph
/// (placeholders, partial trees) still generate cards normally.
pub fn generate_decks(
    relations: Vec<NamedRelation>,
    player_name: &str,
    kinds: &[DeckKind],
) -> Vec<GeneratedDeck> {
    let living: Vec<NamedRelation> = relations
        .into_iter()
        .filter(|r| r.person.status == content_kinship::PersonStatus::Living)
        .collect();

    kinds
        .iter()
        .map(|kind| match kind {
            DeckKind::Flashcard => build_flashcard_deck(&living, player_name),
            DeckKind::Trivia => build_trivia_deck(&living, player_name),
        })
        .collect()
}

fn build_flashcard_deck(relations: &[NamedRelation], player_name: &str) -> GeneratedDeck {
    let mut cards = Vec::new();
    for relation in relations {
        let ambiguous = flashcards::is_label_ambiguous(&relation.label, relations);
        cards.extend(flashcards::build_for_relation(relation, ambiguous, relation.difficulty.max(1)));
    }
    cards.extend(aggregate::build(relations, player_name));

    GeneratedDeck {
        kind: DeckKind::Flashcard,
        title: format!("{player_name}'s Family Flashcards"),
        properties: json!({"relation_count": relations.len(), "aisource": "card-engine"}),
        cards,
    }
}

fn build_trivia_deck(relations: &[NamedRelation], player_name: &str) -> GeneratedDeck {
    let label_pool = flashcards::label_pool(relations);
    let maiden_pool = flashcards::maiden_pool(relations);
    let mut cards = Vec::new();

    for relation in relations {
        let name_pool = flashcards::name_pool(relations, relation.person.id);
        cards.push(relation_trivia::build_relation_trivia(relation, &label_pool));

        if !flashcards::is_label_ambiguous(&relation.label, relations) {
            cards.push(relation_trivia::build_who_is_trivia(relation, &name_pool));
        }

        if let Some(card) = relation_trivia::build_maiden_trivia(relation, &maiden_pool) {
            cards.push(card);
        }
    }

    GeneratedDeck {
        kind: DeckKind::Trivia,
        title: format!("{player_name}'s Family Trivias"),
        properties: json!({"relation_count": relations.len(), "aisource": "card-engine"}),
        cards,
    }
}

/// Dense, zero-based display positions for a deck's cards, in
/// insertion order.
pub fn positions(deck: &GeneratedDeck) -> Vec<(usize, &GeneratedCard)> {
    deck.cards.iter().enumerate().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use content_kinship::{Person, PersonStatus};

    fn relation(name: &str, label: &str, status: PersonStatus) -> NamedRelation {
        NamedRelation {
            person: Person {
                id: Uuid::new_v4(),
                name: name.to_string(),
                nickname: None,
                maiden_name: None,
                born: None,
                status,
                player: false,
                placeholder: false,
            },
            label: label.to_string(),
            generation: 1,
            difficulty: 1,
        }
    }

    #[test]
    fn deceased_relations_are_excluded_from_every_deck() {
        let relations = vec![
            relation("Bob", "parent", PersonStatus::Living),
            relation("Ghost", "parent", PersonStatus::Deceased),
        ];
        let decks = generate_decks(relations, "Alice", &[DeckKind::Flashcard, DeckKind::Trivia]);
        for deck in &decks {
            assert!(deck.cards.iter().all(|c| !c.front.contains("Ghost") && !c.back.contains("Ghost")));
        }
    }

    #[test]
    fn deck_titles_use_player_name() {
        let relations = vec![relation("Bob", "parent", PersonStatus::Living)];
        let decks = generate_decks(relations, "Alice", &[DeckKind::Flashcard]);
        assert_eq!(decks[0].title, "Alice's Family Flashcards");
    }

    #[test]
    fn positions_are_dense_and_zero_based() {
        let relations = vec![relation("Bob", "parent", PersonStatus::Living)];
        let decks = generate_decks(relations, "Alice", &[DeckKind::Flashcard]);
        let positioned = positions(&decks[0]);
        let indices: Vec<usize> = positioned.iter().map(|(i, _)| *i).collect();
        assert_eq!(indices, (0..positioned.len()).collect::<Vec<_>>());
    }

    #[test]
    fn trivia_deck_generated_for_each_relation() {
        let relations = vec![relation("Bob", "parent", PersonStatus::Living)];
        let decks = generate_decks(relations, "Alice", &[DeckKind::Trivia]);
        assert!(!decks[0].cards.is_empty());
    }

    #[test]
    fn two_parents_get_name_questions_but_not_a_shared_label_question() {
        let relations = vec![
            relation("Bob", "parent", PersonStatus::Living),
            relation("Carol", "parent", PersonStatus::Living),
        ];
        let decks = generate_decks(relations, "Alice", &[DeckKind::Flashcard]);
        let fronts: Vec<&str> = decks[0].cards.iter().map(|c| c.front.as_str()).collect();

        assert!(fronts.contains(&"How is Bob related to you?"));
        assert!(fronts.contains(&"How is Carol related to you?"));
        assert!(!fronts.contains(&"Who is your parent?"));
    }
}
