use content_kinship::NamedRelation;

use crate::flashcards::GeneratedCard;
use crate::trivia::{build_choices, sample_distractors, store_difficulty, trivia_properties};

/// Build the "How is {name} related to you?" trivia analog: the correct
/// label against three distractor labels drawn from the label pool.
pub fn build_relation_trivia(relation: &NamedRelation, label_pool: &[String]) -> GeneratedCard {
    let correct = relation.label.clone();
    let distractors = sample_distractors(&correct, label_pool);
    let (choices, correct_index) = build_choices(&correct, distractors);
    let explanation = format!("{} is your {}.", relation.person.name, relation.label);
    let hint = format!("Think about how {} connects to your family tree.", relation.person.name);
    let properties = trivia_properties(&choices, correct_index, &explanation, &hint);

    GeneratedCard {
        front: format!("How is {} related to you?", relation.person.name),
        back: capitalize(&correct),
        difficulty: store_difficulty(relation.difficulty as i32),
        properties,
    }
}

/// Build "Who is your {label}?" trivia: the correct name against three
/// distractor names drawn from the name pool.
pub fn build_who_is_trivia(relation: &NamedRelation, name_pool: &[String]) -> GeneratedCard {
    let correct = relation.person.name.clone();
    let distractors = sample_distractors(&correct, name_pool);
    let (choices, correct_index) = build_choices(&correct, distractors);
    let explanation = format!("{} is your {}.", correct, relation.label);
    let hint = "Check the family tree for this relation.".to_string();
    let properties = trivia_properties(&choices, correct_index, &explanation, &hint);

    GeneratedCard {
        front: format!("Who is your {}?", relation.label),
        back: correct,
        difficulty: store_difficulty(relation.difficulty as i32),
        properties,
    }
}

/// Build "What was {name}'s maiden name?" trivia when one is on file,
/// with distractors drawn from the maiden-name pool.
pub fn build_maiden_trivia(relation: &NamedRelation, maiden_pool: &[String]) -> Option<GeneratedCard> {
    let correct = relation.person.maiden_name.clone()?;
    let distractors = sample_distractors(&correct, maiden_pool);
    let (choices, correct_index) = build_choices(&correct, distractors);
    let explanation = format!("{}'s maiden name was {}.", relation.person.name, correct);
    let hint = "This is a family name from before marriage.".to_string();
    let properties = trivia_properties(&choices, correct_index, &explanation, &hint);

    Some(GeneratedCard {
        front: format!("What was {}'s maiden name?", relation.person.name),
        back: correct,
        difficulty: store_difficulty(relation.difficulty as i32 + 1),
        properties,
    })
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use content_kinship::{Person, PersonStatus};
    use uuid::Uuid;

    fn relation() -> NamedRelation {
        NamedRelation {
            person: Person {
                id: Uuid::new_v4(),
                name: "Pat".to_string(),
                nickname: None,
                maiden_name: Some("Smith".to_string()),
                born: None,
                status: PersonStatus::Living,
                player: false,
                placeholder: false,
            },
            label: "parent".to_string(),
            generation: 1,
            difficulty: 1,
        }
    }

    #[test]
    fn relation_trivia_has_four_choices_with_one_correct() {
        let rel = relation();
        let pool = vec!["sibling".to_string(), "cousin".to_string(), "spouse".to_string()];
        let card = build_relation_trivia(&rel, &pool);
        let choices = card.properties["choices"].as_array().unwrap();
        assert_eq!(choices.len(), 4);
        assert_eq!(choices.iter().filter(|c| c["isCorrect"] == true).count(), 1);
    }

    #[test]
    fn relation_trivia_explanation_reads_as_a_sentence() {
        let rel = relation();
        let pool = vec!["sibling".to_string(), "cousin".to_string(), "spouse".to_string()];
        let card = build_relation_trivia(&rel, &pool);
        assert_eq!(card.properties["explanation"], "Pat is your parent.");
    }

    #[test]
    fn maiden_trivia_absent_without_maiden_name() {
        let mut rel = relation();
        rel.person.maiden_name = None;
        assert!(build_maiden_trivia(&rel, &[]).is_none());
    }

    #[test]
    fn maiden_trivia_present_with_maiden_name() {
        let rel = relation();
        let card = build_maiden_trivia(&rel, &["Jones".to_string()]).unwrap();
        assert_eq!(card.back, "Smith");
    }
}
