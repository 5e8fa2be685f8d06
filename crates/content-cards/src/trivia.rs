use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use serde_json::json;

use crate::difficulty::tier_to_store_difficulty;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TriviaChoice {
    pub text: String,
    #[serde(rename = "isCorrect")]
    pub is_correct: bool,
}

/// Sample 3 distractors from `pool` (shuffled, deduplicated against
/// `correct`), padding with `"Not {correct}"` placeholders if the pool is
/// too small.
pub fn sample_distractors(correct: &str, pool: &[String]) -> Vec<String> {
    let mut candidates: Vec<String> = pool.iter().filter(|p| p.as_str() != correct).cloned().collect();
    candidates.shuffle(&mut rand::thread_rng());
    candidates.truncate(3);
    while candidates.len() < 3 {
        candidates.push(format!("Not {correct}"));
    }
    candidates
}

/// Build a 4-option choice list with the correct answer spliced at a uniform
/// random index, and the 0-based index of that slot.
pub fn build_choices(correct: &str, distractors: Vec<String>) -> (Vec<TriviaChoice>, usize) {
    let correct_index = rand::thread_rng().gen_range(0..4);
    let mut texts = distractors;
    texts.insert(correct_index, correct.to_string());
    let choices = texts
        .into_iter()
        .enumerate()
        .map(|(i, text)| TriviaChoice { text, is_correct: i == correct_index })
        .collect();
    (choices, correct_index)
}

pub fn trivia_properties(
    choices: &[TriviaChoice],
    correct_index: usize,
    explanation: &str,
    hint: &str,
) -> serde_json::Value {
    json!({
        "choices": choices,
        "correct_index": correct_index,
        "explanation": explanation,
        "hint": hint,
        "aisource": "card-engine",
    })
}

pub fn store_difficulty(tier: i32) -> &'static str {
    tier_to_store_difficulty(tier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distractors_exclude_the_correct_answer() {
        let pool = vec!["Alice".to_string(), "Bob".to_string(), "Carol".to_string(), "Bob".to_string()];
        let out = sample_distractors("Bob", &pool);
        assert_eq!(out.len(), 3);
        assert!(!out.contains(&"Bob".to_string()));
    }

    #[test]
    fn pads_when_pool_too_small() {
        let out = sample_distractors("Bob", &[]);
        assert_eq!(out, vec!["Not Bob".to_string(); 3]);
    }

    #[test]
    fn exactly_one_correct_choice() {
        let (choices, correct_index) = build_choices("Bob", vec!["A".into(), "B".into(), "C".into()]);
        assert_eq!(choices.len(), 4);
        assert_eq!(choices[correct_index].text, "Bob");
        assert_eq!(choices.iter().filter(|c| c.is_correct).count(), 1);
    }
}
