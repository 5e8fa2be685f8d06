//! Prompt construction and response parsing for trivia batches.

use rand::Rng;
use regex::Regex;
use std::sync::OnceLock;

use crate::model::{Choice, RawQuestion, TriviaCandidate};

pub(crate) const SYSTEM_PROMPT: &str =
    "You are a trivia question generator. Generate unique, factually accurate \
     trivia questions. Always respond with valid JSON only.";

fn difficulty_guidance(difficulty: &str) -> &'static str {
    match difficulty {
        "easy" => "Questions should be common knowledge that most people would know",
        "hard" => "Questions should be challenging and require specialized knowledge",
        _ => "Questions should require some specific knowledge but not be obscure",
    }
}

pub(crate) fn build_user_prompt(count: usize, category: &str, difficulty: &str) -> String {
    let guidance = difficulty_guidance(difficulty);
    format!(
        "Generate {count} unique trivia questions about {category} at {difficulty} difficulty level.\n\n\
         Return a JSON array with this exact structure:\n\
         [\n  {{\n    \"question\": \"The question text?\",\n    \"correct_answer\": \"The correct answer\",\n    \
         \"incorrect_answers\": [\"Wrong 1\", \"Wrong 2\", \"Wrong 3\"],\n    \
         \"explanation\": \"Brief explanation of why the answer is correct\",\n    \
         \"hint\": \"A subtle clue that helps without giving away the answer\"\n  }}\n]\n\n\
         Requirements:\n\
         - Questions must be factually accurate\n\
         - Each question must have exactly 3 incorrect answers\n\
         - Incorrect answers should be plausible but clearly wrong\n\
         - For {difficulty} difficulty: {guidance}\n\
         - Return ONLY the JSON array, no other text"
    )
}

fn fence_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)```(?:json)?\s*").unwrap())
}

/// Parse a raw LLM response into trivia candidates, randomising the correct
/// answer's position. Malformed or incomplete items are dropped silently.
pub(crate) fn parse_response(content: &str, category: &str, difficulty: &str) -> Vec<TriviaCandidate> {
    let cleaned = fence_re().replace_all(content, "");
    let cleaned = cleaned.trim();

    let Some(start) = cleaned.find('[') else { return Vec::new() };
    let Some(end) = cleaned.rfind(']') else { return Vec::new() };
    if start >= end {
        return Vec::new();
    }
    let json_slice = &cleaned[start..=end];

    let raw_items: Vec<RawQuestion> = match serde_json::from_str(json_slice) {
        Ok(items) => items,
        Err(err) => {
            tracing::warn!(?err, "failed to parse trivia JSON response");
            return Vec::new();
        }
    };

    let mut rng = rand::thread_rng();
    raw_items
        .into_iter()
        .filter_map(|item| {
            if item.question.trim().is_empty() || item.correct_answer.trim().is_empty() {
                return None;
            }
            if item.incorrect_answers.len() < 3 {
                return None;
            }
            let incorrect: Vec<String> = item.incorrect_answers.into_iter().take(3).collect();
            let correct_index = rng.gen_range(0..4);
            let mut answers = incorrect;
            answers.insert(correct_index, item.correct_answer);
            let choices = answers
                .into_iter()
                .enumerate()
                .map(|(i, text)| Choice { text, is_correct: i == correct_index })
                .collect();

            Some(TriviaCandidate {
                question: item.question,
                category: category.to_string(),
                difficulty: difficulty.to_string(),
                choices,
                correct_index,
                explanation: item.explanation,
                hint: item.hint,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_fenced_json_array() {
        let raw = "```json\n[{\"question\":\"2+2?\",\"correct_answer\":\"4\",\"incorrect_answers\":[\"3\",\"5\",\"6\"],\"explanation\":\"math\",\"hint\":\"small\"}]\n```";
        let out = parse_response(raw, "Mathematics", "easy");
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].choices.len(), 4);
        assert_eq!(out[0].choices[out[0].correct_index].text, "4");
        assert!(out[0].choices.iter().filter(|c| c.is_correct).count() == 1);
    }

    #[test]
    fn drops_items_missing_required_fields() {
        let raw = r#"[{"question":"","correct_answer":"x","incorrect_answers":["a","b","c"]}]"#;
        assert!(parse_response(raw, "General Knowledge", "medium").is_empty());
    }

    #[test]
    fn drops_items_with_too_few_incorrect_answers() {
        let raw = r#"[{"question":"q?","correct_answer":"x","incorrect_answers":["a","b"]}]"#;
        assert!(parse_response(raw, "General Knowledge", "medium").is_empty());
    }

    #[test]
    fn malformed_json_yields_empty_batch() {
        assert!(parse_response("not json at all", "History", "hard").is_empty());
    }

    #[test]
    fn no_brackets_yields_empty_batch() {
        assert!(parse_response("sorry, I can't help with that", "History", "hard").is_empty());
    }
}
