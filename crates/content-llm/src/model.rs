use serde::{Deserialize, Serialize};

/// One answer option attached to a generated trivia card.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Choice {
    pub text: String,
    #[serde(rename = "isCorrect")]
    pub is_correct: bool,
}

/// A fully-formed trivia candidate, ready for dedup checking and insertion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TriviaCandidate {
    pub question: String,
    pub category: String,
    pub difficulty: String,
    pub choices: Vec<Choice>,
    pub correct_index: usize,
    pub explanation: String,
    pub hint: String,
}

impl TriviaCandidate {
    pub fn correct_answer(&self) -> &str {
        self.choices
            .get(self.correct_index)
            .map(|c| c.text.as_str())
            .unwrap_or("")
    }
}

/// Raw shape requested from the LLM, before answer-position randomisation.
#[derive(Debug, Deserialize)]
pub(crate) struct RawQuestion {
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub correct_answer: String,
    #[serde(default)]
    pub incorrect_answers: Vec<String>,
    #[serde(default)]
    pub explanation: String,
    #[serde(default)]
    pub hint: String,
}
