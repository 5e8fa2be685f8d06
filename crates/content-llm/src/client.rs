use std::time::Duration;

use serde_json::json;

use crate::model::TriviaCandidate;
use crate::prompt::{SYSTEM_PROMPT, build_user_prompt, parse_response};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);
const TEMPERATURE: f64 = 0.8;
const MAX_TOKENS: u32 = 2000;
const OPENAI_URL: &str = "https://api.openai.com/v1/chat/completions";
const ANTHROPIC_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Chooses the upstream chat backend by substring-matching the configured
/// model name: `"claude"` anywhere in the name routes to Anthropic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    OpenAiCompatible,
    Anthropic,
}

impl Backend {
    pub fn for_model(model: &str) -> Self {
        if model.to_lowercase().contains("claude") {
            Backend::Anthropic
        } else {
            Backend::OpenAiCompatible
        }
    }
}

/// Stateless trivia batch fetcher. A fresh [`reqwest::Client`] is built per
/// call so concurrent batch fan-out (owned by the ingestion daemon) doesn't
/// share connection state across categories.
#[derive(Debug, Clone, Default)]
pub struct LlmClient;

impl LlmClient {
    pub fn new() -> Self {
        Self
    }

    /// Fetch one batch of `count` trivia questions for `category` at
    /// `difficulty`. Network failures, non-2xx responses, and JSON parse
    /// failures are logged and produce an empty batch — never an error that
    /// would abort the ingestion cycle.
    pub async fn generate_batch(
        &self,
        api_key: &str,
        model: &str,
        category: &str,
        difficulty: &str,
        count: usize,
    ) -> Vec<TriviaCandidate> {
        let backend = Backend::for_model(model);
        let prompt = build_user_prompt(count, category, difficulty);

        let client = match reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build() {
            Ok(client) => client,
            Err(err) => {
                tracing::error!(?err, "failed to build http client");
                return Vec::new();
            }
        };

        let content = match backend {
            Backend::OpenAiCompatible => self.call_openai(&client, api_key, model, &prompt).await,
            Backend::Anthropic => self.call_anthropic(&client, api_key, model, &prompt).await,
        };

        match content {
            Some(content) => parse_response(&content, category, difficulty),
            None => Vec::new(),
        }
    }

    async fn call_openai(&self, client: &reqwest::Client, api_key: &str, model: &str, prompt: &str) -> Option<String> {
        let payload = json!({
            "model": model,
            "messages": [
                {"role": "system", "content": SYSTEM_PROMPT},
                {"role": "user", "content": prompt},
            ],
            "temperature": TEMPERATURE,
            "max_tokens": MAX_TOKENS,
        });

        let response = client
            .post(OPENAI_URL)
            .bearer_auth(api_key)
            .json(&payload)
            .send()
            .await
            .inspect_err(|err| tracing::error!(?err, "openai request failed"))
            .ok()?;

        if !response.status().is_success() {
            tracing::error!(status = %response.status(), "openai returned non-2xx");
            return None;
        }

        let body: serde_json::Value = response
            .json()
            .await
            .inspect_err(|err| tracing::error!(?err, "failed to decode openai response body"))
            .ok()?;

        body["choices"][0]["message"]["content"].as_str().map(str::to_string)
    }

    async fn call_anthropic(&self, client: &reqwest::Client, api_key: &str, model: &str, prompt: &str) -> Option<String> {
        let payload = json!({
            "model": model,
            "system": SYSTEM_PROMPT,
            "max_tokens": MAX_TOKENS,
            "messages": [{"role": "user", "content": prompt}],
        });

        let response = client
            .post(ANTHROPIC_URL)
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&payload)
            .send()
            .await
            .inspect_err(|err| tracing::error!(?err, "anthropic request failed"))
            .ok()?;

        if !response.status().is_success() {
            tracing::error!(status = %response.status(), "anthropic returned non-2xx");
            return None;
        }

        let body: serde_json::Value = response
            .json()
            .await
            .inspect_err(|err| tracing::error!(?err, "failed to decode anthropic response body"))
            .ok()?;

        body["content"][0]["text"].as_str().map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_selection_matches_model_substring() {
        assert_eq!(Backend::for_model("gpt-4o-mini"), Backend::OpenAiCompatible);
        assert_eq!(Backend::for_model("claude-3-5-sonnet"), Backend::Anthropic);
        assert_eq!(Backend::for_model("anthropic/claude-3.7-sonnet"), Backend::Anthropic);
    }

}
