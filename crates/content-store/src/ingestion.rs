use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{Card, Difficulty, SourceProvider, SourceRun};

/// Get or create the named source provider row (e.g. the "openai" row
/// every ingestion cycle attributes its cards to).
pub async fn ensure_provider(pool: &PgPool, name: &str) -> Result<Uuid> {
    if let Some(id) = sqlx::query_scalar::<_, Uuid>("SELECT id FROM source_providers WHERE name = $1")
        .bind(name)
        .fetch_optional(pool)
        .await?
    {
        return Ok(id);
    }

    let id = Uuid::new_v4();
    sqlx::query("INSERT INTO source_providers (id, name, type) VALUES ($1, $2, 'api')")
        .bind(id)
        .bind(name)
        .execute(pool)
        .await?;
    Ok(id)
}

/// All registered source providers, for the control surface's "what is this
/// run attributed to" display.
pub async fn list_providers(pool: &PgPool) -> Result<Vec<SourceProvider>> {
    let providers = sqlx::query_as::<_, SourceProvider>("SELECT id, name, type AS provider_type FROM source_providers ORDER BY name")
        .fetch_all(pool)
        .await?;
    Ok(providers)
}

pub async fn create_run(pool: &PgPool, provider_id: Uuid) -> Result<Uuid> {
    let id = Uuid::new_v4();
    sqlx::query("INSERT INTO source_runs (id, provider_id, started_at) VALUES ($1, $2, now())")
        .bind(id)
        .bind(provider_id)
        .execute(pool)
        .await?;
    Ok(id)
}

pub async fn finish_run(pool: &PgPool, run_id: Uuid, fetched: i32, added: i32, skipped: i32, error: Option<&str>) -> Result<()> {
    sqlx::query(
        "UPDATE source_runs SET finished_at = now(), items_fetched = $1, items_added = $2, \
         items_skipped = $3, error = $4 WHERE id = $5",
    )
    .bind(fetched)
    .bind(added)
    .bind(skipped)
    .bind(error)
    .bind(run_id)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn list_runs(pool: &PgPool, limit: i64) -> Result<Vec<SourceRun>> {
    let runs = sqlx::query_as::<_, SourceRun>(
        "SELECT id, provider_id, started_at, finished_at, items_fetched, items_added, items_skipped, error \
         FROM source_runs ORDER BY started_at DESC LIMIT $1",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(runs)
}

/// Get or create the trivia deck for a category, tagging it with its
/// display icon the first time it's created.
pub async fn ensure_category_deck(pool: &PgPool, category: &str, pic: &str) -> Result<Uuid> {
    if let Some(id) = sqlx::query_scalar::<_, Uuid>("SELECT id FROM decks WHERE kind = 'trivia' AND title = $1")
        .bind(category)
        .fetch_optional(pool)
        .await?
    {
        return Ok(id);
    }

    let id = Uuid::new_v4();
    sqlx::query("INSERT INTO decks (id, title, kind, tier, properties) VALUES ($1, $2, 'trivia', 'free', $3)")
        .bind(id)
        .bind(category)
        .bind(serde_json::json!({"pic": pic}))
        .execute(pool)
        .await?;
    Ok(id)
}

/// Insert one freshly generated card into its category deck, attributed
/// to `source_id`.
pub async fn insert_ingested_card(
    pool: &PgPool,
    deck_id: Uuid,
    question: &str,
    properties: Value,
    difficulty: Difficulty,
    source_id: Uuid,
) -> Result<Card> {
    let next_position: i32 = sqlx::query_scalar("SELECT COALESCE(MAX(position), -1) + 1 FROM cards WHERE deck_id = $1")
        .bind(deck_id)
        .fetch_one(pool)
        .await?;

    let id = Uuid::new_v4();
    let card = sqlx::query_as::<_, Card>(
        "INSERT INTO cards (id, deck_id, position, question, properties, difficulty, source_id, source_date) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, now()) \
         RETURNING id, deck_id, position, question, properties, difficulty, source_id, source_date",
    )
    .bind(id)
    .bind(deck_id)
    .bind(next_position)
    .bind(question)
    .bind(properties)
    .bind(difficulty)
    .bind(source_id)
    .fetch_one(pool)
    .await?;
    Ok(card)
}

/// Existing card rows to warm the in-process dedup cache on daemon
/// startup, as (card id, question, correct answer choice text).
pub async fn existing_trivia_signatures(pool: &PgPool, limit: i64) -> Result<Vec<(Uuid, String, String)>> {
    let rows: Vec<(Uuid, String, Value)> = sqlx::query_as(
        "SELECT c.id, c.question, c.properties FROM cards c JOIN decks d ON d.id = c.deck_id \
         WHERE d.kind = 'trivia' ORDER BY c.source_date DESC NULLS LAST LIMIT $1",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|(id, question, properties)| {
            let correct_answer = correct_answer_text(&properties);
            (id, question, correct_answer)
        })
        .collect())
}

fn correct_answer_text(properties: &Value) -> String {
    let choices = properties.get("choices").and_then(Value::as_array);
    let correct_index = properties.get("correct_index").and_then(Value::as_u64);
    match (choices, correct_index) {
        (Some(choices), Some(idx)) => choices
            .get(idx as usize)
            .and_then(|c| c.get("text"))
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        _ => String::new(),
    }
}
