use sqlx::PgPool;

use crate::error::Result;
use crate::models::SearchHit;

/// Full-text search over card question text, ranked by `ts_rank`.
/// `plainto_tsquery` parses arbitrary user text (no tsquery operator
/// syntax to escape) and ANDs the resulting terms together.
pub async fn search_cards(pool: &PgPool, query: &str, limit: i64) -> Result<(Vec<SearchHit>, i64)> {
    let total: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM cards c WHERE to_tsvector('english', c.question) @@ plainto_tsquery('english', $1)",
    )
    .bind(query)
    .fetch_one(pool)
    .await?;

    let rows = sqlx::query_as::<_, (uuid::Uuid, uuid::Uuid, String, crate::models::DeckKind, String, serde_json::Value, f32)>(
        "SELECT c.id, c.deck_id, d.title, d.kind, c.question, c.properties, \
         ts_rank(to_tsvector('english', c.question), plainto_tsquery('english', $1)) AS rank \
         FROM cards c JOIN decks d ON d.id = c.deck_id \
         WHERE to_tsvector('english', c.question) @@ plainto_tsquery('english', $1) \
         ORDER BY rank DESC LIMIT $2",
    )
    .bind(query)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    let hits = rows
        .into_iter()
        .map(|(card_id, deck_id, deck_title, deck_kind, question, properties, rank)| SearchHit {
            card_id,
            deck_id,
            deck_title,
            deck_kind,
            question,
            properties,
            rank,
        })
        .collect();

    Ok((hits, total))
}
