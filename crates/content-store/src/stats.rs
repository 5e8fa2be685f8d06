use sqlx::PgPool;

use crate::error::Result;
use crate::models::Stats;

pub async fn get_stats(pool: &PgPool) -> Result<Stats> {
    let total_decks: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM decks").fetch_one(pool).await?;
    let total_cards: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM cards").fetch_one(pool).await?;
    let total_sources: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM source_providers").fetch_one(pool).await?;

    let decks_by_kind: Vec<(String, i64)> =
        sqlx::query_as("SELECT kind::text, COUNT(*) FROM decks GROUP BY kind ORDER BY kind")
            .fetch_all(pool)
            .await?;

    Ok(Stats { total_decks, total_cards, total_sources, decks_by_kind })
}
