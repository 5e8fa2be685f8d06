use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Result, StoreError};
use crate::models::{Card, Deck, DeckKind, DeckTier, Difficulty};

pub async fn list_decks(
    pool: &PgPool,
    kind: Option<DeckKind>,
    tier: Option<DeckTier>,
    limit: i64,
    offset: i64,
) -> Result<(Vec<Deck>, i64)> {
    let total: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM decks WHERE ($1::deck_kind IS NULL OR kind = $1) AND ($2::deck_tier IS NULL OR tier = $2)",
    )
    .bind(kind)
    .bind(tier)
    .fetch_one(pool)
    .await?;

    let decks = sqlx::query_as::<_, Deck>(
        "SELECT id, title, kind, tier, properties, card_count, created_at FROM decks \
         WHERE ($1::deck_kind IS NULL OR kind = $1) AND ($2::deck_tier IS NULL OR tier = $2) \
         ORDER BY created_at DESC LIMIT $3 OFFSET $4",
    )
    .bind(kind)
    .bind(tier)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok((decks, total))
}

pub async fn get_deck(pool: &PgPool, deck_id: Uuid) -> Result<Option<(Deck, Vec<Card>)>> {
    let deck = sqlx::query_as::<_, Deck>(
        "SELECT id, title, kind, tier, properties, card_count, created_at FROM decks WHERE id = $1",
    )
    .bind(deck_id)
    .fetch_optional(pool)
    .await?;

    let Some(deck) = deck else { return Ok(None) };

    let cards = sqlx::query_as::<_, Card>(
        "SELECT id, deck_id, position, question, properties, difficulty, source_id, source_date \
         FROM cards WHERE deck_id = $1 ORDER BY position",
    )
    .bind(deck_id)
    .fetch_all(pool)
    .await?;

    Ok(Some((deck, cards)))
}

/// Bulk-fetch every published deck of a kind together with its cards,
/// for the mobile-app adapter surfaces.
pub async fn get_all_published(pool: &PgPool, kind: DeckKind, tier: Option<DeckTier>) -> Result<Vec<(Deck, Vec<Card>)>> {
    let decks = sqlx::query_as::<_, Deck>(
        "SELECT id, title, kind, tier, properties, card_count, created_at FROM decks \
         WHERE kind = $1 AND COALESCE(properties->>'status', 'published') = 'published' \
         AND ($2::deck_tier IS NULL OR tier = $2) ORDER BY created_at DESC",
    )
    .bind(kind)
    .bind(tier)
    .fetch_all(pool)
    .await?;

    let mut out = Vec::with_capacity(decks.len());
    for deck in decks {
        let cards = sqlx::query_as::<_, Card>(
            "SELECT id, deck_id, position, question, properties, difficulty, source_id, source_date \
             FROM cards WHERE deck_id = $1 ORDER BY position",
        )
        .bind(deck.id)
        .fetch_all(pool)
        .await?;
        out.push((deck, cards));
    }
    Ok(out)
}

pub async fn categories_with_counts(pool: &PgPool, tier: Option<DeckTier>) -> Result<Vec<crate::models::CategoryCount>> {
    let rows: Vec<(String, Option<String>, i32)> = sqlx::query_as(
        "SELECT title, properties->>'pic' AS pic, card_count FROM decks \
         WHERE kind = 'trivia' AND COALESCE(properties->>'status', 'published') = 'published' \
         AND ($1::deck_tier IS NULL OR tier = $1) ORDER BY title",
    )
    .bind(tier)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|(title, pic, card_count)| crate::models::CategoryCount { title, pic, card_count })
        .collect())
}

pub async fn create_deck(pool: &PgPool, title: &str, kind: DeckKind, tier: DeckTier, properties: Value) -> Result<Deck> {
    let id = Uuid::new_v4();
    let deck = sqlx::query_as::<_, Deck>(
        "INSERT INTO decks (id, title, kind, tier, properties) VALUES ($1, $2, $3, $4, $5) \
         RETURNING id, title, kind, tier, properties, card_count, created_at",
    )
    .bind(id)
    .bind(title)
    .bind(kind)
    .bind(tier)
    .bind(properties)
    .fetch_one(pool)
    .await?;
    Ok(deck)
}

pub async fn update_deck(pool: &PgPool, deck_id: Uuid, title: Option<&str>, properties: Option<Value>) -> Result<Deck> {
    let deck = sqlx::query_as::<_, Deck>(
        "UPDATE decks SET title = COALESCE($2, title), properties = COALESCE($3, properties) \
         WHERE id = $1 RETURNING id, title, kind, tier, properties, card_count, created_at",
    )
    .bind(deck_id)
    .bind(title)
    .bind(properties)
    .fetch_optional(pool)
    .await?
    .ok_or(StoreError::NotFound("deck"))?;
    Ok(deck)
}

pub async fn delete_deck(pool: &PgPool, deck_id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM decks WHERE id = $1").bind(deck_id).execute(pool).await?;
    Ok(result.rows_affected() == 1)
}

pub async fn create_card(pool: &PgPool, deck_id: Uuid, question: &str, properties: Value, difficulty: Difficulty) -> Result<Card> {
    let next_position: i32 = sqlx::query_scalar("SELECT COALESCE(MAX(position), -1) + 1 FROM cards WHERE deck_id = $1")
        .bind(deck_id)
        .fetch_one(pool)
        .await?;

    let id = Uuid::new_v4();
    let card = sqlx::query_as::<_, Card>(
        "INSERT INTO cards (id, deck_id, position, question, properties, difficulty) VALUES ($1, $2, $3, $4, $5, $6) \
         RETURNING id, deck_id, position, question, properties, difficulty, source_id, source_date",
    )
    .bind(id)
    .bind(deck_id)
    .bind(next_position)
    .bind(question)
    .bind(properties)
    .bind(difficulty)
    .fetch_one(pool)
    .await?;
    Ok(card)
}

pub async fn update_card(
    pool: &PgPool,
    card_id: Uuid,
    question: Option<&str>,
    properties: Option<Value>,
    difficulty: Option<Difficulty>,
) -> Result<Card> {
    let card = sqlx::query_as::<_, Card>(
        "UPDATE cards SET question = COALESCE($2, question), properties = COALESCE($3, properties), \
         difficulty = COALESCE($4, difficulty) WHERE id = $1 \
         RETURNING id, deck_id, position, question, properties, difficulty, source_id, source_date",
    )
    .bind(card_id)
    .bind(question)
    .bind(properties)
    .bind(difficulty)
    .fetch_optional(pool)
    .await?
    .ok_or(StoreError::NotFound("card"))?;
    Ok(card)
}

pub async fn delete_card(pool: &PgPool, card_id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM cards WHERE id = $1").bind(card_id).execute(pool).await?;
    Ok(result.rows_affected() == 1)
}

/// Reorder a deck's cards to match `card_ids`, applying every position
/// update in a single transaction so a crash mid-reorder can't leave a
/// deck with duplicate or skipped positions.
pub async fn reorder_cards(pool: &PgPool, deck_id: Uuid, card_ids: &[Uuid]) -> Result<Vec<Card>> {
    let mut tx = pool.begin().await?;

    let owned: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM cards WHERE deck_id = $1 AND id = ANY($2)")
        .bind(deck_id)
        .bind(card_ids)
        .fetch_one(&mut *tx)
        .await?;
    if owned as usize != card_ids.len() {
        return Err(StoreError::ReorderForeignCard);
    }

    for (position, card_id) in card_ids.iter().enumerate() {
        sqlx::query("UPDATE cards SET position = $1 WHERE id = $2 AND deck_id = $3")
            .bind(position as i32)
            .bind(card_id)
            .bind(deck_id)
            .execute(&mut *tx)
            .await?;
    }
    tx.commit().await?;

    let cards = sqlx::query_as::<_, Card>(
        "SELECT id, deck_id, position, question, properties, difficulty, source_id, source_date \
         FROM cards WHERE deck_id = $1 ORDER BY position",
    )
    .bind(deck_id)
    .fetch_all(pool)
    .await?;
    Ok(cards)
}
