#![cfg(feature = "pg-tests")]

//! Requires a running Postgres reachable via `DATABASE_URL`.

use content_store::{DeckKind, DeckTier, Difficulty, StoreError};
use serde_json::json;
use uuid::Uuid;

async fn connect() -> sqlx::PgPool {
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for pg-tests");
    let config = content_config::StoreConfig { database_url, min_connections: 1, max_connections: 5 };
    content_store::connect(&config).await.expect("connect to postgres")
}

#[tokio::test]
async fn reorder_matches_the_given_card_order() {
    let pool = connect().await;

    let deck = content_store::create_deck(&pool, "Reorder Test Deck", DeckKind::Trivia, DeckTier::Free, json!({}))
        .await
        .unwrap();

    let a = content_store::create_card(&pool, deck.id, "a", json!({}), Difficulty::Easy).await.unwrap();
    let b = content_store::create_card(&pool, deck.id, "b", json!({}), Difficulty::Easy).await.unwrap();
    let c = content_store::create_card(&pool, deck.id, "c", json!({}), Difficulty::Easy).await.unwrap();

    let reordered = content_store::reorder_cards(&pool, deck.id, &[c.id, a.id, b.id]).await.unwrap();

    let ids: Vec<_> = reordered.iter().map(|card| card.id).collect();
    assert_eq!(ids, vec![c.id, a.id, b.id]);
    let positions: Vec<_> = reordered.iter().map(|card| card.position).collect();
    assert_eq!(positions, vec![0, 1, 2]);

    for card_id in [a.id, b.id, c.id] {
        content_store::delete_card(&pool, card_id).await.unwrap();
    }
    content_store::delete_deck(&pool, deck.id).await.unwrap();
}

#[tokio::test]
async fn reorder_rejects_a_card_id_from_another_deck() {
    let pool = connect().await;

    let deck = content_store::create_deck(&pool, "Reorder Mismatch Deck", DeckKind::Trivia, DeckTier::Free, json!({}))
        .await
        .unwrap();
    let a = content_store::create_card(&pool, deck.id, "a", json!({}), Difficulty::Easy).await.unwrap();

    let foreign_id = Uuid::new_v4();
    let result = content_store::reorder_cards(&pool, deck.id, &[a.id, foreign_id]).await;
    assert!(matches!(result, Err(StoreError::ReorderForeignCard)));

    let cards = content_store::get_deck(&pool, deck.id).await.unwrap().unwrap().1;
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].position, 0);

    content_store::delete_card(&pool, a.id).await.unwrap();
    content_store::delete_deck(&pool, deck.id).await.unwrap();
}
