use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, Serialize, Deserialize)]
#[sqlx(type_name = "deck_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DeckKind {
    Flashcard,
    Trivia,
    Newsquiz,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, Serialize, Deserialize)]
#[sqlx(type_name = "deck_tier", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DeckTier {
    Free,
    Premium,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, Serialize, Deserialize)]
#[sqlx(type_name = "difficulty", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, Serialize, Deserialize)]
#[sqlx(type_name = "source_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    Api,
    Manual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, Serialize, Deserialize)]
#[sqlx(type_name = "person_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PersonStatus {
    Living,
    Deceased,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, Serialize, Deserialize)]
#[sqlx(type_name = "relationship_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RelationshipType {
    ParentOf,
    Married,
    Divorced,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Deck {
    pub id: Uuid,
    pub title: String,
    pub kind: DeckKind,
    pub tier: DeckTier,
    pub properties: Value,
    pub card_count: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Card {
    pub id: Uuid,
    pub deck_id: Uuid,
    pub position: i32,
    pub question: String,
    pub properties: Value,
    pub difficulty: Difficulty,
    pub source_id: Option<Uuid>,
    pub source_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SourceProvider {
    pub id: Uuid,
    pub name: String,
    pub provider_type: SourceType,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SourceRun {
    pub id: Uuid,
    pub provider_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub items_fetched: i32,
    pub items_added: i32,
    pub items_skipped: i32,
    pub error: Option<String>,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Family {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Person {
    pub id: Uuid,
    pub family_id: Uuid,
    pub name: String,
    pub nickname: Option<String>,
    pub maiden_name: Option<String>,
    pub born: Option<i32>,
    pub status: PersonStatus,
    pub gender: Option<String>,
    pub notes: Option<String>,
    pub player: bool,
    pub placeholder: bool,
    pub photo_url: Option<String>,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Relationship {
    pub id: Uuid,
    pub family_id: Uuid,
    pub rel_type: RelationshipType,
    pub from_id: Uuid,
    pub to_id: Uuid,
    pub year: Option<i32>,
    pub ended: bool,
    pub end_reason: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ChatSession {
    pub id: Uuid,
    pub family_id: Uuid,
    pub messages: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Stats {
    pub total_decks: i64,
    pub total_cards: i64,
    pub total_sources: i64,
    pub decks_by_kind: Vec<(String, i64)>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryCount {
    pub title: String,
    pub pic: Option<String>,
    pub card_count: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchHit {
    pub card_id: Uuid,
    pub deck_id: Uuid,
    pub deck_title: String,
    pub deck_kind: DeckKind,
    pub question: String,
    pub properties: Value,
    pub rank: f32,
}
