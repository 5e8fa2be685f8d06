//! Postgres-backed persistence for decks, cards, family trees, and the
//! ingestion pipeline's bookkeeping tables.

mod chat;
mod decks;
mod error;
mod family;
mod ingestion;
mod models;
mod pool;
mod search;
mod stats;

pub use chat::{append_message, get_history, get_or_create_session};
pub use decks::{
    categories_with_counts, create_card, create_deck, delete_card, delete_deck, get_all_published, get_deck,
    list_decks, reorder_cards, update_card, update_deck,
};
pub use error::{Result, StoreError};
pub use family::{
    create_family, create_person, create_relationship, delete_family, delete_person, delete_relationship,
    find_person_fuzzy, get_family, get_family_or_not_found, list_families, list_people, list_relationships,
    NewPerson,
};
pub use ingestion::{
    ensure_category_deck, ensure_provider, create_run, existing_trivia_signatures, finish_run, insert_ingested_card,
    list_providers, list_runs,
};
pub use models::*;
pub use pool::connect;
pub use search::search_cards;
pub use stats::get_stats;

pub use sqlx::PgPool;
