use sqlx::PgPool;
use uuid::Uuid;

use crate::error::Result;
use crate::models::ChatSession;

/// Return the family's most recent chat session, creating an empty one
/// if none exists yet.
pub async fn get_or_create_session(pool: &PgPool, family_id: Uuid) -> Result<ChatSession> {
    let existing = sqlx::query_as::<_, ChatSession>(
        "SELECT id, family_id, messages, created_at, updated_at FROM family_chat_sessions \
         WHERE family_id = $1 ORDER BY updated_at DESC LIMIT 1",
    )
    .bind(family_id)
    .fetch_optional(pool)
    .await?;

    if let Some(session) = existing {
        return Ok(session);
    }

    let id = Uuid::new_v4();
    let session = sqlx::query_as::<_, ChatSession>(
        "INSERT INTO family_chat_sessions (id, family_id, messages) VALUES ($1, $2, '[]'::jsonb) \
         RETURNING id, family_id, messages, created_at, updated_at",
    )
    .bind(id)
    .bind(family_id)
    .fetch_one(pool)
    .await?;
    Ok(session)
}

/// Append a message to the session's jsonb array in one statement, so
/// concurrent appends from overlapping chat turns can't clobber each
/// other the way a read-modify-write from the app layer would.
pub async fn append_message(pool: &PgPool, session_id: Uuid, role: &str, content: &str) -> Result<()> {
    sqlx::query(
        "UPDATE family_chat_sessions \
         SET messages = messages || jsonb_build_array(jsonb_build_object('role', $1::text, 'content', $2::text)), \
             updated_at = now() \
         WHERE id = $3",
    )
    .bind(role)
    .bind(content)
    .bind(session_id)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn get_history(pool: &PgPool, family_id: Uuid) -> Result<Option<ChatSession>> {
    let session = sqlx::query_as::<_, ChatSession>(
        "SELECT id, family_id, messages, created_at, updated_at FROM family_chat_sessions \
         WHERE family_id = $1 ORDER BY updated_at DESC LIMIT 1",
    )
    .bind(family_id)
    .fetch_optional(pool)
    .await?;
    Ok(session)
}
