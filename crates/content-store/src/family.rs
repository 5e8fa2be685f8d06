use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Result, StoreError};
use crate::models::{Family, Person, PersonStatus, Relationship, RelationshipType};

pub async fn create_family(pool: &PgPool, name: &str) -> Result<Family> {
    let id = Uuid::new_v4();
    let family = sqlx::query_as::<_, Family>(
        "INSERT INTO families (id, name) VALUES ($1, $2) RETURNING id, name, created_at, updated_at",
    )
    .bind(id)
    .bind(name)
    .fetch_one(pool)
    .await?;
    Ok(family)
}

pub async fn get_family(pool: &PgPool, family_id: Uuid) -> Result<Option<Family>> {
    let family = sqlx::query_as::<_, Family>("SELECT id, name, created_at, updated_at FROM families WHERE id = $1")
        .bind(family_id)
        .fetch_optional(pool)
        .await?;
    Ok(family)
}

pub async fn list_families(pool: &PgPool) -> Result<Vec<Family>> {
    let families = sqlx::query_as::<_, Family>("SELECT id, name, created_at, updated_at FROM families ORDER BY created_at DESC")
        .fetch_all(pool)
        .await?;
    Ok(families)
}

pub async fn delete_family(pool: &PgPool, family_id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM families WHERE id = $1").bind(family_id).execute(pool).await?;
    Ok(result.rows_affected() == 1)
}

#[derive(Debug, Clone, Default)]
pub struct NewPerson<'a> {
    pub name: &'a str,
    pub nickname: Option<&'a str>,
    pub maiden_name: Option<&'a str>,
    pub born: Option<i32>,
    pub status: Option<PersonStatus>,
    pub gender: Option<&'a str>,
    pub notes: Option<&'a str>,
    pub player: bool,
    pub placeholder: bool,
    pub photo_url: Option<&'a str>,
}

const PERSON_COLUMNS: &str = "id, family_id, name, nickname, maiden_name, born, status, gender, notes, player, placeholder, photo_url";

pub async fn create_person(pool: &PgPool, family_id: Uuid, new: NewPerson<'_>) -> Result<Person> {
    let id = Uuid::new_v4();
    let status = new.status.unwrap_or(PersonStatus::Living);
    let sql = format!(
        "INSERT INTO family_people ({PERSON_COLUMNS}) VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,$10,$11,$12) RETURNING {PERSON_COLUMNS}",
    );
    let person = sqlx::query_as::<_, Person>(&sql)
        .bind(id)
        .bind(family_id)
        .bind(new.name)
        .bind(new.nickname)
        .bind(new.maiden_name)
        .bind(new.born)
        .bind(status)
        .bind(new.gender)
        .bind(new.notes)
        .bind(new.player)
        .bind(new.placeholder)
        .bind(new.photo_url)
        .fetch_one(pool)
        .await?;
    Ok(person)
}

pub async fn delete_person(pool: &PgPool, person_id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM family_people WHERE id = $1").bind(person_id).execute(pool).await?;
    Ok(result.rows_affected() == 1)
}

pub async fn list_people(pool: &PgPool, family_id: Uuid) -> Result<Vec<Person>> {
    let sql = format!("SELECT {PERSON_COLUMNS} FROM family_people WHERE family_id = $1 ORDER BY name");
    let people = sqlx::query_as::<_, Person>(&sql).bind(family_id).fetch_all(pool).await?;
    Ok(people)
}

/// Exact case-insensitive match first, then a substring match, mirroring
/// how a chat assistant resolves a spoken name to a row before attaching
/// a relationship to it.
pub async fn find_person_fuzzy(pool: &PgPool, family_id: Uuid, name: &str) -> Result<Option<Person>> {
    let exact_sql = format!("SELECT {PERSON_COLUMNS} FROM family_people WHERE family_id = $1 AND LOWER(name) = LOWER($2)");
    if let Some(person) = sqlx::query_as::<_, Person>(&exact_sql).bind(family_id).bind(name).fetch_optional(pool).await? {
        return Ok(Some(person));
    }

    let fuzzy_sql = format!(
        "SELECT {PERSON_COLUMNS} FROM family_people WHERE family_id = $1 AND LOWER(name) LIKE '%' || LOWER($2) || '%' LIMIT 1",
    );
    let person = sqlx::query_as::<_, Person>(&fuzzy_sql).bind(family_id).bind(name).fetch_optional(pool).await?;
    Ok(person)
}

pub async fn create_relationship(
    pool: &PgPool,
    family_id: Uuid,
    rel_type: RelationshipType,
    from_id: Uuid,
    to_id: Uuid,
    year: Option<i32>,
    notes: Option<&str>,
) -> Result<Relationship> {
    let id = Uuid::new_v4();
    let rel = sqlx::query_as::<_, Relationship>(
        "INSERT INTO family_relationships (id, family_id, type, from_id, to_id, year, notes) \
         VALUES ($1, $2, $3, $4, $5, $6, $7) \
         RETURNING id, family_id, type AS rel_type, from_id, to_id, year, ended, end_reason, notes",
    )
    .bind(id)
    .bind(family_id)
    .bind(rel_type)
    .bind(from_id)
    .bind(to_id)
    .bind(year)
    .bind(notes)
    .fetch_one(pool)
    .await?;
    Ok(rel)
}

pub async fn delete_relationship(pool: &PgPool, rel_id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM family_relationships WHERE id = $1").bind(rel_id).execute(pool).await?;
    Ok(result.rows_affected() == 1)
}

pub async fn list_relationships(pool: &PgPool, family_id: Uuid) -> Result<Vec<Relationship>> {
    let relationships = sqlx::query_as::<_, Relationship>(
        "SELECT id, family_id, type AS rel_type, from_id, to_id, year, ended, end_reason, notes \
         FROM family_relationships WHERE family_id = $1 ORDER BY created_at",
    )
    .bind(family_id)
    .fetch_all(pool)
    .await?;
    Ok(relationships)
}

pub async fn get_family_or_not_found(pool: &PgPool, family_id: Uuid) -> Result<Family> {
    get_family(pool, family_id).await?.ok_or(StoreError::NotFound("family"))
}
