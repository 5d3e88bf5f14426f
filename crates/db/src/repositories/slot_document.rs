use crate::models::DbSlotDocument;
use chrono::Utc;
use eyre::Result;
use serde_json::Value;
use sqlx::{Pool, Postgres};

pub async fn get_document(pool: &Pool<Postgres>, key: &str) -> Result<Option<DbSlotDocument>> {
    let document = sqlx::query_as::<_, DbSlotDocument>(
        r#"
        SELECT key, value, updated_at
        FROM slot_documents
        WHERE key = $1
        "#,
    )
    .bind(key)
    .fetch_optional(pool)
    .await?;

    Ok(document)
}

pub async fn upsert_document(
    pool: &Pool<Postgres>,
    key: &str,
    value: &Value,
) -> Result<DbSlotDocument> {
    let now = Utc::now();

    let document = sqlx::query_as::<_, DbSlotDocument>(
        r#"
        INSERT INTO slot_documents (key, value, updated_at)
        VALUES ($1, $2, $3)
        ON CONFLICT (key) DO UPDATE
        SET value = EXCLUDED.value, updated_at = EXCLUDED.updated_at
        RETURNING key, value, updated_at
        "#,
    )
    .bind(key)
    .bind(value)
    .bind(now)
    .fetch_one(pool)
    .await?;

    tracing::debug!("Upserted slot document: key={}", key);
    Ok(document)
}
