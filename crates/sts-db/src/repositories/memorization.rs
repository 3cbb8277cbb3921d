use chrono::{DateTime, Utc};
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::models::MemorizationItemRow;

pub async fn get_item<'e, E>(
    executor: E,
    item_id: Uuid,
) -> Result<Option<MemorizationItemRow>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, user_id, collection_id, interval_days, easiness,
                   next_review_at, last_reviewed_at, created_at, updated_at
            FROM memorization_items
            WHERE id = $1
        "#,
    )
    .bind(item_id)
    .fetch_optional(executor)
    .await
}

/// Load an item and lock its row until the surrounding transaction ends.
///
/// Must run inside a transaction; on a bare pool the lock is released immediately.
pub async fn get_item_for_update<'e, E>(
    executor: E,
    item_id: Uuid,
) -> Result<Option<MemorizationItemRow>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, user_id, collection_id, interval_days, easiness,
                   next_review_at, last_reviewed_at, created_at, updated_at
            FROM memorization_items
            WHERE id = $1
            FOR UPDATE
        "#,
    )
    .bind(item_id)
    .fetch_optional(executor)
    .await
}

/// Insert a fresh item: interval 1, easiness 2.5, due at `now`.
pub async fn insert_item<'e, E>(
    executor: E,
    user_id: Uuid,
    collection_id: Uuid,
    now: DateTime<Utc>,
) -> Result<MemorizationItemRow, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            INSERT INTO memorization_items (user_id, collection_id, interval_days, easiness, next_review_at)
            VALUES ($1, $2, 1, 2.5, $3)
            RETURNING id, user_id, collection_id, interval_days, easiness,
                      next_review_at, last_reviewed_at, created_at, updated_at
        "#,
    )
    .bind(user_id)
    .bind(collection_id)
    .bind(now)
    .fetch_one(executor)
    .await
}

/// Persist a new scheduling state. Returns `false` when no row has that id.
pub async fn update_schedule<'e, E>(
    executor: E,
    item_id: Uuid,
    interval_days: i32,
    easiness: f64,
    next_review_at: DateTime<Utc>,
    last_reviewed_at: Option<DateTime<Utc>>,
) -> Result<bool, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    let result = sqlx::query(
        // language=PostgreSQL
        r#"
            UPDATE memorization_items
            SET interval_days = $2,
                easiness = $3,
                next_review_at = $4,
                last_reviewed_at = $5,
                updated_at = NOW()
            WHERE id = $1
        "#,
    )
    .bind(item_id)
    .bind(interval_days)
    .bind(easiness)
    .bind(next_review_at)
    .bind(last_reviewed_at)
    .execute(executor)
    .await?;
    Ok(result.rows_affected() > 0)
}

/// Items of a user that are due at `now`, earliest first.
pub async fn list_due_items<'e, E>(
    executor: E,
    user_id: Uuid,
    now: DateTime<Utc>,
    limit: i64,
) -> Result<Vec<MemorizationItemRow>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, user_id, collection_id, interval_days, easiness,
                   next_review_at, last_reviewed_at, created_at, updated_at
            FROM memorization_items
            WHERE user_id = $1 AND next_review_at <= $2
            ORDER BY next_review_at, id
            LIMIT $3
        "#,
    )
    .bind(user_id)
    .bind(now)
    .bind(limit)
    .fetch_all(executor)
    .await
}
