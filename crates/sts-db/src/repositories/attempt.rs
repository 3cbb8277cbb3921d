use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::models::{AttemptRow, NewAttempt};

pub async fn list_attempts<'e, E>(
    executor: E,
    user_id: Uuid,
    collection_id: Uuid,
) -> Result<Vec<AttemptRow>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, user_id, collection_id, question_id, group_key,
                   is_correct, answered_at, response_time_seconds
            FROM question_attempts
            WHERE user_id = $1 AND collection_id = $2
        "#,
    )
    .bind(user_id)
    .bind(collection_id)
    .fetch_all(executor)
    .await
}

/// Insert one attempt and return its id. Response times that do not fit the
/// column fail with [`sqlx::Error::Encode`].
pub async fn insert_attempt<'e, E>(executor: E, attempt: &NewAttempt) -> Result<Uuid, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    let result = attempt.result.as_ref();
    let response_time_seconds = attempt
        .stored_response_time()
        .map_err(|err| sqlx::Error::Encode(Box::new(err)))?;

    sqlx::query_scalar(
        // language=PostgreSQL
        r#"
            INSERT INTO question_attempts
                (user_id, collection_id, question_id, group_key, is_correct, answered_at, response_time_seconds)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
        "#,
    )
    .bind(attempt.user_id)
    .bind(attempt.collection_id)
    .bind(attempt.question_id)
    .bind(attempt.group_key.as_deref())
    .bind(result.map(|r| r.is_correct))
    .bind(result.map(|r| r.answered_at))
    .bind(response_time_seconds)
    .fetch_one(executor)
    .await
}
