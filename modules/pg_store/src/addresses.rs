use explorer_genesis_common::store::StoreError;
use sqlx::PgPool;

use crate::db_err;

pub(crate) async fn insert(
    pool: &PgPool,
    addresses: &[String],
) -> Result<Vec<(String, u64)>, StoreError> {
    if addresses.is_empty() {
        return Ok(Vec::new());
    }

    let rows: Vec<(i64, String)> = sqlx::query_as(
        r#"
        INSERT INTO addresses (address)
        SELECT * FROM UNNEST($1::varchar[])
        RETURNING id, address
        "#,
    )
    .bind(addresses.to_vec())
    .fetch_all(pool)
    .await
    .map_err(db_err)?;

    Ok(rows
        .into_iter()
        .map(|(id, address)| (address, id as u64))
        .collect())
}

pub(crate) async fn find_id(pool: &PgPool, address: &str) -> Result<Option<u64>, StoreError> {
    let id: Option<i64> = sqlx::query_scalar("SELECT id FROM addresses WHERE address = $1")
        .bind(address)
        .fetch_optional(pool)
        .await
        .map_err(db_err)?;
    Ok(id.map(|id| id as u64))
}

pub(crate) async fn count(pool: &PgPool) -> Result<u64, StoreError> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM addresses")
        .fetch_one(pool)
        .await
        .map_err(db_err)?;
    Ok(count as u64)
}
