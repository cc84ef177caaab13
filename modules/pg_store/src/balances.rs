use explorer_genesis_common::records::Balance;
use explorer_genesis_common::store::StoreError;
use sqlx::PgPool;

use crate::db_err;

pub(crate) async fn insert(pool: &PgPool, balances: &[Balance]) -> Result<(), StoreError> {
    if balances.is_empty() {
        return Ok(());
    }

    let address_ids: Vec<i64> = balances.iter().map(|b| b.address_id as i64).collect();
    let coin_ids: Vec<i64> = balances.iter().map(|b| b.coin_id as i64).collect();
    let values: Vec<String> = balances.iter().map(|b| b.value.clone()).collect();

    sqlx::query(
        r#"
        INSERT INTO balances (address_id, coin_id, value)
        SELECT address_id, coin_id, value::numeric
        FROM UNNEST($1::bigint[], $2::bigint[], $3::text[])
            AS t(address_id, coin_id, value)
        "#,
    )
    .bind(address_ids)
    .bind(coin_ids)
    .bind(values)
    .execute(pool)
    .await
    .map_err(db_err)?;

    Ok(())
}

pub(crate) async fn count(pool: &PgPool) -> Result<u64, StoreError> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM balances")
        .fetch_one(pool)
        .await
        .map_err(db_err)?;
    Ok(count as u64)
}
