//! Validator, validator public key, stake and unbond persistence. Stakes
//! and unbonds live here because they are keyed by validator id, matching
//! the table ownership in the explorer schema.

use explorer_genesis_common::records::{Stake, Unbond, Validator, ValidatorPublicKey};
use explorer_genesis_common::store::StoreError;
use sqlx::PgPool;

use crate::db_err;

pub(crate) async fn insert(pool: &PgPool, validators: &[Validator]) -> Result<(), StoreError> {
    if validators.is_empty() {
        return Ok(());
    }

    let ids: Vec<i64> = validators.iter().map(|v| v.id as i64).collect();
    let public_keys: Vec<String> = validators.iter().map(|v| v.public_key.clone()).collect();
    let owners: Vec<i64> = validators.iter().map(|v| v.owner_address_id as i64).collect();
    let rewards: Vec<i64> = validators
        .iter()
        .map(|v| v.reward_address_id as i64)
        .collect();
    let statuses: Vec<i16> = validators.iter().map(|v| v.status as i16).collect();
    let commissions: Vec<i64> = validators.iter().map(|v| v.commission as i64).collect();
    let total_stakes: Vec<String> = validators.iter().map(|v| v.total_stake.clone()).collect();

    sqlx::query(
        r#"
        INSERT INTO validators
            (id, public_key, owner_address_id, reward_address_id, status, commission, total_stake)
        SELECT id, public_key, owner_address_id, reward_address_id, status, commission,
               total_stake::numeric
        FROM UNNEST($1::bigint[], $2::varchar[], $3::bigint[], $4::bigint[], $5::smallint[],
                    $6::bigint[], $7::text[])
            AS t(id, public_key, owner_address_id, reward_address_id, status, commission,
                 total_stake)
        "#,
    )
    .bind(ids)
    .bind(public_keys)
    .bind(owners)
    .bind(rewards)
    .bind(statuses)
    .bind(commissions)
    .bind(total_stakes)
    .execute(pool)
    .await
    .map_err(db_err)?;

    Ok(())
}

pub(crate) async fn insert_public_keys(
    pool: &PgPool,
    keys: &[ValidatorPublicKey],
) -> Result<(), StoreError> {
    if keys.is_empty() {
        return Ok(());
    }

    let validator_ids: Vec<i64> = keys.iter().map(|k| k.validator_id as i64).collect();
    let key_values: Vec<String> = keys.iter().map(|k| k.key.clone()).collect();

    sqlx::query(
        r#"
        INSERT INTO validator_public_keys (validator_id, key)
        SELECT * FROM UNNEST($1::bigint[], $2::varchar[])
        "#,
    )
    .bind(validator_ids)
    .bind(key_values)
    .execute(pool)
    .await
    .map_err(db_err)?;

    Ok(())
}

pub(crate) async fn find_id_by_public_key(
    pool: &PgPool,
    public_key: &str,
) -> Result<Option<u64>, StoreError> {
    let id: Option<i64> =
        sqlx::query_scalar("SELECT validator_id FROM validator_public_keys WHERE key = $1")
            .bind(public_key)
            .fetch_optional(pool)
            .await
            .map_err(db_err)?;
    Ok(id.map(|id| id as u64))
}

pub(crate) async fn exists(pool: &PgPool, id: u64) -> Result<bool, StoreError> {
    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM validators WHERE id = $1)")
        .bind(id as i64)
        .fetch_one(pool)
        .await
        .map_err(db_err)?;
    Ok(exists)
}

pub(crate) async fn count(pool: &PgPool) -> Result<u64, StoreError> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM validators")
        .fetch_one(pool)
        .await
        .map_err(db_err)?;
    Ok(count as u64)
}

pub(crate) async fn insert_stakes(pool: &PgPool, stakes: &[Stake]) -> Result<(), StoreError> {
    if stakes.is_empty() {
        return Ok(());
    }

    let owners: Vec<i64> = stakes.iter().map(|s| s.owner_address_id as i64).collect();
    let validator_ids: Vec<i64> = stakes.iter().map(|s| s.validator_id as i64).collect();
    let coin_ids: Vec<i64> = stakes.iter().map(|s| s.coin_id as i64).collect();
    let values: Vec<String> = stakes.iter().map(|s| s.value.clone()).collect();
    let bip_values: Vec<String> = stakes.iter().map(|s| s.bip_value.clone()).collect();

    sqlx::query(
        r#"
        INSERT INTO stakes (owner_address_id, validator_id, coin_id, value, bip_value)
        SELECT owner_address_id, validator_id, coin_id, value::numeric, bip_value::numeric
        FROM UNNEST($1::bigint[], $2::bigint[], $3::bigint[], $4::text[], $5::text[])
            AS t(owner_address_id, validator_id, coin_id, value, bip_value)
        "#,
    )
    .bind(owners)
    .bind(validator_ids)
    .bind(coin_ids)
    .bind(values)
    .bind(bip_values)
    .execute(pool)
    .await
    .map_err(db_err)?;

    Ok(())
}

pub(crate) async fn insert_unbonds(pool: &PgPool, unbonds: &[Unbond]) -> Result<(), StoreError> {
    if unbonds.is_empty() {
        return Ok(());
    }

    let address_ids: Vec<i64> = unbonds.iter().map(|u| u.address_id as i64).collect();
    let validator_ids: Vec<i64> = unbonds.iter().map(|u| u.validator_id as i64).collect();
    let coin_ids: Vec<i64> = unbonds.iter().map(|u| u.coin_id as i64).collect();
    let block_ids: Vec<i64> = unbonds.iter().map(|u| u.block_id as i64).collect();
    let values: Vec<String> = unbonds.iter().map(|u| u.value.clone()).collect();

    sqlx::query(
        r#"
        INSERT INTO unbonds (address_id, validator_id, coin_id, block_id, value)
        SELECT address_id, validator_id, coin_id, block_id, value::numeric
        FROM UNNEST($1::bigint[], $2::bigint[], $3::bigint[], $4::bigint[], $5::text[])
            AS t(address_id, validator_id, coin_id, block_id, value)
        "#,
    )
    .bind(address_ids)
    .bind(validator_ids)
    .bind(coin_ids)
    .bind(block_ids)
    .bind(values)
    .execute(pool)
    .await
    .map_err(db_err)?;

    Ok(())
}
