use explorer_genesis_common::records::{Coin, CoinKind};
use explorer_genesis_common::store::{CoinInfo, StoreError};
use sqlx::PgPool;

use crate::db_err;

fn kind_code(kind: CoinKind) -> i16 {
    match kind {
        CoinKind::Base => 1,
        CoinKind::Token => 2,
        CoinKind::PoolToken => 3,
    }
}

pub(crate) async fn insert(pool: &PgPool, coins: &[Coin]) -> Result<(), StoreError> {
    if coins.is_empty() {
        return Ok(());
    }

    let ids: Vec<i64> = coins.iter().map(|c| c.id as i64).collect();
    let kinds: Vec<i16> = coins.iter().map(|c| kind_code(c.kind)).collect();
    let names: Vec<String> = coins.iter().map(|c| c.name.clone()).collect();
    let symbols: Vec<String> = coins.iter().map(|c| c.symbol.clone()).collect();
    let volumes: Vec<String> = coins.iter().map(|c| c.volume.clone()).collect();
    let crrs: Vec<i64> = coins.iter().map(|c| c.crr as i64).collect();
    let reserves: Vec<String> = coins.iter().map(|c| c.reserve.clone()).collect();
    let max_supplies: Vec<String> = coins.iter().map(|c| c.max_supply.clone()).collect();
    let versions: Vec<i64> = coins.iter().map(|c| c.version as i64).collect();
    let owners: Vec<Option<i64>> = coins
        .iter()
        .map(|c| c.owner_address_id.map(|id| id as i64))
        .collect();

    sqlx::query(
        r#"
        INSERT INTO coins
            (id, type, name, symbol, volume, crr, reserve, max_supply, version, owner_address_id)
        SELECT id, type, name, symbol, volume::numeric, crr, reserve::numeric,
               max_supply::numeric, version, owner_address_id
        FROM UNNEST($1::bigint[], $2::smallint[], $3::text[], $4::text[], $5::text[],
                    $6::bigint[], $7::text[], $8::text[], $9::bigint[], $10::bigint[])
            AS t(id, type, name, symbol, volume, crr, reserve, max_supply, version,
                 owner_address_id)
        "#,
    )
    .bind(ids)
    .bind(kinds)
    .bind(names)
    .bind(symbols)
    .bind(volumes)
    .bind(crrs)
    .bind(reserves)
    .bind(max_supplies)
    .bind(versions)
    .bind(owners)
    .execute(pool)
    .await
    .map_err(db_err)?;

    Ok(())
}

pub(crate) async fn find_by_symbol(
    pool: &PgPool,
    symbol: &str,
) -> Result<Option<CoinInfo>, StoreError> {
    let row: Option<(i64, String)> =
        sqlx::query_as("SELECT id, volume::text FROM coins WHERE symbol = $1")
            .bind(symbol)
            .fetch_optional(pool)
            .await
            .map_err(db_err)?;

    Ok(row.map(|(id, volume)| CoinInfo {
        id: id as u64,
        volume,
    }))
}
