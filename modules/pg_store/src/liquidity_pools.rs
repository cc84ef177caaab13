use explorer_genesis_common::records::{LiquidityPool, Order};
use explorer_genesis_common::store::StoreError;
use sqlx::PgPool;

use crate::db_err;

pub(crate) async fn insert(pool: &PgPool, pools: &[LiquidityPool]) -> Result<(), StoreError> {
    if pools.is_empty() {
        return Ok(());
    }

    let ids: Vec<i64> = pools.iter().map(|p| p.id as i64).collect();
    let token_ids: Vec<i64> = pools.iter().map(|p| p.token_id as i64).collect();
    let first_coin_ids: Vec<i64> = pools.iter().map(|p| p.first_coin_id as i64).collect();
    let second_coin_ids: Vec<i64> = pools.iter().map(|p| p.second_coin_id as i64).collect();
    let first_volumes: Vec<String> = pools.iter().map(|p| p.first_coin_volume.clone()).collect();
    let second_volumes: Vec<String> = pools
        .iter()
        .map(|p| p.second_coin_volume.clone())
        .collect();
    let liquidity: Vec<String> = pools.iter().map(|p| p.liquidity.clone()).collect();
    let updated_at: Vec<i64> = pools.iter().map(|p| p.updated_at_block_id as i64).collect();

    sqlx::query(
        r#"
        INSERT INTO liquidity_pools
            (id, token_id, first_coin_id, second_coin_id, first_coin_volume,
             second_coin_volume, liquidity, updated_at_block_id)
        SELECT id, token_id, first_coin_id, second_coin_id, first_coin_volume::numeric,
               second_coin_volume::numeric, liquidity::numeric, updated_at_block_id
        FROM UNNEST($1::bigint[], $2::bigint[], $3::bigint[], $4::bigint[], $5::text[],
                    $6::text[], $7::text[], $8::bigint[])
            AS t(id, token_id, first_coin_id, second_coin_id, first_coin_volume,
                 second_coin_volume, liquidity, updated_at_block_id)
        "#,
    )
    .bind(ids)
    .bind(token_ids)
    .bind(first_coin_ids)
    .bind(second_coin_ids)
    .bind(first_volumes)
    .bind(second_volumes)
    .bind(liquidity)
    .bind(updated_at)
    .execute(pool)
    .await
    .map_err(db_err)?;

    Ok(())
}

pub(crate) async fn insert_orders(pool: &PgPool, orders: &[Order]) -> Result<(), StoreError> {
    if orders.is_empty() {
        return Ok(());
    }

    let ids: Vec<i64> = orders.iter().map(|o| o.id as i64).collect();
    let address_ids: Vec<i64> = orders.iter().map(|o| o.address_id as i64).collect();
    let pool_ids: Vec<i64> = orders.iter().map(|o| o.liquidity_pool_id as i64).collect();
    let sell_ids: Vec<i64> = orders.iter().map(|o| o.coin_sell_id as i64).collect();
    let sell_volumes: Vec<String> = orders.iter().map(|o| o.coin_sell_volume.clone()).collect();
    let buy_ids: Vec<i64> = orders.iter().map(|o| o.coin_buy_id as i64).collect();
    let buy_volumes: Vec<String> = orders.iter().map(|o| o.coin_buy_volume.clone()).collect();
    let prices: Vec<String> = orders.iter().map(|o| o.price.clone()).collect();
    let heights: Vec<i64> = orders.iter().map(|o| o.created_at_block as i64).collect();
    let statuses: Vec<i16> = orders.iter().map(|o| o.status as i16).collect();

    sqlx::query(
        r#"
        INSERT INTO orders
            (id, address_id, liquidity_pool_id, coin_sell_id, coin_sell_volume,
             coin_buy_id, coin_buy_volume, price, created_at_block, status)
        SELECT id, address_id, liquidity_pool_id, coin_sell_id, coin_sell_volume::numeric,
               coin_buy_id, coin_buy_volume::numeric, price::numeric, created_at_block, status
        FROM UNNEST($1::bigint[], $2::bigint[], $3::bigint[], $4::bigint[], $5::text[],
                    $6::bigint[], $7::text[], $8::text[], $9::bigint[], $10::smallint[])
            AS t(id, address_id, liquidity_pool_id, coin_sell_id, coin_sell_volume,
                 coin_buy_id, coin_buy_volume, price, created_at_block, status)
        "#,
    )
    .bind(ids)
    .bind(address_ids)
    .bind(pool_ids)
    .bind(sell_ids)
    .bind(sell_volumes)
    .bind(buy_ids)
    .bind(buy_volumes)
    .bind(prices)
    .bind(heights)
    .bind(statuses)
    .execute(pool)
    .await
    .map_err(db_err)?;

    Ok(())
}
