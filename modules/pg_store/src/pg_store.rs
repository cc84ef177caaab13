//! Postgres implementation of the genesis store. Batch inserts go through
//! UNNEST arrays so a whole chunk is a single round-trip; decimal-string
//! amounts are bound as text and cast to numeric in SQL.

pub mod configuration;

mod addresses;
mod balances;
mod coins;
mod liquidity_pools;
mod validators;

use async_trait::async_trait;
use explorer_genesis_common::records::{
    Balance, Coin, LiquidityPool, Order, Stake, Unbond, Validator, ValidatorPublicKey,
};
use explorer_genesis_common::store::{CoinInfo, GenesisStore, StoreError};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

use crate::configuration::DatabaseConfig;

pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StoreError> {
        info!(
            "Connecting to Postgres at {}:{}/{}",
            config.host, config.port, config.name
        );
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.url())
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;
        Ok(Self { pool })
    }
}

pub(crate) fn db_err(error: sqlx::Error) -> StoreError {
    StoreError::Database(error.to_string())
}

#[async_trait]
impl GenesisStore for PgStore {
    async fn insert_addresses(
        &self,
        addresses: &[String],
    ) -> Result<Vec<(String, u64)>, StoreError> {
        addresses::insert(&self.pool, addresses).await
    }

    async fn find_address_id(&self, address: &str) -> Result<Option<u64>, StoreError> {
        addresses::find_id(&self.pool, address).await
    }

    async fn address_count(&self) -> Result<u64, StoreError> {
        addresses::count(&self.pool).await
    }

    async fn insert_coins(&self, coins: &[Coin]) -> Result<(), StoreError> {
        coins::insert(&self.pool, coins).await
    }

    async fn find_coin_by_symbol(&self, symbol: &str) -> Result<Option<CoinInfo>, StoreError> {
        coins::find_by_symbol(&self.pool, symbol).await
    }

    async fn insert_validators(&self, validators: &[Validator]) -> Result<(), StoreError> {
        validators::insert(&self.pool, validators).await
    }

    async fn insert_validator_public_keys(
        &self,
        keys: &[ValidatorPublicKey],
    ) -> Result<(), StoreError> {
        validators::insert_public_keys(&self.pool, keys).await
    }

    async fn find_validator_id_by_public_key(
        &self,
        public_key: &str,
    ) -> Result<Option<u64>, StoreError> {
        validators::find_id_by_public_key(&self.pool, public_key).await
    }

    async fn validator_exists(&self, id: u64) -> Result<bool, StoreError> {
        validators::exists(&self.pool, id).await
    }

    async fn validator_count(&self) -> Result<u64, StoreError> {
        validators::count(&self.pool).await
    }

    async fn insert_balances(&self, balances: &[Balance]) -> Result<(), StoreError> {
        balances::insert(&self.pool, balances).await
    }

    async fn balance_count(&self) -> Result<u64, StoreError> {
        balances::count(&self.pool).await
    }

    async fn insert_stakes(&self, stakes: &[Stake]) -> Result<(), StoreError> {
        validators::insert_stakes(&self.pool, stakes).await
    }

    async fn insert_unbonds(&self, unbonds: &[Unbond]) -> Result<(), StoreError> {
        validators::insert_unbonds(&self.pool, unbonds).await
    }

    async fn insert_liquidity_pools(&self, pools: &[LiquidityPool]) -> Result<(), StoreError> {
        liquidity_pools::insert(&self.pool, pools).await
    }

    async fn insert_orders(&self, orders: &[Order]) -> Result<(), StoreError> {
        liquidity_pools::insert_orders(&self.pool, orders).await
    }
}
