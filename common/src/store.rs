//! Interface to the relational store, at the granularity the pipeline
//! needs: batch insert per record kind, point lookup by natural key and
//! row counts for the idempotency guard.

use async_trait::async_trait;
use thiserror::Error;

use crate::records::{
    Balance, Coin, LiquidityPool, Order, Stake, Unbond, Validator, ValidatorPublicKey,
};

#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(String),

    #[error("connection error: {0}")]
    Connection(String),
}

/// Looked-up coin: id plus volume, which backs the liquidity figure when
/// a pool resolves its `LP-<id>` token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoinInfo {
    pub id: u64,
    pub volume: String,
}

#[async_trait]
pub trait GenesisStore: Send + Sync {
    /// Inserts a batch of address strings, returning the (address, id)
    /// pairs the store assigned.
    async fn insert_addresses(&self, addresses: &[String])
        -> Result<Vec<(String, u64)>, StoreError>;
    async fn find_address_id(&self, address: &str) -> Result<Option<u64>, StoreError>;
    async fn address_count(&self) -> Result<u64, StoreError>;

    async fn insert_coins(&self, coins: &[Coin]) -> Result<(), StoreError>;
    async fn find_coin_by_symbol(&self, symbol: &str) -> Result<Option<CoinInfo>, StoreError>;

    async fn insert_validators(&self, validators: &[Validator]) -> Result<(), StoreError>;
    async fn insert_validator_public_keys(
        &self,
        keys: &[ValidatorPublicKey],
    ) -> Result<(), StoreError>;
    async fn find_validator_id_by_public_key(
        &self,
        public_key: &str,
    ) -> Result<Option<u64>, StoreError>;
    async fn validator_exists(&self, id: u64) -> Result<bool, StoreError>;
    async fn validator_count(&self) -> Result<u64, StoreError>;

    async fn insert_balances(&self, balances: &[Balance]) -> Result<(), StoreError>;
    async fn balance_count(&self) -> Result<u64, StoreError>;

    async fn insert_stakes(&self, stakes: &[Stake]) -> Result<(), StoreError>;
    async fn insert_unbonds(&self, unbonds: &[Unbond]) -> Result<(), StoreError>;
    async fn insert_liquidity_pools(&self, pools: &[LiquidityPool]) -> Result<(), StoreError>;
    async fn insert_orders(&self, orders: &[Order]) -> Result<(), StoreError>;
}
