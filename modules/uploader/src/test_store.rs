//! In-memory store and snapshot source doubles for tests.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use explorer_genesis_common::records::{
    Balance, Coin, LiquidityPool, Order, Stake, Unbond, Validator, ValidatorPublicKey,
};
use explorer_genesis_common::source::{SnapshotSource, SourceError};
use explorer_genesis_common::store::{CoinInfo, GenesisStore, StoreError};
use explorer_genesis_common::wire::RawGenesis;

/// Store backed by plain vectors. `fail_kind` makes every operation on
/// one record kind return a database error, for failure-path tests.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    failing: HashSet<&'static str>,
    next_address_id: u64,
    addresses: Vec<(String, u64)>,
    coins: Vec<Coin>,
    validators: Vec<Validator>,
    validator_public_keys: Vec<ValidatorPublicKey>,
    balances: Vec<Balance>,
    stakes: Vec<Stake>,
    unbonds: Vec<Unbond>,
    liquidity_pools: Vec<LiquidityPool>,
    orders: Vec<Order>,
}

impl MemoryStore {
    pub fn fail_kind(&self, kind: &'static str) {
        self.inner.lock().unwrap().failing.insert(kind);
    }

    pub fn coins(&self) -> Vec<Coin> {
        self.inner.lock().unwrap().coins.clone()
    }

    pub fn validators(&self) -> Vec<Validator> {
        self.inner.lock().unwrap().validators.clone()
    }

    pub fn validator_public_keys(&self) -> Vec<ValidatorPublicKey> {
        self.inner.lock().unwrap().validator_public_keys.clone()
    }

    pub fn balances(&self) -> Vec<Balance> {
        self.inner.lock().unwrap().balances.clone()
    }

    pub fn stakes(&self) -> Vec<Stake> {
        self.inner.lock().unwrap().stakes.clone()
    }

    pub fn unbonds(&self) -> Vec<Unbond> {
        self.inner.lock().unwrap().unbonds.clone()
    }

    pub fn liquidity_pools(&self) -> Vec<LiquidityPool> {
        self.inner.lock().unwrap().liquidity_pools.clone()
    }

    pub fn orders(&self) -> Vec<Order> {
        self.inner.lock().unwrap().orders.clone()
    }

    fn check(inner: &Inner, kind: &'static str) -> Result<(), StoreError> {
        if inner.failing.contains(kind) {
            Err(StoreError::Database(format!("{kind} failure injected")))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl GenesisStore for MemoryStore {
    async fn insert_addresses(
        &self,
        addresses: &[String],
    ) -> Result<Vec<(String, u64)>, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        Self::check(&inner, "addresses")?;
        let mut pairs = Vec::with_capacity(addresses.len());
        for address in addresses {
            inner.next_address_id += 1;
            let id = inner.next_address_id;
            inner.addresses.push((address.clone(), id));
            pairs.push((address.clone(), id));
        }
        Ok(pairs)
    }

    async fn find_address_id(&self, address: &str) -> Result<Option<u64>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Self::check(&inner, "addresses")?;
        Ok(inner
            .addresses
            .iter()
            .find(|(a, _)| a == address)
            .map(|(_, id)| *id))
    }

    async fn address_count(&self) -> Result<u64, StoreError> {
        let inner = self.inner.lock().unwrap();
        Self::check(&inner, "addresses")?;
        Ok(inner.addresses.len() as u64)
    }

    async fn insert_coins(&self, coins: &[Coin]) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        Self::check(&inner, "coins")?;
        inner.coins.extend_from_slice(coins);
        Ok(())
    }

    async fn find_coin_by_symbol(&self, symbol: &str) -> Result<Option<CoinInfo>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Self::check(&inner, "coins")?;
        Ok(inner.coins.iter().find(|c| c.symbol == symbol).map(|c| CoinInfo {
            id: c.id,
            volume: c.volume.clone(),
        }))
    }

    async fn insert_validators(&self, validators: &[Validator]) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        Self::check(&inner, "validators")?;
        inner.validators.extend_from_slice(validators);
        Ok(())
    }

    async fn insert_validator_public_keys(
        &self,
        keys: &[ValidatorPublicKey],
    ) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        Self::check(&inner, "validators")?;
        inner.validator_public_keys.extend_from_slice(keys);
        Ok(())
    }

    async fn find_validator_id_by_public_key(
        &self,
        public_key: &str,
    ) -> Result<Option<u64>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Self::check(&inner, "validators")?;
        Ok(inner
            .validators
            .iter()
            .find(|v| v.public_key == public_key)
            .map(|v| v.id))
    }

    async fn validator_exists(&self, id: u64) -> Result<bool, StoreError> {
        let inner = self.inner.lock().unwrap();
        Self::check(&inner, "validators")?;
        Ok(inner.validators.iter().any(|v| v.id == id))
    }

    async fn validator_count(&self) -> Result<u64, StoreError> {
        let inner = self.inner.lock().unwrap();
        Self::check(&inner, "validators")?;
        Ok(inner.validators.len() as u64)
    }

    async fn insert_balances(&self, balances: &[Balance]) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        Self::check(&inner, "balances")?;
        inner.balances.extend_from_slice(balances);
        Ok(())
    }

    async fn balance_count(&self) -> Result<u64, StoreError> {
        let inner = self.inner.lock().unwrap();
        Self::check(&inner, "balances")?;
        Ok(inner.balances.len() as u64)
    }

    async fn insert_stakes(&self, stakes: &[Stake]) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        Self::check(&inner, "stakes")?;
        inner.stakes.extend_from_slice(stakes);
        Ok(())
    }

    async fn insert_unbonds(&self, unbonds: &[Unbond]) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        Self::check(&inner, "unbonds")?;
        inner.unbonds.extend_from_slice(unbonds);
        Ok(())
    }

    async fn insert_liquidity_pools(&self, pools: &[LiquidityPool]) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        Self::check(&inner, "liquidity_pools")?;
        inner.liquidity_pools.extend_from_slice(pools);
        Ok(())
    }

    async fn insert_orders(&self, orders: &[Order]) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        Self::check(&inner, "orders")?;
        inner.orders.extend_from_slice(orders);
        Ok(())
    }
}

/// Source returning a fixed snapshot and counting how often it was asked.
pub struct CountingSource {
    genesis: RawGenesis,
    fetches: AtomicUsize,
}

impl CountingSource {
    pub fn new(genesis: RawGenesis) -> Self {
        Self {
            genesis,
            fetches: AtomicUsize::new(0),
        }
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SnapshotSource for CountingSource {
    async fn fetch(&self) -> Result<RawGenesis, SourceError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self.genesis.clone())
    }
}
