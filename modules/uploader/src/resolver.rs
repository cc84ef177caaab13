//! Per-entity-kind id resolution over bidirectional in-memory caches.
//!
//! Lookups consult the cache first and fall back to a store point query,
//! populating the cache on a hit. Registration runs single-threaded after
//! a chunk insert has joined; later phases only read what earlier phases
//! registered, so cache access needs no locking beyond the map itself.

use std::sync::Arc;

use dashmap::DashMap;
use explorer_genesis_common::records::{Coin, Validator};
use explorer_genesis_common::store::{CoinInfo, GenesisStore, StoreError};

pub struct Resolver {
    store: Arc<dyn GenesisStore>,
    addresses: DashMap<String, u64>,
    address_ids: DashMap<u64, String>,
    coins: DashMap<String, CoinInfo>,
    coin_ids: DashMap<u64, String>,
    validators: DashMap<String, u64>,
    validator_ids: DashMap<u64, String>,
}

impl Resolver {
    pub fn new(store: Arc<dyn GenesisStore>) -> Self {
        Self {
            store,
            addresses: DashMap::new(),
            address_ids: DashMap::new(),
            coins: DashMap::new(),
            coin_ids: DashMap::new(),
            validators: DashMap::new(),
            validator_ids: DashMap::new(),
        }
    }

    pub async fn address_id(&self, address: &str) -> Result<Option<u64>, StoreError> {
        if let Some(id) = self.addresses.get(address) {
            return Ok(Some(*id));
        }
        let found = self.store.find_address_id(address).await?;
        if let Some(id) = found {
            self.addresses.insert(address.to_string(), id);
            self.address_ids.insert(id, address.to_string());
        }
        Ok(found)
    }

    pub fn register_addresses(&self, pairs: &[(String, u64)]) {
        for (address, id) in pairs {
            self.addresses.insert(address.clone(), *id);
            self.address_ids.insert(*id, address.clone());
        }
    }

    pub async fn coin_by_symbol(&self, symbol: &str) -> Result<Option<CoinInfo>, StoreError> {
        if let Some(info) = self.coins.get(symbol) {
            return Ok(Some(info.clone()));
        }
        let found = self.store.find_coin_by_symbol(symbol).await?;
        if let Some(info) = &found {
            self.coins.insert(symbol.to_string(), info.clone());
            self.coin_ids.insert(info.id, symbol.to_string());
        }
        Ok(found)
    }

    pub fn register_coins(&self, coins: &[Coin]) {
        for coin in coins {
            self.coins.insert(
                coin.symbol.clone(),
                CoinInfo {
                    id: coin.id,
                    volume: coin.volume.clone(),
                },
            );
            self.coin_ids.insert(coin.id, coin.symbol.clone());
        }
    }

    pub async fn validator_id_by_public_key(
        &self,
        public_key: &str,
    ) -> Result<Option<u64>, StoreError> {
        if let Some(id) = self.validators.get(public_key) {
            return Ok(Some(*id));
        }
        let found = self.store.find_validator_id_by_public_key(public_key).await?;
        if let Some(id) = found {
            self.validators.insert(public_key.to_string(), id);
            self.validator_ids.insert(id, public_key.to_string());
        }
        Ok(found)
    }

    /// Membership test on validator id, used by the unbond filter.
    pub async fn validator_exists(&self, id: u64) -> Result<bool, StoreError> {
        if self.validator_ids.contains_key(&id) {
            return Ok(true);
        }
        self.store.validator_exists(id).await
    }

    pub fn register_validators(&self, validators: &[Validator]) {
        for validator in validators {
            self.validators.insert(validator.public_key.clone(), validator.id);
            self.validator_ids.insert(validator.id, validator.public_key.clone());
        }
    }
}
