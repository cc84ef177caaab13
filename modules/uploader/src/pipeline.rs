//! The upload pipeline: guard, fetch, convert, then one load phase per
//! record kind in dependency order. Addresses, coins and validators are
//! referenced by everything after them, so a failed chunk there aborts
//! the run; the remaining kinds are best-effort and a failed chunk only
//! costs its own rows.

use std::sync::Arc;
use std::time::Instant;

use explorer_genesis_common::source::{SnapshotSource, SourceError};
use explorer_genesis_common::store::{GenesisStore, StoreError};
use thiserror::Error;
use tracing::{error, info};

use crate::configuration::UploaderConfig;
use crate::convert::{self, ConvertError};
use crate::extract;
use crate::guard;
use crate::loader::{load_chunked, LoadError, LoadOutcome};
use crate::resolver::Resolver;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("database is not empty, genesis upload refused")]
    NotEmpty,

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Convert(#[from] ConvertError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("loading {entity}: {source}")]
    Load {
        entity: &'static str,
        source: LoadError,
    },
}

/// Per-kind extracted/inserted counts for the final report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KindReport {
    pub extracted: usize,
    pub inserted: usize,
}

#[derive(Debug, Clone, Default)]
pub struct UploadReport {
    pub initial_height: u64,
    pub addresses: KindReport,
    pub coins: KindReport,
    pub validators: KindReport,
    pub balances: KindReport,
    pub stakes: KindReport,
    pub unbonds: KindReport,
    pub liquidity_pools: KindReport,
    pub orders: KindReport,
}

pub struct GenesisUploader {
    source: Arc<dyn SnapshotSource>,
    store: Arc<dyn GenesisStore>,
    config: UploaderConfig,
}

impl GenesisUploader {
    pub fn new(
        source: Arc<dyn SnapshotSource>,
        store: Arc<dyn GenesisStore>,
        config: UploaderConfig,
    ) -> Self {
        Self {
            source,
            store,
            config,
        }
    }

    pub async fn run(&self) -> Result<UploadReport, UploadError> {
        if !guard::is_loadable(&*self.store).await? {
            return Err(UploadError::NotEmpty);
        }
        let started = Instant::now();

        let raw = self.source.fetch().await?;
        let genesis = convert::convert(raw)?;
        info!(
            chain_id = %genesis.chain_id,
            initial_height = genesis.initial_height,
            "snapshot fetched and converted"
        );

        let resolver = Arc::new(Resolver::new(self.store.clone()));
        let mut report = UploadReport {
            initial_height: genesis.initial_height,
            ..UploadReport::default()
        };
        let chunks = &self.config.chunk_sizes;

        // Addresses first: every other kind references them.
        let addresses = extract::addresses::extract(&genesis);
        report.addresses.extracted = addresses.len();
        let store = self.store.clone();
        let pairs = load_chunked(addresses, chunks.address, move |chunk: Vec<String>| {
            let store = store.clone();
            async move { store.insert_addresses(&chunk).await }
        })
        .await
        .into_result()
        .map_err(|source| UploadError::Load {
            entity: "addresses",
            source,
        })?;
        for chunk in &pairs {
            resolver.register_addresses(chunk);
            report.addresses.inserted += chunk.len();
        }
        info!(count = report.addresses.inserted, "addresses loaded");

        let coins = extract::coins::extract(&genesis, &resolver, &self.config.base_coin).await;
        report.coins.extracted = coins.len();
        let store = self.store.clone();
        let inserted = load_chunked(coins, chunks.coin, move |chunk| {
            let store = store.clone();
            async move {
                store.insert_coins(&chunk).await?;
                Ok(chunk)
            }
        })
        .await
        .into_result()
        .map_err(|source| UploadError::Load {
            entity: "coins",
            source,
        })?;
        for chunk in &inserted {
            resolver.register_coins(chunk);
            report.coins.inserted += chunk.len();
        }
        info!(count = report.coins.inserted, "coins loaded");

        let validators = extract::validators::extract(&genesis, &resolver).await;
        report.validators.extracted = validators.len();
        let keys = extract::validators::public_keys(&validators);
        let store = self.store.clone();
        let inserted = load_chunked(validators, chunks.validator, move |chunk| {
            let store = store.clone();
            async move {
                store.insert_validators(&chunk).await?;
                Ok(chunk)
            }
        })
        .await
        .into_result()
        .map_err(|source| UploadError::Load {
            entity: "validators",
            source,
        })?;
        for chunk in &inserted {
            resolver.register_validators(chunk);
            report.validators.inserted += chunk.len();
        }
        self.store.insert_validator_public_keys(&keys).await?;
        info!(count = report.validators.inserted, "validators loaded");

        // Best-effort kinds from here on.
        let balances =
            extract::balances::extract(genesis.app_state.accounts.clone(), resolver.clone(), chunks.balance)
                .await;
        report.balances.extracted = balances.len();
        let store = self.store.clone();
        let outcome = load_chunked(balances, chunks.balance, move |chunk| {
            let store = store.clone();
            async move {
                store.insert_balances(&chunk).await?;
                Ok(chunk.len())
            }
        })
        .await;
        report.balances.inserted = settle("balances", outcome);

        let stakes = extract::stakes::extract(&genesis, &resolver).await;
        report.stakes.extracted = stakes.len();
        let store = self.store.clone();
        let outcome = load_chunked(stakes, chunks.stake, move |chunk| {
            let store = store.clone();
            async move {
                store.insert_stakes(&chunk).await?;
                Ok(chunk.len())
            }
        })
        .await;
        report.stakes.inserted = settle("stakes", outcome);

        let unbonds = extract::unbonds::extract(&genesis, &resolver).await;
        report.unbonds.extracted = unbonds.len();
        let store = self.store.clone();
        let outcome = load_chunked(unbonds, chunks.stake, move |chunk| {
            let store = store.clone();
            async move {
                store.insert_unbonds(&chunk).await?;
                Ok(chunk.len())
            }
        })
        .await;
        report.unbonds.inserted = settle("unbonds", outcome);

        let pools = extract::liquidity_pools::extract(&genesis, &resolver).await;
        report.liquidity_pools.extracted = pools.len();
        match self.store.insert_liquidity_pools(&pools).await {
            Ok(()) => report.liquidity_pools.inserted = pools.len(),
            Err(e) => error!(error = %e, "liquidity pool insert failed, continuing"),
        }

        let orders = extract::orders::extract(&genesis, resolver.clone()).await;
        report.orders.extracted = orders.len();
        let store = self.store.clone();
        let outcome = load_chunked(orders, chunks.order, move |chunk| {
            let store = store.clone();
            async move {
                store.insert_orders(&chunk).await?;
                Ok(chunk.len())
            }
        })
        .await;
        report.orders.inserted = settle("orders", outcome);

        info!(
            addresses = report.addresses.inserted,
            coins = report.coins.inserted,
            validators = report.validators.inserted,
            balances = report.balances.inserted,
            stakes = report.stakes.inserted,
            unbonds = report.unbonds.inserted,
            liquidity_pools = report.liquidity_pools.inserted,
            orders = report.orders.inserted,
            elapsed = ?started.elapsed(),
            "genesis upload finished"
        );
        Ok(report)
    }
}

/// Sums the completed chunks of a best-effort kind, logging the rest.
fn settle(entity: &'static str, outcome: LoadOutcome<usize>) -> usize {
    for failure in &outcome.errors {
        error!(entity, chunk = failure.chunk, error = %failure.message, "chunk insert failed, continuing");
    }
    outcome.completed.into_iter().sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_store::{CountingSource, MemoryStore};
    use explorer_genesis_common::records::CoinKind;
    use explorer_genesis_common::wire::RawGenesis;
    use serde_json::json;

    fn snapshot() -> RawGenesis {
        serde_json::from_value(json!({
            "chain_id": "test-chain",
            "initial_height": "5000001",
            "app_state": {
                "candidates": [{
                    "id": "7",
                    "reward_address": format!("Mx{}", "a".repeat(40)),
                    "owner_address": format!("Mx{}", "b".repeat(40)),
                    "control_address": format!("Mx{}", "c".repeat(40)),
                    "total_bip_stake": "500",
                    "public_key": format!("Mp{}", "d".repeat(64)),
                    "commission": "10",
                    "status": "2",
                    "stakes": [{
                        "owner": format!("Mx{}", "a".repeat(40)),
                        "coin": "0",
                        "value": "500",
                        "bip_value": "500"
                    }]
                }],
                "coins": [
                    {
                        "id": "1",
                        "name": "Test coin",
                        "symbol": "TEST",
                        "volume": "1000",
                        "crr": "50",
                        "reserve": "100",
                        "max_supply": "10000",
                        "version": "0",
                        "owner_address": format!("Mx{}", "b".repeat(40))
                    },
                    {
                        "id": "2",
                        "name": "Pool 3",
                        "symbol": "LP-3",
                        "volume": "31337",
                        "crr": "0",
                        "reserve": "0",
                        "max_supply": "0",
                        "version": "0"
                    }
                ],
                "frozen_funds": [{
                    "height": "5100000",
                    "address": format!("Mx{}", "a".repeat(40)),
                    "candidate_key": format!("Mp{}", "d".repeat(64)),
                    "candidate_id": "7",
                    "coin": "0",
                    "value": "42"
                }],
                "accounts": [{
                    "address": format!("Mx{}", "e".repeat(40)),
                    "balance": [
                        {"coin": "0", "value": "100"},
                        {"coin": "1", "value": "7"}
                    ]
                }],
                "pools": [{
                    "id": "3",
                    "coin0": "0",
                    "coin1": "1",
                    "reserve0": "10",
                    "reserve1": "20",
                    "orders": [{
                        "id": "11",
                        "owner": format!("Mx{}", "e".repeat(40)),
                        "is_sale": true,
                        "volume0": "10",
                        "volume1": "4",
                        "height": "5000000"
                    }]
                }]
            }
        }))
        .unwrap()
    }

    fn uploader(source: Arc<CountingSource>, store: Arc<MemoryStore>) -> GenesisUploader {
        GenesisUploader::new(source, store, UploaderConfig::default())
    }

    #[tokio::test]
    async fn test_populated_database_refuses_before_fetching() {
        let store = Arc::new(MemoryStore::default());
        store.insert_addresses(&["aa".repeat(20)]).await.unwrap();

        let source = Arc::new(CountingSource::new(snapshot()));
        let result = uploader(source.clone(), store).run().await;

        assert!(matches!(result, Err(UploadError::NotEmpty)));
        assert_eq!(source.fetches(), 0);
    }

    #[tokio::test]
    async fn test_full_upload_populates_every_kind() {
        let store = Arc::new(MemoryStore::default());
        let source = Arc::new(CountingSource::new(snapshot()));

        let report = uploader(source, store.clone()).run().await.unwrap();

        assert_eq!(report.initial_height, 5_000_001);
        // a, b, c, e plus the zero address
        assert_eq!(report.addresses.inserted, 5);
        // base coin + TEST + LP-3
        assert_eq!(report.coins.inserted, 3);
        assert_eq!(report.validators.inserted, 1);
        assert_eq!(report.balances.inserted, 2);
        assert_eq!(report.stakes.inserted, 1);
        assert_eq!(report.unbonds.inserted, 1);
        assert_eq!(report.liquidity_pools.inserted, 1);
        assert_eq!(report.orders.inserted, 1);

        let coins = store.coins();
        assert_eq!(coins[0].id, 0);
        assert_eq!(coins[0].kind, CoinKind::Base);
        assert_eq!(coins[0].symbol, "BIP");

        let validators = store.validators();
        assert_eq!(validators[0].id, 7);
        assert_ne!(validators[0].owner_address_id, 0);
        assert_eq!(store.validator_public_keys().len(), 1);

        let pools = store.liquidity_pools();
        assert_eq!(pools[0].id, 3);
        assert_eq!(pools[0].liquidity, "31337");
        assert_eq!(pools[0].updated_at_block_id, 5_000_001);

        let orders = store.orders();
        assert_eq!(orders[0].price, "2.500000000000000000");

        let unbonds = store.unbonds();
        assert_eq!(unbonds[0].validator_id, 7);
        assert_eq!(unbonds[0].block_id, 5_100_000);
    }

    #[tokio::test]
    async fn test_required_kind_failure_aborts_the_run() {
        let store = Arc::new(MemoryStore::default());
        store.fail_kind("coins");
        let source = Arc::new(CountingSource::new(snapshot()));

        let result = uploader(source, store.clone()).run().await;

        assert!(matches!(
            result,
            Err(UploadError::Load { entity: "coins", .. })
        ));
        // Addresses were already committed before the failing phase
        assert_eq!(store.address_count().await.unwrap(), 5);
    }

    #[tokio::test]
    async fn test_best_effort_kind_failure_is_survivable() {
        let store = Arc::new(MemoryStore::default());
        store.fail_kind("stakes");
        let source = Arc::new(CountingSource::new(snapshot()));

        let report = uploader(source, store.clone()).run().await.unwrap();

        assert_eq!(report.stakes.extracted, 1);
        assert_eq!(report.stakes.inserted, 0);
        // Later phases still ran
        assert_eq!(report.orders.inserted, 1);
    }
}
