//! Coin extraction. The snapshot never lists the base coin, so a row for
//! coin id 0 is synthesized from configuration, and any snapshot entry
//! that does claim id 0 is dropped as a duplicate of it. Owner lookups
//! are best-effort: an unresolved owner leaves the column null.

use explorer_genesis_common::genesis::Genesis;
use explorer_genesis_common::records::{Coin, CoinKind};
use tracing::warn;

use crate::resolver::Resolver;

/// Symbol prefix of pool liquidity tokens.
const POOL_TOKEN_PREFIX: &str = "LP-";

pub async fn extract(genesis: &Genesis, resolver: &Resolver, base_coin: &str) -> Vec<Coin> {
    let mut coins = vec![base_coin_record(base_coin)];

    for raw in &genesis.app_state.coins {
        if raw.id == 0 {
            continue;
        }

        let owner_address_id = match &raw.owner_address {
            Some(owner) => match resolver.address_id(owner).await {
                Ok(id) => id,
                Err(e) => {
                    warn!(coin = raw.id, error = %e, "coin owner lookup failed");
                    None
                }
            },
            None => None,
        };

        let kind = if raw.symbol.starts_with(POOL_TOKEN_PREFIX) {
            CoinKind::PoolToken
        } else {
            CoinKind::Token
        };

        coins.push(Coin {
            id: raw.id,
            kind,
            name: raw.name.clone(),
            symbol: raw.symbol.clone(),
            volume: raw.volume.clone(),
            crr: raw.crr,
            reserve: raw.reserve.clone(),
            max_supply: raw.max_supply.clone(),
            version: raw.version,
            owner_address_id,
        });
    }

    coins
}

fn base_coin_record(symbol: &str) -> Coin {
    Coin {
        id: 0,
        kind: CoinKind::Base,
        name: symbol.to_string(),
        symbol: symbol.to_string(),
        volume: "0".to_string(),
        crr: 100,
        reserve: "0".to_string(),
        max_supply: "0".to_string(),
        version: 0,
        owner_address_id: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_store::MemoryStore;
    use explorer_genesis_common::genesis::{AppState, GenesisCoin};
    use std::sync::Arc;

    fn coin(id: u64, symbol: &str, owner: Option<String>) -> GenesisCoin {
        GenesisCoin {
            id,
            name: symbol.to_string(),
            symbol: symbol.to_string(),
            volume: "1000".to_string(),
            crr: 50,
            reserve: "10".to_string(),
            max_supply: "10000".to_string(),
            version: 0,
            owner_address: owner,
        }
    }

    #[tokio::test]
    async fn test_synthesizes_base_coin_and_drops_snapshot_id_zero() {
        let genesis = Genesis {
            app_state: AppState {
                coins: vec![coin(0, "STALE", None), coin(1, "TEST", None)],
                ..AppState::default()
            },
            ..Genesis::default()
        };
        let resolver = Resolver::new(Arc::new(MemoryStore::default()));

        let coins = extract(&genesis, &resolver, "BIP").await;

        assert_eq!(coins.len(), 2);
        assert_eq!(coins[0].id, 0);
        assert_eq!(coins[0].kind, CoinKind::Base);
        assert_eq!(coins[0].symbol, "BIP");
        assert_eq!(coins[1].id, 1);
        assert_eq!(coins[1].kind, CoinKind::Token);
    }

    #[tokio::test]
    async fn test_resolves_owner_and_classifies_pool_tokens() {
        let owner = "a".repeat(40);
        let genesis = Genesis {
            app_state: AppState {
                coins: vec![
                    coin(1, "TEST", Some(owner.clone())),
                    coin(2, "LP-7", None),
                    coin(3, "ORPHAN", Some("f".repeat(40))),
                ],
                ..AppState::default()
            },
            ..Genesis::default()
        };
        let resolver = Resolver::new(Arc::new(MemoryStore::default()));
        resolver.register_addresses(&[(owner, 42)]);

        let coins = extract(&genesis, &resolver, "BIP").await;

        assert_eq!(coins[1].owner_address_id, Some(42));
        assert_eq!(coins[2].kind, CoinKind::PoolToken);
        // Unknown owner leaves the column null rather than failing
        assert_eq!(coins[3].owner_address_id, None);
    }
}
