//! Liquidity pool extraction. Each pool is backed by a liquidity token
//! whose symbol is `LP-<pool id>`; the token was inserted with the other
//! coins in an earlier phase, and its volume doubles as the pool's
//! liquidity figure. A pool whose token cannot be found is skipped.

use explorer_genesis_common::genesis::Genesis;
use explorer_genesis_common::records::LiquidityPool;
use tracing::warn;

use crate::resolver::Resolver;

pub async fn extract(genesis: &Genesis, resolver: &Resolver) -> Vec<LiquidityPool> {
    let mut pools = Vec::with_capacity(genesis.app_state.pools.len());
    for pool in &genesis.app_state.pools {
        let symbol = format!("LP-{}", pool.id);
        let token = match resolver.coin_by_symbol(&symbol).await {
            Ok(Some(info)) => info,
            Ok(None) => {
                warn!(pool = pool.id, symbol, "liquidity token not found, skipping pool");
                continue;
            }
            Err(e) => {
                warn!(pool = pool.id, symbol, error = %e, "liquidity token lookup failed, skipping pool");
                continue;
            }
        };

        pools.push(LiquidityPool {
            id: pool.id,
            token_id: token.id,
            first_coin_id: pool.coin0,
            second_coin_id: pool.coin1,
            first_coin_volume: pool.reserve0.clone(),
            second_coin_volume: pool.reserve1.clone(),
            liquidity: token.volume,
            updated_at_block_id: genesis.initial_height,
        });
    }
    pools
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_store::MemoryStore;
    use explorer_genesis_common::genesis::{AppState, Pool};
    use explorer_genesis_common::records::{Coin, CoinKind};
    use std::sync::Arc;

    fn pool(id: u64) -> Pool {
        Pool {
            id,
            coin0: 0,
            coin1: 1,
            reserve0: "10".to_string(),
            reserve1: "20".to_string(),
            orders: vec![],
        }
    }

    #[tokio::test]
    async fn test_links_pool_to_its_liquidity_token() {
        let genesis = Genesis {
            initial_height: 5_000_001,
            app_state: AppState {
                pools: vec![pool(3), pool(4)], // no LP-4 token registered
                ..AppState::default()
            },
            ..Genesis::default()
        };

        let resolver = Resolver::new(Arc::new(MemoryStore::default()));
        resolver.register_coins(&[Coin {
            id: 8,
            kind: CoinKind::PoolToken,
            name: "LP-3".to_string(),
            symbol: "LP-3".to_string(),
            volume: "31337".to_string(),
            crr: 0,
            reserve: "0".to_string(),
            max_supply: "0".to_string(),
            version: 0,
            owner_address_id: None,
        }]);

        let pools = extract(&genesis, &resolver).await;

        assert_eq!(pools.len(), 1);
        assert_eq!(pools[0].id, 3);
        assert_eq!(pools[0].token_id, 8);
        assert_eq!(pools[0].liquidity, "31337");
        assert_eq!(pools[0].first_coin_volume, "10");
        assert_eq!(pools[0].second_coin_volume, "20");
        assert_eq!(pools[0].updated_at_block_id, 5_000_001);
    }
}
