//! Limit order extraction. Every order in every pool resolves on its own
//! task; the sale flag decides which side of the pool is sold. The price
//! is sell volume over buy volume with 18 fractional digits, half-even
//! rounded. Orders with an unresolvable owner or a zero buy volume are
//! skipped.

use std::str::FromStr;
use std::sync::Arc;

use bigdecimal::{BigDecimal, RoundingMode, Zero};
use explorer_genesis_common::genesis::{Genesis, GenesisOrder};
use explorer_genesis_common::records::{Order, ORDER_STATUS_ACTIVE};
use futures::future::join_all;
use tracing::warn;

use crate::resolver::Resolver;

const PRICE_SCALE: i64 = 18;

pub async fn extract(genesis: &Genesis, resolver: Arc<Resolver>) -> Vec<Order> {
    let mut handles = Vec::new();
    for pool in &genesis.app_state.pools {
        for order in &pool.orders {
            let resolver = resolver.clone();
            let order = order.clone();
            let (pool_id, coin0, coin1) = (pool.id, pool.coin0, pool.coin1);
            handles.push(tokio::spawn(async move {
                build_order(&resolver, pool_id, coin0, coin1, order).await
            }));
        }
    }

    let mut orders = Vec::new();
    for joined in join_all(handles).await {
        match joined {
            Ok(Some(order)) => orders.push(order),
            Ok(None) => {}
            Err(e) => warn!(error = %e, "order extraction task failed"),
        }
    }
    orders.sort_by_key(|o| o.id);
    orders
}

async fn build_order(
    resolver: &Resolver,
    pool_id: u64,
    coin0: u64,
    coin1: u64,
    order: GenesisOrder,
) -> Option<Order> {
    let address_id = match resolver.address_id(&order.owner).await {
        Ok(Some(id)) => id,
        Ok(None) => {
            warn!(order = order.id, owner = %order.owner, "order owner not found, skipping");
            return None;
        }
        Err(e) => {
            warn!(order = order.id, owner = %order.owner, error = %e, "owner lookup failed, skipping order");
            return None;
        }
    };

    let (coin_sell_id, sell_volume, coin_buy_id, buy_volume) = if order.is_sale {
        (coin0, order.volume0, coin1, order.volume1)
    } else {
        (coin1, order.volume1, coin0, order.volume0)
    };

    let Some(price) = order_price(&sell_volume, &buy_volume) else {
        warn!(order = order.id, "order price is undefined, skipping");
        return None;
    };

    Some(Order {
        id: order.id,
        address_id,
        liquidity_pool_id: pool_id,
        coin_sell_id,
        coin_sell_volume: sell_volume,
        coin_buy_id,
        coin_buy_volume: buy_volume,
        price,
        created_at_block: order.height,
        status: ORDER_STATUS_ACTIVE,
    })
}

/// Sell volume divided by buy volume, 18 fractional digits. `None` when
/// either volume fails to parse or the buy volume is zero.
fn order_price(sell: &str, buy: &str) -> Option<String> {
    let sell = BigDecimal::from_str(sell).ok()?;
    let buy = BigDecimal::from_str(buy).ok()?;
    if buy.is_zero() {
        return None;
    }
    Some(
        (sell / buy)
            .with_scale_round(PRICE_SCALE, RoundingMode::HalfEven)
            .to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_store::MemoryStore;
    use explorer_genesis_common::genesis::{AppState, Pool};

    fn order(id: u64, owner: String, is_sale: bool, volume0: &str, volume1: &str) -> GenesisOrder {
        GenesisOrder {
            id,
            owner,
            is_sale,
            volume0: volume0.to_string(),
            volume1: volume1.to_string(),
            height: 5_000_000,
        }
    }

    #[test]
    fn test_price_has_eighteen_digits() {
        assert_eq!(
            order_price("10", "4").as_deref(),
            Some("2.500000000000000000")
        );
        assert_eq!(
            order_price("1", "3").as_deref(),
            Some("0.333333333333333333")
        );
        assert_eq!(order_price("1", "0"), None);
        assert_eq!(order_price("garbage", "1"), None);
    }

    #[tokio::test]
    async fn test_sale_flag_picks_the_sold_side() {
        let owner = "a".repeat(40);
        let genesis = Genesis {
            app_state: AppState {
                pools: vec![Pool {
                    id: 3,
                    coin0: 1,
                    coin1: 2,
                    reserve0: "0".to_string(),
                    reserve1: "0".to_string(),
                    orders: vec![
                        order(11, owner.clone(), true, "10", "4"),
                        order(12, owner.clone(), false, "10", "4"),
                        order(13, "f".repeat(40), true, "1", "1"), // unknown owner
                        order(14, owner.clone(), true, "1", "0"),  // zero buy side
                    ],
                }],
                ..AppState::default()
            },
            ..Genesis::default()
        };

        let resolver = Arc::new(Resolver::new(Arc::new(MemoryStore::default())));
        resolver.register_addresses(&[(owner, 5)]);

        let orders = extract(&genesis, resolver).await;

        assert_eq!(orders.len(), 2);

        assert_eq!(orders[0].id, 11);
        assert_eq!(orders[0].coin_sell_id, 1);
        assert_eq!(orders[0].coin_sell_volume, "10");
        assert_eq!(orders[0].coin_buy_id, 2);
        assert_eq!(orders[0].price, "2.500000000000000000");
        assert_eq!(orders[0].status, ORDER_STATUS_ACTIVE);

        assert_eq!(orders[1].id, 12);
        assert_eq!(orders[1].coin_sell_id, 2);
        assert_eq!(orders[1].coin_sell_volume, "4");
        assert_eq!(orders[1].coin_buy_id, 1);
        assert_eq!(orders[1].price, "0.400000000000000000");
    }
}
