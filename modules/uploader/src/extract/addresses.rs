//! Address extraction: every address the snapshot mentions anywhere,
//! deduplicated, plus the zero address that the chain burns coins to.

use std::collections::HashSet;

use explorer_genesis_common::genesis::Genesis;
use explorer_genesis_common::keys::ZERO_ADDRESS;

pub fn extract(genesis: &Genesis) -> Vec<String> {
    let mut seen = HashSet::new();
    seen.insert(ZERO_ADDRESS.to_string());

    for candidate in &genesis.app_state.candidates {
        seen.insert(candidate.reward_address.clone());
        seen.insert(candidate.owner_address.clone());
        seen.insert(candidate.control_address.clone());
        for stake in &candidate.stakes {
            seen.insert(stake.owner.clone());
        }
    }
    for coin in &genesis.app_state.coins {
        if let Some(owner) = &coin.owner_address {
            seen.insert(owner.clone());
        }
    }
    for account in &genesis.app_state.accounts {
        seen.insert(account.address.clone());
    }
    for fund in &genesis.app_state.frozen_funds {
        seen.insert(fund.address.clone());
    }
    for pool in &genesis.app_state.pools {
        for order in &pool.orders {
            seen.insert(order.owner.clone());
        }
    }

    seen.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use explorer_genesis_common::genesis::{
        Account, AppState, Candidate, FrozenFund, GenesisCoin, GenesisOrder, GenesisStake, Pool,
    };

    fn addr(c: char) -> String {
        c.to_string().repeat(40)
    }

    fn genesis_fixture() -> Genesis {
        Genesis {
            chain_id: "test".to_string(),
            initial_height: 100,
            app_state: AppState {
                candidates: vec![Candidate {
                    id: 1,
                    reward_address: addr('a'),
                    owner_address: addr('b'),
                    control_address: addr('c'),
                    total_bip_stake: "0".to_string(),
                    public_key: "d".repeat(64),
                    commission: 10,
                    status: 2,
                    stakes: vec![GenesisStake {
                        owner: addr('e'),
                        coin: 0,
                        value: "1".to_string(),
                        bip_value: "1".to_string(),
                    }],
                }],
                coins: vec![GenesisCoin {
                    id: 1,
                    name: "T".to_string(),
                    symbol: "T".to_string(),
                    volume: "1".to_string(),
                    crr: 10,
                    reserve: "1".to_string(),
                    max_supply: "1".to_string(),
                    version: 0,
                    owner_address: Some(addr('f')),
                }],
                accounts: vec![
                    Account {
                        address: addr('a'), // overlaps the reward address
                        balances: vec![],
                    },
                    Account {
                        address: addr('g'),
                        balances: vec![],
                    },
                ],
                frozen_funds: vec![FrozenFund {
                    height: 1,
                    address: addr('h'),
                    candidate_key: None,
                    candidate_id: 1,
                    coin: 0,
                    value: "1".to_string(),
                }],
                pools: vec![Pool {
                    id: 1,
                    coin0: 0,
                    coin1: 1,
                    reserve0: "1".to_string(),
                    reserve1: "1".to_string(),
                    orders: vec![GenesisOrder {
                        id: 1,
                        owner: addr('i'),
                        is_sale: true,
                        volume0: "1".to_string(),
                        volume1: "1".to_string(),
                        height: 1,
                    }],
                }],
            },
        }
    }

    #[test]
    fn test_collects_every_mention_once() {
        let mut addresses = extract(&genesis_fixture());
        addresses.sort_unstable();

        let mut expected: Vec<String> = vec![
            ZERO_ADDRESS.to_string(),
            addr('a'),
            addr('b'),
            addr('c'),
            addr('e'),
            addr('f'),
            addr('g'),
            addr('h'),
            addr('i'),
        ];
        expected.sort_unstable();
        assert_eq!(addresses, expected);
    }

    #[test]
    fn test_order_of_input_sections_does_not_matter() {
        let forward = {
            let mut v = extract(&genesis_fixture());
            v.sort_unstable();
            v
        };

        let mut shuffled = genesis_fixture();
        shuffled.app_state.accounts.reverse();
        let mut reversed = extract(&shuffled);
        reversed.sort_unstable();

        assert_eq!(forward, reversed);
    }

    #[test]
    fn test_empty_snapshot_still_yields_zero_address() {
        let genesis = Genesis::default();
        assert_eq!(extract(&genesis), vec![ZERO_ADDRESS.to_string()]);
    }
}
