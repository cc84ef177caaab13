//! Stake extraction: the delegations listed under each candidate. The
//! validator id is the candidate id itself; an unresolved delegator
//! address becomes the 0 sentinel, matching the validator extractor.

use explorer_genesis_common::genesis::Genesis;
use explorer_genesis_common::records::Stake;
use tracing::warn;

use crate::resolver::Resolver;

pub async fn extract(genesis: &Genesis, resolver: &Resolver) -> Vec<Stake> {
    let mut stakes = Vec::new();
    for candidate in &genesis.app_state.candidates {
        for stake in &candidate.stakes {
            let owner_address_id = match resolver.address_id(&stake.owner).await {
                Ok(Some(id)) => id,
                Ok(None) => {
                    warn!(owner = %stake.owner, candidate = candidate.id, "stake owner not found, storing 0");
                    0
                }
                Err(e) => {
                    warn!(owner = %stake.owner, candidate = candidate.id, error = %e, "stake owner lookup failed, storing 0");
                    0
                }
            };
            stakes.push(Stake {
                owner_address_id,
                validator_id: candidate.id,
                coin_id: stake.coin,
                value: stake.value.clone(),
                bip_value: stake.bip_value.clone(),
            });
        }
    }
    stakes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_store::MemoryStore;
    use explorer_genesis_common::genesis::{AppState, Candidate, GenesisStake};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_stakes_carry_candidate_id_and_zero_fallback() {
        let known = "a".repeat(40);
        let genesis = Genesis {
            app_state: AppState {
                candidates: vec![Candidate {
                    id: 9,
                    reward_address: known.clone(),
                    owner_address: known.clone(),
                    control_address: known.clone(),
                    total_bip_stake: "0".to_string(),
                    public_key: "d".repeat(64),
                    commission: 10,
                    status: 2,
                    stakes: vec![
                        GenesisStake {
                            owner: known.clone(),
                            coin: 0,
                            value: "500".to_string(),
                            bip_value: "500".to_string(),
                        },
                        GenesisStake {
                            owner: "f".repeat(40),
                            coin: 3,
                            value: "7".to_string(),
                            bip_value: "2".to_string(),
                        },
                    ],
                }],
                ..AppState::default()
            },
            ..Genesis::default()
        };

        let resolver = Resolver::new(Arc::new(MemoryStore::default()));
        resolver.register_addresses(&[(known, 4)]);

        let stakes = extract(&genesis, &resolver).await;

        assert_eq!(stakes.len(), 2);
        assert_eq!(stakes[0].owner_address_id, 4);
        assert_eq!(stakes[0].validator_id, 9);
        assert_eq!(stakes[1].owner_address_id, 0);
        assert_eq!(stakes[1].coin_id, 3);
    }
}
