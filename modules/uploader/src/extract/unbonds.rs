//! Unbond extraction from frozen funds. A fund without a candidate key
//! belongs to no validator and is dropped; so is one whose candidate id
//! names no loaded validator, or whose owner address does not resolve.
//! The fund's unfreeze height becomes the unbond's block id.

use explorer_genesis_common::genesis::Genesis;
use explorer_genesis_common::records::Unbond;
use tracing::warn;

use crate::resolver::Resolver;

pub async fn extract(genesis: &Genesis, resolver: &Resolver) -> Vec<Unbond> {
    let mut unbonds = Vec::new();
    for fund in &genesis.app_state.frozen_funds {
        if fund.candidate_key.is_none() {
            continue;
        }

        match resolver.validator_exists(fund.candidate_id).await {
            Ok(true) => {}
            Ok(false) => {
                warn!(
                    candidate = fund.candidate_id,
                    "frozen fund references unknown validator, skipping"
                );
                continue;
            }
            Err(e) => {
                warn!(candidate = fund.candidate_id, error = %e, "validator lookup failed, skipping frozen fund");
                continue;
            }
        }

        let address_id = match resolver.address_id(&fund.address).await {
            Ok(Some(id)) => id,
            Ok(None) => {
                warn!(address = %fund.address, "frozen fund address not found, skipping");
                continue;
            }
            Err(e) => {
                warn!(address = %fund.address, error = %e, "address lookup failed, skipping frozen fund");
                continue;
            }
        };

        unbonds.push(Unbond {
            address_id,
            validator_id: fund.candidate_id,
            coin_id: fund.coin,
            block_id: fund.height,
            value: fund.value.clone(),
        });
    }
    unbonds
}
