//! Validator extraction from snapshot candidates, plus the auxiliary
//! public key rows. Address resolution is best-effort: an unresolved
//! owner or reward address becomes the 0 sentinel.

use explorer_genesis_common::genesis::Genesis;
use explorer_genesis_common::records::{Validator, ValidatorPublicKey};
use tracing::warn;

use crate::resolver::Resolver;

pub async fn extract(genesis: &Genesis, resolver: &Resolver) -> Vec<Validator> {
    let mut validators = Vec::with_capacity(genesis.app_state.candidates.len());
    for candidate in &genesis.app_state.candidates {
        validators.push(Validator {
            id: candidate.id,
            public_key: candidate.public_key.clone(),
            owner_address_id: resolve_or_zero(resolver, &candidate.owner_address, candidate.id)
                .await,
            reward_address_id: resolve_or_zero(resolver, &candidate.reward_address, candidate.id)
                .await,
            status: candidate.status,
            commission: candidate.commission,
            total_stake: candidate.total_bip_stake.clone(),
        });
    }
    validators
}

pub fn public_keys(validators: &[Validator]) -> Vec<ValidatorPublicKey> {
    validators
        .iter()
        .map(|v| ValidatorPublicKey {
            validator_id: v.id,
            key: v.public_key.clone(),
        })
        .collect()
}

async fn resolve_or_zero(resolver: &Resolver, address: &str, candidate: u64) -> u64 {
    match resolver.address_id(address).await {
        Ok(Some(id)) => id,
        Ok(None) => {
            warn!(candidate, address, "candidate address not found, storing 0");
            0
        }
        Err(e) => {
            warn!(candidate, address, error = %e, "candidate address lookup failed, storing 0");
            0
        }
    }
}
