//! Converter from the wire-format snapshot to the normalized model.
//!
//! Pure, no I/O. Addresses and public keys come out canonical (lowercase,
//! unprefixed); numeric strings the pipeline needs as integers are parsed
//! here; big decimal amounts pass through untouched. Sections the
//! pipeline does not consume (validator history, deleted candidates,
//! waitlists, halted blocks, commission data, multisig details) are
//! accepted on input and dropped.

use explorer_genesis_common::genesis::{
    Account, AppState, Candidate, FrozenFund, Genesis, GenesisBalance, GenesisCoin, GenesisOrder,
    GenesisStake, Pool,
};
use explorer_genesis_common::keys::{is_hex_of_len, normalize_key};
use explorer_genesis_common::wire::{
    RawAccount, RawCandidate, RawCoin, RawFrozenFund, RawGenesis, RawPool,
};
use thiserror::Error;

/// Candidate public keys are 32-byte hex.
const PUBLIC_KEY_BYTES: usize = 32;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("invalid numeric field {field}: {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("invalid candidate public key {0:?}")]
    InvalidPublicKey(String),
}

pub fn convert(raw: RawGenesis) -> Result<Genesis, ConvertError> {
    Ok(Genesis {
        chain_id: raw.chain_id,
        initial_height: parse_u64("initial_height", &raw.initial_height)?,
        app_state: AppState {
            candidates: raw
                .app_state
                .candidates
                .iter()
                .map(convert_candidate)
                .collect::<Result<_, _>>()?,
            coins: raw
                .app_state
                .coins
                .iter()
                .map(convert_coin)
                .collect::<Result<_, _>>()?,
            accounts: raw
                .app_state
                .accounts
                .iter()
                .map(convert_account)
                .collect::<Result<_, _>>()?,
            frozen_funds: raw
                .app_state
                .frozen_funds
                .iter()
                .map(convert_frozen_fund)
                .collect::<Result<_, _>>()?,
            pools: raw
                .app_state
                .pools
                .iter()
                .map(convert_pool)
                .collect::<Result<_, _>>()?,
        },
    })
}

fn convert_candidate(raw: &RawCandidate) -> Result<Candidate, ConvertError> {
    let public_key = normalize_key(&raw.public_key);
    if !is_hex_of_len(&public_key, PUBLIC_KEY_BYTES) {
        return Err(ConvertError::InvalidPublicKey(raw.public_key.clone()));
    }

    Ok(Candidate {
        id: parse_u64("candidate.id", &raw.id)?,
        reward_address: normalize_key(&raw.reward_address),
        owner_address: normalize_key(&raw.owner_address),
        control_address: normalize_key(&raw.control_address),
        total_bip_stake: raw.total_bip_stake.clone(),
        public_key,
        commission: parse_u64("candidate.commission", &raw.commission)?,
        status: parse_u8("candidate.status", &raw.status)?,
        stakes: raw
            .stakes
            .iter()
            .map(|stake| {
                Ok(GenesisStake {
                    owner: normalize_key(&stake.owner),
                    coin: parse_u64("stake.coin", &stake.coin)?,
                    value: stake.value.clone(),
                    bip_value: stake.bip_value.clone().unwrap_or_else(|| "0".to_string()),
                })
            })
            .collect::<Result<_, _>>()?,
    })
}

fn convert_coin(raw: &RawCoin) -> Result<GenesisCoin, ConvertError> {
    Ok(GenesisCoin {
        id: parse_u64("coin.id", &raw.id)?,
        name: raw.name.clone(),
        symbol: raw.symbol.clone(),
        volume: raw.volume.clone(),
        crr: parse_u64("coin.crr", &raw.crr)?,
        reserve: raw.reserve.clone(),
        max_supply: raw.max_supply.clone(),
        version: parse_u64("coin.version", &raw.version)?,
        owner_address: optional_address(&raw.owner_address),
    })
}

fn convert_account(raw: &RawAccount) -> Result<Account, ConvertError> {
    Ok(Account {
        address: normalize_key(&raw.address),
        balances: raw
            .balance
            .iter()
            .map(|balance| {
                Ok(GenesisBalance {
                    coin: parse_u64("balance.coin", &balance.coin)?,
                    value: balance.value.clone(),
                })
            })
            .collect::<Result<_, _>>()?,
    })
}

fn convert_frozen_fund(raw: &RawFrozenFund) -> Result<FrozenFund, ConvertError> {
    Ok(FrozenFund {
        height: parse_u64("frozen_fund.height", &raw.height)?,
        address: normalize_key(&raw.address),
        candidate_key: raw.candidate_key.as_deref().map(normalize_key),
        candidate_id: parse_u64("frozen_fund.candidate_id", &raw.candidate_id)?,
        coin: parse_u64("frozen_fund.coin", &raw.coin)?,
        value: raw.value.clone(),
    })
}

fn convert_pool(raw: &RawPool) -> Result<Pool, ConvertError> {
    Ok(Pool {
        id: parse_u64("pool.id", &raw.id)?,
        coin0: parse_u64("pool.coin0", &raw.coin0)?,
        coin1: parse_u64("pool.coin1", &raw.coin1)?,
        reserve0: raw.reserve0.clone(),
        reserve1: raw.reserve1.clone(),
        orders: raw
            .orders
            .iter()
            .map(|order| {
                Ok(GenesisOrder {
                    id: parse_u64("order.id", &order.id)?,
                    owner: normalize_key(&order.owner),
                    is_sale: order.is_sale,
                    volume0: order.volume0.clone(),
                    volume1: order.volume1.clone(),
                    height: parse_u64("order.height", &order.height)?,
                })
            })
            .collect::<Result<_, _>>()?,
    })
}

/// Absent and present-but-empty both mean "no owner".
fn optional_address(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .map(normalize_key)
}

fn parse_u64(field: &'static str, value: &str) -> Result<u64, ConvertError> {
    value.parse().map_err(|_| ConvertError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}

fn parse_u8(field: &'static str, value: &str) -> Result<u8, ConvertError> {
    value.parse().map_err(|_| ConvertError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw_fixture() -> RawGenesis {
        serde_json::from_value(json!({
            "chain_id": "test-chain",
            "initial_height": "5000001",
            "app_state": {
                "validators": [{"public_key": "dropped", "total_bip_stake": "1"}],
                "candidates": [{
                    "id": "7",
                    "reward_address": format!("Mx{}", "a".repeat(40)),
                    "owner_address": format!("Mx{}", "B".repeat(40)),
                    "control_address": format!("Mx{}", "c".repeat(40)),
                    "total_bip_stake": "1000000000000000000",
                    "public_key": format!("Mp{}", "D".repeat(64)),
                    "commission": "10",
                    "status": "2",
                    "stakes": [{
                        "owner": format!("Mx{}", "a".repeat(40)),
                        "coin": "0",
                        "value": "500"
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
                        "owner_address": format!("Mx{}", "a".repeat(40))
                    },
                    {
                        "id": "2",
                        "name": "Ownerless",
                        "symbol": "NOOWN",
                        "volume": "1",
                        "crr": "10",
                        "reserve": "1",
                        "max_supply": "1",
                        "version": "0",
                        "owner_address": ""
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
                    "balance": [{"coin": "0", "value": "100"}],
                    "nonce": "1",
                    "multisig_data": {"threshold": "2"}
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

    #[test]
    fn test_converts_and_normalizes() {
        let genesis = convert(raw_fixture()).unwrap();

        assert_eq!(genesis.initial_height, 5000001);

        let candidate = &genesis.app_state.candidates[0];
        assert_eq!(candidate.id, 7);
        assert_eq!(candidate.owner_address, "b".repeat(40));
        assert_eq!(candidate.public_key, "d".repeat(64));
        assert_eq!(candidate.status, 2);
        assert_eq!(candidate.stakes[0].bip_value, "0");

        // Present-but-empty owner address collapses to None
        assert_eq!(
            genesis.app_state.coins[0].owner_address.as_deref(),
            Some("a".repeat(40).as_str())
        );
        assert!(genesis.app_state.coins[1].owner_address.is_none());

        assert_eq!(
            genesis.app_state.frozen_funds[0].candidate_key.as_deref(),
            Some("d".repeat(64).as_str())
        );
    }

    #[test]
    fn test_rejects_malformed_numbers() {
        let mut raw = raw_fixture();
        raw.app_state.coins[0].crr = "not-a-number".to_string();
        let result = convert(raw);
        assert!(matches!(
            result,
            Err(ConvertError::InvalidNumber { field: "coin.crr", .. })
        ));
    }

    #[test]
    fn test_rejects_short_public_keys() {
        let mut raw = raw_fixture();
        raw.app_state.candidates[0].public_key = "Mpdeadbeef".to_string();
        assert!(matches!(
            convert(raw),
            Err(ConvertError::InvalidPublicKey(_))
        ));
    }
}
