//! Wire-format genesis snapshot as served by the node (JSON with
//! string-encoded numerics).
//!
//! The snapshot carries more than the upload pipeline consumes: validator
//! history, deleted candidates, waitlists, halted blocks, the commission
//! table and its votes all deserialize here but are dropped by the
//! converter rather than rejected.

use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawGenesis {
    #[serde(default)]
    pub genesis_time: String,
    #[serde(default)]
    pub chain_id: String,
    pub initial_height: String,
    #[serde(default)]
    pub app_hash: String,
    #[serde(default)]
    pub consensus_params: Value,
    pub app_state: RawAppState,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawAppState {
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub validators: Value,
    #[serde(default)]
    pub candidates: Vec<RawCandidate>,
    #[serde(default)]
    pub deleted_candidates: Value,
    #[serde(default)]
    pub coins: Vec<RawCoin>,
    #[serde(default)]
    pub frozen_funds: Vec<RawFrozenFund>,
    #[serde(default)]
    pub block_list_candidates: Value,
    #[serde(default)]
    pub waitlist: Value,
    #[serde(default)]
    pub accounts: Vec<RawAccount>,
    #[serde(default)]
    pub halt_blocks: Value,
    #[serde(default)]
    pub pools: Vec<RawPool>,
    #[serde(default)]
    pub next_order_id: String,
    #[serde(default)]
    pub commission: Value,
    #[serde(default)]
    pub commission_votes: Value,
    #[serde(default)]
    pub used_checks: Value,
    #[serde(default)]
    pub max_gas: String,
    #[serde(default)]
    pub total_slashed: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawCandidate {
    pub id: String,
    pub reward_address: String,
    pub owner_address: String,
    #[serde(default)]
    pub control_address: String,
    pub total_bip_stake: String,
    pub public_key: String,
    pub commission: String,
    #[serde(default)]
    pub stakes: Vec<RawStake>,
    #[serde(default)]
    pub updates: Value,
    pub status: String,
    #[serde(default)]
    pub jailed_until: String,
    #[serde(default)]
    pub last_edit_commission_height: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawStake {
    pub owner: String,
    pub coin: String,
    pub value: String,
    #[serde(default)]
    pub bip_value: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawCoin {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub symbol: String,
    pub volume: String,
    pub crr: String,
    pub reserve: String,
    pub max_supply: String,
    pub version: String,
    /// May be entirely absent or present-but-empty; both mean "no owner".
    #[serde(default)]
    pub owner_address: Option<String>,
    #[serde(default)]
    pub mintable: bool,
    #[serde(default)]
    pub burnable: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawFrozenFund {
    pub height: String,
    pub address: String,
    #[serde(default)]
    pub candidate_key: Option<String>,
    pub candidate_id: String,
    pub coin: String,
    pub value: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawAccount {
    pub address: String,
    #[serde(default)]
    pub balance: Vec<RawBalance>,
    #[serde(default)]
    pub nonce: String,
    #[serde(default)]
    pub multisig_data: Option<Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawBalance {
    pub coin: String,
    pub value: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawPool {
    pub id: String,
    pub coin0: String,
    pub coin1: String,
    pub reserve0: String,
    pub reserve1: String,
    #[serde(default)]
    pub orders: Vec<RawOrder>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawOrder {
    pub id: String,
    pub owner: String,
    pub is_sale: bool,
    pub volume0: String,
    pub volume1: String,
    pub height: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserializes_snapshot_with_unused_sections() {
        let raw: RawGenesis = serde_json::from_value(json!({
            "genesis_time": "2021-03-01T00:00:00Z",
            "chain_id": "chain-1",
            "initial_height": "5000001",
            "app_state": {
                "version": "v250",
                "candidates": [],
                "coins": [{
                    "id": "1",
                    "name": "Test",
                    "symbol": "TEST",
                    "volume": "1000",
                    "crr": "50",
                    "reserve": "100",
                    "max_supply": "10000",
                    "version": "0"
                }],
                "accounts": [],
                "halt_blocks": [{"height": "1", "candidate_key": "x"}],
                "used_checks": ["abc"],
                "max_gas": "100000"
            }
        }))
        .unwrap();

        assert_eq!(raw.initial_height, "5000001");
        assert_eq!(raw.app_state.coins.len(), 1);
        assert!(raw.app_state.coins[0].owner_address.is_none());
        assert!(raw.app_state.candidates.is_empty());
    }
}
