//! Normalized in-memory snapshot model, the converter's output.
//!
//! Addresses and public keys are canonical here: lowercase, no network
//! prefix. Big decimal amounts stay as strings; only fields the pipeline
//! needs as integers (ids, heights, crr, status) are parsed.

#[derive(Debug, Clone, Default)]
pub struct Genesis {
    pub chain_id: String,
    pub initial_height: u64,
    pub app_state: AppState,
}

#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub candidates: Vec<Candidate>,
    pub coins: Vec<GenesisCoin>,
    pub accounts: Vec<Account>,
    pub frozen_funds: Vec<FrozenFund>,
    pub pools: Vec<Pool>,
}

#[derive(Debug, Clone)]
pub struct Candidate {
    pub id: u64,
    pub reward_address: String,
    pub owner_address: String,
    pub control_address: String,
    pub total_bip_stake: String,
    pub public_key: String,
    pub commission: u64,
    pub status: u8,
    pub stakes: Vec<GenesisStake>,
}

#[derive(Debug, Clone)]
pub struct GenesisStake {
    pub owner: String,
    pub coin: u64,
    pub value: String,
    pub bip_value: String,
}

#[derive(Debug, Clone)]
pub struct GenesisCoin {
    pub id: u64,
    pub name: String,
    pub symbol: String,
    pub volume: String,
    pub crr: u64,
    pub reserve: String,
    pub max_supply: String,
    pub version: u64,
    pub owner_address: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Account {
    pub address: String,
    pub balances: Vec<GenesisBalance>,
}

#[derive(Debug, Clone)]
pub struct GenesisBalance {
    pub coin: u64,
    pub value: String,
}

#[derive(Debug, Clone)]
pub struct FrozenFund {
    pub height: u64,
    pub address: String,
    pub candidate_key: Option<String>,
    pub candidate_id: u64,
    pub coin: u64,
    pub value: String,
}

#[derive(Debug, Clone)]
pub struct Pool {
    pub id: u64,
    pub coin0: u64,
    pub coin1: u64,
    pub reserve0: String,
    pub reserve1: String,
    pub orders: Vec<GenesisOrder>,
}

#[derive(Debug, Clone)]
pub struct GenesisOrder {
    pub id: u64,
    pub owner: String,
    pub is_sale: bool,
    pub volume0: String,
    pub volume1: String,
    pub height: u64,
}
