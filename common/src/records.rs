//! Target records produced by the extractors and persisted by the store,
//! one struct per table.

/// Kind of a coin row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoinKind {
    Base,
    Token,
    PoolToken,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coin {
    /// Snapshot coin id; 0 is reserved for the synthesized base coin.
    pub id: u64,
    pub kind: CoinKind,
    pub name: String,
    pub symbol: String,
    pub volume: String,
    pub crr: u64,
    pub reserve: String,
    pub max_supply: String,
    pub version: u64,
    pub owner_address_id: Option<u64>,
}

/// Validator metadata columns (name, URLs) exist in the schema but are
/// populated by other subsystems after genesis, so the record omits them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validator {
    /// Snapshot candidate id.
    pub id: u64,
    /// Unprefixed lowercase hex public key, unique.
    pub public_key: String,
    /// 0 when the owner address could not be resolved.
    pub owner_address_id: u64,
    /// 0 when the reward address could not be resolved.
    pub reward_address_id: u64,
    pub status: u8,
    pub commission: u64,
    pub total_stake: String,
}

/// Auxiliary 1:1 public key -> validator id mapping, kept in its own
/// table so key lookups don't scan the validator table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorPublicKey {
    pub validator_id: u64,
    pub key: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stake {
    pub owner_address_id: u64,
    pub validator_id: u64,
    pub coin_id: u64,
    pub value: String,
    pub bip_value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Balance {
    pub address_id: u64,
    pub coin_id: u64,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unbond {
    pub address_id: u64,
    pub validator_id: u64,
    pub coin_id: u64,
    pub block_id: u64,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiquidityPool {
    pub id: u64,
    /// Coin id of the backing liquidity token (symbol `LP-<pool id>`).
    pub token_id: u64,
    pub first_coin_id: u64,
    pub second_coin_id: u64,
    pub first_coin_volume: String,
    pub second_coin_volume: String,
    pub liquidity: String,
    pub updated_at_block_id: u64,
}

/// Initial status of every order uploaded from genesis.
pub const ORDER_STATUS_ACTIVE: u8 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub id: u64,
    pub address_id: u64,
    pub liquidity_pool_id: u64,
    pub coin_sell_id: u64,
    pub coin_sell_volume: String,
    pub coin_buy_id: u64,
    pub coin_buy_volume: String,
    /// Sell volume divided by buy volume, 18 fractional digits.
    pub price: String,
    pub created_at_block: u64,
    pub status: u8,
}
