//! Idempotency guard: the upload only runs against a database that holds
//! no addresses, no balances and no validators. Anything else means a
//! previous run (or live indexing) already populated the schema, and a
//! second genesis load would duplicate rows.

use explorer_genesis_common::store::{GenesisStore, StoreError};
use tracing::info;

pub async fn is_loadable(store: &dyn GenesisStore) -> Result<bool, StoreError> {
    let addresses = store.address_count().await?;
    let balances = store.balance_count().await?;
    let validators = store.validator_count().await?;

    let empty = addresses == 0 && balances == 0 && validators == 0;
    if !empty {
        info!(
            addresses,
            balances, validators, "database already populated, skipping upload"
        );
    }
    Ok(empty)
}
