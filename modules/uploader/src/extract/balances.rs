//! Balance extraction, the largest record kind by far. Accounts are
//! split into chunks and each chunk resolves its addresses on its own
//! task; every address was inserted in an earlier phase so lookups hit
//! the resolver cache. An account whose address cannot be resolved is
//! skipped whole.

use std::sync::Arc;

use explorer_genesis_common::genesis::Account;
use explorer_genesis_common::records::Balance;
use futures::future::join_all;
use tracing::warn;

use crate::resolver::Resolver;

pub async fn extract(
    accounts: Vec<Account>,
    resolver: Arc<Resolver>,
    chunk_size: usize,
) -> Vec<Balance> {
    let chunk_size = chunk_size.max(1);
    let mut handles = Vec::new();

    let mut rest = accounts;
    while !rest.is_empty() {
        let tail = rest.split_off(chunk_size.min(rest.len()));
        let chunk = std::mem::replace(&mut rest, tail);
        let resolver = resolver.clone();
        handles.push(tokio::spawn(async move {
            let mut balances = Vec::new();
            for account in chunk {
                let address_id = match resolver.address_id(&account.address).await {
                    Ok(Some(id)) => id,
                    Ok(None) => {
                        warn!(address = %account.address, "account address not found, skipping");
                        continue;
                    }
                    Err(e) => {
                        warn!(address = %account.address, error = %e, "address lookup failed, skipping account");
                        continue;
                    }
                };
                for balance in account.balances {
                    balances.push(Balance {
                        address_id,
                        coin_id: balance.coin,
                        value: balance.value,
                    });
                }
            }
            balances
        }));
    }

    let mut all = Vec::new();
    for joined in join_all(handles).await {
        match joined {
            Ok(balances) => all.extend(balances),
            Err(e) => warn!(error = %e, "balance extraction task failed"),
        }
    }
    all
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_store::MemoryStore;
    use explorer_genesis_common::genesis::GenesisBalance;

    fn account(address: String, coins: &[(u64, &str)]) -> Account {
        Account {
            address,
            balances: coins
                .iter()
                .map(|(coin, value)| GenesisBalance {
                    coin: *coin,
                    value: value.to_string(),
                })
                .collect(),
        }
    }

    #[tokio::test]
    async fn test_flattens_accounts_across_chunks() {
        let resolver = Arc::new(Resolver::new(Arc::new(MemoryStore::default())));
        let addresses: Vec<(String, u64)> = (0..5)
            .map(|i| (format!("{i}{}", "0".repeat(39)), i + 1))
            .collect();
        resolver.register_addresses(&addresses);

        let accounts: Vec<Account> = addresses
            .iter()
            .map(|(address, _)| account(address.clone(), &[(0, "10"), (1, "20")]))
            .collect();

        // Chunk size 2 over 5 accounts exercises a ragged final chunk
        let mut balances = extract(accounts, resolver, 2).await;
        balances.sort_by_key(|b| (b.address_id, b.coin_id));

        assert_eq!(balances.len(), 10);
        assert_eq!(balances[0].address_id, 1);
        assert_eq!(balances[0].coin_id, 0);
        assert_eq!(balances[0].value, "10");
        assert_eq!(balances[9].address_id, 5);
        assert_eq!(balances[9].coin_id, 1);
    }

    #[tokio::test]
    async fn test_unresolved_account_is_skipped_whole() {
        let resolver = Arc::new(Resolver::new(Arc::new(MemoryStore::default())));
        resolver.register_addresses(&[("a".repeat(40), 1)]);

        let accounts = vec![
            account("a".repeat(40), &[(0, "10")]),
            account("f".repeat(40), &[(0, "99"), (1, "99")]),
        ];

        let balances = extract(accounts, resolver, 10).await;

        assert_eq!(balances.len(), 1);
        assert_eq!(balances[0].address_id, 1);
    }
}
