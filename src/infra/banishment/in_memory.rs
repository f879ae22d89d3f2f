// In-memory ledger used by the service tests.
//
// Keyed by guild, then by the member id as a string, which is how the
// ledger addresses members everywhere else too.

use crate::core::banishment::{BanishmentRecord, BanishmentStore, StoreError};
use async_trait::async_trait;
use dashmap::DashMap;
use std::collections::HashMap;

/// DashMap entry guards hold the guild's shard lock, so every call below is
/// an exclusive read-modify-write on that guild's ledger.
pub struct InMemoryBanishmentStore {
    guilds: DashMap<u64, HashMap<String, BanishmentRecord>>,
}

impl InMemoryBanishmentStore {
    pub fn new() -> Self {
        Self {
            guilds: DashMap::new(),
        }
    }
}

impl Default for InMemoryBanishmentStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BanishmentStore for InMemoryBanishmentStore {
    async fn get_record(
        &self,
        guild_id: u64,
        user_id: u64,
    ) -> Result<Option<BanishmentRecord>, StoreError> {
        Ok(self
            .guilds
            .get(&guild_id)
            .and_then(|ledger| ledger.get(&user_id.to_string()).cloned()))
    }

    async fn save_record(
        &self,
        guild_id: u64,
        user_id: u64,
        record: BanishmentRecord,
    ) -> Result<(), StoreError> {
        self.guilds
            .entry(guild_id)
            .or_default()
            .insert(user_id.to_string(), record);
        Ok(())
    }

    async fn take_record(
        &self,
        guild_id: u64,
        user_id: u64,
    ) -> Result<Option<BanishmentRecord>, StoreError> {
        Ok(self
            .guilds
            .get_mut(&guild_id)
            .and_then(|mut ledger| ledger.remove(&user_id.to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_take_pops_entry_once() {
        let store = InMemoryBanishmentStore::new();
        store
            .save_record(1, 5, BanishmentRecord::with_roles(vec![10, 11]))
            .await
            .unwrap();

        let taken = store.take_record(1, 5).await.unwrap();
        assert_eq!(taken, Some(BanishmentRecord::with_roles(vec![10, 11])));
        assert_eq!(store.take_record(1, 5).await.unwrap(), None);
        assert_eq!(store.get_record(1, 5).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_ledgers_are_per_guild() {
        let store = InMemoryBanishmentStore::new();
        store
            .save_record(1, 5, BanishmentRecord::with_roles(vec![10]))
            .await
            .unwrap();

        assert_eq!(store.get_record(2, 5).await.unwrap(), None);
        assert_eq!(store.take_record(2, 5).await.unwrap(), None);
        assert!(store.get_record(1, 5).await.unwrap().is_some());
    }
}
