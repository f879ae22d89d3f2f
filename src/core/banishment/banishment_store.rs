use super::banishment_models::BanishmentRecord;
use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// The per-guild ledger of banished members.
///
/// A member has an entry if and only if they are currently banished.
/// Every method is one exclusive read-modify-write on the guild's ledger.
#[async_trait]
pub trait BanishmentStore: Send + Sync {
    /// Look up a member's entry without changing anything.
    async fn get_record(
        &self,
        guild_id: u64,
        user_id: u64,
    ) -> Result<Option<BanishmentRecord>, StoreError>;

    /// Write (or overwrite) a member's entry.
    async fn save_record(
        &self,
        guild_id: u64,
        user_id: u64,
        record: BanishmentRecord,
    ) -> Result<(), StoreError>;

    /// Remove a member's entry and hand it back, if there was one.
    async fn take_record(
        &self,
        guild_id: u64,
        user_id: u64,
    ) -> Result<Option<BanishmentRecord>, StoreError>;
}
