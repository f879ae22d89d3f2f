// SQLite-backed banishment ledger.
//
// Table:
// - banishment_banished_users: one row per banished member, the saved roles
//   kept as a JSON record so a damaged row can still be read back and reported

use crate::core::banishment::{BanishmentRecord, BanishmentStore, StoreError};
use async_trait::async_trait;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Row, Sqlite};
use std::path::Path;

pub struct SqliteBanishmentStore {
    pool: Pool<Sqlite>,
}

impl SqliteBanishmentStore {
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        // Ensure the file exists if it's a file path
        let path_str = database_url.trim_start_matches("sqlite://");
        if !database_url.contains(":memory:") && !Path::new(path_str).exists() {
            if let Some(parent) = Path::new(path_str).parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::File::create(path_str)?;
        }

        let conn_str = if database_url.starts_with("sqlite:") {
            database_url.to_string()
        } else {
            format!("sqlite://{}", database_url)
        };

        let pool = SqlitePoolOptions::new().connect(&conn_str).await?;

        let store = Self { pool };
        store.migrate().await?;
        Ok(store)
    }

    async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS banishment_banished_users (
                guild_id INTEGER NOT NULL,
                user_id TEXT NOT NULL,
                record TEXT NOT NULL,
                PRIMARY KEY (guild_id, user_id)
            );
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Storage(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl BanishmentStore for SqliteBanishmentStore {
    async fn get_record(
        &self,
        guild_id: u64,
        user_id: u64,
    ) -> Result<Option<BanishmentRecord>, StoreError> {
        let row = sqlx::query(
            "SELECT record FROM banishment_banished_users WHERE guild_id = ? AND user_id = ?",
        )
        .bind(guild_id as i64)
        .bind(user_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Storage(e.to_string()))?;

        match row {
            Some(row) => Ok(Some(serde_json::from_str(&row.get::<String, _>("record"))?)),
            None => Ok(None),
        }
    }

    async fn save_record(
        &self,
        guild_id: u64,
        user_id: u64,
        record: BanishmentRecord,
    ) -> Result<(), StoreError> {
        let json = serde_json::to_string(&record)?;
        sqlx::query(
            r#"
            INSERT INTO banishment_banished_users (guild_id, user_id, record)
            VALUES (?, ?, ?)
            ON CONFLICT(guild_id, user_id) DO UPDATE SET
                record = excluded.record
            "#,
        )
        .bind(guild_id as i64)
        .bind(user_id.to_string())
        .bind(json)
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Storage(e.to_string()))?;
        Ok(())
    }

    async fn take_record(
        &self,
        guild_id: u64,
        user_id: u64,
    ) -> Result<Option<BanishmentRecord>, StoreError> {
        // Single statement so the pop can't interleave with another writer
        let row = sqlx::query(
            r#"
            DELETE FROM banishment_banished_users
            WHERE guild_id = ? AND user_id = ?
            RETURNING record
            "#,
        )
        .bind(guild_id as i64)
        .bind(user_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Storage(e.to_string()))?;

        match row {
            Some(row) => Ok(Some(serde_json::from_str(&row.get::<String, _>("record"))?)),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_ledger_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("banishment.db");
        let path = path.to_str().unwrap();

        let store = SqliteBanishmentStore::new(path).await.unwrap();
        store
            .save_record(9, 77, BanishmentRecord::with_roles(vec![3, 1, 2]))
            .await
            .unwrap();
        drop(store);

        let store = SqliteBanishmentStore::new(path).await.unwrap();
        assert_eq!(
            store.get_record(9, 77).await.unwrap(),
            Some(BanishmentRecord::with_roles(vec![3, 1, 2]))
        );
        assert_eq!(store.get_record(10, 77).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_take_removes_row() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("banishment.db");
        let store = SqliteBanishmentStore::new(path.to_str().unwrap())
            .await
            .unwrap();

        store
            .save_record(9, 77, BanishmentRecord::with_roles(vec![]))
            .await
            .unwrap();

        assert_eq!(
            store.take_record(9, 77).await.unwrap(),
            Some(BanishmentRecord::with_roles(vec![]))
        );
        assert_eq!(store.take_record(9, 77).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_record_without_roles_reads_back_malformed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("banishment.db");
        let store = SqliteBanishmentStore::new(path.to_str().unwrap())
            .await
            .unwrap();

        store
            .save_record(9, 77, BanishmentRecord::default())
            .await
            .unwrap();

        let record = store.take_record(9, 77).await.unwrap().unwrap();
        assert_eq!(record.saved_role_ids, None);
    }
}
