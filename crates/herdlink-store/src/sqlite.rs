// SPDX-FileCopyrightText: 2026 Herdlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the DocumentStore trait.

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::debug;

use herdlink_config::model::StoreConfig;
use herdlink_core::types::{AdapterType, Document, HealthStatus};
use herdlink_core::{Adapter, DocumentStore, HerdlinkError};

use crate::database::Database;
use crate::queries;

/// SQLite-backed document store.
///
/// Wraps a [`Database`] handle and delegates all query operations to the
/// document query module. The database is lazily initialized on the first
/// call to [`SqliteStore::initialize`].
pub struct SqliteStore {
    config: StoreConfig,
    db: OnceCell<Database>,
}

impl SqliteStore {
    /// Create a new SqliteStore with the given configuration.
    ///
    /// The database connection is not opened until [`initialize`] is called.
    ///
    /// [`initialize`]: SqliteStore::initialize
    pub fn new(config: StoreConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    /// Open the database at the configured path and run migrations.
    pub async fn initialize(&self) -> Result<(), HerdlinkError> {
        let db = Database::open(&self.config.database_path, self.config.wal_mode).await?;
        self.db.set(db).map_err(|_| HerdlinkError::Internal(
            "store already initialized".to_string(),
        ))?;
        debug!(path = %self.config.database_path, "SQLite document store initialized");
        Ok(())
    }

    /// Checkpoint the WAL and release the store for shutdown.
    pub async fn close(&self) -> Result<(), HerdlinkError> {
        self.db()?.checkpoint().await
    }

    /// Returns a reference to the underlying Database, or an error if not initialized.
    fn db(&self) -> Result<&Database, HerdlinkError> {
        self.db.get().ok_or(HerdlinkError::AdapterNotReady {
            name: "sqlite".to_string(),
        })
    }
}

#[async_trait]
impl Adapter for SqliteStore {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Store
    }

    async fn health_check(&self) -> Result<HealthStatus, HerdlinkError> {
        let db = self.db()?;
        db.connection()
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("SELECT 1;")?;
                Ok(())
            })
            .await
            .map_err(crate::database::map_tr_err)?;
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), HerdlinkError> {
        // Shutdown checkpoints the WAL if the DB was initialized.
        if self.db.get().is_some() {
            self.close().await?;
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for SqliteStore {
    async fn get(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<Document>, HerdlinkError> {
        queries::get_document(self.db()?, collection, id).await
    }

    async fn query_eq(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> Result<Vec<Document>, HerdlinkError> {
        queries::query_documents_eq(self.db()?, collection, field, value).await
    }

    async fn upsert_merge(
        &self,
        collection: &str,
        id: &str,
        fields: serde_json::Value,
    ) -> Result<(), HerdlinkError> {
        queries::upsert_merge_document(self.db()?, collection, id, fields).await
    }
}
