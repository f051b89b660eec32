//! libSQL backend: async `RoleStore` implementation.
//!
//! Supports local file and in-memory databases. One connection is opened
//! per backend and reused for every call.

use std::path::Path;

use async_trait::async_trait;
use libsql::{Connection, Database as LibSqlDatabase, params};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::error::DatabaseError;
use crate::store::schema::{self, ROLE_POOL_TABLE};
use crate::store::traits::{RoleChange, RoleStore};

/// Primary result code SQLite uses for constraint violations.
const SQLITE_CONSTRAINT: i32 = 19;

/// libSQL database backend.
pub struct LibSqlBackend {
    db: LibSqlDatabase,
    conn: Connection,
    /// Serializes write transactions on the shared connection.
    write_gate: Mutex<()>,
}

impl LibSqlBackend {
    /// Open (or create) a local database file and ensure the role pool table.
    pub async fn new_local(path: &Path) -> Result<Self, DatabaseError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                DatabaseError::Pool(format!("Failed to create database directory: {e}"))
            })?;
        }

        let db = libsql::Builder::new_local(path)
            .build()
            .await
            .map_err(|e| DatabaseError::Pool(format!("Failed to open libSQL database: {e}")))?;

        let backend = Self::from_database(db).await?;
        info!(path = %path.display(), "Database opened");
        Ok(backend)
    }

    /// Create an in-memory database (for tests).
    pub async fn new_memory() -> Result<Self, DatabaseError> {
        let db = libsql::Builder::new_local(":memory:")
            .build()
            .await
            .map_err(|e| {
                DatabaseError::Pool(format!("Failed to create in-memory database: {e}"))
            })?;

        Self::from_database(db).await
    }

    async fn from_database(db: LibSqlDatabase) -> Result<Self, DatabaseError> {
        let conn = db
            .connect()
            .map_err(|e| DatabaseError::Pool(format!("Failed to create connection: {e}")))?;

        let backend = Self {
            db,
            conn,
            write_gate: Mutex::new(()),
        };
        backend.ensure_schema().await?;
        Ok(backend)
    }

    /// Release the connection and the database handle.
    pub fn close(self) {
        let Self { db, conn, .. } = self;
        drop(conn);
        drop(db);
        debug!("Database closed");
    }

    fn conn(&self) -> &Connection {
        &self.conn
    }
}

// ── Helper functions ────────────────────────────────────────────────

/// Classify a libsql error, keeping constraint violations distinct.
fn query_error(context: &str, e: libsql::Error) -> DatabaseError {
    match e {
        libsql::Error::SqliteFailure(code, msg) if code & 0xff == SQLITE_CONSTRAINT => {
            DatabaseError::Constraint(format!("{context}: {msg}"))
        }
        other => DatabaseError::Query(format!("{context}: {other}")),
    }
}

async fn select_amount(conn: &Connection, role: &str) -> Result<Option<i64>, DatabaseError> {
    let mut rows = conn
        .query(
            r#"SELECT amount FROM "role-pool" WHERE role = ?1"#,
            params![role],
        )
        .await
        .map_err(|e| query_error("select_amount", e))?;

    match rows.next().await {
        Ok(Some(row)) => row
            .get::<i64>(0)
            .map(Some)
            .map_err(|e| query_error("select_amount", e)),
        Ok(None) => Ok(None),
        Err(e) => Err(query_error("select_amount", e)),
    }
}

/// Read-check-write-prune for one role. Runs inside the caller's transaction.
async fn apply_delta(
    conn: &Connection,
    role: &str,
    delta: i64,
) -> Result<RoleChange, DatabaseError> {
    let change = match select_amount(conn, role).await? {
        None if delta <= 0 => return Ok(RoleChange::Ignored),
        None => {
            conn.execute(
                r#"INSERT INTO "role-pool" (role, amount) VALUES (?1, ?2)"#,
                params![role, delta],
            )
            .await
            .map_err(|e| query_error("insert_role", e))?;
            RoleChange::Created { amount: delta }
        }
        Some(current) => {
            // SQLite turns an overflowing integer sum into a REAL.
            let amount = current.checked_add(delta).ok_or_else(|| {
                DatabaseError::Constraint(format!(
                    "amount overflow for {role}: {current} + {delta}"
                ))
            })?;
            conn.execute(
                r#"UPDATE "role-pool" SET amount = ?1 WHERE role = ?2"#,
                params![amount, role],
            )
            .await
            .map_err(|e| query_error("update_role", e))?;

            if amount > 0 {
                RoleChange::Updated { amount }
            } else {
                RoleChange::Removed
            }
        }
    };

    let pruned = conn
        .execute(r#"DELETE FROM "role-pool" WHERE amount <= 0"#, ())
        .await
        .map_err(|e| query_error("prune_roles", e))?;
    if pruned > 0 {
        debug!(pruned, "Pruned exhausted roles");
    }

    Ok(change)
}

#[async_trait]
impl RoleStore for LibSqlBackend {
    async fn ensure_schema(&self) -> Result<(), DatabaseError> {
        schema::ensure_schema(self.conn()).await
    }

    async fn add_role(&self, role: &str, delta: i64) -> Result<RoleChange, DatabaseError> {
        let _guard = self.write_gate.lock().await;

        let tx = self
            .conn()
            .transaction()
            .await
            .map_err(|e| DatabaseError::Transaction(format!("begin add_role: {e}")))?;

        match apply_delta(&tx, role, delta).await {
            Ok(change) => {
                tx.commit()
                    .await
                    .map_err(|e| DatabaseError::Transaction(format!("commit add_role: {e}")))?;
                info!(role, delta, ?change, "Role pool updated");
                Ok(change)
            }
            Err(e) => {
                if let Err(rollback) = tx.rollback().await {
                    tracing::warn!(error = %rollback, "Rollback of add_role failed");
                }
                Err(e)
            }
        }
    }

    async fn role_amount(&self, role: &str) -> Result<Option<i64>, DatabaseError> {
        select_amount(self.conn(), role).await
    }

    async fn reset(&self) -> Result<(), DatabaseError> {
        let _guard = self.write_gate.lock().await;

        self.conn()
            .execute(r#"DROP TABLE IF EXISTS "role-pool""#, ())
            .await
            .map_err(|e| query_error("drop_role_pool", e))?;
        self.conn()
            .execute_batch(ROLE_POOL_TABLE)
            .await
            .map_err(|e| query_error("create_role_pool", e))?;

        info!("Role pool reset");
        Ok(())
    }
}
