//! Role pool schema.
//!
//! A single table, created if missing when a backend opens. Existing rows
//! are never touched.

use libsql::Connection;

use crate::error::DatabaseError;

/// Table holding the role pool. Shared with the setup reset.
pub(crate) const ROLE_POOL_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS "role-pool" (
        role TEXT PRIMARY KEY NOT NULL,
        amount INTEGER NOT NULL DEFAULT 0
    );"#;

/// Create the role pool table if it doesn't exist yet.
pub async fn ensure_schema(conn: &Connection) -> Result<(), DatabaseError> {
    conn.execute_batch(ROLE_POOL_TABLE)
        .await
        .map_err(|e| DatabaseError::Query(format!("Failed to create role-pool table: {e}")))?;
    tracing::debug!("Role pool schema ready");
    Ok(())
}
