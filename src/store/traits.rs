//! `RoleStore` trait: async interface over the role inventory.

use async_trait::async_trait;

use crate::error::DatabaseError;

/// A row of the role pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RolePoolEntry {
    pub role: String,
    pub amount: i64,
}

/// What a single `add_role` call did to the touched role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleChange {
    /// Role was absent and the delta was not positive.
    Ignored,
    /// Role was absent and has been created.
    Created { amount: i64 },
    /// Role was present and still has a positive amount.
    Updated { amount: i64 },
    /// Role was present and dropped to zero or below, so it was pruned.
    Removed,
}

/// Backend-agnostic role inventory.
///
/// The store never keeps a row whose amount is zero or negative.
#[async_trait]
pub trait RoleStore: Send + Sync {
    /// Create the role pool table if it is missing.
    async fn ensure_schema(&self) -> Result<(), DatabaseError>;

    /// Add `delta` (possibly negative) of `role` to the pool.
    ///
    /// An absent role is only created for a positive delta. Any update is
    /// followed by deleting every row with amount ≤ 0, and the whole call
    /// commits atomically. A sum outside the `i64` range is rejected with
    /// [`DatabaseError::Constraint`] and leaves the pool untouched.
    async fn add_role(&self, role: &str, delta: i64) -> Result<RoleChange, DatabaseError>;

    /// Current amount of `role`, or `None` if it isn't in the pool.
    async fn role_amount(&self, role: &str) -> Result<Option<i64>, DatabaseError>;

    /// Listing the pool has never been implemented.
    async fn view_roles(&self) -> Result<Vec<RolePoolEntry>, DatabaseError> {
        Err(DatabaseError::Unsupported("view_roles"))
    }

    /// Drop and recreate the role pool, leaving it empty.
    async fn reset(&self) -> Result<(), DatabaseError>;
}
