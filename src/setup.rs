//! One-time role pool setup.

use tracing::info;

use crate::error::DatabaseError;
use crate::store::RoleStore;

/// Initial role pool adjustments, applied in order after the reset.
///
/// The later entries exercise the prune and no-op paths: Innocent is
/// removed again and Cursed Civilian is never created.
pub const SEED: &[(&str, i64)] = &[
    ("Innocent", 3),
    ("Werewolf", 4),
    ("Innocent", -10),
    ("Cursed Civilian", -55),
];

/// Recreate the role pool from empty and apply [`SEED`].
pub async fn setup_role_pool(store: &dyn RoleStore) -> Result<(), DatabaseError> {
    store.reset().await?;
    for (role, delta) in SEED {
        store.add_role(role, *delta).await?;
    }
    info!(steps = SEED.len(), "Role pool seeded");
    Ok(())
}
