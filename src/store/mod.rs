//! Persistence layer: libSQL-backed role inventory.

pub mod libsql_backend;
pub mod schema;
pub mod traits;

pub use libsql_backend::LibSqlBackend;
pub use traits::{RoleChange, RolePoolEntry, RoleStore};
