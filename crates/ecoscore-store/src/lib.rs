//! EcoScore Store — SQLite persistence for users, products, and analyses.

pub mod schema;
pub mod sqlite;
pub mod types;

pub use sqlite::SqliteStore;
pub use types::*;
