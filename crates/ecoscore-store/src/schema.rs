//! Database schema SQL.

/// Core tables: users, products, analyses.
///
/// Analyses carry a plain (non-unique) product index; one-analysis-per-product
/// is enforced by the orchestration-level pre-check, not a constraint.
pub const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    created_at INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS products (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    name TEXT NOT NULL,
    description TEXT NOT NULL,
    category TEXT NOT NULL,
    manufacturer TEXT,
    manufacturing_location TEXT,
    materials_json TEXT,
    supply_chain_info TEXT,
    created_at INTEGER NOT NULL,
    updated_at INTEGER
);

CREATE INDEX IF NOT EXISTS idx_products_user_created ON products(user_id, created_at DESC);
CREATE INDEX IF NOT EXISTS idx_products_category ON products(category);

CREATE TABLE IF NOT EXISTS analyses (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    product_id INTEGER NOT NULL REFERENCES products(id) ON DELETE CASCADE,
    overall INTEGER NOT NULL,
    carbon_footprint INTEGER NOT NULL,
    water_usage INTEGER NOT NULL,
    energy_consumption INTEGER NOT NULL,
    recyclability INTEGER NOT NULL,
    sustainability INTEGER NOT NULL,
    insights_json TEXT NOT NULL,
    recommendations_json TEXT NOT NULL,
    raw_analysis TEXT NOT NULL,
    created_at INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_analyses_user_created ON analyses(user_id, created_at DESC);
CREATE INDEX IF NOT EXISTS idx_analyses_product ON analyses(product_id);
"#;
