//! SQLite-backed store for users, products, and analyses.
//!
//! Single connection behind a mutex; every read is owner-scoped so one
//! user's rows are invisible to another.

use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::info;

use crate::schema::SCHEMA_SQL;
use crate::types::*;
use ecoscore_core::{Category, EnvironmentalScore, Error, Product, Result};

pub struct SqliteStore {
    conn: Mutex<Connection>,
    db_path: PathBuf,
}

fn now_millis() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_millis() as i64
}

impl SqliteStore {
    /// Open or create the SQLite store.
    ///
    /// `db_dir` is the directory (e.g., `data/db/`). The file will be
    /// `db_dir/ecoscore.db`.
    pub fn open(db_dir: impl AsRef<Path>) -> Result<Self> {
        let db_dir = db_dir.as_ref();
        std::fs::create_dir_all(db_dir).map_err(|e| Error::Storage(e.to_string()))?;
        let db_path = db_dir.join("ecoscore.db");

        let conn = Self::create_connection(&db_path)?;
        Self::init_schema(&conn)?;

        let store = Self {
            conn: Mutex::new(conn),
            db_path,
        };

        let user_count = store.count_rows("users")?;
        let product_count = store.count_rows("products")?;
        info!(
            "SqliteStore initialized: {} users, {} products, path={}",
            user_count,
            product_count,
            store.db_path.display()
        );

        Ok(store)
    }

    fn create_connection(db_path: &Path) -> Result<Connection> {
        let conn = Connection::open(db_path).map_err(|e| Error::Database(e.to_string()))?;
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA foreign_keys = ON;
             PRAGMA synchronous = NORMAL;",
        )
        .map_err(|e| Error::Database(e.to_string()))?;
        Ok(conn)
    }

    fn init_schema(conn: &Connection) -> Result<()> {
        conn.execute_batch(SCHEMA_SQL)
            .map_err(|e| Error::Database(format!("Schema init failed: {}", e)))?;
        Ok(())
    }

    fn count_rows(&self, table: &str) -> Result<i64> {
        let conn = self.conn.lock();
        conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
            row.get(0)
        })
        .map_err(|e| Error::Database(e.to_string()))
    }

    // ---------------------------------------------------------------
    // Users
    // ---------------------------------------------------------------

    /// Insert a user. Email is unique across the table.
    pub fn create_user(&self, name: &str, email: &str, password_hash: &str) -> Result<User> {
        let now = now_millis();
        let conn = self.conn.lock();
        let id = conn
            .prepare_cached(
                "INSERT INTO users (name, email, password_hash, created_at) VALUES (?1, ?2, ?3, ?4)",
            )
            .map_err(|e| Error::Database(e.to_string()))?
            .insert(params![name, email, password_hash, now])
            .map_err(|e| {
                if e.to_string().contains("UNIQUE constraint") {
                    Error::Duplicate(email.to_string())
                } else {
                    Error::Database(e.to_string())
                }
            })?;

        Ok(User {
            id,
            name: name.to_string(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            created_at: now,
        })
    }

    pub fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let conn = self.conn.lock();
        let mut stmt = conn
            .prepare_cached("SELECT * FROM users WHERE email = ?1")
            .map_err(|e| Error::Database(e.to_string()))?;
        stmt.query_row(params![email], Self::row_to_user)
            .optional()
            .map_err(|e| Error::Database(e.to_string()))
    }

    pub fn get_user(&self, user_id: i64) -> Result<Option<User>> {
        let conn = self.conn.lock();
        let mut stmt = conn
            .prepare_cached("SELECT * FROM users WHERE id = ?1")
            .map_err(|e| Error::Database(e.to_string()))?;
        stmt.query_row(params![user_id], Self::row_to_user)
            .optional()
            .map_err(|e| Error::Database(e.to_string()))
    }

    // ---------------------------------------------------------------
    // Products
    // ---------------------------------------------------------------

    pub fn create_product(&self, user_id: i64, new: NewProduct) -> Result<Product> {
        let now = now_millis();
        let materials_json = match &new.materials {
            Some(m) => Some(serde_json::to_string(m)?),
            None => None,
        };

        let conn = self.conn.lock();
        let id = conn
            .prepare_cached(
                "INSERT INTO products (user_id, name, description, category, manufacturer,
                 manufacturing_location, materials_json, supply_chain_info, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            )
            .map_err(|e| Error::Database(e.to_string()))?
            .insert(params![
                user_id,
                new.name,
                new.description,
                new.category.as_str(),
                new.manufacturer,
                new.manufacturing_location,
                materials_json,
                new.supply_chain_info,
                now
            ])
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(Product {
            id,
            user_id,
            name: new.name,
            description: new.description,
            category: new.category,
            manufacturer: new.manufacturer,
            manufacturing_location: new.manufacturing_location,
            materials: new.materials,
            supply_chain_info: new.supply_chain_info,
            created_at: now,
            updated_at: None,
        })
    }

    pub fn get_product(&self, product_id: i64, user_id: i64) -> Result<Option<Product>> {
        let conn = self.conn.lock();
        let mut stmt = conn
            .prepare_cached("SELECT * FROM products WHERE id = ?1 AND user_id = ?2")
            .map_err(|e| Error::Database(e.to_string()))?;
        stmt.query_row(params![product_id, user_id], Self::row_to_product)
            .optional()
            .map_err(|e| Error::Database(e.to_string()))
    }

    /// List a user's products, newest first. The category filter matches the
    /// raw stored tag, so an unknown tag simply matches nothing.
    pub fn list_products(
        &self,
        user_id: i64,
        category: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Product>> {
        let conn = self.conn.lock();
        let mut out = Vec::new();

        match category {
            Some(cat) => {
                let mut stmt = conn
                    .prepare_cached(
                        "SELECT * FROM products WHERE user_id = ?1 AND category = ?2
                         ORDER BY created_at DESC, id DESC LIMIT ?3 OFFSET ?4",
                    )
                    .map_err(|e| Error::Database(e.to_string()))?;
                let rows = stmt
                    .query_map(params![user_id, cat, limit, offset], Self::row_to_product)
                    .map_err(|e| Error::Database(e.to_string()))?;
                for row in rows {
                    out.push(row.map_err(|e| Error::Database(e.to_string()))?);
                }
            }
            None => {
                let mut stmt = conn
                    .prepare_cached(
                        "SELECT * FROM products WHERE user_id = ?1
                         ORDER BY created_at DESC, id DESC LIMIT ?2 OFFSET ?3",
                    )
                    .map_err(|e| Error::Database(e.to_string()))?;
                let rows = stmt
                    .query_map(params![user_id, limit, offset], Self::row_to_product)
                    .map_err(|e| Error::Database(e.to_string()))?;
                for row in rows {
                    out.push(row.map_err(|e| Error::Database(e.to_string()))?);
                }
            }
        }

        Ok(out)
    }

    pub fn count_products(&self, user_id: i64, category: Option<&str>) -> Result<i64> {
        let conn = self.conn.lock();
        let result = match category {
            Some(cat) => conn.query_row(
                "SELECT COUNT(*) FROM products WHERE user_id = ?1 AND category = ?2",
                params![user_id, cat],
                |row| row.get(0),
            ),
            None => conn.query_row(
                "SELECT COUNT(*) FROM products WHERE user_id = ?1",
                params![user_id],
                |row| row.get(0),
            ),
        };
        result.map_err(|e| Error::Database(e.to_string()))
    }

    /// Apply a partial update. Returns the updated product, or `None` when
    /// the product does not exist or belongs to another user.
    pub fn update_product(
        &self,
        product_id: i64,
        user_id: i64,
        update: ProductUpdate,
    ) -> Result<Option<Product>> {
        let existing = self.get_product(product_id, user_id)?;
        let Some(mut product) = existing else {
            return Ok(None);
        };

        if let Some(name) = update.name {
            product.name = name;
        }
        if let Some(description) = update.description {
            product.description = description;
        }
        if let Some(category) = update.category {
            product.category = category;
        }
        if let Some(manufacturer) = update.manufacturer {
            product.manufacturer = Some(manufacturer);
        }
        if let Some(location) = update.manufacturing_location {
            product.manufacturing_location = Some(location);
        }
        if let Some(materials) = update.materials {
            product.materials = Some(materials);
        }
        if let Some(info) = update.supply_chain_info {
            product.supply_chain_info = Some(info);
        }
        product.updated_at = Some(now_millis());

        let materials_json = match &product.materials {
            Some(m) => Some(serde_json::to_string(m)?),
            None => None,
        };

        let conn = self.conn.lock();
        conn.prepare_cached(
            "UPDATE products SET name = ?1, description = ?2, category = ?3, manufacturer = ?4,
             manufacturing_location = ?5, materials_json = ?6, supply_chain_info = ?7,
             updated_at = ?8
             WHERE id = ?9 AND user_id = ?10",
        )
        .map_err(|e| Error::Database(e.to_string()))?
        .execute(params![
            product.name,
            product.description,
            product.category.as_str(),
            product.manufacturer,
            product.manufacturing_location,
            materials_json,
            product.supply_chain_info,
            product.updated_at,
            product_id,
            user_id
        ])
        .map_err(|e| Error::Database(e.to_string()))?;

        Ok(Some(product))
    }

    /// Delete a product (and, via cascade, its analyses). Returns whether a
    /// row was removed.
    pub fn delete_product(&self, product_id: i64, user_id: i64) -> Result<bool> {
        let conn = self.conn.lock();
        let deleted = conn
            .prepare_cached("DELETE FROM products WHERE id = ?1 AND user_id = ?2")
            .map_err(|e| Error::Database(e.to_string()))?
            .execute(params![product_id, user_id])
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(deleted > 0)
    }

    // ---------------------------------------------------------------
    // Analyses
    // ---------------------------------------------------------------

    pub fn create_analysis(
        &self,
        user_id: i64,
        product_id: i64,
        score: EnvironmentalScore,
        insights: &[String],
        recommendations: &[String],
        raw_analysis: &str,
    ) -> Result<Analysis> {
        let now = now_millis();
        let insights_json = serde_json::to_string(insights)?;
        let recommendations_json = serde_json::to_string(recommendations)?;

        let conn = self.conn.lock();
        let id = conn
            .prepare_cached(
                "INSERT INTO analyses (user_id, product_id, overall, carbon_footprint,
                 water_usage, energy_consumption, recyclability, sustainability,
                 insights_json, recommendations_json, raw_analysis, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            )
            .map_err(|e| Error::Database(e.to_string()))?
            .insert(params![
                user_id,
                product_id,
                score.overall,
                score.carbon_footprint,
                score.water_usage,
                score.energy_consumption,
                score.recyclability,
                score.sustainability,
                insights_json,
                recommendations_json,
                raw_analysis,
                now
            ])
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(Analysis {
            id,
            user_id,
            product_id,
            score,
            insights: insights.to_vec(),
            recommendations: recommendations.to_vec(),
            raw_analysis: raw_analysis.to_string(),
            created_at: now,
        })
    }

    pub fn get_analysis(&self, analysis_id: i64, user_id: i64) -> Result<Option<Analysis>> {
        let conn = self.conn.lock();
        let mut stmt = conn
            .prepare_cached("SELECT * FROM analyses WHERE id = ?1 AND user_id = ?2")
            .map_err(|e| Error::Database(e.to_string()))?;
        stmt.query_row(params![analysis_id, user_id], Self::row_to_analysis)
            .optional()
            .map_err(|e| Error::Database(e.to_string()))
    }

    /// The pre-check behind the one-analysis-per-product expectation.
    pub fn find_analysis_for_product(
        &self,
        product_id: i64,
        user_id: i64,
    ) -> Result<Option<Analysis>> {
        let conn = self.conn.lock();
        let mut stmt = conn
            .prepare_cached("SELECT * FROM analyses WHERE product_id = ?1 AND user_id = ?2")
            .map_err(|e| Error::Database(e.to_string()))?;
        stmt.query_row(params![product_id, user_id], Self::row_to_analysis)
            .optional()
            .map_err(|e| Error::Database(e.to_string()))
    }

    pub fn list_analyses(&self, user_id: i64, limit: i64, offset: i64) -> Result<Vec<Analysis>> {
        let conn = self.conn.lock();
        let mut stmt = conn
            .prepare_cached(
                "SELECT * FROM analyses WHERE user_id = ?1
                 ORDER BY created_at DESC, id DESC LIMIT ?2 OFFSET ?3",
            )
            .map_err(|e| Error::Database(e.to_string()))?;
        let rows = stmt
            .query_map(params![user_id, limit, offset], Self::row_to_analysis)
            .map_err(|e| Error::Database(e.to_string()))?;

        let mut out = Vec::new();
        for row in rows {
            out.push(row.map_err(|e| Error::Database(e.to_string()))?);
        }
        Ok(out)
    }

    pub fn count_analyses(&self, user_id: i64) -> Result<i64> {
        let conn = self.conn.lock();
        conn.query_row(
            "SELECT COUNT(*) FROM analyses WHERE user_id = ?1",
            params![user_id],
            |row| row.get(0),
        )
        .map_err(|e| Error::Database(e.to_string()))
    }

    // ---------------------------------------------------------------
    // Row mappers
    // ---------------------------------------------------------------

    fn row_to_user(row: &Row) -> rusqlite::Result<User> {
        Ok(User {
            id: row.get("id")?,
            name: row.get("name")?,
            email: row.get("email")?,
            password_hash: row.get("password_hash")?,
            created_at: row.get("created_at")?,
        })
    }

    fn row_to_product(row: &Row) -> rusqlite::Result<Product> {
        let category: String = row.get("category")?;
        let materials_json: Option<String> = row.get("materials_json")?;
        Ok(Product {
            id: row.get("id")?,
            user_id: row.get("user_id")?,
            name: row.get("name")?,
            description: row.get("description")?,
            category: Category::parse(&category),
            manufacturer: row.get("manufacturer")?,
            manufacturing_location: row.get("manufacturing_location")?,
            materials: materials_json.map(|m| serde_json::from_str(&m).unwrap_or_default()),
            supply_chain_info: row.get("supply_chain_info")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }

    fn row_to_analysis(row: &Row) -> rusqlite::Result<Analysis> {
        let insights_json: String = row.get("insights_json")?;
        let recommendations_json: String = row.get("recommendations_json")?;
        Ok(Analysis {
            id: row.get("id")?,
            user_id: row.get("user_id")?,
            product_id: row.get("product_id")?,
            score: EnvironmentalScore {
                overall: row.get("overall")?,
                carbon_footprint: row.get("carbon_footprint")?,
                water_usage: row.get("water_usage")?,
                energy_consumption: row.get("energy_consumption")?,
                recyclability: row.get("recyclability")?,
                sustainability: row.get("sustainability")?,
            },
            insights: serde_json::from_str(&insights_json).unwrap_or_default(),
            recommendations: serde_json::from_str(&recommendations_json).unwrap_or_default(),
            raw_analysis: row.get("raw_analysis")?,
            created_at: row.get("created_at")?,
        })
    }
}
