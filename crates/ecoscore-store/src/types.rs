//! Row types for users and analyses, plus product write shapes.

use ecoscore_core::{Category, EnvironmentalScore};
use serde::{Deserialize, Serialize};

/// A user row. The password hash never serializes into responses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: i64,
}

/// Fields for creating a product.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub category: Category,
    #[serde(default)]
    pub manufacturer: Option<String>,
    #[serde(default)]
    pub manufacturing_location: Option<String>,
    #[serde(default)]
    pub materials: Option<Vec<String>>,
    #[serde(default)]
    pub supply_chain_info: Option<String>,
}

/// Partial product update; `None` fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<Category>,
    pub manufacturer: Option<String>,
    pub manufacturing_location: Option<String>,
    pub materials: Option<Vec<String>>,
    pub supply_chain_info: Option<String>,
}

/// A persisted analysis row.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    pub id: i64,
    pub user_id: i64,
    pub product_id: i64,
    pub score: EnvironmentalScore,
    pub insights: Vec<String>,
    pub recommendations: Vec<String>,
    pub raw_analysis: String,
    pub created_at: i64,
}
