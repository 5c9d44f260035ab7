//! Shared domain types for products and environmental scores.

use serde::{Deserialize, Serialize};

/// Product category. The set is closed; anything else is `Other`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Electronics,
    Clothing,
    Food,
    Furniture,
    Transportation,
    #[default]
    Other,
}

impl Category {
    /// Parse a category tag. Unrecognized tags map to `Other` rather than
    /// failing, so stored rows can never crash the scorer.
    pub fn parse(tag: &str) -> Self {
        match tag {
            "electronics" => Self::Electronics,
            "clothing" => Self::Clothing,
            "food" => Self::Food,
            "furniture" => Self::Furniture,
            "transportation" => Self::Transportation,
            _ => Self::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Electronics => "electronics",
            Self::Clothing => "clothing",
            Self::Food => "food",
            Self::Furniture => "furniture",
            Self::Transportation => "transportation",
            Self::Other => "other",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Six environmental sub-scores, 0-100 where 100 is most eco-friendly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentalScore {
    pub overall: i64,
    pub carbon_footprint: i64,
    pub water_usage: i64,
    pub energy_consumption: i64,
    pub recyclability: i64,
    pub sustainability: i64,
}

/// A registered product. Timestamps are unix epoch milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub description: String,
    pub category: Category,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manufacturing_location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub materials: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supply_chain_info: Option<String>,
    pub created_at: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_categories() {
        assert_eq!(Category::parse("electronics"), Category::Electronics);
        assert_eq!(Category::parse("transportation"), Category::Transportation);
        assert_eq!(Category::parse("other"), Category::Other);
    }

    #[test]
    fn test_parse_unknown_falls_back_to_other() {
        assert_eq!(Category::parse("spacecraft"), Category::Other);
        assert_eq!(Category::parse(""), Category::Other);
        assert_eq!(Category::parse("Electronics"), Category::Other);
    }

    #[test]
    fn test_score_serializes_camel_case() {
        let score = EnvironmentalScore {
            overall: 50,
            carbon_footprint: 40,
            water_usage: 30,
            energy_consumption: 20,
            recyclability: 10,
            sustainability: 60,
        };
        let json = serde_json::to_value(&score).unwrap();
        assert_eq!(json["carbonFootprint"], 40);
        assert_eq!(json["waterUsage"], 30);
        assert_eq!(json["energyConsumption"], 20);
    }
}
