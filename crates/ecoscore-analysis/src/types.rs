//! Analysis result types and the model reply wire contract.

use ecoscore_core::EnvironmentalScore;
use serde::{Deserialize, Serialize};

/// Completed analysis for a product, from the model or the fallback.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub score: EnvironmentalScore,
    pub insights: Vec<String>,
    pub recommendations: Vec<String>,
    /// Verbatim model reply, or a JSON diagnostic marking the fallback path.
    pub raw_analysis: String,
}

/// Shape the model is asked to reply with. Key names match the structure
/// embedded in the prompt; anything missing is a parse failure.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ModelReply {
    pub scores: EnvironmentalScore,
    pub insights: Vec<String>,
    pub recommendations: Vec<String>,
}
