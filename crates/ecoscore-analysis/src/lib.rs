//! EcoScore Analysis — environmental impact scoring.
//!
//! Scores come from an external LLM when a provider is configured, and from
//! a deterministic category/material heuristic otherwise. Any model failure
//! degrades to the heuristic; callers always get a complete result.

pub mod analyzer;
pub mod config;
pub mod heuristic;
pub mod impact;
pub mod prompt;
pub mod providers;
pub mod types;

pub use analyzer::ImpactAnalyzer;
pub use config::LlmConfig;
pub use providers::{LlmClient, LlmProvider, TextGenerator};
pub use types::AnalysisResult;
