//! EcoScore Core — shared domain model, configuration, and error types.

pub mod config;
pub mod error;
pub mod types;

pub use config::{DataPaths, EcoScoreConfig};
pub use error::{Error, Result};
pub use types::{Category, EnvironmentalScore, Product};
