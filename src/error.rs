use thiserror::Error;

use crate::gemini::{GeminiError, GenerationError};
use crate::ledger::LedgerError;

#[derive(Debug, Error)]
pub enum CvlabError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Job not found: {0}")]
    JobNotFound(String),

    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("Gemini API error: {0}")]
    Gemini(#[from] GeminiError),

    #[error("Generation error: {0}")]
    Generation(#[from] GenerationError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}
