//! Deadline-bounded generation calls with JSON-shape coercion.
//!
//! [`invoke`] is the single path every handler uses to talk to the model:
//! it races the call against a fixed deadline, interprets the textual
//! response as a JSON value of the expected shape, and classifies every
//! failure as [`Timeout`](GenerationError::Timeout),
//! [`InvalidResponse`](GenerationError::InvalidResponse) or
//! [`Upstream`](GenerationError::Upstream). There is no retry at this
//! layer — a failed invocation is terminal for that attempt.

use std::time::Duration;

use serde::de::DeserializeOwned;
use thiserror::Error;
use tokio::time::timeout;

use super::client::GenerateContent;
use super::error::GeminiError;
use super::types::{GenerateContentRequest, InlineData};

/// Failure of a single generation invocation.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The deadline expired before the model answered. The in-flight call
    /// is abandoned, not cancelled.
    #[error("generation timed out after {deadline:?}")]
    Timeout { deadline: Duration },

    /// The response text could not be interpreted as JSON of the expected
    /// shape. `raw` is kept for logging and must never reach the end user.
    #[error("invalid model response")]
    InvalidResponse { raw: String },

    /// The generation collaborator itself failed (HTTP error, network).
    #[error("upstream error: {0}")]
    Upstream(#[from] GeminiError),
}

/// Send `prompt` (plus an optional inline attachment) to the model and
/// parse the answer as `T`, racing the whole call against `deadline`.
pub async fn invoke<T: DeserializeOwned>(
    client: &impl GenerateContent,
    prompt: &str,
    attachment: Option<InlineData>,
    deadline: Duration,
) -> Result<T, GenerationError> {
    let req = GenerateContentRequest::user_prompt(prompt, attachment);

    let response = match timeout(deadline, client.generate_content(&req)).await {
        Ok(result) => result?,
        Err(_) => return Err(GenerationError::Timeout { deadline }),
    };

    let text = response.text();
    coerce_json(&text)
}

/// Interpret the raw response text as a JSON value of type `T`.
///
/// Primary strategy: parse the whole string. Fallback: parse the substring
/// between the first `{` and the last `}`, tolerating leading/trailing
/// prose the model may emit despite instructions.
pub fn coerce_json<T: DeserializeOwned>(text: &str) -> Result<T, GenerationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(GenerationError::InvalidResponse {
            raw: text.to_string(),
        });
    }

    if let Ok(value) = serde_json::from_str::<T>(trimmed) {
        return Ok(value);
    }

    if let (Some(start), Some(end)) = (trimmed.find('{'), trimmed.rfind('}'))
        && start < end
        && let Ok(value) = serde_json::from_str::<T>(&trimmed[start..=end])
    {
        return Ok(value);
    }

    Err(GenerationError::InvalidResponse {
        raw: text.to_string(),
    })
}
