pub mod client;
pub mod error;
pub mod invoke;
pub mod types;

pub use client::{GeminiClient, GenerateContent};
pub use error::GeminiError;
pub use invoke::{GenerationError, coerce_json, invoke};
pub use types::{GenerateContentRequest, GenerateContentResponse, GenerationConfig, InlineData};
