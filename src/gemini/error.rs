//! Erros do cliente da API Gemini.
//!
//! [`GeminiError`] distingue rate limiting, respostas HTTP de erro e
//! falhas de rede, com `Display` derivado via `thiserror`.

use thiserror::Error;

/// Falha ao chamar a API Gemini.
#[derive(Debug, Error)]
pub enum GeminiError {
    /// HTTP 429. `retry_after_ms` vem do cabeçalho `retry-after` quando
    /// presente.
    #[error("rate limited, retry after {retry_after_ms}ms")]
    RateLimited { retry_after_ms: u64 },

    /// Qualquer outra resposta não-2xx, com o corpo como mensagem.
    #[error("API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    /// Falha na camada de transporte (DNS, conexão, timeout do socket).
    #[error("network error: {0}")]
    NetworkError(#[from] reqwest::Error),
}
