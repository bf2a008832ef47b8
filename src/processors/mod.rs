//! Trigger handlers and callable operations.
//!
//! Every handler follows the same sequence: idempotency guard → credit
//! debit → generation call → terminal status write. All failures are
//! converted into a terminal `failed` write (or a tagged error result for
//! callables); nothing propagates to the trigger layer, since a raised
//! error would risk redelivery and duplicate billing attempts.

pub mod generate_cv;
pub mod linkedin;
pub mod resume;

pub use generate_cv::{CallResult, CvGenerator};
pub use linkedin::LinkedInProcessor;
pub use resume::ResumeProcessor;

use tracing::error;

use crate::gemini::GenerationError;
use crate::ledger::LedgerError;

/// Short, stable user-facing message for a failed debit.
pub(crate) fn debit_failure_message(err: &LedgerError) -> &'static str {
    match err {
        LedgerError::InvalidArgument(_) => "Parâmetros inválidos para debitar crédito",
        LedgerError::AccountNotFound(_) => "Usuário não encontrado",
        LedgerError::InsufficientBalance { .. } => "Crédito insuficiente",
    }
}

/// Short, stable user-facing message for a failed generation. The raw
/// model output, when present, goes to the log only — never to the job
/// document.
pub(crate) fn generation_failure_message(job_id: &str, err: &GenerationError) -> &'static str {
    match err {
        GenerationError::Timeout { .. } => "Timeout na geração",
        GenerationError::InvalidResponse { raw } => {
            error!(job = %job_id, raw = %raw, "model response was not valid JSON");
            "Resposta inválida do modelo"
        }
        GenerationError::Upstream(e) => {
            error!(job = %job_id, error = %e, "generation collaborator failed");
            "Serviço de geração indisponível"
        }
    }
}
