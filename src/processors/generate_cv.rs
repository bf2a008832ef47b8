//! Callable CV generation operations.
//!
//! Unlike the trigger handlers these are synchronous request/response:
//! a client-facing layer invokes them directly and always receives a
//! tagged [`CallResult`] — `{ ok: true, data }` or `{ ok: false, error }`
//! — never a raised error. Each successful call performs exactly one
//! debit followed by one generation call.

use std::time::Duration;

use serde::Serialize;
use tracing::{info, warn};

use crate::gemini::{GenerateContent, invoke};
use crate::job::feedback::GeneratedCv;
use crate::ledger::{CreditLedger, DebitOptions, EntryKind};
use crate::prompts;

use super::{debit_failure_message, generation_failure_message};

pub const CV_FROM_DESCRIPTION_PRICE: i64 = 2;
pub const CV_FOR_JOB_PRICE: i64 = 3;

const GENERATION_DEADLINE: Duration = Duration::from_secs(60);

/// Tagged response envelope returned to the client-facing layer.
#[derive(Debug, Clone, Serialize)]
pub struct CallResult<T> {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> CallResult<T> {
    pub fn ok(data: T) -> Self {
        Self {
            ok: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(message: &str) -> Self {
        Self {
            ok: false,
            data: None,
            error: Some(message.to_string()),
        }
    }
}

pub struct CvGenerator<'a, C> {
    ledger: &'a CreditLedger,
    client: &'a C,
}

impl<'a, C: GenerateContent + Sync> CvGenerator<'a, C> {
    pub fn new(ledger: &'a CreditLedger, client: &'a C) -> Self {
        Self { ledger, client }
    }

    /// Generate a CV from a free-text professional description.
    pub async fn from_description(
        &self,
        user_id: &str,
        professional_description: &str,
        language: Option<&str>,
    ) -> CallResult<GeneratedCv> {
        if user_id.is_empty() {
            return CallResult::err("userId obrigatório");
        }
        if professional_description.is_empty() {
            return CallResult::err("professionalDescription obrigatório");
        }

        let language = language.unwrap_or(prompts::DEFAULT_LANGUAGE);
        let prompt = prompts::cv_from_description(language, professional_description);
        let result = self
            .run(user_id, CV_FROM_DESCRIPTION_PRICE, &prompt, "cv-description")
            .await;
        if result.ok {
            info!(user = %user_id, "cv generated (description)");
        }
        result
    }

    /// Rewrite the caller's current profile into a CV optimized for a
    /// specific job posting.
    pub async fn for_job(
        &self,
        user_id: &str,
        current_profile: &str,
        job_description: &str,
        position: &str,
        language: Option<&str>,
    ) -> CallResult<GeneratedCv> {
        if user_id.is_empty() {
            return CallResult::err("userId obrigatório");
        }
        if current_profile.is_empty() {
            return CallResult::err("currentProfile obrigatório");
        }
        if job_description.is_empty() {
            return CallResult::err("jobDescription obrigatório");
        }
        if position.is_empty() {
            return CallResult::err("position obrigatório");
        }

        let language = language.unwrap_or(prompts::DEFAULT_LANGUAGE);
        let prompt = prompts::cv_for_job(language, current_profile, job_description, position);
        let result = self.run(user_id, CV_FOR_JOB_PRICE, &prompt, "cv-job").await;
        if result.ok {
            info!(user = %user_id, position = %position, "cv generated (job)");
        }
        result
    }

    /// Shared debit-then-generate sequence. The debit commits before the
    /// generation call and is not refunded if generation fails.
    async fn run(
        &self,
        user_id: &str,
        price: i64,
        prompt: &str,
        operation: &str,
    ) -> CallResult<GeneratedCv> {
        if let Err(e) = self.ledger.debit(
            user_id,
            price,
            DebitOptions {
                kind: EntryKind::Debit,
                description: "Geração de currículo".to_string(),
            },
        ) {
            warn!(user = %user_id, error = %e, "debit failed, aborting generation");
            return CallResult::err(debit_failure_message(&e));
        }

        match invoke::<GeneratedCv>(self.client, prompt, None, GENERATION_DEADLINE).await {
            Ok(cv) => CallResult::ok(cv),
            Err(e) => CallResult::err(generation_failure_message(operation, &e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gemini::GeminiError;
    use crate::gemini::types::{
        Candidate, Content, GenerateContentRequest, GenerateContentResponse, Part,
    };
    use std::sync::atomic::{AtomicUsize, Ordering};

    const CV_JSON: &str = r#"{"professionalSummary":"Engenheira de software"}"#;

    struct FixedModel {
        text: &'static str,
        calls: AtomicUsize,
    }

    impl FixedModel {
        fn answering(text: &'static str) -> Self {
            Self {
                text,
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl GenerateContent for FixedModel {
        async fn generate_content(
            &self,
            _req: &GenerateContentRequest,
        ) -> Result<GenerateContentResponse, GeminiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(GenerateContentResponse {
                candidates: vec![Candidate {
                    content: Content {
                        role: "model".into(),
                        parts: vec![Part::Text(self.text.to_string())],
                    },
                    finish_reason: Some("STOP".into()),
                }],
                usage_metadata: None,
            })
        }
    }

    fn ledger_with(balance: i64) -> CreditLedger {
        let ledger = CreditLedger::new();
        ledger.open_account("u1", balance);
        ledger
    }

    #[tokio::test]
    async fn from_description_happy_path() {
        let ledger = ledger_with(10);
        let model = FixedModel::answering(CV_JSON);

        let result = CvGenerator::new(&ledger, &model)
            .from_description("u1", "Dev backend com 5 anos de experiência", None)
            .await;

        assert!(result.ok);
        assert_eq!(
            result.data.unwrap().professional_summary,
            "Engenheira de software"
        );
        assert_eq!(
            ledger.balance("u1").unwrap(),
            10 - CV_FROM_DESCRIPTION_PRICE
        );
    }

    #[tokio::test]
    async fn for_job_costs_three() {
        let ledger = ledger_with(10);
        let model = FixedModel::answering(CV_JSON);

        let result = CvGenerator::new(&ledger, &model)
            .for_job("u1", "perfil atual", "vaga de dados", "Engenheira de Dados", None)
            .await;

        assert!(result.ok);
        assert_eq!(ledger.balance("u1").unwrap(), 10 - CV_FOR_JOB_PRICE);
    }

    #[tokio::test]
    async fn missing_fields_rejected_without_debit() {
        let ledger = ledger_with(10);
        let model = FixedModel::answering(CV_JSON);
        let generator = CvGenerator::new(&ledger, &model);

        let result = generator.from_description("", "descrição", None).await;
        assert!(!result.ok);
        assert_eq!(result.error.as_deref(), Some("userId obrigatório"));

        let result = generator.from_description("u1", "", None).await;
        assert!(!result.ok);

        let result = generator.for_job("u1", "", "vaga", "cargo", None).await;
        assert!(!result.ok);
        assert_eq!(result.error.as_deref(), Some("currentProfile obrigatório"));

        assert_eq!(ledger.balance("u1").unwrap(), 10);
        assert_eq!(model.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn insufficient_balance_returns_tagged_error() {
        let ledger = ledger_with(1);
        let model = FixedModel::answering(CV_JSON);

        let result = CvGenerator::new(&ledger, &model)
            .from_description("u1", "descrição", None)
            .await;

        assert!(!result.ok);
        assert_eq!(result.error.as_deref(), Some("Crédito insuficiente"));
        assert_eq!(model.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn generation_failure_keeps_debit() {
        let ledger = ledger_with(10);
        let model = FixedModel::answering("sem estrutura nenhuma");

        let result = CvGenerator::new(&ledger, &model)
            .from_description("u1", "descrição", None)
            .await;

        assert!(!result.ok);
        assert_eq!(result.error.as_deref(), Some("Resposta inválida do modelo"));
        // No refund on downstream failure.
        assert_eq!(
            ledger.balance("u1").unwrap(),
            10 - CV_FROM_DESCRIPTION_PRICE
        );
    }

    #[test]
    fn call_result_serialization() {
        let ok: CallResult<u32> = CallResult::ok(7);
        let json = serde_json::to_string(&ok).unwrap();
        assert_eq!(json, r#"{"ok":true,"data":7}"#);

        let err: CallResult<u32> = CallResult::err("Crédito insuficiente");
        let json = serde_json::to_string(&err).unwrap();
        assert_eq!(json, r#"{"ok":false,"error":"Crédito insuficiente"}"#);
    }
}
