//! Resume analysis handler (`analysis/{id}` trigger).
//!
//! Debits the analysis price, sends the attached PDF to the model and
//! writes the structured feedback back to the job document. When the job
//! asks for it, a secondary pass generates a rewritten CV from the
//! analysis — billed separately, and its failure never reverts the
//! primary `ready` status.

use std::time::Duration;

use tracing::{info, warn};

use crate::gemini::{GenerateContent, InlineData, invoke};
use crate::job::feedback::{GeneratedCv, ResumeFeedback};
use crate::job::record::{AnalysisType, JobStatus, ResumeJob, WriteEvent, ready_to_process};
use crate::job::store::DocumentStore;
use crate::ledger::{CreditLedger, DebitOptions, EntryKind};
use crate::prompts;

use super::{debit_failure_message, generation_failure_message};

pub const RESUME_ANALYSIS_PRICE: i64 = 1;
pub const RESUME_ADEQUATION_PRICE: i64 = 2;
pub const CV_GENERATION_PRICE: i64 = 2;

const ANALYSIS_DEADLINE: Duration = Duration::from_secs(40);
const CV_DEADLINE: Duration = Duration::from_secs(60);

/// Handler with explicitly injected collaborators — no hidden globals.
pub struct ResumeProcessor<'a, C> {
    ledger: &'a CreditLedger,
    client: &'a C,
    store: &'a DocumentStore<ResumeJob>,
}

impl<'a, C: GenerateContent + Sync> ResumeProcessor<'a, C> {
    pub fn new(
        ledger: &'a CreditLedger,
        client: &'a C,
        store: &'a DocumentStore<ResumeJob>,
    ) -> Self {
        Self {
            ledger,
            client,
            store,
        }
    }

    /// Process one write event. Never returns an error to the trigger
    /// layer: every failure becomes a terminal `failed` write.
    pub async fn handle(&self, event: &WriteEvent<ResumeJob>) {
        if ready_to_process(event).is_none() {
            return;
        }
        // Delivery is at-least-once and may replay a stale snapshot;
        // re-check against the live document before doing paid work.
        let Some(job) = self.store.get(&event.id) else {
            warn!(job = %event.id, "event for unknown document");
            return;
        };
        if job.status != JobStatus::Running || job.feedbacks.is_some() {
            return;
        }

        info!(job = %event.id, user = %job.user_id, "processing resume analysis");

        let price = match job.analysis_type {
            AnalysisType::Adequation => RESUME_ADEQUATION_PRICE,
            AnalysisType::General => RESUME_ANALYSIS_PRICE,
        };
        if let Err(e) = self.ledger.debit(
            &job.user_id,
            price,
            DebitOptions {
                kind: EntryKind::Debit,
                description: "Análise de currículo".to_string(),
            },
        ) {
            warn!(job = %event.id, error = %e, "debit failed, aborting before generation");
            self.fail(&event.id, debit_failure_message(&e));
            return;
        }

        // From here on the debit is committed; failures are not refunded.
        let Some(pdf) = job.pdf.clone() else {
            self.fail(&event.id, "PDF não encontrado");
            return;
        };
        let attachment = InlineData {
            mime_type: pdf.mime_type,
            data: pdf.base64,
        };
        let language = job
            .site_language
            .clone()
            .unwrap_or_else(|| prompts::DEFAULT_LANGUAGE.to_string());

        let prompt = match job.analysis_type {
            AnalysisType::Adequation => prompts::resume_adequation(
                &language,
                job.position.as_deref().unwrap_or_default(),
                job.job_description.as_deref().unwrap_or_default(),
            ),
            AnalysisType::General => prompts::resume_general(&language),
        };

        let feedbacks = match invoke::<ResumeFeedback>(
            self.client,
            &prompt,
            Some(attachment.clone()),
            ANALYSIS_DEADLINE,
        )
        .await
        {
            Ok(feedbacks) => feedbacks,
            Err(e) => {
                self.fail(&event.id, generation_failure_message(&event.id, &e));
                return;
            }
        };

        {
            let feedbacks = feedbacks.clone();
            self.store.update(&event.id, |job| job.complete(feedbacks));
        }
        info!(job = %event.id, "resume analysis completed");

        if job.generate_new_cv {
            self.cv_pass(&event.id, &job.user_id, &feedbacks, attachment, &language)
                .await;
        }
    }

    /// Secondary pass: bill, then generate a rewritten CV from the
    /// analysis. A failed debit blocks the generation call; any failure
    /// lands in `cv_error` and the primary `ready` status stands.
    async fn cv_pass(
        &self,
        id: &str,
        user_id: &str,
        feedbacks: &ResumeFeedback,
        attachment: InlineData,
        language: &str,
    ) {
        if let Err(e) = self.ledger.debit(
            user_id,
            CV_GENERATION_PRICE,
            DebitOptions {
                kind: EntryKind::Debit,
                description: "Geração de novo currículo".to_string(),
            },
        ) {
            warn!(job = %id, error = %e, "cv surcharge debit failed, skipping generation");
            let message = debit_failure_message(&e);
            self.store.update(id, |job| {
                job.cv_error = Some(message.to_string());
                job.updated_at = Some(chrono::Utc::now());
            });
            return;
        }

        let prompt = prompts::cv_from_analysis(language, feedbacks);
        match invoke::<GeneratedCv>(self.client, &prompt, Some(attachment), CV_DEADLINE).await {
            Ok(cv) => {
                self.store.update(id, |job| {
                    let now = chrono::Utc::now();
                    job.cv = Some(cv);
                    job.cv_generated_at = Some(now);
                    job.updated_at = Some(now);
                });
                info!(job = %id, "cv generated");
            }
            Err(e) => {
                let message = generation_failure_message(id, &e);
                self.store.update(id, |job| {
                    job.cv_error = Some(message.to_string());
                    job.updated_at = Some(chrono::Utc::now());
                });
            }
        }
    }

    fn fail(&self, id: &str, message: &str) {
        if !self.store.update(id, |job| job.fail(message)) {
            warn!(job = %id, "failed to write terminal status: unknown document");
        }
    }
}
