//! LinkedIn profile analysis handler (`linkedin-analysis/{id}` trigger).
//!
//! Debits a flat price, sends a trimmed profile payload to the model and
//! writes the section-by-section feedback back to the job document. The
//! payload is capped before prompting so oversized scraped profiles do
//! not blow the token budget.

use std::time::Duration;

use serde_json::json;
use tracing::{info, warn};

use crate::gemini::{GenerateContent, invoke};
use crate::job::feedback::LinkedInFeedback;
use crate::job::record::{JobStatus, LinkedInJob, WriteEvent, ready_to_process};
use crate::job::store::DocumentStore;
use crate::ledger::{CreditLedger, DebitOptions, EntryKind};
use crate::prompts;

use super::{debit_failure_message, generation_failure_message};

pub const LINKEDIN_ANALYSIS_PRICE: i64 = 3;

const ANALYSIS_DEADLINE: Duration = Duration::from_secs(120);

// Caps applied to scraped profile sections before prompting.
const MAX_EXPERIENCE: usize = 5;
const MAX_EDUCATION: usize = 3;
const MAX_SKILLS: usize = 20;
const MAX_COURSES: usize = 5;
const MAX_RECOMMENDATIONS: usize = 5;

pub struct LinkedInProcessor<'a, C> {
    ledger: &'a CreditLedger,
    client: &'a C,
    store: &'a DocumentStore<LinkedInJob>,
}

impl<'a, C: GenerateContent + Sync> LinkedInProcessor<'a, C> {
    pub fn new(
        ledger: &'a CreditLedger,
        client: &'a C,
        store: &'a DocumentStore<LinkedInJob>,
    ) -> Self {
        Self {
            ledger,
            client,
            store,
        }
    }

    /// Process one write event; every failure becomes a terminal `failed`
    /// write, nothing propagates to the trigger layer.
    pub async fn handle(&self, event: &WriteEvent<LinkedInJob>) {
        if ready_to_process(event).is_none() {
            return;
        }
        let Some(job) = self.store.get(&event.id) else {
            warn!(job = %event.id, "event for unknown document");
            return;
        };
        if job.status != JobStatus::Running || job.feedbacks.is_some() {
            return;
        }

        info!(job = %event.id, user = %job.user_id, "processing linkedin analysis");

        if let Err(e) = self.ledger.debit(
            &job.user_id,
            LINKEDIN_ANALYSIS_PRICE,
            DebitOptions {
                kind: EntryKind::Debit,
                description: "Análise de perfil LinkedIn".to_string(),
            },
        ) {
            warn!(job = %event.id, error = %e, "debit failed, aborting before generation");
            self.fail(&event.id, debit_failure_message(&e));
            return;
        }

        let language = job
            .language
            .clone()
            .unwrap_or_else(|| prompts::DEFAULT_LANGUAGE.to_string());
        let profile = limited_profile(&job);
        let prompt = prompts::linkedin_analysis(&language, &profile.to_string());

        match invoke::<LinkedInFeedback>(self.client, &prompt, None, ANALYSIS_DEADLINE).await {
            Ok(feedbacks) => {
                self.store.update(&event.id, |job| job.complete(feedbacks));
                info!(job = %event.id, "linkedin analysis completed");
            }
            Err(e) => {
                self.fail(&event.id, generation_failure_message(&event.id, &e));
            }
        }
    }

    fn fail(&self, id: &str, message: &str) {
        if !self.store.update(id, |job| job.fail(message)) {
            warn!(job = %id, "failed to write terminal status: unknown document");
        }
    }
}

/// Trim the scraped profile to the fields and sizes the prompt needs.
fn limited_profile(job: &LinkedInJob) -> serde_json::Value {
    let has_profile_picture = job.profile_url.is_some()
        || job.photo_url.is_some()
        || job.profile_picture.is_some()
        || job.profile_picture_url.is_some();

    json!({
        "name": job.name.clone().unwrap_or_default(),
        "headline": job.headline.clone().unwrap_or_default(),
        "about": job.about.clone().unwrap_or_default(),
        "experience": job.experience.iter().take(MAX_EXPERIENCE).collect::<Vec<_>>(),
        "education": job.education.iter().take(MAX_EDUCATION).collect::<Vec<_>>(),
        "skills": job.skills.iter().take(MAX_SKILLS).collect::<Vec<_>>(),
        "languages": &job.languages,
        "certifications": job.courses.iter().take(MAX_COURSES).collect::<Vec<_>>(),
        "hasProfilePicture": has_profile_picture,
        "profilePictureUrl": &job.profile_picture_url,
        "recommendationsReceived": job.recommendations_received.iter().take(MAX_RECOMMENDATIONS).collect::<Vec<_>>(),
        "recommendationsGiven": job.recommendations_given.iter().take(MAX_RECOMMENDATIONS).collect::<Vec<_>>(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gemini::GeminiError;
    use crate::gemini::types::{
        Candidate, Content, GenerateContentRequest, GenerateContentResponse, Part,
    };
    use crate::job::record::ExperienceEntry;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const FEEDBACK_JSON: &str = r#"{"overallScore":64,"items":[],"missingSections":[],
        "generalRecommendations":[],"quickWins":[],"strategicChanges":[]}"#;

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

    fn setup(balance: i64, job: LinkedInJob) -> (CreditLedger, DocumentStore<LinkedInJob>) {
        let ledger = CreditLedger::new();
        ledger.open_account(&job.user_id, balance);
        let store = DocumentStore::new();
        store.insert("li-1", job);
        (ledger, store)
    }

    fn event_for(store: &DocumentStore<LinkedInJob>) -> WriteEvent<LinkedInJob> {
        WriteEvent {
            id: "li-1".into(),
            before: None,
            after: store.get("li-1"),
        }
    }

    #[tokio::test]
    async fn happy_path_debits_three_credits() {
        let job = LinkedInJob::new("u1");
        let (ledger, store) = setup(10, job);
        let model = FixedModel::answering(FEEDBACK_JSON);

        LinkedInProcessor::new(&ledger, &model, &store)
            .handle(&event_for(&store))
            .await;

        let job = store.get("li-1").unwrap();
        assert_eq!(job.status, JobStatus::Ready);
        assert_eq!(job.feedbacks.as_ref().unwrap().overall_score, 64);
        assert_eq!(
            ledger.balance("u1").unwrap(),
            10 - LINKEDIN_ANALYSIS_PRICE
        );
    }

    #[tokio::test]
    async fn insufficient_balance_skips_generation() {
        let job = LinkedInJob::new("u1");
        let (ledger, store) = setup(2, job);
        let model = FixedModel::answering(FEEDBACK_JSON);

        LinkedInProcessor::new(&ledger, &model, &store)
            .handle(&event_for(&store))
            .await;

        let job = store.get("li-1").unwrap();
        assert_eq!(job.status, JobStatus::Failed);
        assert_eq!(job.error.as_deref(), Some("Crédito insuficiente"));
        assert_eq!(model.calls.load(Ordering::SeqCst), 0);
        assert_eq!(ledger.balance("u1").unwrap(), 2);
    }

    #[tokio::test]
    async fn prose_wrapped_response_still_parses() {
        let job = LinkedInJob::new("u1");
        let (ledger, store) = setup(10, job);
        let model = FixedModel::answering(
            "Aqui está a análise:\n{\"overallScore\":70,\"items\":[],\"missingSections\":[],\
             \"generalRecommendations\":[],\"quickWins\":[],\"strategicChanges\":[]}\nObrigado!",
        );

        LinkedInProcessor::new(&ledger, &model, &store)
            .handle(&event_for(&store))
            .await;

        let job = store.get("li-1").unwrap();
        assert_eq!(job.status, JobStatus::Ready);
        assert_eq!(job.feedbacks.unwrap().overall_score, 70);
    }

    #[tokio::test]
    async fn duplicate_delivery_is_noop() {
        let job = LinkedInJob::new("u1");
        let (ledger, store) = setup(10, job);
        let model = FixedModel::answering(FEEDBACK_JSON);
        let processor = LinkedInProcessor::new(&ledger, &model, &store);

        let stale = event_for(&store);
        processor.handle(&stale).await;
        processor.handle(&stale).await;

        assert_eq!(ledger.history("u1").unwrap().len(), 1);
        assert_eq!(model.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn limited_profile_caps_sections() {
        let mut job = LinkedInJob::new("u1");
        job.experience = (0..9)
            .map(|i| ExperienceEntry {
                company: format!("Empresa {i}"),
                ..Default::default()
            })
            .collect();
        job.skills = (0..30).map(|i| format!("skill-{i}")).collect();
        job.photo_url = Some("https://example.com/foto.jpg".into());

        let profile = limited_profile(&job);
        assert_eq!(profile["experience"].as_array().unwrap().len(), 5);
        assert_eq!(profile["skills"].as_array().unwrap().len(), 20);
        assert_eq!(profile["hasProfilePicture"], true);
    }

    #[test]
    fn limited_profile_without_picture() {
        let job = LinkedInJob::new("u1");
        let profile = limited_profile(&job);
        assert_eq!(profile["hasProfilePicture"], false);
        assert!(profile["profilePictureUrl"].is_null());
    }
}
