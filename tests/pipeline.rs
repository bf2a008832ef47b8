//! End-to-end pipeline tests: trigger event → debit → HTTP generation
//! call (via a mock server) → terminal document write.

use serde_json::json;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

use cvlab::gemini::GeminiClient;
use cvlab::job::record::{Attachment, JobStatus, ResumeJob, WriteEvent};
use cvlab::job::store::DocumentStore;
use cvlab::ledger::CreditLedger;
use cvlab::processors::{CvGenerator, ResumeProcessor};
use cvlab::processors::resume::RESUME_ANALYSIS_PRICE;

fn feedback_body() -> serde_json::Value {
    let feedback_json = json!({
        "summary": "Currículo claro.",
        "totalScore": 81,
        "scores": {"structure": 85, "experience": 78, "skills": 80, "format": 80, "impact": 70},
        "strengths": ["Boa estrutura"],
        "improvements": ["Quantificar resultados"],
        "resources": [{"title": "Guia", "url": "https://example.com"}]
    })
    .to_string();
    json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": feedback_json}]},
            "finishReason": "STOP"
        }]
    })
}

fn running_job(user_id: &str) -> ResumeJob {
    ResumeJob::new(
        user_id,
        Attachment {
            base64: "JVBERi0xLjQ=".into(),
            mime_type: "application/pdf".into(),
        },
    )
}

#[tokio::test]
async fn resume_pipeline_end_to_end() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(feedback_body()))
        .expect(1)
        .mount(&server)
        .await;

    let ledger = CreditLedger::new();
    ledger.open_account("u1", 5);
    let store = DocumentStore::new();
    let job = running_job("u1");
    store.insert("job-1", job.clone());

    let client = GeminiClient::with_base_url("test-key".into(), server.uri());
    ResumeProcessor::new(&ledger, &client, &store)
        .handle(&WriteEvent {
            id: "job-1".into(),
            before: None,
            after: Some(job),
        })
        .await;

    let job = store.get("job-1").unwrap();
    assert_eq!(job.status, JobStatus::Ready);
    assert_eq!(job.feedbacks.as_ref().unwrap().total_score, 81);
    assert!(job.completed_at.is_some());
    assert_eq!(ledger.balance("u1").unwrap(), 5 - RESUME_ANALYSIS_PRICE);
}

#[tokio::test]
async fn upstream_failure_marks_job_failed_and_keeps_debit() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .mount(&server)
        .await;

    let ledger = CreditLedger::new();
    ledger.open_account("u1", 5);
    let store = DocumentStore::new();
    let job = running_job("u1");
    store.insert("job-1", job.clone());

    let client = GeminiClient::with_base_url("test-key".into(), server.uri());
    ResumeProcessor::new(&ledger, &client, &store)
        .handle(&WriteEvent {
            id: "job-1".into(),
            before: None,
            after: Some(job),
        })
        .await;

    let job = store.get("job-1").unwrap();
    assert_eq!(job.status, JobStatus::Failed);
    assert_eq!(job.error.as_deref(), Some("Serviço de geração indisponível"));
    // The analysis was billed before the generation attempt.
    assert_eq!(ledger.balance("u1").unwrap(), 4);
}

#[tokio::test]
async fn callable_cv_generation_end_to_end() {
    let cv_json = json!({
        "personalInfo": {"name": "Ana", "email": "ana@example.com"},
        "professionalSummary": "Backend em Rust.",
        "skills": {"technical": ["Rust"], "soft": []}
    })
    .to_string();
    let body = json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": cv_json}]},
            "finishReason": "STOP"
        }]
    });

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(&server)
        .await;

    let ledger = CreditLedger::new();
    ledger.open_account("u1", 5);
    let client = GeminiClient::with_base_url("test-key".into(), server.uri());

    let result = CvGenerator::new(&ledger, &client)
        .from_description("u1", "Dev backend com 5 anos de Rust", Some("pt-BR"))
        .await;

    assert!(result.ok);
    let cv = result.data.unwrap();
    assert_eq!(cv.personal_info.name, "Ana");
    assert_eq!(ledger.balance("u1").unwrap(), 3);
}
