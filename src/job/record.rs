//! Job documents and the trigger idempotency guard.
//!
//! A job is created externally with `status = running`; its owning handler
//! moves it to `ready` or `failed` exactly once. Because the trigger
//! delivery is at-least-once and the handler's own writes produce new
//! write events, [`ready_to_process`] is the single gate every handler
//! passes through before doing any paid work.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::feedback::{GeneratedCv, LinkedInFeedback, ResumeFeedback};

/// Lifecycle of a job document: `running` → `ready` | `failed`.
/// Terminal states never transition again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Running,
    Ready,
    Failed,
}

impl JobStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, JobStatus::Ready | JobStatus::Failed)
    }
}

/// Binary attachment with its declared mime type, base64-encoded.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub base64: String,
    pub mime_type: String,
}

/// Which resume analysis was requested.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisType {
    #[default]
    General,
    /// Fit against a specific job posting; costs more and scores fit.
    Adequation,
}

/// A write event delivered by the document database trigger.
/// Handlers read `after` only.
#[derive(Debug, Clone)]
pub struct WriteEvent<T> {
    pub id: String,
    pub before: Option<T>,
    pub after: Option<T>,
}

/// Common surface of the per-job documents, used by the guard.
pub trait JobRecord {
    fn status(&self) -> JobStatus;
    fn has_result(&self) -> bool;
}

/// The idempotency guard: returns the `after` snapshot only when it is the
/// "start processing" signal — status still `running` and no result yet.
/// Duplicate deliveries and the handler's own result writes fall through
/// as no-ops.
pub fn ready_to_process<T: JobRecord>(event: &WriteEvent<T>) -> Option<&T> {
    let after = event.after.as_ref()?;
    if after.status() != JobStatus::Running || after.has_result() {
        return None;
    }
    Some(after)
}

/// Resume analysis job (`analysis/{id}`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeJob {
    pub user_id: String,
    #[serde(default)]
    pub analysis_type: AnalysisType,
    #[serde(default)]
    pub site_language: Option<String>,
    #[serde(default)]
    pub job_description: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub generate_new_cv: bool,
    #[serde(default)]
    pub pdf: Option<Attachment>,

    pub status: JobStatus,
    #[serde(default)]
    pub feedbacks: Option<ResumeFeedback>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub cv: Option<GeneratedCv>,
    /// Failure of the secondary CV pass; never reverts a `ready` status.
    #[serde(default)]
    pub cv_error: Option<String>,

    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub feedback_generated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub cv_generated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ResumeJob {
    pub fn new(user_id: &str, pdf: Attachment) -> Self {
        Self {
            user_id: user_id.to_string(),
            analysis_type: AnalysisType::General,
            site_language: None,
            job_description: None,
            position: None,
            generate_new_cv: false,
            pdf: Some(pdf),
            status: JobStatus::Running,
            feedbacks: None,
            error: None,
            cv: None,
            cv_error: None,
            created_at: Utc::now(),
            feedback_generated_at: None,
            cv_generated_at: None,
            completed_at: None,
            updated_at: None,
        }
    }

    /// Terminal success: write the analysis and move to `ready`.
    pub fn complete(&mut self, feedbacks: ResumeFeedback) {
        let now = Utc::now();
        self.feedbacks = Some(feedbacks);
        self.status = JobStatus::Ready;
        self.feedback_generated_at = Some(now);
        self.completed_at = Some(now);
        self.updated_at = Some(now);
    }

    /// Terminal failure: short stable message only, never raw model output.
    pub fn fail(&mut self, message: &str) {
        self.status = JobStatus::Failed;
        self.error = Some(message.to_string());
        self.updated_at = Some(Utc::now());
    }
}

impl JobRecord for ResumeJob {
    fn status(&self) -> JobStatus {
        self.status
    }

    fn has_result(&self) -> bool {
        self.feedbacks.is_some()
    }
}

/// One experience entry scraped from a LinkedIn profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceEntry {
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub duration: String,
}

/// One education entry scraped from a LinkedIn profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationEntry {
    #[serde(default)]
    pub school: String,
    #[serde(default)]
    pub skills: String,
}

/// LinkedIn profile analysis job (`linkedin-analysis/{id}`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkedInJob {
    pub user_id: String,
    #[serde(default)]
    pub language: Option<String>,

    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub headline: Option<String>,
    #[serde(default)]
    pub about: Option<String>,
    #[serde(default)]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub courses: Vec<String>,
    #[serde(default)]
    pub profile_url: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub profile_picture: Option<String>,
    #[serde(default)]
    pub profile_picture_url: Option<String>,
    #[serde(default)]
    pub recommendations_received: Vec<String>,
    #[serde(default)]
    pub recommendations_given: Vec<String>,

    pub status: JobStatus,
    #[serde(default)]
    pub feedbacks: Option<LinkedInFeedback>,
    #[serde(default)]
    pub error: Option<String>,

    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub feedback_generated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl LinkedInJob {
    pub fn new(user_id: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            language: None,
            name: None,
            headline: None,
            about: None,
            experience: Vec::new(),
            education: Vec::new(),
            skills: Vec::new(),
            languages: Vec::new(),
            courses: Vec::new(),
            profile_url: None,
            photo_url: None,
            profile_picture: None,
            profile_picture_url: None,
            recommendations_received: Vec::new(),
            recommendations_given: Vec::new(),
            status: JobStatus::Running,
            feedbacks: None,
            error: None,
            created_at: Utc::now(),
            feedback_generated_at: None,
            completed_at: None,
            updated_at: None,
        }
    }

    pub fn complete(&mut self, feedbacks: LinkedInFeedback) {
        let now = Utc::now();
        self.feedbacks = Some(feedbacks);
        self.status = JobStatus::Ready;
        self.feedback_generated_at = Some(now);
        self.completed_at = Some(now);
        self.updated_at = Some(now);
    }

    pub fn fail(&mut self, message: &str) {
        self.status = JobStatus::Failed;
        self.error = Some(message.to_string());
        self.updated_at = Some(Utc::now());
    }
}

impl JobRecord for LinkedInJob {
    fn status(&self) -> JobStatus {
        self.status
    }

    fn has_result(&self) -> bool {
        self.feedbacks.is_some()
    }
}
