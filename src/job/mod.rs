pub mod feedback;
pub mod record;
pub mod store;

pub use feedback::{GeneratedCv, LinkedInFeedback, ResumeFeedback};
pub use record::{
    AnalysisType, Attachment, JobRecord, JobStatus, LinkedInJob, ResumeJob, WriteEvent,
    ready_to_process,
};
pub use store::DocumentStore;
