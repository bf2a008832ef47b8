//! CVLAB — event-driven backend core for a CV/LinkedIn analysis product.
//!
//! Handlers react to job-document writes, debit a prepaid credit balance
//! exactly once per billable operation, call the Gemini generation API
//! under a deadline, and write the structured result back to the job.
//!
//! The load-bearing pieces are the atomic debit transaction in
//! [`ledger`], the trigger idempotency guard in [`job`], and the
//! deadline-plus-JSON-coercion wrapper in [`gemini::invoke`]. Everything
//! in [`processors`] is glue that sequences guard → debit → generate →
//! terminal write.

pub mod cli;
pub mod config;
pub mod error;
pub mod gemini;
pub mod job;
pub mod ledger;
pub mod processors;
pub mod prompts;

pub use error::CvlabError;
