//! Aggregates module

pub mod submission;

pub use submission::{Submission, SubmissionDraft, MAX_AGE};
