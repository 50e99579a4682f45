//! Inbound ports (Use case traits)
//!
//! Hexagonal architecture: application service interfaces.

use async_trait::async_trait;

use crate::application::dto::{
    CreateSubmissionCommand, Page, SubmissionQuery, UpdateSubmissionCommand,
};
use crate::domain::aggregates::Submission;
use crate::domain::services::SubmissionStats;
use crate::domain::value_objects::EntityId;
use crate::error::Result;

/// Submission use cases consumed by the UI layer
#[async_trait]
pub trait SubmissionUseCases: Send + Sync {
    /// Validate and store a new submission, returning its id
    async fn create_submission(&self, command: CreateSubmissionCommand) -> Result<EntityId>;

    /// Replace the content of an existing submission
    async fn update_submission(&self, command: UpdateSubmissionCommand) -> Result<Submission>;

    /// Get submission by ID
    async fn get_submission(&self, id: &EntityId) -> Result<Option<Submission>>;

    /// Email uniqueness check for form validation
    async fn email_exists(&self, email: &str, exclude_id: Option<&EntityId>) -> Result<bool>;

    /// One filtered, sorted page of submissions
    async fn query_submissions(&self, query: SubmissionQuery) -> Result<Page<Submission>>;

    /// Aggregates over the whole store
    async fn submission_stats(&self) -> Result<SubmissionStats>;
}
