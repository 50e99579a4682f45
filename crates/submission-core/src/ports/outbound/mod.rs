//! Outbound ports (Repository traits)
//!
//! Hexagonal architecture: these are the interfaces that infrastructure must implement.

use async_trait::async_trait;

use crate::domain::aggregates::Submission;
use crate::domain::value_objects::{Email, EntityId};
use crate::error::Result;

/// Submission repository port.
///
/// Each write checks its invariants and applies the change as one step;
/// implementations must not let another writer in between.
#[async_trait]
pub trait SubmissionRepository: Send + Sync {
    /// Insert at the front of the collection.
    /// Fails with `EmailExists` or `DuplicateId`.
    async fn insert(&self, submission: Submission) -> Result<()>;

    /// Replace the record with the same id.
    /// Fails with `NotFound`, or `EmailExists` when another record uses the email.
    async fn replace(&self, submission: Submission) -> Result<()>;

    /// Find submission by ID
    async fn find_by_id(&self, id: &EntityId) -> Result<Option<Submission>>;

    /// True iff a record other than `exclude_id` uses the email
    async fn email_exists(&self, email: &Email, exclude_id: Option<&EntityId>) -> Result<bool>;

    /// Snapshot of all records, most recent insert first
    async fn list(&self) -> Result<Vec<Submission>>;

    /// Number of stored records
    async fn count(&self) -> Result<usize>;
}
