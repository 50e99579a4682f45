//! Command handlers
//!
//! Application service that orchestrates the submission use cases.

use std::sync::Arc;
use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::application::dto::*;
use crate::application::queries::run_query;
use crate::domain::aggregates::Submission;
use crate::domain::services::{Clock, StatisticsService, SubmissionStats, SystemClock};
use crate::domain::value_objects::{Email, EntityId};
use crate::error::{Result, SubmissionError};
use crate::ports::inbound::SubmissionUseCases;
use crate::ports::outbound::SubmissionRepository;

/// Submission application service
pub struct SubmissionService {
    repo: Arc<dyn SubmissionRepository>,
    clock: Arc<dyn Clock>,
}

impl SubmissionService {
    pub fn new(repo: Arc<dyn SubmissionRepository>) -> Self {
        Self::with_clock(repo, Arc::new(SystemClock))
    }

    pub fn with_clock(repo: Arc<dyn SubmissionRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }
}

#[async_trait]
impl SubmissionUseCases for SubmissionService {
    async fn create_submission(&self, command: CreateSubmissionCommand) -> Result<EntityId> {
        let now = self.clock.now();
        let submission = match command.into_parts() {
            (Some(id), draft) => Submission::create_with_id(id, draft, now)?,
            (None, draft) => Submission::create(draft, now)?,
        };
        let id = submission.id().clone();
        let email = submission.email().clone();

        if let Err(e) = self.repo.insert(submission).await {
            warn!(submission_id = %id, %email, error = %e, "submission rejected");
            return Err(e);
        }

        info!(submission_id = %id, %email, "submission created");
        Ok(id)
    }

    async fn update_submission(&self, command: UpdateSubmissionCommand) -> Result<Submission> {
        let (id, draft) = command.into_parts();

        let mut submission = self
            .repo
            .find_by_id(&id)
            .await?
            .ok_or(SubmissionError::NotFound)?;

        submission.apply_update(draft, self.clock.now())?;

        if let Err(e) = self.repo.replace(submission.clone()).await {
            warn!(submission_id = %id, error = %e, "update rejected");
            return Err(e);
        }

        info!(submission_id = %id, "submission updated");
        Ok(submission)
    }

    async fn get_submission(&self, id: &EntityId) -> Result<Option<Submission>> {
        self.repo.find_by_id(id).await
    }

    async fn email_exists(&self, email: &str, exclude_id: Option<&EntityId>) -> Result<bool> {
        // a malformed address can never be stored
        let Ok(email) = Email::new(email) else {
            return Ok(false);
        };
        self.repo.email_exists(&email, exclude_id).await
    }

    async fn query_submissions(&self, query: SubmissionQuery) -> Result<Page<Submission>> {
        let snapshot = self.repo.list().await?;
        debug!(?query, records = snapshot.len(), "querying submissions");
        run_query(snapshot, query)
    }

    async fn submission_stats(&self) -> Result<SubmissionStats> {
        let snapshot = self.repo.list().await?;
        debug!(records = snapshot.len(), "computing submission stats");
        Ok(StatisticsService::compute(&snapshot, self.clock.now()))
    }
}
