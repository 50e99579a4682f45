//! In-memory repository implementation
//!
//! Process-local; contents reset on restart.

use std::collections::{HashMap, VecDeque};
use async_trait::async_trait;
use parking_lot::RwLock;

use crate::domain::aggregates::Submission;
use crate::domain::value_objects::{Email, EntityId};
use crate::error::{Result, SubmissionError};
use crate::ports::outbound::SubmissionRepository;

#[derive(Default)]
struct Inner {
    records: HashMap<EntityId, Submission>,
    /// Most recent insert first
    order: VecDeque<EntityId>,
}

impl Inner {
    fn email_taken(&self, email: &Email, exclude_id: Option<&EntityId>) -> bool {
        self.records
            .values()
            .any(|s| s.email() == email && Some(s.id()) != exclude_id)
    }
}

/// In-memory submission repository
#[derive(Default)]
pub struct InMemorySubmissionRepository {
    inner: RwLock<Inner>,
}

impl InMemorySubmissionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from records listed most recent first
    pub fn with_submissions(submissions: Vec<Submission>) -> Result<Self> {
        let repo = Self::new();
        {
            let mut inner = repo.inner.write();
            for submission in submissions.into_iter().rev() {
                Self::insert_locked(&mut inner, submission)?;
            }
        }
        Ok(repo)
    }

    fn insert_locked(inner: &mut Inner, submission: Submission) -> Result<()> {
        if inner.records.contains_key(submission.id()) {
            return Err(SubmissionError::DuplicateId(submission.id().to_string()));
        }
        if inner.email_taken(submission.email(), None) {
            return Err(SubmissionError::EmailExists);
        }
        inner.order.push_front(submission.id().clone());
        inner.records.insert(submission.id().clone(), submission);
        Ok(())
    }
}

#[async_trait]
impl SubmissionRepository for InMemorySubmissionRepository {
    async fn insert(&self, submission: Submission) -> Result<()> {
        let mut inner = self.inner.write();
        Self::insert_locked(&mut inner, submission)
    }

    async fn replace(&self, submission: Submission) -> Result<()> {
        let mut inner = self.inner.write();
        if inner.email_taken(submission.email(), Some(submission.id())) {
            return Err(SubmissionError::EmailExists);
        }
        let slot = inner
            .records
            .get_mut(submission.id())
            .ok_or(SubmissionError::NotFound)?;
        *slot = submission;
        Ok(())
    }

    async fn find_by_id(&self, id: &EntityId) -> Result<Option<Submission>> {
        Ok(self.inner.read().records.get(id).cloned())
    }

    async fn email_exists(&self, email: &Email, exclude_id: Option<&EntityId>) -> Result<bool> {
        Ok(self.inner.read().email_taken(email, exclude_id))
    }

    async fn list(&self) -> Result<Vec<Submission>> {
        let inner = self.inner.read();
        Ok(inner
            .order
            .iter()
            .filter_map(|id| inner.records.get(id))
            .cloned()
            .collect())
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.inner.read().records.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::aggregates::SubmissionDraft;
    use chrono::Utc;

    fn submission(id: &str, email: &str) -> Submission {
        Submission::create_with_id(
            EntityId::from_string(id),
            SubmissionDraft::new(format!("User {id}"), email, 30),
            Utc::now(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let repo = InMemorySubmissionRepository::new();
        repo.insert(submission("1", "a@example.com")).await.unwrap();

        let found = repo.find_by_id(&EntityId::from_string("1")).await.unwrap();
        assert_eq!(found.unwrap().email().as_str(), "a@example.com");
        assert!(repo.find_by_id(&EntityId::from_string("2")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_is_most_recent_first() {
        let repo = InMemorySubmissionRepository::new();
        repo.insert(submission("1", "a@example.com")).await.unwrap();
        repo.insert(submission("2", "b@example.com")).await.unwrap();
        repo.insert(submission("3", "c@example.com")).await.unwrap();

        let ids: Vec<String> = repo.list().await.unwrap().iter().map(|s| s.id().to_string()).collect();
        assert_eq!(ids, vec!["3", "2", "1"]);
    }

    #[tokio::test]
    async fn test_insert_rejects_duplicates() {
        let repo = InMemorySubmissionRepository::new();
        repo.insert(submission("1", "a@example.com")).await.unwrap();

        assert_eq!(
            repo.insert(submission("2", "a@example.com")).await,
            Err(SubmissionError::EmailExists)
        );
        assert_eq!(
            repo.insert(submission("1", "b@example.com")).await,
            Err(SubmissionError::DuplicateId("1".into()))
        );
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_replace() {
        let repo = InMemorySubmissionRepository::new();
        repo.insert(submission("1", "a@example.com")).await.unwrap();
        repo.insert(submission("2", "b@example.com")).await.unwrap();

        // keeping its own email is fine
        repo.replace(submission("1", "a@example.com")).await.unwrap();
        assert_eq!(
            repo.replace(submission("1", "b@example.com")).await,
            Err(SubmissionError::EmailExists)
        );
        assert_eq!(
            repo.replace(submission("9", "z@example.com")).await,
            Err(SubmissionError::NotFound)
        );
        // order is unaffected by replace
        let ids: Vec<String> = repo.list().await.unwrap().iter().map(|s| s.id().to_string()).collect();
        assert_eq!(ids, vec!["2", "1"]);
    }

    #[tokio::test]
    async fn test_email_exists_excludes_id() {
        let repo = InMemorySubmissionRepository::new();
        repo.insert(submission("1", "a@example.com")).await.unwrap();
        let email = Email::new("a@example.com").unwrap();

        assert!(repo.email_exists(&email, None).await.unwrap());
        assert!(!repo.email_exists(&email, Some(&EntityId::from_string("1"))).await.unwrap());
        assert!(repo.email_exists(&email, Some(&EntityId::from_string("2"))).await.unwrap());
    }

    #[test]
    fn test_with_submissions_keeps_order() {
        let repo = InMemorySubmissionRepository::with_submissions(vec![
            submission("2", "b@example.com"),
            submission("1", "a@example.com"),
        ])
        .unwrap();
        let inner = repo.inner.read();
        assert_eq!(inner.order.iter().map(|id| id.as_str()).collect::<Vec<_>>(), vec!["2", "1"]);
    }
}
