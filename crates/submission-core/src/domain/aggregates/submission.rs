//! Submission Aggregate
//!
//! One data-entry record: fixed name/email/age schema plus typed custom
//! fields. `id` and `created_at` are fixed at creation; every successful
//! update refreshes `updated_at`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::domain::value_objects::{CustomField, CustomFieldInput, Email, EntityId};
use crate::error::{Result, SubmissionError};

/// Upper bound accepted for `age`
pub const MAX_AGE: u32 = 150;

/// Unvalidated submission content, as entered in the form or edit dialog
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionDraft {
    pub name: String,
    pub email: String,
    pub age: f64,
    #[serde(default)]
    pub custom_fields: Vec<CustomFieldInput>,
}

impl SubmissionDraft {
    pub fn new(name: impl Into<String>, email: impl Into<String>, age: u32) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            age: f64::from(age),
            custom_fields: vec![],
        }
    }

    pub fn with_field(mut self, field: CustomFieldInput) -> Self {
        self.custom_fields.push(field);
        self
    }
}

/// Validated draft content
struct Content {
    name: String,
    email: Email,
    age: u32,
    custom_fields: Vec<CustomField>,
}

impl Content {
    fn validate(draft: SubmissionDraft) -> Result<Self> {
        let name = draft.name.trim().to_string();
        if name.is_empty() {
            return Err(SubmissionError::Validation("Name is required".into()));
        }

        let email = Email::new(draft.email)?;
        let age = Self::validate_age(draft.age)?;

        let mut seen = HashSet::new();
        let mut custom_fields = Vec::with_capacity(draft.custom_fields.len());
        for input in draft.custom_fields {
            let field = CustomField::from_input(input)?;
            if !seen.insert(field.id().to_string()) {
                return Err(SubmissionError::Validation(format!(
                    "Duplicate custom field id: {}",
                    field.id()
                )));
            }
            custom_fields.push(field);
        }

        Ok(Self { name, email, age, custom_fields })
    }

    fn validate_age(age: f64) -> Result<u32> {
        if !age.is_finite() || age.fract() != 0.0 || age < 0.0 || age > f64::from(MAX_AGE) {
            return Err(SubmissionError::Validation(format!(
                "Age must be a whole number between 0 and {MAX_AGE}"
            )));
        }
        // in range and integral, so the cast is exact
        Ok(age as u32)
    }
}

/// Submission aggregate root
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    id: EntityId,
    name: String,
    email: Email,
    age: u32,
    custom_fields: Vec<CustomField>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Submission {
    /// Create a new submission with a fresh id (factory method)
    pub fn create(draft: SubmissionDraft, now: DateTime<Utc>) -> Result<Self> {
        Self::create_with_id(EntityId::new(), draft, now)
    }

    /// Create a new submission with a caller-assigned id
    pub fn create_with_id(id: EntityId, draft: SubmissionDraft, now: DateTime<Utc>) -> Result<Self> {
        Self::restore(id, draft, now, now)
    }

    /// Rebuild a record with known id and timestamps
    pub fn restore(
        id: EntityId,
        draft: SubmissionDraft,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Result<Self> {
        if id.as_str().trim().is_empty() {
            return Err(SubmissionError::Validation("Id cannot be empty".into()));
        }
        let content = Content::validate(draft)?;
        Ok(Self {
            id,
            name: content.name,
            email: content.email,
            age: content.age,
            custom_fields: content.custom_fields,
            created_at,
            updated_at,
        })
    }

    // =========================================================================
    // Getters
    // =========================================================================

    pub fn id(&self) -> &EntityId { &self.id }
    pub fn name(&self) -> &str { &self.name }
    pub fn email(&self) -> &Email { &self.email }
    pub fn age(&self) -> u32 { self.age }
    pub fn custom_fields(&self) -> &[CustomField] { &self.custom_fields }
    pub fn created_at(&self) -> DateTime<Utc> { self.created_at }
    pub fn updated_at(&self) -> DateTime<Utc> { self.updated_at }

    // =========================================================================
    // Business Operations
    // =========================================================================

    /// Replace the editable content. Validates fully before changing anything.
    pub fn apply_update(&mut self, draft: SubmissionDraft, now: DateTime<Utc>) -> Result<()> {
        let content = Content::validate(draft)?;
        self.name = content.name;
        self.email = content.email;
        self.age = content.age;
        self.custom_fields = content.custom_fields;
        self.updated_at = now;
        Ok(())
    }

    /// Case-insensitive substring search over name, email, age and custom fields
    pub fn matches_search(&self, search: &str) -> bool {
        let needle = search.to_lowercase();
        self.name.to_lowercase().contains(&needle)
            || self.email.as_str().contains(&needle)
            || self.age.to_string().contains(search)
            || self.custom_fields.iter().any(|f| f.matches(&needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::FieldType;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap()
    }

    fn john() -> SubmissionDraft {
        SubmissionDraft::new("John Doe", "john@example.com", 25)
            .with_field(CustomFieldInput::new("Company", FieldType::Text, "Acme Inc").with_id("cf1"))
    }

    #[test]
    fn test_create_sets_timestamps() {
        let s = Submission::create(john(), t0()).unwrap();
        assert_eq!(s.created_at(), t0());
        assert_eq!(s.updated_at(), t0());
        assert_eq!(s.custom_fields().len(), 1);
        assert!(!s.id().as_str().is_empty());
    }

    #[test]
    fn test_apply_update_keeps_id_and_created_at() {
        let mut s = Submission::create(john(), t0()).unwrap();
        let id = s.id().clone();
        let later = t0() + chrono::Duration::days(3);

        s.apply_update(SubmissionDraft::new("John Q. Doe", "jq@example.com", 26), later).unwrap();

        assert_eq!(s.id(), &id);
        assert_eq!(s.created_at(), t0());
        assert_eq!(s.updated_at(), later);
        assert_eq!(s.name(), "John Q. Doe");
        assert!(s.custom_fields().is_empty());
    }

    #[test]
    fn test_failed_update_leaves_record_untouched() {
        let mut s = Submission::create(john(), t0()).unwrap();
        let before = s.clone();
        let bad = SubmissionDraft::new("", "john@example.com", 25);
        assert!(s.apply_update(bad, t0() + chrono::Duration::days(1)).is_err());
        assert_eq!(s, before);
    }

    #[test]
    fn test_age_guards() {
        for age in [f64::NAN, f64::INFINITY, -1.0, 30.5, 151.0] {
            let mut draft = john();
            draft.age = age;
            assert!(
                matches!(Submission::create(draft, t0()), Err(SubmissionError::Validation(_))),
                "age {age} accepted"
            );
        }
    }

    #[test]
    fn test_age_bounds_are_inclusive() {
        for age in [0.0, 150.0] {
            let mut draft = john();
            draft.age = age;
            assert!(Submission::create(draft, t0()).is_ok(), "age {age} rejected");
        }

        let mut draft = john();
        draft.age = 42.5;
        assert_eq!(
            Submission::create(draft, t0()).unwrap_err(),
            SubmissionError::Validation("Age must be a whole number between 0 and 150".into())
        );
    }

    #[test]
    fn test_empty_email_rejected() {
        let draft = SubmissionDraft::new("John", "", 30);
        assert_eq!(
            Submission::create(draft, t0()).unwrap_err(),
            SubmissionError::Validation("Email cannot be empty".into())
        );
    }

    #[test]
    fn test_duplicate_custom_field_ids_rejected() {
        let draft = john().with_field(CustomFieldInput::new("Phone", FieldType::Text, "555").with_id("cf1"));
        assert!(Submission::create(draft, t0()).is_err());
    }

    #[test]
    fn test_matches_search() {
        let s = Submission::create(john(), t0()).unwrap();
        assert!(s.matches_search("acme"));
        assert!(s.matches_search("JOHN"));
        assert!(s.matches_search("company"));
        assert!(s.matches_search("25"));
        assert!(s.matches_search("@example"));
        assert!(!s.matches_search("jane"));
    }

    #[test]
    fn test_serializes_camel_case() {
        let s = Submission::create(john(), t0()).unwrap();
        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["email"], "john@example.com");
        assert_eq!(json["customFields"][0]["label"], "Company");
        assert!(json["createdAt"].is_string());
    }
}
