//! Data Transfer Objects (DTOs)
//!
//! Objects for transferring data across boundaries.

use serde::{Deserialize, Serialize};

use crate::application::queries::SortDirection;
use crate::domain::aggregates::SubmissionDraft;
use crate::domain::value_objects::{CustomFieldInput, EntityId};
use crate::error::Result;

pub use crate::domain::services::{AgeBucket, FieldUsage, SubmissionStats, TimelinePoint, Totals};

// =============================================================================
// Commands
// =============================================================================

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubmissionCommand {
    /// Caller-assigned id; generated when absent
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    pub email: String,
    pub age: f64,
    #[serde(default)]
    pub custom_fields: Vec<CustomFieldInput>,
}

impl CreateSubmissionCommand {
    pub fn into_parts(self) -> (Option<EntityId>, SubmissionDraft) {
        let id = self
            .id
            .filter(|id| !id.trim().is_empty())
            .map(EntityId::from_string);
        let draft = SubmissionDraft {
            name: self.name,
            email: self.email,
            age: self.age,
            custom_fields: self.custom_fields,
        };
        (id, draft)
    }
}

impl From<SubmissionDraft> for CreateSubmissionCommand {
    fn from(draft: SubmissionDraft) -> Self {
        Self {
            id: None,
            name: draft.name,
            email: draft.email,
            age: draft.age,
            custom_fields: draft.custom_fields,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSubmissionCommand {
    pub id: String,
    pub name: String,
    pub email: String,
    pub age: f64,
    #[serde(default)]
    pub custom_fields: Vec<CustomFieldInput>,
}

impl UpdateSubmissionCommand {
    pub fn new(id: impl Into<String>, draft: SubmissionDraft) -> Self {
        Self {
            id: id.into(),
            name: draft.name,
            email: draft.email,
            age: draft.age,
            custom_fields: draft.custom_fields,
        }
    }

    pub fn into_parts(self) -> (EntityId, SubmissionDraft) {
        let draft = SubmissionDraft {
            name: self.name,
            email: self.email,
            age: self.age,
            custom_fields: self.custom_fields,
        };
        (EntityId::from_string(self.id), draft)
    }
}

// =============================================================================
// Queries
// =============================================================================

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const DEFAULT_SORT_FIELD: &str = "updatedAt";

/// Table query; every parameter is optional
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SubmissionQuery {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub sort_direction: Option<SortDirection>,
}

impl SubmissionQuery {
    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn sort(mut self, sort_by: impl Into<String>, direction: SortDirection) -> Self {
        self.sort_by = Some(sort_by.into());
        self.sort_direction = Some(direction);
        self
    }
}

// =============================================================================
// Views (Read Models)
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    pub current_page: u32,
    pub page_size: u32,
    pub total_items: u64,
    pub total_pages: u64,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub metadata: PageMetadata,
}

/// `{success, id?, error?}` result of a create
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateSubmissionOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<Result<EntityId>> for CreateSubmissionOutcome {
    fn from(result: Result<EntityId>) -> Self {
        match result {
            Ok(id) => Self { success: true, id: Some(id.to_string()), error: None },
            Err(e) => Self { success: false, id: None, error: Some(e.to_string()) },
        }
    }
}

/// `{success, error?}` result of an update
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateSubmissionOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> From<Result<T>> for UpdateSubmissionOutcome {
    fn from(result: Result<T>) -> Self {
        match result {
            Ok(_) => Self { success: true, error: None },
            Err(e) => Self { success: false, error: Some(e.to_string()) },
        }
    }
}
