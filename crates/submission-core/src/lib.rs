//! Submission Desk Core
//!
//! Store, query engine and statistics behind the data-entry dashboard.
//!
//! ## Architecture
//!
//! - **Domain Layer**: the `Submission` aggregate, typed custom fields,
//!   validated value objects and the statistics domain service
//! - **Application Layer**: use case orchestration, query engine, DTOs
//! - **Ports Layer**: hexagonal interfaces (use cases in, repository out)
//! - **Infrastructure Layer**: in-memory repository and demo data
//!
//! ## Operations
//!
//! - Create and update submissions with email uniqueness enforcement
//! - Search, sort and paginate submissions for the review table
//! - Timeline, age distribution and custom field usage statistics

pub mod domain;
pub mod application;
pub mod ports;
pub mod infrastructure;
pub mod error;

// Re-exports for convenience
pub use domain::aggregates::{Submission, SubmissionDraft};
pub use domain::value_objects::{
    CustomField, CustomFieldInput, EntityId, Email, EmailError, FieldError, FieldType, FieldValue,
    RawFieldValue,
};
pub use domain::services::{Clock, FixedClock, StatisticsService, SystemClock};
pub use application::{SubmissionService, SortDirection, SortField};
pub use application::dto::*;
pub use ports::inbound::SubmissionUseCases;
pub use ports::outbound::SubmissionRepository;
pub use infrastructure::{demo_submissions, InMemorySubmissionRepository};
pub use error::{Result, SubmissionError};
