//! Infrastructure layer
//!
//! Concrete adapters for the outbound ports.

pub mod persistence;
pub mod seed;

pub use persistence::InMemorySubmissionRepository;
pub use seed::demo_submissions;
