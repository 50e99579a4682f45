//! Domain module
//!
//! Submission aggregate, value objects and domain services.

pub mod aggregates;
pub mod value_objects;
pub mod services;

pub use aggregates::*;
pub use value_objects::*;
pub use services::*;
