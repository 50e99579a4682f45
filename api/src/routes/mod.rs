//! API Routes

pub mod health;
pub mod submissions;
pub mod stats;
