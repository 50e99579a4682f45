//! Domain services module

pub mod clock;
pub mod statistics;

pub use clock::{Clock, FixedClock, SystemClock};
pub use statistics::{
    AgeBucket, AgeRange, FieldUsage, StatisticsService, SubmissionStats, TimelinePoint, Totals,
    AGE_RANGES,
};
