//! Statistics domain service
//!
//! Aggregates over the full store for the dashboard charts. Always computed
//! from a fresh snapshot; nothing is cached between calls.

use chrono::{DateTime, Months, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::aggregates::Submission;
use crate::domain::value_objects::FieldType;

/// Records created per calendar month
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimelinePoint {
    /// `YYYY-MM`
    pub date: String,
    pub count: u64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AgeBucket {
    pub range: String,
    pub count: u64,
    pub percentage: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldUsage {
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub count: u64,
    /// Relative to the number of submissions, not the number of fields
    pub percentage: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub total_submissions: u64,
    pub average_age: u32,
    pub last_month_submissions: u64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionStats {
    pub timeline: Vec<TimelinePoint>,
    pub age_distribution: Vec<AgeBucket>,
    pub custom_field_usage: Vec<FieldUsage>,
    pub totals: Totals,
}

/// Inclusive age range; `max: None` is open-ended
#[derive(Clone, Copy, Debug)]
pub struct AgeRange {
    pub label: &'static str,
    pub min: u32,
    pub max: Option<u32>,
}

impl AgeRange {
    pub fn contains(&self, age: u32) -> bool {
        age >= self.min && self.max.map_or(true, |max| age <= max)
    }
}

/// Fixed buckets. Ages below 18 fall in none of them.
pub const AGE_RANGES: [AgeRange; 5] = [
    AgeRange { label: "18-24", min: 18, max: Some(24) },
    AgeRange { label: "25-34", min: 25, max: Some(34) },
    AgeRange { label: "35-44", min: 35, max: Some(44) },
    AgeRange { label: "45-54", min: 45, max: Some(54) },
    AgeRange { label: "55+", min: 55, max: None },
];

pub struct StatisticsService;

impl StatisticsService {
    pub fn compute(submissions: &[Submission], now: DateTime<Utc>) -> SubmissionStats {
        let total = submissions.len() as u64;

        SubmissionStats {
            timeline: Self::timeline(submissions),
            age_distribution: Self::age_distribution(submissions, total),
            custom_field_usage: Self::custom_field_usage(submissions, total),
            totals: Totals {
                total_submissions: total,
                average_age: Self::average_age(submissions),
                last_month_submissions: Self::last_month(submissions, now),
            },
        }
    }

    /// Ascending by month
    pub fn timeline(submissions: &[Submission]) -> Vec<TimelinePoint> {
        let mut months: BTreeMap<String, u64> = BTreeMap::new();
        for s in submissions {
            *months.entry(s.created_at().format("%Y-%m").to_string()).or_default() += 1;
        }
        months
            .into_iter()
            .map(|(date, count)| TimelinePoint { date, count })
            .collect()
    }

    pub fn age_distribution(submissions: &[Submission], total: u64) -> Vec<AgeBucket> {
        AGE_RANGES
            .iter()
            .map(|range| {
                let count = submissions.iter().filter(|s| range.contains(s.age())).count() as u64;
                AgeBucket {
                    range: range.label.to_string(),
                    count,
                    percentage: percentage(count, total),
                }
            })
            .collect()
    }

    /// One entry per field type that occurs, in `FieldType` declaration order
    pub fn custom_field_usage(submissions: &[Submission], total: u64) -> Vec<FieldUsage> {
        let mut counts: BTreeMap<FieldType, u64> = BTreeMap::new();
        for field in submissions.iter().flat_map(|s| s.custom_fields()) {
            *counts.entry(field.field_type()).or_default() += 1;
        }
        counts
            .into_iter()
            .map(|(field_type, count)| FieldUsage {
                field_type,
                count,
                percentage: percentage(count, total),
            })
            .collect()
    }

    /// Rounded to the nearest integer; 0 for an empty store
    pub fn average_age(submissions: &[Submission]) -> u32 {
        if submissions.is_empty() {
            return 0;
        }
        let sum: u64 = submissions.iter().map(|s| u64::from(s.age())).sum();
        let avg = sum as f64 / submissions.len() as f64;
        avg.round() as u32
    }

    /// Records created strictly after `now` minus one calendar month
    pub fn last_month(submissions: &[Submission], now: DateTime<Utc>) -> u64 {
        let cutoff = now
            .checked_sub_months(Months::new(1))
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        submissions.iter().filter(|s| s.created_at() > cutoff).count() as u64
    }
}

fn percentage(count: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    100.0 * count as f64 / total as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::aggregates::SubmissionDraft;
    use crate::domain::value_objects::{CustomFieldInput, EntityId};
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    fn record(id: &str, age: u32, created: DateTime<Utc>, fields: Vec<CustomFieldInput>) -> Submission {
        let mut draft = SubmissionDraft::new(format!("User {id}"), format!("user{id}@example.com"), age);
        draft.custom_fields = fields;
        Submission::restore(EntityId::from_string(id), draft, created, created).unwrap()
    }

    fn fixture() -> Vec<Submission> {
        vec![
            record("1", 25, at(2024, 1, 15), vec![CustomFieldInput::new("Company", FieldType::Text, "Acme Inc")]),
            record("2", 35, at(2024, 2, 15), vec![CustomFieldInput::new("Years of Experience", FieldType::Number, 5.0)]),
        ]
    }

    #[test]
    fn test_totals_and_buckets() {
        let stats = StatisticsService::compute(&fixture(), at(2024, 3, 1));

        assert_eq!(stats.totals.total_submissions, 2);
        assert_eq!(stats.totals.average_age, 30);

        let counts: Vec<(&str, u64)> = stats
            .age_distribution
            .iter()
            .map(|b| (b.range.as_str(), b.count))
            .collect();
        assert_eq!(counts, vec![("18-24", 0), ("25-34", 1), ("35-44", 1), ("45-54", 0), ("55+", 0)]);
        assert_eq!(stats.age_distribution[1].percentage, 50.0);
    }

    #[test]
    fn test_timeline_sorted_by_month() {
        let mut data = fixture();
        data.reverse();
        data.push(record("3", 40, at(2024, 1, 31), vec![]));

        let timeline = StatisticsService::timeline(&data);
        assert_eq!(
            timeline,
            vec![
                TimelinePoint { date: "2024-01".into(), count: 2 },
                TimelinePoint { date: "2024-02".into(), count: 1 },
            ]
        );
    }

    #[test]
    fn test_custom_field_usage_normalized_by_submissions() {
        let mut data = fixture();
        data.push(record(
            "3",
            60,
            at(2024, 2, 20),
            vec![
                CustomFieldInput::new("Phone", FieldType::Text, "555-0123"),
                CustomFieldInput::new("Department", FieldType::Text, "Engineering"),
            ],
        ));

        let usage = StatisticsService::custom_field_usage(&data, 3);
        assert_eq!(usage.len(), 2);
        assert_eq!(usage[0].field_type, FieldType::Text);
        assert_eq!(usage[0].count, 3);
        assert_eq!(usage[0].percentage, 100.0);
        assert_eq!(usage[1].field_type, FieldType::Number);
        assert_eq!(usage[1].count, 1);
    }

    #[test]
    fn test_under_18_not_bucketed() {
        let data = vec![record("1", 17, at(2024, 1, 1), vec![])];
        let stats = StatisticsService::compute(&data, at(2024, 1, 2));
        assert!(stats.age_distribution.iter().all(|b| b.count == 0));
        assert_eq!(stats.totals.average_age, 17);
    }

    #[test]
    fn test_empty_store_has_no_nan() {
        let stats = StatisticsService::compute(&[], at(2024, 1, 1));
        assert_eq!(stats.totals.total_submissions, 0);
        assert_eq!(stats.totals.average_age, 0);
        assert!(stats.timeline.is_empty());
        assert!(stats.custom_field_usage.is_empty());
        assert!(stats.age_distribution.iter().all(|b| b.percentage == 0.0));
    }

    #[test]
    fn test_last_month_is_calendar_month() {
        let now = at(2024, 3, 31);
        let data = vec![
            // 2024-02-29 is the cutoff; strictly after it counts
            record("1", 30, at(2024, 2, 29), vec![]),
            record("2", 30, at(2024, 3, 1), vec![]),
            record("3", 30, at(2024, 1, 10), vec![]),
        ];
        assert_eq!(StatisticsService::last_month(&data, now), 1);
    }

    #[test]
    fn test_average_age_rounds() {
        let data = vec![
            record("1", 20, at(2024, 1, 1), vec![]),
            record("2", 21, at(2024, 1, 1), vec![]),
        ];
        assert_eq!(StatisticsService::average_age(&data), 21);
    }

    proptest! {
        #[test]
        fn prop_percentages_match_counts(ages in proptest::collection::vec(0u32..100, 0..40)) {
            let data: Vec<Submission> = ages
                .iter()
                .enumerate()
                .map(|(i, age)| record(&i.to_string(), *age, at(2024, 1, 1), vec![]))
                .collect();
            let stats = StatisticsService::compute(&data, at(2024, 1, 2));
            let total = data.len() as f64;

            for bucket in &stats.age_distribution {
                let expected = if data.is_empty() { 0.0 } else { 100.0 * bucket.count as f64 / total };
                prop_assert!((bucket.percentage - expected).abs() < 1e-9);
            }
            let bucketed: u64 = stats.age_distribution.iter().map(|b| b.count).sum();
            let adults = ages.iter().filter(|a| **a >= 18).count() as u64;
            prop_assert_eq!(bucketed, adults);
        }
    }
}
