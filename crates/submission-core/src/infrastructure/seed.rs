//! Demo data for local runs of the dashboard

use chrono::{DateTime, Duration, Utc};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::domain::aggregates::{Submission, SubmissionDraft};
use crate::domain::value_objects::{CustomFieldInput, EntityId, FieldType, RawFieldValue};
use crate::error::Result;

/// How far back demo timestamps reach (~115 days)
const SPREAD_MILLIS: i64 = 10_000_000_000;

/// Up to this many custom fields per record
const MAX_FIELDS: usize = 3;

fn catalogue() -> [(&'static str, FieldType, RawFieldValue); 5] {
    [
        ("Company", FieldType::Text, RawFieldValue::from("Acme Inc")),
        ("Phone", FieldType::Text, RawFieldValue::from("555-0123")),
        ("Department", FieldType::Text, RawFieldValue::from("Engineering")),
        ("Years of Experience", FieldType::Number, RawFieldValue::Number(5.0)),
        ("Work Email", FieldType::Email, RawFieldValue::from("work@example.com")),
    ]
}

/// `count` records named `User N` / `userN@example.com`, ages 20-59,
/// created within the ~115 days before `now`.
pub fn demo_submissions<R: Rng + ?Sized>(
    count: usize,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Result<Vec<Submission>> {
    let catalogue = catalogue();
    let mut submissions = Vec::with_capacity(count);

    for i in 1..=count {
        let mut draft = SubmissionDraft::new(format!("User {i}"), format!("user{i}@example.com"), rng.gen_range(20..60));

        let n = rng.gen_range(0..=MAX_FIELDS);
        for (label, field_type, value) in catalogue.choose_multiple(rng, n) {
            draft.custom_fields.push(CustomFieldInput::new(*label, *field_type, value.clone()));
        }

        let created_at = now - Duration::milliseconds(rng.gen_range(0..SPREAD_MILLIS));
        let age_millis = (now - created_at).num_milliseconds();
        let updated_at = created_at + Duration::milliseconds(rng.gen_range(0..=age_millis));

        submissions.push(Submission::restore(EntityId::new(), draft, created_at, updated_at)?);
    }

    // most recent first, like the live store
    submissions.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
    Ok(submissions)
}
