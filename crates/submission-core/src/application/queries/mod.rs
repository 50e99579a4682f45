//! Query engine
//!
//! Filter, sort and paginate a snapshot of the store for the review table.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

use crate::application::dto::{
    Page, PageMetadata, SubmissionQuery, DEFAULT_PAGE, DEFAULT_PAGE_SIZE, DEFAULT_SORT_FIELD,
};
use crate::domain::aggregates::Submission;
use crate::error::{Result, SubmissionError};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

/// Sortable columns, each with its own typed comparator
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SortField {
    Name,
    Email,
    Age,
    /// Number of custom fields
    CustomFields,
    CreatedAt,
    UpdatedAt,
}

impl SortField {
    pub const ALL: [SortField; 6] = [
        Self::Name,
        Self::Email,
        Self::Age,
        Self::CustomFields,
        Self::CreatedAt,
        Self::UpdatedAt,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Age => "age",
            Self::CustomFields => "customFields",
            Self::CreatedAt => "createdAt",
            Self::UpdatedAt => "updatedAt",
        }
    }

    /// Ascending comparison
    pub fn compare(self, a: &Submission, b: &Submission) -> Ordering {
        match self {
            Self::Name => a.name().cmp(b.name()),
            Self::Email => a.email().as_str().cmp(b.email().as_str()),
            Self::Age => a.age().cmp(&b.age()),
            Self::CustomFields => a.custom_fields().len().cmp(&b.custom_fields().len()),
            Self::CreatedAt => a.created_at().cmp(&b.created_at()),
            Self::UpdatedAt => a.updated_at().cmp(&b.updated_at()),
        }
    }
}

impl FromStr for SortField {
    type Err = SubmissionError;

    /// Accepts the camelCase wire names and their snake_case forms
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "name" => Ok(Self::Name),
            "email" => Ok(Self::Email),
            "age" => Ok(Self::Age),
            "customFields" | "custom_fields" => Ok(Self::CustomFields),
            "createdAt" | "created_at" => Ok(Self::CreatedAt),
            "updatedAt" | "updated_at" => Ok(Self::UpdatedAt),
            other => {
                let expected: Vec<&str> = Self::ALL.iter().map(|f| f.as_str()).collect();
                Err(SubmissionError::Validation(format!(
                    "Unknown sort field: {other} (expected one of {})",
                    expected.join(", ")
                )))
            }
        }
    }
}

/// Query with defaults applied and parameters checked
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedQuery {
    pub page: u32,
    pub page_size: u32,
    pub search: String,
    pub sort_field: SortField,
    pub direction: SortDirection,
}

impl ResolvedQuery {
    pub fn resolve(query: SubmissionQuery) -> Result<Self> {
        let page = query.page.unwrap_or(DEFAULT_PAGE);
        if page == 0 {
            return Err(SubmissionError::Validation("Page must be at least 1".into()));
        }
        let page_size = query.page_size.unwrap_or(DEFAULT_PAGE_SIZE);
        if page_size == 0 {
            return Err(SubmissionError::Validation("Page size must be at least 1".into()));
        }
        let sort_field = query
            .sort_by
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_SORT_FIELD)
            .parse()?;

        Ok(Self {
            page,
            page_size,
            search: query.search.unwrap_or_default(),
            sort_field,
            direction: query.sort_direction.unwrap_or_default(),
        })
    }
}

/// Run a query over a snapshot in store order
pub fn run_query(snapshot: Vec<Submission>, query: SubmissionQuery) -> Result<Page<Submission>> {
    let query = ResolvedQuery::resolve(query)?;

    let mut filtered: Vec<Submission> = if query.search.is_empty() {
        snapshot
    } else {
        snapshot
            .into_iter()
            .filter(|s| s.matches_search(&query.search))
            .collect()
    };

    // stable: ties keep store order
    match query.direction {
        SortDirection::Asc => filtered.sort_by(|a, b| query.sort_field.compare(a, b)),
        SortDirection::Desc => filtered.sort_by(|a, b| query.sort_field.compare(b, a)),
    }

    Ok(paginate(filtered, query.page, query.page_size))
}

/// Slice out one 1-based page. `page_size` must be non-zero.
pub fn paginate<T>(items: Vec<T>, page: u32, page_size: u32) -> Page<T> {
    let total_items = items.len() as u64;
    let size = u64::from(page_size.max(1));
    let total_pages = total_items.div_ceil(size);
    let offset = u64::from(page.saturating_sub(1)).saturating_mul(size);

    let items: Vec<T> = items
        .into_iter()
        .skip(usize::try_from(offset).unwrap_or(usize::MAX))
        .take(usize::try_from(size).unwrap_or(usize::MAX))
        .collect();

    Page {
        items,
        metadata: PageMetadata {
            current_page: page,
            page_size,
            total_items,
            total_pages,
            has_next_page: u64::from(page) < total_pages,
            has_previous_page: page > 1,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::aggregates::SubmissionDraft;
    use crate::domain::value_objects::{CustomFieldInput, EntityId, FieldType};
    use chrono::{DateTime, TimeZone, Utc};
    use proptest::prelude::*;

    fn at(m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, m, d, 0, 0, 0).unwrap()
    }

    fn store() -> Vec<Submission> {
        let john = SubmissionDraft::new("John Doe", "john@example.com", 25)
            .with_field(CustomFieldInput::new("Company", FieldType::Text, "Acme Inc").with_id("cf1"));
        let jane = SubmissionDraft::new("Jane Smith", "jane@example.com", 35)
            .with_field(CustomFieldInput::new("Years of Experience", FieldType::Number, 7.0).with_id("cf2"));
        vec![
            Submission::restore(EntityId::from_string("1"), john, at(1, 15), at(1, 15)).unwrap(),
            Submission::restore(EntityId::from_string("2"), jane, at(2, 15), at(2, 15)).unwrap(),
        ]
    }

    fn names(page: &Page<Submission>) -> Vec<&str> {
        page.items.iter().map(|s| s.name()).collect()
    }

    #[test]
    fn test_search_custom_field_value() {
        let page = run_query(store(), SubmissionQuery::default().search("Acme")).unwrap();
        assert_eq!(names(&page), vec!["John Doe"]);
        assert_eq!(page.metadata.total_items, 1);
    }

    #[test]
    fn test_search_by_email_and_age() {
        let page = run_query(store(), SubmissionQuery::default().search("jane@example")).unwrap();
        assert_eq!(names(&page), vec!["Jane Smith"]);

        let page = run_query(store(), SubmissionQuery::default().search("35")).unwrap();
        assert_eq!(names(&page), vec!["Jane Smith"]);

        // numeric custom field value is searchable as text
        let page = run_query(store(), SubmissionQuery::default().search("7")).unwrap();
        assert_eq!(names(&page), vec!["Jane Smith"]);
    }

    #[test]
    fn test_no_match_is_empty() {
        let page = run_query(store(), SubmissionQuery::default().search("nonexistent")).unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.metadata.total_items, 0);
        assert_eq!(page.metadata.total_pages, 0);
        assert!(!page.metadata.has_next_page);
    }

    #[test]
    fn test_first_page_of_one() {
        let page = run_query(store(), SubmissionQuery::default().page(1).page_size(1)).unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.metadata.total_pages, 2);
        assert!(page.metadata.has_next_page);
        assert!(!page.metadata.has_previous_page);
    }

    #[test]
    fn test_default_sort_is_updated_at_desc() {
        let page = run_query(store(), SubmissionQuery::default()).unwrap();
        assert_eq!(names(&page), vec!["Jane Smith", "John Doe"]);
    }

    #[test]
    fn test_sort_by_each_field() {
        let asc = |field: &str| {
            let page = run_query(store(), SubmissionQuery::default().sort(field, SortDirection::Asc)).unwrap();
            let sorted: Vec<String> = page.items.iter().map(|s| s.name().to_string()).collect();
            sorted
        };
        assert_eq!(asc("name"), vec!["Jane Smith", "John Doe"]);
        assert_eq!(asc("email"), vec!["Jane Smith", "John Doe"]);
        assert_eq!(asc("age"), vec!["John Doe", "Jane Smith"]);
        assert_eq!(asc("created_at"), vec!["John Doe", "Jane Smith"]);
    }

    #[test]
    fn test_ties_keep_store_order() {
        // both records have one custom field
        for direction in [SortDirection::Asc, SortDirection::Desc] {
            let page = run_query(store(), SubmissionQuery::default().sort("customFields", direction)).unwrap();
            assert_eq!(names(&page), vec!["John Doe", "Jane Smith"]);
        }
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(matches!(
            run_query(store(), SubmissionQuery::default().page_size(0)),
            Err(SubmissionError::Validation(_))
        ));
        assert!(matches!(
            run_query(store(), SubmissionQuery::default().page(0)),
            Err(SubmissionError::Validation(_))
        ));
        assert!(matches!(
            run_query(store(), SubmissionQuery::default().sort("password", SortDirection::Asc)),
            Err(SubmissionError::Validation(_))
        ));
    }

    #[test]
    fn test_wire_names_parse_back() {
        for field in SortField::ALL {
            assert_eq!(field.as_str().parse::<SortField>(), Ok(field));
        }

        let err = "shoeSize".parse::<SortField>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation error: Unknown sort field: shoeSize (expected one of name, email, age, customFields, createdAt, updatedAt)"
        );
    }

    #[test]
    fn test_page_past_end() {
        let page = run_query(store(), SubmissionQuery::default().page(5).page_size(1)).unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.metadata.current_page, 5);
        assert_eq!(page.metadata.total_pages, 2);
        assert!(!page.metadata.has_next_page);
        assert!(page.metadata.has_previous_page);
    }

    proptest! {
        #[test]
        fn prop_page_length(total in 0usize..200, page in 1u32..30, size in 1u32..25) {
            let items: Vec<usize> = (0..total).collect();
            let result = paginate(items, page, size);

            let skipped = (page as i64 - 1) * size as i64;
            let expected = (total as i64 - skipped).clamp(0, size as i64) as usize;
            prop_assert_eq!(result.items.len(), expected);

            let pages = result.metadata.total_pages;
            prop_assert_eq!(pages, (total as u64 + size as u64 - 1) / size as u64);
            prop_assert_eq!(result.metadata.has_next_page, (page as u64) < pages);
            prop_assert_eq!(result.metadata.has_previous_page, page > 1);
            if let Some(first) = result.items.first() {
                prop_assert_eq!(*first as i64, skipped);
            }
        }
    }
}
