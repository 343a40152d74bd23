//! Store traits for searching, filtering and sorting
//!
//! The processor never touches the collection it is given: every step takes
//! ownership of a working copy and returns the survivors, so callers can keep
//! the fetched snapshot around and recompute views from it as often as they
//! like.

use crate::core::entity::{FieldPath, Record};
use crate::core::field::FieldValue;
use crate::core::query::{ColumnFilter, FilterOperator, QuerySpec, SortDirection, SortKey};
use std::cmp::Ordering;

/// Trait for stores that support searching, filtering and sorting
///
/// Implement this trait for processors that derive a display view from an
/// in-memory collection.
pub trait QueryableStore<R: Record>: Send + Sync {
    /// Keep records where any searchable field contains `term`, ignoring case
    ///
    /// An empty term keeps everything.
    fn apply_search(&self, data: Vec<R>, term: &str) -> Vec<R>;

    /// Keep records that satisfy every active filter
    fn apply_filters(&self, data: Vec<R>, filters: &[ColumnFilter]) -> Vec<R>;

    /// Stable sort by the first sort key
    fn apply_sort(&self, data: Vec<R>, sort: &[SortKey]) -> Vec<R>;

    /// Search, then filter, then sort
    fn apply(&self, collection: &[R], spec: &QuerySpec) -> Vec<R> {
        let data = self.apply_search(collection.to_vec(), &spec.search);
        let data = self.apply_filters(data, &spec.filters);
        let data = self.apply_sort(data, &spec.sort);

        tracing::debug!(
            input = collection.len(),
            output = data.len(),
            search = %spec.search,
            filters = spec.filters.len(),
            "query applied"
        );

        data
    }
}

/// Stateless query processor
///
/// Sorting uses the raw typed comparison of [`FieldValue::sort_cmp`]
/// (numbers by value, strings by code point) rather than a locale-aware
/// collation. Records whose sort field is missing or null always come last,
/// whatever the direction.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryProcessor;

impl QueryProcessor {
    pub fn new() -> Self {
        Self
    }
}

impl<R: Record> QueryableStore<R> for QueryProcessor {
    fn apply_search(&self, data: Vec<R>, term: &str) -> Vec<R> {
        if term.is_empty() {
            return data;
        }
        let needle = term.to_lowercase();

        data.into_iter()
            .filter(|record| matches_search(record, &needle))
            .collect()
    }

    fn apply_filters(&self, data: Vec<R>, filters: &[ColumnFilter]) -> Vec<R> {
        let active: Vec<&ColumnFilter> = filters.iter().filter(|f| f.is_active()).collect();
        if active.is_empty() {
            return data;
        }

        data.into_iter()
            .filter(|record| active.iter().all(|filter| matches_filter(record, filter)))
            .collect()
    }

    fn apply_sort(&self, data: Vec<R>, sort: &[SortKey]) -> Vec<R> {
        let Some(key) = sort.first() else {
            return data;
        };
        let Some(field) = R::Field::parse(&key.field) else {
            tracing::debug!(field = %key.field, "unknown sort field, keeping input order");
            return data;
        };

        let mut keyed: Vec<(Option<FieldValue>, R)> = data
            .into_iter()
            .map(|record| {
                let value = record.field_value(field).filter(|v| !v.is_null());
                (value, record)
            })
            .collect();

        keyed.sort_by(|(a, _), (b, _)| compare_nulls_last(a.as_ref(), b.as_ref(), key.direction));

        keyed.into_iter().map(|(_, record)| record).collect()
    }
}

/// Run the processor over `collection` with loose arguments
///
/// Equivalent to building a [`QuerySpec`] and calling
/// [`QueryableStore::apply`] on a [`QueryProcessor`].
pub fn apply<R: Record>(
    collection: &[R],
    filters: &[ColumnFilter],
    search: &str,
    sort: &[SortKey],
) -> Vec<R> {
    let spec = QuerySpec {
        search: search.to_string(),
        filters: filters.to_vec(),
        sort: sort.to_vec(),
    };
    QueryProcessor.apply(collection, &spec)
}

fn matches_search<R: Record>(record: &R, needle: &str) -> bool {
    R::searchable_fields().iter().any(|field| {
        record
            .field_value(*field)
            .and_then(|value| value.to_search_string())
            .is_some_and(|text| text.to_lowercase().contains(needle))
    })
}

fn matches_filter<R: Record>(record: &R, filter: &ColumnFilter) -> bool {
    let Some(value) = record.resolve(&filter.field) else {
        return false;
    };

    let compare = |expected: Ordering| value.compare_raw(&filter.value) == Some(expected);
    let text_match = |test: fn(&str, &str) -> bool| match (
        value.to_search_string(),
        filter.value.to_search_string(),
    ) {
        (Some(text), Some(target)) => test(&text.to_lowercase(), &target.to_lowercase()),
        _ => false,
    };

    match filter.operator {
        FilterOperator::GreaterThan => compare(Ordering::Greater),
        FilterOperator::LessThan => compare(Ordering::Less),
        FilterOperator::Contains => text_match(|text, target| text.contains(target)),
        FilterOperator::Equals => text_match(|text, target| text == target),
        FilterOperator::StartsWith => text_match(|text, target| text.starts_with(target)),
        FilterOperator::EndsWith => text_match(|text, target| text.ends_with(target)),
    }
}

fn compare_nulls_last(
    a: Option<&FieldValue>,
    b: Option<&FieldValue>,
    direction: SortDirection,
) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => match direction {
            SortDirection::Asc => a.sort_cmp(b),
            SortDirection::Desc => b.sort_cmp(a),
        },
    }
}
