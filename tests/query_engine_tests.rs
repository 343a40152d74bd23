//! Integration tests for the collection query processor
//!
//! Exercises search, column filters and sorting through the public API,
//! against both the upstream fixture and hand-built edge-case records.

mod harness;

use harness::*;
use userdesk::core::store::apply;
use userdesk::prelude::*;

fn ann_bob() -> Vec<User> {
    vec![User::new(1, "Ann"), User::new(2, "Bob")]
}

// ============================================================================
// Search
// ============================================================================

#[test]
fn test_search_is_case_insensitive() {
    let result = apply(&ann_bob(), &[], "an", &[]);
    assert_eq!(ids(&result), vec![1]);

    let result = apply(&ann_bob(), &[], "AN", &[]);
    assert_eq!(ids(&result), vec![1]);
}

#[test]
fn test_empty_search_keeps_collection() {
    let users = fixture_users();
    let result = apply(&users, &[], "", &[]);
    assert_eq!(ids(&result), ids(&users));
}

#[test]
fn test_search_without_match_is_empty() {
    let result = apply(&fixture_users(), &[], "zzz-no-such-user", &[]);
    assert!(result.is_empty());
}

#[test]
fn test_search_reaches_nested_fields() {
    let users = fixture_users();

    // company.name
    assert_eq!(ids(&apply(&users, &[], "romaguera", &[])), vec![1, 3]);
    // address.city
    assert_eq!(ids(&apply(&users, &[], "gwenborough", &[])), vec![1]);
    // address.zipcode
    assert_eq!(ids(&apply(&users, &[], "33263", &[])), vec![5]);
}

#[test]
fn test_search_matches_numeric_id() {
    let users = fixture_users();
    let result = apply(&users, &[], "4", &[]);
    assert!(ids(&result).contains(&4));
}

// ============================================================================
// Filters
// ============================================================================

#[test]
fn test_dotted_path_filter() {
    let mut users = fixture_users();
    let mut companyless = User::new(9, "Nobody");
    companyless.company = None;
    users.push(companyless);

    let filter = ColumnFilter::new("company.name", FilterOperator::Equals, "Romaguera-Crona");
    let result = apply(&users, &[filter], "", &[]);
    assert_eq!(ids(&result), vec![1]);

    let filter = ColumnFilter::contains("company.name", "");
    let result = apply(&users, &[filter], "", &[]);
    assert!(!ids(&result).contains(&9), "absent company must not match");
}

#[test]
fn test_string_operators() {
    let users = fixture_users();

    let starts = ColumnFilter::new("company.name", FilterOperator::StartsWith, "rom");
    assert_eq!(ids(&apply(&users, &[starts], "", &[])), vec![1, 3]);

    let ends = ColumnFilter::new("email", FilterOperator::EndsWith, ".BIZ");
    assert_eq!(ids(&apply(&users, &[ends], "", &[])), vec![1]);

    let contains = ColumnFilter::contains("address.suite", "suite");
    assert_eq!(ids(&apply(&users, &[contains], "", &[])), vec![2, 3, 5]);
}

#[test]
fn test_numeric_comparison_operators() {
    let users = fixture_users();

    let above = ColumnFilter::new("id", FilterOperator::GreaterThan, 3i64);
    assert_eq!(ids(&apply(&users, &[above], "", &[])), vec![4, 5]);

    // numeric strings are compared as numbers
    let below = ColumnFilter::new("id", FilterOperator::LessThan, "3");
    assert_eq!(ids(&apply(&users, &[below], "", &[])), vec![1, 2]);
}

#[test]
fn test_filters_are_conjunctive() {
    let users = fixture_users();
    let filters = vec![
        ColumnFilter::new("company.name", FilterOperator::StartsWith, "rom"),
        ColumnFilter::contains("address.city", "mckenzie"),
    ];
    assert_eq!(ids(&apply(&users, &filters, "", &[])), vec![3]);
}

#[test]
fn test_null_filter_is_inactive() {
    let users = fixture_users();
    let filter = ColumnFilter::new("name", FilterOperator::Equals, FieldValue::Null);
    assert_eq!(apply(&users, &[filter], "", &[]).len(), users.len());
}

#[test]
fn test_unknown_filter_field_matches_nothing() {
    let filter = ColumnFilter::contains("company.ceo", "x");
    assert!(apply(&fixture_users(), &[filter], "", &[]).is_empty());
}

// ============================================================================
// Sorting
// ============================================================================

#[test]
fn test_null_sorts_last_descending() {
    let users = vec![User::new(1, "Ann"), nameless(2), User::new(3, "Zoe")];
    let result = apply(&users, &[], "", &[SortKey::desc("name")]);
    assert_eq!(names(&result), vec![Some("Zoe"), Some("Ann"), None]);
}

#[test]
fn test_null_sorts_last_ascending() {
    let users = vec![nameless(1), User::new(2, "Zoe"), User::new(3, "Ann")];
    let result = apply(&users, &[], "", &[SortKey::asc("name")]);
    assert_eq!(names(&result), vec![Some("Ann"), Some("Zoe"), None]);
}

#[test]
fn test_missing_nested_value_sorts_last() {
    let mut users = fixture_users();
    let mut companyless = User::new(0, "Nobody");
    companyless.company = None;
    users.insert(0, companyless);

    for key in [SortKey::asc("company.name"), SortKey::desc("company.name")] {
        let result = apply(&users, &[], "", &[key]);
        assert_eq!(result.last().map(|u| u.id), Some(0));
    }
}

#[test]
fn test_sort_is_stable_in_both_directions() {
    let users = vec![
        User::new(1, "Ann").with_city("Paris"),
        User::new(2, "Bob").with_city("Paris"),
        User::new(3, "Cat").with_city("Oslo"),
        User::new(4, "Dan").with_city("Paris"),
    ];

    let asc = apply(&users, &[], "", &[SortKey::asc("address.city")]);
    assert_eq!(ids(&asc), vec![3, 1, 2, 4]);

    let desc = apply(&users, &[], "", &[SortKey::desc("address.city")]);
    assert_eq!(ids(&desc), vec![1, 2, 4, 3]);
}

#[test]
fn test_only_first_sort_key_applies() {
    let users = vec![
        User::new(1, "Bob").with_city("Oslo"),
        User::new(2, "Ann").with_city("Oslo"),
    ];
    let sort = vec![SortKey::asc("address.city"), SortKey::asc("name")];
    assert_eq!(ids(&apply(&users, &[], "", &sort)), vec![1, 2]);
}

#[test]
fn test_numeric_sort() {
    let users = fixture_users();
    let result = apply(&users, &[], "", &[SortKey::desc("id")]);
    assert_eq!(ids(&result), vec![5, 4, 3, 2, 1]);
}

#[test]
fn test_unknown_sort_field_keeps_order() {
    let users = fixture_users();
    let result = apply(&users, &[], "", &[SortKey::asc("favoriteColor")]);
    assert_eq!(ids(&result), ids(&users));
}

// ============================================================================
// Whole pipeline
// ============================================================================

#[test]
fn test_result_is_subset_of_input() {
    let users = fixture_users();
    let specs = vec![
        QuerySpec::new(),
        QuerySpec::new().search("a"),
        QuerySpec::new().filter(ColumnFilter::contains("email", ".")),
        QuerySpec::new()
            .search("e")
            .filter(ColumnFilter::new("id", FilterOperator::GreaterThan, 1i64))
            .sort_by(SortKey::desc("username")),
        QuerySpec::new().sort_by(SortKey::asc("address.geo.lat")),
    ];

    for spec in &specs {
        let result = QueryProcessor.apply(&users, spec);
        assert!(result.len() <= users.len());

        let mut seen = std::collections::HashSet::new();
        for user in &result {
            assert!(seen.insert(user.id), "duplicated record {}", user.id);
            let original = users.iter().find(|u| u.id == user.id);
            assert_eq!(original, Some(user), "fabricated record {}", user.id);
        }
    }
}

#[test]
fn test_input_collection_untouched() {
    let users = fixture_users();
    let before = users.clone();
    let _ = apply(&users, &[], "", &[SortKey::desc("name")]);
    assert_eq!(users, before);
}

#[test]
fn test_query_spec_from_json() {
    let spec: QuerySpec = serde_json::from_str(
        r#"{
            "search": "rom",
            "filters": [
                {"field": "address.city", "operator": "startsWith", "value": "mc"}
            ],
            "sort": [{"field": "name", "direction": "desc"}]
        }"#,
    )
    .unwrap();

    let result = QueryProcessor.apply(&fixture_users(), &spec);
    assert_eq!(ids(&result), vec![3]);
}

#[test]
fn test_pagination_over_sorted_rows() {
    let users = fixture_users();
    let rows = apply(&users, &[], "", &[SortKey::asc("name")]);

    let first = paginate(&rows, Page::new(1, 2));
    assert_eq!(names(&first.data), vec![Some("Chelsey Dietrich"), Some("Clementine Bauch")]);
    assert_eq!(first.pagination.total, 5);
    assert!(first.pagination.has_next);

    let last = paginate(&rows, Page::new(3, 2));
    assert_eq!(names(&last.data), vec![Some("Patricia Lebsack")]);
    assert!(!last.pagination.has_next);
}
